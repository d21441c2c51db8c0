//! Discussion creation port definition.

use async_trait::async_trait;

use crate::domain::discussion::CreateDiscussionRequest;
use crate::domain::errors::ClientError;

/// Port for creating discussions.
#[async_trait]
pub trait DiscussionPort: Send + Sync {
    /// Creates a discussion under `request.prid`.
    async fn create_discussion(
        &self,
        request: CreateDiscussionRequest,
    ) -> Result<(), ClientError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Mutex;

    type Observer = Box<dyn Fn() -> bool + Send + Sync>;

    /// Mock discussion port recording every request.
    pub struct MockDiscussionPort {
        should_succeed: Arc<AtomicBool>,
        requests: Arc<Mutex<Vec<CreateDiscussionRequest>>>,
        observer: Option<Observer>,
        observed: Arc<Mutex<Vec<bool>>>,
    }

    impl MockDiscussionPort {
        /// Creates new mock.
        pub fn new(should_succeed: bool) -> Self {
            Self {
                should_succeed: Arc::new(AtomicBool::new(should_succeed)),
                requests: Arc::new(Mutex::new(Vec::new())),
                observer: None,
                observed: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Samples `observer` each time a request is handled.
        pub fn observing(mut self, observer: impl Fn() -> bool + Send + Sync + 'static) -> Self {
            self.observer = Some(Box::new(observer));
            self
        }

        /// Returns recorded requests.
        pub async fn requests(&self) -> Vec<CreateDiscussionRequest> {
            self.requests.lock().await.clone()
        }

        /// Returns the observer values sampled at each call.
        pub async fn observed(&self) -> Vec<bool> {
            self.observed.lock().await.clone()
        }
    }

    #[async_trait]
    impl DiscussionPort for MockDiscussionPort {
        async fn create_discussion(
            &self,
            request: CreateDiscussionRequest,
        ) -> Result<(), ClientError> {
            if let Some(observer) = &self.observer {
                let value = observer();
                self.observed.lock().await.push(value);
            }
            self.requests.lock().await.push(request);

            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(ClientError::rejected("mock rejection"))
            }
        }
    }
}
