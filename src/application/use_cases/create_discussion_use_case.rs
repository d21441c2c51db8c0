//! Create discussion use case implementation.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::discussion::CreateDiscussionRequest;
use crate::domain::errors::ClientError;
use crate::domain::ports::DiscussionPort;

/// Creates a discussion on the chat server.
#[derive(Clone)]
pub struct CreateDiscussionUseCase {
    discussion_port: Arc<dyn DiscussionPort>,
}

impl CreateDiscussionUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(discussion_port: Arc<dyn DiscussionPort>) -> Self {
        Self { discussion_port }
    }

    /// Executes the request.
    ///
    /// # Errors
    /// Returns error if the server rejects the request or cannot be reached.
    pub async fn execute(&self, request: CreateDiscussionRequest) -> Result<(), ClientError> {
        debug!(
            prid = %request.prid,
            pmid = ?request.pmid,
            users = request.users.len(),
            "Creating discussion"
        );

        let name = request.t_name.clone();
        self.discussion_port.create_discussion(request).await?;

        info!(name = %name, "Discussion created");
        Ok(())
    }
}
