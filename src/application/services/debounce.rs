//! Debounced directory search.
//!
//! Every call supersedes the previous one: its timer is aborted and its
//! request id is no longer current, so only the last call within the quiet
//! period runs. Results are delivered through a sink and are dropped if a
//! newer call was made while the search was in flight.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::domain::errors::ClientError;

/// Quiet period used by the pickers.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Asynchronous lookup being debounced.
pub type SearchFn<T> =
    Arc<dyn Fn(String) -> BoxFuture<'static, Result<Vec<T>, ClientError>> + Send + Sync>;

/// Receives the outcome of the latest search.
pub type OutcomeSink<T> = Arc<dyn Fn(SearchOutcome<T>) + Send + Sync>;

/// Result of a search that was still current when it settled.
#[derive(Debug)]
pub struct SearchOutcome<T> {
    pub request_id: u64,
    pub keyword: String,
    pub result: Result<Vec<T>, ClientError>,
}

pub struct DebouncedSearch<T> {
    search: SearchFn<T>,
    sink: OutcomeSink<T>,
    quiet_period: Duration,
    latest: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> DebouncedSearch<T> {
    #[must_use]
    pub fn new(search: SearchFn<T>, sink: OutcomeSink<T>, quiet_period: Duration) -> Self {
        Self {
            search,
            sink,
            quiet_period,
            latest: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    /// Schedules a search for `keyword`, superseding any pending one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call(&mut self, keyword: impl Into<String>) -> u64 {
        let request_id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let keyword = keyword.into();
        let search = Arc::clone(&self.search);
        let sink = Arc::clone(&self.sink);
        let latest = Arc::clone(&self.latest);
        let quiet_period = self.quiet_period;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            if latest.load(Ordering::SeqCst) != request_id {
                return;
            }

            trace!(request_id, keyword = %keyword, "Running debounced search");
            let result = search(keyword.clone()).await;

            if latest.load(Ordering::SeqCst) != request_id {
                trace!(request_id, "Dropping superseded search result");
                return;
            }
            sink(SearchOutcome {
                request_id,
                keyword,
                result,
            });
        }));

        request_id
    }

    /// Id of the most recent call.
    #[must_use]
    pub fn latest_request(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Returns whether `request_id` belongs to the most recent call.
    #[must_use]
    pub fn is_current(&self, request_id: u64) -> bool {
        self.latest_request() == request_id
    }

    /// Drops the pending search, if any, and invalidates in-flight results.
    pub fn cancel(&mut self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}

impl<T> Drop for DebouncedSearch<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use std::sync::Mutex;
    use tokio::sync::mpsc;
    use tokio::time::{Instant, sleep};

    type Executed = Arc<Mutex<Vec<(String, Duration)>>>;

    fn recording_search(start: Instant, executed: Executed) -> SearchFn<String> {
        Arc::new(move |keyword: String| {
            executed
                .lock()
                .unwrap()
                .push((keyword.clone(), start.elapsed()));
            async move { Ok::<_, ClientError>(vec![keyword]) }.boxed()
        })
    }

    fn channel_sink() -> (
        OutcomeSink<String>,
        mpsc::UnboundedReceiver<SearchOutcome<String>>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink: OutcomeSink<String> = Arc::new(move |outcome: SearchOutcome<String>| {
            let _ = tx.send(outcome);
        });
        (sink, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_calls_collapse_to_last() {
        let start = Instant::now();
        let executed = Executed::default();
        let (sink, mut rx) = channel_sink();
        let mut debounced = DebouncedSearch::new(
            recording_search(start, executed.clone()),
            sink,
            DEFAULT_QUIET_PERIOD,
        );

        debounced.call("a");
        sleep(Duration::from_millis(50)).await;
        debounced.call("ab");
        sleep(Duration::from_millis(50)).await;
        let last = debounced.call("abc");

        let outcome = rx.recv().await.unwrap();
        assert_eq!(outcome.request_id, last);
        assert_eq!(outcome.keyword, "abc");
        assert_eq!(outcome.result.unwrap(), vec!["abc".to_string()]);

        let executed = executed.lock().unwrap().clone();
        assert_eq!(executed.len(), 1);
        assert_eq!(executed[0].0, "abc");
        assert!(executed[0].1 >= Duration::from_millis(400));
        assert!(executed[0].1 < Duration::from_millis(405));
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_runs_before_quiet_period() {
        let executed = Executed::default();
        let (sink, mut rx) = channel_sink();
        let mut debounced = DebouncedSearch::new(
            recording_search(Instant::now(), executed.clone()),
            sink,
            DEFAULT_QUIET_PERIOD,
        );

        debounced.call("gen");
        sleep(Duration::from_millis(299)).await;
        assert!(executed.lock().unwrap().is_empty());
        assert!(rx.try_recv().is_err());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(executed.lock().unwrap().len(), 1);
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_calls_each_run() {
        let executed = Executed::default();
        let (sink, mut rx) = channel_sink();
        let mut debounced = DebouncedSearch::new(
            recording_search(Instant::now(), executed.clone()),
            sink,
            DEFAULT_QUIET_PERIOD,
        );

        debounced.call("a");
        let first = rx.recv().await.unwrap();
        debounced.call("b");
        let second = rx.recv().await.unwrap();

        assert_eq!(first.keyword, "a");
        assert_eq!(second.keyword, "b");
        assert!(second.request_id > first.request_id);
        assert_eq!(executed.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_result_dropped_when_superseded() {
        let (sink, mut rx) = channel_sink();
        let search: SearchFn<String> = Arc::new(|keyword: String| {
            async move {
                if keyword == "slow" {
                    sleep(Duration::from_secs(5)).await;
                }
                Ok::<_, ClientError>(vec![keyword])
            }
            .boxed()
        });
        let mut debounced = DebouncedSearch::new(search, sink, DEFAULT_QUIET_PERIOD);

        debounced.call("slow");
        sleep(Duration::from_millis(350)).await;
        debounced.call("fast");
        sleep(Duration::from_secs(10)).await;

        let outcome = rx.try_recv().unwrap();
        assert_eq!(outcome.keyword, "fast");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_pending_call() {
        let executed = Executed::default();
        let (sink, mut rx) = channel_sink();
        let mut debounced = DebouncedSearch::new(
            recording_search(Instant::now(), executed.clone()),
            sink,
            DEFAULT_QUIET_PERIOD,
        );

        let id = debounced.call("a");
        debounced.cancel();
        assert!(!debounced.is_current(id));

        sleep(Duration::from_secs(1)).await;
        assert!(executed.lock().unwrap().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending_call() {
        let executed = Executed::default();
        let (sink, _rx) = channel_sink();
        let mut debounced = DebouncedSearch::new(
            recording_search(Instant::now(), executed.clone()),
            sink,
            DEFAULT_QUIET_PERIOD,
        );

        debounced.call("a");
        drop(debounced);

        sleep(Duration::from_secs(1)).await;
        assert!(executed.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_are_delivered_to_consumer() {
        let (sink, mut rx) = channel_sink();
        let search: SearchFn<String> = Arc::new(|_: String| {
            async { Err::<Vec<String>, _>(ClientError::network("offline")) }.boxed()
        });
        let mut debounced = DebouncedSearch::new(search, sink, DEFAULT_QUIET_PERIOD);

        debounced.call("x");
        let outcome = rx.recv().await.unwrap();
        assert!(matches!(outcome.result, Err(ClientError::Network { .. })));
    }
}
