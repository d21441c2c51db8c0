//! Binds a picker target to the directory port.

use std::sync::Arc;

use futures_util::FutureExt;
use tracing::debug;

use super::debounce::SearchFn;
use crate::domain::entities::TitleSettings;
use crate::domain::errors::ClientError;
use crate::domain::ports::DirectoryPort;
use crate::domain::search::{SearchResultItem, SearchTarget};

/// Builds the lookup a picker debounces: query the directory for `target`
/// and project the records into display items.
#[must_use]
pub fn search_fn(
    target: SearchTarget,
    directory: Arc<dyn DirectoryPort>,
    settings: TitleSettings,
) -> SearchFn<SearchResultItem> {
    let settings = Arc::new(settings);

    Arc::new(move |keyword: String| {
        let directory = Arc::clone(&directory);
        let settings = Arc::clone(&settings);

        async move {
            let query = target.query(&keyword);
            debug!(picker = %target, keyword = %query.text, "Searching directory");

            let records = directory.search(&query).await?;
            let items = target.project(records, &settings);

            debug!(picker = %target, count = items.len(), "Directory search finished");
            Ok::<_, ClientError>(items)
        }
        .boxed()
    })
}
