//! Directory search port definition.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::errors::ClientError;
use crate::domain::search::{SearchQuery, SearchRecord};

/// Port for searching rooms and users on the chat server.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectoryPort: Send + Sync {
    /// Returns the rooms and users matching the query.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchRecord>, ClientError>;
}
