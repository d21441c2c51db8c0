//! User entity.

/// User record as returned by the directory search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// User identifier.
    pub id: String,
    /// Unique username, used when inviting.
    pub username: String,
    /// Real name, if the server exposes it.
    pub name: Option<String>,
}

impl UserRecord {
    /// Creates new user record.
    #[must_use]
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            name: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
