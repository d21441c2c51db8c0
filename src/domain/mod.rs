//! Domain layer with core entities, form state and port definitions.

/// Discussion form state.
pub mod discussion;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Directory search types.
pub mod search;

pub use discussion::{CreateDiscussionRequest, FormState, NavigationParams};
pub use errors::ClientError;
pub use ports::{DirectoryPort, DiscussionPort};
