//! Application layer with use cases and form services.

/// Form, search and debounce services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use services::debounce::{DebouncedSearch, SearchOutcome};
pub use services::form_controller::{DiscussionFormController, HeaderHandle, HeaderState};
pub use use_cases::CreateDiscussionUseCase;
