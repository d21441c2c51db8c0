//! Use case implementations.

mod create_discussion_use_case;

pub use create_discussion_use_case::CreateDiscussionUseCase;
