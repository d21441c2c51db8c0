mod directory_port;
mod discussion_port;

pub use directory_port::DirectoryPort;
pub use discussion_port::DiscussionPort;

#[cfg(test)]
pub mod mocks {
    pub use super::directory_port::MockDirectoryPort;
    pub use super::discussion_port::mock::MockDiscussionPort;
}
