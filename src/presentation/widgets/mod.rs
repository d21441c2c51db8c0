mod header_bar;
mod input;
mod loading_overlay;
mod message_field;
mod selector;

pub use header_bar::{HeaderBar, HeaderBarStyle};
pub use input::TextInput;
pub use loading_overlay::{LoadingOverlay, LoadingOverlayWidget};
pub use message_field::MessageField;
pub use selector::{Selector, SelectorAction, SelectorPopup};
