//! Colour themes.

mod service;

pub use service::{Theme, ThemeColors};
