pub mod debounce;
pub mod directory_search;
pub mod form_controller;
