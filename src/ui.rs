pub mod app;
pub mod components;
pub mod input;
pub mod layout;
pub mod library;
pub mod message;
pub mod tui;
pub mod util;
