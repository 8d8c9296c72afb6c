pub mod commands;
pub mod enums;
pub mod error;
pub mod output;
pub mod playback;
pub mod progress;
pub mod session;
pub mod state;
pub mod system;
pub mod track;
pub mod traits;

#[cfg(test)]
pub(crate) mod fake;
