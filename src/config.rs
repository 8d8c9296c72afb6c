//! Runtime settings.
//!
//! Values come from environment variables, an optional TOML file and the
//! struct defaults, in that order of precedence.

mod error;
mod load;
mod schema;

pub use error::SettingsError;
pub use load::{default_config_path, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
