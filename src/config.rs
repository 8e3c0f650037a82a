//! Configuration loader and schema types.
//!
//! This module exposes the settings that supply defaults for every command
//! and helpers to load them from the environment and an optional file.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
