// Parsing utilities
pub mod parse_flag;

// JSON / env utilities
pub mod base64_env;
pub mod json_converter;

// Re-export all utilities for convenient access
pub use base64_env::{base64_env_entry, plain_env_entry};
pub use json_converter::{is_truthy, value_to_env_string, value_to_short_string};
pub use parse_flag::parse_flag;
