//! Configuration types
//!
//! Configuration is resolved once at startup. The firmware embeds a TOML
//! file and parses it with [`parse_config`]; host tests build the structs
//! directly.

pub mod parse;
pub mod types;

pub use parse::{parse_config, parse_pin};
pub use types::*;
