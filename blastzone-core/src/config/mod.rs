//! Configuration types
//!
//! Typed controller configuration plus the parser for `controller.toml`.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
