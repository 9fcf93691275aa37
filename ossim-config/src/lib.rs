//! Parses the configuration file grammar (spec §6) into an
//! [`ossim_core::Configuration`], and can render one back out to the same
//! grammar.
//!
//! This crate owns the only filesystem/text concern `ossim-core` is kept
//! free of for configuration: everything it produces is validated before
//! it leaves this crate (`Configuration::validate` is called by `build`).

mod error;
mod grammar;

pub use error::ConfigError;
pub use grammar::{load_from_path, load_from_str, to_grammar_string};
