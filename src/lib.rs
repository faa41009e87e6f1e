//! Typed, command-line-flag style getters for layered TOML configuration.
//!
//! [`Accessor`] reads values out of a [`Config`] (or any other [`Store`]) and
//! converts them with the same `clap` value parsers a command-line flag of
//! that type would use, so switching a setting from a flag to a config file
//! changes neither the accepted formats nor the error texts.

pub mod accessor;
pub mod config;
mod error;
pub mod flag;

pub use accessor::{AccessError, Accessor};
pub use config::{Config, ConfigBuilder, ConfigError, Store};
pub use error::Error;
