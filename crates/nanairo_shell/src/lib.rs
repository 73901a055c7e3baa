//! # Nanairo Shell
//!
//! Headless commands over scene files: write presets, validate, summarize
//! and query the token registry.

pub mod commands;
pub mod config;
pub mod error;

pub use config::ShellConfig;
pub use error::{Result, ShellError};
