//! # primlisten-cli
//!
//! CLI library for generating specialized primitive change-listener
//! contracts from a `primlisten.toml` configuration.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`generator`] - Contract generation and up-to-date checks
//! - [`writer`] - File output and dry-run support
//! - [`watcher`] - Configuration watching for development mode
//! - [`error`] - Error types and handling

pub mod config;
pub mod error;
pub mod generator;
pub mod watcher;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, ConfigManager, Target};
pub use error::{CliError, CliResult};
pub use generator::{FileStatus, GeneratedOutput, ListenerGenerator, ValidationReport};
pub use watcher::FileWatcher;
pub use writer::FileWriter;
