//! Toolscout Core: shared configuration, errors and utilities.
//!
//! This crate provides the foundational types used across all Toolscout
//! crates. It has no internal Toolscout dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`config`]: `SiteConfig` and its sections
//! - [`traits`]: `ConfigManager`
//! - [`logging`]: `tracing-subscriber` setup
//! - [`util`]: slug utilities

#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod logging;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use config::{ConnectConfig, ContentConfig, LoggingConfig, ServerConfig, SiteConfig};
pub use error::{Error, Result};
pub use traits::ConfigManager;

// Convenience re-exports from util
pub use util::ids::{normalize_slug, slug_from_path};
