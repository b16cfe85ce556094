//! Utility modules.
//!
//! - [`ids`]: slug normalization

pub mod ids;
