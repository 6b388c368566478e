//! # Core Module
//!
//! Configuration and shared error types for WaterQuest.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add LoadError for best-effort hydration of JSON files
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod error;

// Re-export commonly used items
pub use config::{Config, NotifierKind};
pub use error::LoadError;
