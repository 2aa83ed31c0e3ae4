//! Sift Core — shared errors and locale utilities.
//!
//! This crate provides the foundational types used across all Sift crates.
//! It has no internal Sift dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`locale`]: Locale tag normalization

#![doc = include_str!("../README.md")]

pub mod error;
pub mod locale;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use locale::{BASELINE_LANGUAGE, language_or_baseline, normalize_language};
