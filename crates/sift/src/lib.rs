//! Sift — per-locale static search indexes.
//!
//! Umbrella crate re-exporting the Sift components:
//!
//! - [`sift_core`]: errors and locale helpers
//! - [`sift_index`]: stemmer registry and index builder
//! - [`sift_build`]: option resolution, document collection and asset emission

pub use sift_build;
pub use sift_core;
pub use sift_index;

pub use sift_build::{BuildSession, DocumentPayload, ModuleOptions, OptionResolver, SiftConfig};
pub use sift_core::{Error, Result};
pub use sift_index::StemmerRegistry;
