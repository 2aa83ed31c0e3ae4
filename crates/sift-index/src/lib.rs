//! Search index construction for Sift.
//!
//! This crate owns everything that touches text: analyzers, stemmer
//! plugins and the serializable inverted index.
//!
//! # Key Abstractions
//!
//! - [`StemmerRegistry`]: static catalog of language plugins with a lazy load cache
//! - [`IndexBuilder`]: accumulates ref, fields and documents
//! - [`SearchIndex`]: the built, JSON-serializable index

#![doc = include_str!("../README.md")]

pub mod analyzer;
pub mod builder;
pub mod index;
pub mod plugin;
pub mod registry;

pub use builder::{FieldSpec, IndexBuilder};
pub use index::SearchIndex;
pub use plugin::LanguagePlugin;
pub use registry::{PluginFactory, StemmerRegistry};
