//! Build orchestration for Sift.
//!
//! # Key Abstractions
//!
//! - [`OptionResolver`]: merges option layers into [`ResolvedOptions`]
//! - [`DocumentCollector`]: buckets submitted documents by language
//! - [`IndexHooks`]: extension points fired while indexes are built
//! - [`BuildSession`]: one build, from first submission to emitted assets

#![doc = include_str!("../README.md")]

pub mod collector;
pub mod config;
pub mod emitter;
pub mod hooks;
pub mod indexer;
pub mod options;
pub mod session;

pub use collector::{DocumentCollector, DocumentPayload, SubmitOutcome};
pub use config::SiftConfig;
pub use emitter::{Asset, AssetSet, emit_assets};
pub use hooks::{AssetContext, HookRegistry, IndexContext, IndexDoneContext, IndexHooks};
pub use indexer::build_index;
pub use options::{
    ComponentToggle, LanguageList, LocaleSpec, ModuleOptions, OptionResolver, ResolvedOptions,
    StatusMessages, UiOptions,
};
pub use session::BuildSession;
