//! One build, from first submission to emitted assets.
//!
//! # Example
//!
//! ```rust,ignore
//! use sift_build::{BuildSession, DocumentPayload, OptionResolver};
//! use sift_index::StemmerRegistry;
//!
//! let registry = StemmerRegistry::global();
//! let options = OptionResolver::new(&registry).resolve();
//! let mut session = BuildSession::new(options, registry);
//!
//! session.submit(DocumentPayload::new("en", serde_json::json!({ "id": 1, "title": "Hi" })));
//! let assets = session.finalize().await?;
//! assets.write_to("dist").await?;
//! ```

use std::sync::Arc;

use serde_json::{Map, Value};
use sift_core::Result;
use sift_index::StemmerRegistry;

use crate::collector::{DocumentCollector, DocumentPayload, SubmitOutcome};
use crate::emitter::{AssetSet, emit_assets};
use crate::hooks::{HookRegistry, IndexHooks};
use crate::options::ResolvedOptions;

/// Per-build state: options, collected documents and registered hooks.
///
/// Independent sessions share nothing but the stemmer registry, so several
/// builds can run in one process.
#[derive(Debug)]
pub struct BuildSession {
    options: ResolvedOptions,
    registry: Arc<StemmerRegistry>,
    hooks: HookRegistry,
    collector: DocumentCollector,
}

impl BuildSession {
    /// Start a session with no hooks.
    pub fn new(options: ResolvedOptions, registry: Arc<StemmerRegistry>) -> Self {
        Self {
            options,
            registry,
            hooks: HookRegistry::new(),
            collector: DocumentCollector::new(),
        }
    }

    /// Replace the hook registry.
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    /// Register one more hook.
    pub fn register_hook(&mut self, hook: Arc<dyn IndexHooks>) -> &mut Self {
        self.hooks.register(hook);
        self
    }

    /// The effective options, including any stemmer fallbacks recorded so far.
    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    /// Collect one document.
    pub fn submit(&mut self, payload: DocumentPayload) -> SubmitOutcome {
        self.collector.submit(&mut self.options, payload)
    }

    /// Documents collected for `language`.
    pub fn documents(&self, language: &str) -> &[Value] {
        self.collector.documents(language)
    }

    /// Metadata collected for `language`.
    pub fn metas(&self, language: &str) -> Option<&Map<String, Value>> {
        self.collector.metas(language)
    }

    /// Build every language's index and return the artifacts.
    ///
    /// Consumes the session; submissions must be complete by now.
    pub async fn finalize(self) -> Result<AssetSet> {
        log::info!(
            "building search indexes for {} documents",
            self.collector.len()
        );
        emit_assets(&self.options, &self.registry, &self.hooks, self.collector).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionResolver;
    use serde_json::json;

    #[tokio::test]
    async fn test_session_submit_and_finalize() {
        let registry = Arc::new(StemmerRegistry::builtin());
        let options = OptionResolver::new(&registry).resolve();
        let mut session = BuildSession::new(options, Arc::clone(&registry));

        assert!(
            session
                .submit(DocumentPayload::new("en", json!({ "id": 1, "title": "Alan" })))
                .is_accepted()
        );
        assert_eq!(session.documents("en").len(), 1);
        assert!(session.metas("en").is_none());

        let assets = session.finalize().await.unwrap();
        assert!(assets.get("search-index/en.json").is_some());
    }

    #[test]
    fn test_fallback_visible_in_options() {
        let registry = Arc::new(StemmerRegistry::builtin());
        let options = OptionResolver::new(&registry).resolve();
        let mut session = BuildSession::new(options, registry);

        session.submit(DocumentPayload::new("xx", json!({ "id": 1 })));
        assert_eq!(session.options().stemmer_language("xx"), "en");
    }
}
