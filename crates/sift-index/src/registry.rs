//! Static stemmer plugin registry.
//!
//! The registry maps two-letter language codes to plugin factories. Its key
//! set is the catalog of languages that can be stemmed; configured locales
//! are intersected with it to decide which languages are supported.
//!
//! Factories run at most once per registry: [`StemmerRegistry::load`]
//! memoizes the constructed plugin so later builds for the same language
//! reuse it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sift_index::StemmerRegistry;
//!
//! let registry = StemmerRegistry::global();
//! assert!(registry.contains("fr"));
//! let plugin = registry.load("fr").await?;
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use sift_core::{Error, Result};
use tantivy::tokenizer::Language;
use tokio::sync::Mutex;

use crate::plugin::LanguagePlugin;

/// Constructs a language plugin on demand.
pub type PluginFactory = Arc<dyn Fn() -> Result<LanguagePlugin> + Send + Sync>;

/// Languages bundled with the registry.
///
/// English is deliberately absent: it is the baseline pipeline and needs no
/// plugin.
const BUILTIN_LANGUAGES: &[(&str, &str, Language)] = &[
    ("ar", "Arabic", Language::Arabic),
    ("da", "Danish", Language::Danish),
    ("de", "German", Language::German),
    ("el", "Greek", Language::Greek),
    ("es", "Spanish", Language::Spanish),
    ("fi", "Finnish", Language::Finnish),
    ("fr", "French", Language::French),
    ("hu", "Hungarian", Language::Hungarian),
    ("it", "Italian", Language::Italian),
    ("nl", "Dutch", Language::Dutch),
    ("no", "Norwegian", Language::Norwegian),
    ("pt", "Portuguese", Language::Portuguese),
    ("ro", "Romanian", Language::Romanian),
    ("ru", "Russian", Language::Russian),
    ("sv", "Swedish", Language::Swedish),
    ("ta", "Tamil", Language::Tamil),
    ("tr", "Turkish", Language::Turkish),
];

static GLOBAL: OnceLock<Arc<StemmerRegistry>> = OnceLock::new();

/// Catalog of stemmer plugins with a lazily populated load cache.
pub struct StemmerRegistry {
    factories: BTreeMap<String, PluginFactory>,
    loaded: Mutex<HashMap<String, Arc<LanguagePlugin>>>,
    initialized: AtomicBool,
}

impl StemmerRegistry {
    /// An empty registry. Only the baseline language is available.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
            loaded: Mutex::new(HashMap::new()),
            initialized: AtomicBool::new(false),
        }
    }

    /// A registry holding every bundled language.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for &(code, name, language) in BUILTIN_LANGUAGES {
            registry.register(
                code,
                Arc::new(move || -> Result<LanguagePlugin> {
                    Ok(LanguagePlugin::new(code, name, language))
                }),
            );
        }
        registry
    }

    /// The process-wide registry, built from [`StemmerRegistry::builtin`] on
    /// first access.
    pub fn global() -> Arc<StemmerRegistry> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::builtin())))
    }

    /// Register (or replace) the factory for `code`.
    ///
    /// Codes are stored lower-cased.
    pub fn register(&mut self, code: &str, factory: PluginFactory) -> &mut Self {
        self.factories.insert(code.to_lowercase(), factory);
        self
    }

    /// Whether a plugin exists for `code`.
    pub fn contains(&self, code: &str) -> bool {
        self.factories.contains_key(code)
    }

    /// Every language code a plugin exists for, sorted.
    pub fn available_languages(&self) -> BTreeSet<String> {
        self.factories.keys().cloned().collect()
    }

    /// Mark stemmer support as initialized. Idempotent.
    ///
    /// Returns `true` only for the call that performed the initialization.
    pub fn init_support(&self) -> bool {
        let first = !self.initialized.swap(true, Ordering::SeqCst);
        if first {
            log::debug!(
                "stemmer support initialized ({} languages available)",
                self.factories.len()
            );
        }
        first
    }

    /// Whether [`init_support`](Self::init_support) has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Load the plugin for `code`, constructing it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Plugin`] if no factory is registered for `code` or
    /// the factory fails.
    pub async fn load(&self, code: &str) -> Result<Arc<LanguagePlugin>> {
        let mut loaded = self.loaded.lock().await;
        if let Some(plugin) = loaded.get(code) {
            return Ok(Arc::clone(plugin));
        }

        let factory = self
            .factories
            .get(code)
            .ok_or_else(|| Error::plugin(code, "no stemmer plugin registered"))?;
        let plugin = factory().map_err(|e| match e {
            Error::Plugin { .. } => e,
            other => Error::plugin(code, other.to_string()),
        })?;

        log::debug!("loaded stemmer plugin '{}' ({})", plugin.code(), plugin.name());
        let plugin = Arc::new(plugin);
        loaded.insert(code.to_string(), Arc::clone(&plugin));
        Ok(plugin)
    }

    /// Whether the plugin for `code` has already been loaded.
    pub async fn is_loaded(&self, code: &str) -> bool {
        self.loaded.lock().await.contains_key(code)
    }
}

impl fmt::Debug for StemmerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StemmerRegistry")
            .field("languages", &self.factories.keys().collect::<Vec<_>>())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
