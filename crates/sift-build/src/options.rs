//! Option layers and their resolution.
//!
//! Options arrive in three layers: built-in defaults, module-level options
//! (usually loaded from a config file) and call-site options. Later layers
//! win field by field. [`OptionResolver`] merges the layers and works out
//! which languages get a stemmer.
//!
//! # Example
//!
//! ```
//! use sift_build::{LanguageList, ModuleOptions, OptionResolver};
//! use sift_index::StemmerRegistry;
//!
//! let registry = StemmerRegistry::builtin();
//! let options = OptionResolver::new(&registry)
//!     .call_site(ModuleOptions {
//!         path: Some("/search/".into()),
//!         languages: Some(LanguageList::One("nl_NL".into())),
//!         ..Default::default()
//!     })
//!     .resolve();
//!
//! assert_eq!(options.path, "search");
//! assert!(options.is_supported("nl"));
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use sift_core::{BASELINE_LANGUAGE, normalize_language};
use sift_index::StemmerRegistry;

/// Default artifact directory. Left untouched by slash trimming.
pub const DEFAULT_PATH: &str = "search-index";

/// Default ref field.
pub const DEFAULT_REF: &str = "id";

/// Default indexed fields.
pub const DEFAULT_FIELDS: &[&str] = &["title", "body"];

/// Component name used when the global component is enabled without a name.
pub const DEFAULT_COMPONENT_NAME: &str = "sift-search";

// ============================================================================
// Option value types
// ============================================================================

/// A locale entry: either a bare tag or an object carrying a `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocaleSpec {
    Code(String),
    Entry { code: String },
}

impl LocaleSpec {
    /// The raw locale tag.
    pub fn code(&self) -> &str {
        match self {
            Self::Code(code) | Self::Entry { code } => code.as_str(),
        }
    }
}

impl From<&str> for LocaleSpec {
    fn from(code: &str) -> Self {
        Self::Code(code.to_string())
    }
}

/// The `languages` option: a single tag or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LanguageList {
    One(String),
    Many(Vec<LocaleSpec>),
}

impl LanguageList {
    /// Flatten into a list of locale entries.
    pub fn into_locales(self) -> Vec<LocaleSpec> {
        match self {
            Self::One(code) => vec![LocaleSpec::Code(code)],
            Self::Many(locales) => locales,
        }
    }
}

/// The `global_component` option: an on/off switch or a component name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentToggle {
    Enabled(bool),
    Named(String),
}

impl Default for ComponentToggle {
    fn default() -> Self {
        Self::Enabled(false)
    }
}

impl ComponentToggle {
    /// The registered component name, or `None` when disabled.
    pub fn component_name(&self) -> Option<&str> {
        match self {
            Self::Enabled(true) => Some(DEFAULT_COMPONENT_NAME),
            Self::Enabled(false) => None,
            Self::Named(name) if name.is_empty() => None,
            Self::Named(name) => Some(name.as_str()),
        }
    }

    /// Whether the component is registered globally.
    pub fn is_enabled(&self) -> bool {
        self.component_name().is_some()
    }
}

/// Status texts shown by the search UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusMessages {
    pub fetching: String,
    pub loading: String,
    pub searching: String,
    pub no_results: String,
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self {
            fetching: "Fetching search index".to_string(),
            loading: "Loading search index".to_string(),
            searching: "Searching...".to_string(),
            no_results: "Sorry, but no results were found".to_string(),
        }
    }
}

// ============================================================================
// Option layers
// ============================================================================

/// One layer of options. Every field is optional; `None` defers to the
/// layer below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleOptions {
    /// Output path for the generated index files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Field holding each document's unique identifier.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_field: Option<String>,

    /// Fields to index, in order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,

    /// Stemmer language for documents whose locale is unsupported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,

    /// Locales to support. Falls back to the externally supplied list.
    #[serde(alias = "locales", skip_serializing_if = "Option::is_none")]
    pub languages: Option<LanguageList>,

    /// language -> stemmer language overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_stemmer_map: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_component: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_component: Option<ComponentToggle>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_messages: Option<StatusMessages>,
}

impl ModuleOptions {
    /// The built-in defaults layer.
    pub fn defaults() -> Self {
        Self {
            path: Some(DEFAULT_PATH.to_string()),
            ref_field: Some(DEFAULT_REF.to_string()),
            fields: Some(DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect()),
            default_language: Some(BASELINE_LANGUAGE.to_string()),
            languages: None,
            language_stemmer_map: None,
            include_component: Some(true),
            global_component: Some(ComponentToggle::Enabled(false)),
            css: Some(true),
            placeholder_text: None,
            status_messages: None,
        }
    }

    /// Overlay `other` on top of `self`; set fields in `other` win.
    ///
    /// Maps and lists are replaced wholesale, not merged.
    pub fn merge(self, other: ModuleOptions) -> ModuleOptions {
        ModuleOptions {
            path: other.path.or(self.path),
            ref_field: other.ref_field.or(self.ref_field),
            fields: other.fields.or(self.fields),
            default_language: other.default_language.or(self.default_language),
            languages: other.languages.or(self.languages),
            language_stemmer_map: other.language_stemmer_map.or(self.language_stemmer_map),
            include_component: other.include_component.or(self.include_component),
            global_component: other.global_component.or(self.global_component),
            css: other.css.or(self.css),
            placeholder_text: other.placeholder_text.or(self.placeholder_text),
            status_messages: other.status_messages.or(self.status_messages),
        }
    }
}

// ============================================================================
// Resolved options
// ============================================================================

/// Options for the search UI. Carried through resolution untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiOptions {
    pub include_component: bool,
    pub global_component: ComponentToggle,
    pub css: bool,
    pub placeholder_text: Option<String>,
    pub status_messages: StatusMessages,
}

/// The effective configuration of one build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedOptions {
    /// Artifact directory, without leading or trailing slashes.
    pub path: String,
    pub ref_field: String,
    pub fields: Vec<String>,
    /// Always `"en"` or a member of `supported_languages`.
    pub default_language: String,
    pub language_stemmer_map: BTreeMap<String, String>,
    /// Languages with a stemmer plugin enabled for this build.
    pub supported_languages: BTreeSet<String>,
    pub ui: UiOptions,
}

impl ResolvedOptions {
    /// Stemmer language for `language`, honoring overrides.
    pub fn stemmer_language(&self, language: &str) -> String {
        self.language_stemmer_map
            .get(language)
            .cloned()
            .unwrap_or_else(|| language.to_string())
    }

    /// Whether `language` has a stemmer enabled.
    pub fn is_supported(&self, language: &str) -> bool {
        self.supported_languages.contains(language)
    }

    /// Artifact name for `language`: `{path}/{language}.json`.
    pub fn asset_name(&self, language: &str) -> String {
        if self.path.is_empty() {
            format!("{language}.json")
        } else {
            format!("{}/{language}.json", self.path)
        }
    }
}

/// Merges option layers and resolves supported languages against a
/// stemmer registry.
#[derive(Debug)]
pub struct OptionResolver<'a> {
    registry: &'a StemmerRegistry,
    defaults: ModuleOptions,
    global: ModuleOptions,
    call_site: ModuleOptions,
    external_locales: Option<Vec<LocaleSpec>>,
}

impl<'a> OptionResolver<'a> {
    /// Start from the built-in defaults.
    pub fn new(registry: &'a StemmerRegistry) -> Self {
        Self {
            registry,
            defaults: ModuleOptions::defaults(),
            global: ModuleOptions::default(),
            call_site: ModuleOptions::default(),
            external_locales: None,
        }
    }

    /// Replace the defaults layer.
    pub fn defaults(mut self, options: ModuleOptions) -> Self {
        self.defaults = options;
        self
    }

    /// Set the module-level layer.
    pub fn global(mut self, options: ModuleOptions) -> Self {
        self.global = options;
        self
    }

    /// Set the call-site layer.
    pub fn call_site(mut self, options: ModuleOptions) -> Self {
        self.call_site = options;
        self
    }

    /// Locales supplied by the host (e.g. an i18n setup), used when no
    /// `languages` option is set.
    pub fn external_locales(mut self, locales: Vec<LocaleSpec>) -> Self {
        self.external_locales = Some(locales);
        self
    }

    /// Produce the effective configuration.
    ///
    /// Never fails: unsupported locales are dropped and an unsupported
    /// default language resets to `"en"`.
    pub fn resolve(self) -> ResolvedOptions {
        let merged = self.defaults.merge(self.global).merge(self.call_site);

        let path = match merged.path {
            Some(path) if path == DEFAULT_PATH => path,
            Some(path) => path.trim_matches('/').to_string(),
            None => DEFAULT_PATH.to_string(),
        };

        let language_stemmer_map = merged.language_stemmer_map.unwrap_or_default();

        let mut candidates: Vec<String> = match (merged.languages, self.external_locales) {
            (Some(languages), _) => languages.into_locales(),
            (None, Some(external)) => external,
            (None, None) => Vec::new(),
        }
        .iter()
        .map(|locale| locale.code().to_string())
        .collect();
        candidates.extend(language_stemmer_map.values().cloned());

        let supported_languages: BTreeSet<String> = candidates
            .iter()
            .map(|locale| normalize_language(locale))
            .filter(|language| self.registry.contains(language))
            .collect();

        let mut default_language = merged
            .default_language
            .unwrap_or_else(|| BASELINE_LANGUAGE.to_string());
        if default_language != BASELINE_LANGUAGE && !supported_languages.contains(&default_language)
        {
            log::debug!(
                "default language '{default_language}' has no stemmer, using '{BASELINE_LANGUAGE}'"
            );
            default_language = BASELINE_LANGUAGE.to_string();
        }

        if !supported_languages.is_empty() {
            self.registry.init_support();
        }

        log::debug!(
            "resolved search options: path='{path}', supported languages={supported_languages:?}"
        );

        ResolvedOptions {
            path,
            ref_field: merged.ref_field.unwrap_or_else(|| DEFAULT_REF.to_string()),
            fields: merged
                .fields
                .unwrap_or_else(|| DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect()),
            default_language,
            language_stemmer_map,
            supported_languages,
            ui: UiOptions {
                include_component: merged.include_component.unwrap_or(true),
                global_component: merged.global_component.unwrap_or_default(),
                css: merged.css.unwrap_or(true),
                placeholder_text: merged.placeholder_text,
                status_messages: merged.status_messages.unwrap_or_default(),
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn languages(list: &[&str]) -> Option<LanguageList> {
        Some(LanguageList::Many(
            list.iter().map(|l| LocaleSpec::from(*l)).collect(),
        ))
    }

    #[test]
    fn test_resolve_defaults() {
        let registry = StemmerRegistry::builtin();
        let options = OptionResolver::new(&registry).resolve();

        assert_eq!(options.path, DEFAULT_PATH);
        assert_eq!(options.ref_field, "id");
        assert_eq!(options.fields, vec!["title", "body"]);
        assert_eq!(options.default_language, "en");
        assert!(options.supported_languages.is_empty());
        assert!(options.ui.include_component);
        assert!(options.ui.css);
        assert!(!options.ui.global_component.is_enabled());
        assert!(!registry.is_initialized());
    }

    #[test]
    fn test_call_site_overrides_global() {
        let registry = StemmerRegistry::builtin();
        let options = OptionResolver::new(&registry)
            .global(ModuleOptions {
                ref_field: Some("slug".into()),
                fields: Some(vec!["title".into()]),
                ..Default::default()
            })
            .call_site(ModuleOptions {
                fields: Some(vec!["name".into(), "body".into()]),
                ..Default::default()
            })
            .resolve();

        assert_eq!(options.ref_field, "slug");
        assert_eq!(options.fields, vec!["name", "body"]);
    }

    #[test]
    fn test_path_is_trimmed() {
        let registry = StemmerRegistry::builtin();
        let options = OptionResolver::new(&registry)
            .call_site(ModuleOptions {
                path: Some("//my-crazy-search-index-path/".into()),
                ..Default::default()
            })
            .resolve();
        assert_eq!(options.path, "my-crazy-search-index-path");
        assert_eq!(
            options.asset_name("en"),
            "my-crazy-search-index-path/en.json"
        );
    }

    #[test]
    fn test_asset_name_with_empty_path() {
        let registry = StemmerRegistry::builtin();
        let options = OptionResolver::new(&registry)
            .call_site(ModuleOptions {
                path: Some("/".into()),
                ..Default::default()
            })
            .resolve();
        assert_eq!(options.asset_name("fr"), "fr.json");
    }

    #[test]
    fn test_single_language_string() {
        let registry = StemmerRegistry::builtin();
        let options = OptionResolver::new(&registry)
            .call_site(ModuleOptions {
                languages: Some(LanguageList::One("de_DE".into())),
                ..Default::default()
            })
            .resolve();
        assert_eq!(
            options.supported_languages,
            BTreeSet::from(["de".to_string()])
        );
        assert!(registry.is_initialized());
    }

    #[test]
    fn test_unsupported_locales_are_dropped() {
        let registry = StemmerRegistry::builtin();
        let options = OptionResolver::new(&registry)
            .call_site(ModuleOptions {
                languages: languages(&["en", "fr", "xx", "FR_ca", "nl_NL"]),
                ..Default::default()
            })
            .resolve();
        assert_eq!(
            options.supported_languages,
            BTreeSet::from(["fr".to_string(), "nl".to_string()])
        );
    }

    #[test]
    fn test_external_locales_used_without_languages_option() {
        let registry = StemmerRegistry::builtin();
        let options = OptionResolver::new(&registry)
            .external_locales(vec![
                LocaleSpec::from("en"),
                LocaleSpec::Entry {
                    code: "fr".into(),
                },
            ])
            .resolve();
        assert!(options.is_supported("fr"));
    }

    #[test]
    fn test_languages_option_beats_external_locales() {
        let registry = StemmerRegistry::builtin();
        let options = OptionResolver::new(&registry)
            .call_site(ModuleOptions {
                languages: languages(&["en"]),
                ..Default::default()
            })
            .external_locales(vec![LocaleSpec::from("fr")])
            .resolve();
        assert!(!options.is_supported("fr"));
        assert!(options.supported_languages.is_empty());
    }

    #[test]
    fn test_stemmer_map_targets_become_supported() {
        let registry = StemmerRegistry::builtin();
        let options = OptionResolver::new(&registry)
            .call_site(ModuleOptions {
                languages: languages(&["en"]),
                language_stemmer_map: Some(BTreeMap::from([(
                    "af".to_string(),
                    "nl".to_string(),
                )])),
                ..Default::default()
            })
            .resolve();
        assert!(options.is_supported("nl"));
        assert!(!options.is_supported("af"));
        assert_eq!(options.stemmer_language("af"), "nl");
        assert_eq!(options.stemmer_language("en"), "en");
    }

    #[test]
    fn test_unsupported_default_language_resets() {
        let registry = StemmerRegistry::builtin();
        let options = OptionResolver::new(&registry)
            .call_site(ModuleOptions {
                default_language: Some("french".into()),
                languages: languages(&["en", "fr"]),
                ..Default::default()
            })
            .resolve();
        assert_eq!(options.default_language, "en");
    }

    #[test]
    fn test_supported_default_language_kept() {
        let registry = StemmerRegistry::builtin();
        let options = OptionResolver::new(&registry)
            .call_site(ModuleOptions {
                default_language: Some("fr".into()),
                languages: languages(&["fr"]),
                ..Default::default()
            })
            .resolve();
        assert_eq!(options.default_language, "fr");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let registry = StemmerRegistry::builtin();
        let layer = ModuleOptions {
            languages: languages(&["nl", "fr", "de", "fr"]),
            ..Default::default()
        };
        let a = OptionResolver::new(&registry).call_site(layer.clone()).resolve();
        let b = OptionResolver::new(&registry).call_site(layer).resolve();
        assert_eq!(a, b);
        assert_eq!(a.supported_languages.len(), 3);
    }

    #[test]
    fn test_merge_prefers_later_layer() {
        let base = ModuleOptions::defaults();
        let merged = base.merge(ModuleOptions {
            css: Some(false),
            ..Default::default()
        });
        assert_eq!(merged.css, Some(false));
        assert_eq!(merged.include_component, Some(true));
    }

    #[test]
    fn test_options_from_toml() {
        let options: ModuleOptions = toml::from_str(
            r#"
                path = "my-path"
                ref = "slug"
                fields = ["name", "body"]
                default_language = "fr"
                locales = ["en", { code = "nl_NL" }]
                global_component = "global-search"

                [language_stemmer_map]
                af = "nl"
            "#,
        )
        .unwrap();

        assert_eq!(options.ref_field.as_deref(), Some("slug"));
        assert_eq!(
            options.languages,
            Some(LanguageList::Many(vec![
                LocaleSpec::from("en"),
                LocaleSpec::Entry {
                    code: "nl_NL".into()
                },
            ]))
        );
        assert_eq!(
            options.global_component.unwrap().component_name(),
            Some("global-search")
        );
    }

    #[test]
    fn test_component_toggle() {
        assert_eq!(ComponentToggle::Enabled(false).component_name(), None);
        assert_eq!(
            ComponentToggle::Enabled(true).component_name(),
            Some(DEFAULT_COMPONENT_NAME)
        );
        assert_eq!(ComponentToggle::Named(String::new()).component_name(), None);
    }
}
