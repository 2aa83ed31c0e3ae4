//! Document collection.
//!
//! Application code pushes documents one at a time while content is
//! evaluated. The collector buckets them by normalized language and keeps
//! an optional per-document metadata table. Nothing is indexed here; the
//! buckets are consumed once by the emitter.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sift_core::{BASELINE_LANGUAGE, language_or_baseline};
use sift_index::builder::ref_value;

use crate::options::ResolvedOptions;

/// One submission.
///
/// Deserializes from `{ "locale": "nl_NL", "document": {..}, "meta": {..} }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentPayload {
    pub locale: Option<String>,
    pub document: Option<Value>,
    pub meta: Option<Value>,
}

impl DocumentPayload {
    /// A payload for `document` tagged with `locale`.
    pub fn new(locale: impl Into<String>, document: Value) -> Self {
        Self {
            locale: Some(locale.into()),
            document: Some(document),
            meta: None,
        }
    }

    /// Attach metadata.
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No document in the payload; nothing happened.
    Ignored,
    /// The document had no ref and was dropped.
    Rejected {
        language: String,
        stemmer_fallback: bool,
    },
    /// The document was added to its language bucket.
    Accepted {
        language: String,
        stemmer_language: String,
        stemmer_fallback: bool,
    },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Whether the locale fell back to the default stemmer language.
    pub fn stemmer_fallback(&self) -> bool {
        match self {
            Self::Ignored => false,
            Self::Rejected {
                stemmer_fallback, ..
            }
            | Self::Accepted {
                stemmer_fallback, ..
            } => *stemmer_fallback,
        }
    }

    /// Number of warnings the submission logged.
    pub fn warnings(&self) -> usize {
        let rejected = usize::from(matches!(self, Self::Rejected { .. }));
        rejected + usize::from(self.stemmer_fallback())
    }
}

/// Per-build document buckets and metadata.
#[derive(Debug, Clone, Default)]
pub struct DocumentCollector {
    buckets: BTreeMap<String, Vec<Value>>,
    metas: BTreeMap<String, Map<String, Value>>,
    fallbacks: BTreeSet<String>,
}

impl DocumentCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect one document.
    ///
    /// An unsupported stemmer language falls back to the configured default
    /// and the fallback is written into `options.language_stemmer_map` so
    /// the index build uses it. The warning is repeated for every document
    /// of that language.
    pub fn submit(
        &mut self,
        options: &mut ResolvedOptions,
        payload: DocumentPayload,
    ) -> SubmitOutcome {
        let DocumentPayload {
            locale,
            document,
            meta,
        } = payload;

        let Some(document) = document.filter(is_truthy) else {
            return SubmitOutcome::Ignored;
        };

        let language = language_or_baseline(locale.as_deref());
        let mut stemmer_language = options.stemmer_language(&language);
        let mut stemmer_fallback = false;

        if self.fallbacks.contains(&language)
            || (stemmer_language != BASELINE_LANGUAGE && !options.is_supported(&stemmer_language))
        {
            log::warn!(
                target: "sift::collector",
                "locale '{}' not supported, falling back to '{}' for stemming",
                locale.as_deref().unwrap_or(BASELINE_LANGUAGE),
                options.default_language
            );
            stemmer_language = options.default_language.clone();
            options
                .language_stemmer_map
                .insert(language.clone(), stemmer_language.clone());
            self.fallbacks.insert(language.clone());
            stemmer_fallback = true;
        }

        let Some(doc_ref) = document.get(&options.ref_field).and_then(ref_value) else {
            log::warn!(
                target: "sift::collector",
                "unable to index document, it has no '{}' ref: {}",
                options.ref_field,
                document
            );
            return SubmitOutcome::Rejected {
                language,
                stemmer_fallback,
            };
        };

        self.buckets
            .entry(language.clone())
            .or_default()
            .push(document);

        if let Some(meta) = meta.filter(is_truthy) {
            self.metas
                .entry(language.clone())
                .or_default()
                .insert(doc_ref, meta);
        }

        SubmitOutcome::Accepted {
            language,
            stemmer_language,
            stemmer_fallback,
        }
    }

    /// Documents collected for `language`, in submission order.
    pub fn documents(&self, language: &str) -> &[Value] {
        self.buckets.get(language).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Metadata collected for `language`, keyed by document ref.
    pub fn metas(&self, language: &str) -> Option<&Map<String, Value>> {
        self.metas.get(language)
    }

    /// Languages with at least one document, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.buckets
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(language, _)| language.as_str())
    }

    /// Total number of collected documents.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Split into buckets and metadata, consuming the collector.
    pub fn into_parts(
        self,
    ) -> (
        BTreeMap<String, Vec<Value>>,
        BTreeMap<String, Map<String, Value>>,
    ) {
        (self.buckets, self.metas)
    }
}

/// JavaScript-style truthiness, used to skip empty submissions.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ============================================================================
// Tests
// ============================================================================
