//! Language plugins: the unit a stemmer registry hands out.

use tantivy::tokenizer::{Language, TextAnalyzer};

use crate::analyzer;

/// A loaded stemmer plugin for one language.
///
/// Attaching a plugin to an [`IndexBuilder`](crate::IndexBuilder) replaces the
/// baseline English pipeline with this language's stop words and stemmer.
#[derive(Clone, Debug)]
pub struct LanguagePlugin {
    code: String,
    name: String,
    language: Language,
}

impl LanguagePlugin {
    /// Create a plugin for `language`, registered under `code`.
    pub fn new(code: impl Into<String>, name: impl Into<String>, language: Language) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            language,
        }
    }

    /// Two-letter language code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable language name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The Tantivy stemmer language.
    pub fn language(&self) -> Language {
        self.language
    }

    /// A fresh analyzer for this language.
    pub fn analyzer(&self) -> TextAnalyzer {
        analyzer::stemming_analyzer(self.language)
    }

    /// Names of the pipeline stages this plugin installs, as recorded in
    /// the serialized index.
    pub fn pipeline(&self) -> Vec<String> {
        vec![
            format!("trimmer-{}", self.code),
            format!("stopWordFilter-{}", self.code),
            format!("stemmer-{}", self.code),
        ]
    }
}
