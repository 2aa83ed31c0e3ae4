//! The built search index and its JSON form.
//!
//! The serialized layout follows the lunr family of static indexes:
//!
//! ```json
//! {
//!   "version": "0.4.1",
//!   "ref": "id",
//!   "fields": [{ "name": "title", "boost": 1.0 }],
//!   "pipeline": ["stemmer"],
//!   "documents": ["1", "2"],
//!   "fieldVectors": [["title/1", { "length": 2, "terms": [["alan", 1]] }]],
//!   "invertedIndex": [["alan", { "_index": 0, "title": { "1": { "tf": 1 } } }]]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sift_core::{Error, Result};

use crate::builder::FieldSpec;

/// Format version written into every index.
pub const INDEX_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Term statistics for one field of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldVector {
    /// Number of terms the field produced after analysis.
    pub length: usize,
    /// `(term, frequency)` pairs, sorted by term.
    pub terms: Vec<(String, u32)>,
}

/// A posting: how often a term occurs in one field of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub tf: u32,
}

/// All postings for a single term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermEntry {
    /// Position of the term in the sorted vocabulary.
    #[serde(rename = "_index")]
    pub index: usize,
    /// field name -> document ref -> posting
    #[serde(flatten)]
    pub fields: BTreeMap<String, BTreeMap<String, Posting>>,
}

/// An immutable, serializable inverted index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndex {
    pub version: String,
    #[serde(rename = "ref")]
    pub ref_field: String,
    pub fields: Vec<FieldSpec>,
    pub pipeline: Vec<String>,
    /// Document refs in the order they were added.
    pub documents: Vec<String>,
    pub field_vectors: Vec<(String, FieldVector)>,
    pub inverted_index: Vec<(String, TermEntry)>,
}

impl SearchIndex {
    /// Refs of every indexed document, in insertion order.
    pub fn document_refs(&self) -> &[String] {
        &self.documents
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.inverted_index.len()
    }

    /// Look up the postings for an already-analyzed term.
    pub fn term(&self, term: &str) -> Option<&TermEntry> {
        self.inverted_index
            .binary_search_by(|(t, _)| t.as_str().cmp(term))
            .ok()
            .map(|i| &self.inverted_index[i].1)
    }

    /// Refs of documents containing `term` in any field.
    pub fn refs_for_term(&self, term: &str) -> Vec<&str> {
        let mut refs: Vec<&str> = self
            .term(term)
            .map(|entry| {
                entry
                    .fields
                    .values()
                    .flat_map(|postings| postings.keys().map(String::as_str))
                    .collect()
            })
            .unwrap_or_default();
        refs.sort_unstable();
        refs.dedup();
        refs
    }

    /// Serialize into a JSON object so callers can attach extra keys.
    pub fn to_json(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(Error::index(format!(
                "index serialized to a non-object value: {other}"
            ))),
        }
    }
}
