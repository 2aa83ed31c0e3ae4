//! Incremental index construction.
//!
//! An [`IndexBuilder`] is the mutable context documents are poured into.
//! Configure the ref field, the indexed fields and optionally a language
//! plugin, then add documents and call [`IndexBuilder::build`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use serde_json::json;
//! use sift_index::IndexBuilder;
//!
//! let mut builder = IndexBuilder::new();
//! builder.ref_field("id").field("title").field("body");
//! builder.add(&json!({ "id": 1, "title": "Alan", "body": "..." }))?;
//! let index = builder.build();
//! ```

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sift_core::{Error, Result};
use tantivy::tokenizer::TextAnalyzer;

use crate::analyzer;
use crate::index::{FieldVector, INDEX_VERSION, Posting, SearchIndex, TermEntry};
use crate::plugin::LanguagePlugin;

/// Pipeline names recorded when no plugin is attached.
const BASELINE_PIPELINE: &[&str] = &["trimmer", "stopWordFilter", "stemmer"];

/// An indexed field and its query-time boost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub boost: f32,
}

impl FieldSpec {
    /// A field with the default boost of 1.0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            boost: 1.0,
        }
    }
}

/// Mutable index construction context.
pub struct IndexBuilder {
    ref_field: String,
    fields: Vec<FieldSpec>,
    plugin: Option<Arc<LanguagePlugin>>,
    analyzer: TextAnalyzer,
    documents: Vec<String>,
    seen_refs: HashSet<String>,
    field_vectors: Vec<(String, FieldVector)>,
    postings: BTreeMap<String, BTreeMap<String, BTreeMap<String, Posting>>>,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexBuilder {
    /// A builder with ref `"id"`, no fields and the baseline pipeline.
    pub fn new() -> Self {
        Self {
            ref_field: "id".to_string(),
            fields: Vec::new(),
            plugin: None,
            analyzer: analyzer::baseline_analyzer(),
            documents: Vec::new(),
            seen_refs: HashSet::new(),
            field_vectors: Vec::new(),
            postings: BTreeMap::new(),
        }
    }

    /// Set the field holding each document's unique identifier.
    pub fn ref_field(&mut self, name: impl Into<String>) -> &mut Self {
        self.ref_field = name.into();
        self
    }

    /// Index `name` with the default boost. Re-registering a field is a no-op.
    pub fn field(&mut self, name: impl Into<String>) -> &mut Self {
        self.field_with_boost(name, 1.0)
    }

    /// Index `name` with a query-time boost. Re-registering updates the boost.
    pub fn field_with_boost(&mut self, name: impl Into<String>, boost: f32) -> &mut Self {
        let name = name.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.boost = boost,
            None => self.fields.push(FieldSpec { name, boost }),
        }
        self
    }

    /// Replace the baseline pipeline with a language plugin.
    pub fn use_plugin(&mut self, plugin: Arc<LanguagePlugin>) -> &mut Self {
        self.analyzer = plugin.analyzer();
        self.plugin = Some(plugin);
        self
    }

    /// The configured ref field.
    pub fn ref_name(&self) -> &str {
        &self.ref_field
    }

    /// The registered fields, in registration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// The attached plugin, if any.
    pub fn plugin(&self) -> Option<&LanguagePlugin> {
        self.plugin.as_deref()
    }

    /// Number of documents added so far.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Add a document.
    ///
    /// Missing fields index as empty text. Strings, numbers, booleans and
    /// arrays of those are indexed; anything else is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Index`] when the document is not an object, has no
    /// ref value or repeats a ref already added, and [`Error::InvalidData`]
    /// when a field holds a value that cannot be turned into text.
    pub fn add(&mut self, document: &Value) -> Result<()> {
        let object = document
            .as_object()
            .ok_or_else(|| Error::index(format!("document is not an object: {document}")))?;

        let doc_ref = object
            .get(&self.ref_field)
            .and_then(ref_value)
            .ok_or_else(|| {
                Error::index(format!(
                    "document has no usable '{}' ref: {document}",
                    self.ref_field
                ))
            })?;
        if self.seen_refs.contains(&doc_ref) {
            return Err(Error::index(format!("duplicate ref '{doc_ref}'")));
        }

        // Analyze every field before touching the index so a bad field
        // leaves the builder unchanged.
        let mut vectors = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let text = field_text(object, &field.name).map_err(|reason| {
                Error::invalid_data(format!(
                    "field '{}' of document '{doc_ref}' {reason}",
                    field.name
                ))
            })?;
            let terms = analyzer::analyze(&mut self.analyzer, &text);

            let mut frequencies: BTreeMap<String, u32> = BTreeMap::new();
            for term in &terms {
                *frequencies.entry(term.clone()).or_insert(0) += 1;
            }
            vectors.push((field.name.clone(), terms.len(), frequencies));
        }

        for (field, length, frequencies) in vectors {
            for (term, tf) in &frequencies {
                self.postings
                    .entry(term.clone())
                    .or_default()
                    .entry(field.clone())
                    .or_default()
                    .insert(doc_ref.clone(), Posting { tf: *tf });
            }
            self.field_vectors.push((
                format!("{field}/{doc_ref}"),
                FieldVector {
                    length,
                    terms: frequencies.into_iter().collect(),
                },
            ));
        }

        self.seen_refs.insert(doc_ref.clone());
        self.documents.push(doc_ref);
        Ok(())
    }

    /// Produce the immutable index from everything added so far.
    pub fn build(&self) -> SearchIndex {
        let inverted_index = self
            .postings
            .iter()
            .enumerate()
            .map(|(index, (term, fields))| {
                (
                    term.clone(),
                    TermEntry {
                        index,
                        fields: fields.clone(),
                    },
                )
            })
            .collect();

        let pipeline = match &self.plugin {
            Some(plugin) => plugin.pipeline(),
            None => BASELINE_PIPELINE.iter().map(|s| s.to_string()).collect(),
        };

        SearchIndex {
            version: INDEX_VERSION.to_string(),
            ref_field: self.ref_field.clone(),
            fields: self.fields.clone(),
            pipeline,
            documents: self.documents.clone(),
            field_vectors: self.field_vectors.clone(),
            inverted_index,
        }
    }
}

impl std::fmt::Debug for IndexBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexBuilder")
            .field("ref_field", &self.ref_field)
            .field("fields", &self.fields)
            .field("plugin", &self.plugin.as_ref().map(|p| p.code().to_string()))
            .field("documents", &self.documents.len())
            .finish()
    }
}

/// Render a ref value as its string key.
///
/// Null, `false`, and empty strings do not count as refs.
pub fn ref_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Flatten a field value into indexable text.
fn field_text(object: &Map<String, Value>, field: &str) -> std::result::Result<String, String> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(value) => value_text(value),
    }
}

fn value_text(value: &Value) -> std::result::Result<String, String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(items) => {
            let parts = items
                .iter()
                .map(value_text)
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(parts.join(" "))
        }
        Value::Object(_) => Err("holds an object, which cannot be indexed".to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================
