//! Per-language index construction.

use serde_json::{Map, Value};
use sift_core::Result;
use sift_index::{IndexBuilder, StemmerRegistry};

use crate::hooks::{HookRegistry, IndexContext, IndexDoneContext};
use crate::options::ResolvedOptions;

/// Build the index for one language bucket and return its JSON object.
///
/// The stemmer plugin is loaded on first use. Hooks fire in the order
/// `before_create`, `created`, `done`.
///
/// # Errors
///
/// Fails if the plugin for a supported stemmer language cannot be loaded,
/// if a document cannot be added, or if a hook returns an error. None of
/// these are recovered.
pub async fn build_index(
    options: &ResolvedOptions,
    registry: &StemmerRegistry,
    hooks: &HookRegistry,
    language: &str,
    documents: &[Value],
) -> Result<Map<String, Value>> {
    let stemmer_language = options.stemmer_language(language);
    let is_supported = options.is_supported(&stemmer_language);

    let plugin = if is_supported {
        Some(registry.load(&stemmer_language).await?)
    } else {
        None
    };

    let mut builder = IndexBuilder::new();

    hooks
        .before_create(&mut IndexContext {
            language,
            stemmer_language: &stemmer_language,
            builder: &mut builder,
        })
        .await?;

    if let Some(plugin) = plugin {
        builder.use_plugin(plugin);
    }

    builder.ref_field(options.ref_field.as_str());
    for field in &options.fields {
        builder.field(field.as_str());
    }

    hooks
        .created(&mut IndexContext {
            language,
            stemmer_language: &stemmer_language,
            builder: &mut builder,
        })
        .await?;

    for document in documents {
        builder.add(document)?;
    }

    let index = builder.build();

    hooks
        .done(&IndexDoneContext {
            language,
            stemmer_language: &stemmer_language,
            builder: &builder,
            index: &index,
        })
        .await?;

    log::info!(
        "built '{language}' search index: {} documents, {} terms (stemmer: {stemmer_language})",
        index.document_refs().len(),
        index.term_count()
    );

    index.to_json()
}

// ============================================================================
// Tests
// ============================================================================
