//! Asset emission: one JSON index per language.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use sift_core::Result;
use sift_index::StemmerRegistry;

use crate::collector::DocumentCollector;
use crate::hooks::{AssetContext, HookRegistry};
use crate::indexer::build_index;
use crate::options::ResolvedOptions;

/// Key under which document metadata is attached to an index.
pub const METAS_KEY: &str = "metas";

/// A serialized build artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    source: String,
}

impl Asset {
    pub fn new(source: String) -> Self {
        Self { source }
    }

    /// The artifact contents.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.source.len()
    }
}

/// Named artifacts produced by one build, keyed by relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetSet {
    assets: BTreeMap<String, Asset>,
}

impl AssetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `asset` under `name`, replacing any previous artifact.
    pub fn insert(&mut self, name: impl Into<String>, asset: Asset) {
        self.assets.insert(name.into(), asset);
    }

    pub fn get(&self, name: &str) -> Option<&Asset> {
        self.assets.get(name)
    }

    /// Artifact names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.assets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Asset)> {
        self.assets.iter().map(|(name, asset)| (name.as_str(), asset))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Write every artifact below `dir`, creating directories as needed.
    ///
    /// Returns the written file paths.
    pub async fn write_to(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut written = Vec::with_capacity(self.assets.len());

        for (name, asset) in &self.assets {
            let path = dir.join(name);
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, asset.source()).await?;
            log::debug!("wrote {} ({} bytes)", path.display(), asset.size());
            written.push(path);
        }

        Ok(written)
    }
}

/// Build and serialize one index per non-empty language bucket.
///
/// Metadata, when any document of a language carried it, is attached under
/// [`METAS_KEY`]. Languages without documents produce no artifact.
///
/// # Errors
///
/// The first failing language aborts the whole emission.
pub async fn emit_assets(
    options: &ResolvedOptions,
    registry: &StemmerRegistry,
    hooks: &HookRegistry,
    collector: DocumentCollector,
) -> Result<AssetSet> {
    let (buckets, mut metas) = collector.into_parts();
    let mut assets = AssetSet::new();

    for (language, documents) in buckets {
        if documents.is_empty() {
            continue;
        }

        let mut json = build_index(options, registry, hooks, &language, &documents).await?;

        if let Some(language_metas) = metas.remove(&language) {
            json.insert(METAS_KEY.to_string(), Value::Object(language_metas));
        }

        hooks
            .asset_ready(&mut AssetContext {
                language: &language,
                json: &mut json,
            })
            .await?;

        let source = serde_json::to_string(&json)?;
        let name = options.asset_name(&language);
        log::info!("emitting search index asset {name} ({} bytes)", source.len());
        assets.insert(name, Asset::new(source));
    }

    Ok(assets)
}

// ============================================================================
// Tests
// ============================================================================
