//! Extension points fired while indexes are built and emitted.
//!
//! For every language the pipeline fires, in order:
//!
//! 1. `before_create` — fresh builder, before ref and fields are set
//! 2. `created` — ref and fields set, no documents yet
//! 3. `done` — index built
//! 4. `asset_ready` — index JSON (with `metas`) about to be serialized
//!
//! Hooks are awaited one at a time in registration order. An `Err` from
//! any hook aborts the build.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use sift_core::Result;
use sift_index::{IndexBuilder, SearchIndex};

/// Context for the `before_create` and `created` stages.
pub struct IndexContext<'a> {
    pub language: &'a str,
    pub stemmer_language: &'a str,
    pub builder: &'a mut IndexBuilder,
}

/// Context for the `done` stage.
pub struct IndexDoneContext<'a> {
    pub language: &'a str,
    pub stemmer_language: &'a str,
    pub builder: &'a IndexBuilder,
    pub index: &'a SearchIndex,
}

/// Context for the `asset_ready` stage.
pub struct AssetContext<'a> {
    pub language: &'a str,
    pub json: &'a mut Map<String, Value>,
}

/// Callbacks into the index pipeline. Every stage defaults to a no-op.
#[async_trait]
pub trait IndexHooks: Send + Sync {
    /// Customize a fresh builder before ref and fields are configured.
    async fn before_create(&self, _ctx: &mut IndexContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Inspect or extend the builder after field setup.
    async fn created(&self, _ctx: &mut IndexContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Observe the built index.
    async fn done(&self, _ctx: &IndexDoneContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Transform the index JSON before it is frozen into an asset.
    async fn asset_ready(&self, _ctx: &mut AssetContext<'_>) -> Result<()> {
        Ok(())
    }
}

/// Ordered list of registered hooks.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn IndexHooks>>,
}

impl HookRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook; it runs after every hook registered before it.
    pub fn register(&mut self, hook: Arc<dyn IndexHooks>) -> &mut Self {
        self.hooks.push(hook);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub async fn before_create(&self, ctx: &mut IndexContext<'_>) -> Result<()> {
        for hook in &self.hooks {
            hook.before_create(ctx).await?;
        }
        Ok(())
    }

    pub async fn created(&self, ctx: &mut IndexContext<'_>) -> Result<()> {
        for hook in &self.hooks {
            hook.created(ctx).await?;
        }
        Ok(())
    }

    pub async fn done(&self, ctx: &IndexDoneContext<'_>) -> Result<()> {
        for hook in &self.hooks {
            hook.done(ctx).await?;
        }
        Ok(())
    }

    pub async fn asset_ready(&self, ctx: &mut AssetContext<'_>) -> Result<()> {
        for hook in &self.hooks {
            hook.asset_ready(ctx).await?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
