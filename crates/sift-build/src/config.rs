//! Configuration files for Sift builds.
//!
//! Provides the [`SiftConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//! Its `search` table is the module-level option layer.
//!
//! # Loading Priority
//!
//! 1. Explicit config path
//! 2. `SIFT_CONFIG` environment variable
//! 3. XDG default: `~/.config/sift/config.toml`
//! 4. Built-in defaults

use std::path::PathBuf;

use confyg::{Confygery, env};
use serde::{Deserialize, Serialize};
use sift_core::{Error, Result};
use sift_index::StemmerRegistry;

use crate::options::{LocaleSpec, ModuleOptions, OptionResolver, ResolvedOptions};

// ============================================================================
// Configuration structs
// ============================================================================

/// Top-level configuration for a Sift build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    /// Directory artifacts are written below.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    /// Locales of the host site, used when `search.languages` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<LocaleSpec>>,

    /// Module-level search options.
    pub search: ModuleOptions,
}

// ============================================================================
// Config loading
// ============================================================================

impl SiftConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("SIFT");
        env_opts.add_section("search");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit path, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("SIFT_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sift").join("config.toml"))
    }

    /// Where artifacts are written; the current directory when unset.
    pub fn output_dir(&self) -> Result<PathBuf> {
        match &self.output_dir {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine output dir: {e}"))),
        }
    }

    /// Resolve the effective options with `call_site` on top of this
    /// config's `search` layer.
    pub fn resolve(&self, registry: &StemmerRegistry, call_site: ModuleOptions) -> ResolvedOptions {
        let mut resolver = OptionResolver::new(registry)
            .global(self.search.clone())
            .call_site(call_site);
        if let Some(locales) = &self.locales {
            resolver = resolver.external_locales(locales.clone());
        }
        resolver.resolve()
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
