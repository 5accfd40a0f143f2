//! Catalog source configuration.
//!
//! ```rust,no_run
//! use model_catalog::{CatalogConfig, ModelRegistry};
//!
//! let config = CatalogConfig::from_env().with_supplemental("./local/model_metadata.yaml");
//! let registry = ModelRegistry::new(config);
//! ```

use std::path::{Path, PathBuf};

use directories::BaseDirs;

/// File name of a model metadata catalog.
pub const MODEL_METADATA_FILE: &str = "model_metadata.yaml";

/// Overrides the built-in catalog location.
pub const MODEL_CATALOG_PATH_ENV: &str = "MODEL_CATALOG_PATH";

/// Extra catalogs, separated like `PATH` entries.
pub const MODEL_CATALOG_SUPPLEMENTAL_ENV: &str = "MODEL_CATALOG_SUPPLEMENTAL";

const USER_CONFIG_DIR: &str = "model-catalog";

/// Where catalog files are read from during lazy initialization.
///
/// The built-in catalog is loaded first, then each supplemental catalog in
/// order. Every source is optional: a missing file contributes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    builtin: Option<PathBuf>,
    supplemental: Vec<PathBuf>,
}

impl CatalogConfig {
    /// No sources at all; initialization is a no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Only the given built-in catalog.
    pub fn builtin_only(path: impl Into<PathBuf>) -> Self {
        Self {
            builtin: Some(path.into()),
            supplemental: Vec::new(),
        }
    }

    /// Resolve sources from the environment.
    ///
    /// The built-in catalog is `MODEL_CATALOG_PATH` when set, otherwise the
    /// catalog shipped in this crate's `config/` directory. Supplemental
    /// catalogs are the user config catalog followed by `MODEL_CATALOG_SUPPLEMENTAL`.
    pub fn from_env() -> Self {
        let builtin = std::env::var_os(MODEL_CATALOG_PATH_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(Self::shipped_catalog_path);

        let mut supplemental: Vec<PathBuf> = Self::user_catalog_path().into_iter().collect();
        if let Some(extra) = std::env::var_os(MODEL_CATALOG_SUPPLEMENTAL_ENV) {
            supplemental.extend(std::env::split_paths(&extra).filter(|p| !p.as_os_str().is_empty()));
        }

        Self {
            builtin: Some(builtin),
            supplemental,
        }
    }

    /// The catalog distributed with this crate.
    pub fn shipped_catalog_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("config")
            .join(MODEL_METADATA_FILE)
    }

    /// `<config dir>/model-catalog/model_metadata.yaml` for the current user.
    pub fn user_catalog_path() -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| {
            dirs.config_dir()
                .join(USER_CONFIG_DIR)
                .join(MODEL_METADATA_FILE)
        })
    }

    pub fn with_supplemental(mut self, path: impl Into<PathBuf>) -> Self {
        self.supplemental.push(path.into());
        self
    }

    pub fn builtin(&self) -> Option<&Path> {
        self.builtin.as_deref()
    }

    pub fn supplemental(&self) -> &[PathBuf] {
        &self.supplemental
    }

    /// All sources in load order.
    pub fn sources(&self) -> impl Iterator<Item = &Path> {
        self.builtin
            .as_deref()
            .into_iter()
            .chain(self.supplemental.iter().map(PathBuf::as_path))
    }
}
