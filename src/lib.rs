//! # model-catalog
//!
//! Model capability registry and window-service resolver.
//!
//! The registry holds declarative metadata about language models (creator
//! organization, release date, capability tags, access level). The resolver
//! uses that metadata to pick exactly one [`WindowService`] strategy per model
//! through an ordered, first-match-wins rule list.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use model_catalog::{CatalogConfig, ModelRegistry, TokenizerService, WindowServiceResolver};
//!
//! #[derive(Debug)]
//! struct Tokenizers;
//!
//! impl TokenizerService for Tokenizers {
//!     fn name(&self) -> &str {
//!         "local"
//!     }
//! }
//!
//! fn main() -> Result<(), model_catalog::Error> {
//!     let registry = ModelRegistry::new(CatalogConfig::from_env());
//!     let resolver = WindowServiceResolver::new(&registry);
//!
//!     let service = resolver.resolve("anthropic/claude-v1.3", Arc::new(Tokenizers))?;
//!     let window = service.allocate(6_000, 500);
//!     println!("{:?} fits: {}", service.kind(), window.status.should_proceed());
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod models;
pub mod window;

pub use config::{
    CatalogConfig, MODEL_CATALOG_PATH_ENV, MODEL_CATALOG_SUPPLEMENTAL_ENV, MODEL_METADATA_FILE,
};
pub use models::{
    Access, HuggingFaceModel, ModelMetadata, ModelMetadataList, ModelRegistry, TagIndex,
    split_model_name, tags,
};
pub use window::{
    Ai21WindowService, ResolutionRule, RulePredicate, StandardWindowService, TokenWindow,
    TokenizerService, WindowProfile, WindowService, WindowServiceKind, WindowServiceResolver,
    WindowStatus,
};

use std::path::PathBuf;

/// Error type for catalog and resolution operations.
///
/// Every failure is deterministic for the same inputs; nothing here is worth retrying.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No metadata was ever registered under this name.
    #[error("No model with name: {name}")]
    ModelNotFound { name: String },

    /// A catalog source was required but does not exist.
    #[error("Catalog source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// A catalog source is malformed or contains an invalid record.
    #[error("Failed to parse catalog {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// No dispatch rule matched the model.
    #[error("Unhandled model name: {name}")]
    UnresolvedModel { name: String },

    /// A model name could not be split into organization and engine.
    #[error("Invalid model name '{name}': {reason}")]
    InvalidModelName { name: String, reason: String },

    /// Reading a catalog source failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error category for unified error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Model or source lookups that found nothing
    NotFound,
    /// Malformed catalogs, invalid names, or models without a matching rule
    Configuration,
    /// IO failures
    Internal,
}

impl Error {
    pub fn model_not_found(name: impl Into<String>) -> Self {
        Error::ModelNotFound { name: name.into() }
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidModelName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::ModelNotFound { .. } | Error::SourceNotFound { .. } => ErrorCategory::NotFound,
            Error::Parse { .. } | Error::UnresolvedModel { .. } | Error::InvalidModelName { .. } => {
                ErrorCategory::Configuration
            }
            Error::Io(_) => ErrorCategory::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }

    pub fn is_configuration_error(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    /// Always `false`: catalog failures reproduce identically on retry.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

pub type Result<T> = std::result::Result<T, Error>;
