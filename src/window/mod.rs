//! Window-service strategies and the rules that select them.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use model_catalog::{ModelRegistry, TokenizerService, WindowServiceKind, WindowServiceResolver};
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
//! # fn example() -> Result<(), model_catalog::Error> {
//! let registry = ModelRegistry::empty();
//! let resolver = WindowServiceResolver::new(&registry);
//! let service = resolver.resolve("ai21/j1-jumbo", Arc::new(Tokenizers))?;
//! assert_eq!(service.kind(), WindowServiceKind::Ai21);
//! # Ok(())
//! # }
//! ```

mod resolver;
mod service;
mod services;
mod status;

pub use resolver::{
    GPT2_MODEL_NAME, GPTJ_MODEL_NAMES, GPTNEOX_MODEL_NAMES, ResolutionRule, RulePredicate,
    WindowServiceConstructor, WindowServiceResolver, default_rules,
};
pub use service::{TokenizerService, WindowService, WindowServiceKind};
pub use services::{Ai21WindowService, StandardWindowService, WindowProfile};
pub use status::{
    DEFAULT_CRITICAL_THRESHOLD, DEFAULT_WARNING_THRESHOLD, TokenWindow, WindowStatus,
};
