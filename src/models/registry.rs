use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use indexmap::IndexMap;

use super::index::TagIndex;
use super::loader;
use super::metadata::{ModelMetadata, organization_of};
use crate::config::CatalogConfig;

/// Process-lifetime catalog of model metadata.
///
/// Entries are append-only and keyed by name. The configured catalog sources
/// are loaded lazily, exactly once, by the first query; later `register`
/// calls add supplemental entries on top of them.
#[derive(Debug)]
pub struct ModelRegistry {
    config: CatalogConfig,
    models: RwLock<IndexMap<String, Arc<ModelMetadata>>>,
    init_lock: Mutex<()>,
    initialized: AtomicBool,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl ModelRegistry {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            models: RwLock::new(IndexMap::new()),
            init_lock: Mutex::new(()),
            initialized: AtomicBool::new(false),
        }
    }

    /// A registry without catalog sources.
    pub fn empty() -> Self {
        Self::new(CatalogConfig::empty())
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Register one entry. A name registered twice keeps its original
    /// position but resolves to the newest entry.
    pub fn register(&self, metadata: ModelMetadata) {
        let name = metadata.name.clone();
        let mut models = self.models.write().unwrap_or_else(PoisonError::into_inner);
        if models.insert(name.clone(), Arc::new(metadata)).is_some() {
            tracing::warn!(model = %name, "model metadata re-registered; newest entry wins");
        } else {
            tracing::trace!(model = %name, "registered model metadata");
        }
    }

    pub fn register_all(&self, entries: impl IntoIterator<Item = ModelMetadata>) {
        for entry in entries {
            self.register(entry);
        }
    }

    /// Register every record of a catalog file in file order.
    ///
    /// Fails with `SourceNotFound` when the file does not exist and with
    /// `Parse` when it is malformed; nothing is registered in either case.
    pub fn load_from_path(&self, path: impl AsRef<Path>) -> crate::Result<usize> {
        let path = path.as_ref();
        let entries = loader::read_catalog(path)?;
        let count = entries.len();
        self.register_all(entries);
        tracing::info!(path = %path.display(), models = count, "loaded model catalog");
        Ok(count)
    }

    /// Like [`load_from_path`](Self::load_from_path), but a missing file registers nothing.
    pub fn maybe_load_from_path(&self, path: impl AsRef<Path>) -> crate::Result<usize> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "model catalog not present, skipping");
            return Ok(0);
        }
        self.load_from_path(path)
    }

    /// Load the configured sources on the first call; later calls return immediately.
    ///
    /// Concurrent first calls are serialized, so the sources are read once and
    /// every caller returns after the registry is fully populated. All sources
    /// are parsed before anything is registered, so a failed load registers
    /// nothing and the error is reported again by the next call.
    pub fn ensure_initialized(&self) -> crate::Result<()> {
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }

        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }

        let mut entries = Vec::new();
        for source in self.config.sources() {
            match loader::read_catalog(source) {
                Ok(models) => {
                    tracing::info!(path = %source.display(), models = models.len(), "read model catalog");
                    entries.extend(models);
                }
                Err(crate::Error::SourceNotFound { path }) => {
                    tracing::debug!(path = %path.display(), "model catalog not present, skipping");
                }
                Err(e) => return Err(e),
            }
        }

        let total = entries.len();
        self.register_all(entries);
        self.initialized.store(true, Ordering::Release);
        tracing::debug!(models = total, "model registry initialized");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Metadata most recently registered under `name`.
    pub fn get(&self, name: &str) -> crate::Result<Arc<ModelMetadata>> {
        self.ensure_initialized()?;
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| crate::Error::model_not_found(name))
    }

    pub fn contains(&self, name: &str) -> crate::Result<bool> {
        self.ensure_initialized()?;
        Ok(self.read().contains_key(name))
    }

    pub fn creator_organization(&self, name: &str) -> crate::Result<String> {
        Ok(self.get(name)?.creator_organization().to_string())
    }

    /// Every registered name in registration order.
    pub fn all_names(&self) -> crate::Result<Vec<String>> {
        self.ensure_initialized()?;
        Ok(self.read().keys().cloned().collect())
    }

    /// Number of entries registered so far; does not trigger initialization.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Attach a deployment to an existing model. Already-attached names are ignored.
    pub fn add_deployment(&self, name: &str, deployment: &str) -> crate::Result<()> {
        self.ensure_initialized()?;
        let mut models = self.models.write().unwrap_or_else(PoisonError::into_inner);
        let entry = models
            .get_mut(name)
            .ok_or_else(|| crate::Error::model_not_found(name))?;
        if Arc::make_mut(entry).add_deployment(deployment) {
            tracing::debug!(model = name, deployment, "attached model deployment");
        }
        Ok(())
    }

    /// Tag and organization queries over this registry.
    pub fn tags(&self) -> TagIndex<'_> {
        TagIndex::new(self)
    }

    /// Names of entries accepted by `filter`, in registration order.
    pub(crate) fn names_where(
        &self,
        filter: impl Fn(&ModelMetadata) -> bool,
    ) -> crate::Result<Vec<String>> {
        self.ensure_initialized()?;
        Ok(self
            .read()
            .values()
            .filter(|model| filter(model))
            .map(|model| model.name.clone())
            .collect())
    }

    pub(crate) fn organization_names(&self, organization: &str) -> crate::Result<Vec<String>> {
        self.names_where(|model| organization_of(&model.name) == organization)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, IndexMap<String, Arc<ModelMetadata>>> {
        self.models.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chrono::NaiveDate;

    use super::*;
    use crate::models::tags::CODE_MODEL_TAG;

    fn model(name: &str) -> ModelMetadata {
        ModelMetadata::default_for(name, NaiveDate::from_ymd_opt(2023, 3, 14).unwrap())
    }

    fn catalog_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const CATALOG: &str = r#"
models:
  - name: anthropic/claude-v1.3
    creator_organization_name: Anthropic
    display_name: Claude v1.3
    description: A model trained using reinforcement learning from human feedback.
    access: limited
    release_date: 2023-03-17
    tags: [TEXT_MODEL_TAG, ANTHROPIC_CLAUDE_1_MODEL_TAG]
  - name: openai/code-davinci-002
    creator_organization_name: OpenAI
    display_name: code-davinci-002
    description: Codex-style model.
    access: limited
    release_date: 2022-04-13
    tags: [CODE_MODEL_TAG, wider_context_window]
"#;

    #[test]
    fn test_register_and_get() {
        let registry = ModelRegistry::empty();
        registry.register(model("anthropic/claude-1"));

        let metadata = registry.get("anthropic/claude-1").unwrap();
        assert_eq!(metadata.creator_organization(), "anthropic");
        assert_eq!(
            registry.creator_organization("anthropic/claude-1").unwrap(),
            "anthropic"
        );
    }

    #[test]
    fn test_get_unknown_model() {
        let registry = ModelRegistry::empty();
        let err = registry.get("nonexistent/model").unwrap_err();
        assert!(matches!(err, crate::Error::ModelNotFound { .. }));
        assert!(!registry.contains("nonexistent/model").unwrap());
    }

    #[test]
    fn test_duplicate_registration_last_write_wins() {
        let registry = ModelRegistry::empty();
        registry.register(model("openai/davinci"));
        registry.register(model("openai/curie"));

        let mut replacement = model("openai/davinci");
        replacement.display_name = "davinci (175B)".to_string();
        registry.register(replacement);

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("openai/davinci").unwrap().display_name,
            "davinci (175B)"
        );
        assert_eq!(
            registry.all_names().unwrap(),
            vec!["openai/davinci", "openai/curie"]
        );
    }

    #[test]
    fn test_lazy_initialization_from_config() {
        let file = catalog_file(CATALOG);
        let registry = ModelRegistry::new(CatalogConfig::builtin_only(file.path()));
        assert!(!registry.is_initialized());
        assert!(registry.is_empty());

        let metadata = registry.get("openai/code-davinci-002").unwrap();
        assert!(metadata.has_tag(CODE_MODEL_TAG));
        assert!(registry.is_initialized());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_ensure_initialized_is_idempotent() {
        let file = catalog_file(CATALOG);
        let registry = ModelRegistry::new(CatalogConfig::builtin_only(file.path()));

        registry.ensure_initialized().unwrap();
        let first = registry.all_names().unwrap();

        let mut override_entry = model("anthropic/claude-v1.3");
        override_entry.display_name = "Claude (local)".to_string();
        registry.register(override_entry);

        for _ in 0..3 {
            registry.ensure_initialized().unwrap();
        }
        assert_eq!(registry.all_names().unwrap(), first);
        // A reload would have restored the catalog entry.
        assert_eq!(
            registry.get("anthropic/claude-v1.3").unwrap().display_name,
            "Claude (local)"
        );
    }

    #[test]
    fn test_missing_builtin_catalog_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let registry =
            ModelRegistry::new(CatalogConfig::builtin_only(dir.path().join("missing.yaml")));
        registry.ensure_initialized().unwrap();
        assert!(registry.is_initialized());
        assert!(registry.all_names().unwrap().is_empty());
    }

    #[test]
    fn test_strict_load_of_missing_path() {
        let registry = ModelRegistry::empty();
        let err = registry
            .load_from_path("/nonexistent/model_metadata.yaml")
            .unwrap_err();
        assert!(matches!(err, crate::Error::SourceNotFound { .. }));
        assert_eq!(
            registry
                .maybe_load_from_path("/nonexistent/model_metadata.yaml")
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_malformed_catalog_fails_initialization() {
        let file = catalog_file("models:\n  - name: [broken\n");
        let registry = ModelRegistry::new(CatalogConfig::builtin_only(file.path()));

        let err = registry.ensure_initialized().unwrap_err();
        assert!(matches!(err, crate::Error::Parse { .. }));
        assert!(!registry.is_initialized());
        assert!(matches!(
            registry.get("openai/davinci").unwrap_err(),
            crate::Error::Parse { .. }
        ));
    }

    #[test]
    fn test_supplemental_catalog_overrides_builtin() {
        let builtin = catalog_file(CATALOG);
        let supplemental = catalog_file(
            r#"
models:
  - name: anthropic/claude-v1.3
    creator_organization_name: Anthropic
    display_name: Claude v1.3 (supplemental)
    description: Local override.
    access: limited
    release_date: 2023-03-17
"#,
        );
        let registry = ModelRegistry::new(
            CatalogConfig::builtin_only(builtin.path()).with_supplemental(supplemental.path()),
        );

        let metadata = registry.get("anthropic/claude-v1.3").unwrap();
        assert_eq!(metadata.display_name, "Claude v1.3 (supplemental)");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_failed_supplemental_registers_nothing() {
        let builtin = catalog_file(CATALOG);
        let supplemental = catalog_file("models:\n  - name: [broken\n");
        let registry = ModelRegistry::new(
            CatalogConfig::builtin_only(builtin.path()).with_supplemental(supplemental.path()),
        );

        let err = registry.ensure_initialized().unwrap_err();
        assert!(matches!(err, crate::Error::Parse { .. }));
        assert!(!registry.is_initialized());
        assert!(registry.is_empty());

        let mut local = model("anthropic/claude-v1.3");
        local.display_name = "Claude (local)".to_string();
        registry.register(local);

        assert!(registry.ensure_initialized().is_err());
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("anthropic/claude-v1.3").unwrap_err().to_string(),
            err.to_string()
        );
        let models = registry.models.read().unwrap();
        assert_eq!(models["anthropic/claude-v1.3"].display_name, "Claude (local)");
    }

    #[test]
    fn test_add_deployment() {
        let registry = ModelRegistry::empty();
        registry.register(model("together/gpt-j-6b"));
        registry
            .add_deployment("together/gpt-j-6b", "huggingface/gpt-j-6b")
            .unwrap();

        let metadata = registry.get("together/gpt-j-6b").unwrap();
        assert_eq!(
            metadata.deployment_names(),
            vec!["together/gpt-j-6b", "huggingface/gpt-j-6b"]
        );
        assert!(registry.add_deployment("unknown/model", "x").is_err());
    }
}
