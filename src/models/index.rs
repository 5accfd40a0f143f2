use super::registry::ModelRegistry;
use super::tags::{
    CODE_MODEL_TAG, INSTRUCTION_FOLLOWING_MODEL_TAG, TEXT_MODEL_TAG, VISION_LANGUAGE_MODEL_TAG,
};

/// Read-only tag and organization queries over a [`ModelRegistry`].
///
/// Every query initializes the registry first and scans the live entries, so
/// results always include late registrations.
#[derive(Debug, Clone, Copy)]
pub struct TagIndex<'a> {
    registry: &'a ModelRegistry,
}

impl<'a> TagIndex<'a> {
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self { registry }
    }

    /// Names of all models carrying `tag`, in registration order.
    pub fn names_with_tag(&self, tag: &str) -> crate::Result<Vec<String>> {
        self.registry.names_where(|model| model.has_tag(tag))
    }

    /// Names of all models created by `organization`, e.g. `ai21` gives
    /// `ai21/j1-jumbo`, `ai21/j1-grande`.
    pub fn names_by_organization(&self, organization: &str) -> crate::Result<Vec<String>> {
        self.registry.organization_names(organization)
    }

    pub fn has_tag(&self, name: &str, tag: &str) -> crate::Result<bool> {
        Ok(self.names_with_tag(tag)?.iter().any(|candidate| candidate == name))
    }

    pub fn text_models(&self) -> crate::Result<Vec<String>> {
        self.names_with_tag(TEXT_MODEL_TAG)
    }

    pub fn code_models(&self) -> crate::Result<Vec<String>> {
        self.names_with_tag(CODE_MODEL_TAG)
    }

    pub fn instruction_following_models(&self) -> crate::Result<Vec<String>> {
        self.names_with_tag(INSTRUCTION_FOLLOWING_MODEL_TAG)
    }

    pub fn vision_language_models(&self) -> crate::Result<Vec<String>> {
        self.names_with_tag(VISION_LANGUAGE_MODEL_TAG)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::ModelMetadata;

    fn tagged(name: &str, tags: &[&str]) -> ModelMetadata {
        let mut model =
            ModelMetadata::default_for(name, NaiveDate::from_ymd_opt(2022, 11, 30).unwrap());
        model.tags = tags.iter().map(|tag| (*tag).to_string()).collect();
        model
    }

    #[test]
    fn test_names_with_tag_in_registration_order() {
        let registry = ModelRegistry::empty();
        registry.register(tagged("openai/code-davinci-002", &["CODE"]));
        registry.register(tagged("openai/davinci", &["TEXT"]));
        registry.register(tagged("openai/code-cushman-001", &["CODE", "TEXT"]));

        assert_eq!(
            registry.tags().names_with_tag("CODE").unwrap(),
            vec!["openai/code-davinci-002", "openai/code-cushman-001"]
        );
        assert!(registry.tags().names_with_tag("IMAGE").unwrap().is_empty());
    }

    #[test]
    fn test_names_by_organization() {
        let registry = ModelRegistry::empty();
        registry.register(tagged("ai21/j1-jumbo", &[]));
        registry.register(tagged("openai/davinci", &[]));
        registry.register(tagged("ai21/j1-grande", &[]));
        registry.register(tagged("ai21-labs/other", &[]));

        assert_eq!(
            registry.tags().names_by_organization("ai21").unwrap(),
            vec!["ai21/j1-jumbo", "ai21/j1-grande"]
        );
    }

    #[test]
    fn test_late_registration_is_visible() {
        let registry = ModelRegistry::empty();
        let index = registry.tags();
        assert!(index.code_models().unwrap().is_empty());

        registry.register(tagged("openai/code-davinci-002", &[CODE_MODEL_TAG]));
        assert_eq!(index.code_models().unwrap(), vec!["openai/code-davinci-002"]);
        assert!(index.has_tag("openai/code-davinci-002", CODE_MODEL_TAG).unwrap());
    }

    #[test]
    fn test_shortcut_queries() {
        let registry = ModelRegistry::empty();
        registry.register(tagged(
            "openai/text-davinci-003",
            &[TEXT_MODEL_TAG, INSTRUCTION_FOLLOWING_MODEL_TAG],
        ));
        registry.register(tagged("openai/gpt-4-vision", &[VISION_LANGUAGE_MODEL_TAG]));

        let index = registry.tags();
        assert_eq!(index.text_models().unwrap(), vec!["openai/text-davinci-003"]);
        assert_eq!(
            index.instruction_following_models().unwrap(),
            vec!["openai/text-davinci-003"]
        );
        assert_eq!(
            index.vision_language_models().unwrap(),
            vec!["openai/gpt-4-vision"]
        );
    }
}
