use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::tags::{FULL_FUNCTIONALITY_TEXT_MODEL_TAG, TEXT_MODEL_TAG};

/// Access level of a model.
///
/// With several deployments this is the most permissive level among them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    /// Weights can be downloaded.
    Open,
    /// Not accessible.
    Closed,
    /// Accessible with an API key.
    Limited,
}

/// Declarative metadata about one model.
///
/// Immutable once registered, apart from `deployment_names` which deployment
/// registration may extend later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// `"<creator_organization>/<engine>"`, e.g. `"ai21/j1-jumbo"`.
    pub name: String,
    pub creator_organization_name: String,
    pub display_name: String,
    pub description: String,
    pub access: Access,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Kept as an integer for plotting even though it is usually a round number.
    #[serde(default)]
    pub num_parameters: Option<u64>,
    #[serde(default)]
    pub deployment_names: Option<Vec<String>>,
}

/// Top-level shape of a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelMetadataList {
    #[serde(default)]
    pub models: Vec<ModelMetadata>,
}

/// Split `"ai21/j1-jumbo"` into `("ai21", "j1-jumbo")`.
pub fn split_model_name(name: &str) -> crate::Result<(&str, &str)> {
    let (organization, engine) = name
        .split_once('/')
        .ok_or_else(|| crate::Error::invalid_name(name, "expected <organization>/<engine>"))?;

    if organization.is_empty() {
        return Err(crate::Error::invalid_name(name, "organization is empty"));
    }
    if engine.is_empty() {
        return Err(crate::Error::invalid_name(name, "engine is empty"));
    }
    if engine.contains('/') {
        return Err(crate::Error::invalid_name(
            name,
            "expected exactly one '/' separator",
        ));
    }
    Ok((organization, engine))
}

/// Organization segment of a model name; the whole name when there is no `/`.
pub(crate) fn organization_of(name: &str) -> &str {
    name.split_once('/').map_or(name, |(organization, _)| organization)
}

impl ModelMetadata {
    /// Metadata for a model that is registered without a catalog entry.
    pub fn default_for(name: impl Into<String>, release_date: NaiveDate) -> Self {
        let name = name.into();
        Self {
            creator_organization_name: "Unknown".to_string(),
            display_name: name.clone(),
            description: name.clone(),
            access: Access::Open,
            release_date,
            tags: [TEXT_MODEL_TAG, FULL_FUNCTIONALITY_TEXT_MODEL_TAG]
                .into_iter()
                .map(str::to_string)
                .collect(),
            num_parameters: None,
            deployment_names: None,
            name,
        }
    }

    /// Creator organization taken from the name, which can differ from the host.
    pub fn creator_organization(&self) -> &str {
        organization_of(&self.name)
    }

    pub fn engine(&self) -> &str {
        self.name
            .split_once('/')
            .map_or("", |(_, engine)| engine)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Explicit deployments, or the model name itself when none were declared.
    pub fn deployment_names(&self) -> Vec<&str> {
        match &self.deployment_names {
            Some(names) if !names.is_empty() => names.iter().map(String::as_str).collect(),
            _ => vec![self.name.as_str()],
        }
    }

    /// Check the invariants a catalog record must satisfy.
    pub fn validate(&self) -> crate::Result<()> {
        split_model_name(&self.name)?;

        let text_fields = [
            ("creator_organization_name", &self.creator_organization_name),
            ("display_name", &self.display_name),
            ("description", &self.description),
        ];
        for (field, value) in text_fields {
            if value.trim().is_empty() {
                return Err(crate::Error::invalid_name(
                    &self.name,
                    format!("{field} must not be empty"),
                ));
            }
        }

        if matches!(&self.deployment_names, Some(names) if names.is_empty()) {
            return Err(crate::Error::invalid_name(
                &self.name,
                "deployment_names must not be empty when present",
            ));
        }
        Ok(())
    }

    pub(crate) fn add_deployment(&mut self, deployment: &str) -> bool {
        let names = self
            .deployment_names
            .get_or_insert_with(|| vec![self.name.clone()]);
        if names.iter().any(|existing| existing == deployment) {
            return false;
        }
        names.push(deployment.to_string());
        true
    }
}
