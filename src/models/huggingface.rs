//! On-the-fly registration of Hugging Face models.

use std::path::Path;

use chrono::Local;

use super::metadata::{ModelMetadata, split_model_name};
use super::registry::ModelRegistry;

const HUGGINGFACE_ORGANIZATION: &str = "huggingface";

/// A Hugging Face model named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuggingFaceModel {
    /// Registry name, e.g. `EleutherAI/pythia-70m@main` or `huggingface/my-model`.
    pub model_name: String,
    pub pretrained_model_name_or_path: String,
    pub revision: Option<String>,
}

impl HuggingFaceModel {
    /// Parse `namespace/engine[@revision]`.
    pub fn from_hub_flag(raw: &str) -> crate::Result<Self> {
        let (pretrained, revision) = match raw.split('@').collect::<Vec<_>>().as_slice() {
            [pretrained] => (*pretrained, None),
            [pretrained, revision] => (*pretrained, Some((*revision).to_string())),
            _ => {
                return Err(crate::Error::invalid_name(
                    raw,
                    "expected format: namespace/model_engine[@revision]",
                ));
            }
        };
        split_model_name(pretrained)?;

        Ok(Self {
            model_name: raw.to_string(),
            pretrained_model_name_or_path: pretrained.to_string(),
            revision,
        })
    }

    /// A model stored on disk, registered as `huggingface/<directory name>`.
    pub fn from_local_path(path: &str) -> crate::Result<Self> {
        if path.is_empty() {
            return Err(crate::Error::invalid_name(
                path,
                "path to Hugging Face model must be non-empty",
            ));
        }
        let engine = Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| crate::Error::invalid_name(path, "path has no final component"))?;

        Ok(Self {
            model_name: format!("{HUGGINGFACE_ORGANIZATION}/{engine}"),
            pretrained_model_name_or_path: path.to_string(),
            revision: None,
        })
    }
}

impl ModelRegistry {
    /// Make a Hugging Face model resolvable.
    ///
    /// Default metadata is registered only when the name is unknown, so a
    /// catalog entry for the same model is never replaced. The model name is
    /// then attached as a deployment.
    pub fn register_huggingface(&self, model: &HuggingFaceModel) -> crate::Result<()> {
        if !self.contains(&model.model_name)? {
            self.register(ModelMetadata::default_for(
                &model.model_name,
                Local::now().date_naive(),
            ));
            tracing::info!(model = %model.model_name, "registered default metadata");
        }
        self.add_deployment(&model.model_name, &model.model_name)
    }
}
