//! Catalog file parsing.

use std::path::Path;

use super::metadata::{ModelMetadata, ModelMetadataList};

/// Read and validate every record of a catalog file, in file order.
pub(crate) fn read_catalog(path: &Path) -> crate::Result<Vec<ModelMetadata>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(crate::Error::SourceNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };
    parse_catalog(&content, path)
}

pub(crate) fn parse_catalog(content: &str, path: &Path) -> crate::Result<Vec<ModelMetadata>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let list: ModelMetadataList = serde_yaml_bw::from_str(content)
        .map_err(|e| crate::Error::parse(path, e.to_string()))?;

    for model in &list.models {
        model
            .validate()
            .map_err(|e| crate::Error::parse(path, e.to_string()))?;
    }
    Ok(list.models)
}
