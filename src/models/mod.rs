mod huggingface;
mod index;
mod loader;
mod metadata;
mod registry;

pub mod tags;

pub use huggingface::HuggingFaceModel;
pub use index::TagIndex;
pub use metadata::{Access, ModelMetadata, ModelMetadataList, split_model_name};
pub(crate) use metadata::organization_of;
pub use registry::ModelRegistry;
