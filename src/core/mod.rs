pub mod classifier;
pub mod engine;
pub mod orchestrator;

pub use crate::domain::model::{Identifier, IdentifierKind, RetrievalResult};
pub use crate::domain::ports::{BibliographyRenderer, ConfigProvider, MetadataSource};
pub use crate::utils::error::Result;
