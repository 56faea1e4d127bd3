pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{apa::ApaRenderer, http::HttpMetadataSource};
pub use app::report::Report;
pub use config::{RenderConfig, ServiceEndpoints};
pub use core::{classifier::classify, engine::CitationEngine, orchestrator::retrieve};
pub use domain::csl::CslItem;
pub use domain::model::{Identifier, IdentifierKind, RetrievalResult, RetrievalStatus};
pub use utils::error::{BibError, Result};
