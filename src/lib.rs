pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, Settings};
pub use crate::core::{etl::EtlEngine, etl::RunSummary, pipeline::LeadPipeline, places::PlacesClient};
pub use domain::model::{Lead, LeadBook, LeadRow, ReputationFilter, SearchFilter};
pub use utils::error::{EtlError, Result};
