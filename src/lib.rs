pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{
    engine::SupplyListEngine,
    export::render_document,
    extractor::{extract, normalize_lines, ExtractionRules, SupplyListExtractor},
    generator::HttpGenerator,
    pipeline::SupplyPipeline,
    prompt::build_prompt,
};
pub use domain::model::{ExtractionResult, ListTier, RunReport, UserProfile};
pub use utils::error::{Result, SupplyError};
