pub mod engine;
pub mod export;
pub mod extractor;
pub mod generator;
pub mod pipeline;
pub mod prompt;

pub use crate::domain::model::{ExtractionResult, ListTier, RunReport, UserProfile};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, TextGenerator};
pub use crate::utils::error::Result;
