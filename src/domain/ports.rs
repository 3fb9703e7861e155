use crate::core::extractor::ExtractionRules;
use crate::domain::model::{ExtractionResult, UserProfile};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn headers(&self) -> HashMap<String, String>;
    fn timeout_seconds(&self) -> u64;
    fn output_path(&self) -> &str;
    fn output_filename(&self) -> &str;
    fn extraction_rules(&self) -> ExtractionRules;
}

/// Text-generation boundary: prompt in, free-form text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn generate(&self, profile: &UserProfile) -> Result<String>;
    fn extract(&self, raw: &str, profile: &UserProfile) -> ExtractionResult;
    async fn load(&self, profile: &UserProfile, result: &ExtractionResult) -> Result<String>;
}
