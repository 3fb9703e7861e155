use crate::core::export::render_document;
use crate::core::extractor::SupplyListExtractor;
use crate::core::prompt::build_prompt;
use crate::core::{ConfigProvider, ExtractionResult, Pipeline, Storage, TextGenerator, UserProfile};
use crate::utils::error::Result;
use chrono::Utc;

pub struct SupplyPipeline<S: Storage, G: TextGenerator, C: ConfigProvider> {
    storage: S,
    generator: G,
    config: C,
    extractor: SupplyListExtractor,
}

impl<S: Storage, G: TextGenerator, C: ConfigProvider> SupplyPipeline<S, G, C> {
    pub fn new(storage: S, generator: G, config: C) -> Self {
        let extractor = SupplyListExtractor::new(config.extraction_rules());
        Self {
            storage,
            generator,
            config,
            extractor,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, G: TextGenerator, C: ConfigProvider> Pipeline for SupplyPipeline<S, G, C> {
    async fn generate(&self, profile: &UserProfile) -> Result<String> {
        let prompt = build_prompt(profile);
        tracing::debug!("Prompt is {} characters", prompt.len());

        let text = self.generator.generate(&prompt).await?;
        tracing::debug!("Generation service returned {} characters", text.len());
        Ok(text)
    }

    fn extract(&self, raw: &str, profile: &UserProfile) -> ExtractionResult {
        self.extractor.extract(raw, profile)
    }

    async fn load(&self, profile: &UserProfile, result: &ExtractionResult) -> Result<String> {
        let filename = self.config.output_filename();
        let output_path = format!("{}/{}", self.config.output_path(), filename);

        let document = render_document(profile, result, Utc::now());
        tracing::debug!("Writing supply list ({} bytes) to storage", document.len());
        self.storage.write_file(filename, document.as_bytes()).await?;

        Ok(output_path)
    }
}
