use crate::core::{Pipeline, RunReport, UserProfile};
use crate::utils::error::Result;

pub struct SupplyListEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SupplyListEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Generate, extract, and export in one go.
    ///
    /// A failed generation ends the run before extraction starts.
    pub async fn run(&self, profile: &UserProfile) -> Result<RunReport> {
        tracing::info!("Requesting supply list from generation service...");
        let raw = self.pipeline.generate(profile).await?;

        self.finish(profile, &raw).await
    }

    /// Extract and export text that was generated earlier.
    pub async fn run_offline(&self, profile: &UserProfile, raw: &str) -> Result<RunReport> {
        tracing::info!("Using previously generated text ({} characters)", raw.len());
        self.finish(profile, raw).await
    }

    async fn finish(&self, profile: &UserProfile, raw: &str) -> Result<RunReport> {
        tracing::info!("Extracting supply items...");
        let result = self.pipeline.extract(raw, profile);
        match result.tier {
            Some(tier) => tracing::info!("Extracted {} items ({})", result.items.len(), tier),
            None => tracing::warn!("No list items recognised, falling back to raw text"),
        }

        tracing::info!("Saving supply list...");
        let output_path = self.pipeline.load(profile, &result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(RunReport {
            result,
            output_path,
        })
    }
}
