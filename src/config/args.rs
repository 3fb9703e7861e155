use crate::core::export::DEFAULT_FILENAME;
use crate::core::extractor::ExtractionRules;
use crate::core::{ConfigProvider, UserProfile};
use crate::utils::error::{Result, SupplyError};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::collections::HashMap;

#[derive(Debug, Clone, Parser)]
#[command(name = "hurricane-supply")]
#[command(about = "Generate a personalized hurricane supply list")]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost:54321/functions/v1/generate-supply-list")]
    pub endpoint: String,

    #[arg(long = "header", help = "Extra request header as 'Name: value' (repeatable)")]
    pub headers: Vec<String>,

    #[arg(long, default_value = "60")]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_FILENAME)]
    pub output_filename: String,

    #[arg(long, help = "Number of people in the household")]
    pub family_size: String,

    #[arg(long, help = "Children's ages, e.g. \"2, 8, 15\"")]
    pub children_ages: Option<String>,

    #[arg(long, help = "Pet types and sizes, e.g. \"2 medium dogs, 1 cat\"")]
    pub pet_types: Option<String>,

    #[arg(long, help = "Medications, medical equipment, dietary restrictions")]
    pub special_needs: Option<String>,

    #[arg(long, default_value = "")]
    pub notes: String,

    #[arg(long, default_value = "moderate")]
    pub budget: String,

    #[arg(long, default_value = "average")]
    pub storage_space: String,

    #[arg(long, help = "Extract from previously generated text instead of calling the service")]
    pub raw_file: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            family_size: self.family_size.trim().to_string(),
            has_children: self.children_ages.is_some(),
            children_ages: self.children_ages.clone().unwrap_or_default(),
            has_pets: self.pet_types.is_some(),
            pet_types: self.pet_types.clone().unwrap_or_default(),
            has_special_needs: self.special_needs.is_some(),
            special_needs: self.special_needs.clone().unwrap_or_default(),
            budget_range: self.budget.clone(),
            storage_space: self.storage_space.clone(),
            additional_info: self.notes.clone(),
        }
    }
}

/// 解析 "Name: value" 格式的 header
pub fn parse_header(raw: &str) -> Result<(String, String)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(SupplyError::InvalidConfigValueError {
            field: "header".to_string(),
            value: raw.to_string(),
            reason: "Expected 'Name: value'".to_string(),
        }),
    }
}

impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn headers(&self) -> HashMap<String, String> {
        self.headers
            .iter()
            .filter_map(|raw| parse_header(raw).ok())
            .collect()
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_filename(&self) -> &str {
        &self.output_filename
    }

    fn extraction_rules(&self) -> ExtractionRules {
        ExtractionRules::default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        // 離線模式不需要連線設定
        if self.raw_file.is_none() {
            validation::validate_url("endpoint", &self.endpoint)?;
            validation::validate_positive_number(
                "timeout_seconds",
                self.timeout_seconds as usize,
                1,
            )?;
            for header in &self.headers {
                parse_header(header)?;
            }
        }

        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_non_empty_string("output_filename", &self.output_filename)?;
        validation::validate_family_size("family_size", &self.family_size)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["hurricane-supply"];
        argv.extend_from_slice(args);
        CliConfig::parse_from(argv)
    }

    #[test]
    fn test_profile_from_flags() {
        let config = parse(&[
            "--family-size",
            "4",
            "--children-ages",
            "2, 8",
            "--pet-types",
            "1 cat",
        ]);

        let profile = config.profile();

        assert_eq!(profile.family_size, "4");
        assert!(profile.has_children);
        assert_eq!(profile.children_ages, "2, 8");
        assert!(profile.has_pets);
        assert!(!profile.has_special_needs);
        assert_eq!(profile.budget_range, "moderate");
    }

    #[test]
    fn test_headers_are_parsed() {
        let config = parse(&[
            "--family-size",
            "2",
            "--header",
            "Authorization: Bearer abc",
            "--header",
            "apikey:xyz",
        ]);

        let headers = config.headers();

        assert_eq!(headers.get("Authorization").map(String::as_str), Some("Bearer abc"));
        assert_eq!(headers.get("apikey").map(String::as_str), Some("xyz"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_input() {
        assert!(parse(&["--family-size", "0"]).validate().is_err());
        assert!(parse(&["--family-size", "3", "--header", "no-colon"]).validate().is_err());
        assert!(parse(&["--family-size", "3", "--endpoint", "not a url"]).validate().is_err());
    }

    #[test]
    fn test_offline_mode_skips_endpoint_validation() {
        let config = parse(&[
            "--family-size",
            "3",
            "--endpoint",
            "not a url",
            "--raw-file",
            "saved.txt",
        ]);

        assert!(config.validate().is_ok());
    }
}
