use crate::core::export::DEFAULT_FILENAME;
use crate::core::extractor::ExtractionRules;
use crate::core::{ConfigProvider, UserProfile};
use crate::utils::error::{Result, SupplyError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub extraction: ExtractionRules,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SupplyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SupplyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SUPABASE_ANON_KEY})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("service.endpoint", &self.service.endpoint)?;

        if let Some(timeout) = self.service.timeout_seconds {
            validation::validate_positive_number("service.timeout_seconds", timeout as usize, 1)?;
        }

        validation::validate_path("output.output_path", &self.output.output_path)?;
        if let Some(filename) = &self.output.filename {
            validation::validate_non_empty_string("output.filename", filename)?;
        }

        validation::validate_family_size("profile.family_size", &self.profile.family_size)?;

        self.validate_extraction_rules()
    }

    fn validate_extraction_rules(&self) -> Result<()> {
        let rules = &self.extraction;

        validation::validate_positive_number("extraction.min_item_chars", rules.min_item_chars, 1)?;
        validation::validate_range(
            "extraction.max_item_chars",
            rules.max_item_chars,
            rules.min_item_chars,
            rules.prose_threshold,
        )?;
        validation::validate_positive_number("extraction.header_max_chars", rules.header_max_chars, 1)?;
        validation::validate_positive_number(
            "extraction.sentence_tier_cap",
            rules.sentence_tier_cap,
            1,
        )?;

        if rules.noise_phrases.iter().any(|p| p.trim().is_empty()) {
            return Err(SupplyError::InvalidConfigValueError {
                field: "extraction.noise_phrases".to_string(),
                value: format!("{:?}", rules.noise_phrases),
                reason: "Noise phrases cannot be blank".to_string(),
            });
        }

        Ok(())
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.json)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self) -> &str {
        &self.service.endpoint
    }

    fn headers(&self) -> HashMap<String, String> {
        self.service.headers.clone().unwrap_or_default()
    }

    fn timeout_seconds(&self) -> u64 {
        self.service.timeout_seconds.unwrap_or(60)
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_filename(&self) -> &str {
        self.output.filename.as_deref().unwrap_or(DEFAULT_FILENAME)
    }

    fn extraction_rules(&self) -> ExtractionRules {
        self.extraction.clone()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
