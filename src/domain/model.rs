use serde::{Deserialize, Serialize};
use std::fmt;

/// Family details captured at generation time.
///
/// Free-text fields are kept exactly as typed; they feed both the prompt and
/// the echoed-input filter of the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub family_size: String,
    pub has_children: bool,
    pub children_ages: String,
    pub has_pets: bool,
    pub pet_types: String,
    pub has_special_needs: bool,
    pub special_needs: String,
    pub budget_range: String,
    pub storage_space: String,
    pub additional_info: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            family_size: String::new(),
            has_children: false,
            children_ages: String::new(),
            has_pets: false,
            pet_types: String::new(),
            has_special_needs: false,
            special_needs: String::new(),
            budget_range: "moderate".to_string(),
            storage_space: "average".to_string(),
            additional_info: String::new(),
        }
    }
}

impl UserProfile {
    /// Profile text the generation service may echo back as a bogus item.
    ///
    /// Flagged fields only contribute when their flag is set, matching what
    /// actually went into the prompt. Blank values are skipped.
    pub fn echo_fields(&self) -> Vec<&str> {
        let candidates = [
            (true, self.family_size.as_str()),
            (self.has_children, self.children_ages.as_str()),
            (self.has_pets, self.pet_types.as_str()),
            (self.has_special_needs, self.special_needs.as_str()),
        ];

        candidates
            .into_iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
            .collect()
    }
}

/// Which fallback strategy produced an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListTier {
    Numbered,
    Bulleted,
    Sentence,
}

impl fmt::Display for ListTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListTier::Numbered => write!(f, "numbered list"),
            ListTier::Bulleted => write!(f, "bulleted list"),
            ListTier::Sentence => write!(f, "capitalized sentences"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub items: Vec<String>,
    /// Raw generated text, kept so callers can display it when `items` is empty.
    pub text: String,
    pub tier: Option<ListTier>,
}

impl ExtractionResult {
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub result: ExtractionResult,
    pub output_path: String,
}
