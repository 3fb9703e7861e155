use crate::domain::model::{ExtractionResult, UserProfile};
use chrono::{DateTime, Utc};

pub const DOCUMENT_TITLE: &str = "PERSONALIZED HURRICANE SUPPLY LIST";
pub const DOCUMENT_SIGN_OFF: &str = "Stay safe and stay prepared!";
pub const DEFAULT_FILENAME: &str = "Personalized_Hurricane_Supply_List.txt";

/// Renders the downloadable plain-text document.
///
/// Falls back to the raw generated text when nothing was extracted.
pub fn render_document(
    profile: &UserProfile,
    result: &ExtractionResult,
    generated_at: DateTime<Utc>,
) -> String {
    let children = if profile.has_children {
        format!("Yes, ages: {}", profile.children_ages.trim())
    } else {
        "No".to_string()
    };
    let pets = if profile.has_pets {
        format!("Yes, types: {}", profile.pet_types.trim())
    } else {
        "No".to_string()
    };
    let special_needs = if profile.has_special_needs {
        profile.special_needs.trim().to_string()
    } else {
        "None".to_string()
    };

    let supply_list = if result.has_items() {
        result
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| format!("{}. {}", index + 1, item))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        result.text.trim_end().to_string()
    };

    format!(
        "{title}\n\n\
         Family Details:\n\
         - Size: {size} people\n\
         - Children: {children}\n\
         - Pets: {pets}\n\
         - Special needs: {special_needs}\n\n\
         Supply List:\n\
         {supply_list}\n\n\
         Generated on: {generated_on}\n\
         {sign_off}\n",
        title = DOCUMENT_TITLE,
        size = profile.family_size.trim(),
        generated_on = generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        sign_off = DOCUMENT_SIGN_OFF,
    )
}
