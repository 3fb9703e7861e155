use crate::domain::model::UserProfile;

/// 依照家庭資料組出送給生成服務的 prompt
pub fn build_prompt(profile: &UserProfile) -> String {
    let children = flagged(profile.has_children, "Yes, ages: ", &profile.children_ages);
    let pets = flagged(profile.has_pets, "Yes, types: ", &profile.pet_types);
    let special_needs = flagged(profile.has_special_needs, "Yes: ", &profile.special_needs);

    let lines = [
        "Create a personalized hurricane emergency supply list for a family with the following details:".to_string(),
        format!("- Family size: {} people", profile.family_size.trim()),
        format!("- Children: {}", children),
        format!("- Pets: {}", pets),
        format!("- Special needs: {}", special_needs),
        format!("- Budget: {}", profile.budget_range.trim()),
        format!("- Storage space: {}", profile.storage_space.trim()),
        format!("- Additional info: {}", profile.additional_info.trim()),
        String::new(),
        "Please provide a detailed supply list with specific quantities and considerations for this family. \
         Format as a numbered list with clear categories."
            .to_string(),
    ];

    lines.join("\n")
}

fn flagged(enabled: bool, prefix: &str, detail: &str) -> String {
    if enabled {
        format!("{}{}", prefix, detail.trim())
    } else {
        "No".to_string()
    }
}
