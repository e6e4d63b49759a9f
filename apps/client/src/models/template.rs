use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateCategory {
    Professional,
    Creative,
    Executive,
    Modern,
    Minimal,
    Corporate,
    Startup,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 7] = [
        TemplateCategory::Professional,
        TemplateCategory::Creative,
        TemplateCategory::Executive,
        TemplateCategory::Modern,
        TemplateCategory::Minimal,
        TemplateCategory::Corporate,
        TemplateCategory::Startup,
    ];
}

/// Read-only catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: TemplateCategory,
    pub preview_image_url: String,
    pub is_premium: bool,
    pub tags: Vec<String>,
}
