use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend processing lifecycle of an uploaded resume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptimizationStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl OptimizationStatus {
    pub const ALL: [OptimizationStatus; 4] = [
        OptimizationStatus::Pending,
        OptimizationStatus::InProgress,
        OptimizationStatus::Completed,
        OptimizationStatus::Failed,
    ];

    /// Human-readable label shown next to a resume in lists and detail views.
    pub fn label(self) -> &'static str {
        match self {
            OptimizationStatus::Pending => "Pending",
            OptimizationStatus::InProgress => "Processing",
            OptimizationStatus::Completed => "Optimized",
            OptimizationStatus::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: String,
    pub user_id: String,
    pub file_name: String,
    pub file_url: String,
    pub file_size: u64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub upload_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_data: Option<ParsedResumeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_result: Option<ResumeAnalysis>,
    pub optimization_status: OptimizationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResumeData {
    pub personal_info: PersonalInfo,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub description: String,
    pub achievements: Vec<String>,
}

/// Analysis attached to a resume. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub overall_score: u8, // 0 – 100
    pub sections: BTreeMap<String, SectionScore>,
    pub suggestions: Vec<String>,
    pub keywords: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionScore {
    pub score: u8, // 0 – 100
    pub feedback: String,
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_serializes_screaming_snake_case() {
        let value = serde_json::to_value(OptimizationStatus::InProgress).unwrap();
        assert_eq!(value, json!("IN_PROGRESS"));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(OptimizationStatus::InProgress.label(), "Processing");
        assert_eq!(OptimizationStatus::Completed.label(), "Optimized");
        assert_eq!(OptimizationStatus::default().label(), "Pending");
    }

    #[test]
    fn test_resume_deserializes_without_optional_fields() {
        let resume: Resume = serde_json::from_value(json!({
            "id": "1",
            "userId": "1",
            "fileName": "Software_Engineer_Resume.pdf",
            "fileUrl": "mock_url_1",
            "fileSize": 1024000,
            "uploadDate": 1767225600000u64,
            "optimizationStatus": "COMPLETED"
        }))
        .unwrap();

        assert_eq!(resume.upload_date.timestamp_millis(), 1_767_225_600_000);
        assert_eq!(resume.optimization_status, OptimizationStatus::Completed);
        assert!(!resume.is_favorite);
        assert!(resume.analysis_result.is_none());
        assert!(resume.template_id.is_none());
    }

    #[test]
    fn test_analysis_and_parsed_data_round_through_json() {
        let value = json!({
            "id": "1",
            "userId": "1",
            "fileName": "cv.pdf",
            "fileUrl": "mock_url",
            "fileSize": 0,
            "uploadDate": 1767225600000u64,
            "optimizationStatus": "COMPLETED",
            "isFavorite": true,
            "parsedData": {
                "personalInfo": { "fullName": "John Doe", "email": "john@example.com" },
                "education": [{
                    "institution": "State University",
                    "degree": "BSc",
                    "field": "Computer Science",
                    "startDate": "2014"
                }],
                "experience": [{
                    "company": "TechCorp Inc.",
                    "position": "Engineer",
                    "startDate": "2018",
                    "description": "Built things",
                    "achievements": ["Shipped v2"]
                }],
                "skills": ["Rust", "TypeScript"]
            },
            "analysisResult": {
                "overallScore": 78,
                "sections": {
                    "experience": { "score": 82, "feedback": "Quantify impact", "suggestions": [] }
                },
                "suggestions": ["Add a summary"],
                "keywords": ["Rust"],
                "missingSkills": ["Docker"]
            }
        });

        let resume: Resume = serde_json::from_value(value).unwrap();
        let parsed = resume.parsed_data.as_ref().unwrap();
        assert_eq!(parsed.personal_info.full_name, "John Doe");
        assert!(parsed.education[0].end_date.is_none());
        assert_eq!(parsed.experience[0].achievements.len(), 1);

        let analysis = resume.analysis_result.as_ref().unwrap();
        assert_eq!(analysis.overall_score, 78);
        assert_eq!(analysis.sections["experience"].score, 82);

        let again: Resume =
            serde_json::from_value(serde_json::to_value(&resume).unwrap()).unwrap();
        assert_eq!(again, resume);
    }
}
