use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scored pairing of a resume against a job posting. Display model only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub id: String,
    pub resume_id: String,
    pub job_title: String,
    pub company: String,
    pub job_description: String,
    pub match_percentage: u8, // 0 – 100
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescription {
    pub title: String,
    pub company: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub experience: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_description_reads_camel_case() {
        let job: JobDescription = serde_json::from_value(json!({
            "title": "Full Stack Developer",
            "company": "StartupXYZ",
            "description": "Join our fast-growing startup as a full stack developer...",
            "requiredSkills": ["JavaScript", "React", "Node.js"],
            "preferredSkills": ["Python", "MongoDB", "GraphQL"],
            "experience": "3+ years",
            "location": "Remote"
        }))
        .unwrap();

        assert_eq!(job.required_skills.len(), 3);
        assert_eq!(job.location.as_deref(), Some("Remote"));
        assert!(job.salary.is_none());
    }

    #[test]
    fn test_job_match_writes_camel_case() {
        let value = serde_json::to_value(JobMatch {
            id: "1".to_string(),
            resume_id: "1".to_string(),
            job_title: "Senior Software Engineer".to_string(),
            company: "TechCorp Inc.".to_string(),
            job_description: String::new(),
            match_percentage: 85,
            matched_skills: vec!["React".to_string()],
            missing_skills: vec!["AWS".to_string()],
            suggestions: vec![],
            created_at: Utc::now(),
        })
        .unwrap();

        assert_eq!(value["matchPercentage"], json!(85));
        assert_eq!(value["resumeId"], json!("1"));
    }
}
