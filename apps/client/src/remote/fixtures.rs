//! Fixture backend: static responses after a fixed latency.
//!
//! Mirrors what the product returns before a real API exists: every account
//! signs in as user "1", listings return the same two resumes, and the
//! template catalog has three entries.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, SubsecRound, Utc};
use tracing::debug;
use uuid::Uuid;

use super::{AuthSession, RegisterForm, RemoteError, RemoteService, ResumeUploadForm};
use crate::models::{OptimizationStatus, Resume, ResumeTemplate, TemplateCategory, User};

pub const FIXTURE_USER_ID: &str = "1";
pub const FIXTURE_TOKEN: &str = "mock_jwt_token";
const FIXTURE_FULL_NAME: &str = "John Doe";
const DEFAULT_FILE_NAME: &str = "resume.pdf";

#[derive(Debug, Clone, Default)]
pub struct FixtureRemote {
    latency: Duration,
}

impl FixtureRemote {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    async fn simulate_latency(&self, call: &str) {
        debug!("Fixture call {call} ({}ms)", self.latency.as_millis());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn fixture_user(email: &str, full_name: &str) -> User {
        let now = now_millis();
        User {
            id: FIXTURE_USER_ID.to_string(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            profile_image_url: None,
            created_at: now,
            last_login_at: now,
        }
    }
}

// Timestamps travel as epoch milliseconds, so anything finer would not survive a reload.
fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// The two resumes every listing returns.
pub fn fixture_resumes() -> Vec<Resume> {
    let now = now_millis();
    vec![
        Resume {
            id: "1".to_string(),
            user_id: FIXTURE_USER_ID.to_string(),
            file_name: "Software_Engineer_Resume.pdf".to_string(),
            file_url: "mock_url_1".to_string(),
            file_size: 1_024_000,
            upload_date: now - ChronoDuration::days(1),
            parsed_data: None,
            analysis_result: None,
            optimization_status: OptimizationStatus::Completed,
            template_id: None,
            is_favorite: true,
        },
        Resume {
            id: "2".to_string(),
            user_id: FIXTURE_USER_ID.to_string(),
            file_name: "Product_Manager_Resume.pdf".to_string(),
            file_url: "mock_url_2".to_string(),
            file_size: 2_048_000,
            upload_date: now - ChronoDuration::days(2),
            parsed_data: None,
            analysis_result: None,
            optimization_status: OptimizationStatus::Pending,
            template_id: None,
            is_favorite: false,
        },
    ]
}

pub fn fixture_templates() -> Vec<ResumeTemplate> {
    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|t| t.to_string()).collect()
    }

    vec![
        ResumeTemplate {
            id: "1".to_string(),
            name: "Professional".to_string(),
            description: "Clean and professional template suitable for corporate roles"
                .to_string(),
            category: TemplateCategory::Professional,
            preview_image_url: "mock_preview_1".to_string(),
            is_premium: false,
            tags: tags(&["corporate", "professional", "clean"]),
        },
        ResumeTemplate {
            id: "2".to_string(),
            name: "Creative".to_string(),
            description: "Modern and creative template for design and creative roles".to_string(),
            category: TemplateCategory::Creative,
            preview_image_url: "mock_preview_2".to_string(),
            is_premium: true,
            tags: tags(&["creative", "modern", "design"]),
        },
        ResumeTemplate {
            id: "3".to_string(),
            name: "Executive".to_string(),
            description: "Sophisticated template for senior and executive positions".to_string(),
            category: TemplateCategory::Executive,
            preview_image_url: "mock_preview_3".to_string(),
            is_premium: true,
            tags: tags(&["executive", "senior", "leadership"]),
        },
    ]
}

#[async_trait]
impl RemoteService for FixtureRemote {
    async fn authenticate(&self, email: &str, _password: &str) -> Result<AuthSession, RemoteError> {
        self.simulate_latency("authenticate").await;
        Ok(AuthSession {
            user: Self::fixture_user(email, FIXTURE_FULL_NAME),
            token: FIXTURE_TOKEN.to_string(),
        })
    }

    async fn register(&self, form: &RegisterForm) -> Result<AuthSession, RemoteError> {
        self.simulate_latency("register").await;
        Ok(AuthSession {
            user: Self::fixture_user(&form.email, &form.full_name),
            token: FIXTURE_TOKEN.to_string(),
        })
    }

    async fn list_resumes(&self) -> Result<Vec<Resume>, RemoteError> {
        self.simulate_latency("list_resumes").await;
        Ok(fixture_resumes())
    }

    async fn fetch_resume(&self, id: &str) -> Result<Option<Resume>, RemoteError> {
        self.simulate_latency("fetch_resume").await;
        Ok(fixture_resumes().into_iter().find(|r| r.id == id))
    }

    async fn upload_resume(&self, form: &ResumeUploadForm) -> Result<Resume, RemoteError> {
        self.simulate_latency("upload_resume").await;
        let file_name = if form.file.name.trim().is_empty() {
            DEFAULT_FILE_NAME.to_string()
        } else {
            form.file.name.clone()
        };
        Ok(Resume {
            id: Uuid::new_v4().to_string(),
            user_id: FIXTURE_USER_ID.to_string(),
            file_name,
            file_url: "mock_url".to_string(),
            file_size: form.file.size,
            upload_date: now_millis(),
            parsed_data: None,
            analysis_result: None,
            optimization_status: OptimizationStatus::Pending,
            template_id: form.template_id.clone(),
            is_favorite: false,
        })
    }

    async fn update_resume(&self, resume: &Resume) -> Result<Resume, RemoteError> {
        self.simulate_latency("update_resume").await;
        Ok(resume.clone())
    }

    async fn delete_resume(&self, _id: &str) -> Result<(), RemoteError> {
        self.simulate_latency("delete_resume").await;
        Ok(())
    }

    async fn list_templates(&self) -> Result<Vec<ResumeTemplate>, RemoteError> {
        self.simulate_latency("list_templates").await;
        Ok(fixture_templates())
    }
}
