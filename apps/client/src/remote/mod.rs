//! Remote Service Adapter: the network boundary every mutating store operation calls.
//!
//! Stores hold an `Arc<dyn RemoteService>`, so a real HTTP client can replace the
//! fixture backend without touching store logic.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Resume, ResumeTemplate, User};

pub mod fixtures;

pub use fixtures::FixtureRemote;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// File picked on the device for upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFile {
    pub name: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeUploadForm {
    pub file: UploadFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

/// Result of a successful authenticate/register call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

#[async_trait]
pub trait RemoteService: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthSession, RemoteError>;

    async fn register(&self, form: &RegisterForm) -> Result<AuthSession, RemoteError>;

    async fn list_resumes(&self) -> Result<Vec<Resume>, RemoteError>;

    /// Single-resume lookup used when the selection is not in the local collection.
    async fn fetch_resume(&self, id: &str) -> Result<Option<Resume>, RemoteError>;

    async fn upload_resume(&self, form: &ResumeUploadForm) -> Result<Resume, RemoteError>;

    /// Returns the resume as the backend stored it.
    async fn update_resume(&self, resume: &Resume) -> Result<Resume, RemoteError>;

    async fn delete_resume(&self, id: &str) -> Result<(), RemoteError>;

    async fn list_templates(&self) -> Result<Vec<ResumeTemplate>, RemoteError>;
}
