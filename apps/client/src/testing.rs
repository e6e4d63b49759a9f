//! Test doubles for the store collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use crate::models::{Resume, ResumeTemplate};
use crate::persistence::{KeyValueStore, PersistenceError};
use crate::remote::{
    AuthSession, FixtureRemote, RegisterForm, RemoteError, RemoteService, ResumeUploadForm,
};

/// Remote whose every call fails as unreachable.
pub struct FailingRemote;

fn unavailable<T>() -> Result<T, RemoteError> {
    Err(RemoteError::Unavailable("network down".to_string()))
}

#[async_trait]
impl RemoteService for FailingRemote {
    async fn authenticate(&self, _email: &str, _password: &str) -> Result<AuthSession, RemoteError> {
        unavailable()
    }

    async fn register(&self, _form: &RegisterForm) -> Result<AuthSession, RemoteError> {
        unavailable()
    }

    async fn list_resumes(&self) -> Result<Vec<Resume>, RemoteError> {
        unavailable()
    }

    async fn fetch_resume(&self, _id: &str) -> Result<Option<Resume>, RemoteError> {
        unavailable()
    }

    async fn upload_resume(&self, _form: &ResumeUploadForm) -> Result<Resume, RemoteError> {
        unavailable()
    }

    async fn update_resume(&self, _resume: &Resume) -> Result<Resume, RemoteError> {
        unavailable()
    }

    async fn delete_resume(&self, _id: &str) -> Result<(), RemoteError> {
        unavailable()
    }

    async fn list_templates(&self) -> Result<Vec<ResumeTemplate>, RemoteError> {
        unavailable()
    }
}

/// Remote whose calls never resolve, for exercising dropped operations.
pub struct HangingRemote;

#[async_trait]
impl RemoteService for HangingRemote {
    async fn authenticate(&self, _email: &str, _password: &str) -> Result<AuthSession, RemoteError> {
        std::future::pending().await
    }

    async fn register(&self, _form: &RegisterForm) -> Result<AuthSession, RemoteError> {
        std::future::pending().await
    }

    async fn list_resumes(&self) -> Result<Vec<Resume>, RemoteError> {
        std::future::pending().await
    }

    async fn fetch_resume(&self, _id: &str) -> Result<Option<Resume>, RemoteError> {
        std::future::pending().await
    }

    async fn upload_resume(&self, _form: &ResumeUploadForm) -> Result<Resume, RemoteError> {
        std::future::pending().await
    }

    async fn update_resume(&self, _resume: &Resume) -> Result<Resume, RemoteError> {
        std::future::pending().await
    }

    async fn delete_resume(&self, _id: &str) -> Result<(), RemoteError> {
        std::future::pending().await
    }

    async fn list_templates(&self) -> Result<Vec<ResumeTemplate>, RemoteError> {
        std::future::pending().await
    }
}

/// Fixture remote that counts single-resume lookups.
#[derive(Default)]
pub struct CountingRemote {
    inner: FixtureRemote,
    fetches: AtomicUsize,
}

impl CountingRemote {
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteService for CountingRemote {
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthSession, RemoteError> {
        self.inner.authenticate(email, password).await
    }

    async fn register(&self, form: &RegisterForm) -> Result<AuthSession, RemoteError> {
        self.inner.register(form).await
    }

    async fn list_resumes(&self) -> Result<Vec<Resume>, RemoteError> {
        self.inner.list_resumes().await
    }

    async fn fetch_resume(&self, id: &str) -> Result<Option<Resume>, RemoteError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_resume(id).await
    }

    async fn upload_resume(&self, form: &ResumeUploadForm) -> Result<Resume, RemoteError> {
        self.inner.upload_resume(form).await
    }

    async fn update_resume(&self, resume: &Resume) -> Result<Resume, RemoteError> {
        self.inner.update_resume(resume).await
    }

    async fn delete_resume(&self, id: &str) -> Result<(), RemoteError> {
        self.inner.delete_resume(id).await
    }

    async fn list_templates(&self) -> Result<Vec<ResumeTemplate>, RemoteError> {
        self.inner.list_templates().await
    }
}

/// Persistence whose every call fails.
pub struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<Bytes>, PersistenceError> {
        Err(PersistenceError::Unavailable("disk full".to_string()))
    }

    async fn set(&self, _key: &str, _value: Bytes) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("disk full".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("disk full".to_string()))
    }
}
