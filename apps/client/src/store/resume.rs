//! Resume Store: the resume collection, the current selection and the
//! template catalog.
//!
//! Resume ids are unique within `resumes` and insertion order is kept for
//! listing. `current_resume` is not guaranteed to be a member of `resumes`:
//! it can be set directly, fetched remotely, or left stale by a refresh.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{Dispatcher, Reducer};
use crate::errors::StoreError;
use crate::models::{Resume, ResumeTemplate};
use crate::remote::{RemoteService, ResumeUploadForm};

const UPLOAD_FAILED: &str = "Failed to upload resume";
const FETCH_FAILED: &str = "Failed to fetch resumes";
const UPDATE_FAILED: &str = "Failed to update resume";
const DELETE_FAILED: &str = "Failed to delete resume";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeState {
    pub resumes: Vec<Resume>,
    pub current_resume: Option<Resume>,
    pub templates: Vec<ResumeTemplate>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ResumeState {
    pub fn find(&self, id: &str) -> Option<&Resume> {
        self.resumes.iter().find(|r| r.id == id)
    }
}

#[derive(Debug, Clone)]
pub enum ResumeAction {
    SetLoading(bool),
    /// Replaces the collection wholesale. `current_resume` is left as is.
    SetResumes(Vec<Resume>),
    SetCurrentResume(Option<Resume>),
    SetTemplates(Vec<ResumeTemplate>),
    /// Appends a freshly uploaded resume and selects it.
    ResumeAdded(Resume),
    UpdateResume(Resume),
    DeleteResume(String),
    SetError(Option<String>),
}

impl Reducer for ResumeState {
    type Action = ResumeAction;

    fn reduce(&self, action: ResumeAction) -> Self {
        match action {
            ResumeAction::SetLoading(is_loading) => Self {
                is_loading,
                ..self.clone()
            },
            ResumeAction::SetResumes(resumes) => Self {
                resumes: dedup_by_id(resumes),
                ..self.clone()
            },
            ResumeAction::SetCurrentResume(current_resume) => Self {
                current_resume,
                ..self.clone()
            },
            ResumeAction::SetTemplates(templates) => Self {
                templates,
                ..self.clone()
            },
            ResumeAction::ResumeAdded(resume) => {
                let mut resumes = self.resumes.clone();
                // An id already present is replaced in place to keep ids unique.
                match resumes.iter_mut().find(|r| r.id == resume.id) {
                    Some(existing) => *existing = resume.clone(),
                    None => resumes.push(resume.clone()),
                }
                Self {
                    resumes,
                    current_resume: Some(resume),
                    ..self.clone()
                }
            }
            ResumeAction::UpdateResume(resume) => {
                let resumes = self
                    .resumes
                    .iter()
                    .map(|r| {
                        if r.id == resume.id {
                            resume.clone()
                        } else {
                            r.clone()
                        }
                    })
                    .collect();
                let current_resume = match &self.current_resume {
                    Some(current) if current.id == resume.id => Some(resume),
                    other => other.clone(),
                };
                Self {
                    resumes,
                    current_resume,
                    ..self.clone()
                }
            }
            ResumeAction::DeleteResume(id) => {
                let resumes = self
                    .resumes
                    .iter()
                    .filter(|r| r.id != id)
                    .cloned()
                    .collect();
                let current_resume = match &self.current_resume {
                    Some(current) if current.id == id => None,
                    other => other.clone(),
                };
                Self {
                    resumes,
                    current_resume,
                    ..self.clone()
                }
            }
            ResumeAction::SetError(error) => Self {
                error,
                ..self.clone()
            },
        }
    }
}

/// Keeps the first occurrence of each id, preserving order.
fn dedup_by_id(resumes: Vec<Resume>) -> Vec<Resume> {
    let total = resumes.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<Resume> = resumes
        .into_iter()
        .filter(|r| seen.insert(r.id.clone()))
        .collect();
    if unique.len() != total {
        warn!(
            "Dropped {} resume(s) with duplicate ids from listing",
            total - unique.len()
        );
    }
    unique
}

struct Inner {
    dispatcher: Dispatcher<ResumeState>,
    remote: Arc<dyn RemoteService>,
}

/// Cloneable handle to the resume container. Clones share state.
#[derive(Clone)]
pub struct ResumeStore {
    inner: Arc<Inner>,
}

impl ResumeStore {
    pub fn new(remote: Arc<dyn RemoteService>) -> Self {
        Self {
            inner: Arc::new(Inner {
                dispatcher: Dispatcher::new(ResumeState::default()),
                remote,
            }),
        }
    }

    /// Creates a store and loads the template catalog once.
    pub async fn open(remote: Arc<dyn RemoteService>) -> Self {
        let store = Self::new(remote);
        store.get_templates().await;
        store
    }

    pub fn snapshot(&self) -> ResumeState {
        self.inner.dispatcher.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResumeState> {
        self.inner.dispatcher.subscribe()
    }

    /// Uploads a file, appends the new resume and selects it.
    pub async fn upload_resume(&self, form: &ResumeUploadForm) -> Result<Resume, StoreError> {
        let dispatcher = &self.inner.dispatcher;
        let _op = dispatcher.begin().await;
        let _loading = self.loading();
        dispatcher.dispatch(ResumeAction::SetError(None));

        match self.inner.remote.upload_resume(form).await {
            Ok(resume) => {
                info!("Uploaded resume {} ({})", resume.id, resume.file_name);
                dispatcher.dispatch(ResumeAction::ResumeAdded(resume.clone()));
                Ok(resume)
            }
            Err(e) => {
                warn!("Upload error: {e}");
                dispatcher.dispatch(ResumeAction::SetError(Some(UPLOAD_FAILED.to_string())));
                Err(e.into())
            }
        }
    }

    /// Refreshes the collection from the backend. Failures are recorded in
    /// `error` and leave the previous list in place; nothing is returned to
    /// the caller.
    pub async fn get_resumes(&self) {
        let dispatcher = &self.inner.dispatcher;
        let _op = dispatcher.begin().await;
        let _loading = self.loading();
        dispatcher.dispatch(ResumeAction::SetError(None));

        match self.inner.remote.list_resumes().await {
            Ok(resumes) => {
                debug!("Fetched {} resume(s)", resumes.len());
                dispatcher.dispatch(ResumeAction::SetResumes(resumes));
            }
            Err(e) => {
                warn!("Get resumes error: {e}");
                dispatcher.dispatch(ResumeAction::SetError(Some(FETCH_FAILED.to_string())));
            }
        }
    }

    /// Selects and returns the resume with `id`, asking the backend only when
    /// it is not in the local collection. A remote hit is selected without
    /// being added to the collection. Misses and failures yield `None`.
    pub async fn get_resume_by_id(&self, id: &str) -> Option<Resume> {
        let dispatcher = &self.inner.dispatcher;
        let _op = dispatcher.begin().await;

        if let Some(resume) = dispatcher.snapshot().find(id).cloned() {
            dispatcher.dispatch(ResumeAction::SetCurrentResume(Some(resume.clone())));
            return Some(resume);
        }

        match self.inner.remote.fetch_resume(id).await {
            Ok(Some(resume)) => {
                dispatcher.dispatch(ResumeAction::SetCurrentResume(Some(resume.clone())));
                Some(resume)
            }
            Ok(None) => {
                debug!("Resume {id} not found");
                None
            }
            Err(e) => {
                warn!("Get resume by id error: {e}");
                None
            }
        }
    }

    /// Replaces the entry with the same id in both the collection and the
    /// current selection. An id absent from the collection only affects the
    /// selection (if it matches).
    pub async fn update_resume(&self, resume: &Resume) -> Result<Resume, StoreError> {
        let dispatcher = &self.inner.dispatcher;
        let _op = dispatcher.begin().await;
        let _loading = self.loading();
        dispatcher.dispatch(ResumeAction::SetError(None));

        match self.inner.remote.update_resume(resume).await {
            Ok(updated) => {
                dispatcher.dispatch(ResumeAction::UpdateResume(updated.clone()));
                Ok(updated)
            }
            Err(e) => {
                warn!("Update resume error: {e}");
                dispatcher.dispatch(ResumeAction::SetError(Some(UPDATE_FAILED.to_string())));
                Err(e.into())
            }
        }
    }

    pub async fn delete_resume(&self, id: &str) -> Result<(), StoreError> {
        let dispatcher = &self.inner.dispatcher;
        let _op = dispatcher.begin().await;
        let _loading = self.loading();
        dispatcher.dispatch(ResumeAction::SetError(None));

        match self.inner.remote.delete_resume(id).await {
            Ok(()) => {
                info!("Deleted resume {id}");
                dispatcher.dispatch(ResumeAction::DeleteResume(id.to_string()));
                Ok(())
            }
            Err(e) => {
                warn!("Delete resume error: {e}");
                dispatcher.dispatch(ResumeAction::SetError(Some(DELETE_FAILED.to_string())));
                Err(e.into())
            }
        }
    }

    /// Replaces the template catalog. Failures are only logged.
    pub async fn get_templates(&self) {
        let _op = self.inner.dispatcher.begin().await;

        match self.inner.remote.list_templates().await {
            Ok(templates) => {
                debug!("Loaded {} template(s)", templates.len());
                self.inner
                    .dispatcher
                    .dispatch(ResumeAction::SetTemplates(templates));
            }
            Err(e) => warn!("Get templates error: {e}"),
        }
    }

    pub fn set_current_resume(&self, resume: Option<Resume>) {
        self.inner
            .dispatcher
            .dispatch(ResumeAction::SetCurrentResume(resume));
    }

    fn loading(&self) -> super::Bracket<'_, ResumeState> {
        self.inner.dispatcher.bracket(
            ResumeAction::SetLoading(true),
            ResumeAction::SetLoading(false),
        )
    }
}
