//! Session Store: single source of truth for who is signed in.
//!
//! Two top-level states, Unauthenticated and Authenticated, with `is_loading`
//! orthogonal to both. `is_authenticated` holds exactly when both `user` and
//! `token` are present; every action below preserves that.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{Dispatcher, Reducer};
use crate::errors::StoreError;
use crate::models::User;
use crate::persistence::{KeyValueStore, AUTH_TOKEN_KEY, USER_DATA_KEY};
use crate::remote::{AuthSession, LoginCredentials, RegisterForm, RemoteService};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_loading: bool,
    pub is_authenticated: bool,
    pub error: Option<String>,
}

impl SessionState {
    /// Shape on process start, before the persisted session has been checked.
    pub fn initial() -> Self {
        Self {
            user: None,
            token: None,
            is_loading: true,
            is_authenticated: false,
            error: None,
        }
    }

    /// Settled unauthenticated shape.
    pub fn signed_out() -> Self {
        Self {
            is_loading: false,
            ..Self::initial()
        }
    }
}

#[derive(Debug, Clone)]
pub enum SessionAction {
    SetLoading(bool),
    SignedIn { user: User, token: String },
    /// Ignored unless a session is active.
    ProfileUpdated(User),
    SignedOut,
    SetError(Option<String>),
}

impl Reducer for SessionState {
    type Action = SessionAction;

    fn reduce(&self, action: SessionAction) -> Self {
        match action {
            SessionAction::SetLoading(is_loading) => Self {
                is_loading,
                ..self.clone()
            },
            SessionAction::SignedIn { user, token } => Self {
                user: Some(user),
                token: Some(token),
                is_authenticated: true,
                error: None,
                ..self.clone()
            },
            SessionAction::ProfileUpdated(user) if self.is_authenticated => Self {
                user: Some(user),
                ..self.clone()
            },
            SessionAction::ProfileUpdated(_) => self.clone(),
            SessionAction::SignedOut => Self::signed_out(),
            SessionAction::SetError(error) => Self {
                error,
                ..self.clone()
            },
        }
    }
}

struct Inner {
    dispatcher: Dispatcher<SessionState>,
    persistence: Arc<dyn KeyValueStore>,
    remote: Arc<dyn RemoteService>,
    user_writes: Arc<UserWrites>,
}

/// Orders writes of the persisted pair. Every writer takes a generation
/// before queueing on `lock`; a detached profile write whose generation is no
/// longer the latest skips, so the last call always wins on disk.
#[derive(Default)]
struct UserWrites {
    lock: Mutex<()>,
    generation: AtomicU64,
}

impl UserWrites {
    fn next(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

/// Cloneable handle to the session container. Clones share state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Creates a store in the initial (loading) shape without touching persistence.
    pub fn new(persistence: Arc<dyn KeyValueStore>, remote: Arc<dyn RemoteService>) -> Self {
        Self {
            inner: Arc::new(Inner {
                dispatcher: Dispatcher::new(SessionState::initial()),
                persistence,
                remote,
                user_writes: Arc::default(),
            }),
        }
    }

    /// Creates a store and restores any persisted session before returning.
    pub async fn open(persistence: Arc<dyn KeyValueStore>, remote: Arc<dyn RemoteService>) -> Self {
        let store = Self::new(persistence, remote);
        store.restore_session().await;
        store
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.dispatcher.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.dispatcher.subscribe()
    }

    /// Reloads the session from persistence. A missing, half-written or
    /// undecodable pair leaves the store unauthenticated. Never fails.
    pub async fn restore_session(&self) {
        let dispatcher = &self.inner.dispatcher;
        let _op = dispatcher.begin().await;
        let _loading = dispatcher.bracket(
            SessionAction::SetLoading(true),
            SessionAction::SetLoading(false),
        );

        match self.read_persisted_session().await {
            Ok(Some(AuthSession { user, token })) => {
                info!("Restored session for user {}", user.id);
                dispatcher.dispatch(SessionAction::SignedIn { user, token });
            }
            Ok(None) => {
                debug!("No persisted session found");
                dispatcher.dispatch(SessionAction::SignedOut);
            }
            Err(e) => {
                warn!("Error restoring session, continuing signed out: {e}");
                dispatcher.dispatch(SessionAction::SignedOut);
            }
        }
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<(), StoreError> {
        let dispatcher = &self.inner.dispatcher;
        let _op = dispatcher.begin().await;
        let _loading = dispatcher.bracket(
            SessionAction::SetLoading(true),
            SessionAction::SetLoading(false),
        );
        dispatcher.dispatch(SessionAction::SetError(None));

        let result = self
            .inner
            .remote
            .authenticate(&credentials.email, &credentials.password)
            .await;

        match result {
            Ok(session) => {
                info!("Signed in as {}", session.user.email);
                self.establish(session).await;
                Ok(())
            }
            Err(e) => {
                warn!("Login error: {e}");
                dispatcher.dispatch(SessionAction::SetError(Some(e.to_string())));
                Err(e.into())
            }
        }
    }

    /// Same contract as [`SessionStore::login`], through the registration endpoint.
    pub async fn register(&self, form: &RegisterForm) -> Result<(), StoreError> {
        let dispatcher = &self.inner.dispatcher;
        let _op = dispatcher.begin().await;
        let _loading = dispatcher.bracket(
            SessionAction::SetLoading(true),
            SessionAction::SetLoading(false),
        );
        dispatcher.dispatch(SessionAction::SetError(None));

        match self.inner.remote.register(form).await {
            Ok(session) => {
                info!("Registered {}", session.user.email);
                self.establish(session).await;
                Ok(())
            }
            Err(e) => {
                warn!("Register error: {e}");
                dispatcher.dispatch(SessionAction::SetError(Some(e.to_string())));
                Err(e.into())
            }
        }
    }

    /// Clears the persisted pair (best effort) and always ends signed out.
    pub async fn logout(&self) {
        let _op = self.inner.dispatcher.begin().await;
        self.inner.user_writes.next();
        let _writes = self.inner.user_writes.lock.lock().await;

        for key in [AUTH_TOKEN_KEY, USER_DATA_KEY] {
            if let Err(e) = self.inner.persistence.remove(key).await {
                warn!("Logout could not clear '{key}': {e}");
            }
        }

        self.inner.dispatcher.dispatch(SessionAction::SignedOut);
        info!("Signed out");
    }

    /// Replaces the signed-in user and re-persists it in a detached task.
    ///
    /// Returns `None` (and changes nothing) when no session is active. The
    /// returned handle may be dropped; persistence failures are only logged.
    /// Back-to-back updates persist in call order: a write overtaken by a
    /// newer update is skipped.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn update_profile(&self, user: User) -> Option<JoinHandle<()>> {
        if !self.snapshot().is_authenticated {
            warn!("Ignoring profile update for user {}: not signed in", user.id);
            return None;
        }

        self.inner
            .dispatcher
            .dispatch(SessionAction::ProfileUpdated(user.clone()));

        let persistence = Arc::clone(&self.inner.persistence);
        let writes = Arc::clone(&self.inner.user_writes);
        let generation = writes.next();
        Some(tokio::spawn(async move {
            let _writes = writes.lock.lock().await;
            if !writes.is_latest(generation) {
                debug!("Skipping stale profile write for {}", user.id);
                return;
            }
            if let Err(e) = persist_user(persistence.as_ref(), &user).await {
                warn!("Failed to persist updated profile for {}: {e}", user.id);
            }
        }))
    }

    async fn establish(&self, session: AuthSession) {
        self.inner.user_writes.next();
        let _writes = self.inner.user_writes.lock.lock().await;
        if let Err(e) = persist_session(self.inner.persistence.as_ref(), &session).await {
            warn!("Failed to persist session, it will not survive a restart: {e}");
        }
        let AuthSession { user, token } = session;
        self.inner
            .dispatcher
            .dispatch(SessionAction::SignedIn { user, token });
    }

    async fn read_persisted_session(&self) -> Result<Option<AuthSession>, StoreError> {
        let persistence = self.inner.persistence.as_ref();
        let token = persistence.get(AUTH_TOKEN_KEY).await?;
        let user_blob = persistence.get(USER_DATA_KEY).await?;

        let (Some(token), Some(user_blob)) = (token, user_blob) else {
            return Ok(None);
        };

        let token = match String::from_utf8(token.to_vec()) {
            Ok(token) if !token.is_empty() => token,
            _ => {
                warn!("Persisted auth token is empty or not UTF-8");
                return Ok(None);
            }
        };

        let user: User = serde_json::from_slice(&user_blob)?;
        Ok(Some(AuthSession { user, token }))
    }
}

/// Writes token then user. The two writes are not atomic.
async fn persist_session(
    persistence: &dyn KeyValueStore,
    session: &AuthSession,
) -> Result<(), StoreError> {
    persistence
        .set(AUTH_TOKEN_KEY, Bytes::from(session.token.clone()))
        .await?;
    persist_user(persistence, &session.user).await
}

async fn persist_user(persistence: &dyn KeyValueStore, user: &User) -> Result<(), StoreError> {
    let blob = serde_json::to_vec(user)?;
    persistence.set(USER_DATA_KEY, Bytes::from(blob)).await?;
    Ok(())
}
