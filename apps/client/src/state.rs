use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::persistence::{FileStore, KeyValueStore, MemoryStore};
use crate::remote::{FixtureRemote, RemoteService};
use crate::store::{ResumeStore, SessionStore};

/// The two store handles consumers are given. The stores never reference
/// each other; screens read both.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub session: SessionStore,
    pub resumes: ResumeStore,
}

impl AppState {
    /// Builds the collaborators from config, then opens both stores
    /// (session restore and template load run concurrently).
    pub async fn init(config: Config) -> Result<Self> {
        let persistence: Arc<dyn KeyValueStore> = match &config.storage_dir {
            Some(dir) => {
                info!("Persisting session under {}", dir.display());
                Arc::new(FileStore::open(dir.clone()).await?)
            }
            None => {
                info!("No STORAGE_DIR set, session kept in memory");
                Arc::new(MemoryStore::new())
            }
        };

        let remote: Arc<dyn RemoteService> = Arc::new(FixtureRemote::new(config.mock_latency()));

        let (session, resumes) = tokio::join!(
            SessionStore::open(persistence, Arc::clone(&remote)),
            ResumeStore::open(remote),
        );

        Ok(Self {
            config,
            session,
            resumes,
        })
    }
}
