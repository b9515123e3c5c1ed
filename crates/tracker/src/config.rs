use anyhow::{Context, Result};
use std::sync::Arc;
use storage::{DocumentStore, MemoryStore, PgStore};

use crate::context::{DEFAULT_EVENT_CAPACITY, StoreContext};

/// Upper bound for `TRACKER_EVENT_CAPACITY`
pub const MAX_EVENT_CAPACITY: usize = 1 << 16;
use crate::engine::SyncEngine;
use crate::roster::TeamRoster;

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// PostgreSQL backend; the in-memory store is used when unset
    pub database_url: Option<String>,
    pub teams: TeamRoster,
    pub event_capacity: usize,
}

impl TrackerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load `.env` (when present) and then read the environment
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_source(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let event_capacity = match var("TRACKER_EVENT_CAPACITY") {
            Some(value) => value
                .trim()
                .parse()
                .context("TRACKER_EVENT_CAPACITY must be a number")?,
            None => DEFAULT_EVENT_CAPACITY,
        };
        anyhow::ensure!(
            event_capacity <= MAX_EVENT_CAPACITY,
            "TRACKER_EVENT_CAPACITY must be at most {}, got {}",
            MAX_EVENT_CAPACITY,
            event_capacity
        );

        Ok(Self {
            database_url: var("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            teams: TeamRoster::from_comma_separated(&var("TRACKER_TEAMS").unwrap_or_default()),
            event_capacity,
        })
    }

    pub async fn connect_store(&self) -> Result<Arc<dyn DocumentStore>> {
        let Some(database_url) = &self.database_url else {
            tracing::info!("No DATABASE_URL set, using the in-memory store");
            return Ok(Arc::new(MemoryStore::new()));
        };

        tracing::info!(
            "Connecting to database at: {}",
            database_url.split('@').next_back().unwrap_or("unknown")
        );
        let store = PgStore::connect(database_url)
            .await
            .context("Failed to initialize database")?;

        tracing::info!("Running database migrations");
        store
            .run_migrations()
            .await
            .context("Failed to run migrations")?;

        Ok(Arc::new(store))
    }

    /// Connect the configured store and build an engine over a fresh context
    pub async fn build_engine(&self) -> Result<SyncEngine> {
        let store = self.connect_store().await?;
        let context = Arc::new(StoreContext::new(self.event_capacity));
        Ok(SyncEngine::new(store, context, self.teams.clone()))
    }
}
