mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::Config;
use crate::error::Result;
use crate::models::{Client, ClientPatch, NewClient, NewProject, Project, ProjectPatch};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Shared handle to the entity store, opened once at startup.
pub type Store = Arc<dyn EntityStore>;

/// Persistence for clients and projects.
///
/// Lookups by key return `Ok(None)` when no record matches. The store does
/// not enforce any link between the two collections.
#[async_trait]
pub trait EntityStore: Send + Sync {
    // Client operations
    async fn get_clients(&self) -> Result<Vec<Client>>;

    async fn get_client(&self, id: Uuid) -> Result<Option<Client>>;

    async fn create_client(&self, client: NewClient) -> Result<Client>;

    async fn update_client(&self, id: Uuid, patch: ClientPatch) -> Result<Option<Client>>;

    async fn delete_client(&self, id: Uuid) -> Result<Option<Client>>;

    // Project operations
    async fn get_projects(&self) -> Result<Vec<Project>>;

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>>;

    async fn get_projects_by_client(&self, client_id: Uuid) -> Result<Vec<Project>>;

    async fn create_project(&self, project: NewProject) -> Result<Project>;

    async fn update_project(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>>;

    async fn delete_project(&self, id: Uuid) -> Result<Option<Project>>;
}

/// Open the store selected by the configured database URL
pub async fn init(config: &Config) -> Result<Store> {
    if config.uses_memory_store() {
        tracing::warn!("using in-memory store, data will not survive a restart");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = PgStore::connect(config).await?;
    store.migrate().await?;
    tracing::info!("database connection established");

    Ok(Arc::new(store))
}
