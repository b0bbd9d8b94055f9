//! Lookups that follow the project → client reference in either direction.

use uuid::Uuid;

use crate::db::EntityStore;
use crate::error::Result;
use crate::models::{Client, Project};

/// All projects whose client reference equals `client_id`.
///
/// The client itself does not need to exist; projects of a deleted client
/// are still returned.
pub async fn projects_of_client(
    store: &dyn EntityStore,
    client_id: Uuid,
) -> Result<Vec<Project>> {
    store.get_projects_by_client(client_id).await
}

/// The client a project points at, or `None` if the reference dangles.
pub async fn client_of_project(
    store: &dyn EntityStore,
    project: &Project,
) -> Result<Option<Client>> {
    let client = store.get_client(project.client_id).await?;
    if client.is_none() {
        tracing::debug!(
            project = %project.id,
            client = %project.client_id,
            "dangling client reference"
        );
    }
    Ok(client)
}
