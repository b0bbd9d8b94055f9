use async_graphql::{Context, ID, Object, Result};

use super::{field_error, lookup_key, reference_key};
use crate::db::Store;
use crate::models::{
    Client, ClientPatch, NewClient, NewProject, Project, ProjectPatch, ProjectStatus,
};

pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    async fn add_client(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        phone: String,
    ) -> Result<Client> {
        let store = ctx.data::<Store>()?;
        let client = store
            .create_client(NewClient { name, email, phone })
            .await
            .map_err(field_error)?;

        tracing::info!(client = %client.id, "client created");
        Ok(client)
    }

    async fn update_client(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
    ) -> Result<Option<Client>> {
        let Some(id) = lookup_key(&id) else {
            return Ok(None);
        };
        let store = ctx.data::<Store>()?;
        let patch = ClientPatch { name, email, phone };
        store.update_client(id, patch).await.map_err(field_error)
    }

    /// Removes the client only; its projects keep the stale reference.
    async fn delete_client(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Client>> {
        let Some(id) = lookup_key(&id) else {
            return Ok(None);
        };
        let store = ctx.data::<Store>()?;
        let removed = store.delete_client(id).await.map_err(field_error)?;

        if removed.is_some() {
            tracing::info!(client = %id, "client deleted");
        }
        Ok(removed)
    }

    async fn add_project(
        &self,
        ctx: &Context<'_>,
        name: String,
        description: String,
        #[graphql(default_with = "Some(ProjectStatus::NotStarted)")]
        status: Option<ProjectStatus>,
        client_id: ID,
    ) -> Result<Project> {
        let client_id = reference_key("clientId", &client_id).map_err(field_error)?;
        let store = ctx.data::<Store>()?;
        let project = store
            .create_project(NewProject {
                client_id,
                name,
                description,
                status: status.unwrap_or_default().to_string(),
            })
            .await
            .map_err(field_error)?;

        tracing::info!(project = %project.id, client = %client_id, "project created");
        Ok(project)
    }

    async fn delete_project(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Project>> {
        let Some(id) = lookup_key(&id) else {
            return Ok(None);
        };
        let store = ctx.data::<Store>()?;
        let removed = store.delete_project(id).await.map_err(field_error)?;

        if removed.is_some() {
            tracing::info!(project = %id, "project deleted");
        }
        Ok(removed)
    }

    async fn update_project(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        description: Option<String>,
        status: Option<ProjectStatus>,
        client_id: Option<ID>,
    ) -> Result<Option<Project>> {
        let client_id = client_id
            .map(|client_id| reference_key("clientId", &client_id))
            .transpose()
            .map_err(field_error)?;
        let Some(id) = lookup_key(&id) else {
            return Ok(None);
        };

        let store = ctx.data::<Store>()?;
        let patch = ProjectPatch {
            client_id,
            name,
            description,
            status: status.map(|status| status.to_string()),
        };
        store.update_project(id, patch).await.map_err(field_error)
    }
}
