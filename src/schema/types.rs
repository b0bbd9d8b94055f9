use async_graphql::{Context, ID, Object, Result};

use super::field_error;
use crate::db::Store;
use crate::models::{Client, Project};
use crate::relations;

#[Object]
impl Client {
    async fn id(&self) -> ID {
        ID::from(self.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn email(&self) -> &str {
        &self.email
    }

    async fn phone(&self) -> &str {
        &self.phone
    }

    /// Projects that reference this client
    async fn projects(&self, ctx: &Context<'_>) -> Result<Vec<Project>> {
        let store = ctx.data::<Store>()?;
        relations::projects_of_client(store.as_ref(), self.id)
            .await
            .map_err(field_error)
    }
}

#[Object]
impl Project {
    async fn id(&self) -> ID {
        ID::from(self.id.to_string())
    }

    async fn client_id(&self) -> ID {
        ID::from(self.client_id.to_string())
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn description(&self) -> &str {
        &self.description
    }

    /// One of "Not Started", "In Progress" or "Completed"
    async fn status(&self) -> &str {
        &self.status
    }

    /// Owning client; null once that client has been deleted
    async fn client(&self, ctx: &Context<'_>) -> Result<Option<Client>> {
        let store = ctx.data::<Store>()?;
        relations::client_of_project(store.as_ref(), self)
            .await
            .map_err(field_error)
    }
}
