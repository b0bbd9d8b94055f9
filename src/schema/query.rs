use async_graphql::{Context, ID, Object, Result};

use super::{field_error, lookup_key};
use crate::db::Store;
use crate::models::{Client, Project};

pub struct QueryRoot;

#[Object(name = "RootQueryType")]
impl QueryRoot {
    async fn projects(&self, ctx: &Context<'_>) -> Result<Vec<Project>> {
        let store = ctx.data::<Store>()?;
        store.get_projects().await.map_err(field_error)
    }

    async fn project(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Project>> {
        let Some(id) = lookup_key(&id) else {
            return Ok(None);
        };
        let store = ctx.data::<Store>()?;
        store.get_project(id).await.map_err(field_error)
    }

    async fn clients(&self, ctx: &Context<'_>) -> Result<Vec<Client>> {
        let store = ctx.data::<Store>()?;
        store.get_clients().await.map_err(field_error)
    }

    async fn client(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Client>> {
        let Some(id) = lookup_key(&id) else {
            return Ok(None);
        };
        let store = ctx.data::<Store>()?;
        store.get_client(id).await.map_err(field_error)
    }
}
