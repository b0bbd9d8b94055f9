use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::EntityStore;
use crate::config::Config;
use crate::error::Result;
use crate::models::{Client, ClientPatch, NewClient, NewProject, Project, ProjectPatch};

/// PostgreSQL-backed store
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new store with a connection pool
    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(config.database_url())
            .await?;

        Ok(Self { pool })
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn get_clients(&self) -> Result<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, phone FROM clients ORDER BY name ASC, id ASC",
        )
        .fetch_all(self.get_pool())
        .await?;

        Ok(clients)
    }

    async fn get_client(&self, id: Uuid) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, phone FROM clients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?;

        Ok(client)
    }

    async fn create_client(&self, client: NewClient) -> Result<Client> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (id, name, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(client.name)
        .bind(client.email)
        .bind(client.phone)
        .fetch_one(self.get_pool())
        .await?;

        Ok(client)
    }

    async fn update_client(&self, id: Uuid, patch: ClientPatch) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone)
            WHERE id = $1
            RETURNING id, name, email, phone
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.email)
        .bind(patch.phone)
        .fetch_optional(self.get_pool())
        .await?;

        Ok(client)
    }

    async fn delete_client(&self, id: Uuid) -> Result<Option<Client>> {
        // Projects are left in place and keep pointing at the removed id
        let client = sqlx::query_as::<_, Client>(
            "DELETE FROM clients WHERE id = $1 RETURNING id, name, email, phone",
        )
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?;

        Ok(client)
    }

    async fn get_projects(&self) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, client_id, name, description, status
            FROM projects
            ORDER BY name ASC, id ASC
            "#,
        )
        .fetch_all(self.get_pool())
        .await?;

        Ok(projects)
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, client_id, name, description, status
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?;

        Ok(project)
    }

    async fn get_projects_by_client(&self, client_id: Uuid) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, client_id, name, description, status
            FROM projects
            WHERE client_id = $1
            ORDER BY name ASC, id ASC
            "#,
        )
        .bind(client_id)
        .fetch_all(self.get_pool())
        .await?;

        Ok(projects)
    }

    async fn create_project(&self, project: NewProject) -> Result<Project> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (id, client_id, name, description, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, client_id, name, description, status
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(project.client_id)
        .bind(project.name)
        .bind(project.description)
        .bind(project.status)
        .fetch_one(self.get_pool())
        .await?;

        Ok(project)
    }

    async fn update_project(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET client_id = COALESCE($2, client_id),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                status = COALESCE($5, status)
            WHERE id = $1
            RETURNING id, client_id, name, description, status
            "#,
        )
        .bind(id)
        .bind(patch.client_id)
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.status)
        .fetch_optional(self.get_pool())
        .await?;

        Ok(project)
    }

    async fn delete_project(&self, id: Uuid) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            DELETE FROM projects
            WHERE id = $1
            RETURNING id, client_id, name, description, status
            "#,
        )
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?;

        Ok(project)
    }
}
