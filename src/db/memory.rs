use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::EntityStore;
use crate::error::Result;
use crate::models::{Client, ClientPatch, NewClient, NewProject, Project, ProjectPatch};

/// In-process store, selected with a `memory://` database URL.
#[derive(Default)]
pub struct MemoryStore {
    clients: RwLock<HashMap<Uuid, Client>>,
    projects: RwLock<HashMap<Uuid, Project>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_clients(mut clients: Vec<Client>) -> Vec<Client> {
    clients.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
    clients
}

fn sort_projects(mut projects: Vec<Project>) -> Vec<Project> {
    projects.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
    projects
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn get_clients(&self) -> Result<Vec<Client>> {
        let clients = self.clients.read().await.values().cloned().collect();
        Ok(sort_clients(clients))
    }

    async fn get_client(&self, id: Uuid) -> Result<Option<Client>> {
        Ok(self.clients.read().await.get(&id).cloned())
    }

    async fn create_client(&self, client: NewClient) -> Result<Client> {
        let client = Client::new(Uuid::new_v4(), client);
        self.clients.write().await.insert(client.id, client.clone());
        Ok(client)
    }

    async fn update_client(&self, id: Uuid, patch: ClientPatch) -> Result<Option<Client>> {
        let mut clients = self.clients.write().await;
        Ok(clients.get_mut(&id).map(|client| {
            client.apply(patch);
            client.clone()
        }))
    }

    async fn delete_client(&self, id: Uuid) -> Result<Option<Client>> {
        Ok(self.clients.write().await.remove(&id))
    }

    async fn get_projects(&self) -> Result<Vec<Project>> {
        let projects = self.projects.read().await.values().cloned().collect();
        Ok(sort_projects(projects))
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
        Ok(self.projects.read().await.get(&id).cloned())
    }

    async fn get_projects_by_client(&self, client_id: Uuid) -> Result<Vec<Project>> {
        let projects = self
            .projects
            .read()
            .await
            .values()
            .filter(|p| p.client_id == client_id)
            .cloned()
            .collect();
        Ok(sort_projects(projects))
    }

    async fn create_project(&self, project: NewProject) -> Result<Project> {
        let project = Project::new(Uuid::new_v4(), project);
        self.projects.write().await.insert(project.id, project.clone());
        Ok(project)
    }

    async fn update_project(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>> {
        let mut projects = self.projects.write().await;
        Ok(projects.get_mut(&id).map(|project| {
            project.apply(patch);
            project.clone()
        }))
    }

    async fn delete_project(&self, id: Uuid) -> Result<Option<Project>> {
        Ok(self.projects.write().await.remove(&id))
    }
}
