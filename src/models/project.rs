use uuid::Uuid;

/// A project row. `status` holds the label text as stored; the API layer
/// is what restricts it to [`ProjectStatus`](super::ProjectStatus) values.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub description: String,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub client_id: Uuid,
    pub name: String,
    pub description: String,
    pub status: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub client_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl Project {
    pub fn new(id: Uuid, fields: NewProject) -> Self {
        Self {
            id,
            client_id: fields.client_id,
            name: fields.name,
            description: fields.description,
            status: fields.status,
        }
    }

    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(client_id) = patch.client_id {
            self.client_id = client_id;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}
