//! End-to-end schema tests against the in-memory store.

use std::sync::Arc;

use async_graphql::{Response, ServerError};
use async_trait::async_trait;
use serde_json::{json, Value};
use uuid::Uuid;

use project_tracker::db::{EntityStore, MemoryStore, Store};
use project_tracker::models::{Client, ClientPatch, NewClient, NewProject, Project, ProjectPatch};
use project_tracker::schema::{self, AppSchema};
use project_tracker::{ApiError, Result};

fn new_schema() -> AppSchema {
    let store: Store = Arc::new(MemoryStore::new());
    schema::build(store)
}

async fn run(schema: &AppSchema, query: &str) -> Response {
    schema.execute(query).await
}

async fn data(schema: &AppSchema, query: &str) -> Value {
    let res = run(schema, query).await;
    assert!(res.errors.is_empty(), "unexpected errors: {:?}", res.errors);
    res.data.into_json().unwrap()
}

fn error_code(err: &ServerError) -> Option<Value> {
    err.extensions
        .as_ref()
        .and_then(|ext| ext.get("code"))
        .cloned()
        .map(|code| code.into_json().unwrap())
}

fn error_path(err: &ServerError) -> Value {
    serde_json::to_value(&err.path).unwrap()
}

/// Memory store whose client lookups fail as if the database were unreachable.
struct UnreachableClients(MemoryStore);

#[async_trait]
impl EntityStore for UnreachableClients {
    async fn get_clients(&self) -> Result<Vec<Client>> {
        self.0.get_clients().await
    }

    async fn get_client(&self, _id: Uuid) -> Result<Option<Client>> {
        Err(ApiError::Store(sqlx::Error::PoolTimedOut))
    }

    async fn create_client(&self, client: NewClient) -> Result<Client> {
        self.0.create_client(client).await
    }

    async fn update_client(&self, id: Uuid, patch: ClientPatch) -> Result<Option<Client>> {
        self.0.update_client(id, patch).await
    }

    async fn delete_client(&self, id: Uuid) -> Result<Option<Client>> {
        self.0.delete_client(id).await
    }

    async fn get_projects(&self) -> Result<Vec<Project>> {
        self.0.get_projects().await
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
        self.0.get_project(id).await
    }

    async fn get_projects_by_client(&self, client_id: Uuid) -> Result<Vec<Project>> {
        self.0.get_projects_by_client(client_id).await
    }

    async fn create_project(&self, project: NewProject) -> Result<Project> {
        self.0.create_project(project).await
    }

    async fn update_project(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>> {
        self.0.update_project(id, patch).await
    }

    async fn delete_project(&self, id: Uuid) -> Result<Option<Project>> {
        self.0.delete_project(id).await
    }
}

async fn add_acme(schema: &AppSchema) -> String {
    let out = data(
        schema,
        r#"mutation { addClient(name: "Acme", email: "a@a.com", phone: "555") { id } }"#,
    )
    .await;
    out["addClient"]["id"].as_str().unwrap().to_string()
}

async fn add_site(schema: &AppSchema, client_id: &str) -> String {
    let out = data(
        schema,
        &format!(
            r#"mutation {{ addProject(name: "Site", description: "Marketing site", clientId: "{client_id}") {{ id }} }}"#
        ),
    )
    .await;
    out["addProject"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_created_client_reads_back_exactly() {
    let schema = new_schema();
    let id = add_acme(&schema).await;

    let out = data(
        &schema,
        &format!(r#"{{ client(id: "{id}") {{ id name email phone }} }}"#),
    )
    .await;

    assert_eq!(
        out,
        json!({ "client": { "id": id, "name": "Acme", "email": "a@a.com", "phone": "555" } })
    );
}

#[tokio::test]
async fn test_client_projects_scenario() {
    let schema = new_schema();
    let client_id = add_acme(&schema).await;

    let out = data(
        &schema,
        &format!(
            r#"mutation {{ addProject(name: "Site", description: "...", clientId: "{client_id}") {{ status clientId }} }}"#
        ),
    )
    .await;
    assert_eq!(out["addProject"]["status"], "Not Started");
    assert_eq!(out["addProject"]["clientId"], client_id.as_str());

    let out = data(
        &schema,
        &format!(r#"{{ client(id: "{client_id}") {{ projects {{ name }} }} }}"#),
    )
    .await;
    assert_eq!(out, json!({ "client": { "projects": [{ "name": "Site" }] } }));
}

#[tokio::test]
async fn test_add_project_with_explicit_status() {
    let schema = new_schema();
    let client_id = add_acme(&schema).await;

    let out = data(
        &schema,
        &format!(
            r#"mutation {{ addProject(name: "App", description: "Mobile", status: progress, clientId: "{client_id}") {{ status }} }}"#
        ),
    )
    .await;
    assert_eq!(out["addProject"]["status"], "In Progress");
}

#[tokio::test]
async fn test_explicit_null_status_uses_default() {
    let schema = new_schema();
    let client_id = add_acme(&schema).await;

    let out = data(
        &schema,
        &format!(
            r#"mutation {{ addProject(name: "App", description: "Mobile", status: null, clientId: "{client_id}") {{ status }} }}"#
        ),
    )
    .await;
    assert_eq!(out["addProject"]["status"], "Not Started");
}

#[tokio::test]
async fn test_status_outside_enumeration_is_rejected() {
    let schema = new_schema();
    let client_id = add_acme(&schema).await;

    let res = run(
        &schema,
        &format!(
            r#"mutation {{ addProject(name: "App", description: "Mobile", status: archived, clientId: "{client_id}") {{ id }} }}"#
        ),
    )
    .await;
    assert!(!res.errors.is_empty());

    let out = data(&schema, "{ projects { id } }").await;
    assert_eq!(out, json!({ "projects": [] }));
}

#[tokio::test]
async fn test_status_label_is_not_an_enum_value() {
    let schema = new_schema();
    let client_id = add_acme(&schema).await;

    let res = run(
        &schema,
        &format!(
            r#"mutation {{ addProject(name: "App", description: "Mobile", status: "Completed", clientId: "{client_id}") {{ id }} }}"#
        ),
    )
    .await;
    assert!(!res.errors.is_empty());
}

#[tokio::test]
async fn test_update_status_only_leaves_other_fields() {
    let schema = new_schema();
    let client_id = add_acme(&schema).await;
    let project_id = add_site(&schema, &client_id).await;

    let out = data(
        &schema,
        &format!(
            r#"mutation {{ updateProject(id: "{project_id}", status: completed) {{ name description status clientId }} }}"#
        ),
    )
    .await;

    assert_eq!(
        out,
        json!({
            "updateProject": {
                "name": "Site",
                "description": "Marketing site",
                "status": "Completed",
                "clientId": client_id,
            }
        })
    );
}

#[tokio::test]
async fn test_update_project_can_move_to_other_client() {
    let schema = new_schema();
    let first = add_acme(&schema).await;
    let second = add_acme(&schema).await;
    let project_id = add_site(&schema, &first).await;

    let out = data(
        &schema,
        &format!(
            r#"mutation {{ updateProject(id: "{project_id}", clientId: "{second}") {{ client {{ id }} }} }}"#
        ),
    )
    .await;
    assert_eq!(out["updateProject"]["client"]["id"], second.as_str());

    let out = data(
        &schema,
        &format!(r#"{{ client(id: "{first}") {{ projects {{ id }} }} }}"#),
    )
    .await;
    assert_eq!(out, json!({ "client": { "projects": [] } }));
}

#[tokio::test]
async fn test_update_missing_project_is_null() {
    let schema = new_schema();
    let out = data(
        &schema,
        r#"mutation { updateProject(id: "7f1b6b8e-4d0c-4d7e-9a59-0c3a1d2e4f50", name: "x") { id } }"#,
    )
    .await;
    assert_eq!(out, json!({ "updateProject": null }));
}

#[tokio::test]
async fn test_update_client_merges_fields() {
    let schema = new_schema();
    let id = add_acme(&schema).await;

    let out = data(
        &schema,
        &format!(r#"mutation {{ updateClient(id: "{id}", phone: "556") {{ name email phone }} }}"#),
    )
    .await;
    assert_eq!(
        out,
        json!({ "updateClient": { "name": "Acme", "email": "a@a.com", "phone": "556" } })
    );
}

#[tokio::test]
async fn test_delete_client_does_not_cascade() {
    let schema = new_schema();
    let client_id = add_acme(&schema).await;
    let project_id = add_site(&schema, &client_id).await;

    let out = data(
        &schema,
        &format!(r#"mutation {{ deleteClient(id: "{client_id}") {{ name }} }}"#),
    )
    .await;
    assert_eq!(out, json!({ "deleteClient": { "name": "Acme" } }));

    let out = data(
        &schema,
        &format!(r#"{{ project(id: "{project_id}") {{ name clientId client {{ id }} }} }}"#),
    )
    .await;
    assert_eq!(
        out,
        json!({ "project": { "name": "Site", "clientId": client_id, "client": null } })
    );

    let out = data(&schema, "{ clients { id } projects { id } }").await;
    assert_eq!(out["clients"], json!([]));
    assert_eq!(out["projects"], json!([{ "id": project_id }]));
}

#[tokio::test]
async fn test_clients_projects_client_round_trip() {
    let schema = new_schema();
    let acme = add_acme(&schema).await;
    add_site(&schema, &acme).await;
    add_site(&schema, &acme).await;
    let other = add_acme(&schema).await;
    add_site(&schema, &other).await;

    let out = data(&schema, "{ clients { id projects { client { id } } } }").await;
    let clients = out["clients"].as_array().unwrap();
    assert_eq!(clients.len(), 2);

    for client in clients {
        for project in client["projects"].as_array().unwrap() {
            assert_eq!(project["client"]["id"], client["id"]);
        }
    }
}

#[tokio::test]
async fn test_delete_missing_project_is_null_without_error() {
    let schema = new_schema();

    let res = run(
        &schema,
        r#"mutation { deleteProject(id: "7f1b6b8e-4d0c-4d7e-9a59-0c3a1d2e4f50") { id } }"#,
    )
    .await;
    assert!(res.errors.is_empty());
    assert_eq!(res.data.into_json().unwrap(), json!({ "deleteProject": null }));

    let out = data(&schema, r#"mutation { deleteProject(id: "not-an-id") { id } }"#).await;
    assert_eq!(out, json!({ "deleteProject": null }));
}

#[tokio::test]
async fn test_delete_project_returns_removed_record() {
    let schema = new_schema();
    let client_id = add_acme(&schema).await;
    let project_id = add_site(&schema, &client_id).await;

    let out = data(
        &schema,
        &format!(r#"mutation {{ deleteProject(id: "{project_id}") {{ id name }} }}"#),
    )
    .await;
    assert_eq!(out, json!({ "deleteProject": { "id": project_id, "name": "Site" } }));

    let out = data(&schema, &format!(r#"{{ project(id: "{project_id}") {{ id }} }}"#)).await;
    assert_eq!(out, json!({ "project": null }));
}

#[tokio::test]
async fn test_add_client_missing_email_is_rejected() {
    let schema = new_schema();

    let res = run(&schema, r#"mutation { addClient(name: "Acme", phone: "555") { id } }"#).await;
    assert_eq!(res.errors.len(), 1);
    assert!(res.errors[0].message.contains("email"));

    let out = data(&schema, "{ clients { id } }").await;
    assert_eq!(out, json!({ "clients": [] }));
}

#[tokio::test]
async fn test_malformed_client_reference_is_validation_error() {
    let schema = new_schema();

    let res = run(
        &schema,
        r#"mutation { addProject(name: "Site", description: "...", clientId: "42") { id } }"#,
    )
    .await;
    assert_eq!(res.errors.len(), 1);

    let err = &res.errors[0];
    assert_eq!(error_code(err), Some(json!("VALIDATION_ERROR")));
    assert_eq!(error_path(err), json!(["addProject"]));

    let out = data(&schema, "{ projects { id } }").await;
    assert_eq!(out, json!({ "projects": [] }));
}

#[tokio::test]
async fn test_field_error_leaves_siblings_resolved() {
    let schema = new_schema();
    let client_id = add_acme(&schema).await;
    let project_id = add_site(&schema, &client_id).await;

    let res = run(
        &schema,
        &format!(
            r#"mutation {{
                ok: updateProject(id: "{project_id}", name: "Renamed") {{ name }}
                bad: updateProject(id: "{project_id}", clientId: "nope") {{ name }}
            }}"#
        ),
    )
    .await;
    assert_eq!(res.errors.len(), 1);
    assert_eq!(error_path(&res.errors[0]), json!(["bad"]));

    let out = res.data.into_json().unwrap();
    assert_eq!(out["ok"], json!({ "name": "Renamed" }));
    assert!(out.get("bad").is_none_or(Value::is_null));
}

#[tokio::test]
async fn test_store_failure_is_field_error() {
    let store: Store = Arc::new(UnreachableClients(MemoryStore::new()));
    let schema = schema::build(store);
    let client_id = add_acme(&schema).await;
    add_site(&schema, &client_id).await;

    let res = run(
        &schema,
        &format!(r#"{{ a: client(id: "{client_id}") {{ id }} b: projects {{ name }} }}"#),
    )
    .await;

    assert_eq!(res.errors.len(), 1);
    let err = &res.errors[0];
    assert_eq!(error_path(err), json!(["a"]));
    assert_eq!(error_code(err), Some(json!("STORE_ERROR")));
    assert!(err.message.starts_with("Store error"));

    let out = res.data.into_json().unwrap();
    assert!(out.get("a").is_none_or(Value::is_null));
    assert_eq!(out["b"], json!([{ "name": "Site" }]));
}

#[tokio::test]
async fn test_failed_nested_client_keeps_project() {
    let store: Store = Arc::new(UnreachableClients(MemoryStore::new()));
    let schema = schema::build(store);
    let client_id = add_acme(&schema).await;
    let project_id = add_site(&schema, &client_id).await;

    let res = run(
        &schema,
        &format!(r#"{{ project(id: "{project_id}") {{ name client {{ id }} }} }}"#),
    )
    .await;

    assert_eq!(res.errors.len(), 1);
    assert_eq!(error_path(&res.errors[0]), json!(["project", "client"]));
    assert_eq!(error_code(&res.errors[0]), Some(json!("STORE_ERROR")));

    let out = res.data.into_json().unwrap();
    assert_eq!(out["project"]["name"], "Site");
    assert!(out["project"].get("client").is_none_or(Value::is_null));
}
