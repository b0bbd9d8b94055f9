//! GraphQL schema: output types, the query root and the mutation root.
//!
//! Resolvers get the store through the schema's context data, so the same
//! schema runs against PostgreSQL or the memory store.

mod mutation;
mod query;
mod types;

use async_graphql::extensions::Tracing;
use async_graphql::{EmptySubscription, ErrorExtensions, ID, Schema};
use uuid::Uuid;

use crate::db::Store;
use crate::error::ApiError;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema around a store handle
pub fn build(store: Store) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .extension(Tracing)
        .finish()
}

/// Schema definition language for the API, without any store attached
pub fn sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

/// Key lookups: an id that is not a UUID cannot match any record.
fn lookup_key(id: &ID) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

/// References that get persisted must be well formed.
fn reference_key(field: &str, id: &ID) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id)
        .map_err(|_| ApiError::Validation(format!("{field} \"{}\" is not a valid id", id.as_str())))
}

fn field_error(err: ApiError) -> async_graphql::Error {
    if let ApiError::Store(source) = &err {
        tracing::error!(error = %source, "store call failed");
    }
    err.extend()
}
