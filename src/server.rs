//! HTTP endpoint serving the schema at `/graphql`.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::Result;
use crate::schema::AppSchema;

pub const GRAPHQL_PATH: &str = "/graphql";

/// Build the router. GraphiQL is mounted on `GET` only when `graphiql` is set.
pub fn router(schema: AppSchema, graphiql: bool) -> Router {
    let mut route = post(graphql_handler);
    if graphiql {
        route = route.get(graphiql_handler);
    }

    Router::new().route(GRAPHQL_PATH, route).with_state(schema)
}

async fn graphql_handler(State(schema): State<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql_handler() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

/// Bind the configured port and serve until the process is killed
pub async fn serve(config: &Config, schema: AppSchema) -> Result<()> {
    let port = config.port()?;
    let app = router(schema, config.graphiql_enabled());

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(
        port,
        graphiql = config.graphiql_enabled(),
        "GraphQL server up and running"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
