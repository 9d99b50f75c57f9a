use api_types::status::Health;
use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::DatabaseConnection;

use std::sync::Arc;

use crate::{lookups, reports, transactions, user};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
}

/// Resolve HTTP Basic credentials to a stored user.
///
/// On success the `user::Model` is attached to the request extensions for the
/// handlers.
async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(credentials)) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    let user = user::find_by_credentials(&state.db, credentials.username(), credentials.password())
        .await
        .map_err(|err| {
            tracing::error!("failed to look up user: {err}");
            StatusCode::UNAUTHORIZED
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

async fn health() -> Json<Health> {
    Json(Health {
        message: "Cash Book API is running!".to_string(),
        status: "OK".to_string(),
    })
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/{id}",
            get(transactions::get)
                .put(transactions::update)
                .patch(transactions::update)
                .delete(transactions::delete),
        )
        .route("/summary", get(reports::summary))
        .route("/dashboard", get(reports::dashboard))
        .route("/categories", get(lookups::categories))
        .route("/banks", get(lookups::banks))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .route("/", get(health))
        .route("/login", post(user::login))
        .with_state(state)
}

/// Build the application router over an engine and the users database.
pub fn app(engine: Engine, db: DatabaseConnection) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
        db,
    })
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine, db)).await
}
