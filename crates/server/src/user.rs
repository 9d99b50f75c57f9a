//! The module contains the definition of a user and the login endpoint.

use api_types::user::{Login, LoginResponse};
use axum::{Json, extract::State};
use sea_orm::entity::prelude::*;

use crate::{ServerError, server::ServerState};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Look up a user whose username and password both match exactly.
pub(crate) async fn find_by_credentials(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<Option<Model>, DbErr> {
    if username.is_empty() || password.is_empty() {
        return Ok(None);
    }

    Entity::find_by_id(username.to_string())
        .filter(Column::Password.eq(password))
        .one(db)
        .await
}

/// Check credentials without opening a session.
///
/// Clients keep sending the same credentials as HTTP Basic auth afterwards.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<Login>,
) -> Result<Json<LoginResponse>, ServerError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(ServerError::Generic(
            "username and password required".to_string(),
        ));
    }

    let user = find_by_credentials(&state.db, &payload.username, &payload.password)
        .await
        .map_err(|err| ServerError::Engine(err.into()))?
        .ok_or(ServerError::Unauthorized)?;

    tracing::info!("user {} logged in", user.username);
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        username: user.username,
    }))
}
