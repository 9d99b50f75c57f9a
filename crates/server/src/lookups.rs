//! Distinct labels used to populate client-side filter pickers.

use api_types::lookup::{BankListResponse, CategoryListResponse};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, server::ServerState, user};

pub async fn categories(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<CategoryListResponse>, ServerError> {
    let categories = state.engine.categories(&user.username).await?;
    Ok(Json(CategoryListResponse { categories }))
}

pub async fn banks(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<BankListResponse>, ServerError> {
    let banks = state.engine.banks(&user.username).await?;
    Ok(Json(BankListResponse { banks }))
}
