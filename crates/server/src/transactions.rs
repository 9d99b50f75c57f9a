//! Transactions API endpoints

use api_types::{
    status::Message,
    transaction::{
        TransactionCreated, TransactionList, TransactionListResponse, TransactionNew,
        TransactionUpdate, TransactionView,
    },
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use engine::{MoneyCents, NewTransactionCmd, UpdateTransactionCmd};
use uuid::Uuid;

use crate::{
    ServerError,
    filters::{RawFilter, engine_type, map_transaction},
    server::ServerState,
    user,
};

const DEFAULT_PAGE_SIZE: u64 = 50;
const MAX_PAGE_SIZE: u64 = 500;

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<TransactionList>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let cursor = query.cursor.filter(|c| !c.trim().is_empty());
    let filter = RawFilter {
        kind: query.kind,
        bank: query.bank,
        category: query.category,
        start_date: query.start_date,
        end_date: query.end_date,
    }
    .into_engine()?;

    let (txs, next_cursor) = state
        .engine
        .list_transactions_page(&user.username, &filter, limit, cursor.as_deref())
        .await?;

    Ok(Json(TransactionListResponse {
        transactions: txs.into_iter().map(map_transaction).collect(),
        next_cursor,
    }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionCreated>), ServerError> {
    let cmd = NewTransactionCmd::new(
        user.username.as_str(),
        engine_type(payload.kind),
        MoneyCents::new(payload.amount_minor),
        payload.category,
        payload.bank_cash,
    )
    .remark(payload.remark)
    .occurred_at(
        payload
            .date
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(Utc::now),
    );

    let tx = state.engine.create_transaction(cmd).await?;
    tracing::debug!("user {} recorded transaction {}", user.username, tx.id);

    Ok((
        StatusCode::CREATED,
        Json(TransactionCreated {
            message: "Transaction added successfully".to_string(),
            transaction: map_transaction(tx),
        }),
    ))
}

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state.engine.transaction(&user.username, id).await?;
    Ok(Json(map_transaction(tx)))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionUpdate>,
) -> Result<Json<TransactionView>, ServerError> {
    let mut cmd = UpdateTransactionCmd::new(user.username.as_str(), id);
    if let Some(kind) = payload.kind {
        cmd = cmd.kind(engine_type(kind));
    }
    if let Some(amount_minor) = payload.amount_minor {
        cmd = cmd.amount(MoneyCents::new(amount_minor));
    }
    if let Some(category) = payload.category {
        cmd = cmd.category(category);
    }
    if let Some(remark) = payload.remark {
        cmd = cmd.remark(remark);
    }
    if let Some(bank_cash) = payload.bank_cash {
        cmd = cmd.bank_cash(bank_cash);
    }
    if let Some(date) = payload.date {
        cmd = cmd.occurred_at(date.with_timezone(&Utc));
    }

    let tx = state.engine.update_transaction(cmd).await?;
    tracing::debug!("user {} updated transaction {}", user.username, tx.id);
    Ok(Json(map_transaction(tx)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_transaction(&user.username, id).await?;
    tracing::debug!("user {} deleted transaction {}", user.username, id);
    Ok(Json(Message {
        message: "Transaction deleted successfully".to_string(),
    }))
}
