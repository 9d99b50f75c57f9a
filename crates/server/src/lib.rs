use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{app, run_with_listener};

mod filters;
mod lookups;
mod reports;
mod server;
mod transactions;
mod user;

pub mod types {
    pub mod transaction {
        pub use api_types::transaction::{
            TransactionCreated, TransactionFilter, TransactionList, TransactionListResponse,
            TransactionNew, TransactionType, TransactionUpdate, TransactionView,
        };
    }

    pub mod dashboard {
        pub use api_types::dashboard::{
            CategoryAmount, DashboardResponse, DashboardSummary, PersonAmount,
        };
    }

    pub mod summary {
        pub use api_types::summary::{BankBalance, CategoryFlow, SummaryResponse};
    }

    pub mod user {
        pub use api_types::user::{Login, LoginResponse};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Unauthorized,
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidCursor(_) => StatusCode::BAD_REQUEST,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidName(_)
        | EngineError::InvalidRange(_)
        | EngineError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "invalid credentials".to_string())
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        for err in [
            EngineError::InvalidAmount("x".to_string()),
            EngineError::InvalidName("x".to_string()),
            EngineError::InvalidRange("x".to_string()),
            EngineError::InvalidInput("x".to_string()),
        ] {
            let res = ServerError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn bad_cursor_maps_to_400() {
        let res = ServerError::from(EngineError::InvalidCursor("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_error_maps_to_500() {
        let err = EngineError::Database(sea_orm::DbErr::Custom("boom".to_string()));
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let res = ServerError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
