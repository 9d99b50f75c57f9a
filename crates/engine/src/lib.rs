//! Cash-book engine.
//!
//! Stores a user's income/expense transactions and turns them into the
//! figures shown on the dashboard: a plain cash summary and the bucketed
//! expense/asset/lending breakdown.

pub use commands::{NewTransactionCmd, UpdateTransactionCmd};
pub use dashboard::{
    ASSET_KEYWORDS, Bucket, ChartEntry, Dashboard, DashboardSummary, LENDING_KEYWORDS,
    UNKNOWN_COUNTERPARTY, classify,
};
pub use error::EngineError;
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder, TransactionFilter};
pub use summary::{AccountBalance, CashSummary, CategoryFlow};
pub use transactions::{Transaction, TransactionType};
pub use util::{MAX_AMOUNT, normalize_text};

mod commands;
mod dashboard;
mod error;
mod money;
mod ops;
mod summary;
mod transactions;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
