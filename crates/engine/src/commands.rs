//! Command structs for engine operations.
//!
//! These types group parameters for write operations (create/update),
//! keeping call sites readable and avoiding long argument lists.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{MoneyCents, TransactionType};

/// Record a new transaction.
#[derive(Clone, Debug)]
pub struct NewTransactionCmd {
    pub user_id: String,
    pub kind: TransactionType,
    pub amount: MoneyCents,
    pub category: String,
    pub remark: String,
    pub bank_cash: String,
    /// Defaults to the time of insertion.
    pub occurred_at: Option<DateTime<Utc>>,
}

impl NewTransactionCmd {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        kind: TransactionType,
        amount: MoneyCents,
        category: impl Into<String>,
        bank_cash: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            kind,
            amount,
            category: category.into(),
            remark: String::new(),
            bank_cash: bank_cash.into(),
            occurred_at: None,
        }
    }

    #[must_use]
    pub fn remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = remark.into();
        self
    }

    #[must_use]
    pub fn occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }
}

/// Update an existing transaction. `None` fields are left untouched.
#[derive(Clone, Debug)]
pub struct UpdateTransactionCmd {
    pub user_id: String,
    pub transaction_id: Uuid,
    pub kind: Option<TransactionType>,
    pub amount: Option<MoneyCents>,
    pub category: Option<String>,
    pub remark: Option<String>,
    pub bank_cash: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
}

impl UpdateTransactionCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, transaction_id: Uuid) -> Self {
        Self {
            user_id: user_id.into(),
            transaction_id,
            kind: None,
            amount: None,
            category: None,
            remark: None,
            bank_cash: None,
            occurred_at: None,
        }
    }

    #[must_use]
    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: MoneyCents) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    #[must_use]
    pub fn bank_cash(mut self, bank_cash: impl Into<String>) -> Self {
        self.bank_cash = Some(bank_cash.into());
        self
    }

    #[must_use]
    pub fn occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.remark.is_none()
            && self.bank_cash.is_none()
            && self.occurred_at.is_none()
    }
}
