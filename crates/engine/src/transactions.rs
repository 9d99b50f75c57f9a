//! Transaction primitives.
//!
//! A `Transaction` is a single cash movement, either money coming in (`IN`)
//! or going out (`OUT`), tagged with a category, the bank/cash account it
//! touched and a free-text remark.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, MoneyCents, ResultEngine,
    util::{normalize_required_label, normalize_text, parse_uuid, validate_amount},
};

/// Direction of a cash movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    In,
    Out,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }
}

impl TryFrom<&str> for TransactionType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            other => Err(EngineError::InvalidInput(format!(
                "invalid transaction type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: String,
    pub kind: TransactionType,
    /// Never negative; `kind` carries the direction.
    pub amount: MoneyCents,
    pub category: String,
    pub remark: String,
    pub bank_cash: String,
    pub occurred_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Builds a validated transaction.
    ///
    /// `category` and `bank_cash` are trimmed and must not be empty; `remark`
    /// is trimmed and may be empty.
    pub fn new(
        user_id: impl Into<String>,
        kind: TransactionType,
        amount: MoneyCents,
        category: &str,
        remark: &str,
        bank_cash: &str,
        occurred_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            kind,
            amount: validate_amount(amount)?,
            category: normalize_required_label(category, "category")?,
            remark: normalize_text(remark),
            bank_cash: normalize_required_label(bank_cash, "bank_cash")?,
            occurred_at,
            created_at: Utc::now(),
        })
    }

    /// Contribution of this transaction to a net bucket: `OUT` adds, `IN`
    /// subtracts.
    #[must_use]
    pub fn net_amount(&self) -> MoneyCents {
        match self.kind {
            TransactionType::Out => self.amount,
            TransactionType::In => -self.amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub amount_minor: i64,
    pub category: String,
    pub remark: String,
    pub bank_cash: String,
    pub occurred_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            user_id: ActiveValue::Set(tx.user_id.clone()),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            amount_minor: ActiveValue::Set(tx.amount.cents()),
            category: ActiveValue::Set(tx.category.clone()),
            remark: ActiveValue::Set(tx.remark.clone()),
            bank_cash: ActiveValue::Set(tx.bank_cash.clone()),
            occurred_at: ActiveValue::Set(tx.occurred_at),
            created_at: ActiveValue::Set(tx.created_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "transaction")?,
            user_id: model.user_id,
            kind: TransactionType::try_from(model.kind.as_str())?,
            amount: validate_amount(MoneyCents::new(model.amount_minor))?,
            category: model.category,
            remark: model.remark,
            bank_cash: model.bank_cash,
            occurred_at: model.occurred_at,
            created_at: model.created_at,
        })
    }
}
