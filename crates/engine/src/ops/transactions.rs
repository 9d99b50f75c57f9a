use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::{
    ActiveValue, Condition, DatabaseTransaction, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait, prelude::*,
};

use crate::{
    EngineError, NewTransactionCmd, ResultEngine, Transaction, TransactionType,
    UpdateTransactionCmd, transactions,
    util::{normalize_required_label, normalize_text, validate_amount},
};

use super::{Engine, with_tx};

/// Filters shared by listing, summary and dashboard.
///
/// `from` is inclusive and `to` is exclusive (`[from, to)`), both in UTC.
/// `bank` and `category` match the stored label exactly, after the same
/// trimming and NFC normalization applied on write.
#[derive(Clone, Debug, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionType>,
    pub bank: Option<String>,
    pub category: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

fn validate_filter(filter: &TransactionFilter) -> ResultEngine<()> {
    if let (Some(from), Some(to)) = (filter.from, filter.to)
        && from >= to
    {
        return Err(EngineError::InvalidRange(
            "from must be < to".to_string(),
        ));
    }
    Ok(())
}

trait ApplyTxFilters: QueryFilter + Sized {
    fn apply_tx_filters(self, user_id: &str, filter: &TransactionFilter) -> Self;
}

impl<T> ApplyTxFilters for T
where
    T: QueryFilter + Sized,
{
    fn apply_tx_filters(mut self, user_id: &str, filter: &TransactionFilter) -> Self {
        self = self.filter(transactions::Column::UserId.eq(user_id));

        if let Some(kind) = filter.kind {
            self = self.filter(transactions::Column::Kind.eq(kind.as_str()));
        }
        if let Some(bank) = &filter.bank {
            self = self.filter(transactions::Column::BankCash.eq(normalize_text(bank)));
        }
        if let Some(category) = &filter.category {
            self = self.filter(transactions::Column::Category.eq(normalize_text(category)));
        }
        if let Some(from) = filter.from {
            self = self.filter(transactions::Column::OccurredAt.gte(from));
        }
        if let Some(to) = filter.to {
            self = self.filter(transactions::Column::OccurredAt.lt(to));
        }

        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct TransactionsCursor {
    occurred_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    transaction_id: String,
}

impl TransactionsCursor {
    fn encode(&self) -> ResultEngine<String> {
        let bytes = serde_json::to_vec(self)
            .map_err(|_| EngineError::InvalidCursor("unencodable cursor".to_string()))?;
        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
    }

    fn decode(input: &str) -> ResultEngine<Self> {
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(input.as_bytes())
            .map_err(|_| EngineError::InvalidCursor("cursor is not base64".to_string()))?;
        serde_json::from_slice(&bytes)
            .map_err(|_| EngineError::InvalidCursor("malformed cursor".to_string()))
    }

    /// Rows strictly older than the cursor in `(occurred_at, created_at, id)`
    /// order.
    fn older_than(&self) -> Condition {
        Condition::any()
            .add(transactions::Column::OccurredAt.lt(self.occurred_at))
            .add(
                Condition::all()
                    .add(transactions::Column::OccurredAt.eq(self.occurred_at))
                    .add(transactions::Column::CreatedAt.lt(self.created_at)),
            )
            .add(
                Condition::all()
                    .add(transactions::Column::OccurredAt.eq(self.occurred_at))
                    .add(transactions::Column::CreatedAt.eq(self.created_at))
                    .add(transactions::Column::Id.lt(self.transaction_id.as_str())),
            )
    }
}

impl Engine {
    async fn require_transaction(
        db_tx: &DatabaseTransaction,
        user_id: &str,
        transaction_id: Uuid,
    ) -> ResultEngine<transactions::Model> {
        transactions::Entity::find_by_id(transaction_id.to_string())
            .filter(transactions::Column::UserId.eq(user_id))
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))
    }

    /// Records a new transaction for `cmd.user_id`.
    pub async fn create_transaction(&self, cmd: NewTransactionCmd) -> ResultEngine<Transaction> {
        let tx = Transaction::new(
            cmd.user_id,
            cmd.kind,
            cmd.amount,
            &cmd.category,
            &cmd.remark,
            &cmd.bank_cash,
            cmd.occurred_at.unwrap_or_else(Utc::now),
        )?;

        with_tx!(self, |db_tx| {
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            Ok(tx)
        })
    }

    /// Returns a single transaction owned by `user_id`.
    pub async fn transaction(&self, user_id: &str, transaction_id: Uuid) -> ResultEngine<Transaction> {
        with_tx!(self, |db_tx| {
            let model = Self::require_transaction(&db_tx, user_id, transaction_id).await?;
            Transaction::try_from(model)
        })
    }

    /// Applies a partial update and returns the stored result.
    ///
    /// The same validation as creation applies to every provided field.
    pub async fn update_transaction(&self, cmd: UpdateTransactionCmd) -> ResultEngine<Transaction> {
        if cmd.is_empty() {
            return Err(EngineError::InvalidInput(
                "provide at least one field to update".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let model =
                Self::require_transaction(&db_tx, &cmd.user_id, cmd.transaction_id).await?;
            let mut tx = Transaction::try_from(model)?;

            if let Some(kind) = cmd.kind {
                tx.kind = kind;
            }
            if let Some(amount) = cmd.amount {
                tx.amount = validate_amount(amount)?;
            }
            if let Some(category) = cmd.category.as_deref() {
                tx.category = normalize_required_label(category, "category")?;
            }
            if let Some(remark) = cmd.remark.as_deref() {
                tx.remark = normalize_text(remark);
            }
            if let Some(bank_cash) = cmd.bank_cash.as_deref() {
                tx.bank_cash = normalize_required_label(bank_cash, "bank_cash")?;
            }
            if let Some(occurred_at) = cmd.occurred_at {
                tx.occurred_at = occurred_at;
            }

            let active = transactions::ActiveModel {
                id: ActiveValue::Unchanged(tx.id.to_string()),
                kind: ActiveValue::Set(tx.kind.as_str().to_string()),
                amount_minor: ActiveValue::Set(tx.amount.cents()),
                category: ActiveValue::Set(tx.category.clone()),
                remark: ActiveValue::Set(tx.remark.clone()),
                bank_cash: ActiveValue::Set(tx.bank_cash.clone()),
                occurred_at: ActiveValue::Set(tx.occurred_at),
                ..Default::default()
            };
            active.update(&db_tx).await?;
            Ok(tx)
        })
    }

    /// Deletes a transaction owned by `user_id`.
    pub async fn delete_transaction(&self, user_id: &str, transaction_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let result = transactions::Entity::delete_many()
                .filter(transactions::Column::Id.eq(transaction_id.to_string()))
                .filter(transactions::Column::UserId.eq(user_id))
                .exec(&db_tx)
                .await?;
            if result.rows_affected == 0 {
                return Err(EngineError::KeyNotFound(
                    "transaction not exists".to_string(),
                ));
            }
            Ok(())
        })
    }

    /// Returns every matching transaction in chronological order
    /// (`occurred_at`, then insertion time).
    ///
    /// This is the sequence the summaries aggregate over, so its order fixes
    /// the order of chart entries.
    pub async fn transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> ResultEngine<Vec<Transaction>> {
        validate_filter(filter)?;

        with_tx!(self, |db_tx| {
            let rows: Vec<transactions::Model> = transactions::Entity::find()
                .apply_tx_filters(user_id, filter)
                .order_by_asc(transactions::Column::OccurredAt)
                .order_by_asc(transactions::Column::CreatedAt)
                .order_by_asc(transactions::Column::Id)
                .all(&db_tx)
                .await?;

            rows.into_iter()
                .map(Transaction::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    /// Lists transactions with cursor-based pagination.
    ///
    /// Pagination is newest → older by `(occurred_at DESC, created_at DESC,
    /// id DESC)`.
    pub async fn list_transactions_page(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
        limit: u64,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<Transaction>, Option<String>)> {
        validate_filter(filter)?;
        if limit == 0 {
            return Err(EngineError::InvalidInput("limit must be > 0".to_string()));
        }

        with_tx!(self, |db_tx| {
            let limit_plus_one = limit.saturating_add(1);
            let mut query = transactions::Entity::find()
                .apply_tx_filters(user_id, filter)
                .order_by_desc(transactions::Column::OccurredAt)
                .order_by_desc(transactions::Column::CreatedAt)
                .order_by_desc(transactions::Column::Id)
                .limit(limit_plus_one);

            if let Some(cursor) = cursor {
                let cursor = TransactionsCursor::decode(cursor)?;
                query = query.filter(cursor.older_than());
            }

            let rows: Vec<transactions::Model> = query.all(&db_tx).await?;
            let has_more = rows.len() > limit as usize;

            let mut out: Vec<Transaction> = Vec::with_capacity(rows.len().min(limit as usize));
            for model in rows.into_iter().take(limit as usize) {
                out.push(Transaction::try_from(model)?);
            }

            let next_cursor = if has_more {
                out.last()
                    .map(|tx| TransactionsCursor {
                        occurred_at: tx.occurred_at,
                        created_at: tx.created_at,
                        transaction_id: tx.id.to_string(),
                    })
                    .map(|c| c.encode())
                    .transpose()?
            } else {
                None
            };

            Ok((out, next_cursor))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_round_trip() {
        let cursor = TransactionsCursor {
            occurred_at: Utc::now(),
            created_at: Utc::now(),
            transaction_id: Uuid::new_v4().to_string(),
        };
        let decoded = TransactionsCursor::decode(&cursor.encode().unwrap()).unwrap();
        assert_eq!(decoded.occurred_at, cursor.occurred_at);
        assert_eq!(decoded.transaction_id, cursor.transaction_id);
    }

    #[test]
    fn garbage_cursor_is_rejected() {
        assert!(matches!(
            TransactionsCursor::decode("not a cursor!"),
            Err(EngineError::InvalidCursor(_))
        ));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let now = Utc::now();
        let filter = TransactionFilter {
            from: Some(now),
            to: Some(now),
            ..Default::default()
        };
        assert!(matches!(
            validate_filter(&filter),
            Err(EngineError::InvalidRange(_))
        ));
    }
}
