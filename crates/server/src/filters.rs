//! Conversion between wire types and engine types.

use api_types::transaction::{TransactionType as ApiType, TransactionView};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::ServerError;

pub(crate) fn map_type(kind: engine::TransactionType) -> ApiType {
    match kind {
        engine::TransactionType::In => ApiType::In,
        engine::TransactionType::Out => ApiType::Out,
    }
}

pub(crate) fn engine_type(kind: ApiType) -> engine::TransactionType {
    match kind {
        ApiType::In => engine::TransactionType::In,
        ApiType::Out => engine::TransactionType::Out,
    }
}

pub(crate) fn map_transaction(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        kind: map_type(tx.kind),
        amount_minor: tx.amount.cents(),
        category: tx.category,
        remark: tx.remark,
        bank_cash: tx.bank_cash,
        date: tx.occurred_at.fixed_offset(),
    }
}

/// Query parameters as sent by clients, before validation.
#[derive(Default)]
pub(crate) struct RawFilter {
    pub(crate) kind: Option<String>,
    pub(crate) bank: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) start_date: Option<String>,
    pub(crate) end_date: Option<String>,
}

impl From<api_types::transaction::TransactionFilter> for RawFilter {
    fn from(query: api_types::transaction::TransactionFilter) -> Self {
        Self {
            kind: query.kind,
            bank: query.bank,
            category: query.category,
            start_date: query.start_date,
            end_date: query.end_date,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_date(raw: &str, label: &str) -> Result<NaiveDate, ServerError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ServerError::Generic(format!("invalid {label}: expected YYYY-MM-DD")))
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

impl RawFilter {
    /// Validate the raw parameters into an engine filter.
    ///
    /// Empty values count as absent. Dates are inclusive on both ends: the
    /// end date is turned into the start of the following day.
    pub(crate) fn into_engine(self) -> Result<engine::TransactionFilter, ServerError> {
        let kind = match non_empty(self.kind) {
            None => None,
            Some(raw) => match raw.to_ascii_uppercase().as_str() {
                "IN" => Some(engine::TransactionType::In),
                "OUT" => Some(engine::TransactionType::Out),
                _ => {
                    return Err(ServerError::Generic(format!(
                        "invalid type: {raw} (expected IN or OUT)"
                    )));
                }
            },
        };

        let from = non_empty(self.start_date)
            .map(|raw| parse_date(&raw, "startDate"))
            .transpose()?
            .map(start_of_day);
        let to = non_empty(self.end_date)
            .map(|raw| parse_date(&raw, "endDate"))
            .transpose()?
            .map(|date| {
                date.succ_opt()
                    .map(start_of_day)
                    .ok_or_else(|| ServerError::Generic("endDate out of range".to_string()))
            })
            .transpose()?;

        Ok(engine::TransactionFilter {
            kind,
            bank: non_empty(self.bank),
            category: non_empty(self.category),
            from,
            to,
        })
    }
}
