//! Wire types shared by the HTTP server and its clients.
//!
//! Money values are always integer minor units (cents).

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod status {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Health {
        pub message: String,
        pub status: String,
    }

    /// Generic acknowledgement body.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Message {
        pub message: String,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub message: String,
        pub username: String,
    }
}

pub mod transaction {
    use super::*;

    /// Direction of the cash flow.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum TransactionType {
        In,
        Out,
    }

    /// Query string accepted by the filtered endpoints.
    ///
    /// Every field is optional and an empty value counts as absent, so a
    /// client can always send `?type=&bank=` without picking a filter.
    /// Dates are calendar dates (`YYYY-MM-DD`), both bounds inclusive.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionFilter {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub bank: Option<String>,
        pub category: Option<String>,
        #[serde(rename = "startDate")]
        pub start_date: Option<String>,
        #[serde(rename = "endDate")]
        pub end_date: Option<String>,
    }

    /// Query string for the paginated listing.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionList {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub bank: Option<String>,
        pub category: Option<String>,
        #[serde(rename = "startDate")]
        pub start_date: Option<String>,
        #[serde(rename = "endDate")]
        pub end_date: Option<String>,
        pub limit: Option<u64>,
        /// Opaque pagination cursor (base64), from `next_cursor`.
        ///
        /// Newest → older pagination.
        pub cursor: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        #[serde(rename = "type")]
        pub kind: TransactionType,
        /// Must be >= 0. The type defines the direction.
        pub amount_minor: i64,
        pub category: String,
        #[serde(default)]
        pub remark: String,
        pub bank_cash: String,
        /// RFC3339 timestamp; if absent, server uses now().
        pub date: Option<DateTime<FixedOffset>>,
    }

    /// Partial update: absent fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        #[serde(rename = "type")]
        pub kind: Option<TransactionType>,
        pub amount_minor: Option<i64>,
        pub category: Option<String>,
        pub remark: Option<String>,
        pub bank_cash: Option<String>,
        pub date: Option<DateTime<FixedOffset>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub amount_minor: i64,
        pub category: String,
        pub remark: String,
        pub bank_cash: String,
        /// RFC3339 timestamp (UTC).
        pub date: DateTime<FixedOffset>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreated {
        pub message: String,
        pub transaction: TransactionView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
        /// Opaque cursor for fetching the next page (older items).
        pub next_cursor: Option<String>,
    }
}

pub mod dashboard {
    use super::*;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DashboardSummary {
        /// Total of every `IN` transaction.
        pub income: i64,
        /// Net spend over categories whose net is positive.
        pub expenses: i64,
        /// Net amount moved into asset categories (may be negative).
        pub assets: i64,
        /// Money still owed by counterparties.
        pub lent: i64,
        /// `income - total OUT`: plain cash flow.
        pub balance: i64,
        pub total_money_out: i64,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryAmount {
        pub category: String,
        pub amount: i64,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PersonAmount {
        pub person: String,
        pub amount: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DashboardResponse {
        pub summary: DashboardSummary,
        pub expense_chart: Vec<CategoryAmount>,
        pub lending_chart: Vec<PersonAmount>,
        pub asset_chart: Vec<CategoryAmount>,
        pub money_out_chart: Vec<CategoryAmount>,
    }
}

pub mod summary {
    use super::*;

    /// Gross flows of a single category.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryFlow {
        pub category: String,
        #[serde(rename = "in")]
        pub cash_in: i64,
        #[serde(rename = "out")]
        pub cash_out: i64,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BankBalance {
        pub bank_cash: String,
        pub amount: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryResponse {
        pub cash_in: i64,
        pub cash_out: i64,
        pub balance: i64,
        pub categories: Vec<CategoryFlow>,
        pub banks: Vec<BankBalance>,
    }
}

pub mod lookup {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryListResponse {
        pub categories: Vec<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BankListResponse {
        pub banks: Vec<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::transaction::*;

    #[test]
    fn transaction_type_uses_uppercase_wire_names() {
        assert_eq!(
            serde_json::to_string(&TransactionType::In).unwrap(),
            "\"IN\""
        );
        let kind: TransactionType = serde_json::from_str("\"OUT\"").unwrap();
        assert_eq!(kind, TransactionType::Out);
    }

    #[test]
    fn new_transaction_defaults_remark_and_date() {
        let body = r#"{"type":"OUT","amount_minor":1250,"category":"Food","bank_cash":"Cash"}"#;
        let tx: TransactionNew = serde_json::from_str(body).unwrap();
        assert_eq!(tx.kind, TransactionType::Out);
        assert_eq!(tx.remark, "");
        assert!(tx.date.is_none());
    }
}
