use sea_orm::{QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};

use crate::{CashSummary, Dashboard, ResultEngine, transactions};

use super::{Engine, TransactionFilter, with_tx};

impl Engine {
    /// Bucketed dashboard over the user's filtered transactions.
    pub async fn dashboard(&self, user_id: &str, filter: &TransactionFilter) -> ResultEngine<Dashboard> {
        let rows = self.transactions(user_id, filter).await?;
        Ok(Dashboard::aggregate(&rows))
    }

    /// Cash-in/cash-out summary over the user's filtered transactions.
    pub async fn cash_summary(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> ResultEngine<CashSummary> {
        let rows = self.transactions(user_id, filter).await?;
        Ok(CashSummary::from_transactions(&rows))
    }

    /// Distinct categories used by `user_id`, sorted.
    pub async fn categories(&self, user_id: &str) -> ResultEngine<Vec<String>> {
        self.distinct_labels(user_id, transactions::Column::Category)
            .await
    }

    /// Distinct bank/cash accounts used by `user_id`, sorted.
    pub async fn banks(&self, user_id: &str) -> ResultEngine<Vec<String>> {
        self.distinct_labels(user_id, transactions::Column::BankCash)
            .await
    }

    async fn distinct_labels(
        &self,
        user_id: &str,
        column: transactions::Column,
    ) -> ResultEngine<Vec<String>> {
        with_tx!(self, |db_tx| {
            let labels: Vec<String> = transactions::Entity::find()
                .select_only()
                .column(column)
                .distinct()
                .filter(transactions::Column::UserId.eq(user_id))
                .order_by_asc(column)
                .into_tuple()
                .all(&db_tx)
                .await?;
            Ok(labels)
        })
    }
}
