//! Aggregated views over a user's transactions.

use api_types::{
    dashboard::{CategoryAmount, DashboardResponse, DashboardSummary, PersonAmount},
    summary::{BankBalance, CategoryFlow, SummaryResponse},
    transaction::TransactionFilter,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use engine::ChartEntry;

use crate::{ServerError, filters::RawFilter, server::ServerState, user};

fn category_amounts(entries: Vec<ChartEntry>) -> Vec<CategoryAmount> {
    entries
        .into_iter()
        .map(|e| CategoryAmount {
            category: e.key,
            amount: e.amount.cents(),
        })
        .collect()
}

pub async fn dashboard(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<TransactionFilter>,
) -> Result<Json<DashboardResponse>, ServerError> {
    let filter = RawFilter::from(query).into_engine()?;
    let dashboard = state.engine.dashboard(&user.username, &filter).await?;
    let summary = dashboard.summary;

    Ok(Json(DashboardResponse {
        summary: DashboardSummary {
            income: summary.total_in.cents(),
            expenses: summary.net_expenses.cents(),
            assets: summary.net_assets.cents(),
            lent: summary.net_lent.cents(),
            balance: summary.balance.cents(),
            total_money_out: summary.total_money_out.cents(),
        },
        expense_chart: category_amounts(dashboard.expense_chart),
        lending_chart: dashboard
            .lending_chart
            .into_iter()
            .map(|e| PersonAmount {
                person: e.key,
                amount: e.amount.cents(),
            })
            .collect(),
        asset_chart: category_amounts(dashboard.asset_chart),
        money_out_chart: category_amounts(dashboard.money_out_chart),
    }))
}

pub async fn summary(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<TransactionFilter>,
) -> Result<Json<SummaryResponse>, ServerError> {
    let filter = RawFilter::from(query).into_engine()?;
    let summary = state.engine.cash_summary(&user.username, &filter).await?;

    Ok(Json(SummaryResponse {
        cash_in: summary.cash_in.cents(),
        cash_out: summary.cash_out.cents(),
        balance: summary.balance.cents(),
        categories: summary
            .categories
            .into_iter()
            .map(|c| CategoryFlow {
                category: c.category,
                cash_in: c.cash_in.cents(),
                cash_out: c.cash_out.cents(),
            })
            .collect(),
        banks: summary
            .accounts
            .into_iter()
            .map(|a| BankBalance {
                bank_cash: a.bank_cash,
                amount: a.balance.cents(),
            })
            .collect(),
    }))
}
