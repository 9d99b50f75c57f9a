//! Plain cash-flow summary: gross totals, per-category flows and per-account
//! balances, without any bucket reclassification.

use std::collections::HashMap;

use crate::{MoneyCents, Transaction, TransactionType};

/// Gross in/out of a single category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryFlow {
    pub category: String,
    pub cash_in: MoneyCents,
    pub cash_out: MoneyCents,
}

/// Net position of a bank/cash account (`in - out`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountBalance {
    pub bank_cash: String,
    pub balance: MoneyCents,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CashSummary {
    pub cash_in: MoneyCents,
    pub cash_out: MoneyCents,
    pub balance: MoneyCents,
    /// Ordered by first appearance of the category.
    pub categories: Vec<CategoryFlow>,
    /// Ordered by first appearance of the account.
    pub accounts: Vec<AccountBalance>,
}

impl CashSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut summary = Self::default();
        let mut category_pos: HashMap<&str, usize> = HashMap::new();
        let mut account_pos: HashMap<&str, usize> = HashMap::new();

        for tx in transactions {
            let category = *category_pos.entry(tx.category.as_str()).or_insert_with(|| {
                summary.categories.push(CategoryFlow {
                    category: tx.category.clone(),
                    cash_in: MoneyCents::ZERO,
                    cash_out: MoneyCents::ZERO,
                });
                summary.categories.len() - 1
            });
            let account = *account_pos.entry(tx.bank_cash.as_str()).or_insert_with(|| {
                summary.accounts.push(AccountBalance {
                    bank_cash: tx.bank_cash.clone(),
                    balance: MoneyCents::ZERO,
                });
                summary.accounts.len() - 1
            });

            match tx.kind {
                TransactionType::In => {
                    summary.cash_in += tx.amount;
                    summary.categories[category].cash_in += tx.amount;
                    summary.accounts[account].balance += tx.amount;
                }
                TransactionType::Out => {
                    summary.cash_out += tx.amount;
                    summary.categories[category].cash_out += tx.amount;
                    summary.accounts[account].balance -= tx.amount;
                }
            }
        }

        summary.balance = summary.cash_in - summary.cash_out;
        summary
    }
}
