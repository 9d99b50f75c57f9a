//! Dashboard aggregation.
//!
//! Every transaction lands in exactly one of three buckets, chosen from its
//! category:
//!
//! - **lending**: money lent to (or borrowed from) a person, keyed by the
//!   remark, which names the counterparty;
//! - **asset**: money moved into savings-like instruments, keyed by category;
//! - **expense**: everything else, keyed by category.
//!
//! Inside a bucket each key keeps a signed net: `OUT` adds the amount and
//! `IN` subtracts it. A positive lending net is money still owed to the user,
//! a positive asset net is money still invested, a positive expense net is
//! spending not offset by refunds.
//!
//! Keyword matching is case-insensitive, but keys keep the category's
//! original spelling, so `Gold` and `gold` are two separate asset entries.

use std::collections::HashMap;

use crate::{MoneyCents, Transaction, TransactionType};

/// Key used for lending entries whose remark is blank.
pub const UNKNOWN_COUNTERPARTY: &str = "Unknown";

/// Lower-case categories routed to the lending bucket.
pub const LENDING_KEYWORDS: &[&str] = &["lent", "loan", "given", "borrowed"];

/// Lower-case categories routed to the asset bucket.
pub const ASSET_KEYWORDS: &[&str] = &[
    "savings",
    "saving",
    "investment",
    "investments",
    "asset",
    "assets",
    "sip",
    "stocks",
    "mutual fund",
    "gold",
    "pf",
    "ppf",
];

/// Where a transaction is accounted, with the key it accumulates under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Bucket<'a> {
    Lending { person: &'a str },
    Asset { category: &'a str },
    Expense { category: &'a str },
}

/// Classify a transaction by its category.
///
/// Lending keywords win over asset keywords; anything unmatched is an
/// expense.
pub fn classify<'a>(category: &'a str, remark: &'a str) -> Bucket<'a> {
    let lowered = category.to_lowercase();
    if LENDING_KEYWORDS.contains(&lowered.as_str()) {
        let person = remark.trim();
        let person = if person.is_empty() {
            UNKNOWN_COUNTERPARTY
        } else {
            person
        };
        Bucket::Lending { person }
    } else if ASSET_KEYWORDS.contains(&lowered.as_str()) {
        Bucket::Asset { category }
    } else {
        Bucket::Expense { category }
    }
}

/// Running totals per key, iterated in order of first appearance.
#[derive(Debug, Default)]
struct NetLedger<'a> {
    index: HashMap<&'a str, usize>,
    entries: Vec<(&'a str, MoneyCents)>,
}

impl<'a> NetLedger<'a> {
    fn add(&mut self, key: &'a str, amount: MoneyCents) {
        match self.index.get(key) {
            Some(&pos) => self.entries[pos].1 += amount,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((key, amount));
            }
        }
    }

    fn iter(&self) -> impl Iterator<Item = (&'a str, MoneyCents)> + '_ {
        self.entries.iter().copied()
    }

    fn positive(&self) -> impl Iterator<Item = (&'a str, MoneyCents)> + '_ {
        self.iter().filter(|(_, net)| net.is_positive())
    }

    fn to_chart(entries: impl Iterator<Item = (&'a str, MoneyCents)>) -> Vec<ChartEntry> {
        entries
            .map(|(key, amount)| ChartEntry {
                key: key.to_string(),
                amount,
            })
            .collect()
    }
}

/// One slice of a chart: a category (or person) and its net amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartEntry {
    pub key: String,
    pub amount: MoneyCents,
}

/// Headline figures of the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Gross total of `IN` transactions.
    pub total_in: MoneyCents,
    /// Gross total of `OUT` transactions.
    pub total_out: MoneyCents,
    /// `total_in - total_out`, independent of bucket routing.
    pub balance: MoneyCents,
    /// Sum of positive lending nets.
    pub net_lent: MoneyCents,
    /// Sum of every asset net, negative ones included.
    pub net_assets: MoneyCents,
    /// Sum of positive expense nets.
    pub net_expenses: MoneyCents,
    /// `net_expenses + net_assets + net_lent`.
    pub total_money_out: MoneyCents,
}

/// Result of one aggregation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dashboard {
    pub summary: DashboardSummary,
    /// Expense categories with a positive net.
    pub expense_chart: Vec<ChartEntry>,
    /// Counterparties with a non-zero net.
    pub lending_chart: Vec<ChartEntry>,
    /// Every asset category, whatever the sign.
    pub asset_chart: Vec<ChartEntry>,
    /// `expense_chart` followed by asset categories with a positive net.
    pub money_out_chart: Vec<ChartEntry>,
}

impl Dashboard {
    /// Aggregate an already filtered, ordered sequence of transactions.
    ///
    /// Pure: the input is only read and every accumulator lives in this call.
    pub fn aggregate(transactions: &[Transaction]) -> Self {
        let mut lending = NetLedger::default();
        let mut assets = NetLedger::default();
        let mut expenses = NetLedger::default();
        let mut total_in = MoneyCents::ZERO;
        let mut total_out = MoneyCents::ZERO;

        for tx in transactions {
            match tx.kind {
                TransactionType::In => total_in += tx.amount,
                TransactionType::Out => total_out += tx.amount,
            }

            let net = tx.net_amount();
            match classify(&tx.category, &tx.remark) {
                Bucket::Lending { person } => lending.add(person, net),
                Bucket::Asset { category } => assets.add(category, net),
                Bucket::Expense { category } => expenses.add(category, net),
            }
        }

        let net_lent: MoneyCents = lending.positive().map(|(_, net)| net).sum();
        let net_assets: MoneyCents = assets.iter().map(|(_, net)| net).sum();
        let net_expenses: MoneyCents = expenses.positive().map(|(_, net)| net).sum();

        let expense_chart = NetLedger::to_chart(expenses.positive());
        let lending_chart = NetLedger::to_chart(lending.iter().filter(|(_, net)| !net.is_zero()));
        let asset_chart = NetLedger::to_chart(assets.iter());
        let money_out_chart = expense_chart
            .iter()
            .cloned()
            .chain(NetLedger::to_chart(assets.positive()))
            .collect();

        Self {
            summary: DashboardSummary {
                total_in,
                total_out,
                balance: total_in - total_out,
                net_lent,
                net_assets,
                net_expenses,
                total_money_out: net_expenses + net_assets + net_lent,
            },
            expense_chart,
            lending_chart,
            asset_chart,
            money_out_chart,
        }
    }
}
