//! Dashboard analytics - aggregation over a user's transaction history.
//!
//! The analytics endpoint filters transactions exactly like the list endpoint
//! and then rolls the result up into the figures the dashboard displays:
//! income/expense counts, turnover, and a per-category breakdown, each with
//! its share of the total expressed as a percentage.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::transaction::{Transaction, TransactionType};

/// Aggregated view of a transaction list.
///
/// # JSON Example
///
/// ```json
/// {
///   "totalTransactions": 4,
///   "incomeCount": 1,
///   "expenseCount": 3,
///   "incomeCountPct": 25.0,
///   "expenseCountPct": 75.0,
///   "totalTurnover": 1300.0,
///   "incomeTurnover": 1000.0,
///   "expenseTurnover": 300.0,
///   "incomeTurnoverPct": 76.9,
///   "expenseTurnoverPct": 23.1,
///   "categories": [
///     { "category": "Salary", "income": 1000.0, "expense": 0.0,
///       "incomePct": 76.9, "expensePct": 0.0 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    /// Number of transactions in the filtered list
    pub total_transactions: usize,

    /// Number of credit (income) transactions
    pub income_count: usize,

    /// Number of expense transactions
    pub expense_count: usize,

    /// Income count as a percentage of the total count
    pub income_count_pct: f64,

    /// Expense count as a percentage of the total count
    pub expense_count_pct: f64,

    /// Sum of every amount, income and expense alike
    pub total_turnover: f64,

    /// Sum of credit amounts
    pub income_turnover: f64,

    /// Sum of expense amounts
    pub expense_turnover: f64,

    /// Income turnover as a percentage of total turnover
    pub income_turnover_pct: f64,

    /// Expense turnover as a percentage of total turnover
    pub expense_turnover_pct: f64,

    /// Per-category rollup, largest combined turnover first
    pub categories: Vec<CategorySummary>,
}

/// Income/expense rollup for one category.
///
/// Percentages are of the *total* turnover, not the category's own, so the
/// dashboard bars for all categories share one scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub income: f64,
    pub expense: f64,
    pub income_pct: f64,
    pub expense_pct: f64,
}

/// Share of `whole` taken by `part`, as a percentage.
///
/// A zero denominator yields 0 rather than NaN; an empty dashboard shows
/// empty meters, not errors.
fn pct(part: f64, whole: f64) -> f64 {
    if whole == 0.0 { 0.0 } else { part / whole * 100.0 }
}

/// Roll a filtered transaction list up into an [`AnalyticsSummary`].
pub fn summarize(transactions: &[Transaction]) -> AnalyticsSummary {
    let total_transactions = transactions.len();

    let income_count = transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Credit)
        .count();
    let expense_count = total_transactions - income_count;

    let total_turnover: f64 = transactions.iter().map(|t| t.amount).sum();
    let income_turnover: f64 = transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Credit)
        .map(|t| t.amount)
        .sum();
    let expense_turnover: f64 = transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Expense)
        .map(|t| t.amount)
        .sum();

    // Group per category. BTreeMap keeps ties in a stable (alphabetical)
    // order before the turnover sort below.
    let mut by_category: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for transaction in transactions {
        let entry = by_category.entry(&transaction.category).or_insert((0.0, 0.0));
        match transaction.transaction_type {
            TransactionType::Credit => entry.0 += transaction.amount,
            TransactionType::Expense => entry.1 += transaction.amount,
        }
    }

    let mut categories: Vec<CategorySummary> = by_category
        .into_iter()
        .map(|(category, (income, expense))| CategorySummary {
            category: category.to_string(),
            income,
            expense,
            income_pct: pct(income, total_turnover),
            expense_pct: pct(expense, total_turnover),
        })
        .collect();
    categories.sort_by(|a, b| {
        (b.income + b.expense)
            .partial_cmp(&(a.income + a.expense))
            .unwrap_or(Ordering::Equal)
    });

    AnalyticsSummary {
        total_transactions,
        income_count,
        expense_count,
        income_count_pct: pct(income_count as f64, total_transactions as f64),
        expense_count_pct: pct(expense_count as f64, total_transactions as f64),
        total_turnover,
        income_turnover,
        expense_turnover,
        income_turnover_pct: pct(income_turnover, total_turnover),
        expense_turnover_pct: pct(expense_turnover, total_turnover),
        categories,
    }
}

/// Envelope for `POST /api/v1/transactions/analytics`.
#[derive(Debug, Serialize)]
pub struct AnalyticsEnvelope {
    pub success: bool,
    pub analytics: AnalyticsSummary,
}
