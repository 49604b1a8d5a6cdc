//! Pure aggregation over a ledger snapshot.
//!
//! `summarize` derives every value the dashboard displays from the current
//! ledger state. It never mutates, caches, or rounds; two calls on an
//! unmutated ledger produce identical results.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::ledger::Ledger;

/// Total expenses attributed to one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryExpense {
    pub category: String,
    pub total: f64,
}

/// Spending position relative to a budget limit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetStatus {
    UnderBudget,
    OnTrack,
    OverBudget,
}

/// Utilization of a single budget entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetUsage {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    /// `None` means no utilization data: the limit is zero or absent, so the
    /// ratio is undefined rather than 0% or infinite.
    pub percent_used: Option<f64>,
    pub status: Option<BudgetStatus>,
}

impl BudgetUsage {
    /// Derives utilization from a limit and the spent total, guarding the
    /// zero-limit division hazard.
    pub fn from_parts(category: impl Into<String>, limit: f64, spent: f64) -> Self {
        let percent_used = if limit > f64::EPSILON {
            Some((spent / limit) * 100.0)
        } else {
            None
        };
        let status = percent_used.map(|_| {
            match spent.partial_cmp(&limit).unwrap_or(Ordering::Equal) {
                Ordering::Greater => BudgetStatus::OverBudget,
                Ordering::Less => BudgetStatus::UnderBudget,
                Ordering::Equal => BudgetStatus::OnTrack,
            }
        });
        Self {
            category: category.into(),
            limit,
            spent,
            percent_used,
            status,
        }
    }
}

/// The derived-value bundle consumed by the presentation adapter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_savings: f64,
    pub goal_target: f64,
    pub goal_progress_percent: f64,
    pub expenses_by_category: Vec<CategoryExpense>,
    pub budget_usage: Vec<BudgetUsage>,
}

impl LedgerSummary {
    /// Utilization percentage for `category`, or `None` when no budget data
    /// exists for it. Callers must not conflate this with 0% used.
    pub fn utilization(&self, category: &str) -> Option<f64> {
        self.budget_usage
            .iter()
            .find(|usage| usage.category == category)
            .and_then(|usage| usage.percent_used)
    }

    /// Expense totals attributed to `category`, or `None` when no expense
    /// transaction references it.
    pub fn expense_total(&self, category: &str) -> Option<f64> {
        self.expenses_by_category
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.total)
    }

    /// `(name, value)` pairs for the spending chart, in first-seen category
    /// order. The order feeds slice color assignment and must stay stable.
    pub fn pie_chart_series(&self) -> impl Iterator<Item = (&str, f64)> {
        self.expenses_by_category
            .iter()
            .map(|entry| (entry.category.as_str(), entry.total))
    }
}

/// Recomputes the full derived-value bundle from the ledger snapshot.
pub fn summarize(ledger: &Ledger) -> LedgerSummary {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut expenses_by_category: Vec<CategoryExpense> = Vec::new();

    for transaction in ledger.transactions() {
        if transaction.is_expense() {
            total_expenses += transaction.amount;
            match expenses_by_category
                .iter_mut()
                .find(|entry| entry.category == transaction.category)
            {
                Some(entry) => entry.total += transaction.amount,
                None => expenses_by_category.push(CategoryExpense {
                    category: transaction.category.clone(),
                    total: transaction.amount,
                }),
            }
        } else {
            total_income += transaction.amount;
        }
    }

    let net_savings = total_income - total_expenses;
    let goal_target = ledger.savings_goal();

    let budget_usage = ledger
        .budget_entries()
        .map(|entry| {
            let spent = expenses_by_category
                .iter()
                .find(|expense| expense.category == entry.category)
                .map(|expense| expense.total)
                .unwrap_or(0.0);
            BudgetUsage::from_parts(entry.category.clone(), entry.limit, spent)
        })
        .collect();

    LedgerSummary {
        total_income,
        total_expenses,
        net_savings,
        goal_target,
        goal_progress_percent: goal_progress(net_savings, goal_target),
        expenses_by_category,
        budget_usage,
    }
}

/// Net savings as a share of the goal, clamped to `[0, 100]`.
///
/// A goal of zero (unset) short-circuits to 0% so the ratio never degenerates
/// into `NaN` or infinity; exceeding the goal reports exactly 100%.
fn goal_progress(net_savings: f64, goal: f64) -> f64 {
    if goal > 0.0 && goal.is_finite() {
        ((net_savings / goal) * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionKind;

    #[test]
    fn goal_progress_is_clamped_and_zero_safe() {
        assert_eq!(goal_progress(3800.0, 10_000.0), 38.0);
        assert_eq!(goal_progress(13_000.0, 10_000.0), 100.0);
        assert_eq!(goal_progress(-500.0, 10_000.0), 0.0);
        assert_eq!(goal_progress(3800.0, 0.0), 0.0);
        assert_eq!(goal_progress(-500.0, 0.0), 0.0);
    }

    #[test]
    fn zero_limit_yields_no_utilization_data() {
        let usage = BudgetUsage::from_parts("Food", 0.0, 200.0);
        assert_eq!(usage.percent_used, None);
        assert_eq!(usage.status, None);
    }

    #[test]
    fn usage_status_tracks_the_limit() {
        assert_eq!(
            BudgetUsage::from_parts("Food", 500.0, 200.0).status,
            Some(BudgetStatus::UnderBudget)
        );
        assert_eq!(
            BudgetUsage::from_parts("Food", 500.0, 500.0).status,
            Some(BudgetStatus::OnTrack)
        );
        assert_eq!(
            BudgetUsage::from_parts("Food", 500.0, 650.0).status,
            Some(BudgetStatus::OverBudget)
        );
    }

    #[test]
    fn categories_appear_in_first_seen_order() {
        let mut ledger = Ledger::new("Order");
        ledger
            .record_transaction("Rent", 1000.0, TransactionKind::Expense, "Housing")
            .unwrap();
        ledger
            .record_transaction("Groceries", 120.0, TransactionKind::Expense, "Food")
            .unwrap();
        ledger
            .record_transaction("More rent", 50.0, TransactionKind::Expense, "Housing")
            .unwrap();

        let summary = summarize(&ledger);
        let series: Vec<_> = summary.pie_chart_series().collect();
        assert_eq!(series, [("Housing", 1050.0), ("Food", 120.0)]);
    }

    #[test]
    fn income_never_enters_the_category_breakdown() {
        let mut ledger = Ledger::new("IncomeSplit");
        ledger
            .record_transaction("Salary", 5000.0, TransactionKind::Income, "Salary")
            .unwrap();

        let summary = summarize(&ledger);
        assert!(summary.expenses_by_category.is_empty());
        assert_eq!(summary.total_income, 5000.0);
        assert_eq!(summary.expense_total("Salary"), None);
    }
}
