use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    budget::{BudgetBook, BudgetEntry},
    category::CategoryRegistry,
    transaction::{Transaction, TransactionKind},
};
use crate::errors::LedgerError;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The authoritative ledger state: transactions, categories, budgets, and the
/// savings goal.
///
/// Fields are private so every state transition flows through the validated
/// operations below; aggregation reads the same snapshot through the borrow
/// accessors and stays reproducible from the operation sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    id: Uuid,
    name: String,
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    categories: CategoryRegistry,
    #[serde(default)]
    budgets: BudgetBook,
    #[serde(default)]
    savings_goal: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    schema_version: u8,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            transactions: Vec::new(),
            categories: CategoryRegistry::new(),
            budgets: BudgetBook::new(),
            savings_goal: 0.0,
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// A ledger pre-seeded with the stock dashboard categories, budgets, and
    /// savings goal.
    pub fn starter() -> Self {
        let mut ledger = Self::new("Personal Finance");
        for name in [
            "Housing",
            "Food",
            "Utilities",
            "Transportation",
            "Entertainment",
            "Salary",
        ] {
            ledger.categories.insert(name);
        }
        for (category, limit) in [
            ("Housing", 1000.0),
            ("Food", 500.0),
            ("Utilities", 200.0),
            ("Transportation", 300.0),
            ("Entertainment", 200.0),
        ] {
            ledger.budgets.upsert(category, limit);
        }
        ledger.savings_goal = 10_000.0;
        ledger
    }

    /// Records a transaction with a fresh id, appended in insertion order.
    ///
    /// Rejects a non-finite or non-positive magnitude and a blank category;
    /// the snapshot is untouched on rejection.
    pub fn record_transaction(
        &mut self,
        description: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Result<Uuid, LedgerError> {
        validate_amount("amount", amount)?;
        let category = category.into();
        validate_name("category", &category)?;
        let transaction = Transaction::new(description, amount, kind, category);
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        Ok(id)
    }

    /// Boundary conversion for sign-encoded amounts: negative records an
    /// expense, positive an income, and the magnitude is stored.
    pub fn record_signed(
        &mut self,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
    ) -> Result<Uuid, LedgerError> {
        self.record_transaction(
            description,
            amount.abs(),
            TransactionKind::from_signed(amount),
            category,
        )
    }

    /// Adds a category name; `Ok(false)` means it was already registered.
    pub fn add_category(&mut self, name: impl Into<String>) -> Result<bool, LedgerError> {
        let name = name.into();
        validate_name("name", &name)?;
        let inserted = self.categories.insert(name);
        if inserted {
            self.touch();
        }
        Ok(inserted)
    }

    /// Removes a category from the registry. Transactions and budgets that
    /// reference it are left alone and keep surfacing in aggregation.
    pub fn remove_category(&mut self, name: &str) -> bool {
        let removed = self.categories.remove(name);
        if removed {
            self.touch();
        }
        removed
    }

    /// Sets or overwrites the budget limit for a category.
    pub fn set_budget(
        &mut self,
        category: impl Into<String>,
        limit: f64,
    ) -> Result<(), LedgerError> {
        let category = category.into();
        validate_name("category", &category)?;
        validate_amount("limit", limit)?;
        self.budgets.upsert(category, limit);
        self.touch();
        Ok(())
    }

    /// Replaces the whole budget mapping at once.
    ///
    /// Every entry is validated before any of them is applied, so a rejected
    /// replacement leaves the previous budgets intact.
    pub fn replace_budgets<I>(&mut self, entries: I) -> Result<(), LedgerError>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut replacement = BudgetBook::new();
        for (category, limit) in entries {
            validate_name("category", &category)?;
            validate_amount("limit", limit)?;
            replacement.upsert(category, limit);
        }
        self.budgets = replacement;
        self.touch();
        Ok(())
    }

    /// Drops the budget entry for a category; returns whether one existed.
    pub fn remove_budget(&mut self, category: &str) -> bool {
        let removed = self.budgets.remove(category);
        if removed {
            self.touch();
        }
        removed
    }

    /// Overwrites the savings goal target.
    pub fn set_goal(&mut self, amount: f64) -> Result<(), LedgerError> {
        validate_amount("goal", amount)?;
        self.savings_goal = amount;
        self.touch();
        Ok(())
    }

    /// The last `count` transactions, newest first.
    pub fn recent_transactions(&self, count: usize) -> Vec<&Transaction> {
        self.transactions.iter().rev().take(count).collect()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn budgets(&self) -> &BudgetBook {
        &self.budgets
    }

    pub fn budget_entries(&self) -> impl Iterator<Item = &BudgetEntry> {
        self.budgets.iter()
    }

    pub fn savings_goal(&self) -> f64 {
        self.savings_goal
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn schema_version(&self) -> u8 {
        self.schema_version
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

fn validate_amount(field: &'static str, value: f64) -> Result<(), LedgerError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(LedgerError::invalid(
            field,
            format!("must be a positive finite number, got {value}"),
        ));
    }
    Ok(())
}

fn validate_name(field: &'static str, value: &str) -> Result<(), LedgerError> {
    if value.trim().is_empty() {
        return Err(LedgerError::invalid(field, "must not be blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_transaction_rejects_bad_amounts() {
        let mut ledger = Ledger::new("Checks");
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = ledger
                .record_transaction("x", amount, TransactionKind::Expense, "Food")
                .expect_err("amount must be rejected");
            assert!(
                matches!(err, LedgerError::InvalidInput { field: "amount", .. }),
                "unexpected error: {err:?}"
            );
        }
        assert_eq!(ledger.transaction_count(), 0);
    }

    #[test]
    fn record_transaction_rejects_blank_category() {
        let mut ledger = Ledger::new("Checks");
        let err = ledger
            .record_transaction("x", 10.0, TransactionKind::Expense, "  ")
            .expect_err("blank category must be rejected");
        assert!(matches!(
            err,
            LedgerError::InvalidInput {
                field: "category",
                ..
            }
        ));
    }

    #[test]
    fn record_signed_converts_at_the_boundary() {
        let mut ledger = Ledger::new("Signed");
        ledger.record_signed("Rent", -1000.0, "Housing").unwrap();
        ledger.record_signed("Salary", 5000.0, "Salary").unwrap();

        let rent = &ledger.transactions()[0];
        assert_eq!(rent.kind, TransactionKind::Expense);
        assert_eq!(rent.amount, 1000.0);
        let salary = &ledger.transactions()[1];
        assert_eq!(salary.kind, TransactionKind::Income);

        let err = ledger
            .record_signed("Nothing", 0.0, "Misc")
            .expect_err("zero must be rejected");
        assert!(matches!(err, LedgerError::InvalidInput { field: "amount", .. }));
    }

    #[test]
    fn add_category_is_idempotent() {
        let mut ledger = Ledger::new("Categories");
        assert!(ledger.add_category("Food").unwrap());
        assert!(!ledger.add_category("Food").unwrap());
        assert_eq!(ledger.categories().len(), 1);
    }

    #[test]
    fn remove_category_does_not_cascade() {
        let mut ledger = Ledger::new("NoCascade");
        ledger.add_category("Food").unwrap();
        ledger.set_budget("Food", 500.0).unwrap();
        ledger
            .record_transaction("Groceries", 200.0, TransactionKind::Expense, "Food")
            .unwrap();

        assert!(ledger.remove_category("Food"));
        assert!(!ledger.categories().contains("Food"));
        assert_eq!(ledger.budgets().limit_for("Food"), Some(500.0));
        assert_eq!(ledger.transaction_count(), 1);
    }

    #[test]
    fn set_budget_rejects_zero_and_negative_limits() {
        let mut ledger = Ledger::new("Budgets");
        for limit in [0.0, -100.0, f64::NAN] {
            let err = ledger
                .set_budget("Food", limit)
                .expect_err("limit must be rejected");
            assert!(matches!(err, LedgerError::InvalidInput { field: "limit", .. }));
        }
        assert!(ledger.budgets().is_empty());
    }

    #[test]
    fn replace_budgets_is_all_or_nothing() {
        let mut ledger = Ledger::new("Replace");
        ledger.set_budget("Food", 500.0).unwrap();

        let err = ledger
            .replace_budgets([("Housing".to_string(), 1000.0), ("Food".to_string(), 0.0)])
            .expect_err("zero limit must fail the whole replacement");
        assert!(matches!(err, LedgerError::InvalidInput { field: "limit", .. }));
        assert_eq!(ledger.budgets().limit_for("Food"), Some(500.0));
        assert_eq!(ledger.budgets().limit_for("Housing"), None);

        ledger
            .replace_budgets([("Housing".to_string(), 1000.0)])
            .unwrap();
        assert_eq!(ledger.budgets().limit_for("Food"), None);
        assert_eq!(ledger.budgets().limit_for("Housing"), Some(1000.0));
    }

    #[test]
    fn set_goal_rejects_non_positive_targets() {
        let mut ledger = Ledger::new("Goal");
        assert!(ledger.set_goal(10_000.0).is_ok());
        for bad in [0.0, -1.0, f64::NEG_INFINITY] {
            let err = ledger.set_goal(bad).expect_err("goal must be rejected");
            assert!(matches!(err, LedgerError::InvalidInput { field: "goal", .. }));
        }
        assert_eq!(ledger.savings_goal(), 10_000.0);
    }

    #[test]
    fn recent_transactions_returns_newest_first() {
        let mut ledger = Ledger::new("Recent");
        for i in 1..=7 {
            ledger
                .record_transaction(format!("txn {i}"), i as f64, TransactionKind::Income, "Misc")
                .unwrap();
        }
        let recent = ledger.recent_transactions(5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].description, "txn 7");
        assert_eq!(recent[4].description, "txn 3");
    }

    #[test]
    fn starter_ledger_matches_stock_dashboard() {
        let ledger = Ledger::starter();
        assert_eq!(ledger.categories().len(), 6);
        assert!(ledger.categories().contains("Salary"));
        assert_eq!(ledger.budgets().limit_for("Food"), Some(500.0));
        assert_eq!(ledger.savings_goal(), 10_000.0);
        assert_eq!(ledger.transaction_count(), 0);
    }
}
