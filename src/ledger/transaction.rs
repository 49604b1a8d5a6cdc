use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a ledger movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Derives the kind from a signed amount; negative means expense.
    pub fn from_signed(amount: f64) -> Self {
        if amount < 0.0 {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        }
    }
}

/// A single recorded income or expense movement.
///
/// The canonical representation is a non-negative magnitude plus an explicit
/// kind tag; signed amounts are converted at the boundary and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub recorded_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            recorded_at: Utc::now(),
        }
    }

    /// Converts a signed amount into magnitude-plus-kind form.
    pub fn from_signed(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        Self::new(
            description,
            amount.abs(),
            TransactionKind::from_signed(amount),
            category,
        )
    }

    /// Contribution to net savings: positive for income, negative for expense.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TransactionKind::Expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_signed_splits_magnitude_and_kind() {
        let expense = Transaction::from_signed("Groceries", -200.0, "Food");
        assert_eq!(expense.kind, TransactionKind::Expense);
        assert_eq!(expense.amount, 200.0);
        assert_eq!(expense.signed_amount(), -200.0);

        let income = Transaction::from_signed("Salary", 5000.0, "Salary");
        assert_eq!(income.kind, TransactionKind::Income);
        assert_eq!(income.signed_amount(), 5000.0);
    }

    #[test]
    fn ids_are_unique_per_transaction() {
        let a = Transaction::new("A", 1.0, TransactionKind::Income, "Misc");
        let b = Transaction::new("B", 1.0, TransactionKind::Income, "Misc");
        assert_ne!(a.id, b.id);
    }
}
