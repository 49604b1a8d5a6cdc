//! Owner-side coordination between ledger mutations and recomputation.
//!
//! The reference dashboard re-renders after every state change. Here that
//! becomes explicit: the facade applies a mutation, bumps a revision counter,
//! recomputes the summary from the whole snapshot, and hands the result to
//! every registered observer. Failed mutations leave all three untouched.

use uuid::Uuid;

use crate::{
    errors::LedgerError,
    ledger::{Ledger, TransactionKind},
    summary::{self, LedgerSummary},
};

type Observer = Box<dyn Fn(&LedgerSummary)>;

/// Facade that owns the ledger and drives the mutate-recompute-notify cycle.
pub struct Dashboard {
    ledger: Ledger,
    revision: u64,
    latest: LedgerSummary,
    observers: Vec<Observer>,
}

impl Dashboard {
    pub fn new(ledger: Ledger) -> Self {
        let latest = summary::summarize(&ledger);
        Self {
            ledger,
            revision: 0,
            latest,
            observers: Vec::new(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The summary computed after the most recent mutation.
    pub fn latest(&self) -> &LedgerSummary {
        &self.latest
    }

    /// Number of snapshot-changing mutations applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers a callback invoked with each freshly computed summary.
    pub fn subscribe(&mut self, observer: impl Fn(&LedgerSummary) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn record_transaction(
        &mut self,
        description: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Result<Uuid, LedgerError> {
        let id = self
            .ledger
            .record_transaction(description, amount, kind, category)?;
        self.after_mutation();
        Ok(id)
    }

    pub fn record_signed(
        &mut self,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
    ) -> Result<Uuid, LedgerError> {
        let id = self.ledger.record_signed(description, amount, category)?;
        self.after_mutation();
        Ok(id)
    }

    pub fn add_category(&mut self, name: impl Into<String>) -> Result<bool, LedgerError> {
        let inserted = self.ledger.add_category(name)?;
        if inserted {
            self.after_mutation();
        }
        Ok(inserted)
    }

    pub fn remove_category(&mut self, name: &str) -> bool {
        let removed = self.ledger.remove_category(name);
        if removed {
            self.after_mutation();
        }
        removed
    }

    pub fn set_budget(
        &mut self,
        category: impl Into<String>,
        limit: f64,
    ) -> Result<(), LedgerError> {
        self.ledger.set_budget(category, limit)?;
        self.after_mutation();
        Ok(())
    }

    pub fn replace_budgets<I>(&mut self, entries: I) -> Result<(), LedgerError>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        self.ledger.replace_budgets(entries)?;
        self.after_mutation();
        Ok(())
    }

    pub fn remove_budget(&mut self, category: &str) -> bool {
        let removed = self.ledger.remove_budget(category);
        if removed {
            self.after_mutation();
        }
        removed
    }

    pub fn set_goal(&mut self, amount: f64) -> Result<(), LedgerError> {
        self.ledger.set_goal(amount)?;
        self.after_mutation();
        Ok(())
    }

    fn after_mutation(&mut self) {
        self.revision += 1;
        self.latest = summary::summarize(&self.ledger);
        for observer in &self.observers {
            observer(&self.latest);
        }
    }
}
