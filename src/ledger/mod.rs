//! Ledger domain models and the validated mutation surface.

pub mod budget;
pub mod category;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use budget::{BudgetBook, BudgetEntry};
pub use category::CategoryRegistry;
pub use ledger::{Ledger, CURRENT_SCHEMA_VERSION};
pub use transaction::{Transaction, TransactionKind};
