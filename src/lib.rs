#![doc(test(attr(deny(warnings))))]

//! Finance Core provides the ledger store, aggregation engine, and
//! persistence primitives behind a personal-finance dashboard.

pub mod config;
pub mod dashboard;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod summary;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}
