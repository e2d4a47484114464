#![doc(test(attr(deny(warnings))))]

//! Ledger Core implements the double-entry bookkeeping engine for a small
//! business book: balanced transaction registration, recurring schedule
//! generation, and fiscal-year summaries and general ledgers.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}
