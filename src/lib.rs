#![doc(test(attr(deny(warnings))))]

//! Laundry Core provides the customer, price list, order, and payment
//! primitives behind a laundry shop's counter workflows, together with
//! JSON persistence and a small operator shell.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod money;
pub mod receipt;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        core::utils::init_tracing();
        tracing::info!("Laundry Core tracing initialized.");
    });
}
