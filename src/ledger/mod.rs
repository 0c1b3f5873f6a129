//! Domain models and the authoritative in-memory store.

pub mod customer;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod order;
pub mod payment;
pub mod service;

pub use customer::Customer;
pub use ledger::{CascadeSummary, Ledger, CURRENT_SCHEMA_VERSION};
pub use order::{Order, OrderItem, OrderStatus, PaymentStatus};
pub use payment::{Payment, PaymentMethod};
pub use service::{Service, DEFAULT_CATEGORIES};
