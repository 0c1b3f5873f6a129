use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{customer::Customer, order::Order, payment::Payment, service::Service};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The authoritative in-memory store: every collection the shop works with
/// lives here, and persistence treats the whole aggregate as one document.
/// Screens hold no copies; they read projections and write through the
/// services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    /// Shop name, printed on receipts.
    pub name: String,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            customers: Vec::new(),
            services: Vec::new(),
            orders: Vec::new(),
            payments: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    // ----- lookups -----

    pub fn customer(&self, id: Uuid) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn customer_by_code(&self, code: &str) -> Option<&Customer> {
        self.customers
            .iter()
            .find(|c| c.customer_code.eq_ignore_ascii_case(code))
    }

    pub fn service(&self, id: Uuid) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn service_mut(&mut self, id: Uuid) -> Option<&mut Service> {
        self.services.iter_mut().find(|s| s.id == id)
    }

    pub fn order(&self, id: Uuid) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn order_by_number(&self, number: &str) -> Option<&Order> {
        self.orders
            .iter()
            .find(|o| o.order_number.eq_ignore_ascii_case(number))
    }

    pub(crate) fn order_mut(&mut self, id: Uuid) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == id)
    }

    pub fn payment(&self, id: Uuid) -> Option<&Payment> {
        self.payments.iter().find(|p| p.id == id)
    }

    pub fn payments_for_order(&self, order_id: Uuid) -> Vec<&Payment> {
        self.payments
            .iter()
            .filter(|p| p.order_id == Some(order_id))
            .collect()
    }

    pub fn payments_for_customer(&self, customer_id: Uuid) -> Vec<&Payment> {
        self.payments
            .iter()
            .filter(|p| p.customer_id == customer_id)
            .collect()
    }

    pub fn orders_for_customer(&self, customer_id: Uuid) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .collect()
    }

    // ----- inserts and removals -----

    pub fn add_customer(&mut self, customer: Customer) -> Uuid {
        let id = customer.id;
        self.customers.push(customer);
        self.touch();
        id
    }

    pub fn add_service(&mut self, service: Service) -> Uuid {
        let id = service.id;
        self.services.push(service);
        self.touch();
        id
    }

    pub fn add_order(&mut self, order: Order) -> Uuid {
        let id = order.id;
        self.orders.push(order);
        self.touch();
        id
    }

    pub fn add_payment(&mut self, payment: Payment) -> Uuid {
        let id = payment.id;
        self.payments.push(payment);
        self.touch();
        id
    }

    pub fn remove_service(&mut self, id: Uuid) -> Option<Service> {
        let idx = self.services.iter().position(|s| s.id == id)?;
        let removed = self.services.remove(idx);
        self.touch();
        Some(removed)
    }

    pub fn remove_order(&mut self, id: Uuid) -> Option<Order> {
        let idx = self.orders.iter().position(|o| o.id == id)?;
        let removed = self.orders.remove(idx);
        self.touch();
        Some(removed)
    }

    pub fn remove_payment(&mut self, id: Uuid) -> Option<Payment> {
        let idx = self.payments.iter().position(|p| p.id == id)?;
        let removed = self.payments.remove(idx);
        self.touch();
        Some(removed)
    }

    /// Removes a customer together with every order and payment that
    /// references them. The whole cascade happens in one call against the
    /// in-memory aggregate, so no reader ever sees a half-deleted customer.
    pub fn remove_customer_cascade(&mut self, id: Uuid) -> Option<CascadeSummary> {
        let idx = self.customers.iter().position(|c| c.id == id)?;
        let payments_before = self.payments.len();
        self.payments.retain(|p| p.customer_id != id);
        let orders_before = self.orders.len();
        self.orders.retain(|o| o.customer_id != id);
        self.customers.remove(idx);
        self.touch();
        Some(CascadeSummary {
            orders_removed: orders_before - self.orders.len(),
            payments_removed: payments_before - self.payments.len(),
        })
    }

    // ----- sequential operator-facing identifiers -----

    /// Next `ORD-NNN` number. Scans existing numbers so deletions never
    /// cause reuse of a live number.
    pub fn next_order_number(&self) -> String {
        let max = self
            .orders
            .iter()
            .filter_map(|o| o.order_number.strip_prefix("ORD-"))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("ORD-{:03}", max + 1)
    }

    /// Next `CUSTNNN` code, mirroring the order number scheme.
    pub fn next_customer_code(&self) -> String {
        let max = self
            .customers
            .iter()
            .filter_map(|c| c.customer_code.strip_prefix("CUST"))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("CUST{:03}", max + 1)
    }
}

/// Counts reported after a cascading customer removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeSummary {
    pub orders_removed: usize,
    pub payments_removed: usize,
}
