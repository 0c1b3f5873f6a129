use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer of the shop. Balances are never stored here; they are always
/// derived from the order and payment collections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    /// Operator-facing code, e.g. `CUST001`.
    pub customer_code: String,
    pub name: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(
        customer_code: impl Into<String>,
        name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_code: customer_code.into(),
            name: name.into(),
            phone_number: phone_number.into(),
            vehicle_number: None,
            address: None,
            email: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_vehicle(mut self, vehicle_number: impl Into<String>) -> Self {
        self.vehicle_number = Some(vehicle_number.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.customer_code)
    }
}
