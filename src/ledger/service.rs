use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Suggested catalog groupings; `Service::category` stays a free string so
/// shops can add their own.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Basic", "Premium", "Express", "Specialty"];

/// A priced catalog item. Prices here are reference data only; orders copy
/// the price at creation time so later edits never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Turnaround estimate shown to the operator.
    pub duration_minutes: u32,
    pub category: String,
    pub active: bool,
}

impl Service {
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        duration_minutes: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price,
            description: None,
            duration_minutes,
            category: category.into(),
            active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
