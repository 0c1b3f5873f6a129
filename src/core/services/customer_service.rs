//! Validated CRUD helpers for customers, including the cascading delete.

use tracing::info;
use uuid::Uuid;

use crate::core::services::ServiceResult;
use crate::errors::LedgerError;
use crate::ledger::{CascadeSummary, Customer, Ledger};

/// Form data for a new customer record. A missing code is generated from
/// the `CUSTNNN` sequence.
#[derive(Debug, Clone, Default)]
pub struct NewCustomer {
    pub customer_code: Option<String>,
    pub name: String,
    pub phone_number: String,
    pub vehicle_number: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

pub struct CustomerService;

impl CustomerService {
    pub fn add(ledger: &mut Ledger, form: NewCustomer) -> ServiceResult<Customer> {
        if form.name.trim().is_empty() {
            return Err(LedgerError::Validation("customer name is required".into()));
        }
        let code = form
            .customer_code
            .filter(|code| !code.trim().is_empty())
            .unwrap_or_else(|| ledger.next_customer_code());
        if ledger.customer_by_code(&code).is_some() {
            return Err(LedgerError::Validation(format!(
                "customer code {} is already taken",
                code
            )));
        }

        let mut customer = Customer::new(code, form.name.trim(), form.phone_number.trim());
        customer.vehicle_number = form.vehicle_number.filter(|v| !v.trim().is_empty());
        customer.address = form.address.filter(|a| !a.trim().is_empty());
        customer.email = form.email.filter(|e| !e.trim().is_empty());

        let stored = customer.clone();
        ledger.add_customer(customer);
        info!(code = %stored.customer_code, "customer added");
        Ok(stored)
    }

    /// Updates the customer identified by `id` via the provided mutator.
    pub fn update<F>(ledger: &mut Ledger, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Customer),
    {
        let customer = ledger
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("customer {}", id)))?;
        mutator(customer);
        ledger.touch();
        Ok(())
    }

    /// Deletes the customer and everything referencing them: payments,
    /// then orders with their items, then the record itself.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> ServiceResult<CascadeSummary> {
        let summary = ledger
            .remove_customer_cascade(id)
            .ok_or_else(|| LedgerError::NotFound(format!("customer {}", id)))?;
        info!(
            orders = summary.orders_removed,
            payments = summary.payments_removed,
            "customer removed with cascade"
        );
        Ok(summary)
    }

    pub fn list(ledger: &Ledger) -> Vec<&Customer> {
        ledger.customers.iter().collect()
    }

    /// Case-insensitive match on code, name, phone, or vehicle number,
    /// mirroring the front-desk search box.
    pub fn search<'a>(ledger: &'a Ledger, query: &str) -> Vec<&'a Customer> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Self::list(ledger);
        }
        ledger
            .customers
            .iter()
            .filter(|c| {
                c.customer_code.to_lowercase().contains(&needle)
                    || c.name.to_lowercase().contains(&needle)
                    || c.phone_number.contains(&needle)
                    || c.vehicle_number
                        .as_deref()
                        .is_some_and(|v| v.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, phone: &str) -> NewCustomer {
        NewCustomer {
            name: name.into(),
            phone_number: phone.into(),
            ..NewCustomer::default()
        }
    }

    #[test]
    fn add_generates_sequential_codes() {
        let mut ledger = Ledger::new("Sparkle Laundry");
        let first = CustomerService::add(&mut ledger, form("Amira", "0501234567")).unwrap();
        let second = CustomerService::add(&mut ledger, form("Bilal", "0507654321")).unwrap();
        assert_eq!(first.customer_code, "CUST001");
        assert_eq!(second.customer_code, "CUST002");
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let mut ledger = Ledger::new("Sparkle Laundry");
        CustomerService::add(&mut ledger, form("Amira", "0501234567")).unwrap();
        let mut dup = form("Bilal", "0507654321");
        dup.customer_code = Some("CUST001".into());
        let err = CustomerService::add(&mut ledger, dup).expect_err("duplicate code must fail");
        assert!(err.is_validation(), "unexpected error: {err:?}");
    }

    #[test]
    fn search_matches_vehicle_numbers() {
        let mut ledger = Ledger::new("Sparkle Laundry");
        let mut with_vehicle = form("Amira", "0501234567");
        with_vehicle.vehicle_number = Some("DXB A 12345".into());
        CustomerService::add(&mut ledger, with_vehicle).unwrap();
        CustomerService::add(&mut ledger, form("Bilal", "0507654321")).unwrap();

        let hits = CustomerService::search(&ledger, "dxb a");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Amira");
    }

    #[test]
    fn remove_fails_for_unknown_customer() {
        let mut ledger = Ledger::new("Sparkle Laundry");
        let err = CustomerService::remove(&mut ledger, Uuid::new_v4())
            .expect_err("unknown customer must fail");
        assert!(matches!(err, LedgerError::NotFound(_)), "unexpected: {err:?}");
    }
}
