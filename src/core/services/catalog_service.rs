//! CRUD helpers for the service price list.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::services::ServiceResult;
use crate::errors::LedgerError;
use crate::ledger::{Ledger, Service};

pub struct CatalogService;

impl CatalogService {
    pub fn add(ledger: &mut Ledger, service: Service) -> ServiceResult<Uuid> {
        if service.name.trim().is_empty() {
            return Err(LedgerError::Validation("service name is required".into()));
        }
        if service.price < Decimal::ZERO {
            return Err(LedgerError::Validation(
                "service price must not be negative".into(),
            ));
        }
        Ok(ledger.add_service(service))
    }

    pub fn update<F>(ledger: &mut Ledger, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Service),
    {
        let service = ledger
            .service_mut(id)
            .ok_or_else(|| LedgerError::NotFound(format!("service {}", id)))?;
        mutator(service);
        ledger.touch();
        Ok(())
    }

    /// Retires or reinstates a catalog entry. Historical orders keep their
    /// copied prices either way.
    pub fn set_active(ledger: &mut Ledger, id: Uuid, active: bool) -> ServiceResult<()> {
        Self::update(ledger, id, |service| service.active = active)
    }

    pub fn remove(ledger: &mut Ledger, id: Uuid) -> ServiceResult<Service> {
        ledger
            .remove_service(id)
            .ok_or_else(|| LedgerError::NotFound(format!("service {}", id)))
    }

    pub fn list(ledger: &Ledger) -> Vec<&Service> {
        ledger.services.iter().collect()
    }

    pub fn active(ledger: &Ledger) -> Vec<&Service> {
        ledger.services.iter().filter(|s| s.active).collect()
    }
}
