pub mod balance_service;
pub mod catalog_service;
pub mod customer_service;
pub mod order_service;
pub mod report_service;

pub use balance_service::{BalanceService, CustomerAggregate, OrderBalance};
pub use catalog_service::CatalogService;
pub use customer_service::{CustomerService, NewCustomer};
pub use order_service::{InitialPayment, NewOrder, NewOrderItem, OrderService};
pub use report_service::{DashboardStats, PaymentsSummary, PendingOrderRow, ReportService};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, LedgerError>;
