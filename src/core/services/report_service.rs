//! Read-only projections for the dashboard and payment reports. Everything
//! here is derived on read; nothing is cached or persisted.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::ledger::{Ledger, Order, OrderStatus, PaymentMethod, PaymentStatus};

/// Headline figures for the dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub today_orders: usize,
    /// Orders still waiting to be processed.
    pub pending_returns: usize,
    /// Unpaid remainder across non-cancelled orders.
    pub outstanding_payments: Decimal,
    pub active_customers: usize,
}

/// One row of the pending-orders table, joined with customer details so
/// the presentation layer renders without further lookups.
#[derive(Debug, Clone)]
pub struct PendingOrderRow {
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub status: OrderStatus,
    pub total: Decimal,
    pub balance_due: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Per-method takings over a reporting window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentsSummary {
    pub cash: Decimal,
    pub card: Decimal,
    pub bank_transfer: Decimal,
    pub online: Decimal,
    pub count: usize,
}

impl PaymentsSummary {
    pub fn grand_total(&self) -> Decimal {
        self.cash + self.card + self.bank_transfer + self.online
    }
}

pub struct ReportService;

impl ReportService {
    pub fn dashboard(ledger: &Ledger, today: NaiveDate) -> DashboardStats {
        let today_orders = ledger
            .orders
            .iter()
            .filter(|o| o.created_at.date_naive() == today)
            .count();
        let pending_returns = ledger
            .orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .count();
        let outstanding_payments = ledger
            .orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .filter(|o| o.payment_status != PaymentStatus::Paid)
            .map(Order::balance_due)
            .sum();
        DashboardStats {
            today_orders,
            pending_returns,
            outstanding_payments,
            active_customers: ledger.customers.len(),
        }
    }

    /// Non-terminal orders, newest first, with customer details joined in.
    pub fn pending_orders(ledger: &Ledger) -> Vec<PendingOrderRow> {
        let mut rows: Vec<PendingOrderRow> = ledger
            .orders
            .iter()
            .filter(|o| !o.status.is_terminal())
            .map(|order| {
                let customer = ledger.customer(order.customer_id);
                PendingOrderRow {
                    order_number: order.order_number.clone(),
                    customer_name: customer
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| "Unknown Customer".into()),
                    customer_phone: customer
                        .map(|c| c.phone_number.clone())
                        .unwrap_or_default(),
                    status: order.status,
                    total: order.total,
                    balance_due: order.balance_due(),
                    created_at: order.created_at,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }

    pub fn payments_summary(
        ledger: &Ledger,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> PaymentsSummary {
        let mut summary = PaymentsSummary::default();
        for payment in ledger
            .payments
            .iter()
            .filter(|p| p.date >= from && p.date <= to)
        {
            match payment.method {
                PaymentMethod::Cash => summary.cash += payment.amount,
                PaymentMethod::Card => summary.card += payment.amount,
                PaymentMethod::BankTransfer => summary.bank_transfer += payment.amount,
                PaymentMethod::Online => summary.online += payment.amount,
            }
            summary.count += 1;
        }
        summary
    }
}
