//! Coordinates order and payment writes so the money invariants hold after
//! every operation.
//!
//! All mutations are staged before the ledger is touched: validation and
//! record construction happen first, inserts last. A caller never observes
//! an order with `amount_paid` set but no payment row behind it.

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::core::services::{BalanceService, ServiceResult};
use crate::errors::LedgerError;
use crate::ledger::{Ledger, Order, OrderItem, OrderStatus, Payment, PaymentMethod, PaymentStatus};
use crate::money;

/// One requested order line. `price_override` covers negotiated prices and
/// manual discounts; when absent the catalog price is copied.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub service_id: Uuid,
    pub quantity: u32,
    pub price_override: Option<Decimal>,
}

/// Payment taken at the counter while the order is created. Applied in the
/// same unit of work as the order itself.
#[derive(Debug, Clone)]
pub struct InitialPayment {
    pub amount: Decimal,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: Uuid,
    pub items: Vec<NewOrderItem>,
    pub initial_payment: Option<InitialPayment>,
}

pub struct OrderService;

impl OrderService {
    /// Creates an order (and, if requested, its counter payment) atomically
    /// and returns the stored order.
    pub fn create_order(ledger: &mut Ledger, request: NewOrder) -> ServiceResult<Order> {
        if ledger.customer(request.customer_id).is_none() {
            return Err(LedgerError::Validation(format!(
                "customer {} does not exist",
                request.customer_id
            )));
        }
        if request.items.is_empty() {
            return Err(LedgerError::Validation(
                "an order needs at least one service line".into(),
            ));
        }

        let mut items = Vec::with_capacity(request.items.len());
        for line in &request.items {
            if line.quantity == 0 {
                return Err(LedgerError::Validation(
                    "line quantity must be at least 1".into(),
                ));
            }
            let service = ledger.service(line.service_id).ok_or_else(|| {
                LedgerError::Validation(format!("service {} does not exist", line.service_id))
            })?;
            let price = line.price_override.unwrap_or(service.price);
            if price < Decimal::ZERO {
                return Err(LedgerError::Validation(
                    "line price must not be negative".into(),
                ));
            }
            items.push(OrderItem {
                service_id: service.id,
                service_name: service.name.clone(),
                quantity: line.quantity,
                price: money::round2(price),
            });
        }

        let raw_subtotal: Decimal = items.iter().map(OrderItem::line_total).sum();
        let breakdown = money::vat_breakdown(raw_subtotal);

        let mut order = Order {
            id: Uuid::new_v4(),
            order_number: ledger.next_order_number(),
            customer_id: request.customer_id,
            items,
            subtotal: breakdown.subtotal,
            vat_amount: breakdown.vat_amount,
            total: breakdown.total,
            amount_paid: Decimal::ZERO,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            created_at: chrono::Utc::now(),
        };

        // Stage the counter payment before anything lands in the ledger.
        let initial_payment = match request.initial_payment {
            Some(initial) if initial.amount > Decimal::ZERO => {
                let payment =
                    Payment::new(request.customer_id, money::round2(initial.amount), initial.method)
                        .for_order(order.id);
                order.amount_paid = payment.amount;
                order.payment_status =
                    BalanceService::payment_status(order.amount_paid, order.total);
                Some(payment)
            }
            Some(_) => {
                return Err(LedgerError::Validation(
                    "initial payment must be greater than zero".into(),
                ));
            }
            None => None,
        };

        let stored = order.clone();
        ledger.add_order(order);
        if let Some(payment) = initial_payment {
            ledger.add_payment(payment);
        }
        info!(order = %stored.order_number, total = %stored.total, "order created");
        Ok(stored)
    }

    /// Applies a payment against an order and refreshes the order's derived
    /// fields. Overpayment is accepted; the balance clamps at display time.
    pub fn record_payment(
        ledger: &mut Ledger,
        order_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
        note: Option<&str>,
    ) -> ServiceResult<Payment> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::Validation(
                "payment amount must be greater than zero".into(),
            ));
        }
        let order = ledger
            .order(order_id)
            .ok_or_else(|| LedgerError::NotFound(format!("order {}", order_id)))?;

        let mut payment =
            Payment::new(order.customer_id, money::round2(amount), method).for_order(order_id);
        if let Some(note) = note {
            payment = payment.with_note(note);
        }
        let stored = payment.clone();
        ledger.add_payment(payment);
        Self::refresh_order_balance(ledger, order_id);
        info!(order = %order_id, amount = %stored.amount, "payment recorded");
        Ok(stored)
    }

    /// Takes a walk-in payment against the customer only, with no order
    /// applied. It still counts toward the customer aggregate.
    pub fn record_customer_payment(
        ledger: &mut Ledger,
        customer_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
        note: Option<&str>,
    ) -> ServiceResult<Payment> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::Validation(
                "payment amount must be greater than zero".into(),
            ));
        }
        if ledger.customer(customer_id).is_none() {
            return Err(LedgerError::NotFound(format!("customer {}", customer_id)));
        }
        let mut payment = Payment::new(customer_id, money::round2(amount), method);
        if let Some(note) = note {
            payment = payment.with_note(note);
        }
        let stored = payment.clone();
        ledger.add_payment(payment);
        Ok(stored)
    }

    /// Removes a payment and recomputes the owning order downward.
    pub fn delete_payment(ledger: &mut Ledger, payment_id: Uuid) -> ServiceResult<Payment> {
        let removed = ledger
            .remove_payment(payment_id)
            .ok_or_else(|| LedgerError::NotFound(format!("payment {}", payment_id)))?;
        if let Some(order_id) = removed.order_id {
            Self::refresh_order_balance(ledger, order_id);
        }
        info!(payment = %removed.reference, "payment deleted");
        Ok(removed)
    }

    /// Accepts any status reassignment. Transition ordering is not
    /// enforced, matching the counter workflow where staff correct
    /// mistakes by moving orders backwards.
    pub fn update_status(
        ledger: &mut Ledger,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> ServiceResult<Order> {
        let order = ledger
            .order_mut(order_id)
            .ok_or_else(|| LedgerError::NotFound(format!("order {}", order_id)))?;
        order.status = new_status;
        let updated = order.clone();
        ledger.touch();
        Ok(updated)
    }

    /// Removes an order with its embedded items and any payments applied
    /// against it, so customer aggregates stay reconciled.
    pub fn delete_order(ledger: &mut Ledger, order_id: Uuid) -> ServiceResult<Order> {
        let removed = ledger
            .remove_order(order_id)
            .ok_or_else(|| LedgerError::NotFound(format!("order {}", order_id)))?;
        ledger.payments.retain(|p| p.order_id != Some(order_id));
        ledger.touch();
        info!(order = %removed.order_number, "order deleted");
        Ok(removed)
    }

    fn refresh_order_balance(ledger: &mut Ledger, order_id: Uuid) {
        let derived = ledger.order(order_id).map(|order| {
            BalanceService::order_balance(order, ledger.payments_for_order(order_id))
        });
        if let Some(balance) = derived {
            if let Some(order) = ledger.order_mut(order_id) {
                order.amount_paid = balance.amount_paid;
                order.payment_status = balance.payment_status;
            }
            ledger.touch();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Customer, PaymentStatus, Service};
    use rust_decimal_macros::dec;

    fn ledger_with_catalog() -> (Ledger, Uuid, Uuid) {
        let mut ledger = Ledger::new("Sparkle Laundry");
        let customer_id = ledger.add_customer(Customer::new("CUST001", "Amira", "0501234567"));
        let service_id = ledger.add_service(Service::new("Wash & Fold", dec!(15.00), 60, "Basic"));
        (ledger, customer_id, service_id)
    }

    fn one_line(service_id: Uuid, quantity: u32) -> Vec<NewOrderItem> {
        vec![NewOrderItem {
            service_id,
            quantity,
            price_override: None,
        }]
    }

    #[test]
    fn create_order_computes_vat_and_total() {
        let (mut ledger, customer_id, service_id) = ledger_with_catalog();
        let order = OrderService::create_order(
            &mut ledger,
            NewOrder {
                customer_id,
                items: one_line(service_id, 2),
                initial_payment: None,
            },
        )
        .unwrap();
        assert_eq!(order.subtotal, dec!(30.00));
        assert_eq!(order.vat_amount, dec!(1.50));
        assert_eq!(order.total, dec!(31.50));
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.order_number, "ORD-001");
    }

    #[test]
    fn create_order_rejects_empty_items() {
        let (mut ledger, customer_id, _) = ledger_with_catalog();
        let err = OrderService::create_order(
            &mut ledger,
            NewOrder {
                customer_id,
                items: Vec::new(),
                initial_payment: None,
            },
        )
        .expect_err("empty order must fail");
        assert!(err.is_validation(), "unexpected error: {err:?}");
        assert!(ledger.orders.is_empty());
    }

    #[test]
    fn create_order_rejects_unknown_customer() {
        let (mut ledger, _, service_id) = ledger_with_catalog();
        let err = OrderService::create_order(
            &mut ledger,
            NewOrder {
                customer_id: Uuid::new_v4(),
                items: one_line(service_id, 1),
                initial_payment: None,
            },
        )
        .expect_err("unknown customer must fail");
        assert!(err.is_validation(), "unexpected error: {err:?}");
    }

    #[test]
    fn initial_payment_lands_with_the_order() {
        let (mut ledger, customer_id, service_id) = ledger_with_catalog();
        let order = OrderService::create_order(
            &mut ledger,
            NewOrder {
                customer_id,
                items: one_line(service_id, 2),
                initial_payment: Some(InitialPayment {
                    amount: dec!(31.50),
                    method: PaymentMethod::Cash,
                }),
            },
        )
        .unwrap();
        assert_eq!(order.amount_paid, dec!(31.50));
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        // The payment row exists alongside the mirrored amount.
        assert_eq!(ledger.payments_for_order(order.id).len(), 1);
    }

    #[test]
    fn price_override_is_copied_permanently() {
        let (mut ledger, customer_id, service_id) = ledger_with_catalog();
        let order = OrderService::create_order(
            &mut ledger,
            NewOrder {
                customer_id,
                items: vec![NewOrderItem {
                    service_id,
                    quantity: 1,
                    price_override: Some(dec!(12.00)),
                }],
                initial_payment: None,
            },
        )
        .unwrap();
        assert_eq!(order.items[0].price, dec!(12.00));

        // Catalog edits must not rewrite the stored line.
        ledger.service_mut(service_id).unwrap().price = dec!(99.00);
        assert_eq!(ledger.order(order.id).unwrap().items[0].price, dec!(12.00));
    }

    #[test]
    fn record_and_delete_payment_roundtrips_the_status() {
        let (mut ledger, customer_id, service_id) = ledger_with_catalog();
        let order = OrderService::create_order(
            &mut ledger,
            NewOrder {
                customer_id,
                items: one_line(service_id, 2),
                initial_payment: None,
            },
        )
        .unwrap();

        let payment =
            OrderService::record_payment(&mut ledger, order.id, dec!(15.00), PaymentMethod::Card, None)
                .unwrap();
        let stored = ledger.order(order.id).unwrap();
        assert_eq!(stored.amount_paid, dec!(15.00));
        assert_eq!(stored.payment_status, PaymentStatus::Partial);
        assert_eq!(stored.balance_due(), dec!(16.50));

        OrderService::delete_payment(&mut ledger, payment.id).unwrap();
        let stored = ledger.order(order.id).unwrap();
        assert_eq!(stored.amount_paid, dec!(0));
        assert_eq!(stored.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn record_payment_rejects_non_positive_amounts() {
        let (mut ledger, customer_id, service_id) = ledger_with_catalog();
        let order = OrderService::create_order(
            &mut ledger,
            NewOrder {
                customer_id,
                items: one_line(service_id, 1),
                initial_payment: None,
            },
        )
        .unwrap();
        let err =
            OrderService::record_payment(&mut ledger, order.id, dec!(0), PaymentMethod::Cash, None)
                .expect_err("zero payment must fail");
        assert!(err.is_validation(), "unexpected error: {err:?}");
    }

    #[test]
    fn record_payment_fails_for_missing_order() {
        let (mut ledger, _, _) = ledger_with_catalog();
        let err = OrderService::record_payment(
            &mut ledger,
            Uuid::new_v4(),
            dec!(5.00),
            PaymentMethod::Cash,
            None,
        )
        .expect_err("missing order must fail");
        assert!(matches!(err, LedgerError::NotFound(_)), "unexpected: {err:?}");
    }

    #[test]
    fn status_updates_are_permissive() {
        let (mut ledger, customer_id, service_id) = ledger_with_catalog();
        let order = OrderService::create_order(
            &mut ledger,
            NewOrder {
                customer_id,
                items: one_line(service_id, 1),
                initial_payment: None,
            },
        )
        .unwrap();

        // Forward, backward, and cancelling moves are all accepted.
        OrderService::update_status(&mut ledger, order.id, OrderStatus::Delivered).unwrap();
        OrderService::update_status(&mut ledger, order.id, OrderStatus::InProgress).unwrap();
        let updated =
            OrderService::update_status(&mut ledger, order.id, OrderStatus::Cancelled).unwrap();
        assert_eq!(updated.status, OrderStatus::Cancelled);
        // Nothing monetary moved.
        assert_eq!(updated.amount_paid, dec!(0));
    }

    #[test]
    fn delete_order_removes_its_payments() {
        let (mut ledger, customer_id, service_id) = ledger_with_catalog();
        let order = OrderService::create_order(
            &mut ledger,
            NewOrder {
                customer_id,
                items: one_line(service_id, 2),
                initial_payment: Some(InitialPayment {
                    amount: dec!(10.00),
                    method: PaymentMethod::Cash,
                }),
            },
        )
        .unwrap();
        OrderService::delete_order(&mut ledger, order.id).unwrap();
        assert!(ledger.orders.is_empty());
        assert!(ledger.payments.is_empty());
    }
}
