//! Pure derivation of money figures from the order and payment collections.
//!
//! Nothing in here mutates or errors: missing or empty inputs produce
//! zero-valued results, and identical inputs always produce identical
//! output. Writes that need these figures persisted go through
//! [`super::OrderService`].

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::ledger::{Order, OrderStatus, Payment, PaymentStatus};
use crate::money;

/// Derived figures for a single order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBalance {
    pub amount_paid: Decimal,
    /// Remainder owed, clamped at zero. Overpayment stays visible in
    /// `amount_paid`.
    pub balance_due: Decimal,
    pub payment_status: PaymentStatus,
}

/// Derived figures across all of one customer's orders and payments.
/// Cancelled orders contribute to nothing, including `total_orders`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerAggregate {
    pub total_orders: usize,
    /// Orders outside the terminal set (completed, delivered, cancelled).
    pub pending_order_count: usize,
    pub total_paid: Decimal,
    /// `max(0, non-cancelled order totals - customer payments)`.
    pub pending_amount: Decimal,
}

pub struct BalanceService;

impl BalanceService {
    /// Reconciles one order against the payment rows applied to it.
    /// Extra payments in the input that reference other orders are ignored,
    /// so callers may pass any superset.
    pub fn order_balance<'a, I>(order: &Order, payments: I) -> OrderBalance
    where
        I: IntoIterator<Item = &'a Payment>,
    {
        let amount_paid: Decimal = payments
            .into_iter()
            .filter(|p| p.order_id == Some(order.id))
            .map(|p| p.amount)
            .sum();
        OrderBalance {
            amount_paid,
            balance_due: money::clamp_non_negative(order.total - amount_paid),
            payment_status: Self::payment_status(amount_paid, order.total),
        }
    }

    /// Maps a paid amount against a total onto the derived payment state.
    pub fn payment_status(amount_paid: Decimal, total: Decimal) -> PaymentStatus {
        if amount_paid <= Decimal::ZERO {
            PaymentStatus::Pending
        } else if amount_paid >= total {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Partial
        }
    }

    /// Aggregates one customer's position across all orders and payments.
    /// The inputs may be the full collections; filtering happens here.
    pub fn customer_aggregate<'a, O, P>(
        customer_id: Uuid,
        orders: O,
        payments: P,
    ) -> CustomerAggregate
    where
        O: IntoIterator<Item = &'a Order>,
        P: IntoIterator<Item = &'a Payment>,
    {
        let mut total_orders = 0;
        let mut pending_order_count = 0;
        let mut billed = Decimal::ZERO;
        for order in orders
            .into_iter()
            .filter(|o| o.customer_id == customer_id)
            .filter(|o| o.status != OrderStatus::Cancelled)
        {
            total_orders += 1;
            billed += order.total;
            if !order.status.is_terminal() {
                pending_order_count += 1;
            }
        }

        let total_paid: Decimal = payments
            .into_iter()
            .filter(|p| p.customer_id == customer_id)
            .map(|p| p.amount)
            .sum();

        CustomerAggregate {
            total_orders,
            pending_order_count,
            total_paid,
            pending_amount: money::clamp_non_negative(billed - total_paid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{OrderItem, PaymentMethod};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn order_for(customer_id: Uuid, total: Decimal, status: OrderStatus) -> Order {
        let breakdown = money::vat_breakdown(total / dec!(1.05));
        Order {
            id: Uuid::new_v4(),
            order_number: "ORD-001".into(),
            customer_id,
            items: vec![OrderItem {
                service_id: Uuid::new_v4(),
                service_name: "Wash & Fold".into(),
                quantity: 1,
                price: breakdown.subtotal,
            }],
            subtotal: breakdown.subtotal,
            vat_amount: breakdown.vat_amount,
            total,
            amount_paid: dec!(0),
            status,
            payment_status: PaymentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    fn payment_for(customer_id: Uuid, order_id: Option<Uuid>, amount: Decimal) -> Payment {
        let mut payment = Payment::new(customer_id, amount, PaymentMethod::Cash);
        payment.order_id = order_id;
        payment
    }

    #[test]
    fn unpaid_order_is_pending_with_full_balance() {
        let customer = Uuid::new_v4();
        let order = order_for(customer, dec!(31.50), OrderStatus::Pending);
        let balance = BalanceService::order_balance(&order, []);
        assert_eq!(balance.amount_paid, dec!(0));
        assert_eq!(balance.balance_due, dec!(31.50));
        assert_eq!(balance.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn partial_payment_leaves_remainder_due() {
        let customer = Uuid::new_v4();
        let order = order_for(customer, dec!(31.50), OrderStatus::Pending);
        let payment = payment_for(customer, Some(order.id), dec!(15.00));
        let balance = BalanceService::order_balance(&order, [&payment]);
        assert_eq!(balance.amount_paid, dec!(15.00));
        assert_eq!(balance.balance_due, dec!(16.50));
        assert_eq!(balance.payment_status, PaymentStatus::Partial);
    }

    #[test]
    fn overpayment_is_paid_with_zero_balance_due() {
        let customer = Uuid::new_v4();
        let order = order_for(customer, dec!(31.50), OrderStatus::Pending);
        let payment = payment_for(customer, Some(order.id), dec!(40.00));
        let balance = BalanceService::order_balance(&order, [&payment]);
        assert_eq!(balance.amount_paid, dec!(40.00));
        assert_eq!(balance.balance_due, dec!(0));
        assert_eq!(balance.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn payments_for_other_orders_are_ignored() {
        let customer = Uuid::new_v4();
        let order = order_for(customer, dec!(31.50), OrderStatus::Pending);
        let unrelated = payment_for(customer, Some(Uuid::new_v4()), dec!(99.00));
        let walk_in = payment_for(customer, None, dec!(5.00));
        let balance = BalanceService::order_balance(&order, [&unrelated, &walk_in]);
        assert_eq!(balance.amount_paid, dec!(0));
        assert_eq!(balance.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn aggregate_excludes_cancelled_orders_entirely() {
        let customer = Uuid::new_v4();
        let orders = vec![
            order_for(customer, dec!(20.00), OrderStatus::Delivered),
            order_for(customer, dec!(30.00), OrderStatus::InProgress),
            order_for(customer, dec!(20.00), OrderStatus::Cancelled),
        ];
        let payments = vec![payment_for(customer, None, dec!(10.00))];
        let aggregate = BalanceService::customer_aggregate(customer, &orders, &payments);
        assert_eq!(aggregate.total_orders, 2);
        assert_eq!(aggregate.pending_order_count, 1);
        assert_eq!(aggregate.total_paid, dec!(10.00));
        assert_eq!(aggregate.pending_amount, dec!(40.00));
    }

    #[test]
    fn aggregate_never_goes_negative() {
        let customer = Uuid::new_v4();
        let orders = vec![order_for(customer, dec!(10.00), OrderStatus::Delivered)];
        let payments = vec![payment_for(customer, None, dec!(25.00))];
        let aggregate = BalanceService::customer_aggregate(customer, &orders, &payments);
        assert_eq!(aggregate.pending_amount, dec!(0));
    }

    #[test]
    fn aggregate_is_deterministic() {
        let customer = Uuid::new_v4();
        let orders = vec![order_for(customer, dec!(52.50), OrderStatus::Ready)];
        let payments = vec![payment_for(customer, None, dec!(12.34))];
        let first = BalanceService::customer_aggregate(customer, &orders, &payments);
        let second = BalanceService::customer_aggregate(customer, &orders, &payments);
        assert_eq!(first, second);
    }

    #[test]
    fn other_customers_do_not_leak_into_the_aggregate() {
        let customer = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let orders = vec![order_for(stranger, dec!(99.00), OrderStatus::Pending)];
        let payments = vec![payment_for(stranger, None, dec!(50.00))];
        let aggregate = BalanceService::customer_aggregate(customer, &orders, &payments);
        assert_eq!(aggregate.total_orders, 0);
        assert_eq!(aggregate.pending_amount, dec!(0));
        assert_eq!(aggregate.total_paid, dec!(0));
    }
}
