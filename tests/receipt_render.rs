use chrono::{TimeZone, Utc};
use laundry_core::ledger::{OrderItem, PaymentStatus};
use laundry_core::receipt::OrderInvoice;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn fixed_invoice() -> OrderInvoice {
    OrderInvoice {
        shop_name: "Sparkle Laundry".into(),
        order_number: "ORD-007".into(),
        customer_name: "Amira Hassan".into(),
        customer_phone: "0501234567".into(),
        items: vec![
            OrderItem {
                service_id: Uuid::nil(),
                service_name: "Wash & Fold".into(),
                quantity: 2,
                price: dec!(15.00),
            },
            OrderItem {
                service_id: Uuid::nil(),
                service_name: "Ironing".into(),
                quantity: 5,
                price: dec!(4.99),
            },
        ],
        subtotal: dec!(54.95),
        vat_amount: dec!(2.75),
        total: dec!(57.70),
        amount_paid: dec!(20.00),
        balance_due: dec!(37.70),
        payment_status: PaymentStatus::Partial,
        created_at: Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap(),
        footer: "Thank you for your business!".into(),
    }
}

#[test]
fn order_invoice_layout_is_stable() {
    insta::assert_snapshot!(fixed_invoice().render_text(), @r###"
            Sparkle Laundry
            LAUNDRY RECEIPT
----------------------------------------
Order: ORD-007
Date:  14/03/2025 09:30
Name:  Amira Hassan
Phone: 0501234567
----------------------------------------
Item                         Qty  Amount
Wash & Fold                 2      30.00
Ironing                     5      24.95
----------------------------------------
Subtotal                       AED 54.95
VAT (5%)                        AED 2.75
TOTAL                          AED 57.70
Paid                           AED 20.00
Balance Due                    AED 37.70
Status: partial
----------------------------------------
      Thank you for your business!
"###);
}
