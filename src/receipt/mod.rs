//! Customer-facing receipt documents and their plain-text rendering.
//!
//! Documents are built by joining an order or payment with its customer so
//! rendering needs no further ledger access. The text layout targets
//! 40-column thermal printers.

use std::io;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::errors::LedgerError;
use crate::ledger::{Ledger, Order, OrderItem, Payment, PaymentStatus};
use crate::money::format_amount;

const RECEIPT_WIDTH: usize = 40;
const DEFAULT_FOOTER: &str = "Thank you for your business!";

/// A printable order invoice with customer details resolved.
#[derive(Debug, Clone)]
pub struct OrderInvoice {
    pub shop_name: String,
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
    pub amount_paid: Decimal,
    pub balance_due: Decimal,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub footer: String,
}

/// A printable confirmation for a single payment.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub shop_name: String,
    pub reference: String,
    pub customer_name: String,
    pub order_number: Option<String>,
    pub amount: Decimal,
    pub method: String,
    pub date: DateTime<Utc>,
    pub footer: String,
}

pub fn build_order_invoice(
    ledger: &Ledger,
    order: &Order,
    footer: Option<&str>,
) -> Result<OrderInvoice, LedgerError> {
    let customer = ledger
        .customer(order.customer_id)
        .ok_or_else(|| LedgerError::NotFound(format!("customer for {}", order.order_number)))?;
    Ok(OrderInvoice {
        shop_name: ledger.name.clone(),
        order_number: order.order_number.clone(),
        customer_name: customer.name.clone(),
        customer_phone: customer.phone_number.clone(),
        items: order.items.clone(),
        subtotal: order.subtotal,
        vat_amount: order.vat_amount,
        total: order.total,
        amount_paid: order.amount_paid,
        balance_due: order.balance_due(),
        payment_status: order.payment_status,
        created_at: order.created_at,
        footer: footer.unwrap_or(DEFAULT_FOOTER).to_string(),
    })
}

pub fn build_payment_receipt(
    ledger: &Ledger,
    payment: &Payment,
    footer: Option<&str>,
) -> Result<PaymentReceipt, LedgerError> {
    let customer = ledger
        .customer(payment.customer_id)
        .ok_or_else(|| LedgerError::NotFound(format!("customer for {}", payment.reference)))?;
    let order_number = payment
        .order_id
        .and_then(|id| ledger.order(id))
        .map(|order| order.order_number.clone());
    Ok(PaymentReceipt {
        shop_name: ledger.name.clone(),
        reference: payment.reference.clone(),
        customer_name: customer.name.clone(),
        order_number,
        amount: payment.amount,
        method: payment.method.to_string(),
        date: payment.date,
        footer: footer.unwrap_or(DEFAULT_FOOTER).to_string(),
    })
}

impl OrderInvoice {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        push_centered(&mut out, &self.shop_name);
        push_centered(&mut out, "LAUNDRY RECEIPT");
        push_rule(&mut out);
        push_line(&mut out, &format!("Order: {}", self.order_number));
        push_line(
            &mut out,
            &format!("Date:  {}", self.created_at.format("%d/%m/%Y %H:%M")),
        );
        push_line(&mut out, &format!("Name:  {}", self.customer_name));
        push_line(&mut out, &format!("Phone: {}", self.customer_phone));
        push_rule(&mut out);
        push_columns(&mut out, "Item", "Qty  Amount");
        for item in &self.items {
            let amount = format!("{:>3}  {:>9}", item.quantity, plain_amount(item.line_total()));
            push_columns(&mut out, &truncate(&item.service_name, 22), &amount);
        }
        push_rule(&mut out);
        push_columns(&mut out, "Subtotal", &format_amount(self.subtotal));
        push_columns(&mut out, "VAT (5%)", &format_amount(self.vat_amount));
        push_columns(&mut out, "TOTAL", &format_amount(self.total));
        push_columns(&mut out, "Paid", &format_amount(self.amount_paid));
        push_columns(&mut out, "Balance Due", &format_amount(self.balance_due));
        push_line(&mut out, &format!("Status: {}", self.payment_status));
        push_rule(&mut out);
        push_centered(&mut out, &self.footer);
        out
    }
}

impl PaymentReceipt {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        push_centered(&mut out, &self.shop_name);
        push_centered(&mut out, "PAYMENT RECEIPT");
        push_rule(&mut out);
        push_line(&mut out, &format!("Ref:   {}", self.reference));
        push_line(
            &mut out,
            &format!("Date:  {}", self.date.format("%d/%m/%Y %H:%M")),
        );
        push_line(&mut out, &format!("Name:  {}", self.customer_name));
        if let Some(number) = &self.order_number {
            push_line(&mut out, &format!("Order: {}", number));
        }
        push_line(&mut out, &format!("Method: {}", self.method));
        push_rule(&mut out);
        push_columns(&mut out, "Amount Received", &format_amount(self.amount));
        push_rule(&mut out);
        push_centered(&mut out, &self.footer);
        out
    }
}

/// Destination for rendered receipts. The desktop app drives a thermal
/// printer; here anything that accepts text qualifies.
pub trait ReceiptPrinter {
    fn print(&mut self, rendered: &str) -> Result<(), LedgerError>;
}

/// Writes rendered receipts to any `io::Write` sink.
pub struct TextPrinter<W: io::Write> {
    writer: W,
}

impl<W: io::Write> TextPrinter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> ReceiptPrinter for TextPrinter<W> {
    fn print(&mut self, rendered: &str) -> Result<(), LedgerError> {
        self.writer.write_all(rendered.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

fn push_line(out: &mut String, text: &str) {
    out.push_str(&truncate(text, RECEIPT_WIDTH));
    out.push('\n');
}

fn push_centered(out: &mut String, text: &str) {
    let text = truncate(text, RECEIPT_WIDTH);
    let pad = RECEIPT_WIDTH.saturating_sub(text.chars().count()) / 2;
    out.push_str(&" ".repeat(pad));
    out.push_str(&text);
    out.push('\n');
}

fn push_rule(out: &mut String) {
    out.push_str(&"-".repeat(RECEIPT_WIDTH));
    out.push('\n');
}

/// Left and right cells separated by enough spaces to fill the width.
fn push_columns(out: &mut String, left: &str, right: &str) {
    let left_len = left.chars().count();
    let right_len = right.chars().count();
    if left_len + right_len + 1 > RECEIPT_WIDTH {
        push_line(out, &format!("{} {}", left, right));
        return;
    }
    out.push_str(left);
    out.push_str(&" ".repeat(RECEIPT_WIDTH - left_len - right_len));
    out.push_str(right);
    out.push('\n');
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

fn plain_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}
