//! Dashboard and receipt commands.

use std::io;

use chrono::Utc;

use crate::cli::commands::CommandEntry;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::ReportService;
use crate::money::format_amount;
use crate::receipt::{build_order_invoice, build_payment_receipt, ReceiptPrinter, TextPrinter};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "dashboard",
            "Today's orders, pending returns, outstanding balances",
            "dashboard",
            cmd_dashboard,
        ),
        CommandEntry::new(
            "receipt",
            "Print a receipt to the terminal",
            "receipt <order|payment> <order_number|reference>",
            cmd_receipt,
        ),
    ]
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.ledger()?;
    let stats = ReportService::dashboard(ledger, Utc::now().date_naive());
    output::section("Dashboard");
    output::info(format!("Today's orders:       {}", stats.today_orders));
    output::info(format!("Pending returns:      {}", stats.pending_returns));
    output::info(format!(
        "Outstanding payments: {}",
        format_amount(stats.outstanding_payments)
    ));
    output::info(format!("Active customers:     {}", stats.active_customers));

    let pending = ReportService::pending_orders(ledger);
    if !pending.is_empty() {
        output::section("Pending orders");
        for row in pending {
            output::info(format!(
                "  {:<8} {:<20} {:<12} {:>12} due",
                row.order_number,
                row.customer_name,
                row.status.to_string(),
                format_amount(row.balance_due)
            ));
        }
    }
    Ok(())
}

fn cmd_receipt(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 2 {
        return Err(CommandError::InvalidArguments(
            "usage: receipt <order|payment> <order_number|reference>".into(),
        ));
    }
    let ledger = context.ledger()?;
    let footer = context.config.receipt_footer.as_deref();

    let rendered = match args[0].to_ascii_lowercase().as_str() {
        "order" => {
            let order = ledger
                .order_by_number(args[1])
                .ok_or_else(|| CommandError::Message(format!("no order `{}`", args[1])))?;
            build_order_invoice(ledger, order, footer)?.render_text()
        }
        "payment" => {
            let payment = ledger
                .payments
                .iter()
                .find(|p| p.reference == args[1])
                .ok_or_else(|| CommandError::Message(format!("no payment `{}`", args[1])))?;
            build_payment_receipt(ledger, payment, footer)?.render_text()
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown receipt kind `{}` (order, payment)",
                other
            )));
        }
    };

    let mut printer = TextPrinter::new(io::stdout());
    printer.print(&rendered)?;
    Ok(())
}
