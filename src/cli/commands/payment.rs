//! Payment recording and reconciliation commands.

use crate::cli::commands::order::{find_order, parse_method};
use crate::cli::commands::service::parse_amount;
use crate::cli::commands::CommandEntry;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::OrderService;
use crate::ledger::{Ledger, Payment};
use crate::money::format_amount;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "pay",
        "Payments (order, customer, delete, list)",
        "pay <order|customer|delete|list>",
        cmd_pay,
    )]
}

fn cmd_pay(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (subcommand, rest) = args.split_first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: pay <order|customer|delete|list>".into())
    })?;

    match subcommand.to_ascii_lowercase().as_str() {
        "order" => handle_order(context, rest),
        "customer" => handle_customer(context, rest),
        "delete" | "remove" => handle_delete(context, rest),
        "list" => handle_list(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown pay subcommand `{}`. Available: order, customer, delete, list",
            other
        ))),
    }
}

fn handle_order(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: pay order <order_number> <amount> <method> [note...]".into(),
        ));
    }
    let amount = parse_amount(args[1])?;
    let method = parse_method(args[2])?;
    let note = join_note(&args[3..]);
    let id = find_order(context.ledger()?, args[0])?;
    let payment =
        OrderService::record_payment(context.ledger_mut()?, id, amount, method, note.as_deref())?;
    context.persist()?;
    let order = context.ledger()?.order(id);
    let due = order.map(|o| o.balance_due()).unwrap_or_default();
    output::success(format!(
        "Recorded {} ({}). Balance due: {}.",
        payment.reference,
        format_amount(payment.amount),
        format_amount(due)
    ));
    Ok(())
}

fn handle_customer(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: pay customer <code> <amount> <method> [note...]".into(),
        ));
    }
    let amount = parse_amount(args[1])?;
    let method = parse_method(args[2])?;
    let note = join_note(&args[3..]);
    let customer_id = context
        .ledger()?
        .customer_by_code(args[0])
        .map(|c| c.id)
        .ok_or_else(|| CommandError::Message(format!("no customer with code `{}`", args[0])))?;
    let payment = OrderService::record_customer_payment(
        context.ledger_mut()?,
        customer_id,
        amount,
        method,
        note.as_deref(),
    )?;
    context.persist()?;
    output::success(format!(
        "Recorded {} ({}) for {}.",
        payment.reference,
        format_amount(payment.amount),
        args[0]
    ));
    Ok(())
}

fn handle_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let reference = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: pay delete <reference>".into()))?;
    let id = context
        .ledger()?
        .payments
        .iter()
        .find(|p| p.reference == *reference)
        .map(|p| p.id)
        .ok_or_else(|| CommandError::Message(format!("no payment `{}`", reference)))?;
    if !context.confirm("Delete this payment?")? {
        output::info("Deletion cancelled.");
        return Ok(());
    }
    let removed = OrderService::delete_payment(context.ledger_mut()?, id)?;
    context.persist()?;
    output::success(format!(
        "Deleted {} ({}).",
        removed.reference,
        format_amount(removed.amount)
    ));
    Ok(())
}

fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let ledger = context.ledger()?;
    let payments: Vec<&Payment> = match args.first() {
        Some(number) => {
            let order = ledger
                .order_by_number(number)
                .ok_or_else(|| CommandError::Message(format!("no order `{}`", number)))?;
            ledger.payments_for_order(order.id)
        }
        None => ledger.payments.iter().collect(),
    };
    if payments.is_empty() {
        output::info("No payments recorded.");
        return Ok(());
    }
    output::section("Payments");
    for payment in payments {
        print_row(ledger, payment);
    }
    Ok(())
}

fn print_row(ledger: &Ledger, payment: &Payment) {
    let order = payment
        .order_id
        .and_then(|id| ledger.order(id))
        .map(|o| o.order_number.clone())
        .unwrap_or_else(|| "-".into());
    output::info(format!(
        "  {:<18} {:<8} {:>12}  {:<13} {}",
        payment.reference,
        order,
        format_amount(payment.amount),
        payment.method.to_string(),
        payment.date.format("%d/%m/%Y %H:%M")
    ));
}

fn join_note(args: &[&str]) -> Option<String> {
    if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    }
}
