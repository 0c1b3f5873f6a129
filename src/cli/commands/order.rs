//! Order entry and lifecycle commands.

use crate::cli::commands::service::parse_amount;
use crate::cli::commands::CommandEntry;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::{InitialPayment, NewOrder, NewOrderItem, OrderService};
use crate::ledger::{Ledger, Order, OrderStatus, PaymentMethod};
use crate::money::format_amount;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "order",
        "Orders (new, list, status, show, remove)",
        "order <new|list|status|show|remove>",
        cmd_order,
    )]
}

fn cmd_order(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (subcommand, rest) = args.split_first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: order <new|list|status|show|remove>".into())
    })?;

    match subcommand.to_ascii_lowercase().as_str() {
        "new" => handle_new(context, rest),
        "list" => handle_list(context),
        "status" => handle_status(context, rest),
        "show" => handle_show(context, rest),
        "remove" | "delete" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown order subcommand `{}`. Available: new, list, status, show, remove",
            other
        ))),
    }
}

const NEW_USAGE: &str =
    "usage: order new <customer_code> <service>:<qty> [<service>:<qty>...] [paid <amount> <method>]";

fn handle_new(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (code, rest) = args
        .split_first()
        .ok_or_else(|| CommandError::InvalidArguments(NEW_USAGE.into()))?;

    // `paid <amount> <method>` trails the item list when present.
    let (item_args, initial_payment) = match rest.iter().position(|arg| *arg == "paid") {
        Some(idx) => {
            let tail = &rest[idx + 1..];
            if tail.len() != 2 {
                return Err(CommandError::InvalidArguments(NEW_USAGE.into()));
            }
            let amount = parse_amount(tail[0])?;
            let method = parse_method(tail[1])?;
            (&rest[..idx], Some(InitialPayment { amount, method }))
        }
        None => (rest, None),
    };

    if item_args.is_empty() {
        return Err(CommandError::InvalidArguments(NEW_USAGE.into()));
    }

    let ledger = context.ledger()?;
    let customer_id = ledger
        .customer_by_code(code)
        .map(|c| c.id)
        .ok_or_else(|| CommandError::Message(format!("no customer with code `{}`", code)))?;

    let mut items = Vec::with_capacity(item_args.len());
    for entry in item_args {
        items.push(parse_item(ledger, entry)?);
    }

    let order = OrderService::create_order(
        context.ledger_mut()?,
        NewOrder {
            customer_id,
            items,
            initial_payment,
        },
    )?;
    context.persist()?;
    output::success(format!(
        "Created {} for {} ({} due).",
        order.order_number,
        code,
        format_amount(order.balance_due())
    ));
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let ledger = context.ledger()?;
    if ledger.orders.is_empty() {
        output::info("No orders yet.");
        return Ok(());
    }
    output::section("Orders");
    for order in &ledger.orders {
        let customer = ledger
            .customer(order.customer_id)
            .map(|c| c.name.as_str())
            .unwrap_or("?");
        output::info(format!(
            "  {:<8} {:<20} {:<12} {:>12}  {:>12} due",
            order.order_number,
            customer,
            order.status.to_string(),
            format_amount(order.total),
            format_amount(order.balance_due())
        ));
    }
    Ok(())
}

fn handle_status(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 2 {
        return Err(CommandError::InvalidArguments(
            "usage: order status <order_number> <pending|in_progress|ready|completed|delivered|cancelled>"
                .into(),
        ));
    }
    let status = OrderStatus::parse(args[1]).ok_or_else(|| {
        CommandError::InvalidArguments(format!("unknown status `{}`", args[1]))
    })?;
    let id = find_order(context.ledger()?, args[0])?;
    let updated = OrderService::update_status(context.ledger_mut()?, id, status)?;
    context.persist()?;
    output::success(format!("{} is now {}.", updated.order_number, status));
    Ok(())
}

fn handle_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let number = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: order show <order_number>".into()))?;
    let ledger = context.ledger()?;
    let order = ledger
        .order_by_number(number)
        .ok_or_else(|| CommandError::Message(format!("no order `{}`", number)))?;
    print_detail(ledger, order);
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let number = args.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: order remove <order_number>".into())
    })?;
    let id = find_order(context.ledger()?, number)?;
    if !context.confirm("Remove this order and its payments?")? {
        output::info("Removal cancelled.");
        return Ok(());
    }
    let removed = OrderService::delete_order(context.ledger_mut()?, id)?;
    context.persist()?;
    output::success(format!("Removed {}.", removed.order_number));
    Ok(())
}

fn print_detail(ledger: &Ledger, order: &Order) {
    output::section(&order.order_number);
    let customer = ledger
        .customer(order.customer_id)
        .map(|c| c.display_label())
        .unwrap_or_else(|| "Unknown Customer".into());
    output::info(format!("Customer: {}", customer));
    output::info(format!(
        "Created:  {}",
        order.created_at.format("%d/%m/%Y %H:%M")
    ));
    output::info(format!(
        "Status:   {} / {}",
        order.status, order.payment_status
    ));
    for item in &order.items {
        output::info(format!(
            "  {:<24} x{:<3} {:>12}",
            item.service_name,
            item.quantity,
            format_amount(item.line_total())
        ));
    }
    output::info(format!("Subtotal: {}", format_amount(order.subtotal)));
    output::info(format!("VAT (5%): {}", format_amount(order.vat_amount)));
    output::info(format!("Total:    {}", format_amount(order.total)));
    output::info(format!("Paid:     {}", format_amount(order.amount_paid)));
    output::info(format!("Due:      {}", format_amount(order.balance_due())));
}

fn parse_item(ledger: &Ledger, entry: &str) -> Result<NewOrderItem, CommandError> {
    let (name, quantity) = match entry.rsplit_once(':') {
        Some((name, qty)) => {
            let quantity: u32 = qty.parse().map_err(|_| {
                CommandError::InvalidArguments(format!("invalid quantity in `{}`", entry))
            })?;
            (name, quantity)
        }
        None => (entry, 1),
    };
    let service = ledger
        .services
        .iter()
        .filter(|s| s.active)
        .find(|s| s.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| CommandError::Message(format!("no active service named `{}`", name)))?;
    Ok(NewOrderItem {
        service_id: service.id,
        quantity,
        price_override: None,
    })
}

pub(crate) fn find_order(ledger: &Ledger, number: &str) -> Result<uuid::Uuid, CommandError> {
    ledger
        .order_by_number(number)
        .map(|o| o.id)
        .ok_or_else(|| CommandError::Message(format!("no order `{}`", number)))
}

pub(crate) fn parse_method(input: &str) -> Result<PaymentMethod, CommandError> {
    PaymentMethod::parse(input).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "unknown payment method `{}` (cash, card, bank_transfer, online)",
            input
        ))
    })
}
