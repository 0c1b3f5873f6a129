//! Customer record commands.

use crate::cli::commands::CommandEntry;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::{CustomerService, NewCustomer};
use crate::ledger::Customer;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "customer",
        "Customer records (add, list, find, remove)",
        "customer <add|list|find|remove>",
        cmd_customer,
    )]
}

fn cmd_customer(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (subcommand, rest) = args.split_first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: customer <add|list|find|remove>".into())
    })?;

    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "list" => handle_list(context),
        "find" | "search" => handle_find(context, rest),
        "remove" | "delete" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown customer subcommand `{}`. Available: add, list, find, remove",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: customer add <name> <phone> [vehicle]".into(),
        ));
    }
    let form = NewCustomer {
        customer_code: None,
        name: args[0].to_string(),
        phone_number: args[1].to_string(),
        vehicle_number: args.get(2).map(|v| v.to_string()),
        address: None,
        email: None,
    };
    let ledger = context.ledger_mut()?;
    let customer = CustomerService::add(ledger, form)?;
    context.persist()?;
    output::success(format!(
        "Added {} ({}).",
        customer.name, customer.customer_code
    ));
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let ledger = context.ledger()?;
    let customers = CustomerService::list(ledger);
    if customers.is_empty() {
        output::info("No customers yet.");
        return Ok(());
    }
    output::section("Customers");
    for customer in customers {
        print_row(customer);
    }
    Ok(())
}

fn handle_find(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    if query.trim().is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: customer find <query>".into(),
        ));
    }
    let ledger = context.ledger()?;
    let hits = CustomerService::search(ledger, &query);
    if hits.is_empty() {
        output::info(format!("No customers match `{}`.", query.trim()));
        return Ok(());
    }
    for customer in hits {
        print_row(customer);
    }
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let code = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: customer remove <code>".into()))?;
    let id = context
        .ledger()?
        .customer_by_code(code)
        .map(|c| c.id)
        .ok_or_else(|| CommandError::Message(format!("no customer with code `{}`", code)))?;
    if !context.confirm("Remove this customer and all their orders and payments?")? {
        output::info("Removal cancelled.");
        return Ok(());
    }
    let summary = CustomerService::remove(context.ledger_mut()?, id)?;
    context.persist()?;
    output::success(format!(
        "Removed customer `{}` with {} order(s) and {} payment(s).",
        code, summary.orders_removed, summary.payments_removed
    ));
    Ok(())
}

fn print_row(customer: &Customer) {
    let vehicle = customer.vehicle_number.as_deref().unwrap_or("-");
    output::info(format!(
        "  {:<8} {:<24} {:<14} {}",
        customer.customer_code, customer.name, customer.phone_number, vehicle
    ));
}
