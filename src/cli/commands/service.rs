//! Price list commands.

use rust_decimal::Decimal;

use crate::cli::commands::CommandEntry;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::CatalogService;
use crate::ledger::{Service, DEFAULT_CATEGORIES};
use crate::money::format_amount;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "service",
        "Price list (add, list, toggle, remove)",
        "service <add|list|toggle|remove>",
        cmd_service,
    )]
}

fn cmd_service(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (subcommand, rest) = args.split_first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: service <add|list|toggle|remove>".into())
    })?;

    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "list" => handle_list(context, rest),
        "toggle" => handle_toggle(context, rest),
        "remove" | "delete" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown service subcommand `{}`. Available: add, list, toggle, remove",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 4 {
        return Err(CommandError::InvalidArguments(format!(
            "usage: service add <name> <price> <minutes> <category> (e.g. {})",
            DEFAULT_CATEGORIES.join(", ")
        )));
    }
    let price = parse_amount(args[1])?;
    let minutes: u32 = args[2].parse().map_err(|_| {
        CommandError::InvalidArguments(format!("invalid duration `{}` (minutes)", args[2]))
    })?;
    let service = Service::new(args[0], price, minutes, args[3]);
    let ledger = context.ledger_mut()?;
    CatalogService::add(ledger, service)?;
    context.persist()?;
    output::success(format!("Added service `{}`.", args[0]));
    Ok(())
}

fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let ledger = context.ledger()?;
    let services = if args.first() == Some(&"active") {
        CatalogService::active(ledger)
    } else {
        CatalogService::list(ledger)
    };
    if services.is_empty() {
        output::info("No services yet.");
        return Ok(());
    }
    output::section("Services");
    for service in services {
        let state = if service.active { "" } else { " (inactive)" };
        output::info(format!(
            "  {:<24} {:>12}  {:>4} min  {}{}",
            service.name,
            format_amount(service.price),
            service.duration_minutes,
            service.category,
            state
        ));
    }
    Ok(())
}

fn handle_toggle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: service toggle <name>".into()))?;
    let (id, active) = find_service(context.ledger()?, name)?;
    CatalogService::set_active(context.ledger_mut()?, id, !active)?;
    context.persist()?;
    let state = if active { "inactive" } else { "active" };
    output::success(format!("Service `{}` is now {}.", name, state));
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: service remove <name>".into()))?;
    let (id, _) = find_service(context.ledger()?, name)?;
    if !context.confirm("Remove this service from the price list?")? {
        output::info("Removal cancelled.");
        return Ok(());
    }
    CatalogService::remove(context.ledger_mut()?, id)?;
    context.persist()?;
    output::success(format!("Removed service `{}`.", name));
    Ok(())
}

fn find_service(
    ledger: &crate::ledger::Ledger,
    name: &str,
) -> Result<(uuid::Uuid, bool), CommandError> {
    ledger
        .services
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))
        .map(|s| (s.id, s.active))
        .ok_or_else(|| CommandError::Message(format!("no service named `{}`", name)))
}

pub(crate) fn parse_amount(input: &str) -> Result<Decimal, CommandError> {
    input
        .parse::<Decimal>()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid amount `{}`", input)))
}
