//! Store lifecycle commands: create, open, save, backup, restore.

use crate::cli::commands::CommandEntry;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "store",
        "Store operations (new, open, save, list, backup, restore...)",
        "store <new|open|save|list|backup|backups|restore|close>",
        cmd_store,
    )]
}

fn cmd_store(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (subcommand, rest) = args.split_first().ok_or_else(|| {
        CommandError::InvalidArguments(
            "usage: store <new|open|save|list|backup|backups|restore|close>".into(),
        )
    })?;

    match subcommand.to_ascii_lowercase().as_str() {
        "new" => handle_new(context, rest),
        "open" | "load" => handle_open(context, rest),
        "save" => handle_save(context),
        "list" => handle_list(context),
        "backup" => handle_backup(context, rest),
        "backups" | "list-backups" => handle_list_backups(context),
        "restore" => handle_restore(context, rest),
        "close" => handle_close(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown store subcommand `{}`. Available: new, open, save, list, backup, backups, restore, close",
            other
        ))),
    }
}

fn handle_new(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: store new <name> [shop name...]".into())
    })?;
    let shop_name = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        context.config.shop_name.clone()
    };
    context.manager.create(name, &shop_name)?;
    output::success(format!("Store `{}` created and opened.", name));
    Ok(())
}

fn handle_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: store open <name>".into()))?;
    context.manager.open(name)?;
    let ledger = context.manager.require_current()?;
    output::success(format!(
        "Opened `{}` ({} customers, {} orders).",
        name,
        ledger.customers.len(),
        ledger.orders.len()
    ));
    Ok(())
}

fn handle_save(context: &mut ShellContext) -> CommandResult {
    let path = context.manager.save()?;
    output::success(format!("Saved to {}.", path.display()));
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let stores = context.manager.storage().list_stores()?;
    if stores.is_empty() {
        output::info("No stores yet. Use `store new <name>` to create one.");
        return Ok(());
    }
    output::section("Stores");
    for name in stores {
        let marker = if context.manager.current_name() == Some(name.as_str()) {
            " (open)"
        } else {
            ""
        };
        output::info(format!("  {}{}", name, marker));
    }
    Ok(())
}

fn handle_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    };
    let path = context.manager.backup(note.as_deref())?;
    output::success(format!("Backup written to {}.", path.display()));
    Ok(())
}

fn handle_list_backups(context: &mut ShellContext) -> CommandResult {
    let backups = context.manager.list_backups()?;
    if backups.is_empty() {
        output::info("No backups for this store yet.");
        return Ok(());
    }
    output::section("Backups (newest first)");
    for name in backups {
        output::info(format!("  {}", name));
    }
    Ok(())
}

fn handle_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let backup_name = args.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: store restore <backup_file>".into())
    })?;
    if !context.confirm("Replace the current store with this backup?")? {
        output::info("Restore cancelled.");
        return Ok(());
    }
    context.manager.restore_backup(backup_name)?;
    output::success(format!("Restored from `{}`.", backup_name));
    Ok(())
}

fn handle_close(context: &mut ShellContext) -> CommandResult {
    context.manager.close();
    output::info("Store closed.");
    Ok(())
}
