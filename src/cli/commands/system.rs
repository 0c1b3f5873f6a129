//! Shell housekeeping commands.

use crate::cli::commands::CommandEntry;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
        CommandEntry::new("quit", "Exit the shell", "quit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let needle = name.to_ascii_lowercase();
        match context.registry().get(&needle) {
            Some(entry) => {
                output::info(format!("{} - {}", entry.name, entry.description));
                output::info(format!("usage: {}", entry.usage));
            }
            None => {
                return Err(CommandError::Message(format!("no command `{}`", name)));
            }
        }
        return Ok(());
    }

    output::section("Commands");
    for entry in context.registry().iter() {
        if entry.name == "quit" {
            continue;
        }
        output::info(format!("  {:<10} {}", entry.name, entry.description));
    }
    output::hint("Use `help <command>` for usage details.");
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info("Goodbye.");
    Err(CommandError::ExitRequested)
}
