use std::io;

use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;

use crate::cli::commands::{self, CommandRegistry};
use crate::cli::output;
use crate::config::{Config, ConfigManager};
use crate::core::StoreManager;
use crate::errors::LedgerError;
use crate::storage::JsonStorage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("No store is open. Use `store new` or `store open` first.")]
    StoreNotLoaded,
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("{0}")]
    Command(String),
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

pub struct ShellContext {
    pub manager: StoreManager,
    pub config: Config,
    pub running: bool,
    mode: CliMode,
    registry: CommandRegistry,
    theme: ColorfulTheme,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let storage = JsonStorage::new(None, Some(config.backup_retention))?;
        let mut context = Self {
            manager: StoreManager::new(Box::new(storage)),
            config,
            running: true,
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            theme: ColorfulTheme::default(),
        };
        if let Some(name) = context.manager.open_last().unwrap_or(None) {
            output::info(format!("Opened last store `{}`.", name));
        }
        Ok(context)
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        match self.manager.current_name() {
            Some(name) => format!("laundry ({})> ", name),
            None => "laundry> ".to_string(),
        }
    }

    pub(crate) fn ledger(&self) -> Result<&crate::ledger::Ledger, CommandError> {
        self.manager
            .current
            .as_ref()
            .ok_or(CommandError::StoreNotLoaded)
    }

    pub(crate) fn ledger_mut(&mut self) -> Result<&mut crate::ledger::Ledger, CommandError> {
        self.manager
            .current
            .as_mut()
            .ok_or(CommandError::StoreNotLoaded)
    }

    /// Writes the open store to disk. Mutating commands call this so the
    /// on-disk document always reflects the last accepted operation.
    pub(crate) fn persist(&mut self) -> CommandResult {
        self.manager.save()?;
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let handler = match self.registry.get(command) {
            Some(entry) => entry.handler,
            None => {
                self.suggest_command(raw);
                return Ok(LoopControl::Continue);
            }
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);
        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::hint(format!("Did you mean `{}`?", best));
            }
        }
    }

    /// Destructive actions prompt in interactive mode and proceed
    /// unconditionally when scripted.
    pub(crate) fn confirm(&self, question: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(question)
            .default(false)
            .interact()?)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        self.confirm("Exit shell?").map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(&message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::StoreNotLoaded => {
                output::error("No store is open. Use `store new` or `store open` first.");
                Ok(())
            }
            other => {
                output::error(other.to_string());
                Ok(())
            }
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}
