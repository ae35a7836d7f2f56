//! Core CLI dispatch, error reporting, and shell context lifecycle.

use std::io;

use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;
use tracing::info;

use crate::{
    config::{Config, ConfigManager},
    core::{ExpenseTracker, ReconcileReport, TrackerOptions},
    errors::ExpenseError,
    storage::SqliteGateway,
};

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
use super::shell::parse_command_line;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure of a single command. Reported to the user; the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] ExpenseError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Fatal shell error: ends the session.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ExpenseError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            CommandError::Io(inner) => CliError::Io(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl ShellContext {
    /// Loads configuration, opens the expense store, and replays it into the ledger.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let db_path = config.resolve_database_path(config_manager.base_dir());
        let gateway = SqliteGateway::open(&db_path)?;
        let tracker = ExpenseTracker::open(Box::new(gateway), TrackerOptions::from(&config))?;
        Ok(Self::with_tracker(mode, tracker, config).with_config_manager(config_manager))
    }

    pub fn with_tracker(mode: CliMode, tracker: ExpenseTracker, config: Config) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled,
            quiet_mode: mode == CliMode::Script,
        });
        Self {
            mode,
            registry,
            tracker,
            config,
            config_manager: None,
            running: true,
        }
    }

    pub fn with_config_manager(mut self, manager: ConfigManager) -> Self {
        self.config_manager = Some(manager);
        self
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn prompt(&self) -> String {
        format!("expenses ({})> ", self.tracker.ledger().len())
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    /// Parses and runs one line of input.
    pub fn execute_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(&err.message);
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let raw = &tokens[0];
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action("Exit expense tracker?").map_err(CliError::from)
    }

    /// Prints a command failure. Storage failures optionally trigger reconciliation.
    pub(crate) fn report_error(&mut self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(err) if err.is_storage() => {
                cli_io::print_error(&err);
                if self.config.reconcile_on_error {
                    self.reconcile_after_failure();
                }
                Ok(())
            }
            other => {
                cli_io::print_error(other);
                Ok(())
            }
        }
    }

    fn reconcile_after_failure(&mut self) {
        match self.tracker.reconcile() {
            Ok(report) => report_reconciliation(&report),
            Err(err) => cli_io::print_warning(format!("Reconciliation failed: {}", err)),
        }
    }

    /// Closes the expense store. Consumes the context so this happens once.
    pub fn shutdown(self) -> Result<(), CliError> {
        self.tracker.close()?;
        info!("expense tracker shut down");
        Ok(())
    }
}

pub(crate) fn report_reconciliation(report: &ReconcileReport) {
    if report.in_sync() {
        cli_io::print_success("Ledger and database are in sync.");
        return;
    }
    cli_io::print_warning(format!(
        "Ledger was rebuilt from the database ({} restored, {} dropped, {} updated).",
        report.store_only.len(),
        report.ledger_only.len(),
        report.changed.len()
    ));
}
