//! Shared runtime state for CLI interactions and command execution.

use crate::{
    config::{Config, ConfigManager},
    core::ExpenseTracker,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler may touch: the tracker, preferences, and the registry.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub tracker: ExpenseTracker,
    pub config: Config,
    /// Where `config set` saves changes; absent for throwaway sessions.
    pub config_manager: Option<ConfigManager>,
    pub running: bool,
}
