pub mod category;
pub mod chart;
pub mod config;
pub mod expense;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::io;
use crate::cli::registry::CommandRegistry;

/// Registers every shell command; overview and completion follow this order.
pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        expense::definitions(),
        category::definitions(),
        chart::definitions(),
        config::definitions(),
        system::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}

pub(crate) fn parse_index(raw: &str) -> Result<usize, CommandError> {
    raw.trim().parse::<usize>().map_err(|_| {
        CommandError::InvalidArguments(format!(
            "`{}` is not a valid index (expected a non-negative integer)",
            raw
        ))
    })
}

pub(crate) fn prompt_index(prompt: &str) -> Result<usize, CommandError> {
    io::prompt_validated(prompt, |raw| {
        parse_index(raw).map_err(|err| err.to_string())
    })
}
