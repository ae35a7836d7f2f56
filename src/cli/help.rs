use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Expense tracker");
    for entry in registry.list() {
        let shortcut = entry.aliases.first().copied().unwrap_or("");
        io::print_info(format!(
            "  {:>2}  {:<16} {}",
            shortcut, entry.name, entry.description
        ));
    }
    io::print_hint("Type a command name or its number. Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    io::print_info(format!("  Description: {}", entry.description));
    io::print_info(format!("  Usage: {}", entry.usage));
    if !entry.aliases.is_empty() {
        io::print_info(format!("  Shortcut: {}", entry.aliases.join(", ")));
    }
}
