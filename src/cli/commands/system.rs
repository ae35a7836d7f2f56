use std::path::PathBuf;

use crate::cli::core::{report_reconciliation, CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "reconcile",
            "Compare the ledger with the database and repair divergence",
            "reconcile",
            cmd_reconcile,
        ),
        CommandEntry::new(
            "export",
            "Write the ledger to a JSON file",
            "export <path>",
            cmd_export,
        ),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ]
}

fn cmd_reconcile(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let report = context.tracker.reconcile()?;
    report_reconciliation(&report);
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: export <path>".into()));
    };
    let path = PathBuf::from(raw);
    context.tracker.export_json(&path)?;
    io::print_success(format!("Ledger exported to {}.", path.display()));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(command) = context.command(&command) {
            help::print_command(command);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
