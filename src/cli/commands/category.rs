use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::domain::AddOutcome;

use super::{parse_index, prompt_index};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add-category",
            "Register a category name",
            "add-category <name>",
            cmd_add_category,
        )
        .with_aliases(&["5"]),
        CommandEntry::new(
            "assign-category",
            "Attach a registered category to an expense",
            "assign-category <index> <name>",
            cmd_assign_category,
        )
        .with_aliases(&["6"]),
        CommandEntry::new(
            "categories",
            "List registered categories",
            "categories",
            cmd_categories,
        )
        .with_aliases(&["7"]),
    ]
}

fn cmd_add_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = if !args.is_empty() {
        args.join(" ")
    } else if context.mode() == CliMode::Interactive {
        io::prompt_text("Category name")?
    } else {
        return Err(CommandError::InvalidArguments(
            "usage: add-category <name>".into(),
        ));
    };

    match context.tracker.add_category(&name)? {
        AddOutcome::Added => io::print_success(format!("Category `{}` added.", name.trim())),
        AddOutcome::AlreadyPresent => {
            io::print_info(format!("Category `{}` already exists.", name.trim()))
        }
    }
    Ok(())
}

fn cmd_assign_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (position, name) = match args {
        [index, name @ ..] if !name.is_empty() => (parse_index(index)?, name.join(" ")),
        [] if context.mode() == CliMode::Interactive => {
            let position = prompt_index("Expense index")?;
            (position, io::prompt_text("Category name")?)
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: assign-category <index> <name>".into(),
            ))
        }
    };

    let name = name.trim();
    context.tracker.assign_category(position, name)?;
    io::print_success(format!("Expense {} is now in `{}`.", position, name));
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let categories = context.tracker.categories();
    if categories.is_empty() {
        io::print_warning("No categories registered.");
        return Ok(());
    }
    output_section("Categories");
    for name in categories.iter() {
        io::print_info(format!("  {}", name));
    }
    Ok(())
}
