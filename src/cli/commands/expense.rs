use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::formatting::{format_amount, format_date, pluralize};
use crate::cli::ui::table::{Alignment, Table, TableColumn};
use crate::domain::{parse_amount, parse_date, Displayable, Record};

use super::{parse_index, prompt_index};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a new expense",
            "add [<YYYY-MM-DD> <description> <amount>]",
            cmd_add,
        )
        .with_aliases(&["1"]),
        CommandEntry::new("remove", "Remove an expense by index", "remove <index>", cmd_remove)
            .with_aliases(&["2"]),
        CommandEntry::new("list", "List all expenses", "list", cmd_list).with_aliases(&["3"]),
        CommandEntry::new("total", "Show the sum of all expenses", "total", cmd_total)
            .with_aliases(&["4"]),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let record = match args {
        [] if context.mode() == CliMode::Interactive => prompt_record()?,
        [date, description @ .., amount] if !description.is_empty() => {
            Record::parse(date, &description.join(" "), amount)?
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: add <YYYY-MM-DD> <description> <amount>".into(),
            ))
        }
    };

    let (position, id) = context.tracker.add_expense(record)?;
    io::print_success(format!("Expense added at index {} ({}).", position, id));
    Ok(())
}

fn prompt_record() -> Result<Record, CommandError> {
    let date = io::prompt_validated("Date (YYYY-MM-DD)", |raw| {
        parse_date(raw).map_err(|err| err.to_string())
    })?;
    let description = io::prompt_text("Description")?;
    let amount = io::prompt_validated("Amount", |raw| {
        parse_amount(raw).map_err(|err| err.to_string())
    })?;
    Ok(Record::new(date, description.trim(), amount))
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let position = match args.first() {
        Some(raw) => parse_index(raw)?,
        None if context.mode() == CliMode::Interactive => prompt_index("Index to remove")?,
        None => {
            return Err(CommandError::InvalidArguments(
                "usage: remove <index>".into(),
            ))
        }
    };

    let removed = context.tracker.remove_expense(position)?;
    io::print_success(format!("Removed {}.", removed.record.display_label()));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.tracker.ledger().is_empty() {
        io::print_warning("No expenses recorded.");
        return Ok(());
    }

    let symbol = context.config.currency_symbol.as_str();
    let rows: Vec<Vec<String>> = context
        .tracker
        .expenses()
        .map(|(position, entry)| {
            vec![
                position.to_string(),
                format_date(entry.record.date),
                entry.record.description.clone(),
                format_amount(entry.record.amount, symbol),
                entry.record.category.clone().unwrap_or_else(|| "-".into()),
            ]
        })
        .collect();

    let table = Table {
        columns: vec![
            TableColumn::new("#", Alignment::Right),
            TableColumn::new("DATE", Alignment::Left),
            TableColumn::new("DESCRIPTION", Alignment::Left).max_width(40),
            TableColumn::new("AMOUNT", Alignment::Right),
            TableColumn::new("CATEGORY", Alignment::Left).max_width(24),
        ],
        rows,
        show_headers: true,
        padding: 1,
    };

    output_section("Expenses");
    output::line(table.render());
    io::print_hint(pluralize(
        context.tracker.ledger().len(),
        "expense",
        "expenses",
    ));
    Ok(())
}

fn cmd_total(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    io::print_info(format!(
        "Total: {}",
        format_amount(context.tracker.total(), &context.config.currency_symbol)
    ));
    Ok(())
}
