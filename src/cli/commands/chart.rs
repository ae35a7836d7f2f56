use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::charts::{render_box_plot, render_line_chart};

const NOTHING_TO_PLOT: &str = "No expenses to plot.";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "line-chart",
            "Plot expense amounts over time",
            "line-chart",
            cmd_line_chart,
        )
        .with_aliases(&["8"]),
        CommandEntry::new(
            "box-chart",
            "Show the spread of expense amounts",
            "box-chart",
            cmd_box_chart,
        )
        .with_aliases(&["9"]),
    ]
}

fn cmd_line_chart(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let series = context.tracker.line_series();
    if series.is_empty() {
        io::print_warning(NOTHING_TO_PLOT);
        return Ok(());
    }

    output_section("Expenses over time");
    let lines = render_line_chart(
        &series,
        context.config.chart_width,
        context.config.chart_height,
        &context.config.currency_symbol,
    );
    for line in lines {
        output::line(line);
    }
    Ok(())
}

fn cmd_box_chart(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let Some(stats) = context.tracker.box_stats() else {
        io::print_warning(NOTHING_TO_PLOT);
        return Ok(());
    };

    output_section("Expense distribution");
    for line in render_box_plot(
        &stats,
        context.config.chart_width,
        &context.config.currency_symbol,
    ) {
        output::line(line);
    }
    Ok(())
}
