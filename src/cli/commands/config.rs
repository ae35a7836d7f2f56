use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table::{Alignment, Table, TableColumn};
use crate::config::Config;

const SET_USAGE: &str = "usage: config set <currency_symbol|ui_color_enabled|chart_width|chart_height|seed_categories_from_records|reconcile_on_error> <value>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change saved preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(&context.config);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(SET_USAGE.into()));
            }
            let key = args[1].to_lowercase();
            let value = args[2..].join(" ");
            apply_setting(&mut context.config, &key, value.trim())?;
            if key == "ui_color_enabled" {
                output::set_preferences(OutputPreferences {
                    color_enabled: context.config.ui_color_enabled,
                    quiet_mode: context.mode == CliMode::Script,
                });
            }
            if let Some(manager) = &context.config_manager {
                manager.save(&context.config)?;
            }
            io::print_success(format!("Set {} = {}.", key, value.trim()));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}` (expected show or set)",
            other
        ))),
    }
}

fn show_config(config: &Config) {
    let database = config
        .database_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "(default)".into());
    let rows = vec![
        vec!["database_path".into(), database],
        vec!["currency_symbol".into(), config.currency_symbol.clone()],
        vec!["ui_color_enabled".into(), config.ui_color_enabled.to_string()],
        vec!["chart_width".into(), config.chart_width.to_string()],
        vec!["chart_height".into(), config.chart_height.to_string()],
        vec![
            "seed_categories_from_records".into(),
            config.seed_categories_from_records.to_string(),
        ],
        vec!["reconcile_on_error".into(), config.reconcile_on_error.to_string()],
    ];
    let table = Table {
        columns: vec![
            TableColumn::new("SETTING", Alignment::Left),
            TableColumn::new("VALUE", Alignment::Left).max_width(60),
        ],
        rows,
        show_headers: false,
        padding: 1,
    };
    output::section("Configuration");
    output::line(table.render());
}

/// Updates one field in place. The database path is left to the config file since it
/// only applies on the next start.
pub(crate) fn apply_setting(config: &mut Config, key: &str, value: &str) -> CommandResult {
    match key {
        "currency_symbol" => {
            if value.is_empty() {
                return Err(CommandError::InvalidArguments(
                    "currency symbol cannot be empty".into(),
                ));
            }
            config.currency_symbol = value.to_string();
        }
        "ui_color_enabled" => config.ui_color_enabled = parse_flag(value)?,
        "chart_width" => config.chart_width = parse_size(value)?,
        "chart_height" => config.chart_height = parse_size(value)?,
        "seed_categories_from_records" => config.seed_categories_from_records = parse_flag(value)?,
        "reconcile_on_error" => config.reconcile_on_error = parse_flag(value)?,
        _ => return Err(CommandError::InvalidArguments(SET_USAGE.into())),
    }
    Ok(())
}

fn parse_flag(value: &str) -> Result<bool, CommandError> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "`{}` is not a valid flag (expected true or false)",
            other
        ))),
    }
}

fn parse_size(value: &str) -> Result<usize, CommandError> {
    value
        .parse::<usize>()
        .ok()
        .filter(|size| *size > 0)
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("`{}` is not a positive integer", value))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::core::{ExpenseTracker, TrackerOptions};
    use crate::storage::SqliteGateway;
    use tempfile::tempdir;

    #[test]
    fn settings_are_validated_before_they_apply() {
        let mut config = Config::default();
        apply_setting(&mut config, "chart_width", "40").unwrap();
        apply_setting(&mut config, "reconcile_on_error", "off").unwrap();
        assert_eq!(config.chart_width, 40);
        assert!(!config.reconcile_on_error);

        for (key, value) in [
            ("chart_height", "0"),
            ("chart_height", "tall"),
            ("ui_color_enabled", "maybe"),
            ("currency_symbol", ""),
            ("database_path", "/tmp/x.db"),
        ] {
            assert!(matches!(
                apply_setting(&mut config, key, value),
                Err(CommandError::InvalidArguments(_))
            ));
        }
        assert_eq!(config.chart_width, 40);
    }

    #[test]
    fn config_set_persists_through_the_manager() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let gateway = SqliteGateway::open_in_memory().unwrap();
        let tracker = ExpenseTracker::open(Box::new(gateway), TrackerOptions::default()).unwrap();
        let mut context = ShellContext::with_tracker(CliMode::Script, tracker, Config::default())
            .with_config_manager(manager.clone());

        context.execute_line("config set currency_symbol €").unwrap();
        context.execute_line("config set chart_height 8").unwrap();
        context.execute_line("config show").unwrap();

        let saved = manager.load().unwrap();
        assert_eq!(saved.currency_symbol, "€");
        assert_eq!(saved.chart_height, 8);
        assert_eq!(context.config, saved);
    }
}
