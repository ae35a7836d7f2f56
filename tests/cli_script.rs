mod common;

use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;

fn run_script(home: &Path, input: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("expense_tracker").unwrap();
    cmd.env("EXPENSE_TRACKER_CLI_SCRIPT", "1")
        .env("EXPENSE_TRACKER_HOME", home)
        .env_remove("EXPENSE_TRACKER_DB")
        .env("NO_COLOR", "1")
        .write_stdin(input.to_string())
        .assert()
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = common::temp_dir();
    run_script(
        &home,
        "add 2024-01-01 coffee 3.50\nadd 2024-01-02 \"team lunch\" 12\ntotal\nlist\nexit\n",
    )
    .success()
    .stdout(contains("Expense added"))
    .stdout(contains("Total: $15.50"))
    .stdout(contains("team lunch"));

    assert!(home.join("expenses.db").exists());
}

#[test]
fn expenses_persist_across_sessions() {
    let home = common::temp_dir();
    run_script(
        &home,
        "add 2024-03-01 rent 900\nadd-category housing\nassign-category 0 housing\n",
    )
    .success();

    run_script(&home, "4\n3\n7\n")
        .success()
        .stdout(contains("Total: $900.00"))
        .stdout(contains("housing"))
        .stdout(contains("rent"));
}

#[test]
fn errors_are_reported_without_ending_the_session() {
    let home = common::temp_dir();
    run_script(
        &home,
        "remove 0\nadd 2024-13-01 bad 1\nassign-category 0 food\nadd 2024-01-01 ok 2\ntotal\n",
    )
    .success()
    .stderr(contains("Index 0 is out of range"))
    .stderr(contains("not a valid date"))
    .stdout(contains("Total: $2.00"));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let home = common::temp_dir();
    run_script(&home, "totl\n")
        .success()
        .stdout(contains("Unknown command `totl`"))
        .stdout(contains("Suggestion: `total`?"));
}

#[test]
fn charts_handle_empty_and_populated_ledgers() {
    let home = common::temp_dir();
    run_script(&home, "line-chart\nbox-chart\n")
        .success()
        .stdout(contains("No expenses to plot."));

    run_script(
        &home,
        "add 2024-01-01 a 10\nadd 2024-01-05 b 20\nadd 2024-01-09 c 30\n8\n9\n",
    )
    .success()
    .stdout(contains("2024-01-01"))
    .stdout(contains("2024-01-09"))
    .stdout(contains("median"));
}

#[test]
fn export_writes_json_snapshot() {
    let home = common::temp_dir();
    let target = home.join("out").join("ledger.json");
    run_script(
        &home,
        &format!("add 2024-01-01 coffee 3.5\nexport \"{}\"\n", target.display()),
    )
    .success()
    .stdout(contains("Ledger exported"));

    let json = std::fs::read_to_string(&target).unwrap();
    assert!(json.contains("\"coffee\""));
    assert!(json.contains("2024-01-01"));
}

#[test]
fn config_changes_survive_the_session() {
    let home = common::temp_dir();
    run_script(&home, "config set currency_symbol EUR\nconfig set chart_width 30\n")
        .success()
        .stdout(contains("Set chart_width = 30."));

    let saved = std::fs::read_to_string(home.join("config").join("config.json")).unwrap();
    assert!(saved.contains("\"chart_width\": 30"));

    run_script(&home, "add 2024-01-01 coffee 3.50\ntotal\n")
        .success()
        .stdout(contains("Total: EUR3.50"));
}
