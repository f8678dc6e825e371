use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fintrack(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_DATA_DIR", home).env_remove("FINTRACK_LOG");
    cmd
}

fn add(home: &Path, title: &str, amount: &str, kind: &str, category: &str, date: &str) {
    fintrack(home)
        .args([
            "txn", "add", title, amount, "--type", kind, "--category", category, "--date", date,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added transaction"));
}

#[test]
fn add_then_summary_for_month() {
    let home = TempDir::new().unwrap();
    add(home.path(), "Salary", "1000", "income", "Work", "2024-05-01");
    add(home.path(), "Rent", "400", "expense", "Housing", "2024-05-02");

    fintrack(home.path())
        .args(["summary", "--month", "5", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1,000.00"))
        .stdout(predicate::str::contains("$400.00"))
        .stdout(predicate::str::contains("$600.00"))
        .stdout(predicate::str::contains("No budget set"));
}

#[test]
fn budget_warning_at_eighty_percent() {
    let home = TempDir::new().unwrap();
    add(home.path(), "Groceries", "80", "expense", "Food", "2024-05-10");

    fintrack(home.path())
        .args(["budget", "set", "100"])
        .assert()
        .success();

    fintrack(home.path())
        .args(["budget", "show", "--month", "5", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(80%)"))
        .stdout(predicate::str::contains("Budget almost exceeded!"));
}

#[test]
fn zero_amount_is_rejected() {
    let home = TempDir::new().unwrap();

    fintrack(home.path())
        .args(["txn", "add", "Nothing", "0", "--category", "Misc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    fintrack(home.path())
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn categories_sorted_by_total() {
    let home = TempDir::new().unwrap();
    add(home.path(), "Lunch", "12.50", "expense", "Food", "2024-05-03");
    add(home.path(), "Rent", "400", "expense", "Housing", "2024-05-02");
    add(home.path(), "Salary", "1000", "income", "Work", "2024-05-01");

    let output = fintrack(home.path()).arg("categories").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let housing = stdout.find("Housing").unwrap();
    let food = stdout.find("Food").unwrap();
    assert!(housing < food);
    assert!(!stdout.contains("Work"));
}

#[test]
fn import_missing_budget_leaves_data_intact() {
    let home = TempDir::new().unwrap();
    add(home.path(), "Coffee", "3.50", "expense", "Food", "2024-05-03");

    let backups = home.path().join("backups");
    fs::create_dir_all(&backups).unwrap();
    fs::write(
        backups.join("finance_data_20240101_000000.json"),
        r#"{"transactions": [], "currency": "$"}"#,
    )
    .unwrap();

    fintrack(home.path())
        .args(["import", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Import error"));

    fintrack(home.path())
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Coffee"));
}

#[test]
fn export_reset_import_round_trip() {
    let home = TempDir::new().unwrap();
    add(home.path(), "Salary", "1000", "income", "Work", "2024-05-01");
    fintrack(home.path())
        .args(["currency", "set", "€"])
        .assert()
        .success();

    fintrack(home.path())
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("finance_data_"));

    fintrack(home.path())
        .args(["reset", "--force"])
        .assert()
        .success();
    fintrack(home.path())
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));

    fintrack(home.path())
        .args(["import", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 transaction(s)"));

    fintrack(home.path())
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("+€1,000.00"));
}

#[test]
fn history_records_mutations() {
    let home = TempDir::new().unwrap();
    add(home.path(), "Salary", "1000", "income", "Work", "2024-05-01");

    fintrack(home.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"));
}

#[test]
fn malformed_amounts_are_rejected() {
    let home = TempDir::new().unwrap();

    for bad in ["abc5", "10.999", "1,2,3"] {
        fintrack(home.path())
            .args(["txn", "add", "Lunch", bad, "--category", "Food"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid money format"));
    }
}

#[test]
fn two_exports_in_a_row_keep_both_backups() {
    let home = TempDir::new().unwrap();
    add(home.path(), "Salary", "1000", "income", "Work", "2024-05-01");

    fintrack(home.path()).arg("export").assert().success();
    fintrack(home.path()).arg("export").assert().success();

    let backups = fs::read_dir(home.path().join("backups")).unwrap().count();
    assert_eq!(backups, 2);
}

#[test]
fn config_is_written_on_first_run() {
    let home = TempDir::new().unwrap();

    fintrack(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema version: 1"));

    assert!(home.path().join("config.json").exists());
}
