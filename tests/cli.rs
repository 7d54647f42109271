//! End-to-end tests for the `pace` binary
//!
//! Every test runs against its own temporary data directory with a fixed
//! `--now`, so paydays and month rollovers are deterministic.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pace(dir: &TempDir, now: &str) -> Command {
    let mut cmd = Command::cargo_bin("pace").unwrap();
    cmd.env("BUDGET_PACE_DATA_DIR", dir.path())
        .env_remove("BUDGET_PACE_NOW")
        .arg("--now")
        .arg(now);
    cmd
}

/// Monday 2025-01-06: $1000 balance, $2000 paid on the 15th, months start on the 1st
fn init(dir: &TempDir) {
    pace(dir, "2025-01-06 09:00")
        .args([
            "init",
            "--balance",
            "1000",
            "--income",
            "2000",
            "--payment-day",
            "15",
            "--category",
            "Rent:1200",
            "--category",
            "Groceries:100:Weekly",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tracking January 2025"));
}

fn expense_id(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    text.lines()
        .find_map(|line| line.trim().strip_prefix("ID: "))
        .map(str::to_string)
        .unwrap()
}

#[test]
fn commands_require_init() {
    let dir = TempDir::new().unwrap();
    pace(&dir, "2025-01-06 09:00")
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pace init"));
}

#[test]
fn init_twice_needs_force() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    pace(&dir, "2025-01-06 09:05")
        .args(["init", "-b", "5", "-i", "10", "-p", "1", "-c", "Fuel:40"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn init_rejects_weekday_for_monthly_income() {
    let dir = TempDir::new().unwrap();
    pace(&dir, "2025-01-06 09:00")
        .args(["init", "-b", "100", "-i", "500", "-p", "Friday", "-c", "Rent:300"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn status_after_init() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    pace(&dir, "2025-01-06 10:00")
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("$1000.00"))
        .stdout(predicate::str::contains("Wednesday 2025-01-15 (in 9 days)"))
        .stdout(predicate::str::contains("January 2025"));
}

#[test]
fn expense_reduces_balance_and_weekly_budget() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    pace(&dir, "2025-01-07 12:00")
        .args(["expense", "add", "groceries", "45.50", "-d", "weekly shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded expense"))
        .stdout(predicate::str::contains("$54.50 left in Groceries"))
        .stdout(predicate::str::contains("Balance: $954.50"));

    pace(&dir, "2025-01-07 12:05")
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("weekly shop"));
}

#[test]
fn unknown_category_is_rejected() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    pace(&dir, "2025-01-07 12:00")
        .args(["expense", "add", "Fuel", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn income_is_posted_on_payday() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    pace(&dir, "2025-01-15 08:00")
        .arg("status")
        .assert()
        .success()
        .stderr(predicate::str::contains("Income received: $2000.00"))
        .stdout(predicate::str::contains("$3000.00"));

    // Same day again: nothing more is posted
    pace(&dir, "2025-01-15 18:00")
        .arg("status")
        .assert()
        .success()
        .stderr(predicate::str::contains("Income received").not())
        .stdout(predicate::str::contains("$3000.00"));
}

#[test]
fn month_rollover_locks_old_transactions() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    let output = pace(&dir, "2025-01-10 12:00")
        .args(["expense", "add", "Rent", "1200"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = expense_id(&output.stdout);

    pace(&dir, "2025-02-02 10:00")
        .args(["txn", "delete", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("New budget month started: tracking February 2025"))
        .stderr(predicate::str::contains("locked"));

    pace(&dir, "2025-02-02 10:05")
        .args(["budget", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("January 2025 (archived, read-only)"));
}

#[test]
fn delete_in_open_month_restores_balance() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    let output = pace(&dir, "2025-01-10 12:00")
        .args(["expense", "add", "unbudgeted", "30"])
        .output()
        .unwrap();
    let id = expense_id(&output.stdout);

    pace(&dir, "2025-01-10 12:30")
        .args(["txn", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance: $1000.00"));
}

#[test]
fn category_management() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    pace(&dir, "2025-01-06 10:00")
        .args(["category", "add", "Fuel", "60", "--frequency", "Weekly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fuel: $60.00 Weekly"));

    pace(&dir, "2025-01-06 10:01")
        .args(["category", "add", "rent", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    pace(&dir, "2025-01-06 10:01")
        .args(["category", "add", "Food|Drink", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot contain '|'"));

    pace(&dir, "2025-01-06 10:02")
        .args(["category", "edit", "Fuel", "--name", "Transport"])
        .assert()
        .success();

    pace(&dir, "2025-01-06 10:03")
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transport"))
        .stdout(predicate::str::contains("Fuel").not());
}

#[test]
fn savings_goals() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    pace(&dir, "2025-01-06 10:00")
        .args(["goal", "add", "Holiday", "1000", "--current", "250"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goal #1: Holiday"));

    pace(&dir, "2025-01-06 10:01")
        .args(["goal", "update", "1", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goal reached!"));

    pace(&dir, "2025-01-06 10:02")
        .args(["goal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 1 goals complete"));
}

#[test]
fn velocity_needs_history() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    pace(&dir, "2025-01-08 10:00")
        .args(["report", "velocity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not enough spending history"));
}

#[test]
fn velocity_compares_with_last_week() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    pace(&dir, "2025-01-07 10:00")
        .args(["expense", "add", "Groceries", "100"])
        .assert()
        .success();
    pace(&dir, "2025-01-14 10:00")
        .args(["expense", "add", "Groceries", "50"])
        .assert()
        .success();

    pace(&dir, "2025-01-14 11:00")
        .args(["report", "velocity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-50% (much slower)"));
}

#[test]
fn export_and_import_round_trip() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    pace(&dir, "2025-01-07 12:00")
        .args(["expense", "add", "Groceries", "45.50"])
        .assert()
        .success();

    let export_path = dir.path().join("backup.csv");
    pace(&dir, "2025-01-07 12:05")
        .args(["export", "csv", "--output"])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 transactions"));

    let other = TempDir::new().unwrap();
    pace(&other, "2025-01-08 09:00")
        .arg("import")
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Imported 2 categories, 1 transactions and 0 savings goals from CSV",
        ));

    pace(&other, "2025-01-08 09:05")
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("$954.50"));
}

#[test]
fn malformed_import_leaves_session_untouched() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    let bad = dir.path().join("bad.csv");
    std::fs::write(
        &bad,
        "data_type,date,category,amount\nexpense,not-a-date,Rent,10\n",
    )
    .unwrap();

    pace(&dir, "2025-01-07 09:00")
        .arg("import")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Import error"));

    pace(&dir, "2025-01-07 09:05")
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"));
}

#[test]
fn export_json_to_stdout() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    pace(&dir, "2025-01-07 09:00")
        .args(["export", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"schema_version\""));
}

#[test]
fn audit_log_records_changes() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    pace(&dir, "2025-01-07 12:00")
        .args(["expense", "add", "Rent", "1200"])
        .assert()
        .success();

    pace(&dir, "2025-01-07 12:05")
        .args(["log", "--count", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Profile"))
        .stdout(predicate::str::contains("CREATE Transaction"));
}

#[test]
fn reset_day_change_moves_open_month() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    pace(&dir, "2025-01-10 09:00")
        .args(["period", "reset-day", "15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly reset day set to 15."))
        .stdout(predicate::str::contains("tracking December 2024"));
}
