use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn script(home: &TempDir, input: &str) -> Command {
    let mut cmd = Command::cargo_bin("laundry_core_cli").unwrap();
    cmd.env("LAUNDRY_CORE_CLI_SCRIPT", "1")
        .env("LAUNDRY_CORE_HOME", home.path())
        .write_stdin(input.to_string());
    cmd
}

#[test]
fn script_mode_runs_a_counter_flow() {
    let home = TempDir::new().unwrap();
    let input = "\
store new main Sparkle Laundry
customer add Amira 0501234567
service add Ironing 4.99 30 Express
order new CUST001 Ironing:2
pay order ORD-001 5.00 cash
order list
exit
";

    script(&home, input)
        .assert()
        .success()
        .stdout(contains("Store `main` created"))
        .stdout(contains("Added Amira (CUST001)"))
        .stdout(contains("Created ORD-001"))
        .stdout(contains("AED 5.48"));

    let store = home.path().join("stores").join("main.json");
    let json = std::fs::read_to_string(store).unwrap();
    assert!(json.contains("\"ORD-001\""));
    assert!(json.contains("\"CUST001\""));
}

#[test]
fn script_mode_reports_unknown_commands_with_a_suggestion() {
    let home = TempDir::new().unwrap();
    script(&home, "stroe list\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `stroe`"))
        .stdout(contains("Did you mean `store`?"));
}

#[test]
fn script_mode_confirms_destructive_actions_automatically() {
    let home = TempDir::new().unwrap();
    let input = "\
store new main
customer add Bilal 0507654321
customer remove CUST001
customer list
exit
";

    script(&home, input)
        .assert()
        .success()
        .stdout(contains("Removed customer `CUST001`"))
        .stdout(contains("No customers yet."));
}

#[test]
fn dashboard_requires_an_open_store() {
    let home = TempDir::new().unwrap();
    script(&home, "dashboard\nexit\n")
        .assert()
        .success()
        .stdout(contains("No store is open"));
}

#[test]
fn receipt_prints_the_vat_line() {
    let home = TempDir::new().unwrap();
    let input = "\
store new main Sparkle Laundry
customer add Amira 0501234567
service add \"Wash & Fold\" 15.00 60 Basic
order new CUST001 \"Wash & Fold\":2 paid 31.50 cash
receipt order ORD-001
exit
";

    script(&home, input)
        .assert()
        .success()
        .stdout(contains("LAUNDRY RECEIPT"))
        .stdout(contains("VAT (5%)"))
        .stdout(contains("AED 31.50"));
}
