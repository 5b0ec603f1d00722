use assert_cmd::Command;
use predicates::prelude::*;

const UNREACHABLE: &str = "http://127.0.0.1:9";

fn salesdesk(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("salesdesk").unwrap();
    cmd.env("SALESDESK_HOME", home).env_remove("SALESDESK_LOG");
    cmd
}

#[test]
fn test_config_set_and_show() {
    let temp_dir = tempfile::tempdir().unwrap();

    salesdesk(temp_dir.path())
        .args(["config", "page-size", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page-size set to 10"));

    salesdesk(temp_dir.path())
        .args(["config", "page-size"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page-size = 10"));

    salesdesk(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("base-url = http://localhost:5000")
                .and(predicate::str::contains("timeout-secs = 30")),
        );
}

#[test]
fn test_config_rejects_bad_values() {
    let temp_dir = tempfile::tempdir().unwrap();

    salesdesk(temp_dir.path())
        .args(["config", "page-size", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    salesdesk(temp_dir.path())
        .args(["config", "base-url", "ftp://sales"])
        .assert()
        .failure();

    salesdesk(temp_dir.path())
        .args(["config", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));

    assert!(!temp_dir.path().join("config.json").exists());
}

#[test]
fn test_list_rejects_unknown_page_size() {
    let temp_dir = tempfile::tempdir().unwrap();
    salesdesk(temp_dir.path())
        .args(["--base-url", UNREACHABLE, "customers", "list", "--page-size", "7"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_create_is_rejected_before_any_request() {
    let temp_dir = tempfile::tempdir().unwrap();
    salesdesk(temp_dir.path())
        .args([
            "--base-url",
            UNREACHABLE,
            "products",
            "create",
            "--set",
            "name=Widget",
            "--set",
            "price=-5",
        ])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("invalid field")
                .and(predicate::str::contains("price"))
                .and(predicate::str::contains("Remote unavailable").not()),
        );
}

#[test]
fn test_malformed_assignment() {
    let temp_dir = tempfile::tempdir().unwrap();
    salesdesk(temp_dir.path())
        .args(["--base-url", UNREACHABLE, "stores", "create", "--set", "Downtown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected field=value"));
}

#[test]
fn test_unreachable_server() {
    let temp_dir = tempfile::tempdir().unwrap();
    salesdesk(temp_dir.path())
        .args(["--base-url", UNREACHABLE, "customers", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Remote unavailable"));
}

#[test]
fn test_sales_have_no_options() {
    let temp_dir = tempfile::tempdir().unwrap();
    salesdesk(temp_dir.path())
        .args(["--base-url", UNREACHABLE, "sales", "options"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not offered as options"));
}
