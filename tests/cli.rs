use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

/// `dn` with an isolated home directory and no inherited overrides.
fn dn(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dn").expect("binary");
    cmd.env("HOME", home)
        .env_remove("DN_DATA_DIR")
        .env_remove("RUST_LOG");
    cmd
}

/// Run `dn add <text>` and return the id it reports.
fn add(home: &Path, text: &str) -> u64 {
    let out = dn(home).args(["add", text]).assert().success().get_output().stdout.clone();
    let out = String::from_utf8(out).expect("utf-8 stdout");
    out.trim()
        .strip_prefix("Added todo ")
        .and_then(|id| id.parse().ok())
        .unwrap_or_else(|| panic!("unexpected add output: {out:?}"))
}

fn stored(home: &Path) -> Vec<Value> {
    let raw = fs::read_to_string(home.join(".dn").join("dn-todos.json")).expect("storage file");
    serde_json::from_str(&raw).expect("json array")
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    dn(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("terminal to-do list"))
        .stdout(contains("clear-completed"));
}

#[test]
fn add_persists_as_json_array() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    dn(home.path())
        .args(["add", "Buy", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Added todo "));
    let second = add(home.path(), "  Write report  ");

    let todos = stored(home.path());
    assert_eq!(todos.len(), 2);
    let first = todos[0]["id"].as_u64().expect("numeric id");
    assert!(first < second);
    assert_eq!(todos[1]["id"], second);
    assert_eq!(todos[0]["text"], "Buy milk");
    assert_eq!(todos[0]["completed"], false);
    assert_eq!(todos[1]["text"], "Write report");
    let created = todos[1]["createdAt"].as_str().expect("createdAt string");
    assert!(created.ends_with('Z'));
    assert_eq!(created.len(), "2024-05-01T09:30:00.000Z".len());
    Ok(())
}

#[test]
fn blank_add_is_ignored() {
    let home = TempDir::new().unwrap();
    dn(home.path()).args(["add", "   "]).assert().success().stdout("");
    assert!(!home.path().join(".dn").join("dn-todos.json").exists());
}

#[test]
fn toggle_filter_and_clear() {
    let home = TempDir::new().unwrap();
    add(home.path(), "one");
    let two = add(home.path(), "two");
    add(home.path(), "three");
    dn(home.path())
        .args(["toggle", &two.to_string()])
        .assert()
        .success()
        .stdout(predicate::eq(format!("Marked todo {two} completed\n")));

    dn(home.path())
        .args(["list", "--filter", "active"])
        .assert()
        .success()
        .stdout(contains("one"))
        .stdout(contains("three"))
        .stdout(contains("two").not())
        .stdout(contains("//ACTIVE: 2  //COMPLETED: 1  //TOTAL: 3"));

    dn(home.path())
        .args(["list", "--filter", "completed"])
        .assert()
        .success()
        .stdout(contains("two"))
        .stdout(contains("three").not());

    dn(home.path())
        .arg("clear-completed")
        .assert()
        .success()
        .stdout("Cleared 1 completed todo(s)\n");

    let texts: Vec<String> = stored(home.path())
        .iter()
        .map(|t| t["text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts, vec!["one", "three"]);
}

#[test]
fn list_shows_empty_message() {
    let home = TempDir::new().unwrap();
    dn(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("// NO TASKS YET. ADD ONE ABOVE."));
    dn(home.path())
        .args(["list", "-f", "completed"])
        .assert()
        .success()
        .stdout(contains("// NO COMPLETED TASKS."));
}

#[test]
fn delete_keeps_order_of_others() {
    let home = TempDir::new().unwrap();
    let a = add(home.path(), "a");
    let b = add(home.path(), "b");
    let c = add(home.path(), "c");
    dn(home.path())
        .args(["delete", &b.to_string()])
        .assert()
        .success()
        .stdout(predicate::eq(format!("Deleted todo {b}\n")));
    let ids: Vec<u64> = stored(home.path()).iter().map(|t| t["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![a, c]);
}

#[test]
fn deleted_newest_id_is_not_reissued() {
    let home = TempDir::new().unwrap();
    let a = add(home.path(), "a");
    let b = add(home.path(), "b");
    assert!(b > a);
    dn(home.path()).args(["delete", &b.to_string()]).assert().success();

    let c = add(home.path(), "c");
    assert!(c > b, "id {c} reissued at or below deleted {b}");

    // Repeating the delete must not remove the todo created in between.
    dn(home.path())
        .args(["delete", &b.to_string()])
        .assert()
        .code(2)
        .stderr(contains(format!("Todo {b} not found")));
    let texts: Vec<String> = stored(home.path())
        .iter()
        .map(|t| t["text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts, vec!["a", "c"]);
}

#[test]
fn exhausted_ids_fail_without_touching_storage() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".dn");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("dn-todos.json");
    let json = r#"[{"id":18446744073709551615,"text":"last","completed":false,"createdAt":"2024-05-01T09:30:00.000Z"}]"#;
    fs::write(&path, json).unwrap();

    dn(home.path())
        .args(["add", "y"])
        .assert()
        .code(3)
        .stderr(contains("No todo ids left"));
    assert_eq!(fs::read_to_string(&path).unwrap(), json);
}

#[test]
fn unknown_id_is_a_user_error() {
    let home = TempDir::new().unwrap();
    dn(home.path()).args(["add", "a"]).assert().success();
    dn(home.path())
        .args(["toggle", "99"])
        .assert()
        .code(2)
        .stderr(contains("Todo 99 not found"));
    dn(home.path()).args(["delete", "99"]).assert().code(2);
    assert_eq!(stored(home.path())[0]["completed"], false);
}

#[test]
fn stats_counts() {
    let home = TempDir::new().unwrap();
    let a = add(home.path(), "a");
    add(home.path(), "b");
    dn(home.path()).args(["toggle", &a.to_string()]).assert().success();
    dn(home.path())
        .arg("stats")
        .assert()
        .success()
        .stdout("//ACTIVE: 1  //COMPLETED: 1  //TOTAL: 2\n");
}

#[test]
fn loads_data_written_by_previous_version() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".dn");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("dn-todos.json"),
        r#"[{"id":1714555800000,"text":"Buy milk","completed":true,"createdAt":"2024-05-01T09:30:00.000Z"}]"#,
    )
    .unwrap();

    let id = add(home.path(), "Write report");
    assert!(id > 1714555800000);
    let todos = stored(home.path());
    assert_eq!(todos[0]["createdAt"], "2024-05-01T09:30:00.000Z");
    assert_eq!(todos[0]["completed"], true);
}

#[test]
fn corrupt_storage_aborts_without_overwriting() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".dn");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("dn-todos.json");
    fs::write(&path, "{oops").unwrap();

    dn(home.path())
        .args(["add", "a"])
        .assert()
        .code(3)
        .stderr(contains("dn-todos"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{oops");
}

#[test]
fn data_dir_flag_env_and_config() {
    let home = TempDir::new().unwrap();
    let flag_dir = home.path().join("flag");
    let env_dir = home.path().join("env");
    let cfg_dir = home.path().join("cfg");

    dn(home.path())
        .arg("--data-dir")
        .arg(&flag_dir)
        .args(["add", "via flag"])
        .assert()
        .success();
    assert!(flag_dir.join("dn-todos.json").exists());

    dn(home.path())
        .env("DN_DATA_DIR", &env_dir)
        .args(["add", "via env"])
        .assert()
        .success();
    assert!(env_dir.join("dn-todos.json").exists());

    fs::create_dir_all(home.path().join(".dn")).unwrap();
    fs::write(
        home.path().join(".dn").join("config.toml"),
        format!("data_dir = {:?}\ndefault_filter = \"completed\"\n", cfg_dir.display().to_string()),
    )
    .unwrap();
    dn(home.path()).args(["add", "via config"]).assert().success();
    assert!(cfg_dir.join("dn-todos.json").exists());

    // default_filter applies to `list` when no --filter is given.
    dn(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("// NO COMPLETED TASKS."));
}

#[test]
fn invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    fs::create_dir_all(home.path().join(".dn")).unwrap();
    fs::write(home.path().join(".dn").join("config.toml"), "default_filter = 3").unwrap();
    dn(home.path())
        .arg("list")
        .assert()
        .code(3)
        .stderr(contains("TOML parse error"));
}

#[test]
fn completions_generate() {
    let home = TempDir::new().unwrap();
    dn(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(contains("dn"));
}
