//! Integration tests for the user registry
//!
//! These tests drive complete menu sessions through scripted console input.

use std::collections::HashSet;
use std::path::Path;

use tempfile::TempDir;
use user_registry::workflow::{self, Console};
use user_registry::{persistence, Config, PhoneRule, User, UserStore};

// =============================================================================
// Test Helpers
// =============================================================================

/// Create a test configuration pointing at a file in `temp_dir`
fn test_config(temp_dir: &TempDir) -> Config {
    Config {
        registry_file: temp_dir.path().join("users.json"),
        ..Config::default()
    }
}

/// Run one menu session over `input`, returning everything printed
fn run_session(input: &str, store: &mut UserStore, config: &Config) -> String {
    run_session_bytes(input.as_bytes(), store, config)
}

/// Same as `run_session`, for input that is not valid UTF-8
fn run_session_bytes(input: &[u8], store: &mut UserStore, config: &Config) -> String {
    let mut console = Console::new(input, Vec::new());
    workflow::run(&mut console, store, config).expect("session failed");
    let (_, output) = console.into_parts();
    String::from_utf8(output).unwrap()
}

/// Menu input registering a user with the given Id and login
fn register_input(id: u16, login: &str) -> String {
    format!("1\n{id}\n{login}\npass1234\npass1234\n{login}@example.com\n4111111111111111\n0501234567\n")
}

fn identity(user: &User) -> (u16, String, String, String, String) {
    (
        user.id,
        user.login.clone(),
        user.email.clone(),
        user.phone.clone(),
        user.credit_card.clone(),
    )
}

fn identities(users: impl IntoIterator<Item = User>) -> HashSet<(u16, String, String, String, String)> {
    users.into_iter().map(|u| identity(&u)).collect()
}

fn write_file(path: &Path, contents: &str) {
    std::fs::write(path, contents).unwrap();
}

// =============================================================================
// Registration Tests
// =============================================================================

#[test]
fn test_register_example_user() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    let mut store = UserStore::new();

    let input = "1\n1234\nabc123\npass1234\npass1234\na@b.co\n4111111111111111\n0501234567\n4\n";
    let output = run_session(input, &mut store, &config);

    assert!(output.contains("User registered successfully"));
    let user = store.get(1234).expect("user 1234 stored");
    assert_eq!(user.login, "abc123");
    assert_eq!(user.email, "a@b.co");
    assert_eq!(user.credit_card, "4111111111111111");
    assert_eq!(user.phone, "0501234567");
}

#[test]
fn test_register_out_of_range_ids_never_inserted() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    let mut store = UserStore::new();

    // Input ends while still at the Id prompt
    let output = run_session("1\n0\n999\n10000\n-1234\nabcd\n", &mut store, &config);

    assert!(store.is_empty());
    assert_eq!(output.matches("Invalid Id.").count(), 5);
    assert!(!output.contains("Enter login: "));
}

#[test]
fn test_register_login_with_symbol_reprompts() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    let mut store = UserStore::new();

    let output = run_session("1\n1234\nabc-123\nabc 123\n", &mut store, &config);

    assert!(store.is_empty());
    assert_eq!(
        output
            .matches("Login can only contain letters and numbers")
            .count(),
        2
    );
    assert!(!output.contains("Enter password: "));
}

#[test]
fn test_register_invalid_utf8_login_reprompts() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    let mut store = UserStore::new();

    let input = b"1\n1234\nab\xffc\nabc123\npass1234\npass1234\na@b.co\n\
                  4111111111111111\n0501234567\n4\n";
    let output = run_session_bytes(input, &mut store, &config);

    assert_eq!(
        output
            .matches("Login can only contain letters and numbers")
            .count(),
        1
    );
    assert!(!output.contains("Error:"));
    assert!(!output.contains("Invalid choice"));
    assert_eq!(store.get(1234).unwrap().login, "abc123");
}

#[test]
fn test_invalid_utf8_menu_choice_is_invalid() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    let mut store = UserStore::new();

    let output = run_session_bytes(b"\xff\n4\n", &mut store, &config);

    assert_eq!(output.matches("Invalid choice").count(), 1);
    assert_eq!(output.matches("Menu:").count(), 2);
}

#[test]
fn test_register_mismatched_confirm_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    let mut store = UserStore::new();

    let output = run_session(
        "1\n1234\nabc123\npass1234\npass12345\n",
        &mut store,
        &config,
    );

    assert!(store.is_empty());
    assert!(output.contains("Password and confirm password do not match"));
    assert!(!output.contains("Enter email: "));
}

#[test]
fn test_register_short_password_never_reaches_email() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    let mut store = UserStore::new();

    let output = run_session("1\n1234\nabc123\nshort\n", &mut store, &config);

    assert!(output.contains("Password must be at least 8 characters long"));
    assert!(!output.contains("Enter confirm password: "));
    assert!(!output.contains("Enter email: "));
    assert!(store.is_empty());
}

#[test]
fn test_register_international_phone_rule() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        phone_rule: PhoneRule::International,
        ..test_config(&temp_dir)
    };
    let mut store = UserStore::new();

    let input = "1\n1234\nabc123\npass1234\npass1234\na@b.co\n4111111111111111\n\
                 0501234567\n+38-050-123-45-67\n4\n";
    let output = run_session(input, &mut store, &config);

    assert_eq!(output.matches("Invalid phone number").count(), 1);
    assert_eq!(store.get(1234).unwrap().phone, "+38-050-123-45-67");
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_save_then_load_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    let mut store = UserStore::new();

    let mut input = String::new();
    input.push_str(&register_input(1234, "abc123"));
    input.push_str(&register_input(9999, "zzz"));
    input.push_str(&register_input(1000, "first"));
    input.push_str("3\n4\n");
    let output = run_session(&input, &mut store, &config);
    assert!(output.contains("Users saved to file"));

    let mut restored = UserStore::new();
    let output = run_session("2\n4\n", &mut restored, &config);
    assert!(output.contains("Users loaded from file"));

    assert_eq!(
        identities(restored.iter().cloned()),
        identities(store.iter().cloned())
    );
    assert_eq!(restored.len(), 3);
}

#[test]
fn test_saved_file_uses_record_field_names() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    let mut store = UserStore::new();

    run_session(&format!("{}3\n4\n", register_input(1234, "abc123")), &mut store, &config);

    let contents = std::fs::read_to_string(&config.registry_file).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(value["version"], 1);
    assert!(value["savedAt"].is_string());
    assert_eq!(value["digest"].as_str().unwrap().len(), 64);
    assert_eq!(value["users"][0]["Id"], 1234);
    assert_eq!(value["users"][0]["Login"], "abc123");
    assert_eq!(value["users"][0]["ConfirmPassword"], "pass1234");
}

#[test]
fn test_save_failure_is_reported_and_menu_continues() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("not-a-dir");
    write_file(&blocker, "regular file");
    let config = Config {
        registry_file: blocker.join("users.json"),
        ..Config::default()
    };
    let mut store = UserStore::new();

    let input = format!("{}3\n7\n4\n", register_input(1234, "abc123"));
    let output = run_session(&input, &mut store, &config);

    assert!(output.contains("Error: IO error"));
    assert!(!output.contains("Users saved to file"));
    let after_error = &output[output.find("Error: IO error").unwrap()..];
    assert!(after_error.contains("Menu:"));
    assert!(after_error.contains("Invalid choice"));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_load_missing_file_reports_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    let mut store = UserStore::new();
    run_session(&register_input(1234, "abc123"), &mut store, &config);
    let before = store.clone();

    let output = run_session("2\n4\n", &mut store, &config);

    assert!(output.contains("File not found"));
    assert_eq!(store, before);
}

#[test]
fn test_load_corrupt_file_is_reported_and_session_continues() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    write_file(&config.registry_file, "{ this is not json");

    let mut store = UserStore::new();
    run_session(&register_input(1234, "abc123"), &mut store, &config);
    let before = store.clone();

    let output = run_session("2\n7\n4\n", &mut store, &config);

    assert!(output.contains("Error: Corrupt user document"));
    assert!(output.contains("Invalid choice"));
    assert_eq!(store, before);
}

#[test]
fn test_load_tampered_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    let mut store = UserStore::new();
    run_session(&format!("{}3\n4\n", register_input(1234, "abc123")), &mut store, &config);

    let contents = std::fs::read_to_string(&config.registry_file).unwrap();
    write_file(&config.registry_file, &contents.replace("abc123", "mallory"));

    let mut restored = UserStore::new();
    let output = run_session("2\n4\n", &mut restored, &config);

    assert!(output.contains("digest does not match"));
    assert!(restored.is_empty());
}

// =============================================================================
// Merge Tests
// =============================================================================

#[test]
fn test_load_into_populated_store_merges_with_prompts() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);

    let on_disk: UserStore = {
        let mut store = UserStore::new();
        let input = format!(
            "{}{}",
            register_input(1000, "diskone"),
            register_input(2000, "disktwo")
        );
        run_session(&input, &mut store, &config);
        store
    };
    persistence::save(&on_disk, &config.registry_file).unwrap();

    let mut store = UserStore::new();
    let input = format!(
        "{}{}",
        register_input(1000, "memone"),
        register_input(3000, "memthree")
    );
    run_session(&input, &mut store, &config);

    // Merge, overwrite 1000
    let output = run_session("2\n2\ny\n4\n", &mut store, &config);

    assert!(output.contains("Loaded users:"));
    assert!(output.contains("Current users:"));
    assert!(output.contains("User with Id 1000 already exists. Do you want to overwrite? (y/n)"));
    assert!(!output.contains("User with Id 2000 already exists"));
    assert_eq!(store.len(), 3);
    assert_eq!(store.get(1000).unwrap().login, "diskone");
    assert_eq!(store.get(2000).unwrap().login, "disktwo");
    assert_eq!(store.get(3000).unwrap().login, "memthree");
}

#[test]
fn test_load_into_populated_store_overwrite_all() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);

    let mut on_disk = UserStore::new();
    run_session(&register_input(2000, "disktwo"), &mut on_disk, &config);
    persistence::save(&on_disk, &config.registry_file).unwrap();

    let mut store = UserStore::new();
    run_session(&register_input(1000, "memone"), &mut store, &config);

    run_session("2\n1\n4\n", &mut store, &config);

    assert_eq!(store, on_disk);
}
