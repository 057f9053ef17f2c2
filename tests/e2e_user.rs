use tempfile::TempDir;

mod common;

#[test]
fn e2e_user_signup_and_login() {
    let data_dir = TempDir::new().expect("temp dir");

    let user = common::signup(&data_dir, "alice1", "alice@example.com");
    assert_eq!(user["id"], 1);
    assert_eq!(user["userName"], "alice1");
    assert_eq!(user["role"], "User");
    assert!(user.get("password").is_none(), "password leaked: {user}");

    let profile = common::run_json(
        &data_dir,
        &["user", "login", "--user-name", "alice1", "--password", "secret123"],
    );
    assert_eq!(profile["id"], 1);
    assert_eq!(profile["username"], "alice1");
    assert_eq!(profile["roles"], serde_json::json!(["User"]));

    let output = common::run(
        &data_dir,
        &["user", "login", "--user-name", "alice1", "--password", "wrongpass"],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid username or password."), "{stderr}");
}

#[test]
fn e2e_user_duplicate_and_invalid_signup() {
    let data_dir = TempDir::new().expect("temp dir");
    common::signup(&data_dir, "alice1", "alice@example.com");

    let output = common::base_cmd(&data_dir)
        .args([
            "user",
            "signup",
            "--first-name",
            "Bob",
            "--last-name",
            "Jones",
            "--user-name",
            "alice1",
            "--phone-number",
            "0123456789",
            "--email",
            "bob@example.com",
            "--password",
            "secret123",
        ])
        .output()
        .expect("run signup");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Username is already in use."));

    let output = common::base_cmd(&data_dir)
        .args([
            "user",
            "signup",
            "--first-name",
            "Bob",
            "--last-name",
            "Jones",
            "--user-name",
            "bob1",
            "--phone-number",
            "12345",
            "--email",
            "bob@example.com",
            "--password",
            "secret123",
        ])
        .output()
        .expect("run signup");
    assert!(!output.status.success());

    let count = common::run_json(&data_dir, &["user", "count"]);
    assert_eq!(count["count"], 1);
}

#[test]
fn e2e_user_authorize() {
    let data_dir = TempDir::new().expect("temp dir");
    common::signup(&data_dir, "alice1", "alice@example.com");

    let ok = common::run_json(&data_dir, &["user", "authorize", "1", "--allow", "user"]);
    assert_eq!(ok["authorized"], true);

    let output = common::run(&data_dir, &["user", "authorize", "1", "--allow", "admin"]);
    assert!(!output.status.success());

    let output = common::run(&data_dir, &["user", "authorize", "42", "--allow", "user"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid User"));
}

#[test]
fn e2e_user_password_required_without_terminal() {
    let data_dir = TempDir::new().expect("temp dir");

    let output = common::base_cmd(&data_dir)
        .args(["user", "login", "--user-name", "alice1"])
        .stdin(std::process::Stdio::null())
        .output()
        .expect("run login");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--password is required"));
}

#[test]
fn e2e_user_update_rehashes_the_password() {
    let data_dir = TempDir::new().expect("temp dir");
    common::signup(&data_dir, "alice1", "alice@example.com");
    common::signup(&data_dir, "bob22", "bob@example.com");

    let updated = common::run_json(
        &data_dir,
        &["user", "update", "1", "--password", "newsecret9", "--last-name", "Jones"],
    );
    assert_eq!(updated["lastName"], "Jones");
    assert!(updated.get("password").is_none(), "password leaked: {updated}");

    let profile = common::run_json(
        &data_dir,
        &["user", "login", "--user-name", "alice1", "--password", "newsecret9"],
    );
    assert_eq!(profile["id"], 1);
    let output = common::run(
        &data_dir,
        &["user", "login", "--user-name", "alice1", "--password", "secret123"],
    );
    assert!(!output.status.success());

    let output = common::run(&data_dir, &["user", "update", "1", "--email", "bob@example.com"]);
    assert!(!output.status.success());

    let changed = common::run_json(
        &data_dir,
        &["user", "update-all", "--role", "admin", "--where-role", "user"],
    );
    assert_eq!(changed["count"], 2);
    let user = common::run_json(&data_dir, &["user", "get", "2"]);
    assert_eq!(user["role"], "Admin");
}
