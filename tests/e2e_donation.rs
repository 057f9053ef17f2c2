use tempfile::TempDir;

mod common;

fn picture(data_dir: &TempDir) -> String {
    let path = data_dir.path().join("apples.jpg");
    std::fs::write(&path, [0xffu8, 0xd8, 0xff, 0xe0]).expect("write picture");
    path.to_string_lossy().to_string()
}

#[test]
fn e2e_donation_food_and_money() {
    let data_dir = TempDir::new().expect("temp dir");
    common::signup(&data_dir, "alice1", "alice@example.com");
    let picture = picture(&data_dir);

    let food = common::run_json(
        &data_dir,
        &[
            "donate",
            "food",
            "--user-id",
            "1",
            "--picture",
            &picture,
            "--quantity",
            "2.5",
            "--quantity-type",
            "kg",
            "--message",
            "fresh",
        ],
    );
    assert_eq!(food["id"], 1);
    assert_eq!(food["donatorId"], 1);
    assert_eq!(food["picture"], "ffd8ffe0");
    assert_eq!(food["quantity"], 2.5);

    let money = common::run_json(
        &data_dir,
        &[
            "donate", "money", "--user-id", "1", "--amount", "20", "--currency", "EUR",
        ],
    );
    assert_eq!(money["id"], 1);
    assert_eq!(money["currency"], "EUR");

    let donations = common::run_json(&data_dir, &["donation", "list", "--user-id", "1"]);
    let donations = donations.as_array().expect("array");
    assert_eq!(donations.len(), 2);
    assert_eq!(donations[0]["userId"], 1);
    assert_eq!(donations[0]["itemId"], 1);
    assert_eq!(donations[1]["itemId"], 1);

    let foods = common::run_json(&data_dir, &["donation", "foods"]);
    assert_eq!(foods.as_array().map(Vec::len), Some(1));

    common::run_json(&data_dir, &["donation", "delete-money", "1"]);
    let output = common::run(&data_dir, &["donation", "show-money", "1"]);
    assert!(!output.status.success());
}

#[test]
fn e2e_donation_rejects_bad_input() {
    let data_dir = TempDir::new().expect("temp dir");
    common::signup(&data_dir, "alice1", "alice@example.com");
    let picture = picture(&data_dir);

    let output = common::run(
        &data_dir,
        &[
            "donate",
            "food",
            "--user-id",
            "1",
            "--picture",
            &picture,
            "--quantity",
            "5",
            "--quantity-type",
            "bushel",
        ],
    );
    assert!(!output.status.success());

    let output = common::run(
        &data_dir,
        &[
            "donate", "money", "--user-id", "1", "--amount", "1001", "--currency", "EUR",
        ],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("The amount value is not correct"));

    let output = common::run(
        &data_dir,
        &[
            "donate", "money", "--user-id", "7", "--amount", "10", "--currency", "EUR",
        ],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid User"));

    let donations = common::run_json(&data_dir, &["donation", "list"]);
    assert_eq!(donations, serde_json::json!([]));
}

#[test]
fn e2e_donation_updates_and_counts() {
    let data_dir = TempDir::new().expect("temp dir");
    common::signup(&data_dir, "alice1", "alice@example.com");
    let picture = picture(&data_dir);

    common::run_json(
        &data_dir,
        &[
            "donate", "food", "--user-id", "1", "--picture", &picture, "--quantity", "3",
            "--quantity-type", "kg",
        ],
    );
    for amount in ["10", "20"] {
        common::run_json(
            &data_dir,
            &["donate", "money", "--user-id", "1", "--amount", amount, "--currency", "EUR"],
        );
    }

    let output = common::run(&data_dir, &["donation", "update-food", "1", "--quantity-type", "bushel"]);
    assert!(!output.status.success());

    let food = common::run_json(&data_dir, &["donation", "update-food", "1", "--message", "ripe"]);
    assert_eq!(food["message"], "ripe");
    assert_eq!(food["quantityType"], "kg");

    let money = common::run_json(&data_dir, &["donation", "update-money", "1", "--amount", "15"]);
    assert_eq!(money["amount"], 15.0);
    assert_eq!(money["currency"], "EUR");

    let changed = common::run_json(
        &data_dir,
        &["donation", "update-all-money", "--currency", "USD", "--donator-id", "1"],
    );
    assert_eq!(changed["count"], 2);

    let replaced = common::run_json(
        &data_dir,
        &["donation", "replace-money", "2", "--amount", "5", "--currency", "RON"],
    );
    assert_eq!(replaced["currency"], "RON");
    assert_eq!(replaced["donatorId"], 1);

    let output = common::run(&data_dir, &["donation", "update-money", "9", "--amount", "5"]);
    assert!(!output.status.success());

    let counted = common::run_json(&data_dir, &["donation", "count-money", "--donator-id", "1"]);
    assert_eq!(counted["count"], 2);
    let counted = common::run_json(&data_dir, &["donation", "count-food", "--donator-id", "2"]);
    assert_eq!(counted["count"], 0);
}
