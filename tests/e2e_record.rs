use tempfile::TempDir;

mod common;

#[test]
fn e2e_record_write_read_update() {
    let data_dir = TempDir::new().expect("temp dir");

    let created = common::run_json(
        &data_dir,
        &["record", "write", "money", "donatorId=3", "amount=12.5", "currency=USD"],
    );
    assert_eq!(created["id"], 1);
    assert_eq!(created["currency"], "USD");

    let updated = common::run_json(&data_dir, &["record", "update", "money", "1", "currency=EUR"]);
    assert_eq!(updated["updated"], 1);

    let found = common::run_json(&data_dir, &["record", "find", "money", "currency", "EUR"]);
    assert_eq!(found.as_array().map(Vec::len), Some(1));

    let count = common::run_json(&data_dir, &["record", "count", "money", "--filter", "donatorId=3"]);
    assert_eq!(count["count"], 1);

    let exists = common::run_json(&data_dir, &["record", "exists", "money", "1"]);
    assert_eq!(exists["exists"], true);
}

#[test]
fn e2e_record_rejections_leave_storage_untouched() {
    let data_dir = TempDir::new().expect("temp dir");

    let unknown = common::run_json(&data_dir, &["record", "write", "money", "colour=red"]);
    assert_eq!(unknown["status"], "rejected");

    let long = "x".repeat(40);
    let too_long = common::run_json(
        &data_dir,
        &["record", "write", "money", &format!("currency={long}")],
    );
    assert_eq!(too_long["status"], "rejected");

    let partial = common::run_json(&data_dir, &["record", "write", "money", "amount=5"]);
    assert_eq!(partial["status"], "rejected");

    let not_a_number = common::run_json(
        &data_dir,
        &["record", "write", "money", "donatorId=1", "amount=NaN", "currency=EUR"],
    );
    assert_eq!(not_a_number["status"], "rejected");

    let missing = common::run_json(&data_dir, &["record", "delete", "money", "99"]);
    assert_eq!(missing["status"], "not_found");

    let bad_order = common::run_json(&data_dir, &["record", "read", "money", "--order", "amount SIDEWAYS"]);
    assert_eq!(bad_order["status"], "rejected");

    let count = common::run_json(&data_dir, &["record", "count", "money"]);
    assert_eq!(count["count"], 0);
}

#[test]
fn e2e_record_max_field_len_is_configurable() {
    let data_dir = TempDir::new().expect("temp dir");
    let long = format!("currency={}", "x".repeat(40));

    let created = common::run_json(
        &data_dir,
        &["--max-field-len", "64", "record", "write", "money", "donatorId=1", "amount=1", &long],
    );
    assert_eq!(created["id"], 1);
}

#[test]
fn e2e_record_keeps_user_listing_loadable() {
    let data_dir = TempDir::new().expect("temp dir");

    let rogue = common::run_json(
        &data_dir,
        &["record", "write", "user", "userName=x", "email=x@y.zz", "role=Root"],
    );
    assert_eq!(rogue["status"], "rejected");

    let clear_text = common::run_json(
        &data_dir,
        &["record", "write", "user", "userName=x", "email=x@y.zz", "password=hunter22"],
    );
    assert_eq!(clear_text["status"], "rejected");

    let users = common::run_json(&data_dir, &["user", "list"]);
    assert_eq!(users, serde_json::json!([]));
}
