use tempfile::TempDir;

mod common;

fn write_money(data_dir: &TempDir, donator: &str, amount: &str, currency: &str) {
    let written = common::run_json(
        data_dir,
        &[
            "table", "write", "money", "--column", "donator_id", "--value", donator, "--column",
            "amount", "--value", amount, "--column", "currency", "--value", currency,
        ],
    );
    assert_eq!(written["affected"], 1);
}

#[test]
fn e2e_table_write_read_delete() {
    let data_dir = TempDir::new().expect("temp dir");
    write_money(&data_dir, "1", "10", "EUR");
    write_money(&data_dir, "2", "25.5", "USD");

    let rows = common::run_json(&data_dir, &["table", "read-where", "money", "currency", "=", "USD"]);
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["donator_id"], 2);

    let ordered = common::run_json(&data_dir, &["table", "read-ordered", "money", "amount DESC"]);
    assert_eq!(ordered[0]["currency"], "USD");

    let deleted = common::run_json(
        &data_dir,
        &["table", "delete-where", "money", "amount", "<", "20", "--returning", "currency"],
    );
    assert_eq!(deleted, serde_json::json!([{ "currency": "EUR" }]));

    let cleared = common::run_json(&data_dir, &["table", "delete-all", "money"]);
    assert_eq!(cleared["affected"], 1);
    let cleared = common::run_json(&data_dir, &["table", "delete-all", "money"]);
    assert_eq!(cleared["affected"], 0);
}

#[test]
fn e2e_table_rejects_hostile_input() {
    let data_dir = TempDir::new().expect("temp dir");
    write_money(&data_dir, "1", "10", "EUR");

    let hostile = common::run_json(&data_dir, &["table", "delete-all", "money; DROP TABLE users"]);
    assert_eq!(hostile["status"], "rejected");

    let bad_op = common::run_json(
        &data_dir,
        &["table", "delete-where", "money", "amount", "OR 1=1 --", "0"],
    );
    assert_eq!(bad_op["status"], "rejected");

    let empty = common::run_json(&data_dir, &["table", "delete-where", "money", "amount", ">", ""]);
    assert_eq!(empty["status"], "rejected");

    let rows = common::run_json(&data_dir, &["table", "read", "money"]);
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
}

#[test]
fn e2e_table_rejects_keyword_identifiers() {
    let data_dir = TempDir::new().expect("temp dir");
    write_money(&data_dir, "1", "10", "EUR");

    let keyword_table = common::run_json(&data_dir, &["table", "read", "order"]);
    assert_eq!(keyword_table["status"], "rejected");

    let keyword_column = common::run_json(&data_dir, &["table", "read", "money", "--column", "group"]);
    assert_eq!(keyword_column["status"], "rejected");

    let keyword_order = common::run_json(&data_dir, &["table", "read-ordered", "money", "select"]);
    assert_eq!(keyword_order["status"], "rejected");
}
