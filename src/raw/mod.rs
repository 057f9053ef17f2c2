//! Ad-hoc table access below the entity schemas.
//!
//! Tables and columns are caller supplied, so every identifier is checked
//! against a plain-name pattern, operators come from a fixed list and values
//! are always bound as parameters.

mod ident;

use anyhow::{Context, Result};

pub use ident::{Ident, Operator};

use crate::schema::{Record, Value};
use crate::storage::{Executor, Statement};
use crate::wrapper::{Outcome, Rejection};

pub struct RawTables<E> {
    executor: E,
}

impl<E: Executor> RawTables<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Insert one row; yields the affected count.
    pub fn write(&self, table: &str, columns: &[String], values: &[Value]) -> Result<Outcome<usize>> {
        match insert_stmt(table, columns, values) {
            Ok(stmt) => self.execute("write", table, &stmt),
            Err(rejection) => Ok(reject("write", table, rejection)),
        }
    }

    pub fn read_all(&self, table: &str) -> Result<Outcome<Vec<Record>>> {
        self.read_columns(table, &[])
    }

    /// Empty `columns` selects every column.
    pub fn read_columns(&self, table: &str, columns: &[String]) -> Result<Outcome<Vec<Record>>> {
        match select_stmt(table, columns) {
            Ok(stmt) => self.query("read", table, &stmt),
            Err(rejection) => Ok(reject("read", table, rejection)),
        }
    }

    pub fn read_with_condition(
        &self,
        table: &str,
        column: &str,
        operator: &str,
        condition: Value,
    ) -> Result<Outcome<Vec<Record>>> {
        let stmt = select_stmt(table, &[]).and_then(|mut stmt| {
            push_condition(&mut stmt, column, operator, condition)?;
            Ok(stmt)
        });
        match stmt {
            Ok(stmt) => self.query("read", table, &stmt),
            Err(rejection) => Ok(reject("read", table, rejection)),
        }
    }

    /// `order` is `"col [ASC|DESC]"`, several clauses separated by commas.
    pub fn read_ordered(&self, table: &str, order: &str) -> Result<Outcome<Vec<Record>>> {
        let stmt = select_stmt(table, &[]).and_then(|mut stmt| {
            let terms = ident::order_terms(order)?;
            stmt.push_sql(&format!(" ORDER BY {terms}"));
            Ok(stmt)
        });
        match stmt {
            Ok(stmt) => self.query("read", table, &stmt),
            Err(rejection) => Ok(reject("read", table, rejection)),
        }
    }

    pub fn delete_with_condition(
        &self,
        table: &str,
        column: &str,
        operator: &str,
        value: Value,
    ) -> Result<Outcome<usize>> {
        match conditional_delete_stmt(table, column, operator, value) {
            Ok(stmt) => self.execute("delete", table, &stmt),
            Err(rejection) => Ok(reject("delete", table, rejection)),
        }
    }

    /// Delete matching rows and return them; empty `returning` means every column.
    pub fn delete_with_condition_returning(
        &self,
        table: &str,
        column: &str,
        operator: &str,
        value: Value,
        returning: &[String],
    ) -> Result<Outcome<Vec<Record>>> {
        let stmt = conditional_delete_stmt(table, column, operator, value).and_then(|mut stmt| {
            let columns = Ident::list(returning)?;
            if columns.is_empty() {
                stmt.push_sql(" RETURNING *");
            } else {
                stmt.push_sql(&format!(" RETURNING {}", ident::join(&columns)));
            }
            Ok(stmt)
        });
        match stmt {
            Ok(stmt) => self.query("delete", table, &stmt),
            Err(rejection) => Ok(reject("delete", table, rejection)),
        }
    }

    /// Remove every row. Deleting from an already empty table succeeds.
    pub fn delete_all(&self, table: &str) -> Result<Outcome<usize>> {
        match Ident::required(table, "table") {
            Ok(table) => self.execute(
                "delete",
                table.as_str(),
                &Statement::new(format!("DELETE FROM {table}")),
            ),
            Err(rejection) => Ok(reject("delete", table, rejection)),
        }
    }

    fn query(&self, op: &str, table: &str, stmt: &Statement) -> Result<Outcome<Vec<Record>>> {
        let rows = self
            .executor
            .query(stmt)
            .with_context(|| format!("{op} on table {table}"))?;
        Ok(Outcome::Done(rows))
    }

    fn execute(&self, op: &str, table: &str, stmt: &Statement) -> Result<Outcome<usize>> {
        let affected = self
            .executor
            .execute(stmt)
            .with_context(|| format!("{op} on table {table}"))?;
        log::info!("{op} on table {table}: {affected} row(s)");
        Ok(Outcome::Done(affected))
    }
}

fn reject<T>(op: &str, table: &str, rejection: Rejection) -> Outcome<T> {
    log::warn!("{op} on table {table:?} rejected: {rejection}");
    Outcome::Rejected(rejection)
}

fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Text(s) => s.is_empty(),
        _ => false,
    }
}

fn insert_stmt(table: &str, columns: &[String], values: &[Value]) -> Result<Statement, Rejection> {
    let table = Ident::required(table, "table")?;
    if columns.is_empty() {
        return Err(Rejection::MissingArgument("columns"));
    }
    if columns.len() != values.len() {
        return Err(Rejection::ArityMismatch {
            columns: columns.len(),
            values: values.len(),
        });
    }
    let columns = Ident::list(columns)?;

    let mut stmt = Statement::default();
    let placeholders: Vec<String> = values.iter().map(|v| stmt.bind(v.clone())).collect();
    stmt.sql = format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        ident::join(&columns),
        placeholders.join(", ")
    );
    Ok(stmt)
}

fn select_stmt(table: &str, columns: &[String]) -> Result<Statement, Rejection> {
    let table = Ident::required(table, "table")?;
    let columns = Ident::list(columns)?;
    let projection = if columns.is_empty() {
        "*".to_string()
    } else {
        ident::join(&columns)
    };
    Ok(Statement::new(format!("SELECT {projection} FROM {table}")))
}

fn push_condition(
    stmt: &mut Statement,
    column: &str,
    operator: &str,
    value: Value,
) -> Result<(), Rejection> {
    let column = Ident::required(column, "column")?;
    let operator: Operator = operator.parse()?;
    if is_missing(&value) {
        return Err(Rejection::MissingArgument("condition"));
    }
    let placeholder = stmt.bind(value);
    stmt.push_sql(&format!(" WHERE {column} {operator} {placeholder}"));
    Ok(())
}

fn conditional_delete_stmt(
    table: &str,
    column: &str,
    operator: &str,
    value: Value,
) -> Result<Statement, Rejection> {
    let table = Ident::required(table, "table")?;
    let mut stmt = Statement::new(format!("DELETE FROM {table}"));
    push_condition(&mut stmt, column, operator, value)?;
    Ok(stmt)
}
