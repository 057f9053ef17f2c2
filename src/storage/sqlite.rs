use anyhow::{anyhow, Result};
use rusqlite::{params_from_iter, Connection, OptionalExtension};
use std::path::Path;

use super::{
    traits::{Direction, Executor, Query, Storage, StorageRead, StorageTx, StorageWrite},
    Statement,
};
use crate::schema::{Entity, FieldDef, Record, Schema, Value, ID_FIELD};

const DB_SCHEMA_VERSION: i64 = 1;

#[derive(Clone, Debug)]
pub struct SqliteStorage {
    pub path: String,
}

pub struct SqliteTx {
    conn: Connection,
}

impl StorageTx for SqliteTx {
    fn commit(self) -> Result<()> {
        self.conn.execute("COMMIT", [])?;
        Ok(())
    }
}

fn open_conn(path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.busy_timeout(std::time::Duration::from_millis(500))?;
    Ok(conn)
}

fn resolve<'s>(schema: &'s Schema, field: &str) -> Result<&'s FieldDef> {
    schema
        .field(field)
        .ok_or_else(|| anyhow!("{} has no field {}", schema.entity, field))
}

fn push_where(stmt: &mut Statement, schema: &Schema, filter: &Record) -> Result<()> {
    if filter.is_empty() {
        return Ok(());
    }
    let mut clauses = Vec::with_capacity(filter.len());
    for (name, value) in filter {
        let column = resolve(schema, name)?.column;
        if matches!(value, Value::Null) {
            clauses.push(format!("{column} IS NULL"));
        } else {
            let placeholder = stmt.bind(value.clone());
            clauses.push(format!("{column} = {placeholder}"));
        }
    }
    stmt.push_sql(" WHERE ");
    stmt.push_sql(&clauses.join(" AND "));
    Ok(())
}

fn select_stmt(schema: &Schema, query: &Query, limit: Option<u32>) -> Result<Statement> {
    let mut stmt = Statement::new(format!(
        "SELECT {} FROM {}",
        schema.column_list(),
        schema.table
    ));
    push_where(&mut stmt, schema, &query.filter)?;
    if !query.order.is_empty() {
        let mut terms = Vec::with_capacity(query.order.len());
        for order in &query.order {
            let column = resolve(schema, &order.field)?.column;
            let direction = match order.direction {
                Direction::Asc => "ASC",
                Direction::Desc => "DESC",
            };
            terms.push(format!("{column} {direction}"));
        }
        stmt.push_sql(" ORDER BY ");
        stmt.push_sql(&terms.join(", "));
    }
    if let Some(limit) = limit {
        stmt.push_sql(&format!(" LIMIT {limit}"));
    }
    Ok(stmt)
}

fn count_stmt(schema: &Schema, filter: &Record) -> Result<Statement> {
    let mut stmt = Statement::new(format!("SELECT COUNT(*) FROM {}", schema.table));
    push_where(&mut stmt, schema, filter)?;
    Ok(stmt)
}

fn insert_stmt(schema: &Schema, data: &Record) -> Result<Statement> {
    if data.is_empty() {
        return Ok(Statement::new(format!(
            "INSERT INTO {} DEFAULT VALUES",
            schema.table
        )));
    }
    let mut stmt = Statement::default();
    let mut columns = Vec::with_capacity(data.len());
    let mut placeholders = Vec::with_capacity(data.len());
    for (name, value) in data {
        columns.push(resolve(schema, name)?.column);
        placeholders.push(stmt.bind(value.clone()));
    }
    stmt.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.table,
        columns.join(", "),
        placeholders.join(", ")
    );
    Ok(stmt)
}

fn update_stmt(schema: &Schema, data: &Record, filter: &Record) -> Result<Statement> {
    let mut stmt = Statement::new(format!("UPDATE {} SET ", schema.table));
    let mut assignments = Vec::with_capacity(data.len());
    for (name, value) in data {
        let column = resolve(schema, name)?.column;
        let placeholder = stmt.bind(value.clone());
        assignments.push(format!("{column} = {placeholder}"));
    }
    stmt.push_sql(&assignments.join(", "));
    push_where(&mut stmt, schema, filter)?;
    Ok(stmt)
}

fn delete_stmt(schema: &Schema, filter: &Record) -> Result<Statement> {
    let mut stmt = Statement::new(format!("DELETE FROM {}", schema.table));
    push_where(&mut stmt, schema, filter)?;
    Ok(stmt)
}

fn id_filter(id: i64) -> Record {
    let mut filter = Record::new();
    filter.insert(ID_FIELD.to_string(), Value::Integer(id));
    filter
}

fn map_entity_row(schema: &Schema, row: &rusqlite::Row<'_>) -> rusqlite::Result<Record> {
    let mut record = Record::new();
    for (idx, field) in schema.fields.iter().enumerate() {
        record.insert(
            field.name.to_string(),
            Value::from_column(row.get_ref(idx)?, field.ty),
        );
    }
    Ok(record)
}

fn log_stmt(stmt: &Statement) {
    ::tracing::debug!(sql = %stmt.sql, params = stmt.params.len(), "executing statement");
}

fn db_find(conn: &Connection, entity: Entity, query: &Query) -> Result<Vec<Record>> {
    let schema = entity.schema();
    let stmt = select_stmt(schema, query, None)?;
    log_stmt(&stmt);
    let mut prepared = conn.prepare(&stmt.sql)?;
    let rows = prepared
        .query_map(params_from_iter(stmt.params.iter()), |row| {
            map_entity_row(schema, row)
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_find_one(conn: &Connection, entity: Entity, query: &Query) -> Result<Option<Record>> {
    let schema = entity.schema();
    let stmt = select_stmt(schema, query, Some(1))?;
    log_stmt(&stmt);
    let row = conn
        .query_row(&stmt.sql, params_from_iter(stmt.params.iter()), |row| {
            map_entity_row(schema, row)
        })
        .optional()?;
    Ok(row)
}

fn db_find_by_id(conn: &Connection, entity: Entity, id: i64) -> Result<Option<Record>> {
    db_find_one(conn, entity, &Query::filter(id_filter(id)))
}

fn db_count(conn: &Connection, entity: Entity, filter: &Record) -> Result<u64> {
    let stmt = count_stmt(entity.schema(), filter)?;
    log_stmt(&stmt);
    let count: i64 = conn.query_row(&stmt.sql, params_from_iter(stmt.params.iter()), |row| {
        row.get(0)
    })?;
    Ok(count.try_into()?)
}

fn db_create(conn: &Connection, entity: Entity, data: &Record) -> Result<Record> {
    let stmt = insert_stmt(entity.schema(), data)?;
    log_stmt(&stmt);
    conn.execute(&stmt.sql, params_from_iter(stmt.params.iter()))?;
    let id = conn.last_insert_rowid();
    db_find_by_id(conn, entity, id)?
        .ok_or_else(|| anyhow!("{entity} {id} missing right after insert"))
}

fn db_update(conn: &Connection, entity: Entity, data: &Record, filter: &Record) -> Result<usize> {
    if data.is_empty() {
        // Nothing to assign; report how many rows the update would have touched.
        return Ok(db_count(conn, entity, filter)?.try_into()?);
    }
    let stmt = update_stmt(entity.schema(), data, filter)?;
    log_stmt(&stmt);
    Ok(conn.execute(&stmt.sql, params_from_iter(stmt.params.iter()))?)
}

fn db_delete_by_id(conn: &Connection, entity: Entity, id: i64) -> Result<usize> {
    let stmt = delete_stmt(entity.schema(), &id_filter(id))?;
    log_stmt(&stmt);
    Ok(conn.execute(&stmt.sql, params_from_iter(stmt.params.iter()))?)
}

fn db_query_raw(conn: &Connection, stmt: &Statement) -> Result<Vec<Record>> {
    log_stmt(stmt);
    let mut prepared = conn.prepare(&stmt.sql)?;
    let names: Vec<String> = prepared
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();
    let rows = prepared
        .query_map(params_from_iter(stmt.params.iter()), |row| {
            let mut record = Record::new();
            for (idx, name) in names.iter().enumerate() {
                record.insert(name.clone(), Value::from(row.get_ref(idx)?));
            }
            Ok(record)
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_execute_raw(conn: &Connection, stmt: &Statement) -> Result<usize> {
    log_stmt(stmt);
    Ok(conn.execute(&stmt.sql, params_from_iter(stmt.params.iter()))?)
}

impl StorageRead for SqliteTx {
    fn find(&self, entity: Entity, query: &Query) -> Result<Vec<Record>> {
        db_find(&self.conn, entity, query)
    }

    fn find_one(&self, entity: Entity, query: &Query) -> Result<Option<Record>> {
        db_find_one(&self.conn, entity, query)
    }

    fn find_by_id(&self, entity: Entity, id: i64) -> Result<Option<Record>> {
        db_find_by_id(&self.conn, entity, id)
    }

    fn count(&self, entity: Entity, filter: &Record) -> Result<u64> {
        db_count(&self.conn, entity, filter)
    }
}

impl StorageWrite for SqliteTx {
    fn create(&self, entity: Entity, data: &Record) -> Result<Record> {
        db_create(&self.conn, entity, data)
    }

    fn update_by_id(&self, entity: Entity, id: i64, data: &Record) -> Result<usize> {
        db_update(&self.conn, entity, data, &id_filter(id))
    }

    fn update_all(&self, entity: Entity, data: &Record, filter: &Record) -> Result<usize> {
        db_update(&self.conn, entity, data, filter)
    }

    fn delete_by_id(&self, entity: Entity, id: i64) -> Result<usize> {
        db_delete_by_id(&self.conn, entity, id)
    }
}

impl Executor for SqliteTx {
    fn query(&self, stmt: &Statement) -> Result<Vec<Record>> {
        db_query_raw(&self.conn, stmt)
    }

    fn execute(&self, stmt: &Statement) -> Result<usize> {
        db_execute_raw(&self.conn, stmt)
    }
}

impl Storage for SqliteStorage {
    type Tx = SqliteTx;

    fn begin_tx(&self) -> Result<Self::Tx> {
        let conn = open_conn(&self.path)?;
        conn.execute("BEGIN IMMEDIATE", [])?;
        Ok(SqliteTx { conn })
    }
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    pub fn reset_all(&self) -> Result<()> {
        if !std::path::Path::new(&self.path).exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path)?;
        Ok(())
    }

    pub fn init(&self) -> Result<()> {
        self.with_conn(|_conn| Ok(()))?;
        Ok(())
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = open_conn(&self.path)?;
        Self::migrate(&conn)?;
        f(&conn)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        log::info!(
            "SQLite schema migration: {} -> {}",
            version,
            DB_SCHEMA_VERSION
        );

        if version == 0 {
            conn.execute_batch(
                r#"
            CREATE TABLE users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT,
                last_name TEXT,
                user_name TEXT,
                phone_number TEXT,
                password TEXT,
                email TEXT,
                role TEXT
            );
            CREATE UNIQUE INDEX users_email_idx ON users(email);
            CREATE UNIQUE INDEX users_user_name_idx ON users(user_name);
            CREATE TABLE donations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER,
                item_id INTEGER,
                donated_by_user INTEGER
            );
            CREATE INDEX donations_user_idx ON donations(user_id);
            CREATE TABLE foods (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                donator_id INTEGER,
                picture BLOB,
                quantity REAL,
                quantity_type TEXT,
                message TEXT,
                friend_username TEXT
            );
            CREATE TABLE money (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                donator_id INTEGER,
                amount REAL,
                currency TEXT
            );
        "#,
            )?;
            conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
            return Ok(());
        }

        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::ErrorCode::SchemaChanged as i32),
            Some("database schema version mismatch; please run with --reset option".to_string()),
        ))
    }
}

impl StorageRead for SqliteStorage {
    fn find(&self, entity: Entity, query: &Query) -> Result<Vec<Record>> {
        self.with_conn(|conn| db_find(conn, entity, query))
    }

    fn find_one(&self, entity: Entity, query: &Query) -> Result<Option<Record>> {
        self.with_conn(|conn| db_find_one(conn, entity, query))
    }

    fn find_by_id(&self, entity: Entity, id: i64) -> Result<Option<Record>> {
        self.with_conn(|conn| db_find_by_id(conn, entity, id))
    }

    fn count(&self, entity: Entity, filter: &Record) -> Result<u64> {
        self.with_conn(|conn| db_count(conn, entity, filter))
    }
}

impl Executor for SqliteStorage {
    fn query(&self, stmt: &Statement) -> Result<Vec<Record>> {
        self.with_conn(|conn| db_query_raw(conn, stmt))
    }

    fn execute(&self, stmt: &Statement) -> Result<usize> {
        self.with_conn(|conn| db_execute_raw(conn, stmt))
    }
}

/// Whether `err` is a SQLite constraint violation (unique index, check, ...).
pub fn is_constraint_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _)) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
