use std::{fmt, str::FromStr};

use anyhow::Result;

use super::Statement;
use crate::schema::{Entity, Record};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub field: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    #[cfg(test)]
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OrderParseError {
    #[error("empty order clause")]
    Empty,
    #[error("invalid order direction: {0}")]
    InvalidDirection(String),
    #[error("order clause has extra data: {0}")]
    ExtraData(String),
}

/// Parses `"field"`, `"field ASC"` or `"field DESC"`.
impl FromStr for Order {
    type Err = OrderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let field = parts.next().ok_or(OrderParseError::Empty)?;
        let direction = match parts.next() {
            None => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("asc") => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("desc") => Direction::Desc,
            Some(d) => return Err(OrderParseError::InvalidDirection(d.to_string())),
        };
        if parts.next().is_some() {
            return Err(OrderParseError::ExtraData(s.to_string()));
        }
        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Asc => write!(f, "{} ASC", self.field),
            Direction::Desc => write!(f, "{} DESC", self.field),
        }
    }
}

/// Equality filter plus ordering, expressed in logical field names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    pub filter: Record,
    pub order: Vec<Order>,
}

impl Query {
    pub fn filter(filter: Record) -> Self {
        Self {
            filter,
            order: Vec::new(),
        }
    }

    pub fn with_order(mut self, order: Vec<Order>) -> Self {
        self.order = order;
        self
    }
}

pub trait StorageRead {
    fn find(&self, entity: Entity, query: &Query) -> Result<Vec<Record>>;
    fn find_one(&self, entity: Entity, query: &Query) -> Result<Option<Record>>;
    fn find_by_id(&self, entity: Entity, id: i64) -> Result<Option<Record>>;
    fn count(&self, entity: Entity, filter: &Record) -> Result<u64>;
}

pub trait StorageWrite {
    /// Insert a record and return it as stored, generated id included.
    fn create(&self, entity: Entity, data: &Record) -> Result<Record>;
    fn update_by_id(&self, entity: Entity, id: i64, data: &Record) -> Result<usize>;
    fn update_all(&self, entity: Entity, data: &Record, filter: &Record) -> Result<usize>;
    fn delete_by_id(&self, entity: Entity, id: i64) -> Result<usize>;
}

pub trait StorageTx: StorageRead + StorageWrite {
    fn commit(self) -> Result<()>;
}

pub trait Storage: StorageRead {
    type Tx: StorageTx;

    fn begin_tx(&self) -> Result<Self::Tx>;
}

/// Raw statement execution for callers that work below the entity schemas.
pub trait Executor {
    fn query(&self, stmt: &Statement) -> Result<Vec<Record>>;
    fn execute(&self, stmt: &Statement) -> Result<usize>;
}
