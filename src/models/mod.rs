//! Typed views over stored records.

mod donation;
mod food;
mod money;
mod user;

pub use donation::Donation;
pub use food::{Food, FoodPatch, NewFood, QUANTITY_TYPES};
pub use money::{Money, MoneyPatch, NewMoney};
pub use user::{NewUser, User, UserPatch, UserProfile, UserRole, USER_ROLES};

use crate::schema::{Entity, Record, Value};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ModelError {
    #[error("{entity} record has no value for {field}")]
    Missing { entity: Entity, field: &'static str },
    #[error("{entity}.{field} holds {actual}, expected {expected}")]
    WrongType {
        entity: Entity,
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("unknown user role: {0}")]
    UnknownRole(String),
}

/// Pulls typed fields out of a record, consuming it.
struct Fields {
    entity: Entity,
    record: Record,
}

impl Fields {
    fn new(entity: Entity, record: Record) -> Self {
        Self { entity, record }
    }

    fn take(&mut self, field: &'static str) -> Value {
        self.record.remove(field).unwrap_or(Value::Null)
    }

    fn wrong(&self, field: &'static str, expected: &'static str, actual: &Value) -> ModelError {
        ModelError::WrongType {
            entity: self.entity,
            field,
            expected,
            actual: actual.type_name(),
        }
    }

    fn opt_i64(&mut self, field: &'static str) -> Result<Option<i64>, ModelError> {
        match self.take(field) {
            Value::Null => Ok(None),
            Value::Integer(n) => Ok(Some(n)),
            other => Err(self.wrong(field, "integer", &other)),
        }
    }

    fn i64(&mut self, field: &'static str) -> Result<i64, ModelError> {
        self.opt_i64(field)?.ok_or(ModelError::Missing {
            entity: self.entity,
            field,
        })
    }

    fn f64(&mut self, field: &'static str) -> Result<f64, ModelError> {
        match self.take(field) {
            Value::Null => Err(ModelError::Missing {
                entity: self.entity,
                field,
            }),
            other => other
                .as_f64()
                .ok_or_else(|| self.wrong(field, "real", &other)),
        }
    }

    /// Text field; absent text reads as empty.
    fn text(&mut self, field: &'static str) -> Result<String, ModelError> {
        match self.take(field) {
            Value::Null => Ok(String::new()),
            Value::Text(s) => Ok(s),
            other => Err(self.wrong(field, "text", &other)),
        }
    }

    fn bytes(&mut self, field: &'static str) -> Result<Vec<u8>, ModelError> {
        match self.take(field) {
            Value::Null => Ok(Vec::new()),
            Value::Blob(b) => Ok(b),
            other => Err(self.wrong(field, "blob", &other)),
        }
    }
}
