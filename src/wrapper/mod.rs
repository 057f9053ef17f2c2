//! Schema-validated guard in front of entity storage.
//!
//! Every field name a caller supplies is checked against the entity's
//! declared schema before storage sees it. Input problems come back as
//! [`Outcome::Rejected`] and are logged; storage failures are errors.

mod outcome;
mod validator;

use anyhow::{Context, Result};

pub use outcome::{Outcome, Rejection};
pub use validator::{SchemaValidator, DEFAULT_MAX_FIELD_LEN};

use crate::schema::{Entity, Record, Value};
use crate::storage::{
    is_constraint_violation, Order, Query, Storage, StorageRead, StorageTx, StorageWrite,
};

pub struct DatabaseWrapper<S> {
    storage: S,
    validator: SchemaValidator,
}

impl<S: Storage> DatabaseWrapper<S> {
    pub fn new(storage: S, validator: SchemaValidator) -> Self {
        Self { storage, validator }
    }

    /// Records matching `filter`, sorted by `order` (`"field [ASC|DESC]"`).
    pub fn read(
        &self,
        entity: Entity,
        filter: Option<&Record>,
        order: &[String],
    ) -> Result<Outcome<Vec<Record>>> {
        let filter = filter.cloned().unwrap_or_default();
        if let Err(rejection) = self
            .validator
            .check_fields(entity, filter.keys().map(String::as_str))
        {
            return Ok(reject("read", entity, rejection));
        }

        let mut parsed = Vec::with_capacity(order.len());
        for clause in order {
            let checked = clause
                .parse::<Order>()
                .map_err(Rejection::from)
                .and_then(|o| self.validator.check_field(entity, &o.field).map(|_| o));
            match checked {
                Ok(o) => parsed.push(o),
                Err(rejection) => return Ok(reject("read", entity, rejection)),
            }
        }

        let rows = self
            .storage
            .find(entity, &Query::filter(filter).with_order(parsed))
            .with_context(|| format!("reading {entity} records"))?;
        Ok(Outcome::Done(rows))
    }

    /// Validate and create a record. User emails must be unused.
    pub fn write(&self, entity: Entity, data: &Record) -> Result<Outcome<Record>> {
        if let Err(rejection) = self.validator.validate_new(entity, data) {
            return Ok(reject("write", entity, rejection));
        }

        let tx = self.storage.begin_tx()?;
        if entity == Entity::User {
            if let Some(email) = data.get("email") {
                let query = Query::filter(Record::from([("email".to_string(), email.clone())]));
                if tx.find_one(Entity::User, &query)?.is_some() {
                    let rejection = Rejection::Conflict {
                        field: "email".into(),
                        value: email.to_string(),
                    };
                    return Ok(reject("write", entity, rejection));
                }
            }
        }

        let created = match tx.create(entity, data) {
            Ok(created) => created,
            Err(err) => {
                let rejection = constraint_rejection(err)
                    .with_context(|| format!("creating {entity} record"))?;
                return Ok(reject("write", entity, rejection));
            }
        };
        tx.commit()?;

        log::info!(
            "created {} {}",
            entity,
            created.get("id").cloned().unwrap_or(Value::Null)
        );
        Ok(Outcome::Done(created))
    }

    pub fn delete_by_id(&self, entity: Entity, id: i64) -> Result<Outcome<()>> {
        let tx = self.storage.begin_tx()?;
        let affected = tx
            .delete_by_id(entity, id)
            .with_context(|| format!("deleting {entity} {id}"))?;
        tx.commit()?;

        if affected == 0 {
            log::warn!("delete {entity} {id}: no such record");
            return Ok(Outcome::NotFound);
        }
        log::info!("deleted {entity} {id}");
        Ok(Outcome::Done(()))
    }

    pub fn update_by_id(&self, entity: Entity, id: i64, data: &Record) -> Result<Outcome<()>> {
        if let Err(rejection) = self.validator.validate_data(entity, data) {
            return Ok(reject("update", entity, rejection));
        }

        let tx = self.storage.begin_tx()?;
        let affected = match tx.update_by_id(entity, id, data) {
            Ok(n) => n,
            Err(err) => {
                let rejection = constraint_rejection(err)
                    .with_context(|| format!("updating {entity} {id}"))?;
                return Ok(reject("update", entity, rejection));
            }
        };
        tx.commit()?;

        if affected == 0 {
            log::warn!("update {entity} {id}: no such record");
            return Ok(Outcome::NotFound);
        }
        Ok(Outcome::Done(()))
    }

    /// Apply `data` to every record matching `filter`; yields the affected count.
    pub fn update_all(
        &self,
        entity: Entity,
        data: &Record,
        filter: &Record,
    ) -> Result<Outcome<usize>> {
        let checked = self
            .validator
            .validate_data(entity, data)
            .and_then(|_| {
                self.validator
                    .check_fields(entity, filter.keys().map(String::as_str))
            });
        if let Err(rejection) = checked {
            return Ok(reject("update_all", entity, rejection));
        }

        let tx = self.storage.begin_tx()?;
        let affected = match tx.update_all(entity, data, filter) {
            Ok(n) => n,
            Err(err) => {
                let rejection = constraint_rejection(err)
                    .with_context(|| format!("updating {entity} records"))?;
                return Ok(reject("update_all", entity, rejection));
            }
        };
        tx.commit()?;
        Ok(Outcome::Done(affected))
    }

    pub fn find_by_field(
        &self,
        entity: Entity,
        field: &str,
        value: Value,
    ) -> Result<Outcome<Vec<Record>>> {
        if let Err(rejection) = self.validator.check_field(entity, field) {
            return Ok(reject("find", entity, rejection));
        }
        let query = Query::filter(Record::from([(field.to_string(), value)]));
        let rows = self
            .storage
            .find(entity, &query)
            .with_context(|| format!("finding {entity} by {field}"))?;
        Ok(Outcome::Done(rows))
    }

    pub fn exists(&self, entity: Entity, id: i64) -> Result<bool> {
        Ok(self.storage.find_by_id(entity, id)?.is_some())
    }

    pub fn count(&self, entity: Entity, filter: Option<&Record>) -> Result<Outcome<u64>> {
        let filter = filter.cloned().unwrap_or_default();
        if let Err(rejection) = self
            .validator
            .check_fields(entity, filter.keys().map(String::as_str))
        {
            return Ok(reject("count", entity, rejection));
        }
        let n = self
            .storage
            .count(entity, &filter)
            .with_context(|| format!("counting {entity} records"))?;
        Ok(Outcome::Done(n))
    }
}

fn reject<T>(op: &str, entity: Entity, rejection: Rejection) -> Outcome<T> {
    log::warn!("{op} {entity} rejected: {rejection}");
    Outcome::Rejected(rejection)
}

fn constraint_rejection(err: anyhow::Error) -> Result<Rejection> {
    if is_constraint_violation(&err) {
        Ok(Rejection::Constraint(err.to_string()))
    } else {
        Err(err)
    }
}
