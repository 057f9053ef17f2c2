use super::{print_json, print_outcome, CommandRunner};
use crate::cli;
use crate::context;
use crate::schema::{Entity, Record, Value};
use anyhow::{Context, Result};
use serde_json::json;

/// Split `field=value` pairs, typing each value by the entity's declared field.
fn parse_pairs(entity: Entity, pairs: &[String]) -> Result<Record> {
    let schema = entity.schema();
    let mut record = Record::new();
    for pair in pairs {
        let (field, value) = pair
            .split_once('=')
            .with_context(|| format!("expected FIELD=VALUE, got {pair:?}"))?;
        record.insert(
            field.to_string(),
            Value::parse_as(value, schema.field_type(field)),
        );
    }
    Ok(record)
}

impl CommandRunner for cli::RecordCmd {
    fn run(&self, ctx: &context::Context) -> Result<()> {
        let wrapper = ctx.wrapper();
        match self {
            cli::RecordCmd::Read {
                entity,
                filter,
                order,
            } => {
                let filter = parse_pairs(*entity, filter)?;
                let filter = (!filter.is_empty()).then_some(&filter);
                print_outcome(wrapper.read(*entity, filter, order)?)
            }
            cli::RecordCmd::Write { entity, fields } => {
                let data = parse_pairs(*entity, fields)?;
                print_outcome(wrapper.write(*entity, &data)?)
            }
            cli::RecordCmd::Update { entity, id, fields } => {
                let data = parse_pairs(*entity, fields)?;
                let outcome = wrapper.update_by_id(*entity, *id, &data)?;
                print_outcome(outcome.map(|()| json!({ "updated": id })))
            }
            cli::RecordCmd::UpdateAll {
                entity,
                set,
                filter,
            } => {
                let data = parse_pairs(*entity, set)?;
                let filter = parse_pairs(*entity, filter)?;
                let outcome = wrapper.update_all(*entity, &data, &filter)?;
                print_outcome(outcome.map(|count| json!({ "count": count })))
            }
            cli::RecordCmd::Delete { entity, id } => {
                let outcome = wrapper.delete_by_id(*entity, *id)?;
                print_outcome(outcome.map(|()| json!({ "deleted": id })))
            }
            cli::RecordCmd::Find {
                entity,
                field,
                value,
            } => {
                let value = Value::parse_as(value, entity.schema().field_type(field));
                print_outcome(wrapper.find_by_field(*entity, field, value)?)
            }
            cli::RecordCmd::Count { entity, filter } => {
                let filter = parse_pairs(*entity, filter)?;
                let filter = (!filter.is_empty()).then_some(&filter);
                let outcome = wrapper.count(*entity, filter)?;
                print_outcome(outcome.map(|count| json!({ "count": count })))
            }
            cli::RecordCmd::Exists { entity, id } => {
                print_json(&json!({ "exists": wrapper.exists(*entity, *id)? }))
            }
        }
    }
}
