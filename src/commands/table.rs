use super::{print_outcome, CommandRunner};
use crate::cli;
use crate::context;
use crate::schema::Value;
use anyhow::Result;
use serde_json::json;

/// Raw tables carry no declared types: integers, then reals, else text.
fn infer_value(input: &str) -> Value {
    if let Ok(n) = input.parse::<i64>() {
        return Value::Integer(n);
    }
    match input.parse::<f64>() {
        Ok(r) if r.is_finite() => Value::Real(r),
        _ => Value::Text(input.to_string()),
    }
}

impl CommandRunner for cli::TableCmd {
    fn run(&self, ctx: &context::Context) -> Result<()> {
        let raw = ctx.raw();
        match self {
            cli::TableCmd::Write {
                table,
                columns,
                values,
            } => {
                let values: Vec<Value> = values.iter().map(|v| infer_value(v)).collect();
                let outcome = raw.write(table, columns, &values)?;
                print_outcome(outcome.map(|n| json!({ "affected": n })))
            }
            cli::TableCmd::Read { table, columns } if columns.is_empty() => {
                print_outcome(raw.read_all(table)?)
            }
            cli::TableCmd::Read { table, columns } => {
                print_outcome(raw.read_columns(table, columns)?)
            }
            cli::TableCmd::ReadWhere {
                table,
                column,
                operator,
                value,
            } => print_outcome(raw.read_with_condition(
                table,
                column,
                operator,
                infer_value(value),
            )?),
            cli::TableCmd::ReadOrdered { table, order } => {
                print_outcome(raw.read_ordered(table, order)?)
            }
            cli::TableCmd::DeleteWhere {
                table,
                column,
                operator,
                value,
                returning,
            } => match returning {
                Some(columns) => print_outcome(raw.delete_with_condition_returning(
                    table,
                    column,
                    operator,
                    infer_value(value),
                    columns,
                )?),
                None => {
                    let outcome =
                        raw.delete_with_condition(table, column, operator, infer_value(value))?;
                    print_outcome(outcome.map(|n| json!({ "affected": n })))
                }
            },
            cli::TableCmd::DeleteAll { table } => {
                let outcome = raw.delete_all(table)?;
                print_outcome(outcome.map(|n| json!({ "affected": n })))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_value_prefers_numbers() {
        assert_eq!(infer_value("42"), Value::Integer(42));
        assert_eq!(infer_value("-1.5"), Value::Real(-1.5));
        assert_eq!(infer_value("false"), Value::Text("false".into()));
        assert_eq!(infer_value("Frank1"), Value::Text("Frank1".into()));
        assert_eq!(infer_value("inf"), Value::Text("inf".into()));
    }
}
