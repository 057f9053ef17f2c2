use clap::Subcommand;

use crate::schema::Entity;

#[derive(Subcommand, Debug, Clone)]
pub enum RecordCmd {
    #[command(
        about = "Read records",
        long_about = "Read records of an entity, optionally filtered by field=value pairs and ordered by \"field [ASC|DESC]\" clauses."
    )]
    Read {
        #[arg(value_enum)]
        entity: Entity,
        #[arg(long = "filter", value_name = "FIELD=VALUE", help = "Equality filter, repeatable")]
        filter: Vec<String>,
        #[arg(long = "order", value_name = "FIELD [ASC|DESC]", help = "Sort clause, repeatable")]
        order: Vec<String>,
    },
    #[command(
        about = "Create a record",
        long_about = "Validate FIELD=VALUE pairs against the entity schema and create the record. Blob values are given in hex."
    )]
    Write {
        #[arg(value_enum)]
        entity: Entity,
        #[arg(value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },
    #[command(about = "Update one record by id")]
    Update {
        #[arg(value_enum)]
        entity: Entity,
        #[arg(value_name = "ID")]
        id: i64,
        #[arg(value_name = "FIELD=VALUE", required = true)]
        fields: Vec<String>,
    },
    #[command(about = "Update every record matching a filter")]
    UpdateAll {
        #[arg(value_enum)]
        entity: Entity,
        #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
        set: Vec<String>,
        #[arg(long = "filter", value_name = "FIELD=VALUE")]
        filter: Vec<String>,
    },
    #[command(about = "Delete one record by id")]
    Delete {
        #[arg(value_enum)]
        entity: Entity,
        #[arg(value_name = "ID")]
        id: i64,
    },
    #[command(about = "Find records by a single field")]
    Find {
        #[arg(value_enum)]
        entity: Entity,
        #[arg(value_name = "FIELD")]
        field: String,
        #[arg(value_name = "VALUE")]
        value: String,
    },
    #[command(about = "Count records, optionally filtered")]
    Count {
        #[arg(value_enum)]
        entity: Entity,
        #[arg(long = "filter", value_name = "FIELD=VALUE")]
        filter: Vec<String>,
    },
    #[command(about = "Check whether a record id exists")]
    Exists {
        #[arg(value_enum)]
        entity: Entity,
        #[arg(value_name = "ID")]
        id: i64,
    },
}
