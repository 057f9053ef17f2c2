use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum TableCmd {
    #[command(
        about = "Insert a row",
        long_about = "Insert one row into TABLE. Columns and values pair up in order; numbers are stored as numbers, anything else as text."
    )]
    Write {
        table: String,
        #[arg(long = "column", value_name = "COLUMN", help = "Column name, repeatable")]
        columns: Vec<String>,
        #[arg(
            long = "value",
            value_name = "VALUE",
            allow_hyphen_values = true,
            help = "Value, repeatable"
        )]
        values: Vec<String>,
    },
    #[command(about = "Read rows, all columns unless --column is given")]
    Read {
        table: String,
        #[arg(long = "column", value_name = "COLUMN")]
        columns: Vec<String>,
    },
    #[command(about = "Read rows matching COLUMN OPERATOR VALUE")]
    ReadWhere {
        table: String,
        column: String,
        #[arg(help = "One of =, !=, <>, <, <=, >, >=, LIKE")]
        operator: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    #[command(about = "Read rows ordered by \"column [ASC|DESC], ...\"")]
    ReadOrdered { table: String, order: String },
    #[command(
        about = "Delete rows matching COLUMN OPERATOR VALUE",
        long_about = "Delete matching rows and print the affected count. With --returning the deleted rows are printed instead; give no column names to return every column."
    )]
    DeleteWhere {
        table: String,
        column: String,
        operator: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(long, num_args = 0.., value_name = "COLUMN")]
        returning: Option<Vec<String>>,
    },
    #[command(about = "Delete every row")]
    DeleteAll { table: String },
}
