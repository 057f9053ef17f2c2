use clap::Parser;
use std::env;

use crate::cli::command::Command;
use crate::wrapper::DEFAULT_MAX_FIELD_LEN;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Track food and money donations in a local SQLite database",
    long_about = "Sign users up, record their food and money donations, and inspect or edit the stored records through a schema-checked repository or raw table access."
)]
pub struct Cli {
    #[arg(
        long,
        env = "DONATRACK_DATA_DIR",
        default_value = ".donatrack/",
        value_name = "DIR",
        help = "Directory to store persistent data"
    )]
    pub data_dir: String,

    #[arg(
        long,
        default_value_t = false,
        help = "Reset all persisted state (delete the SQLite database) before running"
    )]
    pub reset: bool,

    #[arg(
        long = "log-file",
        env = "DONATRACK_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[arg(
        long = "max-field-len",
        env = "DONATRACK_MAX_FIELD_LEN",
        default_value_t = DEFAULT_MAX_FIELD_LEN,
        value_name = "N",
        help = "Longest textual value accepted by `record` writes and updates"
    )]
    pub max_field_len: usize,

    #[command(subcommand)]
    pub cmd: Command,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();

    Cli::parse()
}
