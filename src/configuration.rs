use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Clone, Debug)]
pub struct Configuration {
    pub data_dir: String,
    pub log_file: Option<String>,
    pub reset: bool,
    pub max_field_len: usize,
}

impl Configuration {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone(),
            log_file: cli.log_file.clone(),
            reset: cli.reset,
            max_field_len: cli.max_field_len,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("donatrack.sqlite")
    }
}
