mod wiring;

use crate::services::ServiceError;
use crate::{cli, configuration, context};
use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;

pub struct App {
    pub ctx: context::Context,
}

impl App {
    pub fn from_cli() -> Result<(Self, cli::Cli)> {
        let cli = crate::cli::parse();
        let config = configuration::Configuration::from_cli(&cli);

        crate::tracing::init(config.log_file.as_deref().map(Path::new))
            .context("initializing logging")?;
        log::debug!("data dir: {}", config.data_dir);
        if let Some(path) = config.log_file.as_deref() {
            log::debug!("log file: {path}");
        }

        wiring::init_data_dir(&config).context("initializing data dir")?;
        let storage = wiring::init_storage(&config)?;

        Ok((
            Self {
                ctx: context::Context::new(config, storage),
            },
            cli,
        ))
    }
}

pub fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;
    let result = cli.cmd.run(&app.ctx);
    if let Err(err) = &result {
        if let Some(service_err) = err.downcast_ref::<ServiceError>() {
            log::warn!("{} request: {}", service_err.kind(), service_err);
        }
    }
    result
}
