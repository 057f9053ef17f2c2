mod app;
mod cli;
mod commands;
mod configuration;
mod context;
mod models;
mod raw;
mod schema;
mod services;
mod storage;
mod tracing;
mod wrapper;

#[cfg(test)]
mod test_support;

fn main() -> anyhow::Result<()> {
    app::run()
}
