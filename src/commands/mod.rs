use anyhow::Result;
use serde::Serialize;
use serde_json::json;

use crate::cli::Command;
use crate::context;
use crate::wrapper::Outcome;

pub mod donate;
pub mod record;
pub mod table;
pub mod user;

pub trait CommandRunner {
    fn run(&self, ctx: &context::Context) -> anyhow::Result<()>;
}

impl Command {
    pub fn run(&self, ctx: &context::Context) -> anyhow::Result<()> {
        match self {
            Command::User { cmd } => cmd.run(ctx),
            Command::Donate { cmd } => cmd.run(ctx),
            Command::Donation { cmd } => cmd.run(ctx),
            Command::Record { cmd } => cmd.run(ctx),
            Command::Table { cmd } => cmd.run(ctx),
        }
    }
}

/// Pretty JSON on stdout; logs go to stderr.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn print_outcome<T: Serialize>(outcome: Outcome<T>) -> Result<()> {
    match outcome {
        Outcome::Done(value) => print_json(&value),
        Outcome::Rejected(rejection) => print_json(&json!({
            "status": "rejected",
            "reason": rejection.to_string(),
        })),
        Outcome::NotFound => print_json(&json!({ "status": "not_found" })),
    }
}
