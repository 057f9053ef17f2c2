mod args;
mod command;
mod donate_cmd;
mod record_cmd;
mod table_cmd;
mod user_cmd;

pub use args::Cli;
pub use command::Command;
pub use donate_cmd::{DonateCmd, DonationCmd};
pub use record_cmd::RecordCmd;
pub use table_cmd::TableCmd;
pub use user_cmd::UserCmd;

pub use args::parse;
