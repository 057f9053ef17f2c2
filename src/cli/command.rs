use clap::Subcommand;

use crate::cli::donate_cmd::{DonateCmd, DonationCmd};
use crate::cli::record_cmd::RecordCmd;
use crate::cli::table_cmd::TableCmd;
use crate::cli::user_cmd::UserCmd;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "User accounts",
        long_about = "Sign up, log in, look up and remove users. Sign-up enforces the name, phone, email, user name and password rules and stores a salted password hash."
    )]
    User {
        #[command(subcommand)]
        cmd: UserCmd,
    },
    #[command(
        about = "Submit a donation",
        long_about = "Donate food (with a picture) or money on behalf of an existing user. The item and its donation entry are stored together."
    )]
    Donate {
        #[command(subcommand)]
        cmd: DonateCmd,
    },
    #[command(
        about = "Inspect donations",
        long_about = "List donation entries, food items and money items, or delete an item."
    )]
    Donation {
        #[command(subcommand)]
        cmd: DonationCmd,
    },
    #[command(
        about = "Schema-checked record access",
        long_about = "Read and modify User, Donation, Food and Money records. Field names are checked against the entity schema and values against the declared types and the length cap."
    )]
    Record {
        #[command(subcommand)]
        cmd: RecordCmd,
    },
    #[command(
        about = "Raw table access",
        long_about = "Read and modify arbitrary tables without schema checks. Table and column names must be plain identifiers and values are always bound as parameters."
    )]
    Table {
        #[command(subcommand)]
        cmd: TableCmd,
    },
}
