use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug, Clone)]
pub enum DonateCmd {
    #[command(
        about = "Donate food",
        long_about = "Store a food donation with a picture read from a file. Quantity must be in (0, 1000] and the unit one of kg, g, lb, oz."
    )]
    Food {
        #[arg(long, value_name = "ID", help = "Donating user")]
        user_id: i64,
        #[arg(long, value_name = "PATH", help = "Picture file")]
        picture: PathBuf,
        #[arg(long, value_name = "N")]
        quantity: f64,
        #[arg(long, value_name = "UNIT")]
        quantity_type: String,
        #[arg(long, default_value = "")]
        message: String,
        #[arg(long, value_name = "NAME", default_value = "")]
        friend_username: String,
    },
    #[command(
        about = "Donate money",
        long_about = "Store a money donation. Amount must be in (0, 1000] and a currency is required."
    )]
    Money {
        #[arg(long, value_name = "ID", help = "Donating user")]
        user_id: i64,
        #[arg(long, value_name = "N")]
        amount: f64,
        #[arg(long, value_name = "CODE")]
        currency: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum DonationCmd {
    #[command(about = "List donation entries, optionally for one user")]
    List {
        #[arg(long, value_name = "ID")]
        user_id: Option<i64>,
    },
    #[command(about = "List food items")]
    Foods,
    #[command(about = "List money items")]
    Money,
    #[command(about = "Count food items, optionally of one donator")]
    CountFood {
        #[arg(long, value_name = "ID")]
        donator_id: Option<i64>,
    },
    #[command(about = "Count money items, optionally of one donator")]
    CountMoney {
        #[arg(long, value_name = "ID")]
        donator_id: Option<i64>,
    },
    #[command(about = "Show one food item")]
    ShowFood {
        #[arg(value_name = "ID")]
        id: i64,
    },
    #[command(about = "Show one money item")]
    ShowMoney {
        #[arg(value_name = "ID")]
        id: i64,
    },
    #[command(
        about = "Change a food item",
        long_about = "Update the given fields of one food item. Quantity and unit follow the donation rules."
    )]
    UpdateFood {
        #[arg(value_name = "ID")]
        id: i64,
        #[arg(long, value_name = "PATH", help = "New picture file")]
        picture: Option<PathBuf>,
        #[arg(long, value_name = "N")]
        quantity: Option<f64>,
        #[arg(long, value_name = "UNIT")]
        quantity_type: Option<String>,
        #[arg(long)]
        message: Option<String>,
        #[arg(long, value_name = "NAME")]
        friend_username: Option<String>,
    },
    #[command(about = "Change every food item, or those of one donator")]
    UpdateAllFood {
        #[arg(long, value_name = "PATH", help = "New picture file")]
        picture: Option<PathBuf>,
        #[arg(long, value_name = "N")]
        quantity: Option<f64>,
        #[arg(long, value_name = "UNIT")]
        quantity_type: Option<String>,
        #[arg(long)]
        message: Option<String>,
        #[arg(long, value_name = "NAME")]
        friend_username: Option<String>,
        #[arg(long, value_name = "ID")]
        donator_id: Option<i64>,
    },
    #[command(about = "Replace every field of a food item but its donator")]
    ReplaceFood {
        #[arg(value_name = "ID")]
        id: i64,
        #[arg(long, value_name = "PATH", help = "Picture file")]
        picture: PathBuf,
        #[arg(long, value_name = "N")]
        quantity: f64,
        #[arg(long, value_name = "UNIT")]
        quantity_type: String,
        #[arg(long, default_value = "")]
        message: String,
        #[arg(long, value_name = "NAME", default_value = "")]
        friend_username: String,
    },
    #[command(about = "Change a money item")]
    UpdateMoney {
        #[arg(value_name = "ID")]
        id: i64,
        #[arg(long, value_name = "N")]
        amount: Option<f64>,
        #[arg(long, value_name = "CODE")]
        currency: Option<String>,
    },
    #[command(about = "Change every money item, or those of one donator")]
    UpdateAllMoney {
        #[arg(long, value_name = "N")]
        amount: Option<f64>,
        #[arg(long, value_name = "CODE")]
        currency: Option<String>,
        #[arg(long, value_name = "ID")]
        donator_id: Option<i64>,
    },
    #[command(about = "Replace the amount and currency of a money item")]
    ReplaceMoney {
        #[arg(value_name = "ID")]
        id: i64,
        #[arg(long, value_name = "N")]
        amount: f64,
        #[arg(long, value_name = "CODE")]
        currency: String,
    },
    #[command(about = "Delete a food item")]
    DeleteFood {
        #[arg(value_name = "ID")]
        id: i64,
    },
    #[command(about = "Delete a money item")]
    DeleteMoney {
        #[arg(value_name = "ID")]
        id: i64,
    },
}
