use super::{print_json, CommandRunner};
use crate::cli;
use crate::context;
use crate::models::{FoodPatch, MoneyPatch, NewFood, NewMoney};
use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;

fn read_picture(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading picture {}", path.display()))
}

impl CommandRunner for cli::DonateCmd {
    fn run(&self, ctx: &context::Context) -> Result<()> {
        let donations = ctx.donations();
        match self {
            cli::DonateCmd::Food {
                user_id,
                picture,
                quantity,
                quantity_type,
                message,
                friend_username,
            } => {
                let picture = read_picture(picture)?;
                let food = donations.create_food_donation(
                    *user_id,
                    NewFood {
                        picture,
                        quantity: *quantity,
                        quantity_type: quantity_type.clone(),
                        message: message.clone(),
                        friend_username: friend_username.clone(),
                    },
                )?;
                print_json(&food)
            }
            cli::DonateCmd::Money {
                user_id,
                amount,
                currency,
            } => {
                let money = donations.create_money_donation(
                    *user_id,
                    NewMoney {
                        amount: *amount,
                        currency: currency.clone(),
                    },
                )?;
                print_json(&money)
            }
        }
    }
}

impl CommandRunner for cli::DonationCmd {
    fn run(&self, ctx: &context::Context) -> Result<()> {
        let donations = ctx.donations();
        match self {
            cli::DonationCmd::List { user_id } => print_json(&donations.list_donations(*user_id)?),
            cli::DonationCmd::Foods => print_json(&donations.list_food()?),
            cli::DonationCmd::Money => print_json(&donations.list_money()?),
            cli::DonationCmd::CountFood { donator_id } => {
                print_json(&json!({ "count": donations.count_food(*donator_id)? }))
            }
            cli::DonationCmd::CountMoney { donator_id } => {
                print_json(&json!({ "count": donations.count_money(*donator_id)? }))
            }
            cli::DonationCmd::ShowFood { id } => print_json(&donations.find_food(*id)?),
            cli::DonationCmd::ShowMoney { id } => print_json(&donations.find_money(*id)?),
            cli::DonationCmd::UpdateFood {
                id,
                picture,
                quantity,
                quantity_type,
                message,
                friend_username,
            } => {
                let patch = FoodPatch {
                    picture: picture.as_deref().map(read_picture).transpose()?,
                    quantity: *quantity,
                    quantity_type: quantity_type.clone(),
                    message: message.clone(),
                    friend_username: friend_username.clone(),
                };
                print_json(&donations.update_food_by_id(*id, patch)?)
            }
            cli::DonationCmd::UpdateAllFood {
                picture,
                quantity,
                quantity_type,
                message,
                friend_username,
                donator_id,
            } => {
                let patch = FoodPatch {
                    picture: picture.as_deref().map(read_picture).transpose()?,
                    quantity: *quantity,
                    quantity_type: quantity_type.clone(),
                    message: message.clone(),
                    friend_username: friend_username.clone(),
                };
                let count = donations.update_all_food(patch, *donator_id)?;
                print_json(&json!({ "count": count }))
            }
            cli::DonationCmd::ReplaceFood {
                id,
                picture,
                quantity,
                quantity_type,
                message,
                friend_username,
            } => {
                let food = NewFood {
                    picture: read_picture(picture)?,
                    quantity: *quantity,
                    quantity_type: quantity_type.clone(),
                    message: message.clone(),
                    friend_username: friend_username.clone(),
                };
                print_json(&donations.replace_food_by_id(*id, food)?)
            }
            cli::DonationCmd::UpdateMoney {
                id,
                amount,
                currency,
            } => {
                let patch = MoneyPatch {
                    amount: *amount,
                    currency: currency.clone(),
                };
                print_json(&donations.update_money_by_id(*id, patch)?)
            }
            cli::DonationCmd::UpdateAllMoney {
                amount,
                currency,
                donator_id,
            } => {
                let patch = MoneyPatch {
                    amount: *amount,
                    currency: currency.clone(),
                };
                let count = donations.update_all_money(patch, *donator_id)?;
                print_json(&json!({ "count": count }))
            }
            cli::DonationCmd::ReplaceMoney {
                id,
                amount,
                currency,
            } => {
                let money = NewMoney {
                    amount: *amount,
                    currency: currency.clone(),
                };
                print_json(&donations.replace_money_by_id(*id, money)?)
            }
            cli::DonationCmd::DeleteFood { id } => {
                donations.delete_food(*id)?;
                print_json(&json!({ "deleted": id }))
            }
            cli::DonationCmd::DeleteMoney { id } => {
                donations.delete_money(*id)?;
                print_json(&json!({ "deleted": id }))
            }
        }
    }
}
