use std::io::IsTerminal;

use super::{print_json, CommandRunner};
use crate::cli;
use crate::context;
use crate::models::{NewUser, UserPatch, UserProfile};
use crate::schema::Record;
use anyhow::{bail, Context, Result};
use serde_json::json;

/// Use the given password or prompt for it (twice when `confirm`).
fn password_or_prompt(given: &Option<String>, confirm: bool) -> Result<String> {
    if let Some(password) = given {
        return Ok(password.clone());
    }
    if !std::io::stdin().is_terminal() {
        bail!("--password is required when stdin is not a terminal");
    }
    let p1 = rpassword::prompt_password("Password: ").context("read password")?;
    if confirm {
        let p2 = rpassword::prompt_password("Confirm password: ").context("confirm password")?;
        if p1 != p2 {
            bail!("passwords do not match");
        }
    }
    Ok(p1)
}

impl CommandRunner for cli::UserCmd {
    fn run(&self, ctx: &context::Context) -> Result<()> {
        let users = ctx.users();
        match self {
            cli::UserCmd::Signup {
                first_name,
                last_name,
                user_name,
                phone_number,
                email,
                password,
                role,
            } => {
                let password = password_or_prompt(password, true)?;
                let user = users.signup(NewUser {
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    user_name: user_name.clone(),
                    phone_number: phone_number.clone(),
                    password,
                    email: email.clone(),
                    role: *role,
                })?;
                print_json(&user)
            }
            cli::UserCmd::Login {
                user_name,
                password,
            } => {
                let password = password_or_prompt(password, false)?;
                let user = users.verify_credentials(user_name, &password)?;
                log::info!("user {} logged in", user.user_name);
                print_json(&users.to_profile(&user))
            }
            cli::UserCmd::Get { id } => print_json(&users.find_by_id(*id)?),
            cli::UserCmd::List => print_json(&users.list()?),
            cli::UserCmd::Count => print_json(&json!({ "count": users.count(&Record::new())? })),
            cli::UserCmd::Authorize { id, allow } => {
                users.check_authorization(*id, allow)?;
                let profile: UserProfile = users.to_profile(&users.find_user_by_id(*id)?);
                print_json(&json!({ "authorized": true, "profile": profile }))
            }
            cli::UserCmd::Update {
                id,
                first_name,
                last_name,
                user_name,
                phone_number,
                email,
                password,
                role,
            } => {
                let patch = UserPatch {
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    user_name: user_name.clone(),
                    phone_number: phone_number.clone(),
                    password: password.clone(),
                    email: email.clone(),
                    role: *role,
                };
                print_json(&users.update_by_id(*id, patch)?)
            }
            cli::UserCmd::UpdateAll {
                first_name,
                last_name,
                phone_number,
                password,
                role,
                where_role,
            } => {
                let patch = UserPatch {
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    phone_number: phone_number.clone(),
                    password: password.clone(),
                    role: *role,
                    ..Default::default()
                };
                let filter = match where_role {
                    Some(role) => Record::from([("role".to_string(), role.as_str().into())]),
                    None => Record::new(),
                };
                print_json(&json!({ "count": users.update_all(patch, &filter)? }))
            }
            cli::UserCmd::Delete { id } => {
                users.delete_by_id(*id)?;
                print_json(&json!({ "deleted": id }))
            }
        }
    }
}
