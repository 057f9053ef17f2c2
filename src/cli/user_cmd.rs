use clap::Subcommand;

use crate::models::UserRole;

#[derive(Subcommand, Debug, Clone)]
pub enum UserCmd {
    #[command(
        about = "Create a user",
        long_about = "Validate and store a new user. Without --password the password is prompted for on an interactive terminal."
    )]
    Signup {
        #[arg(long, value_name = "NAME")]
        first_name: String,
        #[arg(long, value_name = "NAME")]
        last_name: String,
        #[arg(long, value_name = "NAME", help = "Login name, letters and digits only")]
        user_name: String,
        #[arg(long, value_name = "DIGITS", help = "Exactly 10 digits")]
        phone_number: String,
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD", help = "At least 8 characters")]
        password: Option<String>,
        #[arg(long, value_enum, help = "Role, defaults to User")]
        role: Option<UserRole>,
    },
    #[command(
        about = "Check credentials",
        long_about = "Verify a user name and password and print the user's profile."
    )]
    Login {
        #[arg(long, value_name = "NAME")]
        user_name: String,
        #[arg(long, value_name = "PASSWORD")]
        password: Option<String>,
    },
    #[command(about = "Show one user")]
    Get {
        #[arg(value_name = "ID")]
        id: i64,
    },
    #[command(about = "List all users")]
    List,
    #[command(about = "Count users")]
    Count,
    #[command(
        about = "Check a user's role",
        long_about = "Succeed when the user's role is one of the allowed roles, fail with a permission error otherwise."
    )]
    Authorize {
        #[arg(value_name = "ID")]
        id: i64,
        #[arg(long = "allow", value_enum, required = true, help = "Allowed role, repeatable")]
        allow: Vec<UserRole>,
    },
    #[command(
        about = "Change a user",
        long_about = "Update the given fields of one user with the sign-up rules. A new password is hashed; a new user name or email must be unused."
    )]
    Update {
        #[arg(value_name = "ID")]
        id: i64,
        #[arg(long, value_name = "NAME")]
        first_name: Option<String>,
        #[arg(long, value_name = "NAME")]
        last_name: Option<String>,
        #[arg(long, value_name = "NAME")]
        user_name: Option<String>,
        #[arg(long, value_name = "DIGITS")]
        phone_number: Option<String>,
        #[arg(long, value_name = "EMAIL")]
        email: Option<String>,
        #[arg(long, value_name = "PASSWORD")]
        password: Option<String>,
        #[arg(long, value_enum)]
        role: Option<UserRole>,
    },
    #[command(
        about = "Change many users",
        long_about = "Apply the same change to every user, or to the users holding --where-role. User names and emails cannot be changed in bulk."
    )]
    UpdateAll {
        #[arg(long, value_name = "NAME")]
        first_name: Option<String>,
        #[arg(long, value_name = "NAME")]
        last_name: Option<String>,
        #[arg(long, value_name = "DIGITS")]
        phone_number: Option<String>,
        #[arg(long, value_name = "PASSWORD")]
        password: Option<String>,
        #[arg(long, value_enum)]
        role: Option<UserRole>,
        #[arg(long, value_enum, value_name = "ROLE", help = "Only users with this role")]
        where_role: Option<UserRole>,
    },
    #[command(about = "Delete a user")]
    Delete {
        #[arg(value_name = "ID")]
        id: i64,
    },
}
