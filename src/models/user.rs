use std::{fmt, str::FromStr};

use serde::Serialize;

use super::{Fields, ModelError};
use crate::record;
use crate::schema::{Entity, Record};

/// Stored spellings of [`UserRole`].
pub const USER_ROLES: [&str; 2] = ["Admin", "User"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::User => "User",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(UserRole::Admin),
            "User" | "" => Ok(UserRole::User),
            other => Err(ModelError::UnknownRole(other.to_string())),
        }
    }
}

/// A stored user. The password is the stored hash and never serialized.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
    pub role: UserRole,
}

impl TryFrom<Record> for User {
    type Error = ModelError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let mut f = Fields::new(Entity::User, record);
        Ok(Self {
            id: f.i64("id")?,
            first_name: f.text("firstName")?,
            last_name: f.text("lastName")?,
            user_name: f.text("userName")?,
            phone_number: f.text("phoneNumber")?,
            password: f.text("password")?,
            email: f.text("email")?,
            role: f.text("role")?.parse()?,
        })
    }
}

/// Sign-up request, password in clear text.
#[derive(Clone, Debug, Default)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub phone_number: String,
    pub password: String,
    pub email: String,
    pub role: Option<UserRole>,
}

impl NewUser {
    /// Record for insertion, with `password_hash` in place of the clear text.
    pub(crate) fn into_record(self, password_hash: String) -> Record {
        record! {
            "firstName" => self.first_name,
            "lastName" => self.last_name,
            "userName" => self.user_name,
            "phoneNumber" => self.phone_number,
            "password" => password_hash,
            "email" => self.email,
            "role" => self.role.unwrap_or_default().as_str(),
        }
    }
}

/// Changes to stored users. The password, when given, is clear text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Record of the changed fields, with `password_hash` in place of the clear text.
    pub(crate) fn into_record(self, password_hash: Option<String>) -> Record {
        let mut data = Record::new();
        let text = [
            ("firstName", self.first_name),
            ("lastName", self.last_name),
            ("userName", self.user_name),
            ("phoneNumber", self.phone_number),
            ("password", password_hash),
            ("email", self.email),
        ];
        for (field, value) in text {
            if let Some(value) = value {
                data.insert(field.to_string(), value.into());
            }
        }
        if let Some(role) = self.role {
            data.insert("role".into(), role.as_str().into());
        }
        data
    }
}

/// What an authenticated caller gets to see about a user.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub roles: Vec<UserRole>,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    #[serde(rename = "username")]
    pub user_name: String,
    #[serde(rename = "phonenumber")]
    pub phone_number: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            roles: vec![user.role],
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            user_name: user.user_name.clone(),
            phone_number: user.phone_number.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Value;

    #[test]
    fn user_from_record_keeps_hash_out_of_json() {
        let user = User::try_from(record! {
            "id" => 3,
            "firstName" => "Ana",
            "lastName" => "Pop",
            "userName" => "anapop",
            "phoneNumber" => "0712345678",
            "password" => "$2b$04$stored.hash",
            "email" => "ana@pop.ro",
            "role" => "Admin",
        })
        .unwrap();
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.password, "$2b$04$stored.hash");

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["userName"], "anapop");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn unknown_role_is_an_error() {
        let err = User::try_from(record! { "id" => 1, "role" => "Root" }).unwrap_err();
        assert_eq!(err, ModelError::UnknownRole("Root".into()));
    }

    #[test]
    fn new_user_defaults_role() {
        let record = NewUser {
            user_name: "bob".into(),
            ..Default::default()
        }
        .into_record("hash".into());
        assert_eq!(record["role"], Value::Text("User".into()));
        assert_eq!(record["password"], Value::Text("hash".into()));
    }

    #[test]
    fn patch_record_swaps_in_the_hash() {
        assert!(UserPatch::default().is_empty());

        let patch = UserPatch {
            last_name: Some("Jones".into()),
            password: Some("clear text".into()),
            role: Some(UserRole::Admin),
            ..Default::default()
        };
        let record = patch.into_record(Some("hashed".into()));
        assert_eq!(
            record,
            record! { "lastName" => "Jones", "password" => "hashed", "role" => "Admin" }
        );
    }

    #[test]
    fn profile_uses_flat_lowercase_keys() {
        let user = User::try_from(record! {
            "id" => 9,
            "firstName" => "Ana",
            "userName" => "ana",
            "role" => "User",
        })
        .unwrap();
        let json = serde_json::to_value(UserProfile::from(&user)).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["roles"], serde_json::json!(["User"]));
        assert_eq!(json["firstname"], "Ana");
        assert_eq!(json["username"], "ana");
    }
}
