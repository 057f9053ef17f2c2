use once_cell::sync::Lazy;
use regex::Regex;

use super::password::{hash_password, verify_password};
use super::{ServiceError, ServiceResult};
use crate::models::{NewUser, User, UserPatch, UserProfile, UserRole};
use crate::schema::{Entity, Record, Value};
use crate::storage::{
    is_constraint_violation, Query, Storage, StorageRead, StorageTx, StorageWrite,
};

const MAX_NAME_LEN: usize = 10;
const MIN_PASSWORD_LEN: usize = 8;
const INVALID_CREDENTIALS: &str = "Invalid username or password.";
const INVALID_USER: &str = "invalid User";

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s-]+$").expect("invalid name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").expect("invalid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("invalid email regex")
});
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("invalid username regex"));

fn check_name(name: &str, label: &str) -> ServiceResult<()> {
    if !NAME_RE.is_match(name) {
        return Err(ServiceError::bad_request(format!(
            "{label} should not contain any special characters."
        )));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ServiceError::bad_request(format!(
            "{label} should have a maximum of 10 characters."
        )));
    }
    Ok(())
}

fn check_phone(phone: &str) -> ServiceResult<()> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(ServiceError::bad_request(
            "Phone number must be exactly 10 digits and contain no special characters.",
        ))
    }
}

fn check_email(email: &str) -> ServiceResult<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ServiceError::bad_request("Invalid email format."))
    }
}

fn check_user_name(user_name: &str) -> ServiceResult<()> {
    if USERNAME_RE.is_match(user_name) {
        Ok(())
    } else {
        Err(ServiceError::bad_request(
            "Username must not contain special characters.",
        ))
    }
}

fn check_password(password: &str) -> ServiceResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ServiceError::bad_request(
            "Password must be at least 8 characters long.",
        ));
    }
    Ok(())
}

/// Shape checks that need no storage access.
fn validate_new_user(user: &NewUser) -> ServiceResult<()> {
    check_name(&user.first_name, "First name")?;
    check_name(&user.last_name, "Last name")?;
    check_phone(&user.phone_number)?;
    check_email(&user.email)?;
    check_user_name(&user.user_name)?;
    check_password(&user.password)
}

/// The same rules as sign-up, for the fields a patch carries.
fn validate_patch(patch: &UserPatch) -> ServiceResult<()> {
    if patch.is_empty() {
        return Err(ServiceError::bad_request("Nothing to update."));
    }
    if let Some(name) = &patch.first_name {
        check_name(name, "First name")?;
    }
    if let Some(name) = &patch.last_name {
        check_name(name, "Last name")?;
    }
    if let Some(phone) = &patch.phone_number {
        check_phone(phone)?;
    }
    if let Some(email) = &patch.email {
        check_email(email)?;
    }
    if let Some(user_name) = &patch.user_name {
        check_user_name(user_name)?;
    }
    if let Some(password) = &patch.password {
        check_password(password)?;
    }
    Ok(())
}

/// Hash the clear-text password of a validated patch and build its record.
fn patch_record(patch: UserPatch) -> ServiceResult<Record> {
    let hash = match &patch.password {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };
    Ok(patch.into_record(hash))
}

fn by_field(field: &str, value: &str) -> Query {
    Query::filter(Record::from([(field.to_string(), Value::from(value))]))
}

pub struct UserService<S> {
    storage: S,
}

impl<S: Storage> UserService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Validate a sign-up request and store the user with a hashed password.
    pub fn signup(&self, new_user: NewUser) -> ServiceResult<User> {
        validate_new_user(&new_user)?;

        let tx = self.storage.begin_tx()?;
        if tx
            .find_one(Entity::User, &by_field("userName", &new_user.user_name))?
            .is_some()
        {
            return Err(ServiceError::bad_request("Username is already in use."));
        }
        if tx
            .find_one(Entity::User, &by_field("email", &new_user.email))?
            .is_some()
        {
            return Err(ServiceError::bad_request("Email is already in use."));
        }

        let hash = hash_password(&new_user.password)?;
        let created = match tx.create(Entity::User, &new_user.into_record(hash)) {
            Ok(created) => created,
            Err(err) if is_constraint_violation(&err) => {
                return Err(ServiceError::bad_request(
                    "Username or email is already in use.",
                ))
            }
            Err(err) => return Err(err.context("creating user").into()),
        };
        tx.commit()?;

        let user = User::try_from(created)?;
        log::info!("signed up user {} ({})", user.id, user.user_name);
        Ok(user)
    }

    pub fn verify_credentials(&self, user_name: &str, password: &str) -> ServiceResult<User> {
        let Some(found) = self
            .storage
            .find_one(Entity::User, &by_field("userName", user_name))?
        else {
            log::warn!("login failed: unknown user {user_name}");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.into()));
        };
        let user = User::try_from(found)?;
        if !verify_password(password, &user.password) {
            log::warn!("login failed: wrong password for {user_name}");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.into()));
        }
        Ok(user)
    }

    /// Lookup for an authenticated caller; absence means the caller is invalid.
    pub fn find_user_by_id(&self, id: i64) -> ServiceResult<User> {
        match self.storage.find_by_id(Entity::User, id)? {
            Some(record) => Ok(User::try_from(record)?),
            None => Err(ServiceError::Unauthorized(INVALID_USER.into())),
        }
    }

    pub fn check_authorization(&self, user_id: i64, allowed: &[UserRole]) -> ServiceResult<()> {
        let user = self.find_user_by_id(user_id)?;
        if !allowed.contains(&user.role) {
            log::warn!("user {user_id} with role {} denied", user.role);
            return Err(ServiceError::Forbidden(
                "User does not have permission to perform this action.".into(),
            ));
        }
        Ok(())
    }

    pub fn to_profile(&self, user: &User) -> UserProfile {
        UserProfile::from(user)
    }

    pub fn list(&self) -> ServiceResult<Vec<User>> {
        self.storage
            .find(Entity::User, &Query::default())?
            .into_iter()
            .map(|r| User::try_from(r).map_err(ServiceError::from))
            .collect()
    }

    pub fn count(&self, filter: &Record) -> ServiceResult<u64> {
        Ok(self.storage.count(Entity::User, filter)?)
    }

    pub fn find_by_id(&self, id: i64) -> ServiceResult<User> {
        match self.storage.find_by_id(Entity::User, id)? {
            Some(record) => Ok(User::try_from(record)?),
            None => Err(ServiceError::NotFound(format!("User {id} not found"))),
        }
    }

    /// Validated partial update. A new password is hashed; a new user name or
    /// email must not belong to another user.
    pub fn update_by_id(&self, id: i64, patch: UserPatch) -> ServiceResult<User> {
        validate_patch(&patch)?;

        let tx = self.storage.begin_tx()?;
        let taken_by_other = |field: &str, value: &str| -> ServiceResult<bool> {
            let found = tx.find_one(Entity::User, &by_field(field, value))?;
            Ok(found.is_some_and(|r| r.get("id") != Some(&Value::Integer(id))))
        };
        if let Some(user_name) = &patch.user_name {
            if taken_by_other("userName", user_name)? {
                return Err(ServiceError::bad_request("Username is already in use."));
            }
        }
        if let Some(email) = &patch.email {
            if taken_by_other("email", email)? {
                return Err(ServiceError::bad_request("Email is already in use."));
            }
        }

        let data = patch_record(patch)?;
        let affected = match tx.update_by_id(Entity::User, id, &data) {
            Ok(n) => n,
            Err(err) if is_constraint_violation(&err) => {
                return Err(ServiceError::bad_request(
                    "Username or email is already in use.",
                ))
            }
            Err(err) => return Err(err.context("updating user").into()),
        };
        if affected == 0 {
            return Err(ServiceError::NotFound(format!("User {id} not found")));
        }
        let updated = tx
            .find_by_id(Entity::User, id)?
            .ok_or_else(|| ServiceError::NotFound(format!("User {id} not found")))?;
        tx.commit()?;

        log::info!("updated user {id}");
        Ok(User::try_from(updated)?)
    }

    /// Apply one patch to every user matching `filter`. User names and emails
    /// are unique, so they can only change one user at a time.
    pub fn update_all(&self, patch: UserPatch, filter: &Record) -> ServiceResult<usize> {
        validate_patch(&patch)?;
        if patch.user_name.is_some() || patch.email.is_some() {
            return Err(ServiceError::bad_request(
                "Username and email can only be changed for one user at a time.",
            ));
        }
        if let Some(field) = filter
            .keys()
            .find(|k| !Entity::User.schema().has_field(k))
        {
            return Err(ServiceError::bad_request(format!(
                "User has no field {field}."
            )));
        }

        let data = patch_record(patch)?;
        let tx = self.storage.begin_tx()?;
        let affected = tx.update_all(Entity::User, &data, filter)?;
        tx.commit()?;
        log::info!("updated {affected} user(s)");
        Ok(affected)
    }

    pub fn delete_by_id(&self, id: i64) -> ServiceResult<()> {
        let tx = self.storage.begin_tx()?;
        let affected = tx.delete_by_id(Entity::User, id)?;
        tx.commit()?;
        if affected == 0 {
            return Err(ServiceError::NotFound(format!("User {id} not found")));
        }
        log::info!("deleted user {id}");
        Ok(())
    }
}
