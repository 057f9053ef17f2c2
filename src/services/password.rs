use anyhow::{Context, Result};

/// bcrypt work factor. Debug builds and tests use the minimum so signups stay fast.
fn cost() -> u32 {
    if cfg!(debug_assertions) {
        4
    } else {
        bcrypt::DEFAULT_COST
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, cost()).context("hashing password")
}

/// A stored value that is not a bcrypt hash never verifies.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match bcrypt::verify(password, stored) {
        Ok(matches) => matches,
        Err(err) => {
            log::warn!("stored password hash is unusable: {err}");
            false
        }
    }
}
