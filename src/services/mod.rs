//! Business rules for sign-up, login and donations.

mod donation;
mod error;
mod password;
mod user;

pub use donation::DonationService;
pub use error::{ServiceError, ServiceResult};
pub use user::UserService;
