use serde::Serialize;

use super::{Fields, ModelError};
use crate::schema::{Entity, Record};

/// Links a user to a Food or Money item. `item_id` carries no kind tag.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: i64,
    pub user_id: Option<i64>,
    pub item_id: Option<i64>,
    pub donated_by_user: Option<i64>,
}

impl TryFrom<Record> for Donation {
    type Error = ModelError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let mut f = Fields::new(Entity::Donation, record);
        Ok(Self {
            id: f.i64("id")?,
            user_id: f.opt_i64("userId")?,
            item_id: f.opt_i64("itemId")?,
            donated_by_user: f.opt_i64("donatedByUser")?,
        })
    }
}
