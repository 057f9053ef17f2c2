use serde::{Serialize, Serializer};

use super::{Fields, ModelError};
use crate::record;
use crate::schema::{Entity, Record};

pub const QUANTITY_TYPES: [&str; 4] = ["kg", "g", "lb", "oz"];

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: i64,
    pub donator_id: i64,
    #[serde(serialize_with = "as_hex")]
    pub picture: Vec<u8>,
    pub quantity: f64,
    pub quantity_type: String,
    pub message: String,
    pub friend_username: String,
}

fn as_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

impl TryFrom<Record> for Food {
    type Error = ModelError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let mut f = Fields::new(Entity::Food, record);
        Ok(Self {
            id: f.i64("id")?,
            donator_id: f.i64("donatorId")?,
            picture: f.bytes("picture")?,
            quantity: f.f64("quantity")?,
            quantity_type: f.text("quantityType")?,
            message: f.text("message")?,
            friend_username: f.text("friendUsername")?,
        })
    }
}

/// A food donation as submitted, before it has a donator and an id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewFood {
    pub picture: Vec<u8>,
    pub quantity: f64,
    pub quantity_type: String,
    pub message: String,
    pub friend_username: String,
}

impl NewFood {
    pub(crate) fn into_record(self, donator_id: i64) -> Record {
        record! {
            "donatorId" => donator_id,
            "picture" => self.picture,
            "quantity" => self.quantity,
            "quantityType" => self.quantity_type,
            "message" => self.message,
            "friendUsername" => self.friend_username,
        }
    }
}

/// Fields to change on stored food items; `None` leaves a field as it is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FoodPatch {
    pub picture: Option<Vec<u8>>,
    pub quantity: Option<f64>,
    pub quantity_type: Option<String>,
    pub message: Option<String>,
    pub friend_username: Option<String>,
}

/// A replacement sets every field.
impl From<NewFood> for FoodPatch {
    fn from(food: NewFood) -> Self {
        Self {
            picture: Some(food.picture),
            quantity: Some(food.quantity),
            quantity_type: Some(food.quantity_type),
            message: Some(food.message),
            friend_username: Some(food.friend_username),
        }
    }
}

impl FoodPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn into_record(self) -> Record {
        let mut data = Record::new();
        if let Some(picture) = self.picture {
            data.insert("picture".into(), picture.into());
        }
        if let Some(quantity) = self.quantity {
            data.insert("quantity".into(), quantity.into());
        }
        if let Some(quantity_type) = self.quantity_type {
            data.insert("quantityType".into(), quantity_type.into());
        }
        if let Some(message) = self.message {
            data.insert("message".into(), message.into());
        }
        if let Some(friend_username) = self.friend_username {
            data.insert("friendUsername".into(), friend_username.into());
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picture_serializes_as_hex() {
        let food = Food::try_from(record! {
            "id" => 1,
            "donatorId" => 2,
            "picture" => vec![0xcau8, 0xfe],
            "quantity" => 3,
            "quantityType" => "kg",
        })
        .unwrap();
        assert_eq!(food.quantity, 3.0);
        assert_eq!(food.message, "");

        let json = serde_json::to_value(&food).unwrap();
        assert_eq!(json["picture"], "cafe");
        assert_eq!(json["donatorId"], 2);
        assert_eq!(json["quantityType"], "kg");
    }

    #[test]
    fn patch_only_carries_given_fields() {
        assert!(FoodPatch::default().is_empty());

        let patch = FoodPatch {
            quantity: Some(4.0),
            message: Some(String::new()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(
            patch.into_record(),
            record! { "quantity" => 4.0, "message" => "" }
        );
    }
}
