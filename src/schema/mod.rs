//! Declared record schemas and the dynamic value model.
//!
//! Every entity maps logical camelCase field names onto snake_case columns.
//! Only names listed here ever reach statement text.

mod value;

use std::{fmt, str::FromStr};

use clap::ValueEnum;

use crate::models::{QUANTITY_TYPES, USER_ROLES};

pub use value::{Record, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Real,
    Text,
    Blob,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Integer => "integer",
            FieldType::Real => "real",
            FieldType::Text => "text",
            FieldType::Blob => "blob",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub column: &'static str,
    pub ty: FieldType,
    /// Must be present when a record is created.
    pub required: bool,
    /// Only written by the owning service, never through generic writes.
    pub protected: bool,
    /// Allowed text values, when the field is an enumeration.
    pub choices: Option<&'static [&'static str]>,
}

const fn field(name: &'static str, column: &'static str, ty: FieldType) -> FieldDef {
    FieldDef {
        name,
        column,
        ty,
        required: false,
        protected: false,
        choices: None,
    }
}

impl FieldDef {
    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn protected(mut self) -> Self {
        self.protected = true;
        self
    }

    const fn one_of(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = Some(choices);
        self
    }
}

#[derive(Debug)]
pub struct Schema {
    pub entity: Entity,
    pub table: &'static str,
    pub fields: &'static [FieldDef],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.field(name).map(|f| f.ty)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Comma separated column list in declaration order.
    pub fn column_list(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.column)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub const ID_FIELD: &str = "id";

static USER_SCHEMA: Schema = Schema {
    entity: Entity::User,
    table: "users",
    fields: &[
        field("id", "id", FieldType::Integer),
        field("firstName", "first_name", FieldType::Text),
        field("lastName", "last_name", FieldType::Text),
        field("userName", "user_name", FieldType::Text).required(),
        field("phoneNumber", "phone_number", FieldType::Text),
        field("password", "password", FieldType::Text).protected(),
        field("email", "email", FieldType::Text).required(),
        field("role", "role", FieldType::Text).one_of(&USER_ROLES),
    ],
};

static DONATION_SCHEMA: Schema = Schema {
    entity: Entity::Donation,
    table: "donations",
    fields: &[
        field("id", "id", FieldType::Integer),
        field("userId", "user_id", FieldType::Integer),
        field("itemId", "item_id", FieldType::Integer),
        field("donatedByUser", "donated_by_user", FieldType::Integer),
    ],
};

static FOOD_SCHEMA: Schema = Schema {
    entity: Entity::Food,
    table: "foods",
    fields: &[
        field("id", "id", FieldType::Integer),
        field("donatorId", "donator_id", FieldType::Integer).required(),
        field("picture", "picture", FieldType::Blob).required(),
        field("quantity", "quantity", FieldType::Real).required(),
        field("quantityType", "quantity_type", FieldType::Text)
            .required()
            .one_of(&QUANTITY_TYPES),
        field("message", "message", FieldType::Text).required(),
        field("friendUsername", "friend_username", FieldType::Text).required(),
    ],
};

static MONEY_SCHEMA: Schema = Schema {
    entity: Entity::Money,
    table: "money",
    fields: &[
        field("id", "id", FieldType::Integer),
        field("donatorId", "donator_id", FieldType::Integer).required(),
        field("amount", "amount", FieldType::Real).required(),
        field("currency", "currency", FieldType::Text).required(),
    ],
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Entity {
    User,
    Donation,
    Food,
    Money,
}

impl Entity {
    pub const ALL: [Entity; 4] = [Entity::User, Entity::Donation, Entity::Food, Entity::Money];

    pub fn schema(self) -> &'static Schema {
        match self {
            Entity::User => &USER_SCHEMA,
            Entity::Donation => &DONATION_SCHEMA,
            Entity::Food => &FOOD_SCHEMA,
            Entity::Money => &MONEY_SCHEMA,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::User => "User",
            Entity::Donation => "Donation",
            Entity::Food => "Food",
            Entity::Money => "Money",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown entity: {0}")]
pub struct UnknownEntity(String);

impl FromStr for Entity {
    type Err = UnknownEntity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Entity::ALL
            .into_iter()
            .find(|e| e.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownEntity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schema_declares_an_integer_id_first() {
        for entity in Entity::ALL {
            let schema = entity.schema();
            assert_eq!(schema.entity, entity);
            let first = schema.fields[0];
            assert_eq!(first.name, ID_FIELD);
            assert_eq!(first.ty, FieldType::Integer);
        }
    }

    #[test]
    fn field_lookup_uses_logical_names() {
        let user = Entity::User.schema();
        assert!(user.has_field("firstName"));
        assert!(!user.has_field("first_name"));
        assert_eq!(user.field("phoneNumber").unwrap().column, "phone_number");
        assert_eq!(Entity::Food.schema().field_type("picture"), Some(FieldType::Blob));
        assert_eq!(Entity::Money.schema().field_type("amount"), Some(FieldType::Real));
    }

    #[test]
    fn creation_rules_are_declared_per_field() {
        let money: Vec<_> = Entity::Money
            .schema()
            .required_fields()
            .map(|f| f.name)
            .collect();
        assert_eq!(money, ["donatorId", "amount", "currency"]);
        assert_eq!(Entity::Donation.schema().required_fields().count(), 0);

        let user = Entity::User.schema();
        assert!(user.field("password").unwrap().protected);
        assert_eq!(user.field("role").unwrap().choices, Some(&["Admin", "User"][..]));
        assert_eq!(
            Entity::Food.schema().field("quantityType").unwrap().choices,
            Some(&["kg", "g", "lb", "oz"][..])
        );
    }

    #[test]
    fn column_names_are_plain_identifiers() {
        for entity in Entity::ALL {
            let schema = entity.schema();
            for f in schema.fields {
                assert!(f
                    .column
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c == '_'));
            }
        }
    }

    #[test]
    fn entity_parses_case_insensitively() {
        assert_eq!("food".parse::<Entity>(), Ok(Entity::Food));
        assert_eq!("MONEY".parse::<Entity>(), Ok(Entity::Money));
        assert!("credentials".parse::<Entity>().is_err());
    }
}
