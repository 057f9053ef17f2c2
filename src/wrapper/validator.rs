use super::Rejection;
use crate::schema::{Entity, FieldDef, Record, Value};

pub const DEFAULT_MAX_FIELD_LEN: usize = 32;

/// Checks payloads against an entity's declared fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchemaValidator {
    max_len: usize,
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FIELD_LEN)
    }
}

impl SchemaValidator {
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    pub fn check_field(&self, entity: Entity, field: &str) -> Result<(), Rejection> {
        if entity.schema().has_field(field) {
            Ok(())
        } else {
            Err(Rejection::UnknownField {
                entity,
                field: field.to_string(),
            })
        }
    }

    pub fn check_fields<'a>(
        &self,
        entity: Entity,
        fields: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), Rejection> {
        fields
            .into_iter()
            .try_for_each(|field| self.check_field(entity, field))
    }

    /// Every key must be declared and writable, every value must match the
    /// declared type (and choices) and render within the length cap. Blobs
    /// are exempt from the cap.
    pub fn validate_data(&self, entity: Entity, data: &Record) -> Result<(), Rejection> {
        let schema = entity.schema();
        for (name, value) in data {
            let def = schema.field(name).ok_or_else(|| Rejection::UnknownField {
                entity,
                field: name.clone(),
            })?;
            if def.protected {
                return Err(Rejection::ProtectedField {
                    entity,
                    field: name.clone(),
                });
            }
            if !value.matches(def.ty) {
                return Err(Rejection::InvalidType {
                    field: name.clone(),
                    expected: def.ty,
                    actual: value.type_name(),
                });
            }
            check_choice(def, value)?;
            self.check_len(name, value)?;
        }
        Ok(())
    }

    /// [`validate_data`](Self::validate_data) plus the fields a new record must carry.
    pub fn validate_new(&self, entity: Entity, data: &Record) -> Result<(), Rejection> {
        self.validate_data(entity, data)?;
        match entity
            .schema()
            .required_fields()
            .find(|def| !data.contains_key(def.name))
        {
            Some(def) => Err(Rejection::MissingField {
                entity,
                field: def.name,
            }),
            None => Ok(()),
        }
    }

    fn check_len(&self, field: &str, value: &Value) -> Result<(), Rejection> {
        match value.rendered_len() {
            Some(len) if len > self.max_len => Err(Rejection::TooLong {
                field: field.to_string(),
                max: self.max_len,
                len,
            }),
            _ => Ok(()),
        }
    }
}

fn check_choice(def: &FieldDef, value: &Value) -> Result<(), Rejection> {
    match (def.choices, value) {
        (Some(choices), Value::Text(s)) if !choices.contains(&s.as_str()) => {
            Err(Rejection::InvalidChoice {
                field: def.name.to_string(),
                value: s.clone(),
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use crate::schema::FieldType;

    #[test]
    fn accepts_declared_fields_with_matching_types() {
        let v = SchemaValidator::default();
        let data = record! {
            "donatorId" => 1,
            "quantity" => 2,
            "quantityType" => "kg",
            "picture" => vec![0u8; 200],
        };
        assert_eq!(v.validate_data(Entity::Food, &data), Ok(()));
        assert_eq!(v.validate_data(Entity::Food, &record! {}), Ok(()));
    }

    #[test]
    fn rejects_undeclared_key() {
        let v = SchemaValidator::default();
        let err = v
            .validate_data(Entity::User, &record! { "nickname" => "x" })
            .unwrap_err();
        assert_eq!(
            err,
            Rejection::UnknownField {
                entity: Entity::User,
                field: "nickname".into()
            }
        );
    }

    #[test]
    fn rejects_type_mismatch_and_null() {
        let v = SchemaValidator::default();
        let err = v
            .validate_data(Entity::Money, &record! { "amount" => "ten" })
            .unwrap_err();
        assert_eq!(
            err,
            Rejection::InvalidType {
                field: "amount".into(),
                expected: FieldType::Real,
                actual: "text"
            }
        );

        let err = v
            .validate_data(Entity::Money, &record! { "currency" => Value::Null })
            .unwrap_err();
        assert!(matches!(err, Rejection::InvalidType { actual: "null", .. }));
    }

    #[test]
    fn rejects_text_over_the_cap() {
        let v = SchemaValidator::default();
        let exactly = "a".repeat(32);
        assert!(v
            .validate_data(Entity::Food, &record! { "message" => exactly.as_str() })
            .is_ok());

        let long = "a".repeat(33);
        let err = v
            .validate_data(Entity::Food, &record! { "message" => long })
            .unwrap_err();
        assert_eq!(
            err,
            Rejection::TooLong {
                field: "message".into(),
                max: 32,
                len: 33
            }
        );
    }

    #[test]
    fn cap_is_configurable() {
        let v = SchemaValidator::new(4);
        assert!(v
            .validate_data(Entity::Money, &record! { "currency" => "EUR" })
            .is_ok());
        assert!(matches!(
            v.validate_data(Entity::Money, &record! { "amount" => 12345 }),
            Err(Rejection::TooLong { len: 5, .. })
        ));
    }

    #[test]
    fn rejects_values_outside_the_declared_choices() {
        let v = SchemaValidator::default();
        assert!(v
            .validate_data(Entity::User, &record! { "role" => "Admin" })
            .is_ok());
        assert_eq!(
            v.validate_data(Entity::User, &record! { "role" => "Root" }),
            Err(Rejection::InvalidChoice {
                field: "role".into(),
                value: "Root".into()
            })
        );
        assert!(matches!(
            v.validate_data(Entity::Food, &record! { "quantityType" => "bushel" }),
            Err(Rejection::InvalidChoice { .. })
        ));
    }

    #[test]
    fn password_is_never_written_generically() {
        let v = SchemaValidator::default();
        assert_eq!(
            v.validate_data(Entity::User, &record! { "password" => "hunter22" }),
            Err(Rejection::ProtectedField {
                entity: Entity::User,
                field: "password".into()
            })
        );
    }

    #[test]
    fn new_records_need_their_required_fields() {
        let v = SchemaValidator::default();
        assert_eq!(
            v.validate_new(Entity::Money, &record! { "amount" => 5 }),
            Err(Rejection::MissingField {
                entity: Entity::Money,
                field: "donatorId"
            })
        );
        let complete = record! { "donatorId" => 1, "amount" => 5, "currency" => "EUR" };
        assert_eq!(v.validate_new(Entity::Money, &complete), Ok(()));
        assert_eq!(v.validate_new(Entity::Donation, &record! {}), Ok(()));

        // Unknown keys are reported before missing ones.
        assert!(matches!(
            v.validate_new(Entity::Money, &record! { "colour" => "red" }),
            Err(Rejection::UnknownField { .. })
        ));
    }

    #[test]
    fn check_fields_stops_at_first_unknown() {
        let v = SchemaValidator::default();
        assert!(v.check_fields(Entity::Donation, ["userId", "itemId"]).is_ok());
        assert_eq!(
            v.check_fields(Entity::Donation, ["userId", "amount", "bogus"]),
            Err(Rejection::UnknownField {
                entity: Entity::Donation,
                field: "amount".into()
            })
        );
    }
}
