use crate::schema::{Entity, FieldType};
use crate::storage::OrderParseError;

/// Why an operation refused its input. Never a storage failure.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("field {field} does not exist in {entity}")]
    UnknownField { entity: Entity, field: String },
    #[error("invalid type for field {field}: expected {expected}, got {actual}")]
    InvalidType {
        field: String,
        expected: FieldType,
        actual: &'static str,
    },
    #[error("{field} must be one of the allowed values, got {value:?}")]
    InvalidChoice { field: String, value: String },
    #[error("field {field} is required to create {entity}")]
    MissingField { entity: Entity, field: &'static str },
    #[error("field {field} of {entity} cannot be written directly")]
    ProtectedField { entity: Entity, field: String },
    #[error("value for field {field} is too long: {len} characters, maximum is {max}")]
    TooLong { field: String, max: usize, len: usize },
    #[error("{field} {value} is already in use")]
    Conflict { field: String, value: String },
    #[error("constraint violated: {0}")]
    Constraint(String),
    #[error("invalid order clause: {0}")]
    InvalidOrder(#[from] OrderParseError),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("{columns} columns given for {values} values")]
    ArityMismatch { columns: usize, values: usize },
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
    #[error("unsupported operator: {0:?}")]
    UnsupportedOperator(String),
}

/// Result of a wrapper or raw table call that reached a verdict.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub enum Outcome<T> {
    Done(T),
    Rejected(Rejection),
    NotFound,
}

impl<T> Outcome<T> {
    #[cfg(test)]
    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(v) => Some(v),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Rejected(r) => Some(r),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Done(v) => Outcome::Done(f(v)),
            Outcome::Rejected(r) => Outcome::Rejected(r),
            Outcome::NotFound => Outcome::NotFound,
        }
    }
}

impl<T> From<Rejection> for Outcome<T> {
    fn from(rejection: Rejection) -> Self {
        Outcome::Rejected(rejection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keeps_non_done_variants() {
        assert_eq!(Outcome::Done(2).map(|n| n * 2), Outcome::Done(4));
        assert_eq!(Outcome::<i32>::NotFound.map(|n| n * 2), Outcome::NotFound);

        let rejected: Outcome<i32> = Rejection::MissingArgument("table").into();
        assert_eq!(
            rejected.map(|n| n + 1).rejection(),
            Some(&Rejection::MissingArgument("table"))
        );
    }

    #[test]
    fn rejection_messages_name_the_field() {
        let r = Rejection::UnknownField {
            entity: Entity::Food,
            field: "colour".into(),
        };
        assert_eq!(r.to_string(), "field colour does not exist in Food");

        let r = Rejection::TooLong {
            field: "message".into(),
            max: 32,
            len: 40,
        };
        assert!(r.to_string().contains("maximum is 32"));
    }
}
