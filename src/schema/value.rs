use std::collections::BTreeMap;
use std::fmt;

use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use serde::{Serialize, Serializer};

use super::FieldType;

/// A record keyed by logical field name (or by column name for raw rows).
pub type Record = BTreeMap<String, Value>;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
        }
    }

    /// Whether this value may be stored in a field declared as `ty`.
    /// Integers widen into real fields; null and non-finite reals never match.
    pub fn matches(&self, ty: FieldType) -> bool {
        match (self, ty) {
            (Value::Real(r), FieldType::Real) => r.is_finite(),
            (Value::Integer(_), FieldType::Integer | FieldType::Real) => true,
            (Value::Text(_), FieldType::Text) | (Value::Blob(_), FieldType::Blob) => true,
            _ => false,
        }
    }

    /// Character length of the value's textual rendering, `None` for blobs.
    pub fn rendered_len(&self) -> Option<usize> {
        match self {
            Value::Blob(_) => None,
            Value::Text(s) => Some(s.chars().count()),
            other => Some(other.to_string().chars().count()),
        }
    }


    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }




    /// Parse command-line input according to the declared type. Input that
    /// does not parse stays text so validation can report the mismatch.
    pub fn parse_as(input: &str, ty: Option<FieldType>) -> Value {
        match ty {
            Some(FieldType::Integer) => input
                .parse::<i64>()
                .map(Value::Integer)
                .unwrap_or_else(|_| Value::Text(input.to_string())),
            Some(FieldType::Real) => match input.parse::<f64>() {
                Ok(r) if r.is_finite() => Value::Real(r),
                _ => Value::Text(input.to_string()),
            },
            Some(FieldType::Blob) => hex::decode(input)
                .map(Value::Blob)
                .unwrap_or_else(|_| Value::Text(input.to_string())),
            Some(FieldType::Text) | None => Value::Text(input.to_string()),
        }
    }

    /// Coerce a raw column value into the declared field type on read.
    pub(crate) fn from_column(raw: ValueRef<'_>, ty: FieldType) -> Value {
        match (Value::from(raw), ty) {
            (Value::Integer(n), FieldType::Real) => Value::Real(n as f64),
            (v, _) => v,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Blob(b) => write!(f, "{}", hex::encode(b)),
        }
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(raw: ValueRef<'_>) -> Self {
        match raw {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(n) => Value::Integer(n),
            ValueRef::Real(r) => Value::Real(r),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Integer(n) => ToSqlOutput::Owned(SqlValue::Integer(*n)),
            Value::Real(r) => ToSqlOutput::Owned(SqlValue::Real(*r)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Real(r) => serializer.serialize_f64(*r),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Blob(b) => serializer.serialize_str(&hex::encode(b)),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Value::Real(r)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Blob(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Build a [`Record`] from `field => value` pairs.
#[macro_export]
macro_rules! record {
    () => { $crate::schema::Record::new() };
    ($($field:expr => $value:expr),+ $(,)?) => {{
        let mut r = $crate::schema::Record::new();
        $( r.insert(String::from($field), $crate::schema::Value::from($value)); )+
        r
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_widens_into_real_but_not_back() {
        assert!(Value::Integer(2).matches(FieldType::Real));
        assert!(!Value::Real(2.5).matches(FieldType::Integer));
        assert!(!Value::Null.matches(FieldType::Text));
        assert!(!Value::Real(f64::NAN).matches(FieldType::Real));
        assert!(!Value::Text("2".into()).matches(FieldType::Integer));
    }

    #[test]
    fn rendered_len_counts_chars_and_skips_blobs() {
        assert_eq!(Value::Text("héllo".into()).rendered_len(), Some(5));
        assert_eq!(Value::Integer(-120).rendered_len(), Some(4));
        assert_eq!(Value::Real(2.0).rendered_len(), Some(1));
        assert_eq!(Value::Blob(vec![0; 64]).rendered_len(), None);
    }

    #[test]
    fn parse_as_falls_back_to_text() {
        assert_eq!(Value::parse_as("42", Some(FieldType::Integer)), Value::Integer(42));
        assert_eq!(Value::parse_as("1.5", Some(FieldType::Real)), Value::Real(1.5));
        assert_eq!(
            Value::parse_as("abc", Some(FieldType::Integer)),
            Value::Text("abc".into())
        );
        for non_finite in ["NaN", "inf", "-inf"] {
            assert_eq!(
                Value::parse_as(non_finite, Some(FieldType::Real)),
                Value::Text(non_finite.into())
            );
        }
        assert_eq!(
            Value::parse_as("dead", Some(FieldType::Blob)),
            Value::Blob(vec![0xde, 0xad])
        );
    }

    #[test]
    fn serializes_blobs_as_hex() {
        let json = serde_json::to_string(&Value::Blob(vec![1, 2, 255])).unwrap();
        assert_eq!(json, "\"0102ff\"");
        let json = serde_json::to_string(&Value::Null).unwrap();
        assert_eq!(json, "null");
    }
}
