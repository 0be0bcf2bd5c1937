#![deny(unsafe_code)]

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// A single field value as observed in a decoded document.
///
/// Collections carry no schema contract, so every cell is tagged with its
/// runtime type and downstream heuristics dispatch on the tag rather than
/// re-inspecting raw bytes. Nested documents, arrays, and other shapes the
/// analysis never looks inside are carried as [`Value::Opaque`] text.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Null,
    /// Stringified rendering of a shape the pipeline does not model
    /// (ObjectId hex, embedded documents, arrays).
    Opaque(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view used for histogram sampling. Only genuinely numeric
    /// tags qualify; text that happens to parse as a number does not.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

/// Conversion from decoded BSON is total: every variant the decoder can
/// produce maps to some [`Value`], so a loaded collection never panics the
/// model layer.
impl From<bson::Bson> for Value {
    fn from(raw: bson::Bson) -> Self {
        match raw {
            bson::Bson::String(text) => Value::Text(text),
            bson::Bson::Int32(v) => Value::Int(i64::from(v)),
            bson::Bson::Int64(v) => Value::Int(v),
            bson::Bson::Double(v) => Value::Float(v),
            bson::Bson::Boolean(v) => Value::Bool(v),
            bson::Bson::DateTime(dt) => Value::Timestamp(dt.to_chrono()),
            bson::Bson::Null | bson::Bson::Undefined => Value::Null,
            // ObjectIds render as bare hex so reference columns stay groupable.
            bson::Bson::ObjectId(oid) => Value::Opaque(oid.to_hex()),
            other => Value::Opaque(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Timestamp(ts) => {
                f.write_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Value::Null => Ok(()),
            Value::Opaque(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use bson::oid::ObjectId;
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn bson_scalars_map_to_tagged_values() {
        assert_eq!(
            Value::from(bson::Bson::String("abc".to_string())),
            Value::Text("abc".to_string())
        );
        assert_eq!(Value::from(bson::Bson::Int32(7)), Value::Int(7));
        assert_eq!(Value::from(bson::Bson::Int64(7)), Value::Int(7));
        assert_eq!(Value::from(bson::Bson::Double(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(bson::Bson::Boolean(true)), Value::Bool(true));
        assert_eq!(Value::from(bson::Bson::Null), Value::Null);
    }

    #[test]
    fn object_id_renders_as_hex() {
        let oid = ObjectId::new();
        let value = Value::from(bson::Bson::ObjectId(oid));
        assert_eq!(value, Value::Opaque(oid.to_hex()));
    }

    #[test]
    fn datetime_converts_to_utc_timestamp() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let value = Value::from(bson::Bson::DateTime(bson::DateTime::from_chrono(instant)));
        assert_eq!(value.as_timestamp(), Some(instant));
    }

    #[test]
    fn null_displays_as_empty_cell() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Int(3).to_string(), "3");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn only_numeric_tags_expose_f64() {
        assert_eq!(Value::Int(2).as_f64(), Some(2.0));
        assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(Value::Text("3".to_string()).as_f64(), None);
    }
}
