//! Field values and the record capability trait
//!
//! Scalar text forms:
//!
//! ```text
//! integer   42, -7, 0
//! float     82.50        (always two decimals, '.' separator)
//! text      "Bench Press" (no escaping inside the quotes)
//! ```

use std::fmt::Write as _;

use super::errors::LineFault;
use super::schema::{RecordSchema, ScalarKind};

/// A single typed value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Appends the on-disk form of this scalar to `out`.
    pub fn encode_into(&self, out: &mut String) {
        // Writing into a String cannot fail.
        let _ = match self {
            Scalar::Integer(v) => write!(out, "{}", v),
            Scalar::Float(v) => write!(out, "{:.2}", v),
            Scalar::Text(v) => write!(out, "\"{}\"", v),
        };
    }

    /// Parses the on-disk form of a scalar of the given kind.
    ///
    /// Text must be wrapped in exactly one pair of quotes; nothing inside
    /// is unescaped.
    pub fn parse(kind: ScalarKind, raw: &str) -> Result<Scalar, LineFault> {
        let invalid = || LineFault::InvalidScalar {
            kind,
            raw: raw.to_string(),
        };

        match kind {
            ScalarKind::Integer => raw.parse().map(Scalar::Integer).map_err(|_| invalid()),
            ScalarKind::Float => raw.parse().map(Scalar::Float).map_err(|_| invalid()),
            ScalarKind::Text => raw
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .map(|inner| Scalar::Text(inner.to_string()))
                .ok_or_else(invalid),
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Scalar::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Scalar::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Scalar::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

/// The value of one record field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Single(Scalar),
    List(Vec<Scalar>),
}

impl FieldValue {
    pub fn text(v: impl Into<String>) -> Self {
        FieldValue::Single(Scalar::Text(v.into()))
    }

    /// Builds a list of text scalars, keeping order.
    pub fn text_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FieldValue::List(items.into_iter().map(|s| Scalar::from(s.as_ref())).collect())
    }

    /// Appends the on-disk form of this value (everything after `name:`).
    ///
    /// Lists are comma-joined inside brackets; an empty list is `[]`.
    pub fn encode_into(&self, out: &mut String) {
        match self {
            FieldValue::Single(scalar) => scalar.encode_into(out),
            FieldValue::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.encode_into(out);
                }
                out.push(']');
            }
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Single(scalar) => scalar.into_text(),
            FieldValue::List(_) => None,
        }
    }

    pub fn into_text_list(self) -> Option<Vec<String>> {
        match self {
            FieldValue::List(items) => items.into_iter().map(Scalar::into_text).collect(),
            FieldValue::Single(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Single(scalar) => scalar.as_integer(),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Single(scalar) => scalar.as_float(),
            FieldValue::List(_) => None,
        }
    }
}

/// Capability interface the codec uses to read and populate a record
/// without knowing its concrete shape.
///
/// `SCHEMA` lists the fields in on-disk order. `get` must return a value
/// for every schema field; `set` receives values already checked against
/// the schema's kind and multiplicity.
pub trait Record: Default {
    const SCHEMA: RecordSchema;

    /// Reads a field by name.
    fn get(&self, field: &str) -> Option<FieldValue>;

    /// Assigns a field by name.
    fn set(&mut self, field: &str, value: FieldValue) -> Result<(), LineFault>;
}

/// Fault for a `set` call whose field or value does not fit the record.
pub fn rejected(field: &str) -> LineFault {
    LineFault::Rejected(field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(scalar: Scalar) -> String {
        let mut out = String::new();
        scalar.encode_into(&mut out);
        out
    }

    #[test]
    fn test_integer_encoding() {
        assert_eq!(encoded(Scalar::Integer(0)), "0");
        assert_eq!(encoded(Scalar::Integer(-12)), "-12");
        assert_eq!(encoded(Scalar::Integer(8)), "8");
    }

    #[test]
    fn test_float_encoding_two_decimals() {
        assert_eq!(encoded(Scalar::Float(82.5)), "82.50");
        assert_eq!(encoded(Scalar::Float(82.456)), "82.46");
        assert_eq!(encoded(Scalar::Float(0.0)), "0.00");
        assert_eq!(encoded(Scalar::Float(100.0)), "100.00");
    }

    #[test]
    fn test_text_encoding_is_not_escaped() {
        assert_eq!(encoded(Scalar::from("Bench Press")), "\"Bench Press\"");
        assert_eq!(encoded(Scalar::from("a,b:c")), "\"a,b:c\"");
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(
            Scalar::parse(ScalarKind::Integer, "-3").unwrap(),
            Scalar::Integer(-3)
        );
        assert_eq!(
            Scalar::parse(ScalarKind::Float, "82.50").unwrap(),
            Scalar::Float(82.5)
        );
        assert_eq!(
            Scalar::parse(ScalarKind::Text, "\"push\"").unwrap(),
            Scalar::from("push")
        );
        assert_eq!(
            Scalar::parse(ScalarKind::Text, "\"\"").unwrap(),
            Scalar::from("")
        );
    }

    #[test]
    fn test_parse_text_strips_only_outer_quotes() {
        assert_eq!(
            Scalar::parse(ScalarKind::Text, "\"say \"hi\"\"").unwrap(),
            Scalar::from("say \"hi\"")
        );
    }

    #[test]
    fn test_parse_rejects_bad_scalars() {
        assert!(matches!(
            Scalar::parse(ScalarKind::Integer, "five"),
            Err(LineFault::InvalidScalar { kind: ScalarKind::Integer, .. })
        ));
        assert!(Scalar::parse(ScalarKind::Integer, "1.5").is_err());
        assert!(Scalar::parse(ScalarKind::Float, "").is_err());
        assert!(Scalar::parse(ScalarKind::Text, "push").is_err());
        assert!(Scalar::parse(ScalarKind::Text, "\"").is_err());
    }

    #[test]
    fn test_list_encoding() {
        let mut out = String::new();
        FieldValue::text_list(["triceps", "shoulders"]).encode_into(&mut out);
        assert_eq!(out, "[\"triceps\",\"shoulders\"]");

        let mut out = String::new();
        FieldValue::List(vec![Scalar::Integer(1), Scalar::Integer(2)]).encode_into(&mut out);
        assert_eq!(out, "[1,2]");
    }

    #[test]
    fn test_empty_list_encoding() {
        let mut out = String::new();
        FieldValue::List(Vec::new()).encode_into(&mut out);
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(FieldValue::text("x").into_text(), Some("x".to_string()));
        assert_eq!(FieldValue::text_list(["x"]).into_text(), None);
        assert_eq!(
            FieldValue::text_list(["a", "b"]).into_text_list(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(FieldValue::Single(Scalar::Integer(5)).as_integer(), Some(5));
        assert_eq!(FieldValue::Single(Scalar::Float(1.5)).as_float(), Some(1.5));
        assert_eq!(FieldValue::Single(Scalar::Float(1.5)).as_integer(), None);
    }
}
