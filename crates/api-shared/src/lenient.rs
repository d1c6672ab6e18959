//! Lenient deserializers.
//!
//! Form frontends submit yes/no selections as strings. These helpers accept the spellings such
//! clients produce while still rejecting anything ambiguous.

use serde::de::{self, Deserializer, Unexpected, Visitor};
use std::fmt;

/// Accepts a JSON bool, `0`/`1`, or one of `true/false/yes/no/on/off/1/0` (any case).
pub fn bool_from_any<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(BoolVisitor)
}

struct BoolVisitor;

impl<'de> Visitor<'de> for BoolVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean or one of yes/no, true/false, on/off, 1/0")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
        match v {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(E::invalid_value(Unexpected::Unsigned(v), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
        match v {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(E::invalid_value(Unexpected::Signed(v), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
        match v.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" | "y" | "t" => Ok(true),
            "false" | "no" | "off" | "0" | "n" | "f" => Ok(false),
            _ => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Flag {
        #[serde(deserialize_with = "bool_from_any")]
        smoker: bool,
    }

    fn parse(raw: &str) -> Result<bool, serde_json::Error> {
        serde_json::from_str::<Flag>(raw).map(|f| f.smoker)
    }

    #[test]
    fn test_accepts_bools_and_form_strings() {
        assert!(parse(r#"{"smoker": true}"#).unwrap());
        assert!(parse(r#"{"smoker": "yes"}"#).unwrap());
        assert!(parse(r#"{"smoker": "YES"}"#).unwrap());
        assert!(parse(r#"{"smoker": 1}"#).unwrap());
        assert!(!parse(r#"{"smoker": "no"}"#).unwrap());
        assert!(!parse(r#"{"smoker": "off"}"#).unwrap());
        assert!(!parse(r#"{"smoker": false}"#).unwrap());
    }

    #[test]
    fn test_rejects_ambiguous_values() {
        assert!(parse(r#"{"smoker": "maybe"}"#).is_err());
        assert!(parse(r#"{"smoker": 2}"#).is_err());
        assert!(parse(r#"{"smoker": null}"#).is_err());
    }
}
