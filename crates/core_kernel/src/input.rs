//! Serde helpers for raw form input
//!
//! Form fields arrive as text, but bill files written by hand often carry
//! plain JSON numbers. These helpers accept either and keep the value as the
//! user entered it, leaving interpretation to [`parse_lenient`].

use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use std::fmt;

use crate::decimal::parse_lenient;

/// Deserializes a string, number, or null into the raw text of a field.
///
/// Null becomes an empty string. Use with `#[serde(default)]` so that absent
/// fields are empty too.
pub fn raw_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(RawTextVisitor)
}

/// Deserializes a string, number, or null into a decimal using the lenient
/// zero-default rule.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    raw_text(deserializer).map(|raw| parse_lenient(&raw))
}

struct RawTextVisitor;

impl<'de> Visitor<'de> for RawTextVisitor {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, a number, or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.to_owned())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(String::new())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        raw_text(deserializer)
    }
}
