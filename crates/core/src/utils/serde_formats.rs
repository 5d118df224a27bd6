//! Lenient serde helpers for values coming out of the snapshot store.
//!
//! Stores commonly hand back numeric columns as strings and date columns as
//! full timestamps. These helpers coerce both into `Decimal` / `NaiveDate`.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{self, Deserialize, Deserializer, Serializer};
use serde_json::Number;

use crate::constants::PERIOD_KEY_FORMAT;

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalInput {
    String(String),
    Number(Number),
    Null,
}

fn parse_decimal_value(value: &str) -> Result<Decimal, String> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| format!("Invalid decimal value '{}': {}", value, e))
}

/// Parses `YYYY-MM-DD`, falling back to an RFC 3339 timestamp (UTC date).
pub fn parse_date_value(value: &str) -> Result<NaiveDate, String> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, PERIOD_KEY_FORMAT) {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }
    Err(format!(
        "Invalid date format: {}. Expected YYYY-MM-DD or RFC3339",
        value
    ))
}

/// Required decimal from a JSON number or numeric string.
pub fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    match DecimalInput::deserialize(deserializer)? {
        DecimalInput::String(s) => parse_decimal_value(&s).map_err(serde::de::Error::custom),
        DecimalInput::Number(n) => {
            parse_decimal_value(&n.to_string()).map_err(serde::de::Error::custom)
        }
        DecimalInput::Null => Err(serde::de::Error::custom("Expected a decimal, found null")),
    }
}

/// Optional decimal; `null`, a missing field and `""` all become `None`.
pub fn deserialize_option_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<DecimalInput>::deserialize(deserializer)?;
    match raw {
        None | Some(DecimalInput::Null) => Ok(None),
        Some(DecimalInput::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            parse_decimal_value(trimmed)
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
        Some(DecimalInput::Number(n)) => parse_decimal_value(&n.to_string())
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Dates serialize as `YYYY-MM-DD` and accept either a date or a timestamp.
pub mod date_format {
    use super::*;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(PERIOD_KEY_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_date_value(&s).map_err(serde::de::Error::custom)
    }
}

/// Optional date input; `null`, a missing field and `""` all become `None`.
pub fn deserialize_option_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_date_value(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "deserialize_decimal")]
        value: Decimal,
        #[serde(with = "date_format")]
        date: NaiveDate,
    }

    #[derive(Deserialize)]
    struct Input {
        #[serde(default, deserialize_with = "deserialize_option_decimal")]
        value: Option<Decimal>,
        #[serde(default, deserialize_with = "deserialize_option_date")]
        date: Option<NaiveDate>,
    }

    #[test]
    fn test_decimal_accepts_numbers_and_strings() {
        let row: Row = serde_json::from_str(r#"{"value": 1250.5, "date": "2024-03-31"}"#).unwrap();
        assert_eq!(row.value, dec!(1250.5));

        let row: Row =
            serde_json::from_str(r#"{"value": "98000.10", "date": "2024-03-31"}"#).unwrap();
        assert_eq!(row.value, dec!(98000.10));
    }

    #[test]
    fn test_decimal_rejects_garbage() {
        let result = serde_json::from_str::<Row>(r#"{"value": "abc", "date": "2024-03-31"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_date_accepts_timestamp() {
        let row: Row =
            serde_json::from_str(r#"{"value": 1, "date": "2024-06-30T00:00:00.000Z"}"#).unwrap();
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }

    #[test]
    fn test_optional_inputs_treat_blank_as_missing() {
        let input: Input = serde_json::from_str(r#"{"value": "", "date": ""}"#).unwrap();
        assert!(input.value.is_none());
        assert!(input.date.is_none());

        let input: Input = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.value.is_none());
        assert!(input.date.is_none());

        let input: Input = serde_json::from_str(r#"{"value": 0, "date": "2024-01-31"}"#).unwrap();
        assert_eq!(input.value, Some(Decimal::ZERO));
        assert_eq!(input.date, NaiveDate::from_ymd_opt(2024, 1, 31));
    }
}
