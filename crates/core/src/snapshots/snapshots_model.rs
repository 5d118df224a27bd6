//! Asset snapshot domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::utils::serde_formats::{
    date_format, deserialize_decimal, deserialize_option_date, deserialize_option_decimal,
};

/// A point-in-time measurement of a user's portfolio, as held by the store.
///
/// `contributions` and `withdrawals` are the cash flows since the previous
/// snapshot. Field names accept both the store's snake_case columns and the
/// camelCase API form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetSnapshot {
    pub id: String,
    #[serde(alias = "user_id")]
    pub user_id: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    #[serde(alias = "portfolio_value", deserialize_with = "deserialize_decimal")]
    pub portfolio_value: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub contributions: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub withdrawals: Decimal,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input model for recording a new snapshot.
///
/// Every field is optional at the wire level so that a missing value can be
/// reported by name from [`NewAssetSnapshot::validate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssetSnapshot {
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_option_decimal")]
    pub portfolio_value: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_option_decimal")]
    pub contributions: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_option_decimal")]
    pub withdrawals: Option<Decimal>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Input model for replacing the values of an existing snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSnapshotUpdate {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_option_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_option_decimal")]
    pub portfolio_value: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_option_decimal")]
    pub contributions: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_option_decimal")]
    pub withdrawals: Option<Decimal>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Snapshot values that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotValues {
    pub date: NaiveDate,
    pub portfolio_value: Decimal,
    pub contributions: Decimal,
    pub withdrawals: Decimal,
    pub note: Option<String>,
}

impl NewAssetSnapshot {
    pub fn validate(&self) -> Result<SnapshotValues> {
        validate_values(
            self.date,
            self.portfolio_value,
            self.contributions,
            self.withdrawals,
            self.note.as_deref(),
        )
    }
}

impl AssetSnapshotUpdate {
    pub fn validate(&self) -> Result<SnapshotValues> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        validate_values(
            self.date,
            self.portfolio_value,
            self.contributions,
            self.withdrawals,
            self.note.as_deref(),
        )
    }
}

fn require<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| ValidationError::MissingField(field.to_string()).into())
}

fn require_non_negative(value: Option<Decimal>, field: &str) -> Result<Decimal> {
    let value = require(value, field)?;
    if value < Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "{} must not be negative, got {}",
            field, value
        ))
        .into());
    }
    Ok(value)
}

fn validate_values(
    date: Option<NaiveDate>,
    portfolio_value: Option<Decimal>,
    contributions: Option<Decimal>,
    withdrawals: Option<Decimal>,
    note: Option<&str>,
) -> Result<SnapshotValues> {
    Ok(SnapshotValues {
        date: require(date, "date")?,
        portfolio_value: require_non_negative(portfolio_value, "portfolioValue")?,
        contributions: require_non_negative(contributions, "contributions")?,
        withdrawals: require_non_negative(withdrawals, "withdrawals")?,
        note: note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
    })
}
