use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::snapshots::AssetSnapshot;
use crate::utils::serde_formats::{date_format, deserialize_decimal};

/// One portfolio measurement fed to the returns engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    #[serde(alias = "portfolio_value", deserialize_with = "deserialize_decimal")]
    pub portfolio_value: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub contributions: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub withdrawals: Decimal,
    /// Carried along for display, never read by the engine.
    #[serde(default)]
    pub note: Option<String>,
}

impl Snapshot {
    pub fn new(
        date: NaiveDate,
        portfolio_value: Decimal,
        contributions: Decimal,
        withdrawals: Decimal,
    ) -> Self {
        Snapshot {
            date,
            portfolio_value,
            contributions,
            withdrawals,
            note: None,
        }
    }
}

impl From<&AssetSnapshot> for Snapshot {
    fn from(snapshot: &AssetSnapshot) -> Self {
        Snapshot {
            date: snapshot.date,
            portfolio_value: snapshot.portfolio_value,
            contributions: snapshot.contributions,
            withdrawals: snapshot.withdrawals,
            note: snapshot.note.clone(),
        }
    }
}

/// Cash flow and closing value of one quarter, keyed by the date of the
/// snapshot that closed it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlySummary {
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    /// Contributions minus withdrawals since the previous quarter close.
    pub net_adjustment: Decimal,
    pub portfolio_value: Decimal,
}

/// A computed quarterly return waiting to be compounded into a year.
#[derive(Debug, Clone, PartialEq)]
pub struct QuarterlyReturn {
    pub date: NaiveDate,
    pub value: Decimal,
    pub net_adjustment: Decimal,
    pub portfolio_value: Decimal,
}

/// Per-snapshot output row. Optional fields are absent when the neighbouring
/// periods needed to compute them are missing, which is distinct from a
/// computed zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnResult {
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_return: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarterly_return: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_return: Option<Decimal>,
    pub withdrawal_rate: Decimal,
    pub portfolio_value: Decimal,
    /// Sum of the four quarters' net adjustments (contributions minus
    /// withdrawals), reported on the year-end row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_withdrawal: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_withdrawal_rate: Option<Decimal>,
}

impl ReturnResult {
    pub fn new(date: NaiveDate, portfolio_value: Decimal, withdrawal_rate: Decimal) -> Self {
        ReturnResult {
            date,
            monthly_return: None,
            quarterly_return: None,
            annual_return: None,
            withdrawal_rate,
            portfolio_value,
            annual_withdrawal: None,
            annual_withdrawal_rate: None,
        }
    }
}

/// Both artifacts of one engine run.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnsReport {
    pub quarterly_summaries: Vec<QuarterlySummary>,
    pub results: Vec<ReturnResult>,
}

impl ReturnsReport {
    pub fn new(
        quarterly_summaries: BTreeMap<NaiveDate, QuarterlySummary>,
        results: Vec<ReturnResult>,
    ) -> Self {
        ReturnsReport {
            quarterly_summaries: quarterly_summaries.into_values().collect(),
            results,
        }
    }
}

/// What happens to pending quarterly returns that do not line up with a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AnnualWindowPolicy {
    /// Clear the pending list only when exactly four quarters land on a
    /// December snapshot; otherwise keep accumulating.
    #[default]
    Carry,
    /// Close the annual window at every December snapshot. A window that does
    /// not hold exactly four quarters is discarded without annual figures.
    ResetAtYearEnd,
}

/// Tunables for the returns engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReturnsSettings {
    pub annual_window_policy: AnnualWindowPolicy,
    /// Decimal places applied to every emitted ratio. `None` keeps full precision.
    pub precision: Option<u32>,
}

impl ReturnsSettings {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| Error::InvalidConfigValue(format!("returns settings: {}", e)))
    }

    pub fn with_policy(mut self, policy: AnnualWindowPolicy) -> Self {
        self.annual_window_policy = policy;
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub(crate) fn round(&self, value: Decimal) -> Decimal {
        match self.precision {
            Some(dp) => value.round_dp(dp),
            None => value,
        }
    }
}
