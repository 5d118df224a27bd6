//! Period return and withdrawal-rate calculation over portfolio snapshots.
//!
//! The calculation runs in two forward passes over the ascending series:
//! first the quarter-end rollup ([`summarize_by_quarter`]), then one result
//! row per snapshot. Monthly returns use the immediately preceding snapshot,
//! quarterly returns use the rollup, and annual returns compound the four
//! pending quarterly returns on a December snapshot.
//!
//! Cash flows are stripped out of every return so that a contribution is not
//! counted as investment gain. A zero denominator yields a zero ratio, and
//! arithmetic that would leave the `Decimal` range degrades instead of
//! panicking: period ratios fall back to zero and annual figures are omitted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::quarterly::summarize_by_quarter;
use super::returns_model::{
    AnnualWindowPolicy, QuarterlyReturn, QuarterlySummary, ReturnResult, ReturnsReport,
    ReturnsSettings, Snapshot,
};
use crate::constants::QUARTERS_PER_YEAR;
use crate::utils::period::{
    is_next_month, is_year_end, previous_quarter_end, same_day_previous_year,
};

/// Computes one result row per snapshot using default settings.
///
/// Input order does not matter; the output is in ascending date order.
pub fn calculate_returns(snapshots: &[Snapshot]) -> Vec<ReturnResult> {
    calculate_returns_with_settings(snapshots, &ReturnsSettings::default())
}

pub fn calculate_returns_with_settings(
    snapshots: &[Snapshot],
    settings: &ReturnsSettings,
) -> Vec<ReturnResult> {
    calculate_report(snapshots, settings).results
}

/// Runs the engine and returns the quarter rollup alongside the result rows.
pub fn calculate_report(snapshots: &[Snapshot], settings: &ReturnsSettings) -> ReturnsReport {
    if snapshots.is_empty() {
        return ReturnsReport::default();
    }

    let sorted = sort_snapshots(snapshots);
    let quarterly_summaries = summarize_by_quarter(&sorted);
    debug!(
        "Summarized {} quarter(s) from {} snapshot(s) starting {}",
        quarterly_summaries.len(),
        sorted.len(),
        sorted[0].date
    );

    let mut results = Vec::with_capacity(sorted.len());
    let mut pending_quarters: Vec<QuarterlyReturn> = Vec::with_capacity(QUARTERS_PER_YEAR);

    for (i, curr) in sorted.iter().enumerate() {
        if curr.portfolio_value < Decimal::ZERO {
            warn!(
                "Snapshot {} has a negative portfolio value ({})",
                curr.date, curr.portfolio_value
            );
        }

        let withdrawal_rate = if curr.portfolio_value > Decimal::ZERO {
            ratio(curr.withdrawals, curr.portfolio_value)
        } else {
            Decimal::ZERO
        };
        let mut entry = ReturnResult::new(
            curr.date,
            curr.portfolio_value,
            settings.round(withdrawal_rate),
        );

        if i > 0 {
            let prev = &sorted[i - 1];
            if is_next_month(prev.date, curr.date) {
                let monthly = monthly_return(prev, curr);
                debug!("Monthly return for {}: {}", curr.date, monthly);
                entry.monthly_return = Some(settings.round(monthly));
            }
        }

        if let Some(quarter) = quarterly_return(curr, &quarterly_summaries) {
            debug!("Quarterly return for {}: {}", curr.date, quarter.value);
            entry.quarterly_return = Some(settings.round(quarter.value));
            pending_quarters.push(quarter);
        }

        if is_year_end(curr.date) {
            if pending_quarters.len() == QUARTERS_PER_YEAR {
                match compound_quarters(&pending_quarters) {
                    Some((annual_return, annual_withdrawal)) => {
                        let previous_year_value =
                            previous_year_portfolio_value(curr.date, &quarterly_summaries);
                        let annual_withdrawal_rate = if previous_year_value > Decimal::ZERO {
                            ratio(annual_withdrawal, previous_year_value)
                        } else {
                            Decimal::ZERO
                        };
                        debug!(
                            "Annual return for {}: {} (net adjustment {})",
                            curr.date, annual_return, annual_withdrawal
                        );

                        entry.annual_return = Some(settings.round(annual_return));
                        entry.annual_withdrawal = Some(annual_withdrawal);
                        entry.annual_withdrawal_rate =
                            Some(settings.round(annual_withdrawal_rate));
                    }
                    None => warn!(
                        "Annual figures for {} overflow the decimal range; omitting them",
                        curr.date
                    ),
                }

                pending_quarters.clear();
            } else if settings.annual_window_policy == AnnualWindowPolicy::ResetAtYearEnd
                && !pending_quarters.is_empty()
            {
                warn!(
                    "Discarding {} quarterly return(s) at {}: annual window needs exactly {}",
                    pending_quarters.len(),
                    curr.date,
                    QUARTERS_PER_YEAR
                );
                pending_quarters.clear();
            }
        }

        results.push(entry);
    }

    ReturnsReport::new(quarterly_summaries, results)
}

/// Ascending copy of the series. Snapshots sharing a date keep their input order.
pub fn sort_snapshots(snapshots: &[Snapshot]) -> Vec<Snapshot> {
    let mut sorted = snapshots.to_vec();
    sorted.sort_by_key(|s| s.date);
    sorted
}

/// Cash-flow-neutral return between two consecutive monthly snapshots.
///
/// Flows recorded on `curr` are assumed to happen at the start of the month,
/// so they are added to the base and removed from the gain.
fn monthly_return(prev: &Snapshot, curr: &Snapshot) -> Decimal {
    let gain = curr
        .portfolio_value
        .checked_sub(prev.portfolio_value)
        .and_then(|v| v.checked_sub(curr.contributions))
        .and_then(|v| v.checked_add(curr.withdrawals));
    let base = prev
        .portfolio_value
        .checked_add(curr.contributions)
        .and_then(|v| v.checked_sub(curr.withdrawals));

    match (gain, base) {
        (Some(gain), Some(base)) => ratio(gain, base),
        _ => {
            warn!(
                "Monthly return for {} overflows the decimal range; using zero",
                curr.date
            );
            Decimal::ZERO
        }
    }
}

fn quarterly_return(
    curr: &Snapshot,
    summaries: &BTreeMap<NaiveDate, QuarterlySummary>,
) -> Option<QuarterlyReturn> {
    let current = summaries.get(&curr.date)?;
    let previous = previous_quarter_end(curr.date).and_then(|date| summaries.get(&date))?;

    let gain = current
        .portfolio_value
        .checked_sub(previous.portfolio_value)
        .and_then(|v| v.checked_sub(current.net_adjustment));
    let value = match gain {
        Some(gain) => ratio(gain, previous.portfolio_value),
        None => {
            warn!(
                "Quarterly return for {} overflows the decimal range; using zero",
                curr.date
            );
            Decimal::ZERO
        }
    };

    Some(QuarterlyReturn {
        date: curr.date,
        value,
        net_adjustment: current.net_adjustment,
        portfolio_value: curr.portfolio_value,
    })
}

/// Geometric link of the pending quarters plus the sum of their net adjustments.
///
/// `None` when either figure leaves the `Decimal` range.
fn compound_quarters(quarters: &[QuarterlyReturn]) -> Option<(Decimal, Decimal)> {
    let growth = quarters.iter().try_fold(Decimal::ONE, |acc, q| {
        Decimal::ONE
            .checked_add(q.value)
            .and_then(|factor| acc.checked_mul(factor))
    })?;
    let net_adjustment = quarters
        .iter()
        .try_fold(Decimal::ZERO, |acc, q| acc.checked_add(q.net_adjustment))?;
    Some((growth.checked_sub(Decimal::ONE)?, net_adjustment))
}

fn previous_year_portfolio_value(
    date: NaiveDate,
    summaries: &BTreeMap<NaiveDate, QuarterlySummary>,
) -> Decimal {
    same_day_previous_year(date)
        .and_then(|prev| summaries.get(&prev))
        .map(|summary| summary.portfolio_value)
        .unwrap_or(Decimal::ZERO)
}

fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}
