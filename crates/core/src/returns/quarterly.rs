//! Quarter-end rollup of snapshot cash flows.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;

use super::returns_model::{QuarterlySummary, Snapshot};
use crate::utils::period::is_quarter_end;

/// Rolls contributions and withdrawals up to each quarter-end snapshot.
///
/// `sorted` must be in ascending date order. Running sums start at zero and
/// reset after every quarter-end snapshot, so each summary covers the cash
/// flow since the previous quarter close (or since the start of the series).
/// A later snapshot on the same date replaces the earlier summary. Sums that
/// leave the `Decimal` range saturate at its bounds.
pub fn summarize_by_quarter(sorted: &[Snapshot]) -> BTreeMap<NaiveDate, QuarterlySummary> {
    let mut summaries = BTreeMap::new();

    let mut contrib_sum = Decimal::ZERO;
    let mut withdraw_sum = Decimal::ZERO;

    for snapshot in sorted {
        contrib_sum = accumulate(contrib_sum, snapshot.contributions, snapshot.date);
        withdraw_sum = accumulate(withdraw_sum, snapshot.withdrawals, snapshot.date);

        if is_quarter_end(snapshot.date) {
            summaries.insert(
                snapshot.date,
                QuarterlySummary {
                    date: snapshot.date,
                    net_adjustment: accumulate(contrib_sum, -withdraw_sum, snapshot.date),
                    portfolio_value: snapshot.portfolio_value,
                },
            );

            contrib_sum = Decimal::ZERO;
            withdraw_sum = Decimal::ZERO;
        }
    }

    summaries
}

fn accumulate(sum: Decimal, amount: Decimal, date: NaiveDate) -> Decimal {
    sum.checked_add(amount).unwrap_or_else(|| {
        warn!("Cash flow total at {} overflows the decimal range; saturating", date);
        sum.saturating_add(amount)
    })
}
