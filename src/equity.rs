// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Equity curve: dated balance changes bucketed by day or month and accumulated
//! on top of the starting balance.
//!
//! Only trades and withdrawals move the curve. The deposit is already the first
//! point, so it contributes no event of its own. Days or months without activity
//! are left out rather than zero-filled.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::balance::percent;
use crate::error::LedgerError;
use crate::ledger::LedgerState;

pub const RECENT_WINDOW_DAYS: i64 = 30;
pub const ANNUAL_WINDOW_MONTHS: usize = 12;
pub const START_LABEL: &str = "Start";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EquityWindow {
    /// Daily buckets over the trailing 30 days.
    Recent,
    /// Monthly buckets, last 12 months with activity.
    Annual,
}

impl fmt::Display for EquityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recent => f.write_str("recent"),
            Self::Annual => f.write_str("annual"),
        }
    }
}

impl FromStr for EquityWindow {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recent" | "1m" => Ok(Self::Recent),
            "annual" | "12m" | "1y" => Ok(Self::Annual),
            other => Err(LedgerError::Validation(format!(
                "unknown equity window '{}' (use recent|annual)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityPoint {
    pub label: String,
    /// `YYYY-MM-DD` or `YYYY-MM`; `None` for the starting point.
    pub bucket: Option<String>,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquitySeries {
    pub window: EquityWindow,
    pub points: Vec<EquityPoint>,
    pub peak: Decimal,
    /// Percent below the peak at the last point.
    pub drawdown: Decimal,
}

impl EquitySeries {
    pub fn balances(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.balance).collect()
    }

    pub fn last_balance(&self) -> Decimal {
        self.points.last().map(|p| p.balance).unwrap_or_default()
    }
}

fn events(state: &LedgerState) -> Vec<(NaiveDate, Decimal)> {
    let trades = state.trades.iter().map(|t| (t.date, t.pnl));
    let withdrawals = state.withdrawals.iter().map(|w| (w.date, -w.amount));
    trades.chain(withdrawals).collect()
}

pub fn build_equity_series(
    state: &LedgerState,
    window: EquityWindow,
    today: NaiveDate,
) -> EquitySeries {
    let buckets: Vec<(String, String, Decimal)> = match window {
        EquityWindow::Recent => {
            let cutoff = today - Duration::days(RECENT_WINDOW_DAYS);
            let mut daily: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
            for (date, amount) in events(state) {
                if date >= cutoff {
                    *daily.entry(date).or_insert(Decimal::ZERO) += amount;
                }
            }
            daily
                .into_iter()
                .map(|(d, sum)| (d.format("%b %-d").to_string(), d.to_string(), sum))
                .collect()
        }
        EquityWindow::Annual => {
            let mut monthly: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
            for (date, amount) in events(state) {
                *monthly
                    .entry((date.year(), date.month()))
                    .or_insert(Decimal::ZERO) += amount;
            }
            let skip = monthly.len().saturating_sub(ANNUAL_WINDOW_MONTHS);
            monthly
                .into_iter()
                .skip(skip)
                .map(|((y, m), sum)| (month_label(y, m), format!("{:04}-{:02}", y, m), sum))
                .collect()
        }
    };

    let mut points = Vec::with_capacity(buckets.len() + 1);
    points.push(EquityPoint {
        label: START_LABEL.to_string(),
        bucket: None,
        balance: state.starting_balance,
    });
    let mut running = state.starting_balance;
    for (label, key, sum) in buckets {
        running += sum;
        points.push(EquityPoint {
            label,
            bucket: Some(key),
            balance: running,
        });
    }

    let peak = points
        .iter()
        .map(|p| p.balance)
        .max()
        .unwrap_or(state.starting_balance);
    let last = points.last().map(|p| p.balance).unwrap_or(peak);
    let drawdown = if peak > Decimal::ZERO {
        peak.checked_sub(last)
            .map_or(Decimal::MAX, |fall| percent(fall, peak))
    } else {
        Decimal::ZERO
    };
    debug!(%window, points = points.len(), %peak, %drawdown, "equity series built");

    EquitySeries {
        window,
        points,
        peak,
        drawdown,
    }
}

fn month_label(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d.format("%b '%y").to_string(),
        None => format!("{:04}-{:02}", year, month),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_labels_use_short_year() {
        assert_eq!(month_label(2024, 1), "Jan '24");
        assert_eq!(month_label(2025, 12), "Dec '25");
    }

    #[test]
    fn window_names_parse() {
        assert_eq!("recent".parse::<EquityWindow>().unwrap(), EquityWindow::Recent);
        assert_eq!("12M".parse::<EquityWindow>().unwrap(), EquityWindow::Annual);
        assert!("weekly".parse::<EquityWindow>().is_err());
    }
}
