// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::LedgerError;
use crate::ledger::LedgerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOutcome {
    Profit,
    Loss,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub trades: usize,
    pub pnl: Decimal,
    /// `None` when nothing was traded that day.
    pub outcome: Option<DayOutcome>,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st in a Sunday-first week.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    pub fn title(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(d) => d.format("%B %Y").to_string(),
            None => format!("{:04}-{:02}", self.year, self.month),
        }
    }

    pub fn net_pnl(&self) -> Decimal {
        self.days.iter().map(|d| d.pnl).sum()
    }
}

/// Steps `delta` months from `(year, month)`, wrapping across years.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let idx = year * 12 + month as i32 - 1 + delta;
    (idx.div_euclid(12), idx.rem_euclid(12) as u32 + 1)
}

pub fn calendar_month(
    state: &LedgerState,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<CalendarMonth, LedgerError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| LedgerError::Validation(format!("invalid month {}-{}", year, month)))?;

    let mut days = Vec::with_capacity(31);
    let mut cursor = Some(first);
    while let Some(date) = cursor.filter(|d| d.month() == month) {
        let mut trades = 0;
        let mut pnl = Decimal::ZERO;
        for t in state.trades.iter().filter(|t| t.date == date) {
            trades += 1;
            pnl += t.pnl;
        }
        let outcome = match trades {
            0 => None,
            _ if pnl >= Decimal::ZERO => Some(DayOutcome::Profit),
            _ => Some(DayOutcome::Loss),
        };
        days.push(CalendarDay {
            date,
            trades,
            pnl,
            outcome,
            is_today: date == today,
        });
        cursor = date.succ_opt();
    }

    Ok(CalendarMonth {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}
