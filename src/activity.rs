// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::LedgerError;
use crate::ledger::LedgerState;
use crate::models::{Deposit, Entry, RecordId, Trade, Withdrawal};

pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// One row of the combined activity feed.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Activity<'a> {
    Trade(&'a Trade),
    Deposit(&'a Deposit),
    Withdrawal(&'a Withdrawal),
}

impl Activity<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Trade(_) => "TRADE",
            Self::Deposit(_) => "DEPOSIT",
            Self::Withdrawal(_) => "WITHDRAWAL",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::Trade(t) => format!("{} ({})", t.pair, t.direction.as_str().to_uppercase()),
            Self::Deposit(d) => d.broker.clone(),
            Self::Withdrawal(w) => w.broker.clone(),
        }
    }

    /// Effect on the account as shown to the user; withdrawals are negative.
    pub fn signed_amount(&self) -> Decimal {
        match self {
            Self::Trade(t) => t.pnl,
            Self::Deposit(d) => d.amount,
            Self::Withdrawal(w) => -w.amount,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Trade(t) if t.pnl >= Decimal::ZERO => "WIN",
            Self::Trade(_) => "LOSS",
            Self::Deposit(_) => "COMPLETED",
            Self::Withdrawal(_) => "PROCESSED",
        }
    }
}

impl Entry for Activity<'_> {
    fn id(&self) -> RecordId {
        match self {
            Self::Trade(t) => t.id,
            Self::Deposit(d) => d.id,
            Self::Withdrawal(w) => w.id,
        }
    }

    fn date(&self) -> NaiveDate {
        match self {
            Self::Trade(t) => t.date,
            Self::Deposit(d) => d.date,
            Self::Withdrawal(w) => w.date,
        }
    }

    fn time(&self) -> NaiveTime {
        match self {
            Self::Trade(t) => t.time,
            Self::Deposit(d) => d.time,
            Self::Withdrawal(w) => w.time,
        }
    }
}

fn newest_first(mut items: Vec<Activity<'_>>) -> Vec<Activity<'_>> {
    items.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
    items
}

pub fn recent_activity(state: &LedgerState, limit: usize) -> Vec<Activity<'_>> {
    let all = state
        .trades
        .iter()
        .map(Activity::Trade)
        .chain(state.deposits.iter().map(Activity::Deposit))
        .chain(state.withdrawals.iter().map(Activity::Withdrawal))
        .collect();
    let mut out = newest_first(all);
    out.truncate(limit);
    out
}

/// Which transfers `transaction_history` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryKind {
    #[default]
    All,
    Deposit,
    Withdrawal,
}

impl FromStr for HistoryKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "deposit" | "deposits" => Ok(Self::Deposit),
            "withdrawal" | "withdrawals" => Ok(Self::Withdrawal),
            other => Err(LedgerError::Validation(format!(
                "unknown history kind '{}' (use all|deposit|withdrawal)",
                other
            ))),
        }
    }
}

/// Deposits and withdrawals only, newest first.
pub fn transaction_history(state: &LedgerState, kind: HistoryKind) -> Vec<Activity<'_>> {
    let deposits: &[Deposit] = match kind {
        HistoryKind::All | HistoryKind::Deposit => state.deposits.as_slice(),
        HistoryKind::Withdrawal => &[],
    };
    let withdrawals: &[Withdrawal] = match kind {
        HistoryKind::All | HistoryKind::Withdrawal => state.withdrawals.as_slice(),
        HistoryKind::Deposit => &[],
    };
    let all = deposits
        .iter()
        .map(Activity::Deposit)
        .chain(withdrawals.iter().map(Activity::Withdrawal))
        .collect();
    newest_first(all)
}
