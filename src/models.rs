// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

pub type RecordId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(LedgerError::Validation(format!(
                "direction must be 'buy' or 'sell', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: RecordId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub trade_number: u8,
    pub pair: String,
    pub direction: Direction,
    pub strategy: String,
    pub pnl: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub id: RecordId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub broker: String,
    pub amount: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
    pub balance_before: Decimal,
    pub balance_after: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub id: RecordId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub broker: String,
    pub amount: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
    pub balance_before: Decimal,
    pub balance_after: Decimal,
}

/// A dated free-text trading goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: RecordId,
    pub date: NaiveDate,
    pub content: String,
}

/// Anything placed on the ledger timeline.
pub trait Entry {
    fn id(&self) -> RecordId;
    fn date(&self) -> NaiveDate;
    fn time(&self) -> NaiveTime;

    /// Chronological key; the id breaks same-minute ties in creation order.
    fn sort_key(&self) -> (NaiveDate, NaiveTime, RecordId) {
        (self.date(), self.time(), self.id())
    }
}

macro_rules! impl_entry {
    ($($t:ty),*) => {
        $(impl Entry for $t {
            fn id(&self) -> RecordId {
                self.id
            }
            fn date(&self) -> NaiveDate {
                self.date
            }
            fn time(&self) -> NaiveTime {
                self.time
            }
        })*
    };
}

impl_entry!(Trade, Deposit, Withdrawal);

/// Sorts newest first: `(date, time)` descending, later insertions ahead on ties.
pub fn newest_first<T: Entry>(items: &[T]) -> Vec<&T> {
    let mut out: Vec<&T> = items.iter().collect();
    out.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
    out
}

#[derive(Debug, Clone)]
pub struct RecordTradeInput {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub pair: String,
    pub direction: Direction,
    pub pnl: Decimal,
    pub trade_number: Option<u8>,
    pub strategy: Option<String>,
    pub notes: Option<String>,
}

/// Input shared by deposits and withdrawals.
#[derive(Debug, Clone)]
pub struct TransferInput {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub broker: String,
    pub amount: Decimal,
    pub notes: Option<String>,
}
