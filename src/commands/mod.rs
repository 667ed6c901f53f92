// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod trades;
pub mod deposits;
pub mod withdrawals;
pub mod goals;
pub mod reports;
pub mod calc;
pub mod clear;
pub mod doctor;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::models::TransferInput;
use crate::utils::{parse_date, parse_decimal, parse_time};

/// `--date`/`--time`, falling back to the ledger clock.
pub(crate) fn when_from(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<(NaiveDate, NaiveTime)> {
    let now = ledger.clock().now();
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => now.date(),
    };
    let time = match sub.get_one::<String>("time") {
        Some(t) => parse_time(t)?,
        None => NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(NaiveTime::MIN),
    };
    Ok((date, time))
}

pub(crate) fn transfer_input(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<TransferInput> {
    let (date, time) = when_from(ledger, sub)?;
    Ok(TransferInput {
        date,
        time,
        broker: sub.get_one::<String>("broker").unwrap().to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        notes: sub.get_one::<String>("notes").cloned(),
    })
}

/// Deleting something that is already gone is not an error at the shell.
pub(crate) fn ignore_missing<T>(r: Result<T, LedgerError>) -> Result<Option<T>, LedgerError> {
    match r {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
