// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Result, bail};

use super::{ignore_missing, transfer_input};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => {
            let withdrawals = ledger.list_withdrawals();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &withdrawals)? {
                let rows = withdrawals
                    .iter()
                    .map(|w| {
                        vec![
                            w.id.to_string(),
                            format!("{} {}", w.date, w.time.format("%H:%M")),
                            w.broker.clone(),
                            fmt_money(&w.amount),
                            fmt_money(&w.balance_before),
                            fmt_money(&w.balance_after),
                            w.notes.clone().unwrap_or_else(|| "-".into()),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["ID", "When", "Broker", "Amount", "Before", "After", "Notes"],
                        rows
                    )
                );
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<u64>("id").unwrap();
            if ignore_missing(ledger.delete_withdrawal(id))?.is_some() {
                println!(
                    "Withdrawal {} deleted. Balance: {}",
                    id,
                    fmt_money(&ledger.current_balance())
                );
            } else {
                println!("No withdrawal with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let input = transfer_input(ledger, sub)?;
    match ledger.record_withdrawal(input) {
        Ok(w) => {
            println!(
                "Withdrawal of {} processed. Balance: {}",
                fmt_money(&w.amount),
                fmt_money(&w.balance_after)
            );
            Ok(())
        }
        Err(LedgerError::InsufficientBalance { available, .. }) => {
            bail!("Insufficient balance! Available: {}", fmt_money(&available))
        }
        Err(e) => Err(e.into()),
    }
}
