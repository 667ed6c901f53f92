// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

use super::{ignore_missing, transfer_input};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let input = transfer_input(ledger, sub)?;
            let d = ledger.record_deposit(input)?;
            println!(
                "Starting balance set to {} (was {}). Trades and withdrawals reset.",
                fmt_money(&d.balance_after),
                fmt_money(&d.balance_before)
            );
        }
        Some(("list", sub)) => {
            let deposits = ledger.list_deposits();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &deposits)? {
                let rows = deposits
                    .iter()
                    .map(|d| {
                        vec![
                            d.id.to_string(),
                            format!("{} {}", d.date, d.time.format("%H:%M")),
                            d.broker.clone(),
                            fmt_money(&d.amount),
                            fmt_money(&d.balance_before),
                            fmt_money(&d.balance_after),
                            d.notes.clone().unwrap_or_else(|| "-".into()),
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
            match ignore_missing(ledger.delete_deposit(id))? {
                Some(_) if ledger.state().deposits.is_empty() => {
                    println!("Deposit {} deleted. All data reset.", id)
                }
                Some(_) => println!("Deposit {} deleted", id),
                None => println!("No deposit with id {}", id),
            }
        }
        _ => {}
    }
    Ok(())
}
