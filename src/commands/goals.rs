// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

use super::ignore_missing;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let goal = ledger.record_goal(sub.get_one::<String>("content").unwrap())?;
            println!("Goal {} saved for {}", goal.id, goal.date);
        }
        Some(("list", sub)) => {
            let goals = ledger.list_goals();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goals)? {
                if goals.is_empty() {
                    println!("No goals yet");
                    return Ok(());
                }
                let rows = goals
                    .iter()
                    .map(|g| vec![g.id.to_string(), g.date.to_string(), g.content.clone()])
                    .collect();
                println!("{}", pretty_table(&["ID", "Date", "Goal"], rows));
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<u64>("id").unwrap();
            if ignore_missing(ledger.delete_goal(id))?.is_some() {
                println!("Goal {} deleted", id);
            } else {
                println!("No goal with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}
