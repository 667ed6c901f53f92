// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{DAILY_TRADE_LIMIT, Ledger, LedgerState};
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

pub fn handle(ledger: &Ledger) -> Result<()> {
    let rows = audit(ledger.state());
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// `[issue, detail]` rows for every stored record that breaks a ledger rule.
pub fn audit(state: &LedgerState) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Ids must be unique across all record kinds
    let mut seen = HashSet::new();
    let ids = state
        .trades
        .iter()
        .map(|t| t.id)
        .chain(state.deposits.iter().map(|d| d.id))
        .chain(state.withdrawals.iter().map(|w| w.id))
        .chain(state.goals.iter().map(|g| g.id));
    for id in ids {
        if !seen.insert(id) {
            rows.push(vec!["duplicate_id".into(), id.to_string()]);
        }
    }

    // 2) Single deposit, and it defines the starting balance
    if state.deposits.len() > 1 {
        rows.push(vec![
            "multiple_deposits".into(),
            state.deposits.len().to_string(),
        ]);
    }
    match state.deposits.as_slice() {
        [only] if only.amount != state.starting_balance => rows.push(vec![
            "starting_balance_mismatch".into(),
            format!("deposit {} vs starting {}", only.amount, state.starting_balance),
        ]),
        [] if !state.starting_balance.is_zero() => rows.push(vec![
            "starting_balance_without_deposit".into(),
            state.starting_balance.to_string(),
        ]),
        _ => {}
    }

    // 3) Daily cap and trade numbering
    let mut per_day: BTreeMap<_, usize> = BTreeMap::new();
    let mut numbers = HashSet::new();
    for t in &state.trades {
        *per_day.entry(t.date).or_default() += 1;
        if !numbers.insert((t.date, t.trade_number)) {
            rows.push(vec![
                "duplicate_trade_number".into(),
                format!("{} has #{} more than once", t.date, t.trade_number),
            ]);
        }
        if t.trade_number == 0 || usize::from(t.trade_number) > DAILY_TRADE_LIMIT {
            rows.push(vec![
                "trade_number_out_of_range".into(),
                format!("trade {} has #{}", t.id, t.trade_number),
            ]);
        }
    }
    for (date, n) in per_day {
        if n > DAILY_TRADE_LIMIT {
            rows.push(vec!["daily_limit_exceeded".into(), format!("{} has {} trades", date, n)]);
        }
    }

    // 4) Stored amounts are magnitudes
    for d in &state.deposits {
        if d.amount <= Decimal::ZERO {
            rows.push(vec!["non_positive_deposit".into(), format!("{} {}", d.id, d.amount)]);
        }
    }
    for w in &state.withdrawals {
        if w.amount <= Decimal::ZERO {
            rows.push(vec!["non_positive_withdrawal".into(), format!("{} {}", w.id, w.amount)]);
        }
    }

    rows
}
