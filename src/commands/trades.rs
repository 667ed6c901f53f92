// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{DAILY_TRADE_LIMIT, Ledger};
use crate::models::{Direction, RecordTradeInput};
use crate::utils::{fmt_money, fmt_signed, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;

use super::{ignore_missing, when_from};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn input_from(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<RecordTradeInput> {
    let (date, time) = when_from(ledger, sub)?;
    let direction: Direction = sub.get_one::<String>("direction").unwrap().parse()?;
    let pnl = parse_decimal(sub.get_one::<String>("pnl").unwrap()).context("P&L must be a number")?;
    Ok(RecordTradeInput {
        date,
        time,
        pair: sub.get_one::<String>("pair").unwrap().to_string(),
        direction,
        pnl,
        trade_number: sub.get_one::<u8>("number").copied(),
        strategy: sub.get_one::<String>("strategy").cloned(),
        notes: sub.get_one::<String>("notes").cloned(),
    })
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let input = input_from(ledger, sub)?;
    let trade = ledger.record_trade(input)?;
    let used = ledger.state().trades_on(trade.date);
    println!(
        "Trade #{} saved ({} {} {}) P&L {} [{}/{} today]. Balance: {}",
        trade.id,
        trade.pair,
        trade.direction,
        trade.date,
        fmt_signed(&trade.pnl),
        used,
        DAILY_TRADE_LIMIT,
        fmt_money(&ledger.current_balance())
    );
    Ok(())
}

fn rm(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<u64>("id").unwrap();
    if ignore_missing(ledger.delete_trade(id))?.is_some() {
        println!("Trade {} deleted. Balance: {}", id, fmt_money(&ledger.current_balance()));
    } else {
        println!("No trade with id {}", id);
    }
    Ok(())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    format!("{} {}", r.date, r.time),
                    r.number.to_string(),
                    r.pair.clone(),
                    r.direction.to_uppercase(),
                    r.strategy.clone(),
                    r.pnl.clone(),
                    r.result.clone(),
                    r.notes.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "When", "#", "Pair", "Side", "Strategy", "P&L", "Result", "Notes"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TradeRow {
    pub id: u64,
    pub date: String,
    pub time: String,
    pub number: u8,
    pub pair: String,
    pub direction: String,
    pub strategy: String,
    pub pnl: String,
    pub result: String,
    pub notes: String,
}

pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<TradeRow>> {
    let on = match sub.get_one::<String>("date") {
        Some(d) => Some(parse_date(d)?),
        None => None,
    };
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    let data = ledger
        .list_trades()
        .into_iter()
        .filter(|t| on.is_none_or(|d| t.date == d))
        .take(limit)
        .map(|t| TradeRow {
            id: t.id,
            date: t.date.to_string(),
            time: t.time.format("%H:%M").to_string(),
            number: t.trade_number,
            pair: t.pair.clone(),
            direction: t.direction.to_string(),
            strategy: t.strategy.clone(),
            pnl: format!("{:.2}", t.pnl),
            result: if t.pnl >= rust_decimal::Decimal::ZERO { "WIN" } else { "LOSS" }.to_string(),
            notes: t.notes.clone().unwrap_or_default(),
        })
        .collect();
    Ok(data)
}
