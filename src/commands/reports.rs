// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::activity::{Activity, HistoryKind, recent_activity, transaction_history};
use crate::calendar::{CalendarMonth, DayOutcome, calendar_month, shift_month};
use crate::equity::EquityWindow;
use crate::ledger::Ledger;
use crate::models::Entry;
use crate::utils::{fmt_money, fmt_percent, fmt_signed, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balance", sub)) => balance(ledger, sub)?,
        Some(("stats", sub)) => stats(ledger, sub)?,
        Some(("equity", sub)) => equity(ledger, sub)?,
        Some(("activity", sub)) => activity(ledger, sub)?,
        Some(("history", sub)) => history(ledger, sub)?,
        Some(("calendar", sub)) => calendar(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn balance(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let s = ledger.derived_stats();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let rows = vec![
            vec!["Current balance".into(), fmt_money(&s.current_balance)],
            vec!["Starting balance".into(), fmt_money(&s.starting_balance)],
            vec!["Total deposits".into(), fmt_money(&s.total_deposits)],
            vec!["Total withdrawals".into(), fmt_money(&s.total_withdrawals)],
            vec![
                "Growth".into(),
                format!("{} ({})", fmt_signed(&s.growth), fmt_percent(&s.growth_percent)),
            ],
        ];
        println!("{}", pretty_table(&["", "Amount"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct StatsReport {
    #[serde(flatten)]
    totals: crate::balance::DerivedStats,
    periods: crate::balance::PeriodStats,
}

fn stats(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let report = StatsReport {
        totals: ledger.derived_stats(),
        periods: ledger.period_stats(),
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let (s, p) = (&report.totals, &report.periods);
    let rows = vec![
        vec![
            "Today".into(),
            fmt_signed(&p.today_pnl),
            format!("{}/{}", p.today_trades, p.daily_limit),
        ],
        vec![
            "Last 7 days".into(),
            fmt_signed(&p.weekly_pnl),
            format!("{} trades", p.weekly_trades),
        ],
        vec![
            "Last 30 days".into(),
            fmt_signed(&p.monthly_pnl),
            format!("{} trades", p.monthly_trades),
        ],
        vec![
            "All time".into(),
            fmt_signed(&s.total_pnl),
            format!("{} trades", s.total_trades),
        ],
        vec![
            "Wins / losses".into(),
            format!("{} / {}", s.winning_trades, s.losing_trades),
            format!("win rate {}", fmt_percent(&s.win_rate)),
        ],
        vec![
            "Profit / loss".into(),
            fmt_money(&s.total_profit),
            fmt_money(&s.total_loss),
        ],
        vec![
            "Buys / sells".into(),
            s.buys.to_string(),
            s.sells.to_string(),
        ],
    ];
    println!("{}", pretty_table(&["Period", "P&L", "Trades"], rows));
    Ok(())
}

fn equity(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let window: EquityWindow = sub.get_one::<String>("window").unwrap().parse()?;
    let series = ledger.equity_series(window);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        return Ok(());
    }
    let rows = series
        .points
        .iter()
        .map(|p| vec![p.label.clone(), fmt_money(&p.balance)])
        .collect();
    println!("{}", pretty_table(&["Period", "Balance"], rows));
    println!(
        "Peak: {}  Drawdown: {}",
        fmt_money(&series.peak),
        fmt_percent(&series.drawdown)
    );
    Ok(())
}

#[derive(Serialize)]
pub struct ActivityRow {
    pub id: u64,
    pub when: String,
    pub kind: String,
    pub description: String,
    pub amount: String,
    pub status: String,
}

pub fn activity_rows(items: &[Activity<'_>]) -> Vec<ActivityRow> {
    items
        .iter()
        .map(|a| ActivityRow {
            id: a.id(),
            when: format!("{} {}", a.date().format("%b %-d, %Y"), a.time().format("%H:%M")),
            kind: a.kind().to_string(),
            description: a.description(),
            amount: fmt_signed(&a.signed_amount()),
            status: a.status().to_string(),
        })
        .collect()
}

fn print_activity(items: &[Activity<'_>], sub: &clap::ArgMatches, empty: &str) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        return Ok(());
    }
    if items.is_empty() {
        println!("{}", empty);
        return Ok(());
    }
    let rows = activity_rows(items)
        .into_iter()
        .map(|r| vec![r.id.to_string(), r.when, r.kind, r.description, r.amount, r.status])
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "When", "Type", "Details", "Amount", "Status"], rows)
    );
    Ok(())
}

fn activity(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let limit = *sub.get_one::<usize>("limit").unwrap();
    let items = recent_activity(ledger.state(), limit);
    print_activity(&items, sub, "No activity recorded yet.")
}

fn history(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let kind: HistoryKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let items = transaction_history(ledger.state(), kind);
    print_activity(&items, sub, "No transactions yet")
}

fn calendar(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let today = ledger.today();
    let (year, month) = calendar_target(today, sub)?;
    let cal = calendar_month(ledger.state(), year, month, today)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cal)? {
        println!("{}", cal.title());
        println!("{}", pretty_table(&["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"], calendar_grid(&cal)));
        println!("Net: {}", fmt_signed(&cal.net_pnl()));
    }
    Ok(())
}

/// `--month` (default: the month of `today`) moved by `--offset` months.
pub fn calendar_target(today: NaiveDate, sub: &clap::ArgMatches) -> Result<(i32, u32)> {
    let (year, month) = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => (today.year(), today.month()),
    };
    let offset = sub.get_one::<i32>("offset").copied().unwrap_or(0);
    Ok(shift_month(year, month, offset))
}

/// Week rows of day cells, e.g. `12 +$40` or `13* -$15`; `*` marks today.
pub fn calendar_grid(cal: &CalendarMonth) -> Vec<Vec<String>> {
    let mut cells: Vec<String> = vec![String::new(); cal.leading_blanks as usize];
    for day in &cal.days {
        let mut cell = day.date.day().to_string();
        if day.is_today {
            cell.push('*');
        }
        match day.outcome {
            Some(DayOutcome::Profit) => cell.push_str(&format!(" +${:.0}", day.pnl.abs())),
            Some(DayOutcome::Loss) => cell.push_str(&format!(" -${:.0}", day.pnl.abs())),
            None => {}
        }
        cells.push(cell);
    }
    while cells.len() % 7 != 0 {
        cells.push(String::new());
    }
    cells.chunks(7).map(|w| w.to_vec()).collect()
}
