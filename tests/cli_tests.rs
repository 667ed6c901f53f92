// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use tradelog::clock::{FixedClock, SequentialIds};
use tradelog::commands::{clear, deposits, goals, reports, trades, withdrawals};
use tradelog::models::Direction;
use tradelog::store::MemoryStore;
use tradelog::{Ledger, cli};

fn setup() -> Ledger {
    let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    Ledger::open(MemoryStore::new(), FixedClock::on(today), SequentialIds::default()).unwrap()
}

fn run(ledger: &mut Ledger, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["tradelog"];
    argv.extend_from_slice(args);
    let m = cli::build_cli().try_get_matches_from(argv)?;
    match m.subcommand() {
        Some(("trade", sub)) => trades::handle(ledger, sub),
        Some(("deposit", sub)) => deposits::handle(ledger, sub),
        Some(("withdraw", sub)) => withdrawals::handle(ledger, sub),
        Some(("goal", sub)) => goals::handle(ledger, sub),
        Some(("clear", sub)) => clear::handle(ledger, sub),
        other => panic!("unexpected subcommand {:?}", other.map(|(n, _)| n)),
    }
}

fn trade_add_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["tradelog", "trade", "add"];
    argv.extend_from_slice(args);
    let m = cli::build_cli().get_matches_from(argv);
    let (_, trade) = m.subcommand().unwrap();
    let (_, add) = trade.subcommand().unwrap();
    add.clone()
}

#[test]
fn trade_add_parses_negative_pnl_and_defaults_to_clock() {
    let ledger = setup();
    let sub = trade_add_matches(&["--pair", "EUR/USD", "--direction", "sell", "--pnl", "-12.5"]);
    let input = trades::input_from(&ledger, &sub).unwrap();
    assert_eq!(input.direction, Direction::Sell);
    assert_eq!(input.pnl, Decimal::new(-125, 1));
    assert_eq!(input.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    assert_eq!(input.time, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    assert_eq!(input.trade_number, None);
    assert_eq!(input.strategy, None);

    let sub = trade_add_matches(&[
        "--pair", "GBP/USD", "--direction", "buy", "--pnl", "3", "--date", "2024-02-28",
        "--time", "07:45", "--number", "2", "--strategy", "Breakout",
    ]);
    let input = trades::input_from(&ledger, &sub).unwrap();
    assert_eq!(input.date, NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
    assert_eq!(input.time, NaiveTime::from_hms_opt(7, 45, 0).unwrap());
    assert_eq!(input.trade_number, Some(2));
    assert_eq!(input.strategy.as_deref(), Some("Breakout"));
}

#[test]
fn bad_arguments_are_rejected_by_the_parser() {
    let cmd = cli::build_cli();
    let bad = [
        vec!["tradelog", "trade", "add", "--pair", "X", "--direction", "long", "--pnl", "1"],
        vec!["tradelog", "report", "equity", "--window", "weekly"],
        vec!["tradelog", "calc", "--stop-loss", "20"],
        vec!["tradelog", "deposit", "rm", "--id", "abc"],
    ];
    for argv in bad {
        assert!(cmd.clone().try_get_matches_from(argv).is_err());
    }
}

#[test]
fn trade_list_filters_by_date_and_limit() {
    let mut ledger = setup();
    for (date, time) in [
        ("2024-02-27", "09:00"),
        ("2024-02-28", "09:00"),
        ("2024-02-28", "13:00"),
        ("2024-02-28", "16:00"),
    ] {
        run(
            &mut ledger,
            &["trade", "add", "--pair", "EUR/USD", "--direction", "buy", "--pnl", "1.5", "--date",
              date, "--time", time],
        )
        .unwrap();
    }

    let m = cli::build_cli().get_matches_from(["tradelog", "trade", "list", "--date", "2024-02-28", "--limit", "2"]);
    let (_, trade) = m.subcommand().unwrap();
    let (_, list) = trade.subcommand().unwrap();
    let rows = trades::query_rows(&ledger, list).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].time, "16:00");
    assert_eq!(rows[0].number, 3);
    assert_eq!(rows[0].pnl, "1.50");
    assert_eq!(rows[0].result, "WIN");
    assert_eq!(rows[1].time, "13:00");
}

#[test]
fn overdraft_surfaces_as_command_error() {
    let mut ledger = setup();
    run(&mut ledger, &["deposit", "add", "--broker", "Exness", "--amount", "50"]).unwrap();
    let err = run(&mut ledger, &["withdraw", "add", "--broker", "Exness", "--amount", "80"])
        .unwrap_err();
    assert!(err.to_string().contains("$50.00"));
    assert!(ledger.state().withdrawals.is_empty());
}

#[test]
fn removing_unknown_ids_succeeds() {
    let mut ledger = setup();
    run(&mut ledger, &["trade", "rm", "--id", "77"]).unwrap();
    run(&mut ledger, &["deposit", "rm", "--id", "77"]).unwrap();
    run(&mut ledger, &["withdraw", "rm", "--id", "77"]).unwrap();
}

#[test]
fn clear_requires_confirmation() {
    let mut ledger = setup();
    run(&mut ledger, &["deposit", "add", "--broker", "Exness", "--amount", "50"]).unwrap();
    assert!(run(&mut ledger, &["clear"]).is_err());
    assert_eq!(ledger.current_balance(), Decimal::new(50, 0));

    run(&mut ledger, &["clear", "--yes"]).unwrap();
    assert!(ledger.current_balance().is_zero());
    assert!(ledger.state().deposits.is_empty());
}

#[test]
fn calendar_offset_moves_across_years() {
    let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let cases: [(&[&str], (i32, u32)); 4] = [
        (&[], (2024, 1)),
        (&["--offset", "-1"], (2023, 12)),
        (&["--month", "2024-11", "--offset", "2"], (2025, 1)),
        (&["--month", "2024-03"], (2024, 3)),
    ];
    for (args, expected) in cases {
        let mut argv = vec!["tradelog", "report", "calendar"];
        argv.extend_from_slice(args);
        let m = cli::build_cli().get_matches_from(argv);
        let (_, report) = m.subcommand().unwrap();
        let (_, cal) = report.subcommand().unwrap();
        assert_eq!(reports::calendar_target(today, cal).unwrap(), expected);
    }
}

#[test]
fn goal_commands_add_and_remove() {
    let mut ledger = setup();
    run(&mut ledger, &["goal", "add", "Trade only London session"]).unwrap();
    let id = ledger.list_goals()[0].id.to_string();
    assert_eq!(ledger.list_goals()[0].content, "Trade only London session");

    run(&mut ledger, &["goal", "rm", "--id", id.as_str()]).unwrap();
    assert!(ledger.list_goals().is_empty());
    run(&mut ledger, &["goal", "rm", "--id", "5"]).unwrap();
}

#[test]
fn history_kind_is_checked_by_the_parser() {
    let cmd = cli::build_cli();
    assert!(cmd
        .clone()
        .try_get_matches_from(["tradelog", "report", "history", "--kind", "deposit"])
        .is_ok());
    assert!(cmd
        .try_get_matches_from(["tradelog", "report", "history", "--kind", "trade"])
        .is_err());
}
