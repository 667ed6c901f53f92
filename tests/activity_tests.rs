// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use tradelog::activity::{HistoryKind, recent_activity, transaction_history};
use tradelog::calendar::{DayOutcome, calendar_month};
use tradelog::clock::{FixedClock, SequentialIds};
use tradelog::commands::reports::{activity_rows, calendar_grid};
use tradelog::models::{Direction, Entry, RecordTradeInput, TransferInput};
use tradelog::store::MemoryStore;
use tradelog::Ledger;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn setup() -> Ledger {
    let mut ledger = Ledger::open(
        MemoryStore::new(),
        FixedClock::on(d("2024-02-14")),
        SequentialIds::default(),
    )
    .unwrap();
    ledger
        .record_deposit(TransferInput {
            date: d("2024-02-01"),
            time: t("08:00"),
            broker: "Exness".into(),
            amount: dec("2000"),
            notes: None,
        })
        .unwrap();
    let trades = [
        ("2024-02-05", "10:00", Direction::Buy, "35"),
        ("2024-02-05", "14:30", Direction::Sell, "-50"),
        ("2024-02-14", "09:15", Direction::Buy, "12.40"),
        ("2024-02-20", "11:00", Direction::Sell, "0"),
    ];
    for (date, time, direction, pnl) in trades {
        ledger
            .record_trade(RecordTradeInput {
                date: d(date),
                time: t(time),
                pair: "EUR/USD".into(),
                direction,
                pnl: dec(pnl),
                trade_number: None,
                strategy: None,
                notes: None,
            })
            .unwrap();
    }
    ledger
        .record_withdrawal(TransferInput {
            date: d("2024-02-10"),
            time: t("16:00"),
            broker: "Exness".into(),
            amount: dec("100"),
            notes: Some("rent".into()),
        })
        .unwrap();
    ledger
}

#[test]
fn recent_activity_merges_and_limits() {
    let ledger = setup();
    let items = recent_activity(ledger.state(), 3);
    let kinds: Vec<&str> = items.iter().map(|a| a.kind()).collect();
    assert_eq!(kinds, vec!["TRADE", "TRADE", "WITHDRAWAL"]);
    assert_eq!(items[0].date(), d("2024-02-20"));

    let all = recent_activity(ledger.state(), 10);
    assert_eq!(all.len(), 6);
    assert_eq!(all.last().unwrap().kind(), "DEPOSIT");

    let rows = activity_rows(&all);
    assert_eq!(rows[2].amount, "-$100.00");
    assert_eq!(rows[2].status, "PROCESSED");
    assert_eq!(rows[3].description, "EUR/USD (SELL)");
    assert_eq!(rows[3].status, "LOSS");
    assert_eq!(rows[5].amount, "+$2000.00");
}

#[test]
fn transaction_history_skips_trades() {
    let ledger = setup();
    let items = transaction_history(ledger.state(), HistoryKind::All);
    let kinds: Vec<&str> = items.iter().map(|a| a.kind()).collect();
    assert_eq!(kinds, vec!["WITHDRAWAL", "DEPOSIT"]);
}

#[test]
fn transaction_history_filters_by_kind() {
    let ledger = setup();
    let deposits = transaction_history(ledger.state(), HistoryKind::Deposit);
    assert_eq!(deposits.len(), 1);
    assert_eq!(deposits[0].kind(), "DEPOSIT");

    let withdrawals = transaction_history(ledger.state(), "withdrawal".parse().unwrap());
    assert_eq!(withdrawals.len(), 1);
    assert_eq!(withdrawals[0].description(), "Exness");
    assert_eq!(withdrawals[0].signed_amount(), dec("-100"));

    assert!("trades".parse::<HistoryKind>().is_err());
}

#[test]
fn activity_serializes_with_type_tag() {
    let ledger = setup();
    let items = transaction_history(ledger.state(), HistoryKind::All);
    let v = serde_json::to_value(&items).unwrap();
    assert_eq!(v[0]["type"], "withdrawal");
    assert_eq!(v[0]["amount"], "100");
    assert_eq!(v[0]["balanceAfter"], "1897.40");
}

#[test]
fn calendar_marks_trading_days() {
    let ledger = setup();
    let cal = calendar_month(ledger.state(), 2024, 2, ledger.today()).unwrap();
    assert_eq!(cal.title(), "February 2024");
    assert_eq!(cal.days.len(), 29);
    // 2024-02-01 was a Thursday
    assert_eq!(cal.leading_blanks, 4);

    let day5 = &cal.days[4];
    assert_eq!(day5.trades, 2);
    assert_eq!(day5.pnl, dec("-15"));
    assert_eq!(day5.outcome, Some(DayOutcome::Loss));

    let day14 = &cal.days[13];
    assert!(day14.is_today);
    assert_eq!(day14.outcome, Some(DayOutcome::Profit));

    // a flat day with a trade still counts as profit
    assert_eq!(cal.days[19].outcome, Some(DayOutcome::Profit));
    assert_eq!(cal.days[0].outcome, None);
    assert_eq!(cal.net_pnl(), dec("-2.60"));

    let grid = calendar_grid(&cal);
    assert_eq!(grid.len(), 5);
    assert_eq!(grid[0][4], "1");
    assert_eq!(grid[1][1], "5 -$15");
    assert_eq!(grid[2][3], "14* +$12");
}

#[test]
fn calendar_rejects_bad_month() {
    let ledger = setup();
    assert!(calendar_month(ledger.state(), 2024, 13, ledger.today()).is_err());
}
