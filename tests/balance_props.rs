// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Days, NaiveDate, NaiveTime};
use proptest::prelude::*;
use rust_decimal::Decimal;
use tradelog::clock::{FixedClock, SequentialIds};
use tradelog::equity::EquityWindow;
use tradelog::ledger::DAILY_TRADE_LIMIT;
use tradelog::models::{Direction, RecordTradeInput, TransferInput};
use tradelog::store::MemoryStore;
use tradelog::{Ledger, LedgerError};

#[derive(Debug, Clone)]
enum Op {
    Trade { days_ago: u64, pnl: Decimal },
    Withdraw { days_ago: u64, amount: Decimal },
    Deposit { amount: Decimal },
    DeleteTrade(usize),
    DeleteWithdrawal(usize),
}

fn cents(lo: i64, hi: i64) -> impl Strategy<Value = Decimal> {
    (lo..hi).prop_map(|n| Decimal::new(n, 2))
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u64..10, cents(-50_000, 50_000)).prop_map(|(days_ago, pnl)| Op::Trade { days_ago, pnl }),
        2 => (0u64..10, cents(1, 100_000)).prop_map(|(days_ago, amount)| Op::Withdraw { days_ago, amount }),
        1 => cents(1, 500_000).prop_map(|amount| Op::Deposit { amount }),
        1 => (0usize..8).prop_map(Op::DeleteTrade),
        1 => (0usize..4).prop_map(Op::DeleteWithdrawal),
    ]
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 20).unwrap()
}

fn apply(ledger: &mut Ledger, op: &Op) -> Result<(), LedgerError> {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    match op {
        Op::Trade { days_ago, pnl } => {
            let date = today() - Days::new(*days_ago);
            ledger
                .record_trade(RecordTradeInput {
                    date,
                    time: noon,
                    pair: "EUR/USD".into(),
                    direction: Direction::Buy,
                    pnl: *pnl,
                    trade_number: None,
                    strategy: None,
                    notes: None,
                })
                .map(|_| ())
        }
        Op::Withdraw { days_ago, amount } => {
            let before = ledger.current_balance();
            let res = ledger.record_withdrawal(TransferInput {
                date: today() - Days::new(*days_ago),
                time: noon,
                broker: "Exness".into(),
                amount: *amount,
                notes: None,
            });
            if let Ok(w) = &res {
                assert!(w.amount <= before);
                assert_eq!(w.balance_after, before - w.amount);
            }
            res.map(|_| ())
        }
        Op::Deposit { amount } => ledger
            .record_deposit(TransferInput {
                date: today() - Days::new(9),
                time: NaiveTime::MIN,
                broker: "Exness".into(),
                amount: *amount,
                notes: None,
            })
            .map(|_| ()),
        Op::DeleteTrade(i) => match ledger.state().trades.get(*i).map(|t| t.id) {
            Some(id) => ledger.delete_trade(id).map(|_| ()),
            None => Ok(()),
        },
        Op::DeleteWithdrawal(i) => match ledger.state().withdrawals.get(*i).map(|w| w.id) {
            Some(id) => ledger.delete_withdrawal(id).map(|_| ()),
            None => Ok(()),
        },
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn balance_always_rederives(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut ledger = Ledger::open(
            MemoryStore::new(),
            FixedClock::on(today()),
            SequentialIds::default(),
        )
        .unwrap();

        for op in &ops {
            let before = ledger.state().clone();
            match apply(&mut ledger, op) {
                Ok(()) => {}
                Err(LedgerError::DailyLimitExceeded { .. })
                | Err(LedgerError::InsufficientBalance { .. }) => {
                    prop_assert_eq!(ledger.state(), &before);
                }
                Err(e) => prop_assert!(false, "unexpected error {e}"),
            }

            let s = ledger.state();
            let pnl: Decimal = s.trades.iter().map(|t| t.pnl).sum();
            let out: Decimal = s.withdrawals.iter().map(|w| w.amount).sum();
            prop_assert_eq!(ledger.current_balance(), s.starting_balance + pnl - out);
            prop_assert!(s.deposits.len() <= 1);

            for t in &s.trades {
                prop_assert!(s.trades_on(t.date) <= DAILY_TRADE_LIMIT);
            }

            // every event sits inside the recent window, so the curve ends at the balance
            let series = ledger.equity_series(EquityWindow::Recent);
            prop_assert_eq!(series.points[0].balance, s.starting_balance);
            prop_assert_eq!(series.last_balance(), ledger.current_balance());
            prop_assert!(series.peak >= series.last_balance());
        }
    }
}
