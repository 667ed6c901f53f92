// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Balance and summary figures derived from a [`LedgerState`].
//!
//! Deposits never enter the running sum; the deposit already set the starting
//! balance.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::ledger::{DAILY_TRADE_LIMIT, LedgerState};
use crate::models::{Direction, Trade};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

pub fn current_balance(state: &LedgerState) -> Decimal {
    state.starting_balance + total_pnl(&state.trades) - total_withdrawals(state)
}

pub fn total_pnl(trades: &[Trade]) -> Decimal {
    trades.iter().map(|t| t.pnl).sum()
}

pub fn total_withdrawals(state: &LedgerState) -> Decimal {
    state.withdrawals.iter().map(|w| w.amount).sum()
}

pub fn total_deposits(state: &LedgerState) -> Decimal {
    state.deposits.iter().map(|d| d.amount).sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub starting_balance: Decimal,
    pub current_balance: Decimal,
    pub total_pnl: Decimal,
    pub total_profit: Decimal,
    pub total_loss: Decimal,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percent, 0 when there are no trades.
    pub win_rate: Decimal,
    pub buys: usize,
    pub sells: usize,
    pub total_deposits: Decimal,
    pub total_withdrawals: Decimal,
    pub growth: Decimal,
    pub growth_percent: Decimal,
}

pub fn derived_stats(state: &LedgerState) -> DerivedStats {
    let trades = &state.trades;
    let total_profit: Decimal = trades
        .iter()
        .map(|t| t.pnl)
        .filter(|p| *p > Decimal::ZERO)
        .sum();
    let total_loss: Decimal = trades
        .iter()
        .map(|t| t.pnl)
        .filter(|p| *p < Decimal::ZERO)
        .sum::<Decimal>()
        .abs();
    let winning_trades = trades.iter().filter(|t| t.pnl > Decimal::ZERO).count();
    let losing_trades = trades.iter().filter(|t| t.pnl < Decimal::ZERO).count();
    let win_rate = percent_of(winning_trades, trades.len());

    let current = current_balance(state);
    let growth = current - state.starting_balance;
    let growth_percent = if state.starting_balance > Decimal::ZERO {
        percent(growth, state.starting_balance)
    } else {
        Decimal::ZERO
    };

    DerivedStats {
        starting_balance: state.starting_balance,
        current_balance: current,
        total_pnl: total_pnl(trades),
        total_profit,
        total_loss,
        total_trades: trades.len(),
        winning_trades,
        losing_trades,
        win_rate,
        buys: trades.iter().filter(|t| t.direction == Direction::Buy).count(),
        sells: trades.iter().filter(|t| t.direction == Direction::Sell).count(),
        total_deposits: total_deposits(state),
        total_withdrawals: total_withdrawals(state),
        growth,
        growth_percent,
    }
}

fn percent_of(part: usize, whole: usize) -> Decimal {
    percent(Decimal::from(part), Decimal::from(whole))
}

/// `part / whole * 100`. Zero when `whole` is zero; saturates at
/// `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
pub fn percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|q| q.checked_mul(HUNDRED))
        .unwrap_or(if part.is_sign_negative() == whole.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        })
}

/// Trade activity over the dashboard's today / week / month windows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    pub today: NaiveDate,
    pub today_pnl: Decimal,
    pub today_trades: usize,
    pub daily_limit: usize,
    pub weekly_pnl: Decimal,
    pub weekly_trades: usize,
    pub monthly_pnl: Decimal,
    pub monthly_trades: usize,
}

impl PeriodStats {
    pub fn remaining_today(&self) -> usize {
        self.daily_limit.saturating_sub(self.today_trades)
    }
}

pub fn period_stats(state: &LedgerState, today: NaiveDate) -> PeriodStats {
    let since = |days: i64| {
        let from = today - Duration::days(days);
        let picked: Vec<&Trade> = state.trades.iter().filter(|t| t.date >= from).collect();
        (picked.iter().map(|t| t.pnl).sum::<Decimal>(), picked.len())
    };
    let todays: Vec<&Trade> = state.trades.iter().filter(|t| t.date == today).collect();
    let (weekly_pnl, weekly_trades) = since(7);
    let (monthly_pnl, monthly_trades) = since(30);

    PeriodStats {
        today,
        today_pnl: todays.iter().map(|t| t.pnl).sum(),
        today_trades: todays.len(),
        daily_limit: DAILY_TRADE_LIMIT,
        weekly_pnl,
        weekly_trades,
        monthly_pnl,
        monthly_trades,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_nothing_is_zero() {
        assert_eq!(percent_of(0, 0), Decimal::ZERO);
        assert_eq!(percent_of(1, 4), Decimal::new(25, 0));
    }

    #[test]
    fn percent_saturates_on_overflow() {
        let tiny = Decimal::new(1, 28);
        assert_eq!(percent(Decimal::MAX, tiny), Decimal::MAX);
        assert_eq!(percent(-Decimal::MAX, tiny), Decimal::MIN);
        assert_eq!(percent(Decimal::ONE, Decimal::ZERO), Decimal::ZERO);
    }
}
