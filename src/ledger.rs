// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger store: one explicit state object plus the mutations that keep it
//! consistent.
//!
//! Every mutation validates first, then updates the in-memory state, then writes
//! the touched keys to the backing [`KeyValueStore`]. A failed write is reported
//! to the caller but the in-memory state is not rolled back.
//!
//! Nothing derived is cached. Balances and equity series are recomputed from the
//! records on every read.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::balance::{self, DerivedStats, PeriodStats};
use crate::clock::{Clock, IdGenerator};
use crate::equity::{self, EquitySeries, EquityWindow};
use crate::error::{LedgerError, Result};
use crate::models::{
    Deposit, Goal, RecordId, RecordTradeInput, Trade, TransferInput, Withdrawal, newest_first,
};
use crate::store::KeyValueStore;

pub const DAILY_TRADE_LIMIT: usize = 4;
pub const DEFAULT_STRATEGY: &str = "Manual";
/// Amounts and P&L are whole cents.
pub const MONEY_SCALE: u32 = 2;
/// Largest magnitude accepted for a single amount or P&L.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

pub const TRADES_KEY: &str = "trades";
pub const GOALS_KEY: &str = "goals";
pub const DEPOSITS_KEY: &str = "deposits";
pub const WITHDRAWALS_KEY: &str = "withdrawals";
pub const STARTING_BALANCE_KEY: &str = "startingBalance";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    pub starting_balance: Decimal,
    pub trades: Vec<Trade>,
    pub deposits: Vec<Deposit>,
    pub withdrawals: Vec<Withdrawal>,
    pub goals: Vec<Goal>,
}

impl LedgerState {
    pub fn trades_on(&self, date: NaiveDate) -> usize {
        self.trades.iter().filter(|t| t.date == date).count()
    }

    pub fn max_id(&self) -> Option<RecordId> {
        let trades = self.trades.iter().map(|t| t.id);
        let deposits = self.deposits.iter().map(|d| d.id);
        let withdrawals = self.withdrawals.iter().map(|w| w.id);
        let goals = self.goals.iter().map(|g| g.id);
        trades.chain(deposits).chain(withdrawals).chain(goals).max()
    }
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Trades,
    Deposits,
    Withdrawals,
    StartingBalance,
    Goals,
}

const ALL_SLOTS: [Slot; 4] = [
    Slot::StartingBalance,
    Slot::Deposits,
    Slot::Trades,
    Slot::Withdrawals,
];

pub struct Ledger {
    state: LedgerState,
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl Ledger {
    /// Loads whatever the store holds and wires up the collaborators.
    pub fn open<S, C, G>(store: S, clock: C, ids: G) -> Result<Self>
    where
        S: KeyValueStore + 'static,
        C: Clock + 'static,
        G: IdGenerator + 'static,
    {
        let state = load_state(&store)?;
        let mut ids: Box<dyn IdGenerator> = Box::new(ids);
        if let Some(max) = state.max_id() {
            ids.observe(max);
        }
        debug!(
            trades = state.trades.len(),
            deposits = state.deposits.len(),
            withdrawals = state.withdrawals.len(),
            starting_balance = %state.starting_balance,
            "ledger loaded"
        );
        Ok(Self {
            state,
            store: Box::new(store),
            clock: Box::new(clock),
            ids,
        })
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn starting_balance(&self) -> Decimal {
        self.state.starting_balance
    }

    pub fn current_balance(&self) -> Decimal {
        balance::current_balance(&self.state)
    }

    pub fn derived_stats(&self) -> DerivedStats {
        balance::derived_stats(&self.state)
    }

    pub fn period_stats(&self) -> PeriodStats {
        balance::period_stats(&self.state, self.today())
    }

    pub fn equity_series(&self, window: EquityWindow) -> EquitySeries {
        equity::build_equity_series(&self.state, window, self.today())
    }

    pub fn list_trades(&self) -> Vec<&Trade> {
        newest_first(&self.state.trades)
    }

    pub fn list_deposits(&self) -> Vec<&Deposit> {
        newest_first(&self.state.deposits)
    }

    pub fn list_withdrawals(&self) -> Vec<&Withdrawal> {
        newest_first(&self.state.withdrawals)
    }

    /// Newest date first; later goals first within a day.
    pub fn list_goals(&self) -> Vec<&Goal> {
        let mut out: Vec<&Goal> = self.state.goals.iter().collect();
        out.sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));
        out
    }

    pub fn record_goal(&mut self, content: &str) -> Result<Goal> {
        let content = required("goal", content)?;
        let goal = Goal {
            id: self.ids.next_id(),
            date: self.today(),
            content,
        };
        self.state.goals.insert(0, goal.clone());
        self.persist(&[Slot::Goals])?;
        info!(id = goal.id, date = %goal.date, "goal recorded");
        Ok(goal)
    }

    pub fn delete_goal(&mut self, id: RecordId) -> Result<Goal> {
        let pos = self
            .state
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or(LedgerError::NotFound { kind: "goal", id })?;
        let removed = self.state.goals.remove(pos);
        self.persist(&[Slot::Goals])?;
        info!(id, "goal deleted");
        Ok(removed)
    }

    pub fn record_trade(&mut self, input: RecordTradeInput) -> Result<Trade> {
        let pair = required("pair", &input.pair)?;
        money("pnl", input.pnl)?;
        let existing = self.state.trades_on(input.date);
        if existing >= DAILY_TRADE_LIMIT {
            warn!(date = %input.date, existing, "daily trade limit reached");
            return Err(LedgerError::DailyLimitExceeded {
                date: input.date,
                limit: DAILY_TRADE_LIMIT,
            });
        }
        let trade_number = input.trade_number.unwrap_or(existing as u8 + 1);
        if trade_number == 0 || usize::from(trade_number) > DAILY_TRADE_LIMIT {
            return Err(LedgerError::Validation(format!(
                "trade number must be between 1 and {}, got {}",
                DAILY_TRADE_LIMIT, trade_number
            )));
        }

        let trade = Trade {
            id: self.ids.next_id(),
            date: input.date,
            time: input.time,
            trade_number,
            pair,
            direction: input.direction,
            strategy: optional_text(input.strategy)
                .unwrap_or_else(|| DEFAULT_STRATEGY.to_string()),
            pnl: input.pnl,
            notes: optional_text(input.notes),
        };
        self.state.trades.insert(0, trade.clone());
        self.persist(&[Slot::Trades])?;
        info!(id = trade.id, date = %trade.date, pair = %trade.pair, pnl = %trade.pnl, "trade recorded");
        Ok(trade)
    }

    pub fn delete_trade(&mut self, id: RecordId) -> Result<Trade> {
        let pos = self
            .state
            .trades
            .iter()
            .position(|t| t.id == id)
            .ok_or(LedgerError::NotFound { kind: "trade", id })?;
        let removed = self.state.trades.remove(pos);
        self.persist(&[Slot::Trades])?;
        info!(id, "trade deleted");
        Ok(removed)
    }

    /// Starts a new tracking period: the deposit amount becomes the starting
    /// balance and every earlier trade, withdrawal and deposit is dropped.
    pub fn record_deposit(&mut self, input: TransferInput) -> Result<Deposit> {
        let broker = required("broker", &input.broker)?;
        positive("deposit amount", input.amount)?;
        money("deposit amount", input.amount)?;

        let deposit = Deposit {
            id: self.ids.next_id(),
            date: input.date,
            time: input.time,
            broker,
            amount: input.amount,
            notes: optional_text(input.notes),
            balance_before: self.state.starting_balance,
            balance_after: input.amount,
        };
        self.state.starting_balance = input.amount;
        self.state.deposits = vec![deposit.clone()];
        self.state.trades.clear();
        self.state.withdrawals.clear();
        self.persist(&ALL_SLOTS)?;
        info!(id = deposit.id, amount = %deposit.amount, "deposit recorded, tracking period reset");
        Ok(deposit)
    }

    /// Removing the last deposit wipes the period it started.
    pub fn delete_deposit(&mut self, id: RecordId) -> Result<Deposit> {
        let pos = self
            .state
            .deposits
            .iter()
            .position(|d| d.id == id)
            .ok_or(LedgerError::NotFound { kind: "deposit", id })?;
        let removed = self.state.deposits.remove(pos);
        if self.state.deposits.is_empty() {
            self.state.starting_balance = Decimal::ZERO;
            self.state.trades.clear();
            self.state.withdrawals.clear();
            self.persist(&ALL_SLOTS)?;
            info!(id, "last deposit deleted, ledger reset");
        } else {
            self.persist(&[Slot::Deposits])?;
            info!(id, "deposit deleted");
        }
        Ok(removed)
    }

    pub fn record_withdrawal(&mut self, input: TransferInput) -> Result<Withdrawal> {
        let broker = required("broker", &input.broker)?;
        positive("withdrawal amount", input.amount)?;
        money("withdrawal amount", input.amount)?;

        let available = self.current_balance();
        if input.amount > available {
            warn!(requested = %input.amount, %available, "withdrawal rejected");
            return Err(LedgerError::InsufficientBalance {
                requested: input.amount,
                available,
            });
        }

        let withdrawal = Withdrawal {
            id: self.ids.next_id(),
            date: input.date,
            time: input.time,
            broker,
            amount: input.amount,
            notes: optional_text(input.notes),
            balance_before: available,
            balance_after: available - input.amount,
        };
        self.state.withdrawals.push(withdrawal.clone());
        self.persist(&[Slot::Withdrawals])?;
        info!(id = withdrawal.id, amount = %withdrawal.amount, "withdrawal recorded");
        Ok(withdrawal)
    }

    pub fn delete_withdrawal(&mut self, id: RecordId) -> Result<Withdrawal> {
        let pos = self
            .state
            .withdrawals
            .iter()
            .position(|w| w.id == id)
            .ok_or(LedgerError::NotFound {
                kind: "withdrawal",
                id,
            })?;
        let removed = self.state.withdrawals.remove(pos);
        self.persist(&[Slot::Withdrawals])?;
        info!(id, "withdrawal deleted");
        Ok(removed)
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.state = LedgerState::default();
        self.persist(&ALL_SLOTS)?;
        self.persist(&[Slot::Goals])?;
        info!("ledger cleared");
        Ok(())
    }

    fn persist(&mut self, slots: &[Slot]) -> Result<()> {
        for slot in slots {
            let (key, value) = match slot {
                Slot::Trades => (TRADES_KEY, serde_json::to_string(&self.state.trades)?),
                Slot::Deposits => (DEPOSITS_KEY, serde_json::to_string(&self.state.deposits)?),
                Slot::Withdrawals => (
                    WITHDRAWALS_KEY,
                    serde_json::to_string(&self.state.withdrawals)?,
                ),
                Slot::StartingBalance => {
                    (STARTING_BALANCE_KEY, self.state.starting_balance.to_string())
                }
                Slot::Goals => (GOALS_KEY, serde_json::to_string(&self.state.goals)?),
            };
            self.store.set(key, &value)?;
        }
        Ok(())
    }
}

fn load_state(store: &dyn KeyValueStore) -> Result<LedgerState> {
    Ok(LedgerState {
        starting_balance: load_starting_balance(store)?,
        trades: load_list(store, TRADES_KEY)?,
        deposits: load_list(store, DEPOSITS_KEY)?,
        withdrawals: load_list(store, WITHDRAWALS_KEY)?,
        goals: load_list(store, GOALS_KEY)?,
    })
}

fn load_list<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Vec<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(e) => {
            warn!(key, error = %e, "stored list is unreadable, starting empty");
            Ok(Vec::new())
        }
    }
}

fn load_starting_balance(store: &dyn KeyValueStore) -> Result<Decimal> {
    let Some(raw) = store.get(STARTING_BALANCE_KEY)? else {
        return Ok(Decimal::ZERO);
    };
    match raw.trim().parse::<Decimal>() {
        Ok(d) => Ok(d),
        Err(e) => {
            warn!(value = %raw, error = %e, "stored starting balance is unreadable, using 0");
            Ok(Decimal::ZERO)
        }
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(LedgerError::Validation(format!("{} is required", field)));
    }
    Ok(v.to_string())
}

fn positive(field: &str, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "{} must be greater than 0, got {}",
            field, amount
        )));
    }
    Ok(())
}

fn money(field: &str, amount: Decimal) -> Result<()> {
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(LedgerError::Validation(format!(
            "{} must be in whole cents, got {}",
            field, amount
        )));
    }
    if amount.abs() > Decimal::from(MAX_AMOUNT_UNITS) {
        return Err(LedgerError::Validation(format!(
            "{} is out of range, got {}",
            field, amount
        )));
    }
    Ok(())
}

fn optional_text(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
