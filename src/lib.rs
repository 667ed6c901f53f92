// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod activity;
pub mod balance;
pub mod calendar;
pub mod cli;
pub mod clock;
pub mod commands;
pub mod db;
pub mod equity;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod sizing;
pub mod store;
pub mod utils;

pub use error::{LedgerError, Result};
pub use ledger::{Ledger, LedgerState};
