// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use anyhow::{Result, bail};

pub fn handle(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        bail!("This deletes ALL trades, deposits, withdrawals and goals. Re-run with --yes to confirm.");
    }
    ledger.clear_all()?;
    println!("All data cleared successfully");
    Ok(())
}
