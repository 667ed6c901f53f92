// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;

use tradelog::clock::{SystemClock, TimestampIds};
use tradelog::{Ledger, cli, commands, db, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    logging::init(matches.get_count("verbose"));

    let path = match matches.get_one::<PathBuf>("db") {
        Some(p) => p.clone(),
        None => db::db_path()?,
    };
    let store = db::open_or_init(&path)?;
    let mut ledger = Ledger::open(store, SystemClock, TimestampIds::default())?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("trade", sub)) => commands::trades::handle(&mut ledger, sub)?,
        Some(("deposit", sub)) => commands::deposits::handle(&mut ledger, sub)?,
        Some(("withdraw", sub)) => commands::withdrawals::handle(&mut ledger, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut ledger, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ledger, sub)?,
        Some(("calc", sub)) => commands::calc::handle(&ledger, sub)?,
        Some(("clear", sub)) => commands::clear::handle(&mut ledger, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&ledger)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
