// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::sizing::position_size;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let risk = parse_decimal(sub.get_one::<String>("risk").unwrap())?;
    let stop = parse_decimal(sub.get_one::<String>("stop-loss").unwrap())?;
    let balance = match sub.get_one::<String>("balance") {
        Some(b) => parse_decimal(b)?,
        None => ledger.current_balance(),
    };
    let sized = position_size(balance, risk, stop)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &sized)? {
        let rows = vec![
            vec!["Balance".into(), fmt_money(&sized.balance)],
            vec!["Risk".into(), format!("{}%", sized.risk_percent)],
            vec!["Stop loss".into(), format!("{} pips", sized.stop_loss_pips)],
            vec!["Risk amount".into(), fmt_money(&sized.risk_amount)],
            vec!["Position size".into(), format!("{:.2} lots", sized.position_size)],
        ];
        println!("{}", pretty_table(&["", ""], rows));
    }
    Ok(())
}
