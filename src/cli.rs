// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

fn output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn when_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("date")
            .long("date")
            .help("YYYY-MM-DD (default: today)"),
    )
    .arg(Arg::new("time").long("time").help("HH:MM (default: now)"))
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(u64))
}

fn transfer_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .subcommand(
            when_args(Command::new("add"))
                .arg(Arg::new("broker").long("broker").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(output_flags(Command::new("list")))
        .subcommand(Command::new("rm").arg(id_arg()))
}

pub fn build_cli() -> Command {
    Command::new("tradelog")
        .about("Trading journal: trades, deposits, withdrawals and equity")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("SQLite file (default: platform data dir, or $TRADELOG_DB)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count),
        )
        .subcommand(Command::new("init").about("Create the data file"))
        .subcommand(
            Command::new("trade")
                .about("Record and review trades")
                .subcommand(
                    when_args(Command::new("add"))
                        .arg(Arg::new("pair").long("pair").required(true))
                        .arg(
                            Arg::new("direction")
                                .long("direction")
                                .required(true)
                                .value_parser(["buy", "sell"]),
                        )
                        .arg(
                            Arg::new("pnl")
                                .long("pnl")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(
                            Arg::new("number")
                                .long("number")
                                .value_parser(value_parser!(u8)),
                        )
                        .arg(Arg::new("strategy").long("strategy"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(output_flags(
                    Command::new("list")
                        .arg(Arg::new("date").long("date"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(transfer_command(
            "deposit",
            "Set the starting balance (replaces any previous deposit and resets the period)",
        ))
        .subcommand(transfer_command("withdraw", "Record withdrawals"))
        .subcommand(
            Command::new("goal")
                .about("Dated trading goals")
                .subcommand(Command::new("add").arg(Arg::new("content").required(true)))
                .subcommand(output_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("report")
                .about("Balances, statistics and charts")
                .subcommand(output_flags(Command::new("balance")))
                .subcommand(output_flags(Command::new("stats")))
                .subcommand(output_flags(
                    Command::new("equity").arg(
                        Arg::new("window")
                            .long("window")
                            .default_value("recent")
                            .value_parser(["recent", "annual"]),
                    ),
                ))
                .subcommand(output_flags(
                    Command::new("activity").arg(
                        Arg::new("limit")
                            .long("limit")
                            .default_value("10")
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(output_flags(
                    Command::new("history").arg(
                        Arg::new("kind")
                            .long("kind")
                            .default_value("all")
                            .value_parser(["all", "deposit", "withdrawal"]),
                    ),
                ))
                .subcommand(output_flags(
                    Command::new("calendar")
                        .arg(Arg::new("month").long("month").help("YYYY-MM (default: this month)"))
                        .arg(
                            Arg::new("offset")
                                .long("offset")
                                .allow_hyphen_values(true)
                                .value_parser(value_parser!(i32))
                                .help("Months to move from --month, e.g. -1 for the previous one"),
                        ),
                )),
        )
        .subcommand(output_flags(
            Command::new("calc")
                .about("Position size from risk and stop loss")
                .arg(Arg::new("risk").long("risk").required(true).help("Risk percent"))
                .arg(
                    Arg::new("stop-loss")
                        .long("stop-loss")
                        .required(true)
                        .help("Stop loss in pips"),
                )
                .arg(
                    Arg::new("balance")
                        .long("balance")
                        .help("Account balance (default: current balance)"),
                ),
        ))
        .subcommand(
            Command::new("clear")
                .about("Delete all trades, deposits, withdrawals and goals")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm"),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
