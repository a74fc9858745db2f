// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
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
            .help("Print one JSON object per line"),
    )
}

fn required(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).required(true).help(help)
}

fn optional(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn index_arg() -> Arg {
    Arg::new("index")
        .long("index")
        .required(true)
        .value_parser(value_parser!(usize))
        .help("Zero-based row position")
}

pub fn build_cli() -> Command {
    Command::new("budgetbuddy")
        .about("Track income, expenses, saving goals and a transaction register")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("profile")
                .about("User profile")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(required("name", "Display name"))
                        .arg(optional("money-used", "Amount of money used so far")),
                )
                .subcommand(Command::new("clear")),
        )
        .subcommand(
            Command::new("income")
                .about("Income sources")
                .subcommand(
                    Command::new("add")
                        .arg(required("source", "Where the money comes from"))
                        .arg(required("amount", "Amount"))
                        .arg(required("date", "YYYY-MM-DD"))
                        .arg(
                            Arg::new("after")
                                .long("after")
                                .value_parser(value_parser!(usize))
                                .help("Insert after this row instead of at the end"),
                        ),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("rm").arg(index_arg()))
                .subcommand(
                    Command::new("set")
                        .arg(index_arg())
                        .arg(optional("source", "New source"))
                        .arg(optional("amount", "New amount"))
                        .arg(optional("date", "New date")),
                ),
        )
        .subcommand(
            Command::new("expense")
                .about("Fixed and discretionary expenses")
                .subcommand(
                    Command::new("add")
                        .arg(required("category", "Housing, Food, Transportation, ..."))
                        .arg(required("amount", "Amount"))
                        .arg(required("date", "YYYY-MM-DD"))
                        .arg(
                            Arg::new("fixed")
                                .long("fixed")
                                .action(ArgAction::SetTrue)
                                .help("Recurring fixed expense"),
                        )
                        .arg(
                            Arg::new("after")
                                .long("after")
                                .value_parser(value_parser!(usize))
                                .help("Insert after this row instead of at the end"),
                        ),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(
                            Arg::new("fixed")
                                .long("fixed")
                                .action(ArgAction::SetTrue)
                                .help("Only fixed expenses"),
                        )
                        .arg(
                            Arg::new("discretionary")
                                .long("discretionary")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("fixed")
                                .help("Only discretionary expenses"),
                        ),
                ))
                .subcommand(Command::new("rm").arg(index_arg()))
                .subcommand(
                    Command::new("set")
                        .arg(index_arg())
                        .arg(optional("category", "New category"))
                        .arg(optional("amount", "New amount"))
                        .arg(optional("date", "New date"))
                        .arg(
                            Arg::new("fixed")
                                .long("fixed")
                                .action(ArgAction::SetTrue)
                                .help("Mark as a fixed expense"),
                        )
                        .arg(
                            Arg::new("discretionary")
                                .long("discretionary")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("fixed")
                                .help("Mark as a discretionary expense"),
                        ),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Transaction register")
                .subcommand(
                    Command::new("add")
                        .arg(required("date", "YYYY-MM-DD"))
                        .arg(required("account", "Account name"))
                        .arg(required("category", "Category name"))
                        .arg(required("payee", "Payee or income source"))
                        .arg(required("amount", "Amount, up to two decimals"))
                        .arg(
                            Arg::new("income")
                                .long("income")
                                .action(ArgAction::SetTrue)
                                .help("Money coming in (stored as a deposit)"),
                        ),
                )
                .subcommand(json_args(Command::new("list").arg(
                    Arg::new("limit").long("limit").value_parser(value_parser!(usize)),
                )))
                .subcommand(Command::new("rm").arg(required("id", "Transaction id")))
                .subcommand(Command::new("payees").about("Payees seen so far"))
                .subcommand(
                    Command::new("set")
                        .arg(required("id", "Transaction id"))
                        .arg(optional("date", "New date"))
                        .arg(optional("account", "New account"))
                        .arg(optional("category", "New category"))
                        .arg(optional("payee", "New payee"))
                        .arg(optional("amount", "New amount text"))
                        .arg(
                            Arg::new("draft")
                                .long("draft")
                                .action(ArgAction::SetTrue)
                                .help("Keep the amount as typed without committing it"),
                        ),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Transaction categories")
                .subcommand(Command::new("add").arg(required("name", "Category name")))
                .subcommand(Command::new("list")),
        )
        .subcommand(
            Command::new("account")
                .about("Accounts used by transactions")
                .subcommand(Command::new("add").arg(required("name", "Account name")))
                .subcommand(Command::new("list")),
        )
        .subcommand(
            Command::new("goal")
                .about("Saving goals")
                .subcommand(
                    Command::new("add")
                        .arg(required("name", "Goal name"))
                        .arg(required("target", "Target amount"))
                        .arg(optional("saved", "Already saved"))
                        .arg(optional("deadline", "YYYY-MM-DD")),
                )
                .subcommand(
                    Command::new("fund")
                        .allow_negative_numbers(true)
                        .arg(required("name", "Goal name"))
                        .arg(required("amount", "Amount to add (negative withdraws)")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("rm").arg(required("name", "Goal name"))),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries")
                .subcommand(json_args(Command::new("overview")))
                .subcommand(json_args(
                    Command::new("by-category").arg(
                        Arg::new("source")
                            .long("source")
                            .value_parser(["expenses", "transactions"])
                            .default_value("expenses"),
                    ),
                ))
                .subcommand(json_args(Command::new("balance"))),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .arg(required("format", "csv|json"))
                        .arg(required("out", "Output file")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for problems"))
}
