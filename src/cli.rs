// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::DEFAULT_API_URL;
use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
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

fn cashbook_arg() -> Arg {
    Arg::new("cashbook")
        .long("cashbook")
        .help("Cashbook name in the active business (defaults to its first cashbook)")
}

fn remote_cashbook_arg() -> Arg {
    Arg::new("cashbook")
        .long("cashbook")
        .required(true)
        .help("Remote cashbook id")
}

fn remote_business_arg() -> Arg {
    Arg::new("business")
        .long("business")
        .required(true)
        .help("Remote business id")
}

fn tx_input_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
        .arg(Arg::new("type").long("type").help("income|expense"))
        .arg(
            Arg::new("mode")
                .long("mode")
                .help("cash|bank|upi|credit_card|debit_card"),
        )
        .arg(Arg::new("amount").long("amount").allow_hyphen_values(true))
        .arg(Arg::new("party").long("party").help("Customer or supplier"))
        .arg(Arg::new("category").long("category"))
        .arg(Arg::new("note").long("note"))
}

fn export_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("format")
            .long("format")
            .default_value("csv")
            .help("csv|html|json"),
    )
    .arg(
        Arg::new("out")
            .long("out")
            .help("Output path (defaults to cashbook-report.<format>)"),
    )
    .arg(
        Arg::new("title")
            .long("title")
            .default_value(crate::export::REPORT_TITLE),
    )
}

pub fn build_cli() -> Command {
    Command::new("cashbook")
        .about("Multi-business cashbook: income/expense ledger with CSV and printable reports")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("CASHBOOK_DB")
                .value_parser(value_parser!(std::path::PathBuf))
                .help("SQLite database path (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("api_url")
                .long("api-url")
                .global(true)
                .env("CASHBOOK_API_URL")
                .default_value(DEFAULT_API_URL),
        )
        .arg(
            Arg::new("log_level")
                .long("log-level")
                .global(true)
                .default_value("warn")
                .value_parser(["off", "error", "warn", "info", "debug", "trace"]),
        )
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("business")
                .about("Businesses")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("tax_id").long("tax-id").help("GSTIN or other tax id"))
                        .arg(Arg::new("address").long("address")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("use")
                        .about("Switch the active business")
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("cashbook")
                .about("Cashbooks of the active business")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("mode").long("mode").default_value("cash"))
                        .arg(
                            Arg::new("opening")
                                .long("opening")
                                .default_value("0")
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("category")
                .about("Categories of the active business")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("type").long("type").default_value("expense")),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("staff")
                .about("Staff of the active business")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("role").long("role").default_value("staff"))
                        .arg(Arg::new("phone").long("phone")),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(tx_input_args(Command::new("add").arg(cashbook_arg())))
                .subcommand(json_flags(
                    Command::new("list").arg(cashbook_arg()).arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(json_flags(
                    Command::new("passbook")
                        .about("Bank entries only")
                        .arg(cashbook_arg()),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Balances")
                .subcommand(json_flags(Command::new("summary").arg(cashbook_arg())))
                .subcommand(json_flags(Command::new("modes").arg(cashbook_arg()))),
        )
        .subcommand(
            Command::new("export")
                .about("Write reports to a file")
                .subcommand(export_args(Command::new("transactions").arg(cashbook_arg()))),
        )
        .subcommand(
            Command::new("remote")
                .about("Work against the hosted cashbook API")
                .subcommand(
                    Command::new("login")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(
                    Command::new("register")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(Command::new("logout"))
                .subcommand(Command::new("whoami"))
                .subcommand(
                    Command::new("business")
                        .subcommand(
                            Command::new("add")
                                .arg(Arg::new("name").long("name").required(true))
                                .arg(Arg::new("tax_id").long("tax-id"))
                                .arg(Arg::new("address").long("address")),
                        )
                        .subcommand(json_flags(Command::new("list"))),
                )
                .subcommand(
                    Command::new("cashbook")
                        .subcommand(
                            Command::new("add")
                                .arg(remote_business_arg())
                                .arg(Arg::new("name").long("name").required(true))
                                .arg(Arg::new("mode").long("mode").default_value("cash"))
                                .arg(
                                    Arg::new("opening")
                                        .long("opening")
                                        .default_value("0")
                                        .allow_hyphen_values(true),
                                ),
                        )
                        .subcommand(json_flags(
                            Command::new("list").arg(remote_business_arg()),
                        )),
                )
                .subcommand(
                    Command::new("category")
                        .subcommand(
                            Command::new("add")
                                .arg(remote_business_arg())
                                .arg(Arg::new("name").long("name").required(true))
                                .arg(Arg::new("type").long("type").default_value("income")),
                        )
                        .subcommand(json_flags(
                            Command::new("list").arg(remote_business_arg()),
                        )),
                )
                .subcommand(
                    Command::new("staff")
                        .subcommand(
                            Command::new("add")
                                .about("Invite a registered account")
                                .arg(remote_business_arg())
                                .arg(Arg::new("email").long("email").required(true))
                                .arg(Arg::new("role").long("role").default_value("staff")),
                        )
                        .subcommand(json_flags(
                            Command::new("list").arg(remote_business_arg()),
                        )),
                )
                .subcommand(
                    Command::new("tx")
                        .subcommand(tx_input_args(
                            Command::new("add").arg(remote_cashbook_arg()),
                        ))
                        .subcommand(json_flags(
                            Command::new("list").arg(remote_cashbook_arg()).arg(
                                Arg::new("business")
                                    .long("business")
                                    .help("Remote business id, used to show category names"),
                            ),
                        )),
                )
                .subcommand(json_flags(
                    Command::new("summary")
                        .arg(remote_business_arg())
                        .arg(remote_cashbook_arg()),
                ))
                .subcommand(export_args(
                    Command::new("export").arg(remote_cashbook_arg()),
                )),
        )
}
