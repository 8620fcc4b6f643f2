// Copyright (c) AlphaVelocity.
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

fn id_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).required(true).help(help)
}

fn status_arg(default: Option<&'static str>) -> Arg {
    let a = Arg::new("status")
        .long("status")
        .help("Status name or ALL");
    match default {
        Some(d) => a.default_value(d),
        None => a,
    }
}

pub fn build_cli() -> Command {
    Command::new("plotdesk")
        .about("Real-estate sales desk: plots, deals, commissions and lead SLAs")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .help("JSON dataset to load instead of the built-in sample data"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to config.toml"),
        )
        .arg(
            Arg::new("now")
                .long("now")
                .global(true)
                .help("Evaluate deadlines at this RFC 3339 instant"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output on stderr (-v debug, -vv trace)"),
        )
        .subcommand(
            Command::new("property")
                .about("Plots and inventory")
                .subcommand(json_args(
                    Command::new("list")
                        .about("Search plots")
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .action(ArgAction::Append)
                                .help("Keep plots in this status (repeatable)"),
                        )
                        .arg(Arg::new("price-min").long("price-min"))
                        .arg(Arg::new("price-max").long("price-max"))
                        .arg(Arg::new("area-min").long("area-min"))
                        .arg(Arg::new("area-max").long("area-max"))
                        .arg(Arg::new("project").long("project")),
                ))
                .subcommand(json_args(
                    Command::new("stats")
                        .about("Inventory counts and shares by status")
                        .arg(Arg::new("project").long("project")),
                ))
                .subcommand(
                    Command::new("show")
                        .about("Plot detail")
                        .arg(id_arg("id", "Property id")),
                ),
        )
        .subcommand(
            Command::new("project")
                .about("Projects")
                .subcommand(json_args(Command::new("list").about("List projects")))
                .subcommand(
                    Command::new("show")
                        .about("Project overview with inventory breakdown")
                        .arg(id_arg("id", "Project id")),
                ),
        )
        .subcommand(
            Command::new("deal")
                .about("Deal pipeline")
                .subcommand(json_args(
                    Command::new("pipeline").about("Deals grouped by stage"),
                ))
                .subcommand(json_args(Command::new("stats").about("Pipeline totals")))
                .subcommand(
                    Command::new("show")
                        .about("Deal detail")
                        .arg(id_arg("id", "Deal id")),
                ),
        )
        .subcommand(
            Command::new("commission")
                .about("Commission queue and reports")
                .subcommand(json_args(
                    Command::new("list")
                        .about("List commissions")
                        .arg(status_arg(Some("ALL"))),
                ))
                .subcommand(json_args(
                    Command::new("queue")
                        .about("Approval queue with pending/approved/paid totals")
                        .arg(status_arg(Some("PENDING"))),
                ))
                .subcommand(
                    Command::new("approve")
                        .about("Approve a pending commission")
                        .arg(id_arg("id", "Commission id")),
                )
                .subcommand(
                    Command::new("pay")
                        .about("Mark an approved commission as paid")
                        .arg(id_arg("id", "Commission id")),
                )
                .subcommand(
                    Command::new("reject")
                        .about("Reject a pending commission")
                        .arg(id_arg("id", "Commission id"))
                        .arg(
                            Arg::new("reason")
                                .long("reason")
                                .required(true)
                                .help("Deal value incorrect | Commission rate mismatch | Missing documentation | Other"),
                        )
                        .arg(Arg::new("notes").long("notes").default_value("")),
                )
                .subcommand(json_args(
                    Command::new("report")
                        .about("Totals by status and paid commission by agent")
                        .arg(Arg::new("agent").long("agent").help("Only this agent id")),
                )),
        )
        .subcommand(
            Command::new("lead")
                .about("Leads and SLA deadlines")
                .subcommand(json_args(
                    Command::new("list")
                        .about("Leads with live SLA classification")
                        .arg(status_arg(Some("ALL")))
                        .arg(Arg::new("agent").long("agent"))
                        .arg(
                            Arg::new("match")
                                .long("match")
                                .help("Regex on customer name (case-insensitive)"),
                        ),
                ))
                .subcommand(
                    Command::new("reassign")
                        .about("Hand a lead to another agent")
                        .arg(id_arg("id", "Lead id"))
                        .arg(
                            Arg::new("to")
                                .long("to")
                                .required(true)
                                .help("Agent id to take the lead"),
                        ),
                ),
        )
        .subcommand(
            Command::new("agent")
                .about("Agent performance")
                .subcommand(json_args(
                    Command::new("leaderboard").about("Won revenue by agent"),
                ))
                .subcommand(json_args(
                    Command::new("stats")
                        .about("Deal, commission and lead figures for one agent")
                        .arg(id_arg("id", "Agent id")),
                ))
                .subcommand(json_args(
                    Command::new("workload").about("Active leads against capacity"),
                )),
        )
        .subcommand(json_args(
            Command::new("exec").about("Executive summary against targets"),
        ))
        .subcommand(
            Command::new("reserve")
                .about("Hold an available plot for a customer")
                .arg(id_arg("id", "Property id"))
                .arg(
                    Arg::new("customer")
                        .long("customer")
                        .required(true)
                        .help("Customer id"),
                )
                .arg(
                    Arg::new("ticks")
                        .long("ticks")
                        .value_parser(value_parser!(u64))
                        .default_value("0")
                        .help("Simulate this many elapsed seconds"),
                )
                .arg(
                    Arg::new("watch")
                        .long("watch")
                        .value_parser(value_parser!(u64))
                        .help("Show the live countdown for this many seconds"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export CSV reports")
                .subcommand(
                    Command::new("commissions")
                        .about("Commission queue as CSV")
                        .arg(Arg::new("out").long("out").help("Output file")),
                )
                .subcommand(
                    Command::new("commission-report")
                        .about("Commission summary and per-agent totals as CSV")
                        .arg(Arg::new("out").long("out").help("Output file")),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Configuration")
                .subcommand(Command::new("show").about("Print effective settings"))
                .subcommand(Command::new("path").about("Print config file location")),
        )
}
