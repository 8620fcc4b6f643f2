// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use plotdesk::cli;
use plotdesk::commands::{agents, deals, executive, leads, projects, properties};
use plotdesk::config::Settings;
use plotdesk::desk::Desk;
use plotdesk::error::PlotdeskError;
use plotdesk::fixtures::{dataset, reference_now};
use plotdesk::metrics::{SlaThresholds, agent_workloads};
use plotdesk::utils::{fmt_vnd, initials};
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

fn desk() -> Desk {
    Desk::new(dataset().clone(), Settings::default(), reference_now())
}

fn m(millions: u64) -> Decimal {
    Decimal::from(millions) * Decimal::from(1_000_000u64)
}

/// Parses `args` and returns the matches of the innermost subcommand.
fn leaf(args: &[&str]) -> clap::ArgMatches {
    let mut matches = cli::build_cli().get_matches_from(args.iter().copied());
    while let Some((_, sub)) = matches.subcommand() {
        let next = sub.clone();
        matches = next;
    }
    matches
}

#[test]
fn property_list_filters_by_status_and_price() {
    let sub = leaf(&[
        "plotdesk",
        "property",
        "list",
        "--status",
        "available",
        "--price-max",
        "3000000000",
    ]);
    let rows = properties::query_rows(&desk(), &sub).unwrap();
    let plots: Vec<&str> = rows.iter().map(|r| r.plot.as_str()).collect();
    assert_eq!(plots, vec!["A-001", "A-005"]);
    assert!(rows.iter().all(|r| r.status == "AVAILABLE"));
    assert_eq!(rows[0].project, "Sunrise City");
}

#[test]
fn property_list_accepts_several_statuses() {
    let sub = leaf(&[
        "plotdesk",
        "property",
        "list",
        "--status",
        "reserved",
        "--status",
        "deposit-paid",
    ]);
    let rows = properties::query_rows(&desk(), &sub).unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a002", "a003", "b003"]);
}

#[test]
fn property_list_rejects_bad_bounds() {
    let sub = leaf(&["plotdesk", "property", "list", "--area-min", "big"]);
    let err = properties::query_rows(&desk(), &sub).unwrap_err();
    assert!(err.to_string().contains("Invalid decimal"));
}

#[test]
fn lead_list_classifies_at_desk_clock() {
    let sub = leaf(&["plotdesk", "lead", "list", "--match", "^nguyen"]);
    let rows = leads::query_rows(&desk(), &sub).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "lead-1");
    assert_eq!(rows[0].sla, "WARNING");
    assert_eq!(rows[0].sla_text, "2h left");
    assert_eq!(rows[0].agent, "Luis Phan");

    let sub = leaf(&["plotdesk", "lead", "list", "--status", "lost"]);
    let rows = leads::query_rows(&desk(), &sub).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].sla, "OVERDUE");

    let sub = leaf(&["plotdesk", "lead", "list", "--agent", "agent-2"]);
    let ids: Vec<String> = leads::query_rows(&desk(), &sub)
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["lead-2", "lead-5"]);
}

#[test]
fn lead_list_rejects_bad_pattern() {
    let sub = leaf(&["plotdesk", "lead", "list", "--match", "(unclosed"]);
    let err = leads::query_rows(&desk(), &sub).unwrap_err();
    assert!(err.to_string().contains("Invalid --match pattern"));
}

#[test]
fn desk_open_honours_now_and_config() {
    let cfg = NamedTempFile::new().unwrap();
    let cfg_path = cfg.path().to_str().unwrap();
    let matches = cli::build_cli().get_matches_from([
        "plotdesk",
        "--config",
        cfg_path,
        "--now",
        "2025-12-15T12:00:00Z",
        "lead",
        "list",
    ]);
    let desk = Desk::open(&matches).unwrap();
    assert_eq!(desk.settings, Settings::default());

    let sub = leaf(&["plotdesk", "lead", "list", "--match", "^nguyen"]);
    let rows = leads::query_rows(&desk, &sub).unwrap();
    assert_eq!(rows[0].sla, "OVERDUE");
    assert_eq!(rows[0].sla_text, "1h overdue");
}

#[test]
fn desk_open_defaults_to_reference_clock_for_fixtures() {
    let cfg = NamedTempFile::new().unwrap();
    let matches = cli::build_cli().get_matches_from([
        "plotdesk",
        "--config",
        cfg.path().to_str().unwrap(),
        "deal",
        "stats",
    ]);
    let desk = Desk::open(&matches).unwrap();
    assert_eq!(desk.now, reference_now());
    assert_eq!(desk.data.deals.len(), 9);
}

#[test]
fn pipeline_columns_keep_stage_order() {
    let cols = deals::columns(&desk());
    let stages: Vec<&str> = cols.iter().map(|c| c.stage.as_str()).collect();
    assert_eq!(
        stages,
        vec!["NEW", "QUALIFIED", "PROPOSAL", "NEGOTIATION", "WON", "LOST"]
    );
    let won = &cols[4];
    assert_eq!(won.count, 4);
    assert_eq!(won.value, m(15_200));
    assert_eq!(won.deals, vec!["deal-5", "deal-6", "deal-7", "deal-9"]);
}

#[test]
fn project_overview_uses_declared_size() {
    let desk = desk();
    let sunrise = desk.data.project("sunrise").unwrap();
    let o = projects::overview(&desk, sunrise);
    assert_eq!(o.available_pct, 49);
    assert_eq!(o.reserved, 2);
    assert_eq!(o.deposit_paid, 1);
    assert_eq!(o.sold, 1);
    assert_eq!(o.reserved_pct, 0);
}

#[test]
fn leaderboard_ranks_won_revenue() {
    let board = agents::rank_agents(&dataset().deals);
    let names: Vec<(usize, &str)> = board.iter().map(|e| (e.rank, e.name.as_str())).collect();
    assert_eq!(
        names,
        vec![(1, "Luis Phan"), (2, "John Doe"), (3, "Jane Smith")]
    );
    assert_eq!(board[0].deals, 2);
    assert_eq!(board[0].revenue, m(6_400));
}

#[test]
fn executive_summary_uses_configured_targets() {
    let mut desk = desk();
    desk.settings.targets.revenue = m(30_400);
    desk.settings.targets.deals = 8;
    let s = executive::summary(&desk);
    assert_eq!(s.progress.revenue_pct, 50);
    assert_eq!(s.progress.deals_pct, 50);
    assert_eq!(s.projects.len(), 3);
    assert_eq!(s.leaderboard.len(), 3);
}

#[test]
fn money_and_initials_formatting() {
    assert_eq!(fmt_vnd(&m(4_000)), "4.0B VND");
    assert_eq!(fmt_vnd(&m(2_450)), "2.5B VND");
    assert_eq!(fmt_vnd(&m(750)), "750M VND");
    assert_eq!(initials("Luis Phan"), "LP");
    assert_eq!(initials("jane"), "J");
}

#[test]
fn reassign_hands_lead_to_new_agent() {
    let ds = dataset();
    let updated = leads::reassign(&ds.leads, "lead-1", "agent-2", "John Doe").unwrap();
    let lead = updated.iter().find(|l| l.id == "lead-1").unwrap();
    assert_eq!(lead.assigned_to, "agent-2");
    assert_eq!(lead.assigned_to_name.as_deref(), Some("John Doe"));
    assert_eq!(updated.len(), ds.leads.len());
    // source collection untouched
    assert_eq!(ds.lead("lead-1").unwrap().assigned_to, "agent-1");

    let loads = agent_workloads(&updated, 25, reference_now(), SlaThresholds::default());
    let slots: Vec<(&str, usize, usize)> = loads
        .iter()
        .map(|w| (w.agent_id.as_str(), w.active_leads, w.available))
        .collect();
    assert_eq!(
        slots,
        vec![("agent-2", 3, 22), ("agent-1", 1, 24), ("agent-3", 1, 24)]
    );

    assert_eq!(
        leads::reassign(&ds.leads, "lead-99", "agent-2", "John Doe").unwrap_err(),
        PlotdeskError::NotFound {
            kind: "Lead",
            id: "lead-99".into()
        }
    );
}

#[test]
fn reassign_command_checks_lead_and_agent() {
    let desk = desk();
    let run = |args: &[&str]| {
        let matches = cli::build_cli().get_matches_from(args.iter().copied());
        match matches.subcommand() {
            Some(("lead", lm)) => leads::handle(&desk, lm),
            _ => panic!("lead command not parsed"),
        }
    };

    assert!(run(&["plotdesk", "lead", "reassign", "lead-1", "--to", "agent-3"]).is_ok());

    let err = run(&["plotdesk", "lead", "reassign", "lead-1", "--to", "agent-9"]).unwrap_err();
    assert_eq!(err.to_string(), "Agent 'agent-9' not found");

    let err = run(&["plotdesk", "lead", "reassign", "lead-42", "--to", "agent-3"]).unwrap_err();
    assert_eq!(err.to_string(), "Lead 'lead-42' not found");
}
