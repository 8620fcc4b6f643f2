// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::desk::Desk;
use crate::metrics::{AgentWorkload, StatusFilter, agent_stats, agent_workloads, group_by_key};
use crate::models::{Deal, DealStage};
use crate::utils::{agent_or_unassigned, fmt_vnd, maybe_print_json, pretty_table};

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("leaderboard", sub)) => leaderboard(desk, sub)?,
        Some(("stats", sub)) => stats(desk, sub)?,
        Some(("workload", sub)) => workload(desk, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub deals: usize,
    pub revenue: Decimal,
}

/// WON deals ranked by revenue per agent.
pub fn rank_agents(deals: &[Deal]) -> Vec<LeaderboardEntry> {
    let won = StatusFilter::Only(DealStage::Won);
    let won_deals: Vec<Deal> = deals
        .iter()
        .filter(|d| won.matches(d.stage))
        .cloned()
        .collect();
    group_by_key(
        &won_deals,
        |d| agent_or_unassigned(d.assigned_agent_name.as_deref()),
        |d| d.deal_value,
    )
    .into_iter()
    .enumerate()
    .map(|(i, g)| LeaderboardEntry {
        rank: i + 1,
        name: g.key,
        deals: g.count,
        revenue: g.sum,
    })
    .collect()
}

fn leaderboard(desk: &Desk, sub: &clap::ArgMatches) -> Result<()> {
    let data = rank_agents(&desk.data.deals);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|e| {
                vec![
                    format!("#{}", e.rank),
                    e.name.clone(),
                    e.deals.to_string(),
                    fmt_vnd(&e.revenue),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Rank", "Agent", "Deals", "Revenue"], rows)
        );
    }
    Ok(())
}

fn stats(desk: &Desk, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let s = agent_stats(
        id,
        &desk.data.deals,
        &desk.data.commissions,
        &desk.data.leads,
        desk.now,
        desk.settings.sla,
    );
    if s.total_deals == 0 && s.active_leads == 0 && s.total_commission.is_zero() {
        tracing::warn!(agent = %id, "no deals, leads or commissions for agent");
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let rows = vec![
            vec!["Total deals".into(), s.total_deals.to_string()],
            vec!["Won / Lost".into(), format!("{} / {}", s.won_deals, s.lost_deals)],
            vec!["Win rate".into(), format!("{}%", s.win_rate)],
            vec!["Revenue".into(), fmt_vnd(&s.total_revenue)],
            vec!["Avg deal value".into(), fmt_vnd(&s.avg_deal_value)],
            vec!["Commission (all)".into(), fmt_vnd(&s.total_commission)],
            vec!["  pending".into(), fmt_vnd(&s.pending_commission)],
            vec!["  approved".into(), fmt_vnd(&s.approved_commission)],
            vec!["  paid".into(), fmt_vnd(&s.paid_commission)],
            vec![
                "Active leads".into(),
                format!("{} ({} overdue)", s.active_leads, s.overdue_leads),
            ],
        ];
        println!("{}", pretty_table(&[id.as_str(), ""], rows));
    }
    Ok(())
}

fn workload(desk: &Desk, sub: &clap::ArgMatches) -> Result<()> {
    let data = agent_workloads(
        &desk.data.leads,
        desk.settings.workload.capacity,
        desk.now,
        desk.settings.sla,
    );
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        print_workloads(&data);
    }
    Ok(())
}

/// Workload table plus capacity warnings; also shown after a lead reassignment.
pub fn print_workloads(data: &[AgentWorkload]) {
    let rows = data
        .iter()
        .map(|w| {
            vec![
                w.agent_name.clone(),
                w.active_leads.to_string(),
                w.following.to_string(),
                w.qualified.to_string(),
                format!("{}% {}", w.sla_compliance, w.sla_grade.symbol()),
                format!("{} slots", w.available),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Agent", "Assigned", "Following", "Qualified", "SLA", "Free"],
            rows
        )
    );
    let warnings: Vec<String> = data
        .iter()
        .filter(|w| w.near_capacity)
        .map(|w| format!("{} approaching capacity", w.agent_name))
        .collect();
    if !warnings.is_empty() {
        println!("Warnings: {}", warnings.join(", "));
    }
}
