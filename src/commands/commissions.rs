// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::str::FromStr;
use tracing::info;

use crate::desk::Desk;
use crate::error::PlotdeskError;
use crate::metrics::{
    GroupTotal, StatusFilter, Totals, bar_width, group_by_key, partition_totals,
};
use crate::models::{Commission, CommissionStatus, StatusKind};
use crate::utils::{
    agent_or_unassigned, commission_code, fmt_vnd, implied_deal_value, maybe_print_json,
    or_placeholder, pretty_table,
};

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(desk, sub)?,
        Some(("queue", sub)) => queue(desk, sub)?,
        Some(("approve", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let updated = approve(&desk.data.commissions, id, desk.now)?;
            println!("Commission {} approved", id);
            print_summary(&updated);
        }
        Some(("pay", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let updated = mark_paid(&desk.data.commissions, id, desk.now)?;
            println!("Commission {} marked as paid", id);
            print_summary(&updated);
        }
        Some(("reject", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let reason: RejectReason = sub.get_one::<String>("reason").unwrap().parse()?;
            let notes = sub.get_one::<String>("notes").map(|s| s.as_str()).unwrap_or("");
            let updated = reject(&desk.data.commissions, id, reason, notes, desk.now)?;
            println!("Commission {} rejected", id);
            println!("Reason: {}", reason.label());
            println!("Notes: {}", or_placeholder(Some(notes)));
            print_summary(&updated);
        }
        Some(("report", sub)) => report(desk, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    DealValueIncorrect,
    RateMismatch,
    MissingDocumentation,
    Other,
}

impl RejectReason {
    pub const ALL: [RejectReason; 4] = [
        RejectReason::DealValueIncorrect,
        RejectReason::RateMismatch,
        RejectReason::MissingDocumentation,
        RejectReason::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RejectReason::DealValueIncorrect => "Deal value incorrect",
            RejectReason::RateMismatch => "Commission rate mismatch",
            RejectReason::MissingDocumentation => "Missing documentation",
            RejectReason::Other => "Other",
        }
    }
}

impl FromStr for RejectReason {
    type Err = PlotdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PlotdeskError::UnknownReason(s.to_string()))
    }
}

/// Returns a copy of `commissions` with `id` moved `from` -> `to` by `apply`.
fn transition(
    commissions: &[Commission],
    id: &str,
    from: CommissionStatus,
    to: CommissionStatus,
    apply: impl FnOnce(&mut Commission),
) -> Result<Vec<Commission>, PlotdeskError> {
    let pos = commissions
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(|| PlotdeskError::NotFound {
            kind: "Commission",
            id: id.to_string(),
        })?;
    let current = commissions[pos].status;
    if current != from {
        return Err(PlotdeskError::InvalidTransition {
            id: id.to_string(),
            from: current.as_str(),
            to: to.as_str(),
        });
    }
    let mut out = commissions.to_vec();
    out[pos].status = to;
    apply(&mut out[pos]);
    info!(id, from = from.as_str(), to = to.as_str(), "commission status changed");
    Ok(out)
}

pub fn approve(
    commissions: &[Commission],
    id: &str,
    at: DateTime<Utc>,
) -> Result<Vec<Commission>, PlotdeskError> {
    transition(
        commissions,
        id,
        CommissionStatus::Pending,
        CommissionStatus::Approved,
        |c| c.approved_at = Some(at),
    )
}

pub fn mark_paid(
    commissions: &[Commission],
    id: &str,
    at: DateTime<Utc>,
) -> Result<Vec<Commission>, PlotdeskError> {
    transition(
        commissions,
        id,
        CommissionStatus::Approved,
        CommissionStatus::Paid,
        |c| c.paid_at = Some(at),
    )
}

pub fn reject(
    commissions: &[Commission],
    id: &str,
    reason: RejectReason,
    notes: &str,
    at: DateTime<Utc>,
) -> Result<Vec<Commission>, PlotdeskError> {
    transition(
        commissions,
        id,
        CommissionStatus::Pending,
        CommissionStatus::Rejected,
        |c| {
            c.rejected_at = Some(at);
            c.notes = Some(if notes.trim().is_empty() {
                reason.label().to_string()
            } else {
                format!("{}: {}", reason.label(), notes.trim())
            });
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueSummary {
    pub pending: Totals,
    pub approved: Totals,
    pub paid: Totals,
    pub rejected: Totals,
}

pub fn queue_summary(commissions: &[Commission]) -> QueueSummary {
    let of = |s: CommissionStatus| {
        partition_totals(commissions, |c| c.status, |c| c.amount, StatusFilter::Only(s))
    };
    QueueSummary {
        pending: of(CommissionStatus::Pending),
        approved: of(CommissionStatus::Approved),
        paid: of(CommissionStatus::Paid),
        rejected: of(CommissionStatus::Rejected),
    }
}

fn print_summary(commissions: &[Commission]) {
    let s = queue_summary(commissions);
    let card = |label: &str, hint: &str, t: &Totals| {
        vec![
            format!("{} ({})", label, t.count),
            hint.to_string(),
            fmt_vnd(&t.total),
        ]
    };
    let rows = vec![
        card("Pending", "Requires Action", &s.pending),
        card("Approved", "Awaiting Payment", &s.approved),
        card("Paid", "Completed", &s.paid),
    ];
    println!("{}", pretty_table(&["Queue", "", "Total"], rows));
}

#[derive(Debug, Serialize)]
pub struct CommissionRow {
    pub id: String,
    pub code: String,
    pub deal: String,
    pub agent: String,
    pub deal_value: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
    pub status: String,
    pub requested_at: String,
}

pub fn query_rows(desk: &Desk, sub: &clap::ArgMatches) -> Result<Vec<CommissionRow>> {
    let filter: StatusFilter<CommissionStatus> = sub
        .get_one::<String>("status")
        .map(|s| s.parse::<StatusFilter<CommissionStatus>>())
        .transpose()?
        .unwrap_or(StatusFilter::All);
    Ok(desk
        .data
        .commissions
        .iter()
        .filter(|c| filter.matches(c.status))
        .map(|c| CommissionRow {
            id: c.id.clone(),
            code: commission_code(c),
            deal: c.deal_name.clone().unwrap_or_else(|| "Unknown Deal".into()),
            agent: c.agent_name.clone().unwrap_or_else(|| "Unknown Agent".into()),
            deal_value: implied_deal_value(c.amount, c.rate),
            rate: c.rate,
            amount: c.amount,
            status: c.status.as_str().to_string(),
            requested_at: c.requested_at.format("%Y-%m-%d").to_string(),
        })
        .collect())
}

fn print_rows(data: &[CommissionRow]) {
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.code.clone(),
                r.deal.clone(),
                r.agent.clone(),
                fmt_vnd(&r.deal_value),
                format!("{}%", r.rate.normalize()),
                fmt_vnd(&r.amount),
                r.status.clone(),
                r.requested_at.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "Commission",
                "Deal",
                "Agent",
                "Deal Value",
                "Rate",
                "Amount",
                "Status",
                "Requested"
            ],
            rows
        )
    );
}

fn list(desk: &Desk, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(desk, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        print_rows(&data);
    }
    Ok(())
}

fn queue(desk: &Desk, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(desk, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    print_summary(&desk.data.commissions);
    if data.is_empty() {
        println!("No commissions in this status");
    } else {
        print_rows(&data);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CommissionReport {
    pub summary: QueueSummary,
    pub by_agent: Vec<GroupTotal<String>>,
}

/// Status totals plus PAID commission grouped by agent name.
pub fn build_report(commissions: &[Commission], agent: Option<&str>) -> CommissionReport {
    let scoped: Vec<Commission> = commissions
        .iter()
        .filter(|c| agent.is_none_or(|a| c.agent_id == a))
        .cloned()
        .collect();
    let paid: Vec<Commission> = scoped
        .iter()
        .filter(|c| c.status == CommissionStatus::Paid)
        .cloned()
        .collect();
    CommissionReport {
        summary: queue_summary(&scoped),
        by_agent: group_by_key(
            &paid,
            |c| agent_or_unassigned(c.agent_name.as_deref()),
            |c| c.amount,
        ),
    }
}

fn report(desk: &Desk, sub: &clap::ArgMatches) -> Result<()> {
    let agent = sub.get_one::<String>("agent").map(|s| s.as_str());
    let r = build_report(&desk.data.commissions, agent);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &r)? {
        return Ok(());
    }
    let s = &r.summary;
    let rows = vec![
        vec![
            "Total Paid".into(),
            fmt_vnd(&s.paid.total),
            format!("{} commissions", s.paid.count),
        ],
        vec![
            "Total Pending".into(),
            fmt_vnd(&s.pending.total),
            format!("{} commissions", s.pending.count),
        ],
        vec![
            "Total Approved".into(),
            fmt_vnd(&s.approved.total),
            format!("{} commissions", s.approved.count),
        ],
    ];
    println!("{}", pretty_table(&["Summary", "Amount", "Count"], rows));

    let max = r.by_agent.first().map(|g| g.sum).unwrap_or_default();
    let rows = r
        .by_agent
        .iter()
        .map(|g| {
            let pct = bar_width(g.sum, max).round();
            let bar_len = pct.to_usize().unwrap_or(0) / 5;
            vec![
                g.key.clone(),
                format!("{} {}%", "█".repeat(bar_len), pct),
                fmt_vnd(&g.sum),
                format!("{} deals", g.count),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Agent", "Share of top", "Paid", "Deals"], rows)
    );
    Ok(())
}
