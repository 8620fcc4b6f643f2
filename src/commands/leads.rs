// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::commands::agents::print_workloads;
use crate::desk::Desk;
use crate::error::PlotdeskError;
use crate::metrics::{StatusFilter, agent_workloads, classify_sla, sla_label, totals_by_status};
use crate::models::{Lead, LeadStatus, StatusKind};
use crate::utils::{agent_or_unassigned, maybe_print_json, name_matcher, pretty_table};

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(desk, sub)?,
        Some(("reassign", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let to = sub.get_one::<String>("to").unwrap();
            let name = desk.data.agent_name(to)?;
            let previous = agent_or_unassigned(desk.data.lead(id)?.assigned_to_name.as_deref());
            let updated = reassign(&desk.data.leads, id, to, &name)?;
            println!("Lead {} reassigned from {} to {}", id, previous, name);
            print_workloads(&agent_workloads(
                &updated,
                desk.settings.workload.capacity,
                desk.now,
                desk.settings.sla,
            ));
        }
        _ => {}
    }
    Ok(())
}

/// Returns a copy of `leads` with `id` handed to `agent_id`.
pub fn reassign(
    leads: &[Lead],
    id: &str,
    agent_id: &str,
    agent_name: &str,
) -> Result<Vec<Lead>, PlotdeskError> {
    let pos = leads
        .iter()
        .position(|l| l.id == id)
        .ok_or_else(|| PlotdeskError::NotFound {
            kind: "Lead",
            id: id.to_string(),
        })?;
    let mut out = leads.to_vec();
    let from = std::mem::replace(&mut out[pos].assigned_to, agent_id.to_string());
    out[pos].assigned_to_name = Some(agent_name.to_string());
    info!(id, from = %from, to = agent_id, "lead reassigned");
    Ok(out)
}

#[derive(Debug, Serialize)]
pub struct LeadRow {
    pub id: String,
    pub customer: String,
    pub source: String,
    pub status: String,
    pub agent: String,
    pub deadline: String,
    pub sla: String,
    pub sla_text: String,
}

pub fn query_rows(desk: &Desk, sub: &clap::ArgMatches) -> Result<Vec<LeadRow>> {
    let filter = sub
        .get_one::<String>("status")
        .map(|s| s.parse::<StatusFilter<LeadStatus>>())
        .transpose()?
        .unwrap_or(StatusFilter::All);
    let agent = sub.get_one::<String>("agent");
    let matcher = name_matcher(sub.get_one::<String>("match"))?;
    let thresholds = desk.settings.sla;

    Ok(desk
        .data
        .leads
        .iter()
        .filter(|l| filter.matches(l.status))
        .filter(|l| agent.is_none_or(|a| &l.assigned_to == a))
        .filter(|l| matcher.as_ref().is_none_or(|re| re.is_match(&l.customer_name)))
        .map(|l| LeadRow {
            id: l.id.clone(),
            customer: l.customer_name.clone(),
            source: l.source.clone(),
            status: l.status.as_str().to_string(),
            agent: agent_or_unassigned(l.assigned_to_name.as_deref()),
            deadline: l.sla_deadline.format("%b %d, %H:%M").to_string(),
            sla: classify_sla(l.sla_deadline, desk.now, thresholds)
                .as_str()
                .to_string(),
            sla_text: sla_label(l.sla_deadline, desk.now, thresholds),
        })
        .collect())
}

fn list(desk: &Desk, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(desk, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let counts = totals_by_status(&desk.data.leads, |l| l.status, |_| Decimal::ZERO);
    let mut tabs = vec![format!("All ({})", desk.data.leads.len())];
    tabs.extend(
        counts
            .iter()
            .map(|(s, t)| format!("{} ({})", s.label(), t.count)),
    );
    println!("{}", tabs.join("  "));
    if data.is_empty() {
        println!("No leads match this filter");
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.customer.clone(),
                r.source.clone(),
                r.status.clone(),
                r.agent.clone(),
                r.deadline.clone(),
                r.sla_text.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Customer", "Source", "Status", "Agent", "SLA Deadline", "SLA"],
            rows
        )
    );
    Ok(())
}
