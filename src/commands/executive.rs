// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::commands::agents::{LeaderboardEntry, rank_agents};
use crate::commands::projects::{ProjectOverview, overview};
use crate::desk::Desk;
use crate::metrics::{ExecutiveProgress, executive_progress};
use crate::utils::{fmt_vnd, maybe_print_json, pretty_table};

#[derive(Debug, Serialize)]
pub struct ExecutiveSummary {
    pub progress: ExecutiveProgress,
    pub projects: Vec<ProjectOverview>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

pub fn summary(desk: &Desk) -> ExecutiveSummary {
    let targets = &desk.settings.targets;
    ExecutiveSummary {
        progress: executive_progress(&desk.data.deals, targets.revenue, targets.deals),
        projects: desk
            .data
            .projects
            .iter()
            .map(|p| overview(desk, p))
            .collect(),
        leaderboard: rank_agents(&desk.data.deals).into_iter().take(3).collect(),
    }
}

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    let s = summary(desk);
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let p = &s.progress;
    let rows = vec![
        vec![
            "Revenue".into(),
            fmt_vnd(&p.revenue),
            fmt_vnd(&p.revenue_target),
            format!("{}%", p.revenue_pct),
        ],
        vec![
            "Deals closed".into(),
            p.deals_closed.to_string(),
            p.deals_target.to_string(),
            format!("{}%", p.deals_pct),
        ],
        vec![
            "Conversion".into(),
            format!("{}%", p.conversion_rate),
            String::new(),
            String::new(),
        ],
    ];
    println!(
        "{}",
        pretty_table(&["KPI", "Actual", "Target", "Progress"], rows)
    );

    let rows = s
        .projects
        .iter()
        .map(|o| {
            vec![
                o.name.clone(),
                o.sold.to_string(),
                format!("{}/{}", o.available, o.total),
                o.status.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Project", "Sold", "Inventory", "Status"], rows)
    );

    let rows = s
        .leaderboard
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
    Ok(())
}
