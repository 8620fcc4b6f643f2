// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::desk::Desk;
use crate::metrics::{inventory_stats, ratio};
use crate::models::{Project, PropertyStatus, StatusKind};
use crate::utils::{fmt_vnd, maybe_print_json, pretty_table};

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(desk, sub)?,
        Some(("show", sub)) => show(desk, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ProjectOverview {
    pub id: String,
    pub name: String,
    pub status: String,
    pub total: u32,
    pub available: u32,
    pub available_pct: i64,
    pub reserved: usize,
    pub reserved_pct: i64,
    pub deposit_paid: usize,
    pub sold: usize,
    pub sold_pct: i64,
    pub price_from: Decimal,
}

/// Headline percentages are taken against the project's declared size, while the
/// reserved/sold counts come from the plots actually on file.
pub fn overview(desk: &Desk, project: &Project) -> ProjectOverview {
    let plots: Vec<_> = desk
        .data
        .properties_in(&project.id)
        .into_iter()
        .cloned()
        .collect();
    let inv = inventory_stats(&plots);
    let total = Decimal::from(project.total_properties);
    let reserved = inv.count(PropertyStatus::Reserved);
    let sold = inv.count(PropertyStatus::Sold);
    ProjectOverview {
        id: project.id.clone(),
        name: project.name.clone(),
        status: project.status.as_str().to_string(),
        total: project.total_properties,
        available: project.available_properties,
        available_pct: ratio(Decimal::from(project.available_properties), total),
        reserved,
        reserved_pct: ratio(Decimal::from(reserved), total),
        deposit_paid: inv.count(PropertyStatus::DepositPaid),
        sold,
        sold_pct: ratio(Decimal::from(sold), total),
        price_from: project.price_from,
    }
}

fn list(desk: &Desk, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<ProjectOverview> = desk
        .data
        .projects
        .iter()
        .map(|p| overview(desk, p))
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|o| {
                vec![
                    o.name.clone(),
                    o.status.clone(),
                    format!("{}/{}", o.available, o.total),
                    format!("{}%", o.available_pct),
                    fmt_vnd(&o.price_from),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Project", "Status", "Available", "Available %", "From"],
                rows
            )
        );
    }
    Ok(())
}

fn show(desk: &Desk, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let project = desk.data.project(id)?;
    let o = overview(desk, project);
    println!("{} ({}) by {}", project.name, project.location, project.developer);
    let rows = vec![
        vec![
            "Available".into(),
            o.available.to_string(),
            format!("{}%", o.available_pct),
        ],
        vec![
            "Reserved".into(),
            o.reserved.to_string(),
            format!("{}%", o.reserved_pct),
        ],
        vec!["Deposit Paid".into(), o.deposit_paid.to_string(), String::new()],
        vec!["Sold".into(), o.sold.to_string(), format!("{}%", o.sold_pct)],
    ];
    println!("{}", pretty_table(&["Inventory", "Plots", "Share"], rows));
    Ok(())
}
