// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::desk::Desk;
use crate::metrics::{deals_by_stage, pipeline_stats};
use crate::models::StatusKind;
use crate::utils::{
    agent_or_unassigned, fmt_vnd, initials, maybe_print_json, or_placeholder, pretty_table,
};

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("pipeline", sub)) => pipeline(desk, sub)?,
        Some(("stats", sub)) => stats(desk, sub)?,
        Some(("show", sub)) => show(desk, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct StageColumn {
    pub stage: String,
    pub count: usize,
    pub value: Decimal,
    pub deals: Vec<String>,
}

pub fn columns(desk: &Desk) -> Vec<StageColumn> {
    deals_by_stage(&desk.data.deals)
        .into_iter()
        .map(|(stage, deals)| StageColumn {
            stage: stage.as_str().to_string(),
            count: deals.len(),
            value: deals.iter().map(|d| d.deal_value).sum(),
            deals: deals.iter().map(|d| d.id.clone()).collect(),
        })
        .collect()
}

fn pipeline(desk: &Desk, sub: &clap::ArgMatches) -> Result<()> {
    let cols = columns(desk);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cols)? {
        return Ok(());
    }
    for (stage, deals) in deals_by_stage(&desk.data.deals) {
        println!("{} ({})", stage.label(), deals.len());
        if deals.is_empty() {
            println!("  No deals in {}", stage.label().to_lowercase());
            continue;
        }
        let rows = deals
            .iter()
            .map(|d| {
                vec![
                    d.id.clone(),
                    or_placeholder(d.customer_name.as_deref()),
                    or_placeholder(d.property_name.as_deref()),
                    fmt_vnd(&d.deal_value),
                    fmt_vnd(&d.commission),
                    initials(&agent_or_unassigned(d.assigned_agent_name.as_deref())),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Deal", "Customer", "Property", "Value", "Commission", "Agent"],
                rows
            )
        );
    }
    Ok(())
}

fn stats(desk: &Desk, sub: &clap::ArgMatches) -> Result<()> {
    let s = pipeline_stats(&desk.data.deals);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let rows = vec![
            vec!["Total Deals".into(), s.total_deals.to_string()],
            vec!["Pipeline Value".into(), fmt_vnd(&s.pipeline_value)],
            vec!["Won Deals".into(), s.won_deals.to_string()],
            vec!["Total Commission".into(), fmt_vnd(&s.won_commission)],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}

fn show(desk: &Desk, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let d = desk.data.deal(id)?;
    let property = desk
        .data
        .property(&d.property_id)
        .map(|p| format!("{} ({})", p.plot_number, p.status.label()))
        .ok();
    let rows = vec![
        vec!["Stage".into(), d.stage.label().to_string()],
        vec!["Customer".into(), or_placeholder(d.customer_name.as_deref())],
        vec![
            "Property".into(),
            or_placeholder(property.as_deref().or(d.property_name.as_deref())),
        ],
        vec!["Deal Value".into(), fmt_vnd(&d.deal_value)],
        vec![
            "Commission".into(),
            format!("{} ({}%)", fmt_vnd(&d.commission), d.commission_rate.normalize()),
        ],
        vec![
            "Agent".into(),
            agent_or_unassigned(d.assigned_agent_name.as_deref()),
        ],
        vec!["Notes".into(), or_placeholder(Some(d.notes.as_str()))],
        vec![
            "Updated".into(),
            d.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        ],
    ];
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}
