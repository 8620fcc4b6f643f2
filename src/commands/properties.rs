// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::desk::Desk;
use crate::metrics::{PropertyCriteria, inventory_stats, search_properties};
use crate::models::{PropertyStatus, StatusKind};
use crate::utils::{fmt_vnd, maybe_print_json, or_placeholder, parse_decimal, pretty_table};

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(desk, sub)?,
        Some(("stats", sub)) => stats(desk, sub)?,
        Some(("show", sub)) => show(desk, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn criteria_from(sub: &clap::ArgMatches) -> Result<PropertyCriteria> {
    let dec = |name: &str| -> Result<Option<Decimal>> {
        sub.get_one::<String>(name)
            .map(|s| parse_decimal(s))
            .transpose()
    };
    let statuses = sub
        .get_many::<String>("status")
        .map(|vals| {
            vals.map(|s| s.parse::<PropertyStatus>())
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?
        .unwrap_or_default();
    Ok(PropertyCriteria {
        price_min: dec("price-min")?,
        price_max: dec("price-max")?,
        area_min: dec("area-min")?,
        area_max: dec("area-max")?,
        statuses,
        project_id: sub.get_one::<String>("project").cloned(),
    })
}

#[derive(Debug, Serialize)]
pub struct PropertyRow {
    pub id: String,
    pub plot: String,
    pub project: String,
    pub block: String,
    pub area: Decimal,
    pub price: Decimal,
    pub status: String,
}

pub fn query_rows(desk: &Desk, sub: &clap::ArgMatches) -> Result<Vec<PropertyRow>> {
    let criteria = criteria_from(sub)?;
    Ok(search_properties(&desk.data.properties, &criteria)
        .into_iter()
        .map(|p| PropertyRow {
            id: p.id.clone(),
            plot: p.plot_number.clone(),
            project: or_placeholder(p.project_name.as_deref()),
            block: p.block.clone(),
            area: p.area,
            price: p.price,
            status: p.status.as_str().to_string(),
        })
        .collect())
}

fn list(desk: &Desk, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(desk, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.plot.clone(),
                    r.project.clone(),
                    r.block.clone(),
                    format!("{} m²", r.area),
                    fmt_vnd(&r.price),
                    r.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Plot", "Project", "Block", "Area", "Price", "Status"], rows)
        );
        println!("{} plot(s) found", data.len());
    }
    Ok(())
}

fn stats(desk: &Desk, sub: &clap::ArgMatches) -> Result<()> {
    let props: Vec<_> = match sub.get_one::<String>("project") {
        Some(pid) => {
            desk.data.project(pid)?;
            desk.data.properties_in(pid).into_iter().cloned().collect()
        }
        None => desk.data.properties.clone(),
    };
    let s = inventory_stats(&props);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let mut rows: Vec<Vec<String>> = s
            .shares
            .iter()
            .map(|sh| {
                let label = sh
                    .status
                    .parse::<PropertyStatus>()
                    .map(|st| st.label())
                    .unwrap_or(sh.status);
                vec![
                    label.to_string(),
                    sh.count.to_string(),
                    format!("{}%", sh.percentage),
                ]
            })
            .collect();
        rows.push(vec!["Total".into(), s.total.to_string(), String::new()]);
        println!("{}", pretty_table(&["Status", "Plots", "Share"], rows));
    }
    Ok(())
}

fn show(desk: &Desk, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let p = desk.data.property(id)?;
    let rows = vec![
        vec!["Plot".into(), p.plot_number.clone()],
        vec!["Project".into(), or_placeholder(p.project_name.as_deref())],
        vec!["Block".into(), p.block.clone()],
        vec!["Area".into(), format!("{} m²", p.area)],
        vec!["Price".into(), fmt_vnd(&p.price)],
        vec!["Status".into(), p.status.label().to_string()],
        vec![
            "Reserved by".into(),
            or_placeholder(p.reserved_by_name.as_deref().or(p.reserved_by.as_deref())),
        ],
        vec![
            "Reserved until".into(),
            or_placeholder(
                p.reserved_until
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .as_deref(),
            ),
        ],
    ];
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}
