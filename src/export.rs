// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{Terminator, WriterBuilder};

use crate::metrics::{GroupTotal, Totals};
use crate::models::{Commission, StatusKind};
use crate::utils::{commission_code, implied_deal_value};

/// Header plus rows as CSV text. Lines are separated by `\n` with no trailing newline;
/// fields holding commas, quotes or newlines are quoted.
pub fn to_csv<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> Result<String> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());
    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(row.iter().map(|f| f.as_ref()))?;
    }
    let bytes = wtr.into_inner().context("Failed to flush CSV buffer")?;
    let mut out = String::from_utf8(bytes).context("CSV output was not UTF-8")?;
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

pub fn export_filename(report: &str, date: NaiveDate) -> String {
    format!("{}-{}.csv", report, date.format("%Y-%m-%d"))
}

pub const QUEUE_HEADERS: [&str; 8] = [
    "Commission ID",
    "Deal",
    "Agent",
    "Deal Value",
    "Rate",
    "Amount",
    "Status",
    "Created",
];

pub fn commission_queue_rows(commissions: &[Commission]) -> Vec<Vec<String>> {
    commissions
        .iter()
        .map(|c| {
            vec![
                commission_code(c),
                c.deal_name.clone().unwrap_or_else(|| "Unknown Deal".into()),
                c.agent_name.clone().unwrap_or_else(|| "Unknown Agent".into()),
                implied_deal_value(c.amount, c.rate).to_string(),
                format!("{}%", c.rate.normalize()),
                c.amount.to_string(),
                c.status.as_str().to_string(),
                c.requested_at.format("%d/%m/%Y").to_string(),
            ]
        })
        .collect()
}

pub fn commission_queue_csv(commissions: &[Commission]) -> Result<String> {
    to_csv(&QUEUE_HEADERS, &commission_queue_rows(commissions))
}

pub struct ReportSummary<'a> {
    pub period: &'a str,
    pub paid: Totals,
    pub pending: Totals,
    pub approved: Totals,
    pub by_agent: &'a [GroupTotal<String>],
}

/// Two sections separated by a blank line: the period summary, then per-agent totals.
pub fn commission_report_csv(report: &ReportSummary<'_>) -> Result<String> {
    let summary = to_csv(
        &[
            "Report Type",
            "Period",
            "Total Paid",
            "Total Pending",
            "Total Approved",
        ],
        &[vec![
            "Commission Report".to_string(),
            report.period.to_string(),
            report.paid.total.to_string(),
            report.pending.total.to_string(),
            report.approved.total.to_string(),
        ]],
    )?;
    let agents: Vec<Vec<String>> = report
        .by_agent
        .iter()
        .map(|g| vec![g.key.clone(), g.sum.to_string(), g.count.to_string()])
        .collect();
    let agents = to_csv(&["Agent", "Amount", "Deals"], &agents)?;
    Ok(format!("{}\n\n{}", summary, agents))
}
