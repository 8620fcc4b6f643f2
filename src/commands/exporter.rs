// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::commands::commissions::build_report;
use crate::desk::Desk;
use crate::export::{ReportSummary, commission_queue_csv, commission_report_csv, export_filename};

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("commissions", sub)) => {
            let body = commission_queue_csv(&desk.data.commissions)?;
            write_out(desk, sub, "commissions", &body)
        }
        Some(("commission-report", sub)) => {
            let report = build_report(&desk.data.commissions, None);
            let body = commission_report_csv(&ReportSummary {
                period: "This Month",
                paid: report.summary.paid,
                pending: report.summary.pending,
                approved: report.summary.approved,
                by_agent: &report.by_agent,
            })?;
            write_out(desk, sub, "commission-report", &body)
        }
        _ => Ok(()),
    }
}

/// `--out` if given, else `<report>-<date>.csv` in the working directory.
pub fn output_path(desk: &Desk, sub: &clap::ArgMatches, report: &str) -> PathBuf {
    sub.get_one::<String>("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(export_filename(report, desk.now.date_naive())))
}

fn write_out(desk: &Desk, sub: &clap::ArgMatches, report: &str, body: &str) -> Result<()> {
    let out = output_path(desk, sub, report);
    std::fs::write(&out, body).with_context(|| format!("Write {}", out.display()))?;
    println!("Exported {} to {}", report, out.display());
    Ok(())
}
