// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Commission;

pub fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|d| d.with_timezone(&Utc))
        .with_context(|| format!("Invalid timestamp '{}', expected RFC 3339", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// `2.5B VND` above a billion, `450M VND` below.
pub fn fmt_vnd(d: &Decimal) -> String {
    let billion = Decimal::from(1_000_000_000u64);
    let million = Decimal::from(1_000_000u64);
    if d.abs() >= billion {
        let b = (*d / billion).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.1}B VND", b)
    } else {
        let m = (*d / million).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.0}M VND", m)
    }
}

pub fn or_placeholder(v: Option<&str>) -> String {
    match v {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => "-".to_string(),
    }
}

pub fn agent_or_unassigned(name: Option<&str>) -> String {
    match name {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => "Unassigned".to_string(),
    }
}

/// Two-letter initials for a card avatar.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .collect::<String>()
        .to_uppercase()
        .chars()
        .take(2)
        .collect()
}

static TRAILING_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)$").unwrap());

/// Display id such as `C-2025-0007`, built from the request year and the numeric
/// tail of the record id. Ids without digits are shown as-is.
pub fn commission_code(c: &Commission) -> String {
    match TRAILING_DIGITS.captures(&c.id) {
        Some(caps) => format!("C-{}-{:0>4}", c.requested_at.format("%Y"), &caps[1]),
        None => c.id.clone(),
    }
}

/// Deal value implied by a commission amount and its percentage rate.
/// Zero when the rate is zero or the quotient is out of range.
pub fn implied_deal_value(amount: Decimal, rate_pct: Decimal) -> Decimal {
    amount
        .checked_div(rate_pct / Decimal::ONE_HUNDRED)
        .map(|v| v.round_dp(0))
        .unwrap_or(Decimal::ZERO)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Case-insensitive name filter for `--match`.
pub fn name_matcher(pattern: Option<&String>) -> Result<Option<Regex>> {
    pattern
        .map(|p| {
            Regex::new(&format!("(?i){}", p))
                .with_context(|| format!("Invalid --match pattern '{}'", p))
        })
        .transpose()
}
