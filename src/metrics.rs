// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived figures shown on the dashboards. Every function takes the records it
//! works on as an argument and never looks anything up on its own.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::PlotdeskError;
use crate::models::{
    Commission, CommissionStatus, Deal, DealStage, Lead, LeadStatus, Property, PropertyStatus,
    SlaStatus, StatusKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub count: usize,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<S> {
    All,
    Only(S),
}

impl<S: StatusKind> StatusFilter<S> {
    pub fn matches(&self, status: S) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => *s == status,
        }
    }
}

impl<S: StatusKind> FromStr for StatusFilter<S> {
    type Err = PlotdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            S::parse(s).map(StatusFilter::Only)
        }
    }
}

pub fn partition_totals<T, S>(
    records: &[T],
    status_of: impl Fn(&T) -> S,
    amount_of: impl Fn(&T) -> Decimal,
    filter: StatusFilter<S>,
) -> Totals
where
    S: StatusKind,
{
    records
        .iter()
        .filter(|r| filter.matches(status_of(r)))
        .fold(Totals::default(), |mut acc, r| {
            acc.count += 1;
            acc.total += amount_of(r);
            acc
        })
}

/// One `Totals` per variant, in declaration order.
pub fn totals_by_status<T, S>(
    records: &[T],
    status_of: impl Fn(&T) -> S,
    amount_of: impl Fn(&T) -> Decimal,
) -> Vec<(S, Totals)>
where
    S: StatusKind,
{
    let mut out: Vec<(S, Totals)> = S::ALL.iter().map(|s| (*s, Totals::default())).collect();
    for r in records {
        let status = status_of(r);
        if let Some((_, t)) = out.iter_mut().find(|(s, _)| *s == status) {
            t.count += 1;
            t.total += amount_of(r);
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotal<K> {
    pub key: K,
    pub sum: Decimal,
    pub count: usize,
}

/// Sorted by `sum` descending; equal sums keep first-seen order.
pub fn group_by_key<T, K>(
    records: &[T],
    key_of: impl Fn(&T) -> K,
    amount_of: impl Fn(&T) -> Decimal,
) -> Vec<GroupTotal<K>>
where
    K: Eq + Hash + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<GroupTotal<K>> = Vec::new();
    for r in records {
        let key = key_of(r);
        let amount = amount_of(r);
        match index.get(&key) {
            Some(&i) => {
                groups[i].sum += amount;
                groups[i].count += 1;
            }
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(GroupTotal {
                    key,
                    sum: amount,
                    count: 1,
                });
            }
        }
    }
    groups.sort_by(|a, b| b.sum.cmp(&a.sum));
    groups
}

/// `value / of * 100`, or `None` when `of` is zero or the result does not fit.
fn percent_of(value: Decimal, of: Decimal) -> Option<Decimal> {
    value
        .checked_div(of)
        .and_then(|q| q.checked_mul(Decimal::ONE_HUNDRED))
}

/// Midpoints round up: 2.5 -> 3, -2.5 -> -2.
fn round_half_up(d: Decimal) -> Decimal {
    let strategy = if d.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    d.round_dp_with_strategy(0, strategy)
}

/// `current / target` as a whole percentage with midpoints rounded up.
/// A zero target, or a quotient too large to represent, yields 0.
pub fn ratio(current: Decimal, target: Decimal) -> i64 {
    percent_of(current, target)
        .and_then(|p| round_half_up(p).to_i64())
        .unwrap_or(0)
}

/// Bar length in percent of the largest value (unrounded, for charts).
pub fn bar_width(value: Decimal, max: Decimal) -> Decimal {
    percent_of(value, max).unwrap_or(Decimal::ZERO)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaThresholds {
    pub warning_hours: i64,
}

impl Default for SlaThresholds {
    fn default() -> Self {
        Self { warning_hours: 24 }
    }
}

fn minutes_left(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (deadline - now).num_minutes()
}

pub fn classify_sla(
    deadline: DateTime<Utc>,
    now: DateTime<Utc>,
    thresholds: SlaThresholds,
) -> SlaStatus {
    if deadline < now {
        return SlaStatus::Overdue;
    }
    // a window too wide for chrono covers every deadline
    let in_window = TimeDelta::try_hours(thresholds.warning_hours)
        .is_none_or(|window| deadline - now < window);
    if in_window {
        SlaStatus::Warning
    } else {
        SlaStatus::OnTrack
    }
}

pub fn sla_label(deadline: DateTime<Utc>, now: DateTime<Utc>, thresholds: SlaThresholds) -> String {
    let mins = minutes_left(deadline, now);
    match classify_sla(deadline, now, thresholds) {
        SlaStatus::Overdue => format!("{}h overdue", mins.abs() / 60),
        SlaStatus::Warning => format!("{}h left", mins / 60),
        SlaStatus::OnTrack => format!("{}d left", mins / (60 * 24)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusShare {
    pub status: &'static str,
    pub count: usize,
    pub percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryStats {
    pub total: usize,
    pub shares: Vec<StatusShare>,
}

impl InventoryStats {
    pub fn count(&self, status: PropertyStatus) -> usize {
        self.shares
            .iter()
            .find(|s| s.status == status.as_str())
            .map(|s| s.count)
            .unwrap_or(0)
    }
}

pub fn inventory_stats(properties: &[Property]) -> InventoryStats {
    let total = properties.len();
    let shares = totals_by_status(properties, |p| p.status, |_| Decimal::ZERO)
        .into_iter()
        .map(|(status, t)| StatusShare {
            status: status.as_str(),
            count: t.count,
            percentage: ratio(Decimal::from(t.count), Decimal::from(total)),
        })
        .collect();
    InventoryStats { total, shares }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub total_deals: usize,
    pub pipeline_value: Decimal,
    pub won_deals: usize,
    pub won_commission: Decimal,
}

pub fn pipeline_stats(deals: &[Deal]) -> PipelineStats {
    let all = partition_totals(deals, |d| d.stage, |d| d.deal_value, StatusFilter::All);
    let won = partition_totals(
        deals,
        |d| d.stage,
        |d| d.commission,
        StatusFilter::Only(DealStage::Won),
    );
    PipelineStats {
        total_deals: all.count,
        pipeline_value: all.total,
        won_deals: won.count,
        won_commission: won.total,
    }
}

/// Kanban columns: deals per stage, stage order preserved, empty stages included.
pub fn deals_by_stage(deals: &[Deal]) -> Vec<(DealStage, Vec<&Deal>)> {
    DealStage::ALL
        .iter()
        .map(|stage| (*stage, deals.iter().filter(|d| d.stage == *stage).collect()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentStats {
    pub agent_id: String,
    pub total_deals: usize,
    pub won_deals: usize,
    pub lost_deals: usize,
    pub total_revenue: Decimal,
    pub total_commission: Decimal,
    pub pending_commission: Decimal,
    pub approved_commission: Decimal,
    pub paid_commission: Decimal,
    pub active_leads: usize,
    pub overdue_leads: usize,
    pub avg_deal_value: Decimal,
    pub win_rate: i64,
}

pub fn agent_stats(
    agent_id: &str,
    deals: &[Deal],
    commissions: &[Commission],
    leads: &[Lead],
    now: DateTime<Utc>,
    thresholds: SlaThresholds,
) -> AgentStats {
    let deals: Vec<Deal> = deals
        .iter()
        .filter(|d| d.assigned_agent == agent_id)
        .cloned()
        .collect();
    let commissions: Vec<Commission> = commissions
        .iter()
        .filter(|c| c.agent_id == agent_id)
        .cloned()
        .collect();
    let leads: Vec<&Lead> = leads.iter().filter(|l| l.assigned_to == agent_id).collect();

    let all = partition_totals(&deals, |d| d.stage, |d| d.deal_value, StatusFilter::All);
    let won = partition_totals(
        &deals,
        |d| d.stage,
        |d| d.deal_value,
        StatusFilter::Only(DealStage::Won),
    );
    let lost = partition_totals(
        &deals,
        |d| d.stage,
        |_| Decimal::ZERO,
        StatusFilter::Only(DealStage::Lost),
    );
    let closed = deals.iter().filter(|d| d.stage.is_closed()).count();
    let by_status = totals_by_status(&commissions, |c| c.status, |c| c.amount);
    let commission_of = |s: CommissionStatus| {
        by_status
            .iter()
            .find(|(st, _)| *st == s)
            .map(|(_, t)| t.total)
            .unwrap_or(Decimal::ZERO)
    };

    let active: Vec<&&Lead> = leads.iter().filter(|l| l.status != LeadStatus::Lost).collect();
    let overdue = active
        .iter()
        .filter(|l| classify_sla(l.sla_deadline, now, thresholds) == SlaStatus::Overdue)
        .count();

    let avg_deal_value = if all.count == 0 {
        Decimal::ZERO
    } else {
        (all.total / Decimal::from(all.count)).round_dp(0)
    };

    AgentStats {
        agent_id: agent_id.to_string(),
        total_deals: all.count,
        won_deals: won.count,
        lost_deals: lost.count,
        total_revenue: won.total,
        total_commission: commission_of(CommissionStatus::Pending)
            + commission_of(CommissionStatus::Approved)
            + commission_of(CommissionStatus::Paid),
        pending_commission: commission_of(CommissionStatus::Pending),
        approved_commission: commission_of(CommissionStatus::Approved),
        paid_commission: commission_of(CommissionStatus::Paid),
        active_leads: active.len(),
        overdue_leads: overdue,
        avg_deal_value,
        win_rate: ratio(Decimal::from(won.count), Decimal::from(closed)),
    }
}

/// Compliance an agent is expected to reach.
pub const SLA_TARGET_PCT: i64 = 95;
/// Below target but close enough to only warn.
pub const SLA_NEAR_PCT: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlaGrade {
    Met,
    Near,
    Missed,
}

impl SlaGrade {
    pub fn from_compliance(pct: i64) -> Self {
        if pct >= SLA_TARGET_PCT {
            SlaGrade::Met
        } else if pct >= SLA_NEAR_PCT {
            SlaGrade::Near
        } else {
            SlaGrade::Missed
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            SlaGrade::Met => "✅",
            SlaGrade::Near => "⚠️",
            SlaGrade::Missed => "❌",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentWorkload {
    pub agent_id: String,
    pub agent_name: String,
    pub active_leads: usize,
    pub following: usize,
    pub qualified: usize,
    pub capacity: usize,
    pub available: usize,
    pub sla_compliance: i64,
    pub sla_grade: SlaGrade,
    pub near_capacity: bool,
}

/// Share of capacity at which an agent is flagged as nearly full.
pub const NEAR_CAPACITY_PCT: i64 = 80;

pub fn agent_workloads(
    leads: &[Lead],
    capacity: usize,
    now: DateTime<Utc>,
    thresholds: SlaThresholds,
) -> Vec<AgentWorkload> {
    let active: Vec<Lead> = leads
        .iter()
        .filter(|l| l.status != LeadStatus::Lost)
        .cloned()
        .collect();
    let groups = group_by_key(&active, |l| l.assigned_to.clone(), |_| Decimal::ONE);
    groups
        .into_iter()
        .map(|g| {
            let mine: Vec<&Lead> = active.iter().filter(|l| l.assigned_to == g.key).collect();
            let name = mine
                .iter()
                .find_map(|l| l.assigned_to_name.clone())
                .unwrap_or_else(|| g.key.clone());
            let count_in = |status: LeadStatus| mine.iter().filter(|l| l.status == status).count();
            let on_time = mine
                .iter()
                .filter(|l| classify_sla(l.sla_deadline, now, thresholds) != SlaStatus::Overdue)
                .count();
            let load = ratio(Decimal::from(g.count), Decimal::from(capacity));
            let sla_compliance = ratio(Decimal::from(on_time), Decimal::from(g.count));
            AgentWorkload {
                agent_id: g.key.clone(),
                agent_name: name,
                active_leads: g.count,
                following: count_in(LeadStatus::Contacted),
                qualified: count_in(LeadStatus::Qualified),
                capacity,
                available: capacity.saturating_sub(g.count),
                sla_compliance,
                sla_grade: SlaGrade::from_compliance(sla_compliance),
                near_capacity: capacity > 0 && load >= NEAR_CAPACITY_PCT,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutiveProgress {
    pub revenue: Decimal,
    pub revenue_target: Decimal,
    pub revenue_pct: i64,
    pub deals_closed: usize,
    pub deals_target: u32,
    pub deals_pct: i64,
    pub conversion_rate: i64,
}

pub fn executive_progress(
    deals: &[Deal],
    revenue_target: Decimal,
    deals_target: u32,
) -> ExecutiveProgress {
    let won = partition_totals(
        deals,
        |d| d.stage,
        |d| d.deal_value,
        StatusFilter::Only(DealStage::Won),
    );
    ExecutiveProgress {
        revenue: won.total,
        revenue_target,
        revenue_pct: ratio(won.total, revenue_target),
        deals_closed: won.count,
        deals_target,
        deals_pct: ratio(Decimal::from(won.count), Decimal::from(deals_target)),
        conversion_rate: ratio(Decimal::from(won.count), Decimal::from(deals.len())),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyCriteria {
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub area_min: Option<Decimal>,
    pub area_max: Option<Decimal>,
    pub statuses: Vec<PropertyStatus>,
    pub project_id: Option<String>,
}

impl PropertyCriteria {
    pub fn matches(&self, p: &Property) -> bool {
        self.price_min.is_none_or(|v| p.price >= v)
            && self.price_max.is_none_or(|v| p.price <= v)
            && self.area_min.is_none_or(|v| p.area >= v)
            && self.area_max.is_none_or(|v| p.area <= v)
            && (self.statuses.is_empty() || self.statuses.contains(&p.status))
            && self.project_id.as_deref().is_none_or(|id| p.project_id == id)
    }
}

pub fn search_properties<'a>(
    properties: &'a [Property],
    criteria: &PropertyCriteria,
) -> Vec<&'a Property> {
    properties.iter().filter(|p| criteria.matches(p)).collect()
}
