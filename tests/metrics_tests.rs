// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Duration;
use plotdesk::fixtures::{dataset, reference_now};
use plotdesk::metrics::{
    PropertyCriteria, SlaGrade, SlaThresholds, StatusFilter, agent_stats, agent_workloads,
    bar_width, classify_sla, executive_progress, group_by_key, inventory_stats, partition_totals,
    pipeline_stats, ratio, search_properties, sla_label, totals_by_status,
};
use plotdesk::utils::implied_deal_value;
use plotdesk::models::{CommissionStatus, DealStage, PropertyStatus, SlaStatus};
use rust_decimal::Decimal;

fn m(millions: u64) -> Decimal {
    Decimal::from(millions) * Decimal::from(1_000_000u64)
}

#[test]
fn partition_totals_filters_by_status() {
    let comms = &dataset().commissions;
    let paid = partition_totals(
        comms,
        |c| c.status,
        |c| c.amount,
        StatusFilter::Only(CommissionStatus::Paid),
    );
    assert_eq!(paid.count, 3);
    assert_eq!(paid.total, m(340));

    let all = partition_totals(comms, |c| c.status, |c| c.amount, StatusFilter::All);
    assert_eq!(all.count, comms.len());
    assert_eq!(all.total, m(775));
}

#[test]
fn partition_totals_of_nothing_is_zero() {
    let none = partition_totals(
        &dataset().commissions[..0],
        |c| c.status,
        |c| c.amount,
        StatusFilter::All,
    );
    assert_eq!(none.count, 0);
    assert_eq!(none.total, Decimal::ZERO);
}

#[test]
fn totals_by_status_covers_every_variant() {
    let comms = &dataset().commissions;
    let totals = totals_by_status(comms, |c| c.status, |c| c.amount);
    let order: Vec<CommissionStatus> = totals.iter().map(|(s, _)| *s).collect();
    assert_eq!(
        order,
        vec![
            CommissionStatus::Pending,
            CommissionStatus::Approved,
            CommissionStatus::Paid,
            CommissionStatus::Rejected
        ]
    );
    assert_eq!(totals.iter().map(|(_, t)| t.count).sum::<usize>(), comms.len());
    assert_eq!(totals[0].1.total, m(275));
}

#[test]
fn status_filter_parses_all_and_names() {
    let all: StatusFilter<CommissionStatus> = "all".parse().unwrap();
    assert_eq!(all, StatusFilter::All);
    let paid: StatusFilter<CommissionStatus> = "paid".parse().unwrap();
    assert_eq!(paid, StatusFilter::Only(CommissionStatus::Paid));
    assert!("settled".parse::<StatusFilter<CommissionStatus>>().is_err());
}

#[test]
fn group_by_key_orders_by_sum_and_keeps_ties_stable() {
    let rows = vec![("a", 10), ("b", 30), ("a", 25), ("c", 30)];
    let groups = group_by_key(&rows, |r| r.0, |r| Decimal::from(r.1));
    let keys: Vec<&str> = groups.iter().map(|g| g.key).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
    assert_eq!(groups[0].sum, Decimal::from(35));
    assert_eq!(groups[0].count, 2);

    let empty: Vec<(&str, i32)> = Vec::new();
    assert!(group_by_key(&empty, |r| r.0, |r| Decimal::from(r.1)).is_empty());
}

#[test]
fn ratio_rounds_and_guards_zero_target() {
    assert_eq!(ratio(Decimal::from(50), Decimal::from(100)), 50);
    assert_eq!(ratio(Decimal::ZERO, Decimal::from(100)), 0);
    assert_eq!(ratio(Decimal::from(5), Decimal::ZERO), 0);
    assert_eq!(ratio(Decimal::from(1), Decimal::from(8)), 13);
    assert_eq!(ratio(Decimal::from(2), Decimal::from(3)), 67);
    assert_eq!(ratio(Decimal::from(3), Decimal::from(2)), 150);
}

#[test]
fn ratio_midpoints_round_up() {
    assert_eq!(ratio(Decimal::from(1), Decimal::from(40)), 3);
    assert_eq!(ratio(Decimal::from(-1), Decimal::from(40)), -2);
    assert_eq!(ratio(Decimal::from(-3), Decimal::from(40)), -7);
    assert_eq!(ratio(Decimal::from(-13), Decimal::from(500)), -3);
}

#[test]
fn ratio_out_of_range_yields_zero() {
    assert_eq!(
        ratio(Decimal::from(15_200_000_000u64), Decimal::new(1, 20)),
        0
    );
    assert_eq!(ratio(Decimal::MAX, Decimal::new(5, 1)), 0);
    let p = executive_progress(&dataset().deals, Decimal::new(1, 18), 50);
    assert_eq!(p.revenue_pct, 0);
    assert_eq!(p.deals_pct, 8);

    assert_eq!(bar_width(Decimal::MAX, Decimal::new(1, 20)), Decimal::ZERO);
    assert_eq!(bar_width(Decimal::from(5), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(
        bar_width(Decimal::from(1), Decimal::from(4)),
        Decimal::from(25)
    );

    assert_eq!(implied_deal_value(Decimal::MAX, Decimal::new(1, 20)), Decimal::ZERO);
    assert_eq!(implied_deal_value(m(120), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(implied_deal_value(m(120), Decimal::new(30, 1)), m(4_000));
}

#[test]
fn sla_classification_boundaries() {
    let now = reference_now();
    let thr = SlaThresholds::default();
    assert_eq!(classify_sla(now + Duration::hours(30), now, thr), SlaStatus::OnTrack);
    assert_eq!(classify_sla(now + Duration::hours(10), now, thr), SlaStatus::Warning);
    assert_eq!(classify_sla(now - Duration::hours(1), now, thr), SlaStatus::Overdue);
    assert_eq!(classify_sla(now + Duration::hours(24), now, thr), SlaStatus::OnTrack);
    assert_eq!(classify_sla(now, now, thr), SlaStatus::Warning);

    assert_eq!(sla_label(now + Duration::hours(30), now, thr), "1d left");
    assert_eq!(sla_label(now + Duration::hours(10), now, thr), "10h left");
    assert_eq!(sla_label(now - Duration::hours(1), now, thr), "1h overdue");

    let tight = SlaThresholds { warning_hours: 4 };
    assert_eq!(classify_sla(now + Duration::hours(10), now, tight), SlaStatus::OnTrack);

    let wide = SlaThresholds {
        warning_hours: i64::MAX,
    };
    assert_eq!(classify_sla(now + Duration::hours(30), now, wide), SlaStatus::Warning);
}

#[test]
fn sla_sub_second_past_deadline_is_overdue() {
    let now = reference_now();
    let thr = SlaThresholds::default();
    let deadline = now - Duration::milliseconds(500);
    assert_eq!(classify_sla(deadline, now, thr), SlaStatus::Overdue);
    assert_eq!(sla_label(deadline, now, thr), "0h overdue");
    assert_eq!(
        classify_sla(now + Duration::milliseconds(500), now, thr),
        SlaStatus::Warning
    );
}

#[test]
fn sample_leads_at_reference_clock() {
    let now = reference_now();
    let thr = SlaThresholds::default();
    let labels: Vec<String> = dataset()
        .leads
        .iter()
        .take(5)
        .map(|l| sla_label(l.sla_deadline, now, thr))
        .collect();
    assert_eq!(labels, vec!["2h left", "0h left", "5h overdue", "3d left", "2d left"]);
}

#[test]
fn inventory_stats_counts_and_shares() {
    let stats = inventory_stats(&dataset().properties);
    assert_eq!(stats.total, 13);
    assert_eq!(stats.count(PropertyStatus::Available), 7);
    assert_eq!(stats.count(PropertyStatus::Reserved), 2);
    assert_eq!(stats.count(PropertyStatus::DepositPaid), 1);
    assert_eq!(stats.count(PropertyStatus::Sold), 3);
    let pcts: Vec<i64> = stats.shares.iter().map(|s| s.percentage).collect();
    assert_eq!(pcts, vec![54, 15, 8, 23]);

    let empty = inventory_stats(&[]);
    assert_eq!(empty.total, 0);
    assert!(empty.shares.iter().all(|s| s.count == 0 && s.percentage == 0));
}

#[test]
fn pipeline_stats_for_sample_deals() {
    let stats = pipeline_stats(&dataset().deals);
    assert_eq!(stats.total_deals, 9);
    assert_eq!(stats.pipeline_value, m(35_700));
    assert_eq!(stats.won_deals, 4);
    assert_eq!(stats.won_commission, m(400));
}

#[test]
fn agent_stats_combine_deals_commissions_and_leads() {
    let ds = dataset();
    let s = agent_stats(
        "agent-1",
        &ds.deals,
        &ds.commissions,
        &ds.leads,
        reference_now(),
        SlaThresholds::default(),
    );
    assert_eq!(s.total_deals, 4);
    assert_eq!(s.won_deals, 2);
    assert_eq!(s.lost_deals, 0);
    assert_eq!(s.total_revenue, m(6_400));
    assert_eq!(s.avg_deal_value, m(3_350));
    assert_eq!(s.win_rate, 100);
    assert_eq!(s.paid_commission, m(120));
    assert_eq!(s.approved_commission, m(60));
    assert_eq!(s.pending_commission, m(90));
    assert_eq!(s.total_commission, m(270));
    assert_eq!(s.active_leads, 2);
    assert_eq!(s.overdue_leads, 1);

    let jane = agent_stats(
        "agent-3",
        &ds.deals,
        &ds.commissions,
        &ds.leads,
        reference_now(),
        SlaThresholds::default(),
    );
    assert_eq!(jane.win_rate, 50);
    assert_eq!(jane.active_leads, 1);

    let nobody = agent_stats(
        "agent-9",
        &ds.deals,
        &ds.commissions,
        &ds.leads,
        reference_now(),
        SlaThresholds::default(),
    );
    assert_eq!(nobody.total_deals, 0);
    assert_eq!(nobody.avg_deal_value, Decimal::ZERO);
    assert_eq!(nobody.win_rate, 0);
}

#[test]
fn workloads_skip_lost_leads_and_flag_capacity() {
    let ds = dataset();
    let loads = agent_workloads(&ds.leads, 25, reference_now(), SlaThresholds::default());
    let ids: Vec<&str> = loads.iter().map(|w| w.agent_id.as_str()).collect();
    assert_eq!(ids, vec!["agent-1", "agent-2", "agent-3"]);
    assert_eq!(loads[0].agent_name, "Luis Phan");
    assert_eq!(loads[0].active_leads, 2);
    assert_eq!(loads[0].available, 23);
    assert_eq!(loads[0].sla_compliance, 50);
    assert_eq!(loads[2].active_leads, 1);
    assert_eq!(loads[2].qualified, 1);
    assert!(loads.iter().all(|w| !w.near_capacity));

    let following: Vec<usize> = loads.iter().map(|w| w.following).collect();
    assert_eq!(following, vec![1, 1, 0]);
    let grades: Vec<SlaGrade> = loads.iter().map(|w| w.sla_grade).collect();
    assert_eq!(grades, vec![SlaGrade::Missed, SlaGrade::Met, SlaGrade::Met]);

    let tight = agent_workloads(&ds.leads, 2, reference_now(), SlaThresholds::default());
    assert!(tight[0].near_capacity);
    assert_eq!(tight[0].available, 0);
    assert!(!tight[2].near_capacity);
}

#[test]
fn sla_grade_thresholds() {
    assert_eq!(SlaGrade::from_compliance(100), SlaGrade::Met);
    assert_eq!(SlaGrade::from_compliance(95), SlaGrade::Met);
    assert_eq!(SlaGrade::from_compliance(94), SlaGrade::Near);
    assert_eq!(SlaGrade::from_compliance(90), SlaGrade::Near);
    assert_eq!(SlaGrade::from_compliance(89), SlaGrade::Missed);
    assert_eq!(SlaGrade::Near.symbol(), "⚠️");
}

#[test]
fn executive_progress_against_targets() {
    let p = executive_progress(&dataset().deals, m(150_000), 50);
    assert_eq!(p.revenue, m(15_200));
    assert_eq!(p.revenue_pct, 10);
    assert_eq!(p.deals_closed, 4);
    assert_eq!(p.deals_pct, 8);
    assert_eq!(p.conversion_rate, 44);

    let zero = executive_progress(&dataset().deals, Decimal::ZERO, 0);
    assert_eq!(zero.revenue_pct, 0);
    assert_eq!(zero.deals_pct, 0);
}

#[test]
fn property_search_combines_criteria() {
    let props = &dataset().properties;
    let cheap = PropertyCriteria {
        price_max: Some(m(3_000)),
        statuses: vec![PropertyStatus::Available],
        ..Default::default()
    };
    let ids: Vec<&str> = search_properties(props, &cheap)
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a001", "a005"]);

    let greenhill = PropertyCriteria {
        project_id: Some("greenhill".into()),
        ..Default::default()
    };
    assert_eq!(search_properties(props, &greenhill).len(), 3);

    let big = PropertyCriteria {
        area_min: Some(Decimal::from(200)),
        area_max: Some(Decimal::from(210)),
        ..Default::default()
    };
    let ids: Vec<&str> = search_properties(props, &big)
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["b001", "c002", "c003"]);

    assert_eq!(
        search_properties(props, &PropertyCriteria::default()).len(),
        props.len()
    );
    assert!(DealStage::Won.is_closed());
}
