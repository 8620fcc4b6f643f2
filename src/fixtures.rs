// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Sample sales-desk data used when no dataset file is given.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;

use crate::models::{
    Budget, Commission, CommissionStatus, Customer, Dataset, Deal, DealStage, Lead, LeadStatus,
    Project, ProjectStatus, Property, PropertyStatus, SlaStatus,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn vnd(millions: u64) -> Decimal {
    Decimal::from(millions) * Decimal::from(1_000_000u64)
}

fn pct(tenths: i64) -> Decimal {
    Decimal::new(tenths, 1)
}

/// The instant the sample SLA deadlines were written against.
pub fn reference_now() -> DateTime<Utc> {
    at(2025, 12, 15, 9, 0)
}

const AGENTS: [(&str, &str); 3] = [
    ("agent-1", "Luis Phan"),
    ("agent-2", "John Doe"),
    ("agent-3", "Jane Smith"),
];

fn agent_name(id: &str) -> Option<String> {
    AGENTS
        .iter()
        .find(|(a, _)| *a == id)
        .map(|(_, n)| n.to_string())
}

fn projects() -> Vec<Project> {
    let p = |id: &str, name: &str, location: &str, status: ProjectStatus, total: u32, available: u32, from: u64| Project {
        id: id.into(),
        name: name.into(),
        developer: "Phu My Land".into(),
        location: location.into(),
        status,
        total_properties: total,
        available_properties: available,
        price_from: vnd(from),
    };
    vec![
        p("sunrise", "Sunrise City", "District 9, HCMC", ProjectStatus::Active, 500, 245, 2_500),
        p("greenhill", "Green Hill Garden", "District 2, HCMC", ProjectStatus::Active, 200, 89, 3_200),
        p("oceanview", "Ocean View", "Vung Tau", ProjectStatus::Planning, 300, 300, 4_000),
    ]
}

fn properties() -> Vec<Property> {
    let plot = |id: &str, block: &str, area: i64, price: u64, status: PropertyStatus, project: &str| Property {
        id: id.to_lowercase().replace('-', ""),
        plot_number: id.into(),
        block: block.into(),
        area: Decimal::from(area),
        price: vnd(price),
        status,
        project_id: project.into(),
        project_name: projects()
            .into_iter()
            .find(|p| p.id == project)
            .map(|p| p.name),
        reserved_by: None,
        reserved_by_name: None,
        reserved_until: None,
    };
    use PropertyStatus::*;
    let mut out = vec![
        plot("A-001", "A", 120, 2_500, Available, "sunrise"),
        plot("A-002", "A", 150, 3_000, Reserved, "sunrise"),
        plot("A-003", "A", 120, 2_500, DepositPaid, "sunrise"),
        plot("A-004", "A", 180, 4_000, Sold, "sunrise"),
        plot("A-005", "A", 150, 3_000, Available, "sunrise"),
        plot("B-001", "B", 200, 5_000, Available, "sunrise"),
        plot("B-002", "B", 150, 3_800, Available, "sunrise"),
        plot("B-003", "B", 180, 4_500, Reserved, "sunrise"),
        plot("B-004", "B", 160, 4_000, Available, "sunrise"),
        plot("B-005", "B", 180, 4_500, Available, "sunrise"),
        plot("C-001", "C", 220, 5_500, Available, "greenhill"),
        plot("C-002", "C", 200, 5_000, Sold, "greenhill"),
        plot("C-003", "C", 210, 5_200, Sold, "greenhill"),
    ];
    for p in out.iter_mut().filter(|p| p.status == Reserved) {
        p.reserved_by = Some("cust-2".into());
        p.reserved_by_name = Some("Pham Thi Y".into());
        p.reserved_until = Some(at(2025, 12, 16, 9, 0));
    }
    out
}

fn customers() -> Vec<Customer> {
    let c = |id: &str, name: &str, email: &str, phone: &str, min: u64, max: u64, loc: &str, source: &str, agent: &str| {
        Customer {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            budget: Budget {
                min: vnd(min),
                max: vnd(max),
            },
            locations: vec![loc.into()],
            property_types: vec!["Land plot".into()],
            lead_source: source.into(),
            assigned_to: agent.into(),
            assigned_to_name: agent_name(agent),
            created_at: at(2025, 11, 3, 10, 0),
            notes: None,
        }
    };
    vec![
        c("cust-1", "Nguyen Van X", "nvx@example.com", "+84 90 123 4567", 2_000, 3_000, "District 9", "Facebook Ads", "agent-1"),
        c("cust-2", "Pham Thi Y", "pty@example.com", "+84 91 222 3344", 3_000, 5_000, "District 9", "Website", "agent-2"),
        c("cust-3", "Tran Van Z", "tvz@example.com", "+84 93 555 6677", 4_000, 6_000, "District 2", "Referral", "agent-1"),
        c("cust-4", "Le Thi Hoa", "lth@example.com", "+84 98 765 4321", 10_000, 15_000, "Vung Tau", "Walk-in", "agent-3"),
    ]
}

fn deals() -> Vec<Deal> {
    let d = |id: &str, customer: &str, customer_name: &str, property: &str, property_name: &str, stage: DealStage, value: u64, rate: i64, agent: &str, notes: &str| {
        let deal_value = vnd(value);
        let commission_rate = pct(rate);
        Deal {
            id: id.into(),
            customer_id: customer.into(),
            customer_name: Some(customer_name.into()),
            property_id: property.into(),
            property_name: Some(property_name.into()),
            stage,
            deal_value,
            commission: deal_value * commission_rate / Decimal::ONE_HUNDRED,
            commission_rate,
            assigned_agent: agent.into(),
            assigned_agent_name: agent_name(agent),
            notes: notes.into(),
            created_at: at(2025, 11, 10, 9, 0),
            updated_at: at(2025, 12, 12, 16, 30),
        }
    };
    use DealStage::*;
    vec![
        d("deal-1", "cust-1", "Nguyen Van X", "a001", "Plot A-001", New, 2_500, 25, "agent-1", "First site visit booked"),
        d("deal-2", "cust-2", "Pham Thi Y", "a002", "Plot A-002", Qualified, 3_000, 25, "agent-2", ""),
        d("deal-3", "cust-3", "Tran Van Z", "b003", "Plot B-003", Proposal, 4_500, 20, "agent-1", "Wants corner plot"),
        d("deal-4", "cust-4", "Le Thi Hoa", "c001", "Plot C-001", Negotiation, 5_500, 20, "agent-3", "Asking 3% discount"),
        d("deal-5", "cust-1", "Nguyen Van X", "a004", "Plot A-004", Won, 4_000, 30, "agent-1", ""),
        d("deal-6", "cust-3", "Tran Van Z", "c002", "Plot C-002", Won, 5_000, 25, "agent-2", ""),
        d("deal-7", "cust-2", "Pham Thi Y", "a003", "Plot A-003", Won, 2_400, 25, "agent-1", "Deposit received"),
        d("deal-8", "cust-4", "Le Thi Hoa", "b001", "Plot B-001", Lost, 5_000, 20, "agent-3", "Chose another developer"),
        d("deal-9", "cust-4", "Le Thi Hoa", "c003", "Plot C-003", Won, 3_800, 25, "agent-3", "Paid in full"),
    ]
}

fn commissions() -> Vec<Commission> {
    let c = |id: &str, deal: &str, deal_name: &str, property: &str, agent: &str, amount: u64, rate: i64, status: CommissionStatus, day: u32| {
        let requested_at = at(2025, 12, day, 9, 0);
        Commission {
            id: id.into(),
            deal_id: deal.into(),
            deal_name: Some(deal_name.into()),
            property_id: property.into(),
            property_name: Some(format!("Plot {}", property.to_uppercase())),
            agent_id: agent.into(),
            agent_name: agent_name(agent),
            amount: vnd(amount),
            rate: pct(rate),
            status,
            requested_at,
            approved_at: matches!(status, CommissionStatus::Approved | CommissionStatus::Paid)
                .then(|| at(2025, 12, day + 1, 10, 0)),
            paid_at: (status == CommissionStatus::Paid).then(|| at(2025, 12, day + 3, 15, 0)),
            rejected_at: (status == CommissionStatus::Rejected).then(|| at(2025, 12, day + 1, 11, 0)),
            notes: None,
        }
    };
    use CommissionStatus::*;
    vec![
        c("comm-1", "deal-5", "A-004 Purchase", "a004", "agent-1", 120, 30, Paid, 1),
        c("comm-2", "deal-6", "C-002 Purchase", "c002", "agent-2", 125, 25, Paid, 2),
        c("comm-3", "deal-7", "A-003 Purchase", "a003", "agent-1", 60, 25, Approved, 8),
        c("comm-4", "deal-3", "B-003 Booking", "b003", "agent-1", 90, 20, Pending, 10),
        c("comm-5", "deal-4", "C-001 Booking", "c001", "agent-3", 110, 20, Pending, 11),
        c("comm-6", "deal-2", "A-002 Booking", "a002", "agent-2", 75, 25, Pending, 12),
        c("comm-7", "deal-8", "B-001 Purchase", "b001", "agent-3", 100, 20, Rejected, 5),
        c("comm-8", "deal-9", "C-003 Purchase", "c003", "agent-3", 95, 25, Paid, 3),
    ]
}

fn leads() -> Vec<Lead> {
    let l = |id: &str, name: &str, source: &str, status: LeadStatus, agent: &str, deadline: DateTime<Utc>, sla: SlaStatus| Lead {
        id: id.into(),
        customer_name: name.into(),
        email: format!("{}@example.com", id),
        phone: "+84 90 000 0000".into(),
        source: source.into(),
        status,
        assigned_to: agent.into(),
        assigned_to_name: agent_name(agent),
        created_at: at(2025, 12, 14, 8, 0),
        last_contacted_at: None,
        sla_deadline: deadline,
        sla_status: sla,
        notes: None,
    };
    use LeadStatus::*;
    vec![
        l("lead-1", "Nguyen Van X", "Facebook", New, "agent-1", at(2025, 12, 15, 11, 0), SlaStatus::Warning),
        l("lead-2", "Pham Thi Y", "Website", New, "agent-2", at(2025, 12, 15, 9, 24), SlaStatus::Warning),
        l("lead-3", "Tran Van Z", "Referral", Contacted, "agent-1", at(2025, 12, 15, 4, 0), SlaStatus::Overdue),
        l("lead-4", "Vo Minh Khoa", "Google Ads", Qualified, "agent-3", at(2025, 12, 18, 9, 0), SlaStatus::OnTrack),
        l("lead-5", "Dang Thu Trang", "Walk-in", Contacted, "agent-2", at(2025, 12, 17, 15, 0), SlaStatus::OnTrack),
        l("lead-6", "Bui Quoc Anh", "Facebook", Lost, "agent-3", at(2025, 12, 10, 9, 0), SlaStatus::Overdue),
    ]
}

static DATASET: Lazy<Dataset> = Lazy::new(|| Dataset {
    projects: projects(),
    properties: properties(),
    customers: customers(),
    deals: deals(),
    commissions: commissions(),
    leads: leads(),
});

pub fn dataset() -> &'static Dataset {
    &DATASET
}
