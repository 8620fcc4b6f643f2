// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PlotdeskError;

/// Shared surface of the status enums: ordered variant list, wire name and label.
pub trait StatusKind: Copy + Eq + fmt::Debug + 'static {
    const KIND: &'static str;
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;
    fn label(&self) -> &'static str;

    fn parse(s: &str) -> Result<Self, PlotdeskError> {
        let wanted = s.trim().to_uppercase().replace(['-', ' '], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == wanted)
            .ok_or_else(|| PlotdeskError::UnknownStatus {
                kind: Self::KIND,
                value: s.to_string(),
            })
    }
}

macro_rules! status_enum {
    ($name:ident, $kind:literal, { $($variant:ident => ($wire:literal, $label:literal)),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant),+
        }

        impl StatusKind for $name {
            const KIND: &'static str = $kind;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = PlotdeskError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as StatusKind>::parse(s)
            }
        }
    };
}

status_enum!(ProjectStatus, "project status", {
    Active => ("ACTIVE", "Active"),
    Planning => ("PLANNING", "Planning"),
    Completed => ("COMPLETED", "Completed"),
});

status_enum!(PropertyStatus, "property status", {
    Available => ("AVAILABLE", "Available"),
    Reserved => ("RESERVED", "Reserved"),
    DepositPaid => ("DEPOSIT_PAID", "Deposit Paid"),
    Sold => ("SOLD", "Sold"),
});

status_enum!(DealStage, "deal stage", {
    New => ("NEW", "New"),
    Qualified => ("QUALIFIED", "Qualified"),
    Proposal => ("PROPOSAL", "Proposal"),
    Negotiation => ("NEGOTIATION", "Negotiation"),
    Won => ("WON", "Won"),
    Lost => ("LOST", "Lost"),
});

status_enum!(CommissionStatus, "commission status", {
    Pending => ("PENDING", "Pending"),
    Approved => ("APPROVED", "Approved"),
    Paid => ("PAID", "Paid"),
    Rejected => ("REJECTED", "Rejected"),
});

status_enum!(LeadStatus, "lead status", {
    New => ("NEW", "New"),
    Contacted => ("CONTACTED", "Contacted"),
    Qualified => ("QUALIFIED", "Qualified"),
    Lost => ("LOST", "Lost"),
});

status_enum!(SlaStatus, "SLA status", {
    OnTrack => ("ON_TRACK", "On Track"),
    Warning => ("WARNING", "Warning"),
    Overdue => ("OVERDUE", "Overdue"),
});

impl DealStage {
    pub fn is_closed(&self) -> bool {
        matches!(self, DealStage::Won | DealStage::Lost)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub developer: String,
    pub location: String,
    pub status: ProjectStatus,
    pub total_properties: u32,
    pub available_properties: u32,
    pub price_from: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub plot_number: String,
    pub block: String,
    pub area: Decimal, // m²
    pub price: Decimal,
    pub status: PropertyStatus,
    pub project_id: String,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub reserved_by: Option<String>,
    #[serde(default)]
    pub reserved_by_name: Option<String>,
    #[serde(default)]
    pub reserved_until: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Budget {
    pub min: Decimal,
    pub max: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub property_types: Vec<String>,
    pub lead_source: String,
    pub assigned_to: String,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: String,
    pub customer_id: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub property_id: String,
    #[serde(default)]
    pub property_name: Option<String>,
    pub stage: DealStage,
    pub deal_value: Decimal,
    pub commission: Decimal,
    pub commission_rate: Decimal, // percent
    pub assigned_agent: String,
    #[serde(default)]
    pub assigned_agent_name: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commission {
    pub id: String,
    pub deal_id: String,
    #[serde(default)]
    pub deal_name: Option<String>,
    pub property_id: String,
    #[serde(default)]
    pub property_name: Option<String>,
    pub agent_id: String,
    #[serde(default)]
    pub agent_name: Option<String>,
    pub amount: Decimal,
    pub rate: Decimal, // percent
    pub status: CommissionStatus,
    pub requested_at: DateTime<Utc>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rejected_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
    pub status: LeadStatus,
    pub assigned_to: String,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_contacted_at: Option<DateTime<Utc>>,
    pub sla_deadline: DateTime<Utc>,
    pub sla_status: SlaStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Every collection the tool works on. Passed explicitly to each calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub projects: Vec<Project>,
    pub properties: Vec<Property>,
    pub customers: Vec<Customer>,
    pub deals: Vec<Deal>,
    pub commissions: Vec<Commission>,
    pub leads: Vec<Lead>,
}
