// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::PlotdeskError;
use crate::models::{Property, PropertyStatus, StatusKind};

pub const DEFAULT_HOLD_SECS: u64 = 24 * 60 * 60;

/// Seconds left on a reservation hold. Only advances while open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationCountdown {
    duration: u64,
    remaining: u64,
    open: bool,
}

impl Default for ReservationCountdown {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_SECS)
    }
}

impl ReservationCountdown {
    pub fn new(duration: u64) -> Self {
        Self {
            duration,
            remaining: duration,
            open: false,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Stops ticking; the remaining time is kept until `reset`.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn reset(&mut self) {
        self.remaining = self.duration;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn tick(&mut self) {
        if self.open && self.remaining > 0 {
            self.remaining -= 1;
        }
    }

    /// Same as `ticks` calls to `tick`.
    pub fn advance(&mut self, ticks: u64) {
        if self.open {
            self.remaining = self.remaining.saturating_sub(ticks);
        }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn display(&self) -> String {
        format_hms(self.remaining)
    }
}

pub fn format_hms(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

#[derive(Debug, Clone, Serialize)]
pub struct Reservation {
    pub property: Property,
    pub deposit_due: Decimal,
    pub hold_until: DateTime<Utc>,
}

/// Places a hold on an available plot. Returns a reserved copy; the input is untouched.
pub fn reserve(
    property: &Property,
    customer_id: &str,
    customer_name: Option<&str>,
    now: DateTime<Utc>,
    hold_secs: u64,
    deposit_rate: Decimal,
) -> Result<Reservation, PlotdeskError> {
    if property.status != PropertyStatus::Available {
        return Err(PlotdeskError::NotAvailable {
            id: property.id.clone(),
            status: property.status.as_str(),
        });
    }
    let hold_until = i64::try_from(hold_secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|hold| now.checked_add_signed(hold))
        .ok_or(PlotdeskError::HoldOutOfRange(hold_secs))?;
    let mut held = property.clone();
    held.status = PropertyStatus::Reserved;
    held.reserved_by = Some(customer_id.to_string());
    held.reserved_by_name = customer_name.map(str::to_string);
    held.reserved_until = Some(hold_until);
    Ok(Reservation {
        deposit_due: (property.price * deposit_rate / Decimal::ONE_HUNDRED).round_dp(0),
        property: held,
        hold_until,
    })
}

/// Hands a lapsed hold back to inventory.
pub fn release(property: &Property) -> Property {
    let mut freed = property.clone();
    freed.status = PropertyStatus::Available;
    freed.reserved_by = None;
    freed.reserved_by_name = None;
    freed.reserved_until = None;
    freed
}
