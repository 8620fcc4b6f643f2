// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, ensure};
use chrono::TimeDelta;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::countdown::DEFAULT_HOLD_SECS;
use crate::metrics::SlaThresholds;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Plotdesk", "plotdesk"));

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.toml"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationSettings {
    pub hours: u64,
    pub deposit_rate: Decimal, // percent of price
}

impl Default for ReservationSettings {
    fn default() -> Self {
        Self {
            hours: DEFAULT_HOLD_SECS / 3600,
            deposit_rate: Decimal::TEN,
        }
    }
}

impl ReservationSettings {
    pub fn hold_secs(&self) -> Result<u64> {
        self.hours
            .checked_mul(3600)
            .filter(|secs| {
                i64::try_from(*secs)
                    .ok()
                    .and_then(TimeDelta::try_seconds)
                    .is_some()
            })
            .with_context(|| format!("reservation.hours = {} is out of range", self.hours))
    }

    fn validate(&self) -> Result<()> {
        self.hold_secs()?;
        ensure!(
            self.deposit_rate >= Decimal::ZERO && self.deposit_rate <= Decimal::ONE_HUNDRED,
            "reservation.deposit_rate = {} must be between 0 and 100",
            self.deposit_rate
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Targets {
    pub revenue: Decimal,
    pub deals: u32,
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            revenue: Decimal::from(150_000_000_000u64),
            deals: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadSettings {
    pub capacity: usize,
}

impl Default for WorkloadSettings {
    fn default() -> Self {
        Self { capacity: 25 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// JSON dataset to use instead of the built-in fixtures.
    pub data_file: Option<PathBuf>,
    pub currency: String,
    pub sla: SlaThresholds,
    pub reservation: ReservationSettings,
    pub targets: Targets,
    pub workload: WorkloadSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: None,
            currency: "VND".to_string(),
            sla: SlaThresholds::default(),
            reservation: ReservationSettings::default(),
            targets: Targets::default(),
            workload: WorkloadSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Read config at {}", path.display()))?;
        let settings: Settings = toml::from_str(&raw)
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        settings
            .reservation
            .validate()
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        Ok(settings)
    }

    /// An explicit path must exist; the default location may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(p) = explicit {
            debug!(path = %p.display(), "loading config");
            return Self::from_path(p);
        }
        let path = config_path()?;
        if path.exists() {
            debug!(path = %path.display(), "loading config");
            Self::from_path(&path)
        } else {
            debug!("no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
