// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::debug;

use crate::config::Settings;
use crate::models::Dataset;
use crate::store;
use crate::utils::parse_instant;

/// What every command works against: the loaded records, settings and the clock.
#[derive(Debug, Clone)]
pub struct Desk {
    pub data: Dataset,
    pub settings: Settings,
    pub now: DateTime<Utc>,
}

impl Desk {
    pub fn new(data: Dataset, settings: Settings, now: DateTime<Utc>) -> Self {
        Self {
            data,
            settings,
            now,
        }
    }

    /// Resolves config, data source and clock from the global flags.
    pub fn open(m: &clap::ArgMatches) -> Result<Self> {
        let settings = Settings::load(m.get_one::<String>("config").map(Path::new))?;
        let source = store::source_for(m.get_one::<String>("data").map(Path::new), &settings);
        let data = store::load(source.as_ref())?;
        let now = match m.get_one::<String>("now") {
            Some(s) => parse_instant(s)?,
            None => source.reference_now().unwrap_or_else(Utc::now),
        };
        debug!(%now, "clock");
        Ok(Self::new(data, settings, now))
    }
}
