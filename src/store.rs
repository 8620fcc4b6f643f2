// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::PlotdeskError;
use crate::fixtures;
use crate::models::{Commission, Customer, Dataset, Deal, Lead, Project, Property};

/// Where the record collections come from.
pub trait DataSource {
    fn describe(&self) -> String;
    fn load(&self) -> Result<Dataset>;

    /// Clock the records were written against, if they are pinned to one.
    fn reference_now(&self) -> Option<DateTime<Utc>> {
        None
    }
}

pub struct Fixtures;

impl DataSource for Fixtures {
    fn describe(&self) -> String {
        "built-in sample data".to_string()
    }

    fn load(&self) -> Result<Dataset> {
        Ok(fixtures::dataset().clone())
    }

    fn reference_now(&self) -> Option<DateTime<Utc>> {
        Some(fixtures::reference_now())
    }
}

pub struct JsonFile {
    pub path: PathBuf,
}

impl DataSource for JsonFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Dataset> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Read dataset at {}", self.path.display()))?;
        let ds: Dataset = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid dataset JSON in {}", self.path.display()))?;
        Ok(ds)
    }
}

/// `--data` wins over `data_file` in the config; otherwise the fixtures.
pub fn source_for(explicit: Option<&Path>, settings: &Settings) -> Box<dyn DataSource> {
    match explicit.map(Path::to_path_buf).or_else(|| settings.data_file.clone()) {
        Some(path) => Box::new(JsonFile { path }),
        None => Box::new(Fixtures),
    }
}

pub fn load(source: &dyn DataSource) -> Result<Dataset> {
    let ds = source.load()?;
    info!(
        source = %source.describe(),
        projects = ds.projects.len(),
        properties = ds.properties.len(),
        deals = ds.deals.len(),
        commissions = ds.commissions.len(),
        leads = ds.leads.len(),
        "dataset loaded"
    );
    Ok(ds)
}

fn find<'a, T>(
    items: &'a [T],
    kind: &'static str,
    id: &str,
    id_of: impl Fn(&T) -> &str,
) -> Result<&'a T, PlotdeskError> {
    debug!(kind, id, "lookup");
    items
        .iter()
        .find(|x| id_of(*x) == id)
        .ok_or_else(|| PlotdeskError::NotFound {
            kind,
            id: id.to_string(),
        })
}

impl Dataset {
    pub fn project(&self, id: &str) -> Result<&Project, PlotdeskError> {
        find(&self.projects, "Project", id, |p| p.id.as_str())
    }

    pub fn property(&self, id: &str) -> Result<&Property, PlotdeskError> {
        find(&self.properties, "Property", id, |p| p.id.as_str())
    }

    pub fn customer(&self, id: &str) -> Result<&Customer, PlotdeskError> {
        find(&self.customers, "Customer", id, |c| c.id.as_str())
    }

    pub fn deal(&self, id: &str) -> Result<&Deal, PlotdeskError> {
        find(&self.deals, "Deal", id, |d| d.id.as_str())
    }

    pub fn commission(&self, id: &str) -> Result<&Commission, PlotdeskError> {
        find(&self.commissions, "Commission", id, |c| c.id.as_str())
    }

    pub fn lead(&self, id: &str) -> Result<&Lead, PlotdeskError> {
        find(&self.leads, "Lead", id, |l| l.id.as_str())
    }

    /// Agents have no collection of their own; a name is taken from the first
    /// record that carries one for `id`.
    pub fn agent_name(&self, id: &str) -> Result<String, PlotdeskError> {
        let named = |agent: &str, name: &Option<String>| {
            (agent == id).then(|| name.clone()).flatten()
        };
        self.leads
            .iter()
            .find_map(|l| named(l.assigned_to.as_str(), &l.assigned_to_name))
            .or_else(|| {
                self.deals
                    .iter()
                    .find_map(|d| named(d.assigned_agent.as_str(), &d.assigned_agent_name))
            })
            .or_else(|| {
                self.customers
                    .iter()
                    .find_map(|c| named(c.assigned_to.as_str(), &c.assigned_to_name))
            })
            .or_else(|| {
                self.commissions
                    .iter()
                    .find_map(|c| named(c.agent_id.as_str(), &c.agent_name))
            })
            .ok_or_else(|| PlotdeskError::NotFound {
                kind: "Agent",
                id: id.to_string(),
            })
    }

    pub fn properties_in(&self, project_id: &str) -> Vec<&Property> {
        self.properties
            .iter()
            .filter(|p| p.project_id == project_id)
            .collect()
    }
}
