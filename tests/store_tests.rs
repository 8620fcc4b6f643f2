// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use plotdesk::config::Settings;
use plotdesk::error::PlotdeskError;
use plotdesk::fixtures::{dataset, reference_now};
use plotdesk::models::{ProjectStatus, PropertyStatus};
use plotdesk::store::{self, DataSource, Fixtures, JsonFile};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const SMALL_DATASET: &str = r#"{
  "projects": [
    {"id": "p1", "name": "Lakeside", "developer": "Acme", "location": "Thu Duc",
     "status": "ACTIVE", "totalProperties": 2, "availableProperties": 1, "priceFrom": "1500000000"}
  ],
  "properties": [
    {"id": "p1-1", "plotNumber": "L-01", "block": "L", "area": "100", "price": "1500000000",
     "status": "AVAILABLE", "projectId": "p1"},
    {"id": "p1-2", "plotNumber": "L-02", "block": "L", "area": "120", "price": "1800000000",
     "status": "DEPOSIT_PAID", "projectId": "p1", "projectName": "Lakeside"}
  ]
}"#;

#[test]
fn json_file_loads_partial_dataset() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(SMALL_DATASET.as_bytes()).unwrap();
    let source = JsonFile {
        path: tmp.path().to_path_buf(),
    };
    let ds = store::load(&source).unwrap();
    assert!(source.reference_now().is_none());

    assert_eq!(ds.projects.len(), 1);
    assert_eq!(ds.projects[0].status, ProjectStatus::Active);
    assert_eq!(ds.properties.len(), 2);
    assert_eq!(ds.properties[1].status, PropertyStatus::DepositPaid);
    assert_eq!(ds.properties[0].price, Decimal::from(1_500_000_000u64));
    assert!(ds.properties[0].project_name.is_none());
    assert!(ds.deals.is_empty());
    assert!(ds.leads.is_empty());
    assert_eq!(ds.properties_in("p1").len(), 2);
}

#[test]
fn json_file_reports_bad_input() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(b"{ not json").unwrap();
    let source = JsonFile {
        path: tmp.path().to_path_buf(),
    };
    let err = store::load(&source).unwrap_err();
    assert!(err.to_string().contains("Invalid dataset JSON"));

    let missing = JsonFile {
        path: tmp.path().with_extension("missing"),
    };
    assert!(store::load(&missing).is_err());
}

#[test]
fn source_selection_prefers_flag_then_config() {
    let mut settings = Settings::default();
    assert_eq!(
        store::source_for(None, &settings).describe(),
        "built-in sample data"
    );

    settings.data_file = Some("from-config.json".into());
    assert_eq!(
        store::source_for(None, &settings).describe(),
        "from-config.json"
    );
    assert_eq!(
        store::source_for(Some(Path::new("from-flag.json")), &settings).describe(),
        "from-flag.json"
    );
}

#[test]
fn fixtures_are_pinned_to_reference_clock() {
    assert_eq!(Fixtures.reference_now(), Some(reference_now()));
    let ds = Fixtures.load().unwrap();
    assert_eq!(ds.properties.len(), dataset().properties.len());
}

#[test]
fn lookups_report_missing_ids() {
    let ds = dataset();
    assert_eq!(ds.project("sunrise").unwrap().name, "Sunrise City");
    assert_eq!(ds.customer("cust-2").unwrap().name, "Pham Thi Y");
    assert_eq!(ds.lead("lead-3").unwrap().customer_name, "Tran Van Z");
    assert_eq!(ds.deal("deal-9").unwrap().property_id, "c003");

    let err = ds.property("zzz").unwrap_err();
    assert_eq!(
        err,
        PlotdeskError::NotFound {
            kind: "Property",
            id: "zzz".into()
        }
    );
    assert_eq!(err.to_string(), "Property 'zzz' not found");
    assert!(ds.deal("deal-0").is_err());
    assert!(ds.properties_in("nowhere").is_empty());
}

#[test]
fn agent_names_come_from_assigned_records() {
    let ds = dataset();
    assert_eq!(ds.agent_name("agent-1").unwrap(), "Luis Phan");
    assert_eq!(ds.agent_name("agent-3").unwrap(), "Jane Smith");
    assert_eq!(
        ds.agent_name("agent-9").unwrap_err(),
        PlotdeskError::NotFound {
            kind: "Agent",
            id: "agent-9".into()
        }
    );
}
