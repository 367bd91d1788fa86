//! # smartctl-exporter-core
//!
//! Turns the JSON report `smartctl --json --xall` prints for one device into a
//! flat set of Prometheus observations: identity, capacity, interface speed,
//! temperatures, error counters, the ATA attribute and device statistics
//! tables, and the NVMe health log.
//!
//! ## Quick Start
//!
//! ```
//! use smartctl_exporter_core::{DeviceReport, Observation, collect};
//!
//! let report = DeviceReport::from_str(r#"{
//!     "device": {"name": "/dev/sda"},
//!     "rotation_rate": 7200,
//!     "smart_status": {"passed": true}
//! }"#).unwrap();
//!
//! let mut observations: Vec<Observation> = Vec::new();
//! collect(&report, &mut observations);
//! assert!(observations.iter().any(|o| o.name() == "smartctl_device_rotation_rate"));
//! ```
//!
//! ## Architecture
//!
//! smartctl → [`DeviceReport`] → [`Collector`] → [`MetricSink`] → exposition
//!
//! The [`catalog`] fixes every metric name and label order. The mapper only
//! reads the report; missing fields default or suppress their observation
//! and are never errors.

pub mod catalog;
pub mod config;
pub mod error;
pub mod exposition;
pub mod mapper;
pub mod observation;
pub mod report;
pub mod scrape;
pub mod smartctl;

pub use catalog::MetricDesc;
pub use config::ExporterConfig;
pub use error::{Error, Result};
pub use exposition::PrometheusSink;
pub use mapper::{Collector, DeviceIdentity, collect, collect_version, long_flags};
pub use observation::{MetricSink, Observation, ValueKind};
pub use report::{DeviceReport, ReportNode};
pub use scrape::{ScrapeSummary, scrape};
pub use smartctl::{ReportSource, SmartctlCommand};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
