//! Prometheus text exposition for a single scrape.
//!
//! Each scrape gets a fresh [`PrometheusSink`]; metric vectors are registered
//! lazily the first time an observation for them arrives, so metrics with no
//! observations (e.g. NVMe health on a SATA disk) are left out of the output.

use std::collections::{HashMap, HashSet};

use prometheus::{CounterVec, Encoder, GaugeVec, Opts, Registry, TextEncoder};

use crate::catalog::MetricDesc;
use crate::error::Result;
use crate::observation::{MetricSink, Observation, ValueKind};

enum Family {
    Gauge(GaugeVec),
    Counter(CounterVec),
}

/// Observation sink backed by a per-scrape Prometheus registry.
pub struct PrometheusSink {
    registry: Registry,
    families: HashMap<&'static str, Family>,
    series: HashSet<(&'static str, Vec<String>)>,
    duplicates: usize,
}

impl PrometheusSink {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            families: HashMap::new(),
            series: HashSet::new(),
            duplicates: 0,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Observations that repeated a series already set in this scrape.
    /// The later value wins.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    fn register(&self, desc: &'static MetricDesc) -> prometheus::Result<Family> {
        let opts = Opts::new(desc.name, desc.help);
        let family = match desc.kind {
            ValueKind::Gauge => {
                let vec = GaugeVec::new(opts, desc.labels)?;
                self.registry.register(Box::new(vec.clone()))?;
                Family::Gauge(vec)
            }
            ValueKind::Counter => {
                let vec = CounterVec::new(opts, desc.labels)?;
                self.registry.register(Box::new(vec.clone()))?;
                Family::Counter(vec)
            }
        };
        Ok(family)
    }

    fn record(&mut self, observation: &Observation) -> prometheus::Result<()> {
        let desc = observation.desc;
        if !self.families.contains_key(desc.name) {
            let family = self.register(desc)?;
            self.families.insert(desc.name, family);
        }
        if !self
            .series
            .insert((desc.name, observation.labels.clone()))
        {
            self.duplicates += 1;
            log::warn!(
                "duplicate {} series {:?}, overwriting earlier value",
                desc.name,
                observation.labels
            );
        }
        let labels: Vec<&str> = observation.labels.iter().map(String::as_str).collect();
        match &self.families[desc.name] {
            Family::Gauge(vec) => vec
                .get_metric_with_label_values(&labels)?
                .set(observation.value),
            Family::Counter(vec) => {
                let counter = vec.get_metric_with_label_values(&labels)?;
                // Fresh registry per scrape: the counter starts at zero.
                counter.reset();
                counter.inc_by(observation.value.max(0.0));
            }
        }
        Ok(())
    }

    /// Render everything recorded so far in the text exposition format.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl Default for PrometheusSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSink for PrometheusSink {
    fn emit(&mut self, observation: Observation) {
        if let Err(e) = self.record(&observation) {
            log::warn!("dropping {} observation: {e}", observation.name());
        }
    }
}
