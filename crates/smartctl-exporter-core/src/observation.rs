//! Typed, labeled metric observations and the sinks that receive them.

use crate::catalog::MetricDesc;

/// Prometheus value type of an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Gauge,
    Counter,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gauge => write!(f, "gauge"),
            Self::Counter => write!(f, "counter"),
        }
    }
}

/// One emitted `(metric, value, labels)` tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub desc: &'static MetricDesc,
    pub value: f64,
    pub kind: ValueKind,
    /// Label values in the order declared by `desc.labels`.
    pub labels: Vec<String>,
}

impl Observation {
    /// Build an observation for `desc`.
    ///
    /// # Panics
    ///
    /// Panics if the number of label values differs from the descriptor's
    /// label names.
    pub fn new(desc: &'static MetricDesc, value: f64, labels: Vec<String>) -> Self {
        assert_eq!(
            labels.len(),
            desc.labels.len(),
            "metric {} expects labels {:?}, got {} values",
            desc.name,
            desc.labels,
            labels.len()
        );
        Self {
            desc,
            value,
            kind: desc.kind,
            labels,
        }
    }

    pub fn name(&self) -> &'static str {
        self.desc.name
    }

    /// Value of a label by name.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.desc
            .labels
            .iter()
            .position(|l| *l == name)
            .map(|i| self.labels[i].as_str())
    }
}

/// Receiver of observations produced by a mapping pass.
pub trait MetricSink {
    fn emit(&mut self, observation: Observation);
}

impl MetricSink for Vec<Observation> {
    fn emit(&mut self, observation: Observation) {
        self.push(observation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn identity() -> Vec<String> {
        ["/dev/sda", "Family", "Model", "SN1"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn observation_inherits_kind_from_descriptor() {
        let obs = Observation::new(&catalog::DEVICE_POWER_CYCLE_COUNT, 12.0, identity());
        assert_eq!(obs.kind, ValueKind::Counter);
        assert_eq!(obs.name(), "smartctl_device_power_cycle_count");
    }

    #[test]
    fn label_lookup_by_name() {
        let obs = Observation::new(&catalog::DEVICE_SMART_STATUS, 1.0, identity());
        assert_eq!(obs.label("serial_number"), Some("SN1"));
        assert_eq!(obs.label("device"), Some("/dev/sda"));
        assert_eq!(obs.label("nope"), None);
    }

    #[test]
    #[should_panic(expected = "smartctl_device_block_size")]
    fn label_count_mismatch_panics() {
        let _ = Observation::new(&catalog::DEVICE_BLOCK_SIZE, 512.0, identity());
    }

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<Observation> = Vec::new();
        sink.emit(Observation::new(&catalog::DEVICE_SMART_STATUS, 1.0, identity()));
        sink.emit(Observation::new(&catalog::DEVICE_ROTATION_RATE, 7200.0, identity()));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].value, 7200.0);
    }

    #[test]
    fn value_kind_display() {
        assert_eq!(ValueKind::Gauge.to_string(), "gauge");
        assert_eq!(ValueKind::Counter.to_string(), "counter");
    }
}
