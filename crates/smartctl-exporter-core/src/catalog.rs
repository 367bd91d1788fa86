//! The fixed catalog of metrics the exporter can emit.
//!
//! Metric names and label names are the contract with downstream dashboards
//! and alerts. Label order here is the order the mapper supplies values in.

use crate::observation::ValueKind;

/// Schema of one exported metric.
#[derive(Debug, PartialEq, Eq)]
pub struct MetricDesc {
    pub name: &'static str,
    pub help: &'static str,
    pub labels: &'static [&'static str],
    pub kind: ValueKind,
}

/// Labels that identify a device on every per-device metric.
pub const IDENTITY_LABELS: &[&str] = &["device", "model_family", "model_name", "serial_number"];

const fn identity_metric(name: &'static str, help: &'static str, kind: ValueKind) -> MetricDesc {
    MetricDesc {
        name,
        help,
        labels: IDENTITY_LABELS,
        kind,
    }
}

// ---------------------------------------------------------------------------
// Exporter-level
// ---------------------------------------------------------------------------

pub static SMARTCTL_VERSION: MetricDesc = MetricDesc {
    name: "smartctl_version",
    help: "smartctl version",
    labels: &[
        "json_format_version",
        "smartctl_version",
        "svn_revision",
        "build_info",
    ],
    kind: ValueKind::Gauge,
};

// ---------------------------------------------------------------------------
// Per-device
// ---------------------------------------------------------------------------

pub static DEVICE_MODEL: MetricDesc = MetricDesc {
    name: "smartctl_device",
    help: "Device info",
    labels: &[
        "device",
        "interface",
        "protocol",
        "model_family",
        "model_name",
        "serial_number",
        "ata_additional_product_id",
        "firmware_version",
        "ata_version",
        "sata_version",
    ],
    kind: ValueKind::Gauge,
};

pub static DEVICE_CAPACITY_BLOCKS: MetricDesc = identity_metric(
    "smartctl_device_capacity_blocks",
    "Device capacity in blocks",
    ValueKind::Gauge,
);

pub static DEVICE_CAPACITY_BYTES: MetricDesc = identity_metric(
    "smartctl_device_capacity_bytes",
    "Device capacity in bytes",
    ValueKind::Gauge,
);

pub static DEVICE_BLOCK_SIZE: MetricDesc = MetricDesc {
    name: "smartctl_device_block_size",
    help: "Device block size",
    labels: &[
        "device",
        "model_family",
        "model_name",
        "serial_number",
        "blocks_type",
    ],
    kind: ValueKind::Gauge,
};

pub static DEVICE_INTERFACE_SPEED: MetricDesc = MetricDesc {
    name: "smartctl_device_interface_speed",
    help: "Device interface speed, bits per second",
    labels: &[
        "device",
        "model_family",
        "model_name",
        "serial_number",
        "speed_type",
    ],
    kind: ValueKind::Gauge,
};

pub static DEVICE_ATTRIBUTE: MetricDesc = MetricDesc {
    name: "smartctl_device_attribute",
    help: "Device attributes",
    labels: &[
        "device",
        "model_family",
        "model_name",
        "serial_number",
        "attribute_name",
        "attribute_flags_short",
        "attribute_flags_long",
        "attribute_value_type",
        "attribute_id",
    ],
    kind: ValueKind::Gauge,
};

pub static DEVICE_POWER_ON_SECONDS: MetricDesc = identity_metric(
    "smartctl_device_power_on_seconds",
    "Device power on seconds",
    ValueKind::Counter,
);

pub static DEVICE_ROTATION_RATE: MetricDesc = identity_metric(
    "smartctl_device_rotation_rate",
    "Device rotation rate",
    ValueKind::Gauge,
);

pub static DEVICE_TEMPERATURE: MetricDesc = MetricDesc {
    name: "smartctl_device_temperature",
    help: "Device temperature celsius",
    labels: &[
        "device",
        "model_family",
        "model_name",
        "serial_number",
        "temperature_type",
    ],
    kind: ValueKind::Gauge,
};

pub static DEVICE_POWER_CYCLE_COUNT: MetricDesc = identity_metric(
    "smartctl_device_power_cycle_count",
    "Device power cycle count",
    ValueKind::Counter,
);

pub static DEVICE_EXIT_STATUS: MetricDesc = identity_metric(
    "smartctl_device_smartctl_exit_status",
    "Exit status of smartctl on device",
    ValueKind::Gauge,
);

pub static DEVICE_STATISTICS: MetricDesc = MetricDesc {
    name: "smartctl_device_statistics",
    help: "Device statistics",
    labels: &[
        "device",
        "model_family",
        "model_name",
        "serial_number",
        "statistic_table",
        "statistic_name",
        "statistic_flags_short",
        "statistic_flags_long",
    ],
    kind: ValueKind::Gauge,
};

// NVMe health log
pub static DEVICE_CRITICAL_WARNING: MetricDesc = identity_metric(
    "smartctl_device_critical_warning",
    "Critical warning counter",
    ValueKind::Gauge,
);

pub static DEVICE_AVAILABLE_SPARE: MetricDesc = identity_metric(
    "smartctl_device_available_spare",
    "Available spare",
    ValueKind::Gauge,
);

pub static DEVICE_MEDIA_ERRORS: MetricDesc = identity_metric(
    "smartctl_device_media_errors",
    "Media errors counter",
    ValueKind::Gauge,
);

pub static DEVICE_PERCENTAGE_USED: MetricDesc = identity_metric(
    "smartctl_device_percentage_used",
    "Percentage Used",
    ValueKind::Gauge,
);

pub static DEVICE_SMART_STATUS: MetricDesc = identity_metric(
    "smartctl_device_smart_status",
    "Smart status",
    ValueKind::Gauge,
);

/// Every metric in the catalog.
pub static ALL: &[&MetricDesc] = &[
    &SMARTCTL_VERSION,
    &DEVICE_MODEL,
    &DEVICE_CAPACITY_BLOCKS,
    &DEVICE_CAPACITY_BYTES,
    &DEVICE_BLOCK_SIZE,
    &DEVICE_INTERFACE_SPEED,
    &DEVICE_ATTRIBUTE,
    &DEVICE_POWER_ON_SECONDS,
    &DEVICE_ROTATION_RATE,
    &DEVICE_TEMPERATURE,
    &DEVICE_POWER_CYCLE_COUNT,
    &DEVICE_EXIT_STATUS,
    &DEVICE_STATISTICS,
    &DEVICE_CRITICAL_WARNING,
    &DEVICE_AVAILABLE_SPARE,
    &DEVICE_MEDIA_ERRORS,
    &DEVICE_PERCENTAGE_USED,
    &DEVICE_SMART_STATUS,
];

/// Look up a descriptor by metric name.
pub fn find(name: &str) -> Option<&'static MetricDesc> {
    ALL.iter().copied().find(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique_and_prefixed() {
        let mut seen = HashSet::new();
        for desc in ALL {
            assert!(desc.name.starts_with("smartctl_"), "{}", desc.name);
            assert!(seen.insert(desc.name), "duplicate metric {}", desc.name);
        }
        assert_eq!(seen.len(), 18);
    }

    #[test]
    fn labels_are_unique_per_metric() {
        for desc in ALL {
            let set: HashSet<_> = desc.labels.iter().collect();
            assert_eq!(set.len(), desc.labels.len(), "{}", desc.name);
        }
    }

    #[test]
    fn per_device_metrics_start_with_device_label() {
        for desc in ALL.iter().filter(|d| d.name.starts_with("smartctl_device")) {
            assert_eq!(desc.labels[0], "device", "{}", desc.name);
            assert!(desc.labels.contains(&"serial_number"), "{}", desc.name);
        }
    }

    #[test]
    fn counters_are_the_cumulative_metrics() {
        let counters: Vec<&str> = ALL
            .iter()
            .filter(|d| d.kind == ValueKind::Counter)
            .map(|d| d.name)
            .collect();
        assert_eq!(
            counters,
            vec![
                "smartctl_device_power_on_seconds",
                "smartctl_device_power_cycle_count"
            ]
        );
    }

    #[test]
    fn find_by_name() {
        assert_eq!(
            find("smartctl_device_temperature").map(|d| d.labels.len()),
            Some(5)
        );
        assert!(find("smartctl_unknown").is_none());
    }
}
