//! Device report mapper: one smartctl report in, a stream of observations out.
//!
//! A mapping pass reads fixed paths out of the report and emits observations
//! against the [`catalog`](crate::catalog). Absent fields are never errors;
//! each field either defaults (0, `""`, `"unknown"`) or suppresses its
//! observation, and no sub-step can stop the ones after it.

use crate::catalog::{self, MetricDesc};
use crate::observation::{MetricSink, Observation};
use crate::report::{DeviceReport, ReportNode};

/// Flag names decoded from `ata_smart_attributes.table[].flags`.
pub const ATTRIBUTE_FLAGS: &[&str] = &[
    "prefailure",
    "updated_online",
    "performance",
    "error_rate",
    "event_count",
    "auto_keep",
];

/// Flag names decoded from `ata_device_statistics.pages[].table[].flags`.
pub const STATISTIC_FLAGS: &[&str] = &[
    "valid",
    "normalized",
    "supports_dsn",
    "monitored_condition_met",
];

/// Attribute value types and the path each is read from, in emission order.
const ATTRIBUTE_VALUES: &[(&str, &str)] = &[
    ("value", "value"),
    ("worst", "worst"),
    ("thresh", "thresh"),
    ("raw", "raw.value"),
];

const BLOCK_TYPES: &[&str] = &["logical", "physical"];
const SPEED_TYPES: &[&str] = &["max", "current"];

/// The four strings that identify a device on every observation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceIdentity {
    pub device: String,
    pub serial: String,
    pub family: String,
    pub model: String,
}

impl DeviceIdentity {
    pub fn from_report(root: ReportNode<'_>) -> Self {
        Self {
            device: root.get("device.name").as_str().trim().to_string(),
            serial: root.get("serial_number").as_str().trim().to_string(),
            family: root.get("model_family").as_str().trim().to_string(),
            model: root.get("model_name").as_str().trim().to_string(),
        }
    }

    /// Identity label values in catalog order.
    fn labels(&self) -> Vec<String> {
        vec![
            self.device.clone(),
            self.family.clone(),
            self.model.clone(),
            self.serial.clone(),
        ]
    }

    /// Identity label values followed by `extra`.
    fn labels_with<I, S>(&self, extra: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels = self.labels();
        labels.extend(extra.into_iter().map(Into::into));
        labels
    }
}

/// Comma-joined names of the flags in `candidates` that are present and true
/// under `flags`, in candidate order.
pub fn long_flags(flags: ReportNode<'_>, candidates: &[&str]) -> String {
    candidates
        .iter()
        .filter(|name| {
            let flag = flags.get(name);
            flag.exists() && flag.as_bool()
        })
        .copied()
        .collect::<Vec<_>>()
        .join(",")
}

/// One mapping pass over a single device report.
pub struct Collector<'a> {
    root: ReportNode<'a>,
    device: DeviceIdentity,
}

impl<'a> Collector<'a> {
    pub fn new(report: &'a DeviceReport) -> Self {
        let root = report.root();
        let device = DeviceIdentity::from_report(root);
        log::debug!(
            "Collecting metrics from {}: {}, {}",
            device.device,
            device.family,
            device.model
        );
        Self { root, device }
    }

    pub fn device(&self) -> &DeviceIdentity {
        &self.device
    }

    /// Run every mapping step in order.
    pub fn collect(&self, sink: &mut dyn MetricSink) {
        self.mine_exit_status(sink);
        self.mine_device(sink);
        self.mine_capacity(sink);
        self.mine_interface_speed(sink);
        self.mine_device_attributes(sink);
        self.mine_power_on_seconds(sink);
        self.mine_rotation_rate(sink);
        self.mine_temperatures(sink);
        self.mine_power_cycle_count(sink);
        self.mine_device_statistics(sink);
        self.mine_nvme_health_log(sink);
        self.mine_smart_status(sink);
    }

    fn emit(&self, sink: &mut dyn MetricSink, desc: &'static MetricDesc, value: f64) {
        sink.emit(Observation::new(desc, value, self.device.labels()));
    }

    fn mine_exit_status(&self, sink: &mut dyn MetricSink) {
        self.emit(
            sink,
            &catalog::DEVICE_EXIT_STATUS,
            self.root.get("smartctl.exit_status").as_f64(),
        );
    }

    fn mine_device(&self, sink: &mut dyn MetricSink) {
        let device = self.root.get("device");
        let d = &self.device;
        let labels = vec![
            d.device.clone(),
            device.get("type").as_str(),
            device.get("protocol").as_str(),
            d.family.clone(),
            d.model.clone(),
            d.serial.clone(),
            self.root
                .get("ata_additional_product_id")
                .as_str_or("unknown"),
            self.root.get("firmware_version").as_str(),
            self.root.get("ata_version.string").as_str(),
            self.root.get("sata_version.string").as_str(),
        ];
        sink.emit(Observation::new(&catalog::DEVICE_MODEL, 1.0, labels));
    }

    fn mine_capacity(&self, sink: &mut dyn MetricSink) {
        let capacity = self.root.get("user_capacity");
        self.emit(
            sink,
            &catalog::DEVICE_CAPACITY_BLOCKS,
            capacity.get("blocks").as_f64(),
        );
        self.emit(
            sink,
            &catalog::DEVICE_CAPACITY_BYTES,
            capacity.get("bytes").as_f64(),
        );
        for block_type in BLOCK_TYPES {
            let size = self.root.get(&format!("{block_type}_block_size")).as_f64();
            sink.emit(Observation::new(
                &catalog::DEVICE_BLOCK_SIZE,
                size,
                self.device.labels_with([*block_type]),
            ));
        }
    }

    fn mine_interface_speed(&self, sink: &mut dyn MetricSink) {
        let speed = self.root.get("interface_speed");
        for speed_type in SPEED_TYPES {
            let s = speed.get(speed_type);
            let bps = s.get("units_per_second").as_f64() * s.get("bits_per_unit").as_f64();
            sink.emit(Observation::new(
                &catalog::DEVICE_INTERFACE_SPEED,
                bps,
                self.device.labels_with([*speed_type]),
            ));
        }
    }

    fn mine_device_attributes(&self, sink: &mut dyn MetricSink) {
        for attribute in self.root.get("ata_smart_attributes.table").array() {
            let name = attribute.get("name").as_str().trim().to_string();
            let flags_short = attribute.get("flags.string").as_str().trim().to_string();
            let flags_long = long_flags(attribute.get("flags"), ATTRIBUTE_FLAGS);
            let id = attribute.get("id").as_str();
            for (value_type, path) in ATTRIBUTE_VALUES {
                sink.emit(Observation::new(
                    &catalog::DEVICE_ATTRIBUTE,
                    attribute.get(path).as_f64(),
                    self.device.labels_with([
                        name.as_str(),
                        flags_short.as_str(),
                        flags_long.as_str(),
                        *value_type,
                        id.as_str(),
                    ]),
                ));
            }
        }
    }

    fn mine_power_on_seconds(&self, sink: &mut dyn MetricSink) {
        let pot = self.root.get("power_on_time");
        let seconds = pot.get("hours").as_f64_or(0.0) * 60.0 * 60.0
            + pot.get("minutes").as_f64_or(0.0) * 60.0;
        self.emit(sink, &catalog::DEVICE_POWER_ON_SECONDS, seconds);
    }

    fn mine_rotation_rate(&self, sink: &mut dyn MetricSink) {
        let rate = self.root.get("rotation_rate").as_f64_or(0.0);
        if rate > 0.0 {
            self.emit(sink, &catalog::DEVICE_ROTATION_RATE, rate);
        }
    }

    fn mine_temperatures(&self, sink: &mut dyn MetricSink) {
        let Some(temperatures) = self.root.lookup("temperature") else {
            return;
        };
        for (key, value) in temperatures.entries() {
            sink.emit(Observation::new(
                &catalog::DEVICE_TEMPERATURE,
                value.as_f64(),
                self.device.labels_with([key]),
            ));
        }
    }

    fn mine_power_cycle_count(&self, sink: &mut dyn MetricSink) {
        self.emit(
            sink,
            &catalog::DEVICE_POWER_CYCLE_COUNT,
            self.root.get("power_cycle_count").as_f64(),
        );
    }

    fn mine_device_statistics(&self, sink: &mut dyn MetricSink) {
        for page in self.root.get("ata_device_statistics.pages").array() {
            let table = page.get("name").as_str().trim().to_string();
            for statistic in page.get("table").array() {
                sink.emit(Observation::new(
                    &catalog::DEVICE_STATISTICS,
                    statistic.get("value").as_f64(),
                    self.device.labels_with([
                        table.clone(),
                        statistic.get("name").as_str().trim().to_string(),
                        statistic.get("flags.string").as_str().trim().to_string(),
                        long_flags(statistic.get("flags"), STATISTIC_FLAGS),
                    ]),
                ));
            }
        }
    }

    fn mine_nvme_health_log(&self, sink: &mut dyn MetricSink) {
        let Some(health) = self.root.lookup("nvme_smart_health_information_log") else {
            return;
        };
        self.emit(
            sink,
            &catalog::DEVICE_CRITICAL_WARNING,
            health.get("critical_warning").as_f64(),
        );
        self.emit(
            sink,
            &catalog::DEVICE_AVAILABLE_SPARE,
            health.get("available_spare").as_f64(),
        );
        self.emit(
            sink,
            &catalog::DEVICE_MEDIA_ERRORS,
            health.get("media_errors").as_f64(),
        );
        self.emit(
            sink,
            &catalog::DEVICE_PERCENTAGE_USED,
            health.get("percentage_used").as_f64(),
        );
    }

    fn mine_smart_status(&self, sink: &mut dyn MetricSink) {
        self.emit(
            sink,
            &catalog::DEVICE_SMART_STATUS,
            self.root.get("smart_status.passed").as_f64(),
        );
    }
}

/// Map one report into `sink`.
pub fn collect(report: &DeviceReport, sink: &mut dyn MetricSink) {
    Collector::new(report).collect(sink);
}

/// Emit the `smartctl_version` gauge from a report's `smartctl` section.
pub fn collect_version(report: &DeviceReport, sink: &mut dyn MetricSink) {
    let root = report.root();
    let labels = vec![
        join_version(root.get("json_format_version")),
        join_version(root.get("smartctl.version")),
        root.get("smartctl.svn_revision").as_str(),
        root.get("smartctl.build_info").as_str(),
    ];
    sink.emit(Observation::new(&catalog::SMARTCTL_VERSION, 1.0, labels));
}

/// `[7, 3]` -> `"7.3"`; scalars pass through as text.
fn join_version(node: ReportNode<'_>) -> String {
    let parts = node.array();
    if parts.is_empty() {
        return node.as_str();
    }
    parts
        .iter()
        .map(ReportNode::as_str)
        .collect::<Vec<_>>()
        .join(".")
}
