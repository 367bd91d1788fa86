//! One scrape: read every device in turn and map it into a sink.

use crate::mapper::{Collector, collect_version};
use crate::observation::MetricSink;
use crate::smartctl::ReportSource;

/// What happened during a scrape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Devices that were mapped.
    pub devices: Vec<String>,
    /// Devices whose report could not be read.
    pub failed: Vec<String>,
}

/// Read and map `devices`, or every scanned device when `devices` is empty.
///
/// Devices are handled one after another, each with its own mapper. A device
/// whose report cannot be read is logged and skipped.
pub fn scrape(
    source: &dyn ReportSource,
    devices: &[String],
    sink: &mut dyn MetricSink,
) -> ScrapeSummary {
    let mut summary = ScrapeSummary::default();

    let devices = if devices.is_empty() {
        match source.scan() {
            Ok(found) => found,
            Err(e) => {
                log::error!("device scan failed: {e}");
                return summary;
            }
        }
    } else {
        devices.to_vec()
    };
    if devices.is_empty() {
        log::warn!("no devices to scrape");
    }

    let mut version_emitted = false;
    for device in devices {
        let report = match source.read_device(&device) {
            Ok(report) => report,
            Err(e) => {
                log::warn!("skipping {device}: {e}");
                summary.failed.push(device);
                continue;
            }
        };
        if !version_emitted {
            collect_version(&report, sink);
            version_emitted = true;
        }
        Collector::new(&report).collect(sink);
        summary.devices.push(device);
    }

    log::info!(
        "scraped {} device(s), {} failed",
        summary.devices.len(),
        summary.failed.len()
    );
    summary
}
