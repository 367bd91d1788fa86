pub mod collect;
pub mod scan;
pub mod serve;

use smartctl_exporter_core::{ExporterConfig, SmartctlCommand};

/// Assemble the exporter configuration from command-line flags.
pub fn exporter_config(
    smartctl_path: &str,
    devices: Vec<String>,
    host: &str,
    port: u16,
    metrics_path: &str,
) -> ExporterConfig {
    ExporterConfig {
        smartctl_path: smartctl_path.to_string(),
        devices: normalize_devices(devices),
        host: host.to_string(),
        port,
        metrics_path: normalize_path(metrics_path),
    }
}

/// Load the exporter configuration from a JSON file, exiting on failure.
pub fn load_config(path: &str) -> ExporterConfig {
    match ExporterConfig::from_file(path) {
        Ok(config) => normalize_config(config),
        Err(e) => {
            eprintln!("Error reading config {path}: {e}");
            std::process::exit(1);
        }
    }
}

/// Apply the same cleanup to a loaded config as to command-line flags.
pub fn normalize_config(config: ExporterConfig) -> ExporterConfig {
    ExporterConfig {
        devices: normalize_devices(config.devices),
        metrics_path: normalize_path(&config.metrics_path),
        ..config
    }
}

/// Split comma-separated device lists and drop blanks and duplicates,
/// keeping first-seen order.
pub fn normalize_devices(devices: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for d in devices.iter().flat_map(|d| d.split(',')) {
        let d = d.trim();
        if !d.is_empty() && !out.iter().any(|seen| seen == d) {
            out.push(d.to_string());
        }
    }
    out
}

/// Metrics paths must be absolute and must not shadow the index or health
/// routes.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    let absolute = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    smartctl_exporter_server::metrics_route(&absolute).to_string()
}

pub fn smartctl(path: &str) -> SmartctlCommand {
    SmartctlCommand::new(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // normalize_devices tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_devices_split_on_commas() {
        let devices = normalize_devices(vec!["/dev/sda,/dev/sdb".to_string()]);
        assert_eq!(devices, vec!["/dev/sda", "/dev/sdb"]);
    }

    #[test]
    fn test_devices_dedup_and_trim() {
        let devices = normalize_devices(vec![
            " /dev/sda ".to_string(),
            "/dev/sda".to_string(),
            "".to_string(),
            "/dev/nvme0".to_string(),
        ]);
        assert_eq!(devices, vec!["/dev/sda", "/dev/nvme0"]);
    }

    #[test]
    fn test_devices_empty_means_scan() {
        assert!(normalize_devices(Vec::new()).is_empty());
    }

    // -----------------------------------------------------------------------
    // normalize_path tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_path_adds_leading_slash() {
        assert_eq!(normalize_path("metrics"), "/metrics");
    }

    #[test]
    fn test_path_strips_trailing_slash() {
        assert_eq!(normalize_path("/smart/metrics/"), "/smart/metrics");
    }

    #[test]
    fn test_path_root_falls_back_to_default() {
        assert_eq!(normalize_path("/"), "/metrics");
        assert_eq!(normalize_path(""), "/metrics");
    }

    #[test]
    fn test_path_health_falls_back_to_default() {
        assert_eq!(normalize_path("/health"), "/metrics");
        assert_eq!(normalize_path("health/"), "/metrics");
    }

    #[test]
    fn test_loaded_config_is_normalized() {
        let config = normalize_config(ExporterConfig {
            devices: vec!["/dev/sda,/dev/sda".to_string()],
            metrics_path: "/health".to_string(),
            ..ExporterConfig::default()
        });
        assert_eq!(config.devices, vec!["/dev/sda"]);
        assert_eq!(config.metrics_path, "/metrics");
        assert_eq!(config.port, 9633);
    }

    #[test]
    fn test_exporter_config_from_flags() {
        let config = exporter_config(
            "/usr/sbin/smartctl",
            vec!["/dev/sda".to_string()],
            "127.0.0.1",
            9100,
            "metrics",
        );
        assert_eq!(config.smartctl_path, "/usr/sbin/smartctl");
        assert_eq!(config.devices, vec!["/dev/sda"]);
        assert_eq!(config.listen_addr(), "127.0.0.1:9100");
        assert_eq!(config.metrics_path, "/metrics");
    }
}
