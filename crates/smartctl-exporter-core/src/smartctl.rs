//! Running smartctl and reading its JSON output.

use std::process::{Command, Stdio};

use crate::error::{Error, Result};
use crate::report::DeviceReport;

/// Where device reports come from.
pub trait ReportSource: Send + Sync {
    /// Read the full report for one device.
    fn read_device(&self, device: &str) -> Result<DeviceReport>;

    /// List the devices smartctl can see.
    fn scan(&self) -> Result<Vec<String>>;
}

/// Invokes a local smartctl binary.
#[derive(Debug, Clone)]
pub struct SmartctlCommand {
    path: String,
}

impl SmartctlCommand {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run smartctl with `args` and return stdout.
    ///
    /// The exit status is not checked: smartctl sets bits in it for failing
    /// health checks and logged errors while still printing a full report.
    fn run(&self, args: &[&str]) -> Result<Vec<u8>> {
        log::debug!("running {} {}", self.path, args.join(" "));
        let output = Command::new(&self.path)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| Error::Spawn {
                program: self.path.clone(),
                source,
            })?;
        if !output.status.success() {
            log::debug!("{} exited with {}", self.path, output.status);
        }
        Ok(output.stdout)
    }
}

impl Default for SmartctlCommand {
    fn default() -> Self {
        Self::new("smartctl")
    }
}

impl ReportSource for SmartctlCommand {
    fn read_device(&self, device: &str) -> Result<DeviceReport> {
        let stdout = self.run(&["--json", "--xall", device])?;
        parse_device_output(device, &stdout)
    }

    fn scan(&self) -> Result<Vec<String>> {
        let stdout = self.run(&["--json", "--scan"])?;
        parse_scan_output(&stdout)
    }
}

/// Turn raw `smartctl --json --xall` stdout into a report.
pub fn parse_device_output(device: &str, stdout: &[u8]) -> Result<DeviceReport> {
    if stdout.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::Parse {
            device: device.to_string(),
            reason: "empty output".to_string(),
        });
    }
    DeviceReport::from_slice(stdout).map_err(|e| Error::Parse {
        device: device.to_string(),
        reason: e.to_string(),
    })
}

/// Extract `devices[].name` from `smartctl --json --scan` stdout.
pub fn parse_scan_output(stdout: &[u8]) -> Result<Vec<String>> {
    let report = DeviceReport::from_slice(stdout)?;
    let devices = report
        .root()
        .get("devices")
        .array()
        .into_iter()
        .map(|d| d.get("name").as_str().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    Ok(devices)
}
