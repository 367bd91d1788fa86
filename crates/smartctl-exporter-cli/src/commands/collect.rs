//! One-shot collection: print the exposition text to stdout.

use smartctl_exporter_core::{DeviceReport, PrometheusSink, collect, collect_version};

pub fn run(input: Option<&str>, smartctl_path: &str, devices: &[String]) {
    let result = match input {
        Some(path) => render_file(path),
        None => smartctl_exporter_server::render_scrape(
            &super::smartctl(smartctl_path),
            &super::normalize_devices(devices.to_vec()),
        ),
    };
    match result {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Map a saved smartctl report.
fn render_file(path: &str) -> smartctl_exporter_core::Result<String> {
    let bytes = std::fs::read(path)?;
    let report = DeviceReport::from_slice(&bytes)?;
    let mut sink = PrometheusSink::new();
    collect_version(&report, &mut sink);
    collect(&report, &mut sink);
    sink.render()
}
