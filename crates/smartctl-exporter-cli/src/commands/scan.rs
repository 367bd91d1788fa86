use smartctl_exporter_core::ReportSource;

pub fn run(smartctl_path: &str) {
    let devices = match super::smartctl(smartctl_path).scan() {
        Ok(devices) => devices,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    println!("Found {} device(s):\n", devices.len());
    for device in &devices {
        println!("  {device}");
    }
    if devices.is_empty() {
        println!("  (none found)");
    }
}
