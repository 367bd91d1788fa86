use smartctl_exporter_core::ExporterConfig;

pub fn run(config: ExporterConfig) {
    let base = format!("http://{}", config.listen_addr());

    println!("smartctl exporter v{}", smartctl_exporter_core::VERSION);
    println!("   {base}");
    println!("   smartctl: {}", config.smartctl_path);
    if config.devices.is_empty() {
        println!("   devices:  every device found by `smartctl --scan`");
    } else {
        println!("   devices:  {}", config.devices.join(", "));
    }
    println!();
    println!("   Endpoints:");
    println!("     GET {:<17} Prometheus metrics", config.metrics_path);
    println!("     GET /health            Liveness check");
    println!("     GET /                  API index");
    println!();

    let source = Box::new(super::smartctl(&config.smartctl_path));
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(smartctl_exporter_server::run_server(config, source)) {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
