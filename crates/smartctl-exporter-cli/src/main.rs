//! CLI for smartctl-exporter: SMART device health as Prometheus metrics.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "smartctl-exporter")]
#[command(about = "smartctl-exporter: SMART device health as Prometheus metrics")]
#[command(version = smartctl_exporter_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve Prometheus metrics over HTTP, running smartctl on every scrape
    Serve {
        /// JSON config file; replaces the other serve flags
        #[arg(
            long,
            conflicts_with_all = ["port", "host", "metrics_path", "smartctl_path", "devices"]
        )]
        config: Option<String>,

        /// Port to listen on
        #[arg(long, default_value_t = smartctl_exporter_core::config::DEFAULT_PORT)]
        port: u16,

        /// Bind address
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// URL path for the metrics endpoint
        #[arg(long, default_value = "/metrics")]
        metrics_path: String,

        /// smartctl binary
        #[arg(long, default_value = "smartctl")]
        smartctl_path: String,

        /// Device to read (repeatable). Default: every device smartctl --scan finds
        #[arg(long = "device")]
        devices: Vec<String>,
    },

    /// Print the metrics once and exit
    Collect {
        /// Map a saved `smartctl --json --xall` report instead of running smartctl
        #[arg(long, conflicts_with = "devices")]
        input: Option<String>,

        /// smartctl binary
        #[arg(long, default_value = "smartctl")]
        smartctl_path: String,

        /// Device to read (repeatable). Default: every device smartctl --scan finds
        #[arg(long = "device")]
        devices: Vec<String>,
    },

    /// List the devices smartctl can see
    Scan {
        /// smartctl binary
        #[arg(long, default_value = "smartctl")]
        smartctl_path: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config: Some(path),
            ..
        } => commands::serve::run(commands::load_config(&path)),
        Commands::Serve {
            config: None,
            port,
            host,
            metrics_path,
            smartctl_path,
            devices,
        } => commands::serve::run(commands::exporter_config(
            &smartctl_path,
            devices,
            &host,
            port,
            &metrics_path,
        )),
        Commands::Collect {
            input,
            smartctl_path,
            devices,
        } => commands::collect::run(input.as_deref(), &smartctl_path, &devices),
        Commands::Scan { smartctl_path } => commands::scan::run(&smartctl_path),
    }
}
