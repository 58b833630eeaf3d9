mod pipeline;
mod predict;
mod presenter;
mod sampler;
mod spectrum;
mod web;

#[cfg(test)]
mod testing;

use chrono::Utc;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::pipeline::run_tick;
use crate::predict::{ModelSource, TleCatalog};
use crate::presenter::Snapshot;
use crate::web::Config;

#[derive(Parser)]
#[command(name = "terra-watch")]
#[command(about = "Live ground track and altitude spectrum of an orbiting satellite")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard web server
    Serve {
        #[arg(short, long, default_value = "config.yaml")]
        config: String,
    },
    /// Run a single tick now and print the result
    Sample {
        #[arg(short, long, default_value = "config.yaml")]
        config: String,
        /// Print the full snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check the configuration and that the satellite can be propagated
    Validate {
        #[arg(short, long, default_value = "config.yaml")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(&config).await,
        Commands::Sample { config, json } => sample(&config, json),
        Commands::Validate { config } => validate(&config),
    }
}

fn load_config(path: &str) -> Option<Config> {
    match Config::from_file(path) {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Error loading config {}: {}", path, e);
            None
        }
    }
}

async fn serve(path: &str) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn sample(path: &str, json: bool) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    let catalog = TleCatalog::new(config.tle_folder.clone(), config.satellite.clone());
    let report = match run_tick(&catalog, &config.pipeline, Utc::now(), 0) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Tick failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let snapshot = Snapshot::render(&report, &catalog.describe(), &config.presenter);
    if json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Serialization error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{} at {}", snapshot.satellite, snapshot.generated_at);
        println!("  {}", snapshot.position_text.join("  "));
        println!("  {}", snapshot.peaks_text.join("  "));
        let shown = snapshot.peaks.count();
        if snapshot.all_peaks.len() > shown {
            println!(
                "  ({} of {} peaks above threshold shown)",
                shown,
                snapshot.all_peaks.len()
            );
        }
    }
    ExitCode::SUCCESS
}

fn validate(path: &str) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    let catalog = TleCatalog::new(config.tle_folder.clone(), config.satellite.clone());
    let entry = match catalog.find() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("TLE error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let position = catalog
        .open()
        .and_then(|model| model.position(Utc::now()));
    match position {
        Ok(p) => {
            println!(
                "Config is valid: {} (NORAD {}) from {}",
                entry.info.name, entry.info.norad_id, entry.info.tle_source
            );
            println!(
                "  now at lon {:.2}, lat {:.2}, alt {:.2} km",
                p.longitude_deg, p.latitude_deg, p.altitude_km
            );
            println!(
                "  {} samples every {:?}, refresh every {:?}, {} magnitude",
                config.pipeline.sample_count,
                config.pipeline.step,
                config.pipeline.interval,
                config.pipeline.magnitude
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Propagation error: {}", e);
            ExitCode::FAILURE
        }
    }
}
