//! Hydromet Flood Status Service - CLI entry point
//!
//! Retrieves flood status data (lake levels, river conditions, floodgate
//! operations, operations narrative) from the LCRA Hydromet API,
//! normalizes the feed's inconsistent field formats into typed records,
//! and either prints them as JSON or serves them over HTTP.
//!
//! Usage:
//!   hydromet_service get --report              # Full flood operations report
//!   hydromet_service get --lake-levels         # Current lake levels
//!   hydromet_service get --river-conditions    # Current river conditions
//!   hydromet_service get --floodgate-operations
//!   hydromet_service serve [--host HOST] [--port PORT]  # HTTP API (default 0.0.0.0:8080)
//!
//! Environment:
//!   HYDROMET_BASE_URL - override the API base URL (also read from .env)

use hydromet_service::config::{self, ServiceConfig};
use hydromet_service::endpoint;
use hydromet_service::ingest::lcra;
use hydromet_service::report::build_report;
use serde::Serialize;
use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    let Some(command) = args.get(1) else {
        print_usage(&args[0]);
        process::exit(1);
    };

    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            process::exit(1);
        }
    };

    match command.as_str() {
        "get" => run_get(&args, config),
        "serve" => run_serve(&args, config),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage(&args[0]);
            process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("🌊 Hydromet Flood Status Service");
    eprintln!();
    eprintln!("Usage:");
    eprintln!(
        "  {} get [--report] [--lake-levels] [--river-conditions] [--floodgate-operations]",
        program
    );
    eprintln!("  {} serve [--host HOST] [--port PORT]", program);
}

// ---------------------------------------------------------------------------
// get
// ---------------------------------------------------------------------------

fn run_get(args: &[String], config: ServiceConfig) {
    let mut report = false;
    let mut lake_levels = false;
    let mut river_conditions = false;
    let mut floodgate_operations = false;

    for arg in &args[2..] {
        match arg.as_str() {
            "--report" => report = true,
            "--lake-levels" => lake_levels = true,
            "--river-conditions" => river_conditions = true,
            "--floodgate-operations" => floodgate_operations = true,
            _ => {
                eprintln!("Unknown argument: {}", arg);
                print_usage(&args[0]);
                process::exit(1);
            }
        }
    }

    if !(report || lake_levels || river_conditions || floodgate_operations) {
        eprintln!("Error: get requires at least one data flag");
        print_usage(&args[0]);
        process::exit(1);
    }

    let client = match lcra::build_client(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    };

    if report {
        print_json(&build_report(&client, &config));
    }
    if lake_levels {
        print_json(&lcra::scrape_lake_levels(&client, &config));
    }
    if river_conditions {
        print_json(&lcra::scrape_river_conditions(&client, &config));
    }
    if floodgate_operations {
        print_json(&lcra::scrape_floodgate_operations(&client, &config));
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("❌ Failed to serialize output: {}", e);
            process::exit(1);
        }
    }
}

// ---------------------------------------------------------------------------
// serve
// ---------------------------------------------------------------------------

fn run_serve(args: &[String], config: ServiceConfig) {
    let mut host = "0.0.0.0".to_string();
    let mut port: u16 = 8080;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--host" => {
                if i + 1 < args.len() {
                    host = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --host requires a value");
                    process::exit(1);
                }
            }
            "--port" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse() {
                        Ok(parsed) => port = parsed,
                        Err(_) => {
                            eprintln!("Error: --port requires a number, got '{}'", args[i + 1]);
                            process::exit(1);
                        }
                    }
                    i += 2;
                } else {
                    eprintln!("Error: --port requires a value");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage(&args[0]);
                process::exit(1);
            }
        }
    }

    println!("🌊 Hydromet Flood Status Service");
    println!("================================\n");
    println!("   Upstream: {}", config.base_url);

    if let Err(e) = endpoint::start_endpoint_server(&host, port, config) {
        eprintln!("\n❌ Server error: {}\n", e);
        process::exit(1);
    }
}
