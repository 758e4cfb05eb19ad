//! bt-geo: CLI for decoding and encoding bus-tracking locations.

use anyhow::{Context, Result};
use bustrack_geo::{
    haversine_distance, haversine_distance_meters, route_endpoints, Coordinate, GeoConfig,
    GeometryCodec, LoggingConfig, RawLocation,
};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bt-geo")]
#[command(about = "Decode and encode bus-tracking locations")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, env = "BT_GEO_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a WKB hex, WKT or JSON location
    Decode {
        /// Location text ("null" or empty for a missing location)
        input: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Fail instead of printing the origin fallback
        #[arg(long)]
        strict: bool,
    },
    /// Encode a coordinate as WKB hex (SRID 4326)
    Encode {
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
    /// Great-circle distance between two locations
    Distance {
        /// First location, any decodable format
        from: String,
        /// Second location, any decodable format
        to: String,
        /// Print meters instead of kilometers
        #[arg(long)]
        meters: bool,
    },
    /// Print the first and last point of a route linestring
    Endpoints {
        /// WKT or EWKT LINESTRING
        linestring: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GeoConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging, cli.verbose);
    debug!(level = %config.logging.level, "Configuration loaded");

    let codec = GeometryCodec;

    match cli.command {
        Commands::Decode {
            input,
            json,
            strict,
        } => {
            let raw = raw_location(&input);
            let coord = if strict {
                codec
                    .try_decode(raw)
                    .with_context(|| format!("Cannot decode {:?}", input))?
            } else {
                codec.decode(raw)
            };
            print_coordinate(&coord, json)?;
        }

        Commands::Encode {
            latitude,
            longitude,
        } => {
            println!("{}", codec.encode(latitude, longitude)?);
        }

        Commands::Distance { from, to, meters } => {
            let from_coord = codec
                .try_decode(raw_location(&from))
                .with_context(|| format!("Cannot decode {:?}", from))?;
            let to_coord = codec
                .try_decode(raw_location(&to))
                .with_context(|| format!("Cannot decode {:?}", to))?;

            if meters {
                println!("{:.1} m", haversine_distance_meters(&from_coord, &to_coord));
            } else {
                println!("{:.3} km", haversine_distance(&from_coord, &to_coord));
            }
        }

        Commands::Endpoints { linestring, json } => {
            let endpoints = route_endpoints(&linestring)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&endpoints)?);
            } else {
                println!(
                    "Start: {} {}",
                    endpoints.start.latitude, endpoints.start.longitude
                );
                println!("End: {} {}", endpoints.end.latitude, endpoints.end.longitude);
            }
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` wins over the config level.
fn init_logging(config: &LoggingConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.show_target)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .compact()
        .init();
}

fn raw_location(input: &str) -> RawLocation<'_> {
    match input.trim() {
        "" | "null" => RawLocation::Missing,
        text => RawLocation::Text(text),
    }
}

fn print_coordinate(coord: &Coordinate, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(coord)?);
    } else {
        println!("Latitude: {}", coord.latitude);
        println!("Longitude: {}", coord.longitude);
    }
    Ok(())
}
