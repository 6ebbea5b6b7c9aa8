use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geolookup::logging::init_logging;
use geolookup::{DurationUnit, GeoLookup, GeoLookupConfig, GeoLookupError, NearbyAirport};
use tracing::debug;

/// Airport, city, country and airline lookups on the command line
#[derive(Debug, Parser)]
#[command(
    name = "geolookup",
    version,
    about = "Resolve IATA codes, distances and local times from reference data"
)]
struct Cli {
    /// Configuration file (defaults to <config dir>/geolookup/config.toml)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Directory holding the reference tables, overriding the configuration
    #[arg(short, long, value_name = "PATH", global = true)]
    data_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Primary city served by an airport
    City { airport: String },
    /// Every city served by an airport
    Cities { airport: String },
    /// Country of a location
    Country { location: String },
    /// Continent of a location or country
    Continent { location: String },
    /// IATA zone of a location or country
    Zone { location: String },
    /// Currency of a location or country
    Currency { location: String },
    /// Home country of an airline
    AirlineCountry { airline: String },
    /// Name of an airline
    AirlineName { airline: String },
    /// IANA time zone of a location
    TimeZone { location: String },
    /// Great-circle distance in kilometers
    Distance { from: String, to: String },
    /// Classify a trip as domestic, continental or intercontinental
    GeoType {
        #[arg(required = true, num_args = 1..)]
        locations: Vec<String>,
    },
    /// Airports around a location, nearest first
    Nearby {
        location: String,
        /// Search radius in kilometers (defaults to the configured radius)
        #[arg(short, long)]
        radius: Option<f64>,
        /// Include distances
        #[arg(long)]
        details: bool,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Local time at a location to GMT
    ToGmt {
        datetime: String,
        location: String,
        #[arg(short, long)]
        format: Option<String>,
    },
    /// GMT to local time at a location
    ToLocal {
        datetime: String,
        location: String,
        #[arg(short, long)]
        format: Option<String>,
    },
    /// UTC offset in minutes at a location's local time
    Offset {
        datetime: String,
        location: String,
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Elapsed time between a local departure and a local arrival
    Trip {
        departure: String,
        origin: String,
        arrival: String,
        destination: String,
        /// hours or minutes
        #[arg(short, long)]
        unit: Option<DurationUnit>,
        #[arg(short, long)]
        format: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("Error: {}", describe(&error));
        process::exit(1);
    }
}

fn describe(error: &anyhow::Error) -> String {
    match error.downcast_ref::<GeoLookupError>() {
        Some(err) => err.user_message(),
        None => format!("{error:#}"),
    }
}

fn code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Result of a query before rendering
enum Answer {
    Text(String),
    Airports(Vec<NearbyAirport>),
}

fn run(cli: Cli) -> Result<()> {
    let mut config =
        GeoLookupConfig::load_from_path(cli.config).context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data.directory = dir.to_string_lossy().into_owned();
    }

    init_logging(&config.logging, cli.verbose)?;
    debug!("Reference data directory: {}", config.data.directory);

    let geo = GeoLookup::from_config(&config)?;

    let output = match answer(&geo, &cli.command, config.defaults.search_radius_km)? {
        Answer::Text(text) => text,
        Answer::Airports(airports) => {
            let (json, details) = match cli.command {
                Command::Nearby { json, details, .. } => (json, details),
                _ => (false, false),
            };
            render_airports(&airports, json, details)?
        }
    };

    println!("{output}");
    Ok(())
}

fn answer(
    geo: &GeoLookup,
    command: &Command,
    default_radius_km: f64,
) -> geolookup::Result<Answer> {
    let text = match command {
        Command::City { airport } => geo.city(&code(airport))?,
        Command::Cities { airport } => geo.cities(&code(airport))?.join(","),
        Command::Country { location } => geo.country(&code(location))?,
        Command::Continent { location } => geo.continent(&code(location))?,
        Command::Zone { location } => geo.iata_zone(&code(location))?,
        Command::Currency { location } => geo.currency(&code(location))?,
        Command::AirlineCountry { airline } => geo.airline_country(&code(airline))?,
        Command::AirlineName { airline } => geo.airline_name(&code(airline))?,
        Command::TimeZone { location } => geo.time_zone(&code(location))?,
        Command::Distance { from, to } => {
            geo.distance_between(&code(from), &code(to))?.to_string()
        }
        Command::GeoType { locations } => {
            let codes: Vec<String> = locations.iter().map(|raw| code(raw)).collect();
            geo.geo_type(&codes)?.to_string()
        }
        Command::Nearby {
            location,
            radius,
            ..
        } => {
            let radius = radius.unwrap_or(default_radius_km);
            let airports = geo.nearby_airports_with_details(&code(location), radius)?;
            return Ok(Answer::Airports(airports));
        }
        Command::ToGmt {
            datetime,
            location,
            format,
        } => geo.local_to_gmt(datetime, &code(location), format.as_deref())?,
        Command::ToLocal {
            datetime,
            location,
            format,
        } => geo.gmt_to_local(datetime, &code(location), format.as_deref())?,
        Command::Offset {
            datetime,
            location,
            format,
        } => geo
            .offset_for_local_date(datetime, &code(location), format.as_deref())?
            .to_string(),
        Command::Trip {
            departure,
            origin,
            arrival,
            destination,
            unit,
            format,
        } => geo
            .trip_duration(
                departure,
                &code(origin),
                arrival,
                &code(destination),
                *unit,
                format.as_deref(),
            )?
            .to_string(),
    };
    Ok(Answer::Text(text))
}

fn render_airports(airports: &[NearbyAirport], json: bool, details: bool) -> Result<String> {
    let rendered = match (json, details) {
        (true, true) => serde_json::to_string_pretty(airports)?,
        (true, false) => {
            let codes: Vec<&str> = airports.iter().map(|a| a.code.as_str()).collect();
            serde_json::to_string(&codes)?
        }
        (false, true) => airports
            .iter()
            .map(|a| format!("{} {} km", a.code, a.distance_km))
            .collect::<Vec<_>>()
            .join("\n"),
        (false, false) => airports
            .iter()
            .map(|a| a.code.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geolookup::LookupError;

    #[test]
    fn test_lookup_failures_use_user_message() {
        let error = anyhow::Error::from(GeoLookupError::from(LookupError::UnknownLocation(
            "XXX".to_string(),
        )));
        assert_eq!(describe(&error), "Unknown location: XXX");
    }

    #[test]
    fn test_other_failures_keep_context_chain() {
        let error = anyhow::anyhow!("file missing").context("Failed to load configuration");
        assert_eq!(describe(&error), "Failed to load configuration: file missing");
    }

    #[test]
    fn test_render_airports() {
        let airports = vec![
            NearbyAirport {
                code: "LBG".to_string(),
                distance_km: 9,
            },
            NearbyAirport {
                code: "ORY".to_string(),
                distance_km: 35,
            },
        ];
        assert_eq!(render_airports(&airports, false, false).unwrap(), "LBG ORY");
        assert_eq!(
            render_airports(&airports, false, true).unwrap(),
            "LBG 9 km\nORY 35 km"
        );
        assert_eq!(
            render_airports(&airports, true, false).unwrap(),
            "[\"LBG\",\"ORY\"]"
        );
    }
}
