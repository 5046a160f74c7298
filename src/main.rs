use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;
use whisker_atlas::hours::{is_open_at, next_open_time_at, WeeklyHourEntry};
use whisker_atlas::locator::{LocationFinder, StoreClient, DEFAULT_RADIUS_MILES};
use whisker_atlas::{geo::GeoPoint, server};

/// Whisker Atlas — cat-cafe directory backend tools
///
/// Radius search against the hosted store, postal-code geocoding, and
/// open-status checks for weekly schedules.
///
/// Examples:
///   whisker 29401
///   whisker 29401 --radius 50 --exclude loc-1,loc-2
///   whisker --lat 32.7795 --lon -79.9371 --radius 10
///   whisker --hours-file hours.json --state "South Carolina"
///   whisker --serve --port 8787
#[derive(Parser)]
#[command(name = "whisker", version, about, long_about = None)]
struct Cli {
    /// 5-digit US postal code (positional). Example: whisker 29401
    #[arg(index = 1)]
    zip_positional: Option<String>,

    /// Postal code (named). Example: --zip 29401
    #[arg(long)]
    zip: Option<String>,

    /// Latitude (-90 to 90), paired with --lon.
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude (-180 to 180), paired with --lat.
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Search radius in miles.
    #[arg(long, short = 'r', default_value_t = DEFAULT_RADIUS_MILES)]
    radius: f64,

    /// Location ids to exclude from results (comma-separated).
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Offline mode: only use the local geocode cache, no network.
    #[arg(long)]
    offline: bool,

    /// Evaluate open status for a JSON file of weekly hour entries.
    #[arg(long)]
    hours_file: Option<PathBuf>,

    /// US state of the listing (timezone region for --hours-file).
    #[arg(long)]
    state: Option<String>,

    /// Evaluate at a fixed RFC3339 instant instead of now.
    #[arg(long)]
    at: Option<String>,

    /// Start the JSON API server.
    #[arg(long)]
    serve: bool,

    /// Server bind host.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server bind port.
    #[arg(long, default_value_t = 8787)]
    port: u16,

    /// Store base URL (overrides WHISKER_STORE_URL).
    #[arg(long)]
    store_url: Option<String>,

    /// Store API key (overrides WHISKER_STORE_KEY).
    #[arg(long)]
    store_key: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let store = build_store(&cli);

    // ── Server mode ─────────────────────────────────────────────

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("Error: Cannot start async runtime: {}", e);
            std::process::exit(1);
        });
        runtime.block_on(server::start(&cli.host, cli.port, store));
        return;
    }

    // ── Open-status mode ────────────────────────────────────────

    if let Some(ref path) = cli.hours_file {
        run_status_check(&cli, path);
        return;
    }

    // ── Search mode ─────────────────────────────────────────────

    let mut finder = LocationFinder::new(store);
    if cli.offline {
        finder.set_offline(true);
    }

    if let Some(zip) = cli.zip.as_deref().or(cli.zip_positional.as_deref()) {
        let results = finder.search_by_zip(zip, cli.radius, &cli.exclude);
        eprintln!(
            "  {} location(s) within {} mi of {}",
            results.len(),
            cli.radius,
            zip
        );
        println!("{}", serde_json::to_string_pretty(&results).unwrap());
        return;
    }

    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        let point = GeoPoint::new(lat, lon);
        if !point.is_valid() {
            eprintln!("Error: Invalid coordinates. Lat: -90..90, Lon: -180..180");
            std::process::exit(1);
        }
        let results = finder.search_near(point, cli.radius, &cli.exclude);
        eprintln!(
            "  {} location(s) within {} mi of {:.4}, {:.4}",
            results.len(),
            cli.radius,
            lat,
            lon
        );
        println!("{}", serde_json::to_string_pretty(&results).unwrap());
        return;
    }

    eprintln!("Error: No query specified.");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  whisker 29401");
    eprintln!("  whisker --zip 29401 --radius 50");
    eprintln!("  whisker --lat 32.7795 --lon -79.9371");
    eprintln!("  whisker --hours-file hours.json --state \"South Carolina\"");
    eprintln!("  whisker --serve");
    std::process::exit(1);
}

fn build_store(cli: &Cli) -> Option<StoreClient> {
    if let (Some(url), Some(key)) = (cli.store_url.as_deref(), cli.store_key.as_deref()) {
        return Some(StoreClient::new(url, key));
    }
    match StoreClient::from_env() {
        Ok(store) => Some(store),
        Err(e) => {
            if !cli.offline {
                eprintln!("  Note: {} (radius search will return no results)", e);
            }
            None
        }
    }
}

fn run_status_check(cli: &Cli, path: &PathBuf) {
    let data = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error: Cannot read {}: {}", path.display(), e);
        std::process::exit(1);
    });
    let hours: Vec<WeeklyHourEntry> = serde_json::from_str(&data).unwrap_or_else(|e| {
        eprintln!("Error: Invalid hours JSON in {}: {}", path.display(), e);
        std::process::exit(1);
    });

    let region = cli.state.clone().unwrap_or_default();
    if region.is_empty() {
        eprintln!("  Note: no --state given, assuming Eastern time");
    }

    let now: DateTime<Utc> = match &cli.at {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|e| {
                eprintln!("Error: Invalid --at instant '{}': {}", raw, e);
                std::process::exit(1);
            }),
        None => Utc::now(),
    };

    let output = serde_json::json!({
        "is_open": is_open_at(&hours, &region, now),
        "next_open": next_open_time_at(&hours, &region, now),
    });
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
