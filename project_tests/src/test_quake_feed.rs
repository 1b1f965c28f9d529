//! # USGS Feed Live Data Test
//!
//! Pulls the ten most recent M6+ events from the public USGS endpoint via
//! lib_quake and prints both the raw records and their presentation.

use chrono::Locale;
use lib_quake::loggers::{setup_logging, LogOptions};
use lib_quake::quakes::{FeedQuery, Presentation, QuakeService};

/// Executes the live feed fetch.
///
/// // Statement: Prints every decoded record to stdout, exits with 1 on failure.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let _guard = setup_logging(&LogOptions {
        app_name: "quake_feed_test".to_string(),
        level: "debug".to_string(),
        log_dir: None,
    })?;

    let service = QuakeService::new()?;
    let query = FeedQuery::default();

    println!("[*] Requesting live data from {}", query.to_url()?);

    match service.query(&query).await {
        Ok(records) => {
            println!("\n[SUCCESS] {} records received:", records.len());
            println!("-----------------------------------------------");
            for quake in &records {
                let view = Presentation::of(quake, &chrono_tz::UTC, Locale::en_US);
                println!("{}", serde_json::to_string_pretty(quake)?);
                println!(
                    "    => M{} [{}] {} | {} | {} {}",
                    view.magnitude, view.color, view.location_offset, view.primary_location, view.date, view.time
                );
            }
            println!("-----------------------------------------------");
        }
        Err(e) => {
            eprintln!("\n[ERROR] Feed retrieval failed ({}):", e.kind());
            eprintln!(">>> {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
