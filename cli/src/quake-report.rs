use anyhow::{Context, Result};
use chrono::Locale;
use chrono_tz::Tz;
use lib_quake::configs::{load_config, OutputFormat};
use lib_quake::loggers::{setup_logging, LogOptions};
use lib_quake::quakes::{Earthquake, Presentation, QuakeService};
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

/// Empty state shown when the feed has no events.
const NO_EARTHQUAKES: &str = "No earthquakes found.";

/// One JSON output entry: the raw record plus its derived attributes.
#[derive(Serialize)]
struct ReportEntry<'a> {
    record: &'a Earthquake,
    presentation: Presentation,
}

fn write_text(out: &mut impl Write, records: &[Earthquake], tz: &Tz, locale: Locale) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "{NO_EARTHQUAKES}");
    }
    for quake in records {
        let view = Presentation::of(quake, tz, locale);
        writeln!(
            out,
            "{:>5}  [{:>3}]  {:<22} {:<36} {} {}",
            view.magnitude,
            view.severity,
            view.location_offset,
            view.primary_location,
            view.date,
            view.time,
        )?;
        writeln!(out, "       {}", view.detail_url)?;
    }
    Ok(())
}

fn write_json(out: &mut impl Write, records: &[Earthquake], tz: &Tz, locale: Locale) -> Result<()> {
    let entries: Vec<ReportEntry<'_>> = records
        .iter()
        .map(|record| ReportEntry {
            record,
            presentation: Presentation::of(record, tz, locale),
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &entries)?;
    writeln!(out)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config();

    let _guard = setup_logging(&LogOptions {
        app_name: "quake_report".to_string(),
        level: config.log_level().to_string(),
        log_dir: config.log_dir.clone(),
    })?;

    let url = config.feed_url()?;
    let tz = config.time_zone();
    let locale = config.locale();

    let service = QuakeService::new()?;
    let records = service
        .fetch_earthquakes(&url)
        .await
        .inspect_err(|e| error!(url = %url, kind = e.kind(), "quake-report aborted: {e}"))
        .with_context(|| format!("Failed to load earthquakes from {url}"))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.output_format() {
        OutputFormat::Text => write_text(&mut out, &records, &tz, locale)?,
        OutputFormat::Json => write_json(&mut out, &records, &tz, locale)?,
    }

    Ok(())
}
