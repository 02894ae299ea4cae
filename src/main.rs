use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::db::connection::{init_db, Database};
use crate::db::listings::{load_all, save_listings};
use crate::db::scrapes;
use crate::domain::listing::clean_listings;
use crate::domain::stats;
use crate::errors::AppError;
use crate::exports::export_csv;
use crate::scraper::{CoinScraper, ExtractionSchema, ScraperError};

mod db;
mod domain;
mod errors;
mod exports;
mod scraper;

#[cfg(test)]
mod tests;

/// Category presets: label -> base URL of the listing pages.
const CATEGORIES: &[(&str, &str)] = &[
    ("dogs", "https://sn.coinafrique.com/categorie/chiens"),
    ("sheep", "https://sn.coinafrique.com/categorie/moutons"),
    (
        "poultry",
        "https://sn.coinafrique.com/categorie/poules-lapins-et-pigeons",
    ),
    (
        "other-animals",
        "https://sn.coinafrique.com/categorie/autres-animaux",
    ),
];

#[derive(Parser)]
#[command(name = "coinafrique_scraper", about = "CoinAfrique classifieds scraper")]
struct Cli {
    /// SQLite database path
    #[arg(long, default_value = "coinafrique_data.db")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape listing pages for one category
    Scrape {
        /// Category preset (dogs, sheep, poultry, other-animals)
        #[arg(short, long)]
        category: String,
        /// Override the category base URL
        #[arg(long)]
        url: Option<String>,
        /// Max pages to fetch
        #[arg(short = 'n', long, default_value = "5")]
        pages: u32,
        /// Pause between page fetches, in milliseconds
        #[arg(long, default_value = "1000")]
        delay_ms: u64,
    },
    /// Summary statistics over the cleaned view
    Stats,
    /// Export the raw table or the cleaned view to CSV
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
        /// Export the cleaned view (numeric prices, invalid rows dropped)
        #[arg(long)]
        clean: bool,
    },
    /// Recent scrape runs and how they ended
    Runs,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let db = Database::new(cli.db.as_str());
    init_db(&db)?;

    match cli.command {
        Commands::Scrape {
            category,
            url,
            pages,
            delay_ms,
        } => cmd_scrape(&db, &category, url, pages, delay_ms),
        Commands::Stats => cmd_stats(&db),
        Commands::Export { output, clean } => cmd_export(&db, &output, clean),
        Commands::Runs => cmd_runs(&db),
    }
}

fn cmd_scrape(
    db: &Database,
    category: &str,
    url: Option<String>,
    pages: u32,
    delay_ms: u64,
) -> Result<(), AppError> {
    let base_url = match url {
        Some(u) => u,
        None => CATEGORIES
            .iter()
            .find(|(label, _)| *label == category)
            .map(|(_, u)| u.to_string())
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "unknown category '{category}' (presets: dogs, sheep, poultry, other-animals)"
                ))
            })?,
    };

    let scraper = CoinScraper::new(ExtractionSchema::default(), Duration::from_millis(delay_ms))
        .map_err(|e| AppError::ScrapeError(e.to_string()))?;

    let run_id = db.with_conn(|conn| {
        scrapes::start_scrape_run(conn, category, Utc::now().timestamp())
    })?;

    let result = scraper.scrape_all_pages(&base_url, category, pages, |page| {
        save_listings(db, &page.listings).map_err(|e| ScraperError::Store(e.to_string()))
    });

    // The run row gets closed either way; an unfinished row would read
    // as still running.
    let finished = Utc::now().timestamp();
    let outcome = match result {
        Ok(outcome) => {
            db.with_conn(|conn| scrapes::end_scrape_run(conn, run_id, finished, &outcome))?;
            outcome
        }
        Err(e) => {
            db.with_conn(|conn| {
                scrapes::fail_scrape_run(conn, run_id, finished, &e.to_string())
            })?;
            return Err(AppError::ScrapeError(e.to_string()));
        }
    };

    println!(
        "✅ {} listings saved over {} pages ({} containers skipped)",
        outcome.rows, outcome.pages_fetched, outcome.skipped
    );
    println!("Stopped: {}", outcome.termination);
    Ok(())
}

fn cmd_stats(db: &Database) -> Result<(), AppError> {
    let raw = load_all(db)?;
    if raw.is_empty() {
        println!("No data available. Run 'scrape' first.");
        return Ok(());
    }

    let clean = clean_listings(&raw);
    println!("Raw rows:   {}", raw.len());
    println!("Clean rows: {}", clean.len());

    match stats::price_summary(&clean) {
        Some(s) => {
            println!("Average price: {:.0} CFA", s.average);
            println!("Minimum price: {:.0} CFA", s.min);
            println!("Maximum price: {:.0} CFA", s.max);
        }
        None => println!("No priced listings yet."),
    }

    println!("\nListings by category:");
    for (category, n) in stats::count_by_category(&clean) {
        println!("  {category:<28} {n}");
    }

    println!("\nTop cities:");
    for (city, n) in stats::top_addresses(&clean, 10) {
        println!("  {city:<28} {n}");
    }
    Ok(())
}

fn cmd_export(db: &Database, output: &PathBuf, clean: bool) -> Result<(), AppError> {
    let raw = load_all(db)?;
    let file = File::create(output).map_err(|e| AppError::IoError(e.to_string()))?;
    let writer = BufWriter::new(file);

    let rows = if clean {
        let cleaned = clean_listings(&raw);
        export_csv::write_clean_csv(writer, &cleaned)?;
        cleaned.len()
    } else {
        export_csv::write_raw_csv(writer, &raw)?;
        raw.len()
    };

    println!("📄 Exported {} rows to {}", rows, output.display());
    Ok(())
}

fn cmd_runs(db: &Database) -> Result<(), AppError> {
    let runs = db.with_conn(scrapes::get_recent_runs)?;
    if runs.is_empty() {
        println!("No scrape runs recorded yet.");
        return Ok(());
    }

    for run in runs {
        let started = chrono::DateTime::from_timestamp(run.started_at, 0)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| run.started_at.to_string());

        println!(
            "#{:<4} {:<14} {} pages={} rows={} skipped={} {}",
            run.id,
            run.category,
            started,
            run.pages_fetched.unwrap_or(0),
            run.rows_saved.unwrap_or(0),
            run.containers_skipped.unwrap_or(0),
            run.termination.as_deref().unwrap_or("running"),
        );
        if let Some(err) = run.error_message {
            println!("      error: {err}");
        }
    }
    Ok(())
}
