//! noor-rs: Hijri calendar and corpus search server
//!
//! # Usage
//!
//! ```bash
//! # Run the HTTP/WebSocket API
//! noor-rs --config noor.toml serve
//!
//! # Today's Hijri date and observances
//! noor-rs today
//!
//! # Upcoming Islamic events
//! noor-rs events
//!
//! # One Hijri month (defaults to the current one)
//! noor-rs month --year 1448 --month 9
//!
//! # Convert a Gregorian date, or a Hijri date with --hijri
//! noor-rs convert 2026-10-15
//! noor-rs convert 1448-05-03 --hijri
//!
//! # Search a corpus
//! noor-rs search quran mercy
//! ```

use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use noor_rs::calendar::engine::format_gregorian;
use noor_rs::calendar::hijri::month_name;
use noor_rs::calendar::observance::weekday_name;
use noor_rs::calendar::{CalendarEngine, HijriDate};
use noor_rs::config::LoggingConfig;
use noor_rs::search::{FsCorpus, SearchManager, SearchResult, SearchTab};
use noor_rs::{ApiServer, NoorConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "noor-rs")]
#[command(about = "Hijri calendar and Quran/Hadith search", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve,
    /// Show today's Hijri date
    Today,
    /// List upcoming Islamic events
    Events,
    /// Show a Hijri month
    Month {
        /// Hijri year (default: current)
        #[arg(long)]
        year: Option<i32>,
        /// Hijri month 1-12 (default: current)
        #[arg(long)]
        month: Option<u32>,
    },
    /// Convert a date between calendars
    Convert {
        /// Date as YYYY-MM-DD
        date: String,
        /// Treat the date as Hijri and convert to Gregorian
        #[arg(long)]
        hijri: bool,
    },
    /// Search the Quran or Hadith collections
    Search {
        /// quran or hadith
        tab: SearchTab,
        /// Text to search for
        query: String,
    },
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.level.as_str().into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = NoorConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging);

    let calendar = CalendarEngine::with_config(&config.calendar);

    match cli.command {
        Commands::Serve => {
            info!("Starting noor-rs v{}", env!("CARGO_PKG_VERSION"));
            info!("Corpus directory: {}", config.corpus.data_dir.display());

            let server = ApiServer::new(config)?;
            server.run().await?;
        }
        Commands::Today => {
            let today = calendar.today_info();

            println!("{}", today.hijri_formatted);
            println!("{} {}", today.weekday, format_gregorian(today.gregorian));
            println!("Moon: {} {}", today.moon_phase.icon, today.moon_phase.name);
            match today.fasting.reason {
                Some(reason) => println!("Recommended fast: {}", reason),
                None => println!("No recommended fast today"),
            }
            for event in &today.events {
                println!("Today: {} ({})", event.name, event.description);
            }
        }
        Commands::Events => {
            println!("{:<22} {:<22} {:>6}", "Event", "Date", "Days");
            println!("{:-<52}", "");

            for upcoming in calendar.upcoming_events() {
                let days = if upcoming.days_until == 0 {
                    "today".to_string()
                } else {
                    upcoming.days_until.to_string()
                };
                println!("{:<22} {:<22} {:>6}", upcoming.event.name, upcoming.date, days);
            }
        }
        Commands::Month { year, month } => {
            let current = calendar.current_hijri_date();
            let year = year.unwrap_or(current.year);
            let month = month.unwrap_or(current.month);
            if !(1..=12).contains(&month) {
                anyhow::bail!("month must be between 1 and 12");
            }

            let days = calendar.month_view(year, month);
            println!("{} {} AH ({} days)\n", month_name(month), year, days.len());

            for day in &days {
                let marker = if day.is_today { "*" } else { " " };
                let fast = if day.fasting.is_fasting { "fast" } else { "" };
                println!(
                    "{}{:>3}  {:<10} {:<18} {} {:<5} {}",
                    marker,
                    day.hijri.day,
                    day.weekday,
                    format_gregorian(day.gregorian),
                    day.moon_phase.icon,
                    fast,
                    day.events.join(", ")
                );
            }
        }
        Commands::Convert { date, hijri } => {
            let (gregorian, hijri_date) = if hijri {
                let h: HijriDate = date.parse()?;
                let g = calendar
                    .gregorian_of(h)
                    .with_context(|| format!("Date '{}' is out of the supported range", date))?;
                (g, h)
            } else {
                let g = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
                    .with_context(|| format!("Invalid Gregorian date '{}', expected YYYY-MM-DD", date))?;
                let h = calendar
                    .hijri_of(g)
                    .with_context(|| format!("Date '{}' is out of the supported range", date))?;
                (g, h)
            };

            println!("{}", hijri_date);
            println!("{} {}", weekday_name(gregorian.weekday()), format_gregorian(gregorian));
        }
        Commands::Search { tab, query } => {
            let source = Arc::new(FsCorpus::new(config.corpus.clone()));
            let manager = SearchManager::new(source, &config.search);

            let results = manager.try_search(tab, &query).await?;
            if results.is_empty() {
                println!("No results for '{}'", results.query);
                return Ok(());
            }

            for result in &results.results {
                match result {
                    SearchResult::Quran(verse) => {
                        println!("[{}:{}] {}", verse.chapter, verse.verse, verse.arabic_text);
                        if !verse.english_text.is_empty() {
                            println!("        {}", verse.english_text);
                        }
                    }
                    SearchResult::Hadith(hadith) => {
                        println!("[{} {}] {}", hadith.book_id, hadith.id_in_book, hadith.english_narrator);
                        println!("        {}", hadith.english_text);
                    }
                }
            }

            let suffix = if results.truncated { " (limit reached)" } else { "" };
            println!("\nTotal: {} result(s){} in {}ms", results.total, suffix, results.query_time_ms);
        }
    }

    Ok(())
}
