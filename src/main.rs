//! Apparitions - command-line access to the apparition event catalog
//!
//! Usage:
//!   apparitions list --category Apparition --start-year 1800 --sort-by name_asc
//!   apparitions show our-lady-of-lourdes
//!   apparitions backfill-slugs
//!   apparitions import events.json

use apparitions::config::{AppConfig, ConfigOverrides};
use apparitions::core::{events_from_json, Event};
use apparitions::query::{run_listing, ListingQuery, DEFAULT_SORT};
use apparitions::storage::EventRepository;
use apparitions::{Error, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "apparitions")]
#[command(about = "Browse and maintain the apparition event catalog")]
struct Cli {
    /// SQLite database file [default: $DB_PATH or ./data.sqlite3]
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List events, filtered and sorted
    List {
        /// Category to include (repeatable; none means all)
        #[arg(short, long = "category")]
        categories: Vec<String>,

        /// First year of the window (0 = unbounded)
        #[arg(long, default_value = "0")]
        start_year: i32,

        /// Last year of the window (0 = unbounded)
        #[arg(long, default_value = "0")]
        end_year: i32,

        /// Sort specification: name_asc, year_desc, category_asc, ...
        #[arg(long, default_value = DEFAULT_SORT)]
        sort_by: String,
    },
    /// Show one event with its blocks and requests
    Show { slug: String },
    /// Store a derived slug for every event that has none
    BackfillSlugs,
    /// Insert events from a JSON array
    Import { file: String },
}

fn print_event(event: &Event) {
    println!("{} ({})", event.name, event.years);
    println!("  slug:     {}", event.slug());
    println!("  category: {}", event.category);
    if let Some(country) = &event.country {
        println!("  country:  {}", country);
    }
    if !event.description.is_empty() {
        println!();
        println!("{}", event.description);
    }
    for block in &event.blocks {
        println!();
        println!("## {}", block.title);
        if !block.church_authority.is_empty() {
            println!("   [{}: {}]", block.church_authority, block.authority_position);
        }
        println!("{}", block.content);
    }
    if !event.requests.is_empty() {
        println!();
        println!("Requests:");
        for request in &event.requests {
            println!("  - {}", request.request);
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::from_env()?
        .with_overrides(ConfigOverrides { db_path: cli.db, ..ConfigOverrides::default() })?;
    let repository = EventRepository::open_initialized(&config.db_path)?;

    match cli.command {
        Command::List { categories, start_year, end_year, sort_by } => {
            let events = repository.all_events()?;
            let query = ListingQuery { categories, start_year, end_year, sort_by };
            let listing = run_listing(&events, &query);

            println!("{:<40} {:<14} {:<20} {}", "Name", "Category", "Years", "Slug");
            println!("{:-<90}", "");
            for event in &listing {
                println!(
                    "{:<40} {:<14} {:<20} {}",
                    event.name,
                    event.category,
                    event.years,
                    event.slug()
                );
            }
            println!("\n{} of {} events", listing.len(), events.len());
        }
        Command::Show { slug } => {
            let event = repository
                .event_by_slug(&slug)?
                .ok_or_else(|| Error::NotFound(format!("event '{}'", slug)))?;
            print_event(&event);
        }
        Command::BackfillSlugs => {
            let updated = repository.ensure_slugs()?;
            println!("Updated {} slug(s)", updated);
        }
        Command::Import { file } => {
            let events = events_from_json(&std::fs::read_to_string(&file)?)?;
            let summary = repository.import_events(&events)?;
            println!(
                "Imported {} event(s), derived {} slug(s)",
                summary.imported, summary.slugs_derived
            );
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
