use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{info, warn};

use cma_engine::config::Config;
use cma_engine::defaults::{compute_smart_defaults, has_custom_filters, SmartDefaults};
use cma_engine::error::Result;
use cma_engine::logging;
use cma_engine::record::{self, RawPropertyRecord};
use cma_engine::stats::compute_statistics;
use cma_engine::status::{normalize_status, status_from_mls, status_style, DisplayStatus};

#[derive(Parser)]
#[command(name = "cma_engine")]
#[command(about = "Comparable statistics and price normalization for CMA reports")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate comparable statistics from a comps JSON file
    Stats {
        /// JSON file holding an array of property records (or a feed
        /// response with a listings/properties array)
        #[arg(long)]
        input: PathBuf,
    },
    /// Derive comp-search smart defaults from a subject property
    Defaults {
        /// JSON file holding the subject property record
        #[arg(long)]
        subject: PathBuf,
        /// Saved filter state to compare against fresh defaults
        #[arg(long)]
        filters: Option<PathBuf>,
    },
    /// Normalize raw MLS status strings
    Status {
        /// Raw status values as they appear in feed data
        values: Vec<String>,
        /// Use the narrower MLS-report normalizer (falls back to ACTIVE)
        #[arg(long)]
        mls: bool,
    },
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    logging::init_logging(&config.logging);

    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { input } => {
            let properties = load_records(&input)?;
            info!(comps = properties.len(), "computing comparable statistics");

            let statistics = compute_statistics(&properties);
            if statistics.price.average == 0.0 && statistics.comp_count > 0 {
                warn!("no comp carried a usable price; price aggregates degrade to zero");
            }
            print_json(&statistics, config.report.pretty)?;
        }
        Commands::Defaults { subject, filters } => {
            let subject_record = load_records(&subject)?.into_iter().next();
            match &subject_record {
                Some(subject) => info!(
                    listing = record::listing_id(subject).as_deref().unwrap_or("unknown"),
                    "deriving smart defaults from subject"
                ),
                None => warn!("subject file contained no property record; defaults are unconstrained"),
            }

            let defaults = compute_smart_defaults(subject_record.as_ref());
            if let Some(path) = filters {
                let current: SmartDefaults = serde_json::from_str(&fs::read_to_string(&path)?)?;
                if has_custom_filters(&current, subject_record.as_ref()) {
                    println!("⚠️  Custom filters applied");
                } else {
                    println!("Filters match smart defaults");
                }
            }
            print_json(&defaults, config.report.pretty)?;
        }
        Commands::Status { values, mls } => {
            for value in &values {
                let status = if mls {
                    status_from_mls(Some(value))
                } else {
                    normalize_status(Some(value))
                };
                let style = status_style(DisplayStatus::Listing(status));
                println!("{} -> {} ({})", value, style.label, style.color);
            }
        }
    }

    Ok(())
}

fn load_records(path: &Path) -> Result<Vec<RawPropertyRecord>> {
    let payload: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    record::records_from_value(payload)
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    println!("{}", rendered);
    Ok(())
}
