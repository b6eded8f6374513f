//! Command-line front end for the price conversion engine

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use pricelens::rates::{HttpRateSource, RateCache};
use pricelens::{extract_price, format::format_currency, Config, FileStore};
use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser)]
#[command(name = "pricelens")]
#[command(about = "Detect prices in text and convert between currencies", long_about = None)]
#[command(version)]
struct Cli {
    /// Rate cache file (defaults to ~/.pricelens/cache.json)
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the first price-like value from a piece of text
    Extract {
        /// Text to scan
        text: String,
    },

    /// Convert an amount between two currencies
    Convert {
        /// Amount in the source currency
        amount: f64,

        /// Source currency code
        #[arg(short, long)]
        from: String,

        /// Target currency code
        #[arg(short, long)]
        to: String,
    },

    /// Fetch (or reuse cached) rates and list all known currency codes
    Rates,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { text } => match extract_price(&text) {
            Some(value) => println!("{}", value.to_string().green().bold()),
            None => {
                println!("{}", "no price found".yellow());
                std::process::exit(1);
            }
        },
        Commands::Convert { amount, from, to } => {
            let from = from.to_ascii_uppercase();
            let to = to.to_ascii_uppercase();
            let mut cache = open_cache(cli.cache)?;
            cache.load(now_ms()?);
            let table = cache
                .table()
                .ok_or_else(|| anyhow!("no rates available (fetch failed and cache is empty)"))?;
            let rate = table
                .rate_between(&from, &to)
                .ok_or_else(|| anyhow!("unknown currency pair {from}/{to}"))?;
            println!(
                "{} = {}",
                format_currency(amount, &from).bold(),
                format_currency(amount * rate, &to).green().bold()
            );
            println!("1 {} = {:.4} {}", from, rate, to);
        }
        Commands::Rates => {
            let mut cache = open_cache(cli.cache)?;
            cache.load(now_ms()?);
            let table = cache
                .table()
                .ok_or_else(|| anyhow!("no rates available (fetch failed and cache is empty)"))?;
            println!(
                "{} currencies (base {}):",
                table.len().to_string().bold(),
                Config::default().base_currency.bold()
            );
            for code in table.codes() {
                if let Some(value) = table.value(code) {
                    println!("  {}  {:.4}", code.blue(), value);
                }
            }
        }
    }

    Ok(())
}

fn open_cache(path: Option<PathBuf>) -> Result<RateCache> {
    let path = match path {
        Some(path) => path,
        None => default_cache_path(),
    };
    let store = FileStore::open(&path)
        .with_context(|| format!("failed to open rate cache at {}", path.display()))?;
    let config = Config::default();
    Ok(RateCache::new(
        Box::new(store),
        Box::new(HttpRateSource::new()),
        config.base_currency,
        config.rates_ttl_ms,
    ))
}

fn default_cache_path() -> PathBuf {
    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".pricelens").join("cache.json")
}

fn now_ms() -> Result<u64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before the epoch")?;
    Ok(elapsed.as_millis() as u64)
}
