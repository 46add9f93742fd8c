use std::collections::BTreeMap;
use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use bullion_ledger::cache::ExpiringCache;
use bullion_ledger::import::CsvImporter;
use bullion_ledger::ledger::Balance;
use bullion_ledger::models::Transaction;
use bullion_ledger::service::{ServiceConfig, TradeService};
use bullion_ledger::storage::MemoryRepository;
use bullion_ledger::types::{fixed, MerchantId};

const LOCAL_SCOPE: &str = "local";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: bullion-ledger [input].csv [log_level:optional] > [output].csv");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let path = &args[1];
    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let config = ServiceConfig::default();
    let repository = Arc::new(MemoryRepository::new());
    let cache = Arc::new(ExpiringCache::<Vec<Transaction>>::with_settings(config.cache_capacity, config.default_expiry));
    let service = Arc::new(TradeService::new(repository, cache).with_config(config));
    let importer = CsvImporter::new(service.clone());

    let timer = Instant::now();
    let report = importer.run(path, LOCAL_SCOPE).await?;
    let duration = timer.elapsed();

    info!("Imported {} transactions in: {duration:?}", report.migrated);

    for error in &report.errors {
        warn!("{error}");
    }

    let balances = service.merchant_balances(LOCAL_SCOPE).await?;

    write_results_to_stdout(&balances)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the balance report, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_results_to_stdout(balances: &BTreeMap<MerchantId, Balance>) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "merchant,due,owe")?;

    for (merchant_id, balance) in balances {
        writeln!(
            output,
            "{},{},{}",
            merchant_id,
            fixed(balance.due, 2),
            fixed(balance.owe, 2)
        )?;
    }

    output.flush()?;

    Ok(())
}
