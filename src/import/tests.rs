use super::CsvImporter;

use std::io::Write;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

use crate::cache::ExpiringCache;
use crate::ledger::Balance;
use crate::models::{Transaction, TransactionType};
use crate::service::TradeService;
use crate::storage::MemoryRepository;
use crate::types::{MetalType, SettlementDirection, SettlementType};

const SCOPE: &str = "local";
const HEADER: &str = "type,merchant,metal,weight,rate,total,paid,received,settlement,direction,charges,date";

type Service = TradeService<MemoryRepository, ExpiringCache<Vec<Transaction>>>;

fn create_service() -> Arc<Service> {
    Arc::new(TradeService::new(Arc::new(MemoryRepository::new()), Arc::new(ExpiringCache::new())))
}

fn create_temporary_csv(rows: &[&str]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;

    writeln!(file, "{HEADER}")?;

    for row in rows {
        writeln!(file, "{row}")?;
    }

    Ok(file)
}

fn path_of(file: &NamedTempFile) -> Result<&str> {
    file.path().to_str().ok_or_else(|| anyhow!("temporary path is not valid UTF-8"))
}

#[tokio::test]
async fn test_importer_stores_valid_rows_and_feeds_balances() -> Result<()> {
    let service = create_service();
    let importer = CsvImporter::new(service.clone());

    let file = create_temporary_csv(&[
        "buy,m1,gold,10,100,1000,600,,,,,2025-03-01",
        "sell,m1,gold,5,100,500,,,,,,2025-03-02",
        "buy,m2,silver,2,750,1500,500,,,,,",
        "buy,m3,gold,1,100,100,0,,,,,",
        "settlement,m2,gold,1,300,300,,,gold,receiving,,2025-03-04",
        "transfer,m2,gold,3,,0,,,,,150,2025-03-05",
    ])?;

    let report = importer.run(path_of(&file)?, SCOPE).await?;

    assert_eq!(report.migrated, 6);
    assert!(report.errors.is_empty());

    let balances = service.merchant_balances(SCOPE).await?;

    assert_eq!(balances.get("m1"), Some(&Balance { due: Decimal::from(100), owe: Decimal::ZERO }));
    assert_eq!(balances.get("m2"), Some(&Balance { due: Decimal::ZERO, owe: Decimal::from(1000) }));
    assert_eq!(balances.get("m3"), Some(&Balance::default()));

    let transactions = service.transactions(SCOPE).await?;
    let settlement = transactions.iter()
        .find(|transaction| transaction.transaction_type == TransactionType::Settlement)
        .ok_or_else(|| anyhow!("settlement missing"))?;

    assert_eq!(settlement.settlement_type, Some(SettlementType::Gold));
    assert_eq!(settlement.settlement_direction, Some(SettlementDirection::Receiving));

    let silver = transactions.iter()
        .find(|transaction| transaction.metal_type == Some(MetalType::Silver))
        .ok_or_else(|| anyhow!("silver buy missing"))?;

    assert_eq!(silver.date, None);
    assert_eq!(silver.amount_paid, Some(Decimal::from(500)));

    Ok(())
}

#[tokio::test]
async fn test_importer_skips_malformed_and_invalid_rows() -> Result<()> {
    let service = create_service();
    let importer = CsvImporter::new(service.clone());

    let file = create_temporary_csv(&[
        "sell,m1,gold,1,100,100,,,,,,",
        "loan,m1,gold,1,100,100,,,,,,",
        "sell,,gold,1,100,100,,,,,,",
        "sell,m1,gold,,,0,,,,,,",
        "sell,m1,gold,1,100,250,,,,,,",
    ])?;

    let report = importer.run(path_of(&file)?, SCOPE).await?;

    assert_eq!(report.migrated, 2);
    assert_eq!(report.errors.len(), 3);
    assert!(report.errors[0].starts_with("Line 3:"));
    assert!(report.errors[1].starts_with("Line 4:"));
    assert!(report.errors[2].starts_with("Line 5:"));

    assert_eq!(service.merchant_balance(SCOPE, "m1").await?.due, Decimal::from(350));

    Ok(())
}

#[tokio::test]
async fn test_importer_reports_file_lines_past_multiline_fields() -> Result<()> {
    let service = create_service();
    let importer = CsvImporter::new(service.clone());

    let file = create_temporary_csv(&[
        "sell,\"m1\nwest branch\",gold,1,100,100,,,,,,",
        "loan,m1,gold,1,100,100,,,,,,",
        "sell,m1,gold,,,0,,,,,,",
    ])?;

    let report = importer.run(path_of(&file)?, SCOPE).await?;

    assert_eq!(report.migrated, 1);
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors[0].starts_with("Line 4:"));
    assert!(report.errors[1].starts_with("Line 5:"));

    Ok(())
}

#[tokio::test]
async fn test_importer_handles_missing_csv_file_without_error() -> Result<()> {
    let service = create_service();
    let importer = CsvImporter::new(service.clone());

    let report = importer.run("missing.csv", SCOPE).await?;

    assert_eq!(report.migrated, 0);
    assert!(service.transactions(SCOPE).await?.is_empty());

    Ok(())
}
