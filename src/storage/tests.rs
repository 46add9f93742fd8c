use super::{MemoryRepository, Repository, StorageError};

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{EntryKind, LedgerEntry, Merchant, Transaction, TransactionType, TransactionUpdate};
use crate::types::{MetalType, PaymentType};

const SCOPE: &str = "owner@example.com";

fn sell_on(merchant_id: &str, total: i64, day: Option<u32>) -> Transaction {
    let mut transaction = Transaction::new(TransactionType::Sell, merchant_id, Decimal::from(total));
    transaction.date = day.and_then(|day| NaiveDate::from_ymd_opt(2025, 3, day));
    transaction
}

fn expense(amount: i64, day: u32) -> Result<LedgerEntry> {
    Ok(LedgerEntry {
        id: String::new(),
        kind: EntryKind::Expense,
        category: "rent".to_string(),
        description: "shop rent".to_string(),
        amount: Decimal::from(amount),
        date: NaiveDate::from_ymd_opt(2025, 3, day).ok_or_else(|| anyhow!("invalid date"))?,
        payment_type: PaymentType::BankTransfer
    })
}

#[tokio::test]
async fn test_insert_assigns_ids_and_fetch_orders_newest_first() -> Result<()> {
    let repository = MemoryRepository::new();

    let first = repository.insert_transaction(SCOPE, sell_on("m1", 100, Some(1))).await?;
    let second = repository.insert_transaction(SCOPE, sell_on("m1", 200, Some(15))).await?;
    repository.insert_transaction(SCOPE, sell_on("m1", 300, None)).await?;

    assert!(!first.id.is_empty());
    assert_ne!(first.id, second.id);

    let fetched = repository.fetch_transactions(SCOPE).await?;

    assert_eq!(fetched.len(), 3);
    assert_eq!(fetched[0].id, second.id);
    assert_eq!(fetched[1].id, first.id);
    assert_eq!(fetched[2].date, None);

    Ok(())
}

#[tokio::test]
async fn test_scopes_are_isolated() -> Result<()> {
    let repository = MemoryRepository::new();
    repository.insert_transaction(SCOPE, sell_on("m1", 100, None)).await?;

    assert!(repository.fetch_transactions("other@example.com").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_update_and_delete_transaction() -> Result<()> {
    let repository = MemoryRepository::new();
    let stored = repository.insert_transaction(SCOPE, sell_on("m1", 100, None)).await?;

    let updated = repository.update_transaction(SCOPE, &stored.id, TransactionUpdate {
        amount_received: Some(Decimal::from(40)),
        ..TransactionUpdate::default()
    }).await?;

    assert_eq!(updated.amount_received, Some(Decimal::from(40)));
    assert_eq!(repository.fetch_transactions(SCOPE).await?[0].amount_received, Some(Decimal::from(40)));

    repository.delete_transaction(SCOPE, &stored.id).await?;

    assert!(repository.fetch_transactions(SCOPE).await?.is_empty());

    let result = repository.delete_transaction(SCOPE, &stored.id).await;

    assert!(matches!(result, Err(StorageError::NotFound { kind: "transaction", .. })));

    Ok(())
}

#[tokio::test]
async fn test_merchants_are_listed_by_name_and_replaced_on_update() -> Result<()> {
    let repository = MemoryRepository::new();
    let zaveri = repository.insert_merchant(SCOPE, Merchant::new("", "Zaveri Bazaar")).await?;
    repository.insert_merchant(SCOPE, Merchant::new("", "Agarwal Gold")).await?;

    let mut renamed = zaveri.clone();
    renamed.phone = Some("+91 98200 00000".to_string());
    repository.update_merchant(SCOPE, renamed).await?;

    let merchants = repository.fetch_merchants(SCOPE).await?;

    assert_eq!(merchants[0].name, "Agarwal Gold");
    assert_eq!(merchants[1].phone.as_deref(), Some("+91 98200 00000"));

    repository.delete_merchant(SCOPE, &zaveri.id).await?;

    assert_eq!(repository.fetch_merchants(SCOPE).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_stock_upsert_keeps_one_record_per_metal() -> Result<()> {
    let repository = MemoryRepository::new();

    let first = repository.upsert_stock(SCOPE, MetalType::Gold, Decimal::from(10)).await?;
    let second = repository.upsert_stock(SCOPE, MetalType::Gold, Decimal::from(12)).await?;
    repository.upsert_stock(SCOPE, MetalType::Silver, Decimal::from(3)).await?;
    repository.upsert_stock("other@example.com", MetalType::Gold, Decimal::from(99)).await?;

    assert_eq!(first.id, second.id);

    let stock = repository.fetch_stock(SCOPE).await?;

    assert_eq!(stock.len(), 2);
    assert_eq!(stock[0].metal_type, MetalType::Gold);
    assert_eq!(stock[0].quantity, Decimal::from(12));

    repository.clear_stock(SCOPE).await?;

    assert!(repository.fetch_stock(SCOPE).await?.is_empty());
    assert_eq!(repository.fetch_stock("other@example.com").await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_entries_are_filtered_by_kind() -> Result<()> {
    let repository = MemoryRepository::new();
    let rent = repository.insert_entry(SCOPE, expense(15_000, 1)?).await?;
    repository.insert_entry(SCOPE, expense(2_000, 20)?).await?;

    assert_eq!(repository.fetch_entries(SCOPE, EntryKind::Income).await?.len(), 0);

    let expenses = repository.fetch_entries(SCOPE, EntryKind::Expense).await?;

    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0].amount, Decimal::from(2_000));

    repository.delete_entry(SCOPE, &rent.id).await?;

    assert_eq!(repository.fetch_entries(SCOPE, EntryKind::Expense).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_offline_repository_reports_unavailable() -> Result<()> {
    let repository = MemoryRepository::new();
    repository.set_offline(true);

    let result = repository.fetch_transactions(SCOPE).await;

    assert!(matches!(result, Err(StorageError::Unavailable(_))));

    repository.set_offline(false);

    assert!(repository.fetch_transactions(SCOPE).await.is_ok());

    Ok(())
}
