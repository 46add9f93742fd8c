use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::models::{EntryKind, LedgerEntry, Merchant, StockRecord, Transaction, TransactionUpdate};
use crate::storage::{Repository, StorageError};
use crate::types::MetalType;

/// Process-local `Repository` keeping every scope in concurrent maps.
///
/// Used by the CLI and as the test double for the hosted database. Taking it
/// offline makes every call fail with `StorageError::Unavailable`.
pub struct MemoryRepository {
    transactions: DashMap<String, Vec<Transaction>>,
    merchants: DashMap<String, Vec<Merchant>>,
    stock: DashMap<(String, MetalType), StockRecord>,
    entries: DashMap<String, Vec<LedgerEntry>>,
    offline: AtomicBool
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self {
            transactions: DashMap::new(),
            merchants: DashMap::new(),
            stock: DashMap::new(),
            entries: DashMap::new(),
            offline: AtomicBool::new(false)
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), StorageError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("Repository is offline".to_string()))
        }

        Ok(())
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn next_id() -> String {
    Uuid::new_v4().to_string()
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn fetch_transactions(&self, scope: &str) -> Result<Vec<Transaction>, StorageError> {
        self.ensure_online()?;

        let mut transactions = self.transactions.get(scope)
            .map(|records| records.value().clone())
            .unwrap_or_default();

        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(transactions)
    }

    async fn insert_transaction(&self, scope: &str, mut transaction: Transaction) -> Result<Transaction, StorageError> {
        self.ensure_online()?;

        transaction.id = next_id();
        self.transactions.entry(scope.to_string()).or_default().push(transaction.clone());

        debug!("Transaction [{}]:[{:?}] stored for merchant [{}]", transaction.id, transaction.transaction_type, transaction.merchant_id);

        Ok(transaction)
    }

    async fn update_transaction(&self, scope: &str, transaction_id: &str, update: TransactionUpdate) -> Result<Transaction, StorageError> {
        self.ensure_online()?;

        let mut records = self.transactions.get_mut(scope)
            .ok_or_else(|| StorageError::transaction_not_found(transaction_id))?;

        let transaction = records.iter_mut()
            .find(|transaction| transaction.id == transaction_id)
            .ok_or_else(|| StorageError::transaction_not_found(transaction_id))?;

        transaction.apply_update(update);

        Ok(transaction.clone())
    }

    async fn delete_transaction(&self, scope: &str, transaction_id: &str) -> Result<(), StorageError> {
        self.ensure_online()?;

        let mut records = self.transactions.get_mut(scope)
            .ok_or_else(|| StorageError::transaction_not_found(transaction_id))?;

        let position = records.iter()
            .position(|transaction| transaction.id == transaction_id)
            .ok_or_else(|| StorageError::transaction_not_found(transaction_id))?;

        records.remove(position);

        Ok(())
    }

    async fn fetch_merchants(&self, scope: &str) -> Result<Vec<Merchant>, StorageError> {
        self.ensure_online()?;

        let mut merchants = self.merchants.get(scope)
            .map(|records| records.value().clone())
            .unwrap_or_default();

        merchants.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(merchants)
    }

    async fn insert_merchant(&self, scope: &str, mut merchant: Merchant) -> Result<Merchant, StorageError> {
        self.ensure_online()?;

        merchant.id = next_id();
        self.merchants.entry(scope.to_string()).or_default().push(merchant.clone());

        Ok(merchant)
    }

    async fn update_merchant(&self, scope: &str, merchant: Merchant) -> Result<Merchant, StorageError> {
        self.ensure_online()?;

        let mut records = self.merchants.get_mut(scope)
            .ok_or_else(|| StorageError::merchant_not_found(&merchant.id))?;

        let stored = records.iter_mut()
            .find(|stored| stored.id == merchant.id)
            .ok_or_else(|| StorageError::merchant_not_found(&merchant.id))?;

        *stored = merchant.clone();

        Ok(merchant)
    }

    async fn delete_merchant(&self, scope: &str, merchant_id: &str) -> Result<(), StorageError> {
        self.ensure_online()?;

        let mut records = self.merchants.get_mut(scope)
            .ok_or_else(|| StorageError::merchant_not_found(merchant_id))?;

        let position = records.iter()
            .position(|merchant| merchant.id == merchant_id)
            .ok_or_else(|| StorageError::merchant_not_found(merchant_id))?;

        records.remove(position);

        Ok(())
    }

    async fn fetch_stock(&self, scope: &str) -> Result<Vec<StockRecord>, StorageError> {
        self.ensure_online()?;

        let mut records: Vec<StockRecord> = self.stock.iter()
            .filter(|item| item.key().0 == scope)
            .map(|item| item.value().clone())
            .collect();

        records.sort_by_key(|record| record.metal_type);

        Ok(records)
    }

    async fn upsert_stock(&self, scope: &str, metal_type: MetalType, quantity: Decimal) -> Result<StockRecord, StorageError> {
        self.ensure_online()?;

        let mut record = self.stock.entry((scope.to_string(), metal_type))
            .or_insert_with(|| StockRecord { id: next_id(), metal_type, quantity: Decimal::ZERO });

        record.quantity = quantity;

        Ok(record.value().clone())
    }

    async fn clear_stock(&self, scope: &str) -> Result<(), StorageError> {
        self.ensure_online()?;

        self.stock.retain(|(owner, _), _| owner != scope);

        Ok(())
    }

    async fn fetch_entries(&self, scope: &str, kind: EntryKind) -> Result<Vec<LedgerEntry>, StorageError> {
        self.ensure_online()?;

        let mut entries: Vec<LedgerEntry> = self.entries.get(scope)
            .map(|records| records.iter().filter(|entry| entry.kind == kind).cloned().collect())
            .unwrap_or_default();

        entries.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(entries)
    }

    async fn insert_entry(&self, scope: &str, mut entry: LedgerEntry) -> Result<LedgerEntry, StorageError> {
        self.ensure_online()?;

        entry.id = next_id();
        self.entries.entry(scope.to_string()).or_default().push(entry.clone());

        Ok(entry)
    }

    async fn delete_entry(&self, scope: &str, entry_id: &str) -> Result<(), StorageError> {
        self.ensure_online()?;

        let mut records = self.entries.get_mut(scope)
            .ok_or_else(|| StorageError::entry_not_found(entry_id))?;

        let position = records.iter()
            .position(|entry| entry.id == entry_id)
            .ok_or_else(|| StorageError::entry_not_found(entry_id))?;

        records.remove(position);

        Ok(())
    }
}
