mod errors;
mod memory_repository;
#[cfg(test)]
mod tests;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::models::{EntryKind, LedgerEntry, Merchant, StockRecord, Transaction, TransactionUpdate};
use crate::types::MetalType;

pub use errors::StorageError;
pub use memory_repository::MemoryRepository;

/// Data-access contract of the hosted database.
///
/// Every call is scoped by the owner key the records are shared under and
/// resolves independently to a record set or a `StorageError`. Inserts
/// return the stored record with its store-assigned id.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Newest first; undated transactions come last.
    async fn fetch_transactions(&self, scope: &str) -> Result<Vec<Transaction>, StorageError>;
    async fn insert_transaction(&self, scope: &str, transaction: Transaction) -> Result<Transaction, StorageError>;
    async fn update_transaction(&self, scope: &str, transaction_id: &str, update: TransactionUpdate) -> Result<Transaction, StorageError>;
    async fn delete_transaction(&self, scope: &str, transaction_id: &str) -> Result<(), StorageError>;

    /// Ordered by name.
    async fn fetch_merchants(&self, scope: &str) -> Result<Vec<Merchant>, StorageError>;
    async fn insert_merchant(&self, scope: &str, merchant: Merchant) -> Result<Merchant, StorageError>;
    async fn update_merchant(&self, scope: &str, merchant: Merchant) -> Result<Merchant, StorageError>;
    async fn delete_merchant(&self, scope: &str, merchant_id: &str) -> Result<(), StorageError>;

    /// Ordered by metal.
    async fn fetch_stock(&self, scope: &str) -> Result<Vec<StockRecord>, StorageError>;
    async fn upsert_stock(&self, scope: &str, metal_type: MetalType, quantity: Decimal) -> Result<StockRecord, StorageError>;
    async fn clear_stock(&self, scope: &str) -> Result<(), StorageError>;

    /// Newest first.
    async fn fetch_entries(&self, scope: &str, kind: EntryKind) -> Result<Vec<LedgerEntry>, StorageError>;
    async fn insert_entry(&self, scope: &str, entry: LedgerEntry) -> Result<LedgerEntry, StorageError>;
    async fn delete_entry(&self, scope: &str, entry_id: &str) -> Result<(), StorageError>;
}
