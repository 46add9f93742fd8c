use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::DataCache;
use crate::ledger::{
    balances_by_merchant, compute_balance, compute_stock, merchant_totals, monthly_breakdown, Balance, DateRange, LedgerTotals,
    MonthlySummary, TradeSummary
};
use crate::models::{EntryKind, LedgerEntry, StockRecord, Transaction, TransactionUpdate};
use crate::service::{ServiceConfig, ServiceError};
use crate::storage::Repository;
use crate::types::{MerchantId, MetalType};

/// Outcome of a bulk migration. Rejected rows are reported, never fatal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationReport {
    pub migrated: usize,
    pub errors: Vec<String>
}

/// Application layer over the data-access contract.
///
/// Reads of a scope's transactions go through the injected cache; every
/// write to transactions invalidates that scope's cached list before returning.
pub struct TradeService<R, C> {
    repository: Arc<R>,
    cache: Arc<C>,
    config: ServiceConfig
}

impl<R, C> TradeService<R, C>
where
    R: Repository,
    C: DataCache<Vec<Transaction>>
{
    pub fn new(repository: Arc<R>, cache: Arc<C>) -> Self {
        Self {
            repository,
            cache,
            config: ServiceConfig::default()
        }
    }

    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    fn cache_key(scope: &str) -> String {
        format!("trades_{scope}")
    }

    async fn invalidate(&self, scope: &str) {
        self.cache.invalidate(&Self::cache_key(scope)).await;
    }

    pub async fn transactions(&self, scope: &str) -> Result<Vec<Transaction>, ServiceError> {
        let key = Self::cache_key(scope);

        if let Some(cached) = self.cache.get(&key).await {
            debug!("Using {} cached transactions for [{scope}]", cached.len());
            return Ok(cached)
        }

        let transactions = self.repository.fetch_transactions(scope).await?;
        self.cache.set(key, transactions.clone(), Some(self.config.transactions_ttl)).await;

        Ok(transactions)
    }

    pub async fn add_transaction(&self, scope: &str, transaction: Transaction) -> Result<Transaction, ServiceError> {
        let stored = self.repository.insert_transaction(scope, transaction).await?;
        self.invalidate(scope).await;

        Ok(stored)
    }

    pub async fn update_transaction(&self, scope: &str, transaction_id: &str, update: TransactionUpdate) -> Result<Transaction, ServiceError> {
        let updated = self.repository.update_transaction(scope, transaction_id, update).await?;
        self.invalidate(scope).await;

        Ok(updated)
    }

    pub async fn delete_transaction(&self, scope: &str, transaction_id: &str) -> Result<(), ServiceError> {
        self.repository.delete_transaction(scope, transaction_id).await?;
        self.invalidate(scope).await;

        Ok(())
    }

    pub async fn merchant_balance(&self, scope: &str, merchant_id: &str) -> Result<Balance, ServiceError> {
        let transactions = self.transactions(scope).await?;

        Ok(compute_balance(merchant_id, &transactions))
    }

    pub async fn merchant_balances(&self, scope: &str) -> Result<BTreeMap<MerchantId, Balance>, ServiceError> {
        let transactions = self.transactions(scope).await?;

        Ok(balances_by_merchant(&transactions))
    }

    /// Totals over the registered merchants of the scope.
    pub async fn merchant_totals(&self, scope: &str) -> Result<LedgerTotals, ServiceError> {
        let merchants = self.repository.fetch_merchants(scope).await?;
        let transactions = self.transactions(scope).await?;

        Ok(merchant_totals(&merchants, &transactions))
    }

    /// Derives stock from the full trade history and persists one record per metal.
    ///
    /// # Errors
    /// The first failing upsert aborts the recalculation.
    pub async fn recalculate_stock(&self, scope: &str) -> Result<Vec<StockRecord>, ServiceError> {
        let transactions = self.repository.fetch_transactions(scope).await?;
        let levels = compute_stock(&transactions);
        let mut records = Vec::with_capacity(MetalType::ALL.len());

        for metal_type in MetalType::ALL {
            let record = self.repository.upsert_stock(scope, metal_type, levels.get(metal_type)).await
                .inspect_err(|error| warn!("Updating {metal_type:?} stock for [{scope}] failed: {error}"))?;

            records.push(record);
        }

        info!("Stock recalculated for [{scope}]: gold {} g, silver {} kg", levels.gold, levels.silver);

        Ok(records)
    }

    /// Validates and stores one transaction from an external source.
    pub async fn migrate_transaction(&self, scope: &str, transaction: Transaction) -> Result<Transaction, ServiceError> {
        let cleaned = transaction.validate_and_clean()?;

        self.add_transaction(scope, cleaned).await
    }

    pub async fn migrate_transactions(&self, scope: &str, rows: impl IntoIterator<Item = Transaction>) -> MigrationReport {
        let mut report = MigrationReport::default();

        for row in rows {
            let source_id = row.id.clone();

            match self.migrate_transaction(scope, row).await {
                Ok(_) => report.migrated += 1,
                Err(ServiceError::Validation(error)) => {
                    warn!("{error}");
                    report.errors.push(format!("Skipped transaction [{source_id}]: {error}"));
                }
                Err(error) => {
                    warn!("{error}");
                    report.errors.push(format!("Failed to migrate transaction [{source_id}]: {error}"));
                }
            }
        }

        report
    }

    async fn all_entries(&self, scope: &str) -> Result<Vec<LedgerEntry>, ServiceError> {
        let mut entries = self.repository.fetch_entries(scope, EntryKind::Income).await?;
        entries.extend(self.repository.fetch_entries(scope, EntryKind::Expense).await?);

        Ok(entries)
    }

    pub async fn summary(&self, scope: &str, range: &DateRange) -> Result<TradeSummary, ServiceError> {
        let transactions = self.transactions(scope).await?;
        let entries = self.all_entries(scope).await?;

        Ok(TradeSummary::from_records(&transactions, &entries, range))
    }

    pub async fn monthly_breakdown(&self, scope: &str, range: &DateRange) -> Result<Vec<MonthlySummary>, ServiceError> {
        let transactions = self.transactions(scope).await?;
        let entries = self.all_entries(scope).await?;

        Ok(monthly_breakdown(&transactions, &entries, range))
    }
}
