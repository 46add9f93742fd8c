use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{EntryKind, LedgerEntry, Transaction, TransactionType};

/// Inclusive date filter. An unbounded side matches everything on that side.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>
}

impl DateRange {
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from: Some(from), to: Some(to) }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Undated records only match an unbounded range.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        let Some(date) = date else {
            return self.is_unbounded()
        };

        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub struct TypeCounts {
    pub buy: usize,
    pub sell: usize,
    pub transfer: usize,
    pub settlement: usize
}

impl TypeCounts {
    pub fn total(&self) -> usize {
        self.buy + self.sell + self.transfer + self.settlement
    }

    fn count(&mut self, transaction_type: TransactionType) {
        match transaction_type {
            TransactionType::Buy => self.buy += 1,
            TransactionType::Sell => self.sell += 1,
            TransactionType::Transfer => self.transfer += 1,
            TransactionType::Settlement => self.settlement += 1
        }
    }
}

/// Money totals over a set of trades and income/expense entries.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub struct PeriodFigures {
    pub sales: Decimal,
    pub purchases: Decimal,
    pub transfer_charges: Decimal,
    pub income: Decimal,
    pub expenses: Decimal
}

impl PeriodFigures {
    pub fn profit(&self) -> Decimal {
        self.sales
            .saturating_sub(self.purchases)
            .saturating_add(self.transfer_charges)
            .saturating_sub(self.expenses)
            .saturating_add(self.income)
    }

    fn add_transaction(&mut self, transaction: &Transaction) {
        match transaction.transaction_type {
            TransactionType::Buy => self.purchases = self.purchases.saturating_add(transaction.total_amount),
            TransactionType::Sell => self.sales = self.sales.saturating_add(transaction.total_amount),
            TransactionType::Transfer => {
                let charges = transaction.transfer_charges.unwrap_or_default();
                self.transfer_charges = self.transfer_charges.saturating_add(charges);
            }
            TransactionType::Settlement => {}
        }
    }

    fn add_entry(&mut self, entry: &LedgerEntry) {
        match entry.kind {
            EntryKind::Income => self.income = self.income.saturating_add(entry.amount),
            EntryKind::Expense => self.expenses = self.expenses.saturating_add(entry.amount)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub struct TradeSummary {
    pub counts: TypeCounts,
    pub figures: PeriodFigures
}

impl TradeSummary {
    pub fn from_records(transactions: &[Transaction], entries: &[LedgerEntry], range: &DateRange) -> Self {
        let mut summary = Self::default();

        for transaction in transactions.iter().filter(|transaction| range.contains(transaction.date)) {
            summary.counts.count(transaction.transaction_type);
            summary.figures.add_transaction(transaction);
        }

        for entry in entries.iter().filter(|entry| range.contains(Some(entry.date))) {
            summary.figures.add_entry(entry);
        }

        summary
    }

    pub fn profit(&self) -> Decimal {
        self.figures.profit()
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub figures: PeriodFigures
}

/// Groups figures by calendar month, oldest first. Undated trades are skipped.
pub fn monthly_breakdown(transactions: &[Transaction], entries: &[LedgerEntry], range: &DateRange) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<(i32, u32), PeriodFigures> = BTreeMap::new();

    for transaction in transactions.iter().filter(|transaction| range.contains(transaction.date)) {
        if let Some(date) = transaction.date {
            months.entry((date.year(), date.month())).or_default().add_transaction(transaction);
        }
    }

    for entry in entries.iter().filter(|entry| range.contains(Some(entry.date))) {
        months.entry((entry.date.year(), entry.date.month())).or_default().add_entry(entry);
    }

    months.into_iter()
        .map(|((year, month), figures)| MonthlySummary { year, month, figures })
        .collect()
}
