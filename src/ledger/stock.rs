use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TransactionType};
use crate::types::{MetalType, SettlementDirection};

/// Metal on hand derived from the trade history.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub struct StockLevels {
    /// Grams.
    pub gold: Decimal,
    /// Kilograms.
    pub silver: Decimal
}

impl StockLevels {
    pub fn get(&self, metal_type: MetalType) -> Decimal {
        match metal_type {
            MetalType::Gold => self.gold,
            MetalType::Silver => self.silver
        }
    }

    fn adjust(&mut self, metal_type: MetalType, delta: Decimal) {
        let level = match metal_type {
            MetalType::Gold => &mut self.gold,
            MetalType::Silver => &mut self.silver
        };

        *level = level.saturating_add(delta);
    }
}

/// Buys add weight, sells remove it and metal settlements move it in the
/// settlement's direction. Cash and bank settlements and transfers leave
/// stock untouched.
pub fn compute_stock(transactions: &[Transaction]) -> StockLevels {
    let mut levels = StockLevels::default();

    for transaction in transactions {
        let weight = transaction.weight.unwrap_or_default();

        match transaction.transaction_type {
            TransactionType::Buy => levels.adjust(transaction.metal(), weight),
            TransactionType::Sell => levels.adjust(transaction.metal(), -weight),
            TransactionType::Settlement => {
                let is_metal = transaction.settlement_type.and_then(|kind| kind.metal()).is_some();

                match (is_metal, transaction.settlement_direction) {
                    (true, Some(SettlementDirection::Receiving)) => levels.adjust(transaction.metal(), weight),
                    (true, Some(SettlementDirection::Paying)) => levels.adjust(transaction.metal(), -weight),
                    _ => {}
                }
            }
            TransactionType::Transfer => {}
        }
    }

    levels
}
