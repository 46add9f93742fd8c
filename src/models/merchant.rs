use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{MerchantId, MetalType};

/// A counterparty the business buys from, sells to, or settles with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    pub id: MerchantId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>
}

impl Merchant {
    pub fn new(id: impl Into<MerchantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: None,
            email: None,
            address: None
        }
    }
}

/// Persisted stock level for one metal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: String,
    pub metal_type: MetalType,
    pub quantity: Decimal
}
