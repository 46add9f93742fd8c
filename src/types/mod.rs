mod format;

use serde::{Deserialize, Serialize};

pub use format::{fixed, format_currency, format_currency_in_cr, format_weight};

pub type MerchantId = String;
pub type TransactionId = String;
pub type EntryId = String;

/// The metal a trade or stock record is denominated in.
///
/// Gold is weighed in grams and silver in kilograms.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetalType {
    #[default]
    Gold,
    Silver
}

impl MetalType {
    pub const ALL: [MetalType; 2] = [MetalType::Gold, MetalType::Silver];

    pub fn unit(&self) -> &'static str {
        match self {
            MetalType::Gold => "g",
            MetalType::Silver => "kg"
        }
    }
}

/// How a settlement was paid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementType {
    Cash,
    Bank,
    Gold,
    Silver
}

impl SettlementType {
    /// The metal moved by a metal settlement, `None` for cash and bank.
    pub fn metal(&self) -> Option<MetalType> {
        match self {
            SettlementType::Gold => Some(MetalType::Gold),
            SettlementType::Silver => Some(MetalType::Silver),
            SettlementType::Cash | SettlementType::Bank => None
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementDirection {
    Receiving,
    Paying
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    BankTransfer,
    Upi,
    Cheque
}
