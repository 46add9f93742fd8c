use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::errors::ValidationError;
use crate::models::TransactionType;
use crate::types::{MerchantId, MetalType, SettlementDirection, SettlementType, TransactionId};

/// A single trade recorded against a merchant.
///
/// Field names on the wire follow the CSV import columns. Every amount
/// except `total` is optional because each transaction type only fills
/// the columns it needs: `paid` on buys, `received` on sells, `settlement`
/// and `direction` on settlements, `charges` and the locations on transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store assigned identifier. Empty until the transaction is persisted.
    #[serde(default)]
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(rename = "merchant")]
    pub merchant_id: MerchantId,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(rename = "metal", default)]
    pub metal_type: Option<MetalType>,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub rate: Option<Decimal>,
    #[serde(rename = "total", default)]
    pub total_amount: Decimal,
    #[serde(rename = "paid", default)]
    pub amount_paid: Option<Decimal>,
    #[serde(rename = "received", default)]
    pub amount_received: Option<Decimal>,
    #[serde(rename = "settlement", default)]
    pub settlement_type: Option<SettlementType>,
    #[serde(rename = "direction", default)]
    pub settlement_direction: Option<SettlementDirection>,
    #[serde(rename = "charges", default)]
    pub transfer_charges: Option<Decimal>,
    #[serde(rename = "pickup", default)]
    pub pickup_location: Option<String>,
    #[serde(rename = "drop", default)]
    pub drop_location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>
}

/// The monetary fields the balance rules read, with absent values resolved.
///
/// `paid` stays optional and a zero payment reads as no payment: a buy
/// only accrues once something has been paid towards it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransactionAmounts {
    pub total: Decimal,
    pub paid: Option<Decimal>,
    pub received: Decimal
}

/// Partial update applied by `Repository::update_transaction`.
///
/// Only the fields that are `Some` overwrite the stored transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    pub transaction_type: Option<TransactionType>,
    pub merchant_id: Option<MerchantId>,
    pub merchant_name: Option<String>,
    pub metal_type: Option<MetalType>,
    pub weight: Option<Decimal>,
    pub rate: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    pub amount_received: Option<Decimal>,
    pub settlement_type: Option<SettlementType>,
    pub settlement_direction: Option<SettlementDirection>,
    pub transfer_charges: Option<Decimal>,
    pub pickup_location: Option<String>,
    pub drop_location: Option<String>,
    pub notes: Option<String>,
    pub date: Option<NaiveDate>
}

impl Transaction {
    /// Creates a transaction with only the fields every type shares.
    pub fn new(transaction_type: TransactionType, merchant_id: impl Into<MerchantId>, total_amount: Decimal) -> Self {
        Self {
            id: TransactionId::new(),
            transaction_type,
            merchant_id: merchant_id.into(),
            merchant_name: None,
            metal_type: None,
            weight: None,
            rate: None,
            total_amount,
            amount_paid: None,
            amount_received: None,
            settlement_type: None,
            settlement_direction: None,
            transfer_charges: None,
            pickup_location: None,
            drop_location: None,
            notes: None,
            date: None
        }
    }

    pub fn amounts(&self) -> TransactionAmounts {
        TransactionAmounts {
            total: self.total_amount,
            paid: self.amount_paid.filter(|paid| !paid.is_zero()),
            received: self.amount_received.unwrap_or_default()
        }
    }

    pub fn metal(&self) -> MetalType {
        self.metal_type.unwrap_or_default()
    }

    pub fn apply_update(&mut self, update: TransactionUpdate) {
        if let Some(value) = update.transaction_type { self.transaction_type = value; }
        if let Some(value) = update.merchant_id { self.merchant_id = value; }
        if update.merchant_name.is_some() { self.merchant_name = update.merchant_name; }
        if update.metal_type.is_some() { self.metal_type = update.metal_type; }
        if update.weight.is_some() { self.weight = update.weight; }
        if update.rate.is_some() { self.rate = update.rate; }
        if let Some(value) = update.total_amount { self.total_amount = value; }
        if update.amount_paid.is_some() { self.amount_paid = update.amount_paid; }
        if update.amount_received.is_some() { self.amount_received = update.amount_received; }
        if update.settlement_type.is_some() { self.settlement_type = update.settlement_type; }
        if update.settlement_direction.is_some() { self.settlement_direction = update.settlement_direction; }
        if update.transfer_charges.is_some() { self.transfer_charges = update.transfer_charges; }
        if update.pickup_location.is_some() { self.pickup_location = update.pickup_location; }
        if update.drop_location.is_some() { self.drop_location = update.drop_location; }
        if update.notes.is_some() { self.notes = update.notes; }
        if update.date.is_some() { self.date = update.date; }
    }

    /// Cleans a transaction coming from an untrusted source before it is stored.
    ///
    /// Negative quantities, rates and totals are reset to zero and the metal
    /// defaults to gold. Buys and sells missing either the weight or the total
    /// get it derived from the other through the rate.
    ///
    /// # Errors
    /// Returns `ValidationError` if:
    /// - The merchant reference is blank.
    /// - A buy or sell ends up with neither weight nor total.
    /// - Deriving the weight or total falls outside the decimal range.
    pub fn validate_and_clean(mut self) -> Result<Self, ValidationError> {
        if self.merchant_id.trim().is_empty() {
            return Err(ValidationError::missing_merchant(&self))
        }

        let mut weight = non_negative(self.weight);
        let rate = non_negative(self.rate);
        let mut amount = non_negative(Some(self.total_amount));

        if matches!(self.transaction_type, TransactionType::Buy | TransactionType::Sell) {
            if weight.is_zero() && amount > Decimal::ZERO && rate > Decimal::ZERO {
                weight = amount.checked_div(rate).ok_or_else(|| ValidationError::value_overflow(&self))?;
            }

            if amount.is_zero() && weight > Decimal::ZERO && rate > Decimal::ZERO {
                amount = weight.checked_mul(rate).ok_or_else(|| ValidationError::value_overflow(&self))?;
            }

            if weight.is_zero() && amount.is_zero() {
                return Err(ValidationError::no_trade_value(&self))
            }
        }

        self.metal_type = Some(self.metal());
        self.weight = Some(weight);
        self.rate = Some(rate);
        self.total_amount = amount;

        Ok(self)
    }
}

fn non_negative(value: Option<Decimal>) -> Decimal {
    value.filter(|value| !value.is_sign_negative()).unwrap_or_default()
}
