use crate::models::{Transaction, TransactionType};
use crate::types::{MerchantId, TransactionId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Transaction [{transaction_id}]:[{transaction_type:?}] has no merchant")]
    MissingMerchant {
        transaction_id: TransactionId,
        transaction_type: TransactionType
    },
    #[error("Transaction [{transaction_id}]:[{transaction_type:?}] for merchant [{merchant_id}] has neither weight nor amount")]
    NoTradeValue {
        merchant_id: MerchantId,
        transaction_id: TransactionId,
        transaction_type: TransactionType
    },
    #[error("Transaction [{transaction_id}]:[{transaction_type:?}] for merchant [{merchant_id}] overflows when deriving weight or amount")]
    ValueOverflow {
        merchant_id: MerchantId,
        transaction_id: TransactionId,
        transaction_type: TransactionType
    }
}

impl ValidationError {
    pub fn missing_merchant(tx: &Transaction) -> Self {
        Self::MissingMerchant {
            transaction_id: tx.id.clone(),
            transaction_type: tx.transaction_type
        }
    }

    pub fn no_trade_value(tx: &Transaction) -> Self {
        Self::NoTradeValue {
            merchant_id: tx.merchant_id.clone(),
            transaction_id: tx.id.clone(),
            transaction_type: tx.transaction_type
        }
    }

    pub fn value_overflow(tx: &Transaction) -> Self {
        Self::ValueOverflow {
            merchant_id: tx.merchant_id.clone(),
            transaction_id: tx.id.clone(),
            transaction_type: tx.transaction_type
        }
    }
}
