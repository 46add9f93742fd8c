mod entry;
mod errors;
mod merchant;
mod transaction;

use serde::{Deserialize, Serialize};

pub use entry::{EntryKind, LedgerEntry};
pub use errors::ValidationError;
pub use merchant::{Merchant, StockRecord};
pub use transaction::{Transaction, TransactionAmounts, TransactionUpdate};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Buy,
    Sell,
    Transfer,
    Settlement
}
