use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Merchant, Transaction, TransactionType};
use crate::types::MerchantId;

/// Net position between the business and one merchant.
///
/// At most one side is positive once computed.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub struct Balance {
    /// What the merchant owes the business.
    pub due: Decimal,
    /// What the business owes the merchant.
    pub owe: Decimal
}

impl Balance {
    /// Offsets the accumulated sides against each other, then floors both at zero.
    fn net_off(mut due: Decimal, mut owe: Decimal) -> Self {
        if due > Decimal::ZERO && owe > Decimal::ZERO {
            if due >= owe {
                due -= owe;
                owe = Decimal::ZERO;
            } else {
                owe -= due;
                due = Decimal::ZERO;
            }
        }

        Self {
            due: due.max(Decimal::ZERO),
            owe: owe.max(Decimal::ZERO)
        }
    }

    /// Signed position, positive when the merchant owes the business.
    pub fn net(&self) -> Decimal {
        self.due - self.owe
    }

    pub fn is_settled(&self) -> bool {
        self.due.is_zero() && self.owe.is_zero()
    }
}

/// Sums of every merchant's due and owe, as shown above the merchant list.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub struct LedgerTotals {
    pub total_due: Decimal,
    pub total_owe: Decimal
}

/// Computes the balance of `merchant_id` from the full transaction history.
///
/// Transactions of other merchants are ignored and the order of the input
/// does not matter: every contribution is accumulated before the single
/// net-off step.
pub fn compute_balance(merchant_id: &str, transactions: &[Transaction]) -> Balance {
    accumulate(transactions.iter().filter(|transaction| transaction.merchant_id == merchant_id))
}

/// Computes the balance of every merchant that appears in `transactions`.
pub fn balances_by_merchant(transactions: &[Transaction]) -> BTreeMap<MerchantId, Balance> {
    let mut grouped: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();

    for transaction in transactions {
        grouped.entry(transaction.merchant_id.as_str()).or_default().push(transaction);
    }

    grouped.into_iter()
        .map(|(merchant_id, history)| (merchant_id.to_string(), accumulate(history)))
        .collect()
}

pub fn merchant_totals(merchants: &[Merchant], transactions: &[Transaction]) -> LedgerTotals {
    let balances = balances_by_merchant(transactions);

    merchants.iter()
        .filter_map(|merchant| balances.get(&merchant.id))
        .fold(LedgerTotals::default(), |totals, balance| LedgerTotals {
            total_due: totals.total_due.saturating_add(balance.due),
            total_owe: totals.total_owe.saturating_add(balance.owe)
        })
}

fn accumulate<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Balance {
    let mut due = Decimal::ZERO;
    let mut owe = Decimal::ZERO;

    for transaction in transactions {
        let amounts = transaction.amounts();

        match transaction.transaction_type {
            // Needs both a payment and a total; a zero in either means nothing is owed.
            TransactionType::Buy => {
                if let Some(paid) = amounts.paid.filter(|_| !amounts.total.is_zero()) {
                    let remaining = amounts.total.saturating_sub(paid);

                    if remaining > Decimal::ZERO {
                        owe = owe.saturating_add(remaining);
                    }
                }
            }
            TransactionType::Sell => {
                due = due.saturating_add(amounts.total);
                due = due.saturating_sub(amounts.received);
            }
            // Cash, bank and metal settlements all reduce the due by their value.
            // A settlement without a type is not counted.
            TransactionType::Settlement => {
                if transaction.settlement_type.is_some() {
                    due = due.saturating_sub(amounts.total);
                }
            }
            TransactionType::Transfer => {}
        }
    }

    Balance::net_off(due, owe)
}
