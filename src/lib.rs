//! Bookkeeping core for gold and silver traders.
//!
//! The heart of the crate is [`ledger::compute_balance`], which nets what a
//! merchant owes the business against what the business owes the merchant.
//! Around it sit the data-access contract of the hosted store, an injectable
//! expiring cache, the `TradeService` tying them together and a CSV importer.

pub mod cache;
pub mod import;
pub mod ledger;
pub mod models;
pub mod service;
pub mod storage;
pub mod types;
