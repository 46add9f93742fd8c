mod config;
mod errors;
mod trade_service;

pub use config::ServiceConfig;
pub use errors::ServiceError;
pub use trade_service::{MigrationReport, TradeService};
