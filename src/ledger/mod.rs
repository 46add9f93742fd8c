mod analytics;
mod balance;
mod stock;

pub use analytics::{monthly_breakdown, DateRange, MonthlySummary, PeriodFigures, TradeSummary, TypeCounts};
pub use balance::{balances_by_merchant, compute_balance, merchant_totals, Balance, LedgerTotals};
pub use stock::{compute_stock, StockLevels};
