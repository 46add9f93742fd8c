use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord, Trim};
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error, info};

use crate::cache::DataCache;
use crate::models::Transaction;
use crate::service::{MigrationReport, TradeService};
use crate::storage::Repository;

/// A parsed row together with the file line it started on.
type Row = (u64, Result<Transaction, csv::Error>);

/// Streams transactions from a CSV file into a `TradeService`.
///
/// Parsing runs on a blocking task and hands rows over a bounded channel,
/// so a large file never sits in memory at once. Rows are validated and
/// stored in file order.
pub struct CsvImporter<R, C> {
    service: Arc<TradeService<R, C>>,
    backpressure: usize
}

impl<R, C> CsvImporter<R, C>
where
    R: Repository,
    C: DataCache<Vec<Transaction>>
{
    pub fn new(service: Arc<TradeService<R, C>>) -> Self {
        let backpressure = service.config().import_backpressure;

        Self {
            service,
            backpressure
        }
    }

    /// Imports every row of the file at `path` into `scope`.
    ///
    /// Malformed rows and rows failing validation are logged and reported
    /// against the file line they start on, header included.
    /// A file that cannot be opened yields an empty report.
    pub async fn run(&self, path: &str, scope: &str) -> anyhow::Result<MigrationReport> {
        let (sender, receiver) = mpsc::channel::<Row>(self.backpressure.max(1));
        let reader_handle = Self::spawn_csv_reader(path.to_string(), sender);
        let report = self.store_rows(scope, receiver).await;

        if let Err(error) = reader_handle.await {
            error!("CSV ingestion failed: {error}");
        }

        info!("Imported {} transactions from {path} with {} rejected", report.migrated, report.errors.len());

        Ok(report)
    }

    fn spawn_csv_reader(path: String, sender: mpsc::Sender<Row>) -> JoinHandle<()> {
        spawn_blocking(move || {
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(error) => {
                    error!("Error opening CSV at path: {path} | {error}");
                    return;
                }
            };

            let mut reader = ReaderBuilder::new()
                .trim(Trim::All)
                .flexible(true)
                .from_reader(BufReader::new(file));

            let headers = match reader.headers() {
                Ok(headers) => headers.clone(),
                Err(error) => {
                    error!("Error reading CSV headers at path: {path} | {error}");
                    return;
                }
            };

            let mut record = StringRecord::new();

            loop {
                let row = match reader.read_record(&mut record) {
                    Ok(false) => break,
                    Ok(true) => {
                        let line = record.position().map_or(0, |position| position.line());
                        (line, record.deserialize::<Transaction>(Some(&headers)))
                    }
                    Err(error) => {
                        let line = error.position().map_or(reader.position().line(), |position| position.line());
                        let fatal = error.is_io_error();

                        if sender.blocking_send((line, Err(error))).is_err() || fatal {
                            break;
                        }
                        continue;
                    }
                };

                if sender.blocking_send(row).is_err() {
                    break;
                }
            }
        })
    }

    async fn store_rows(&self, scope: &str, mut receiver: mpsc::Receiver<Row>) -> MigrationReport {
        let mut report = MigrationReport::default();
        while let Some((line, row)) = receiver.recv().await {
            let transaction = match row {
                Ok(transaction) => transaction,
                Err(error) => {
                    error!("CSV deserialization error: {error}");
                    report.errors.push(format!("Line {line}: {error}"));
                    continue;
                }
            };

            match self.service.migrate_transaction(scope, transaction).await {
                Ok(stored) => {
                    debug!("Transaction [{}]:[{:?}] for merchant [{}] imported", stored.id, stored.transaction_type, stored.merchant_id);
                    report.migrated += 1;
                }
                Err(error) => {
                    error!("{error}");
                    report.errors.push(format!("Line {line}: {error}"));
                }
            }
        }

        report
    }
}
