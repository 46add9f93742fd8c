mod csv_importer;
#[cfg(test)]
mod tests;

pub use csv_importer::CsvImporter;
