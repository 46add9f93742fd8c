use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage error: {kind} [{id}] was not found")]
    NotFound {
        kind: &'static str,
        id: String
    },
    #[error("Storage error: {0}")]
    Unavailable(String)
}

impl StorageError {
    pub fn transaction_not_found(id: &str) -> Self {
        Self::NotFound { kind: "transaction", id: id.to_string() }
    }

    pub fn merchant_not_found(id: &str) -> Self {
        Self::NotFound { kind: "merchant", id: id.to_string() }
    }

    pub fn entry_not_found(id: &str) -> Self {
        Self::NotFound { kind: "entry", id: id.to_string() }
    }
}
