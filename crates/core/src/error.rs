#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Product with this barcode doesn't exist")]
    NotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("File should be jpeg, jpg, or png (got '.{0}')")]
    InvalidExtension(String),

    #[error("File should be no more than {limit} bytes")]
    SizeExceeded { limit: u64 },

    #[error("There is no updated field in the request")]
    NoChanges,

    #[error("Storage error: {0}")]
    Storage(String),
}
