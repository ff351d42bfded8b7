/// Core error types for Encore
use thiserror::Error;

/// Result type alias using `CatalogError`
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Unified error type for the catalog and playlist layer.
///
/// The first five variants are the recoverable kinds a boundary (for
/// example an HTTP layer) is expected to map to client responses.
/// Everything else signals an infrastructure failure and propagates
/// unmodified.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Referenced entity absent
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Principal lacks the required capability on the resource
    #[error("Permission denied")]
    Forbidden,

    /// A write that should have produced a row produced none.
    /// This is a storage contract violation, not a user input error.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// A uniqueness constraint rejected the write
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Cache backend failure that could not be degraded away
    #[error("Cache error: {0}")]
    Cache(String),

    /// Database error (from storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CatalogError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invariant error
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Create a duplicate error
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    /// Create a cache error
    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }

    /// True for the error kinds a request boundary maps to client
    /// responses rather than treating as fatal.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Forbidden
                | Self::Invariant(_)
                | Self::Duplicate(_)
                | Self::Cache(_)
        )
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
