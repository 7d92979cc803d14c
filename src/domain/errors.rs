use thiserror::Error;

/// Failure reading or writing a storage slot.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on slot `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum DomainError {
    /// One or more form fields were empty at submission time.
    #[error("Please fill in all fields (missing: {})", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },
    #[error("An album with ID `{0}` already exists")]
    DuplicateIdentifier(String),
    /// The persisted slot is not a JSON array of well-formed albums.
    #[error("Stored album list is corrupt: {0}")]
    CorruptStorage(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type DomainResult<T> = Result<T, DomainError>;
