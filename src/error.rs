use std::fmt;

/// Error produced at the storage backend seam.
///
/// These never escape `ShelfStore`'s public API — reads fail open to an
/// empty shelf and writes are logged and swallowed. Backends return them so
/// the store can decide what to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    Io(String),
    Serde(String),
    LockPoisoned(&'static str),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(message) => write!(f, "storage io error: {}", message),
            StorageError::Serde(message) => write!(f, "storage serde error: {}", message),
            StorageError::LockPoisoned(operation) => {
                write!(f, "storage lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

/// A shelf entry was constructed without a usable id.
///
/// The id is the sole dedup key, so an empty id would make membership
/// non-deterministic. Construction rejects it up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEntry {
    pub message: String,
}

impl fmt::Display for InvalidEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid shelf entry: {}", self.message)
    }
}

impl std::error::Error for InvalidEntry {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = StorageError::LockPoisoned("read");
        assert_eq!(err.to_string(), "storage lock poisoned during read");

        let err = StorageError::Serde("unexpected token".into());
        assert_eq!(err.to_string(), "storage serde error: unexpected token");

        let err = InvalidEntry {
            message: "id is empty".into(),
        };
        assert_eq!(err.to_string(), "invalid shelf entry: id is empty");
    }

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StorageError = io.into();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
