//! Error types for Horizon Reflow.

use std::path::PathBuf;

use crate::diff::OperationKind;
use crate::model::ItemPosition;

/// Result type alias for Horizon Reflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type, wrapping every subsystem error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A batch could not be applied to a visual collection.
    #[error(transparent)]
    Batch(#[from] BatchError),

    /// A controller update failed.
    #[error(transparent)]
    Update(#[from] UpdateError),

    /// An item source could not produce a sequence.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Configuration could not be loaded or saved.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A malformed operation set.
///
/// Raised before anything is submitted to the visual collection, so the
/// collection is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    /// The operation addresses a section the collection does not have.
    #[error("{kind} at {position} addresses an unknown section")]
    UnknownSection {
        kind: OperationKind,
        position: ItemPosition,
    },

    /// The operation addresses a slot past the end of its layout.
    #[error("{kind} at {position} is out of bounds (layout has {bound} slots)")]
    OutOfBounds {
        kind: OperationKind,
        position: ItemPosition,
        bound: usize,
    },

    /// Two operations claim the same slot of the old layout.
    #[error("old slot {position} is claimed by both a {first} and a {second}")]
    ConflictingSource {
        position: ItemPosition,
        first: OperationKind,
        second: OperationKind,
    },

    /// Two operations fill the same slot of the new layout.
    #[error("new slot {position} is filled by both a {first} and a {second}")]
    ConflictingDestination {
        position: ItemPosition,
        first: OperationKind,
        second: OperationKind,
    },

    /// The batch would leave a different number of items than the data source holds.
    #[error("batch leaves {actual} items but the data source holds {expected}")]
    CountMismatch { expected: usize, actual: usize },
}

/// Errors raised by [`CollectionController`](crate::controller::CollectionController).
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// The computed batch was rejected by the visual collection.
    #[error("failed to apply update: {0}")]
    Batch(#[from] BatchError),

    /// The controller that owns the update queue has been dropped.
    #[error("update queue is disconnected")]
    QueueDisconnected,
}

/// Errors raised by item sources.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The palette has too few unused values for the requested change.
    #[error("palette exhausted: need {needed} unused values, {available} available")]
    PaletteExhausted { needed: usize, available: usize },
}

/// Errors raised while loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to access config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse error.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but is not acceptable.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_error_messages() {
        let err = BatchError::OutOfBounds {
            kind: OperationKind::Remove,
            position: ItemPosition::new(7),
            bound: 3,
        };
        assert_eq!(
            err.to_string(),
            "remove at [0, 7] is out of bounds (layout has 3 slots)"
        );

        let err = BatchError::ConflictingSource {
            position: ItemPosition::new(1),
            first: OperationKind::Remove,
            second: OperationKind::Move,
        };
        assert_eq!(
            err.to_string(),
            "old slot [0, 1] is claimed by both a remove and a move"
        );
    }

    #[test]
    fn test_wrapping() {
        let err: Error = UpdateError::from(BatchError::CountMismatch {
            expected: 2,
            actual: 3,
        })
        .into();
        assert!(err.to_string().contains("data source holds 2"));
    }
}
