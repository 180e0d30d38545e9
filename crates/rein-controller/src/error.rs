//! Controller error types

use rein_registry::ExportError;
use rein_types::ConfigRecord;
use thiserror::Error;

use crate::store::StoreError;

/// Errors answered by a reconcile delivery.
///
/// The dispatch collaborator treats any error as "retry this delivery
/// later"; the handler itself never retries.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Snapshot serialization failed; no store write was attempted.
    #[error("snapshot export failed: {0}")]
    Snapshot(#[from] ExportError),

    /// The store rejected the update. `record` is the pre-mutation record
    /// the dispatcher should redeliver.
    #[error("store update rejected: {source}")]
    UpdateRejected {
        record: Box<ConfigRecord>,
        #[source]
        source: StoreError,
    },
}

/// Result type for reconcile operations
pub type Result<T> = std::result::Result<T, ReconcileError>;
