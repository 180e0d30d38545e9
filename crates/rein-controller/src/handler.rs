//! Annotation-driven export handler
//!
//! One reconcile callback over one record kind. The dispatch collaborator
//! serializes deliveries per record and owns retry; the handler decides,
//! per delivery, whether to export the registration trail into the record
//! and whether to advance the process lifecycle phase.

use std::sync::Arc;

use async_trait::async_trait;
use rein_registry::ControllerContext;
use rein_types::{
    ConfigRecord, EXPORT_ANNOTATION, EXPORT_DONE, EXPORT_LABEL, IGNORE_VALUE, PHASE_ANNOTATION,
};
use tracing::{error, info, instrument};

use crate::error::{ReconcileError, Result};
use crate::store::RecordStore;

/// Reconcile callback the dispatch collaborator drives.
///
/// `None` represents a deletion. The returned record is the latest version
/// the handler knows; an error asks the dispatcher to redeliver later.
#[async_trait]
pub trait RecordHandler: Send + Sync {
    async fn reconcile(&self, record: Option<ConfigRecord>) -> Result<Option<ConfigRecord>>;
}

/// Handler for the registration-trail export workflow.
pub struct ExportHandler {
    ctx: Arc<ControllerContext>,
    store: Arc<dyn RecordStore>,
}

impl ExportHandler {
    pub fn new(ctx: Arc<ControllerContext>, store: Arc<dyn RecordStore>) -> Self {
        Self { ctx, store }
    }

    /// Serialize the trail filtered to this process's registrations.
    fn render_snapshot(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.ctx
            .registry()
            .write_csv(&mut buf, self.ctx.actor_tag())
            .map_err(|e| {
                error!(error = %e, "failed to serialize registration snapshot");
                ReconcileError::Snapshot(e)
            })?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[async_trait]
impl RecordHandler for ExportHandler {
    #[instrument(skip(self, record))]
    async fn reconcile(&self, record: Option<ConfigRecord>) -> Result<Option<ConfigRecord>> {
        // Deletions pass through untouched.
        let Some(record) = record else {
            return Ok(None);
        };

        // Label gate: only opted-in records are handled at all.
        match record.label(EXPORT_LABEL) {
            Some(value) if value != IGNORE_VALUE => {}
            _ => return Ok(Some(record)),
        }

        let mut updated = record.clone();

        if updated.annotation(EXPORT_ANNOTATION) == Some(self.ctx.actor_tag()) {
            let snapshot = self.render_snapshot()?;
            updated
                .data
                .insert(self.ctx.actor_tag().to_string(), snapshot);
            updated
                .annotations
                .insert(EXPORT_ANNOTATION.to_string(), EXPORT_DONE.to_string());
            info!(
                namespace = %updated.namespace,
                name = %updated.name,
                "registration snapshot exported into record"
            );

            if let Err(source) = self
                .store
                .update(&record.namespace, &record, &updated)
                .await
            {
                // Hand the pre-mutation record back so the dispatcher can
                // retry the delivery.
                return Err(ReconcileError::UpdateRejected {
                    record: Box::new(record),
                    source,
                });
            }
        }

        if let Some(phase) = updated.annotation(PHASE_ANNOTATION) {
            if !phase.is_empty() && phase != IGNORE_VALUE {
                self.ctx.set_phase(phase);
                info!(phase = %phase, "lifecycle phase advanced");
            }
        }

        Ok(Some(updated))
    }
}
