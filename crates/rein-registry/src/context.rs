//! Shared controller context
//!
//! The context is the injected service object every component receives:
//! the actor tag naming which bootstrap path produced this process, the
//! lifecycle phase cell, and the registration trail. Keeping these on an
//! `Arc<ControllerContext>` instead of ambient globals allows test
//! isolation and multiple concurrent instances in-process.

use std::sync::RwLock;

use rein_types::{RegistrationEvent, INITIAL_PHASE, MATCHER_IDENTITY};
use tracing::debug;

use crate::identity::parse_identity;
use crate::registry::DiagnosticRegistry;

/// Process-wide state shared by registration sites and reconcile handlers.
pub struct ControllerContext {
    /// Which bootstrap path produced the running process. Write-once:
    /// fixed at construction, read-only thereafter.
    actor_tag: String,

    /// Lifecycle phase most recently requested by a watched record. The
    /// value captured at registration time is a best-effort snapshot under
    /// concurrent updates.
    phase: RwLock<String>,

    /// The registration trail.
    registry: DiagnosticRegistry,
}

impl ControllerContext {
    /// Create a context for the given actor tag, starting in the
    /// initialization phase with an empty registry.
    pub fn new(actor_tag: impl Into<String>) -> Self {
        Self {
            actor_tag: actor_tag.into(),
            phase: RwLock::new(INITIAL_PHASE.to_string()),
            registry: DiagnosticRegistry::new(),
        }
    }

    /// The process actor tag.
    pub fn actor_tag(&self) -> &str {
        &self.actor_tag
    }

    /// The lifecycle phase at this moment.
    pub fn current_phase(&self) -> String {
        match self.phase.read() {
            Ok(phase) => phase.clone(),
            // A poisoned lock still holds a usable phase value.
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Advance the lifecycle phase.
    pub fn set_phase(&self, phase: impl Into<String>) {
        let phase = phase.into();
        match self.phase.write() {
            Ok(mut current) => *current = phase,
            Err(poisoned) => *poisoned.into_inner() = phase,
        }
    }

    /// The registration trail.
    pub fn registry(&self) -> &DiagnosticRegistry {
        &self.registry
    }

    /// Record that a handler registered against a resource.
    ///
    /// `resource` is the composite identity string; an empty string records
    /// against the matcher sentinel. The call site and the current phase are
    /// captured into the event.
    #[track_caller]
    pub fn record_handler(&self, name: &str, resource: &str) {
        let caller = std::panic::Location::caller();
        let resource = if resource.is_empty() {
            MATCHER_IDENTITY
        } else {
            resource
        };

        let identity = parse_identity(resource, &self.actor_tag);
        debug!(handler = %name, identity = %identity, "handler registration recorded");

        self.registry.record(
            identity,
            RegistrationEvent {
                handler_name: name.to_string(),
                source_file: caller.file().to_string(),
                source_line: caller.line(),
                registered_during: self.current_phase(),
            },
        );
    }
}

impl std::fmt::Debug for ControllerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerContext")
            .field("actor_tag", &self.actor_tag)
            .field("phase", &self.current_phase())
            .field("identities", &self.registry.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_starts_at_initialization() {
        let ctx = ControllerContext::new("operator");
        assert_eq!(ctx.current_phase(), INITIAL_PHASE);

        ctx.set_phase("steady-state");
        assert_eq!(ctx.current_phase(), "steady-state");
    }

    #[test]
    fn test_record_handler_captures_call_site_and_phase() {
        let ctx = ControllerContext::new("operator");
        ctx.set_phase("bootstrap");
        ctx.record_handler("sync", "apps/v1, Resource=deployments");

        let rows = ctx.registry().export_rows("");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].handler_name, "sync");
        assert_eq!(rows[0].resource, "deployments");
        assert_eq!(rows[0].created_by, "operator");
        assert_eq!(rows[0].registered_during, "bootstrap");
        assert!(rows[0].source_file.ends_with("context.rs"));
        assert!(rows[0].source_line > 0);
    }

    #[test]
    fn test_empty_resource_uses_matcher_sentinel() {
        let ctx = ControllerContext::new("operator");
        ctx.record_handler("catch-all", "");

        let rows = ctx.registry().export_rows("");
        assert_eq!(rows[0].resource, MATCHER_IDENTITY);
        assert_eq!(rows[0].group, "");
        assert_eq!(rows[0].version, "");
    }

    #[test]
    fn test_phase_is_captured_per_registration_not_retroactively() {
        let ctx = ControllerContext::new("operator");
        ctx.record_handler("early", "apps/v1, Resource=deployments");
        ctx.set_phase("steady-state");
        ctx.record_handler("late", "apps/v1, Resource=deployments");

        let rows = ctx.registry().export_rows("");
        let phases: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.handler_name.as_str(), r.registered_during.as_str()))
            .collect();
        assert_eq!(
            phases,
            [("early", INITIAL_PHASE), ("late", "steady-state")]
        );
    }
}
