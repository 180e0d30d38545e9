//! Concurrent registry of handler registrations keyed by resource identity
//!
//! The registry is append-only per key and lives for the process lifetime.
//! Entries are created lazily on first record.

use dashmap::DashMap;
use rein_types::{RegistrationEvent, ResourceIdentity};

use crate::export::SnapshotRow;

/// In-memory registration trail.
///
/// Appends for the same key are serialized by the entry lock, so externally
/// ordered submissions keep their order; appends for distinct keys contend
/// only at shard granularity. Snapshot reads run concurrently with writers
/// and never observe a partially constructed event.
#[derive(Debug, Default)]
pub struct DiagnosticRegistry {
    entries: DashMap<ResourceIdentity, Vec<RegistrationEvent>>,
}

impl DiagnosticRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to the sequence for `identity`, creating the entry
    /// if absent.
    pub fn record(&self, identity: ResourceIdentity, event: RegistrationEvent) {
        self.entries.entry(identity).or_default().push(event);
    }

    /// Snapshot every `(identity, event)` pair as one row each.
    ///
    /// Identities iterate in an unspecified but stable-per-call order;
    /// events keep their per-key append order. A non-empty
    /// `created_by_filter` keeps only identities with that provenance tag.
    pub fn export_rows(&self, created_by_filter: &str) -> Vec<SnapshotRow> {
        let mut rows = Vec::new();
        for entry in self.entries.iter() {
            let identity = entry.key();
            if !created_by_filter.is_empty() && identity.created_by != created_by_filter {
                continue;
            }
            for event in entry.value() {
                rows.push(SnapshotRow::new(identity, event));
            }
        }
        rows
    }

    /// Number of distinct identities with at least one registration.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str) -> RegistrationEvent {
        RegistrationEvent {
            handler_name: name.to_string(),
            source_file: "handlers.rs".to_string(),
            source_line: 42,
            registered_during: "initialization".to_string(),
        }
    }

    fn identity(resource: &str, created_by: &str) -> ResourceIdentity {
        ResourceIdentity::new(resource, "apps", "v1", created_by)
    }

    #[test]
    fn test_record_then_export_counts() {
        let registry = DiagnosticRegistry::new();
        registry.record(identity("deployments", "operator"), event("sync"));
        registry.record(identity("deployments", "operator"), event("cleanup"));
        registry.record(identity("jobs", "operator"), event("sync"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.export_rows("").len(), 3);
    }

    #[test]
    fn test_per_key_order_preserved() {
        let registry = DiagnosticRegistry::new();
        for name in ["first", "second", "third"] {
            registry.record(identity("jobs", "operator"), event(name));
        }

        let rows = registry.export_rows("");
        let names: Vec<&str> = rows.iter().map(|r| r.handler_name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_filter_by_created_by() {
        let registry = DiagnosticRegistry::new();
        registry.record(identity("deployments", "operator"), event("sync"));
        registry.record(identity("jobs", "agent"), event("sync"));

        let operator_rows = registry.export_rows("operator");
        assert_eq!(operator_rows.len(), 1);
        assert_eq!(operator_rows[0].created_by, "operator");

        assert_eq!(registry.export_rows("").len(), 2);
        assert!(registry.export_rows("nobody").is_empty());
    }

    #[test]
    fn test_concurrent_distinct_keys_lose_nothing() {
        for total in [1usize, 10, 1000] {
            let registry = DiagnosticRegistry::new();
            let workers = total.min(8);

            std::thread::scope(|scope| {
                for worker in 0..workers {
                    let registry = &registry;
                    scope.spawn(move || {
                        let mut i = worker;
                        while i < total {
                            registry.record(
                                identity(&format!("resource-{i}"), "operator"),
                                event("sync"),
                            );
                            i += workers;
                        }
                    });
                }
            });

            assert_eq!(registry.export_rows("").len(), total);
            assert_eq!(registry.len(), total);
        }
    }

    #[test]
    fn test_concurrent_same_key_loses_nothing() {
        let registry = DiagnosticRegistry::new();
        let writers = 8;
        let per_writer = 50;

        std::thread::scope(|scope| {
            for _ in 0..writers {
                let registry = &registry;
                scope.spawn(move || {
                    for _ in 0..per_writer {
                        registry.record(identity("jobs", "operator"), event("sync"));
                    }
                });
            }
        });

        assert_eq!(registry.export_rows("").len(), writers * per_writer);
        assert_eq!(registry.len(), 1);
    }
}
