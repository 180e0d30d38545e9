//! Resource identity and registration event values
//!
//! A ResourceIdentity names the kind of resource a handler was registered
//! against. Identities are pure values: equality is by all four fields and
//! they serve as registry keys.

use serde::{Deserialize, Serialize};

/// The kind of cluster resource a handler was registered against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentity {
    /// Plural resource name, e.g. `configrecords`.
    pub resource: String,

    /// API group. Empty for the core group.
    pub group: String,

    /// API version within the group.
    pub version: String,

    /// Tag of the subsystem that created the registration.
    pub created_by: String,
}

impl ResourceIdentity {
    /// Create an identity with an explicit provenance tag.
    pub fn new(
        resource: impl Into<String>,
        group: impl Into<String>,
        version: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            resource: resource.into(),
            group: group.into(),
            version: version.into(),
            created_by: created_by.into(),
        }
    }
}

impl std::fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}, Resource={}",
            self.group, self.version, self.resource
        )
    }
}

/// One recorded fact: a named handler attached to a resource kind from a
/// specific call site during a specific lifecycle phase.
///
/// Events are immutable once created; the registry only ever appends them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationEvent {
    /// Name the handler was registered under.
    pub handler_name: String,

    /// Source file of the registration call site.
    pub source_file: String,

    /// Source line of the registration call site.
    pub source_line: u32,

    /// Lifecycle phase current at the moment of registration.
    pub registered_during: String,
}
