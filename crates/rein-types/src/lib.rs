//! REIN Types - Core types for controller registration tracing
//!
//! REIN (Registration Event Instrumentation) records which reconcile
//! handlers attached to which resource kinds, and drives an
//! annotation-triggered export workflow over watched configuration records.
//!
//! ## Architectural Boundaries
//!
//! - **rein-types** owns: pure value types and the annotation/label wire keys
//! - **rein-registry** owns: the concurrent registration trail and its export
//! - **rein-controller** owns: the reconcile handler and store collaborator
//!
//! ## Key Concepts
//!
//! - **ResourceIdentity**: The `(resource, group, version)` triple a handler
//!   registered against, plus a provenance tag
//! - **RegistrationEvent**: One recorded registration fact
//! - **ConfigRecord**: The one typed watched-object shape the handler
//!   understands; conversion from wire form is the dispatcher's job

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod identity;
pub mod record;

// Re-export main types
pub use identity::{RegistrationEvent, ResourceIdentity};
pub use record::{
    ConfigRecord, EXPORT_ANNOTATION, EXPORT_DONE, EXPORT_LABEL, IGNORE_VALUE, INITIAL_PHASE,
    MATCHER_IDENTITY, PHASE_ANNOTATION,
};
