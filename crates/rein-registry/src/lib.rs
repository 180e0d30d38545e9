//! REIN Registry - Concurrent registration trail and snapshot export
//!
//! This crate provides the diagnostic core of REIN:
//!
//! - **ControllerContext**: The injected service object carrying the actor
//!   tag, the lifecycle phase cell, and the registry, with no ambient globals
//! - **DiagnosticRegistry**: An append-only concurrent map from resource
//!   identity to its registration events
//! - **Snapshot export**: A deterministic semicolon-delimited table of every
//!   recorded registration, filterable by provenance tag
//! - **Snapshot dump**: A one-shot detached task that writes the full trail
//!   to a well-known path after a fixed delay
//!
//! ## Concurrency
//!
//! Appends from concurrent reconcile workers never lose or interleave
//! events; a snapshot read running alongside writers may miss an event
//! written during the read but never observes a torn one.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod context;
pub mod dump;
pub mod error;
pub mod export;
pub mod identity;
pub mod registry;

// Re-exports
pub use context::ControllerContext;
pub use dump::{spawn_snapshot_dump, SnapshotDumpConfig};
pub use error::{ExportError, Result};
pub use export::{SnapshotRow, CSV_HEADER};
pub use identity::parse_identity;
pub use registry::DiagnosticRegistry;
