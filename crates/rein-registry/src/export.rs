//! Snapshot export as a semicolon-delimited table
//!
//! One header row, then one row per recorded registration. The writer is
//! flushed after every row so partial output survives a later failure.
//! Retry policy belongs to the caller.

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use rein_types::{RegistrationEvent, ResourceIdentity};
use serde::Serialize;

use crate::error::Result;
use crate::registry::DiagnosticRegistry;

/// Column headers of the exported table.
pub const CSV_HEADER: [&str; 8] = [
    "Resource",
    "ResourceGroup",
    "ResourceVersion",
    "ControllerName",
    "File",
    "Line",
    "CreatedOn",
    "CreatedBy",
];

/// One exported row: an identity paired with one of its registration events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotRow {
    pub resource: String,
    pub group: String,
    pub version: String,
    pub handler_name: String,
    pub source_file: String,
    pub source_line: u32,
    pub registered_during: String,
    pub created_by: String,
}

impl SnapshotRow {
    pub(crate) fn new(identity: &ResourceIdentity, event: &RegistrationEvent) -> Self {
        Self {
            resource: identity.resource.clone(),
            group: identity.group.clone(),
            version: identity.version.clone(),
            handler_name: event.handler_name.clone(),
            source_file: event.source_file.clone(),
            source_line: event.source_line,
            registered_during: event.registered_during.clone(),
            created_by: identity.created_by.clone(),
        }
    }

    fn columns(&self) -> [Cow<'_, str>; 8] {
        [
            Cow::from(&self.resource),
            Cow::from(&self.group),
            Cow::from(&self.version),
            Cow::from(&self.handler_name),
            Cow::from(&self.source_file),
            Cow::from(self.source_line.to_string()),
            Cow::from(&self.registered_during),
            Cow::from(&self.created_by),
        ]
    }
}

impl DiagnosticRegistry {
    /// Write a snapshot as a semicolon-delimited table.
    ///
    /// A non-empty `created_by_filter` keeps only identities with that
    /// provenance tag. Write failures propagate; rows already flushed stay
    /// in the destination.
    pub fn write_csv<W: Write>(&self, writer: &mut W, created_by_filter: &str) -> Result<()> {
        write_row(writer, &CSV_HEADER.map(Cow::from))?;
        writer.flush()?;

        for row in self.export_rows(created_by_filter) {
            write_row(writer, &row.columns())?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Write a snapshot to a file, creating or truncating it.
    pub fn write_csv_file(&self, path: impl AsRef<Path>, created_by_filter: &str) -> Result<()> {
        let mut file = std::fs::File::create(path)?;
        self.write_csv(&mut file, created_by_filter)
    }
}

fn write_row<W: Write>(writer: &mut W, columns: &[Cow<'_, str>; 8]) -> std::io::Result<()> {
    let mut line = String::new();
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            line.push(';');
        }
        line.push_str(&escape_field(column));
    }
    line.push('\n');
    writer.write_all(line.as_bytes())
}

/// Quote a field when it carries the delimiter, a quote, or a line break,
/// doubling any inner quotes.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([';', '"', '\n', '\r']) {
        Cow::from(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::from(field)
    }
}
