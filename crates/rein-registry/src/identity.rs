//! Parsing of composite resource identity strings
//!
//! Registration call sites describe the resource they attach to as a
//! composite string of the informal shape `"<group>/<version>, Resource=<name>"`.
//! Parsing is total: every input maps to some identity, and a degraded parse
//! is distinguishable only by its empty or `Default` fields.

use rein_types::ResourceIdentity;
use tracing::warn;

/// Parse a composite identity string into a structured identity.
///
/// All paths tag the identity with `created_by`; callers pass the process
/// actor tag. Never fails; callers needing strict validation must inspect
/// the returned fields.
pub fn parse_identity(s: &str, created_by: &str) -> ResourceIdentity {
    let segments: Vec<&str> = s.split(',').collect();
    if segments.len() != 2 {
        warn!(input = %s, "unparseable resource identity, defaulting to the full string");
        return ResourceIdentity::new(s, "", "", created_by);
    }

    let resource = segments[1].strip_prefix(" Resource=").unwrap_or(segments[1]);

    let group_version: Vec<&str> = segments[0].split('/').collect();
    if group_version.len() != 2 {
        warn!(input = %s, "identity carries no group/version split, defaulting the version");
        return ResourceIdentity::new(resource, segments[0], "Default", created_by);
    }

    ResourceIdentity::new(resource, group_version[0], group_version[1], created_by)
}
