//! One-shot background snapshot dump
//!
//! A best-effort diagnostic: once per process lifetime, after a fixed
//! delay, the full unfiltered trail is written to a well-known path.
//! Failures are logged and the task ends; nothing retries and nothing is
//! fatal to the process.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::context::ControllerContext;

/// Settings for the one-shot snapshot dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDumpConfig {
    /// Destination file for the dump.
    pub path: PathBuf,

    /// Seconds to wait before the dump is written.
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
}

impl Default for SnapshotDumpConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/var/log/rein/handlers.csv"),
            delay_secs: default_delay_secs(),
        }
    }
}

fn default_delay_secs() -> u64 {
    300
}

/// Launch the detached dump task. The handle is returned for callers that
/// want to await completion (tests, graceful shutdown); dropping it leaves
/// the task running.
pub fn spawn_snapshot_dump(
    ctx: Arc<ControllerContext>,
    config: SnapshotDumpConfig,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(config.delay_secs)).await;

        match ctx.registry().write_csv_file(&config.path, "") {
            Ok(()) => info!(
                path = %config.path.display(),
                identities = ctx.registry().len(),
                "registration snapshot written"
            ),
            Err(e) => error!(
                path = %config.path.display(),
                error = %e,
                "failed to write registration snapshot"
            ),
        }
    })
}
