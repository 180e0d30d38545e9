//! Controller configuration

use std::sync::Arc;

use rein_registry::{spawn_snapshot_dump, ControllerContext, SnapshotDumpConfig};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

/// Configuration for a REIN controller process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Actor tag identifying which bootstrap path produced this process.
    /// Registrations and export triggers compare against this tag exactly.
    #[serde(default = "default_actor_tag")]
    pub actor_tag: String,

    /// One-shot snapshot dump settings.
    #[serde(default)]
    pub snapshot: SnapshotDumpConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            actor_tag: default_actor_tag(),
            snapshot: SnapshotDumpConfig::default(),
        }
    }
}

fn default_actor_tag() -> String {
    "operator".to_string()
}

impl ControllerConfig {
    /// Build the shared context and launch the one-shot snapshot dump.
    ///
    /// Must run inside a tokio runtime. The returned handle is the dump
    /// task's; dropping it leaves the task running.
    pub fn launch(self) -> (Arc<ControllerContext>, JoinHandle<()>) {
        let ctx = Arc::new(ControllerContext::new(self.actor_tag));
        let dump = spawn_snapshot_dump(ctx.clone(), self.snapshot);
        (ctx, dump)
    }
}
