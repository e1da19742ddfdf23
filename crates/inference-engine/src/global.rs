//! Process-wide gateway
//!
//! Artifacts are loaded at most once per process. Concurrent first callers
//! serialize on an init barrier; later callers read the loaded gateway
//! without locking. A failed load leaves the slot empty so startup can report
//! the error instead of serving from unloaded artifacts.

use crate::artifacts::ArtifactConfig;
use crate::engine::InferenceGateway;
use crate::ArtifactError;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::debug;

static GATEWAY: OnceLock<Arc<InferenceGateway>> = OnceLock::new();
static INIT_BARRIER: Mutex<()> = Mutex::new(());

/// Load the gateway on first call; return the loaded instance afterwards.
///
/// Once a load has succeeded, `config` is ignored by later calls.
pub fn init(config: &ArtifactConfig) -> Result<Arc<InferenceGateway>, ArtifactError> {
    if let Some(gateway) = GATEWAY.get() {
        return Ok(Arc::clone(gateway));
    }

    let _guard = INIT_BARRIER.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(gateway) = GATEWAY.get() {
        debug!("Gateway loaded by a concurrent caller");
        return Ok(Arc::clone(gateway));
    }

    let gateway = Arc::new(InferenceGateway::load(config)?);
    Ok(Arc::clone(GATEWAY.get_or_init(|| gateway)))
}

/// The loaded gateway, if `init` has succeeded
pub fn get() -> Option<Arc<InferenceGateway>> {
    GATEWAY.get().cloned()
}
