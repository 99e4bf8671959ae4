//! Flow context provider for RIP MIND.
//!
//! Provides the [`LetterFlow`] to all components via use_context.
//!
//! ## Usage
//!
//! ```ignore
//! // In child components
//! let flow = use_flow();
//! update_flow(flow, |f| f.set_consent(true));
//! ```

use std::path::{Path, PathBuf};

use dioxus::prelude::*;
use ripmind_core::config::DATABASE_FILE;
use ripmind_core::{FlowConfig, LetterFlow, LetterResult, LetterStore, PendingStep};

/// Shared flow type for context.
///
/// `None` when the archive could not be opened at startup.
pub type SharedFlow = Signal<Option<LetterFlow>>;

/// Get the data directory for the application.
/// Uses the global data dir set from command line args.
pub fn get_data_dir() -> PathBuf {
    crate::get_data_dir()
}

/// Open the archive and configuration in `data_dir` and build a flow over them.
pub fn open_flow(data_dir: &Path) -> LetterResult<LetterFlow> {
    let config = FlowConfig::load_from_dir(data_dir)?;
    let store = LetterStore::open(data_dir.join(DATABASE_FILE))?;
    Ok(LetterFlow::new(store, config))
}

/// Hook to access the LetterFlow from context.
pub fn use_flow() -> SharedFlow {
    use_context::<SharedFlow>()
}

/// Run `f` against the flow, if there is one.
pub fn update_flow<R>(mut flow: SharedFlow, f: impl FnOnce(&mut LetterFlow) -> R) -> Option<R> {
    flow.write().as_mut().map(f)
}

/// Apply `pending` once its delay has elapsed.
pub fn schedule_pending(flow: SharedFlow, pending: PendingStep) {
    spawn(async move {
        tokio::time::sleep(pending.delay).await;
        update_flow(flow, |f| f.complete(pending));
    });
}
