pub mod sync_ctx;
pub mod sync_flow;

pub use sync_ctx::SyncCtx;
pub use sync_flow::{SyncFlow, SyncOutcome};
