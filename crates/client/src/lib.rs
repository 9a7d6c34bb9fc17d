//! HTTP client for the tracker's REST contract plus the optimistic
//! list-sync state used by list views.

pub use http::{Client, ClientError};
pub use list_sync::{ListSync, SyncPhase};
pub use session::Session;

mod http;
mod list_sync;
mod session;
