//! Browser ownership and the bridge that serializes all browser work.
//!
//! ```text
//! request task ──run()──▶ Coordinator queue ──▶ worker thread ──▶ BrowserSession
//!      ▲                                              │
//!      └──────────────── oneshot reply ◀──────────────┘
//! ```

mod coordinator;
mod session;

pub use coordinator::Coordinator;
pub use session::{BrowserSession, IsolatedPage};
