//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns the [`Session`](crate::session::Session) and
//! processes commands one at a time, so a walk and a reset never interleave.

mod session;

pub use session::{Command, SessionWorker};
