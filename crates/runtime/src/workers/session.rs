//! Session worker that owns the authoritative [`Session`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle) and runs
//! them to completion in arrival order. A command sent while a walk is in
//! progress waits until the walk has finished.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use crate::api::Result;
use crate::registry::PopulateReport;
use crate::session::{Session, SessionSnapshot, WalkOutcome};

/// Commands that can be sent to the session worker
pub enum Command {
    /// Create visuals for every encounter and pickup.
    Populate {
        reply: oneshot::Sender<Result<PopulateReport>>,
    },
    /// Walk the path and play the closing scene.
    ///
    /// Without a reply channel the outcome is only logged.
    Walk {
        reply: Option<oneshot::Sender<Result<WalkOutcome>>>,
    },
    /// Rebuild the session from the dungeon.
    Reset {
        reply: oneshot::Sender<Result<PopulateReport>>,
    },
    /// Read-only view of the session.
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Background task that processes session commands.
pub struct SessionWorker {
    session: Session,
    command_rx: mpsc::Receiver<Command>,
}

impl SessionWorker {
    pub fn new(session: Session, command_rx: mpsc::Receiver<Command>) -> Self {
        let dungeon = &session.dungeon;
        info!(
            target: "runtime::worker",
            rows = dungeon.grid().rows(),
            cols = dungeon.grid().cols(),
            steps = dungeon.path().len(),
            minimum_hp = dungeon.minimum_hp(),
            "SessionWorker initialized"
        );

        Self {
            session,
            command_rx,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }
        debug!(target: "runtime::worker", "command channel closed; worker exiting");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Populate { reply } => {
                let result = self.session.populate().await;
                if reply.send(result).is_err() {
                    debug!("Populate reply channel closed (caller dropped)");
                }
            }
            Command::Walk { reply } => {
                let result = self.session.walk().await;
                match reply {
                    Some(reply) => {
                        if reply.send(result).is_err() {
                            debug!("Walk reply channel closed (caller dropped)");
                        }
                    }
                    None => {
                        if let Err(e) = result {
                            error!(target: "runtime::worker", error = %e, "walk failed");
                        }
                    }
                }
            }
            Command::Reset { reply } => {
                let result = self.session.reset().await;
                if reply.send(result).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(self.session.snapshot()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
        }
    }
}
