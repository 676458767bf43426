//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! starting walks or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::registry::PopulateReport;
use crate::session::{SessionSnapshot, WalkOutcome};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Load every encounter and pickup visual.
    ///
    /// Walks populate on demand, so calling this is only needed to show the
    /// dungeon before the hero sets off.
    pub async fn populate(&self) -> Result<PopulateReport> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Populate { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Start a walk without waiting for it.
    ///
    /// Progress is reported through events; failures are logged.
    pub async fn walk_path(&self) -> Result<()> {
        self.send(Command::Walk { reply: None }).await
    }

    /// Walk the path and wait for the reunion (or a failure).
    pub async fn walk_path_and_wait(&self) -> Result<WalkOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Walk {
            reply: Some(reply_tx),
        })
        .await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Rebuild the session from the dungeon.
    ///
    /// Queues behind a walk in progress.
    pub async fn reset(&self) -> Result<PopulateReport> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Reset { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the session (read-only snapshot)
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Snapshot { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Hero` - movement, hit points, inventory
    /// - `Topic::Encounter` - enemies shown/hidden, fight progress
    /// - `Topic::Traversal` - walk lifecycle
    /// - `Topic::Dialog` - blocking prompts
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut hero_rx = handle.subscribe(Topic::Hero);
    /// while let Ok(event) = hero_rx.recv().await {
    ///     // update the status bar
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
