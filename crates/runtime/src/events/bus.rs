//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{DialogEvent, EncounterEvent, HeroEvent, TraversalEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Hero movement, hit points and inventory
    Hero,
    /// Encounter visibility and fight progress
    Encounter,
    /// Walk lifecycle
    Traversal,
    /// Blocking dialog prompts
    Dialog,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Hero, Topic::Encounter, Topic::Traversal, Topic::Dialog];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Hero(HeroEvent),
    Encounter(EncounterEvent),
    Traversal(TraversalEvent),
    Dialog(DialogEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Hero(_) => Topic::Hero,
            Event::Encounter(_) => Topic::Encounter,
            Event::Traversal(_) => Topic::Traversal,
            Event::Dialog(_) => Topic::Dialog,
        }
    }
}

impl From<HeroEvent> for Event {
    fn from(event: HeroEvent) -> Self {
        Event::Hero(event)
    }
}

impl From<EncounterEvent> for Event {
    fn from(event: EncounterEvent) -> Self {
        Event::Encounter(event)
    }
}

impl From<TraversalEvent> for Event {
    fn from(event: TraversalEvent) -> Self {
        Event::Traversal(event)
    }
}

impl From<DialogEvent> for Event {
    fn from(event: DialogEvent) -> Self {
        Event::Dialog(event)
    }
}

/// Topic-based event bus
///
/// Channels are created up front for every [`Topic`], so publishing and
/// subscribing never contend on a lock.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity.max(1)).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();

        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        // every topic is inserted by `with_capacity`
        &self.channels[&topic]
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
