//! Prints a one-line story of the walk from runtime events.
use std::collections::HashMap;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::warn;

use runtime::{
    DialogEvent, EncounterEvent, Event, FightOutcome, HeroEvent, RuntimeHandle, Topic,
    TraversalEvent,
};

/// Background task following every topic of a runtime.
pub struct Narrator {
    tasks: Vec<JoinHandle<()>>,
}

impl Narrator {
    /// `with_dialog` also prints prompts, for runs where nobody answers them.
    pub fn spawn(handle: &RuntimeHandle, with_dialog: bool) -> Self {
        let mut topics = vec![Topic::Hero, Topic::Encounter, Topic::Traversal];
        if with_dialog {
            topics.push(Topic::Dialog);
        }
        let receivers: HashMap<Topic, broadcast::Receiver<Event>> =
            handle.subscribe_multiple(&topics);

        let tasks = receivers
            .into_values()
            .map(|rx| tokio::spawn(follow(rx)))
            .collect();

        Self { tasks }
    }

    pub fn stop(self) {
        for task in self.tasks {
            task.abort();
        }
    }
}

async fn follow(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                if let Some(line) = describe(&event) {
                    println!("{line}");
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(target: "dungeon::narrator", skipped, "narrator fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

/// Human-readable line for `event`, if it deserves one.
pub fn describe(event: &Event) -> Option<String> {
    let line = match event {
        Event::Hero(HeroEvent::HpChanged { previous, hp }) => {
            format!("hp {previous} -> {} / {}", hp.current, hp.maximum)
        }
        Event::Hero(HeroEvent::ItemChanged { current, .. }) => format!("holding {current}"),
        Event::Hero(HeroEvent::Exhausted { position }) => {
            format!("the hero is exhausted at {position}, but presses on")
        }
        Event::Encounter(EncounterEvent::FightStarted {
            position,
            kind,
            rounds,
            ..
        }) => format!("{kind} at {position} attacks ({rounds} rounds)"),
        Event::Encounter(EncounterEvent::FightFinished {
            position,
            outcome: FightOutcome::Defeated,
        }) => format!("the foe at {position} falls"),
        Event::Traversal(TraversalEvent::RoomEntered {
            position, theme, ..
        }) => format!("enter {theme} room {position}"),
        Event::Traversal(TraversalEvent::Stalled { position }) => {
            format!("stuck at {position}; starting over")
        }
        Event::Traversal(TraversalEvent::Aborted { reason, .. }) => {
            format!("the walk ended early: {reason}")
        }
        Event::Dialog(DialogEvent::Shown { text, .. }) => text.clone(),
        _ => return None,
    };
    Some(line)
}
