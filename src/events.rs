//! Observer interface between the game core and the UI layer
//!
//! The simulation queues events while it ticks; the game loop emits them
//! once the tick is done, so handlers never observe half-updated state.

use crate::ledger::LeaderboardEntry;
use crate::sim::{CollisionKind, GameMode, SessionPhase, TournamentRef};

/// Something the UI, audio or ledger bridge may care about
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged {
        from: SessionPhase,
        to: SessionPhase,
    },
    /// Actor flapped
    Flap,
    ScoreChanged {
        score: u64,
    },
    GameOver {
        score: u64,
        best: u64,
        cause: CollisionKind,
    },
    /// Run beat the stored best; the ledger bridge persists it
    HighScore {
        score: u64,
        mode: GameMode,
        tournament: Option<TournamentRef>,
    },
    RankChanged {
        rank: Option<u32>,
    },
    /// Ledger table differs from the last one applied
    LeaderboardUpdated {
        entries: Vec<LeaderboardEntry>,
    },
}

/// Discriminant used to subscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PhaseChanged,
    Flap,
    ScoreChanged,
    GameOver,
    HighScore,
    RankChanged,
    LeaderboardUpdated,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::PhaseChanged { .. } => EventKind::PhaseChanged,
            GameEvent::Flap => EventKind::Flap,
            GameEvent::ScoreChanged { .. } => EventKind::ScoreChanged,
            GameEvent::GameOver { .. } => EventKind::GameOver,
            GameEvent::HighScore { .. } => EventKind::HighScore,
            GameEvent::RankChanged { .. } => EventKind::RankChanged,
            GameEvent::LeaderboardUpdated { .. } => EventKind::LeaderboardUpdated,
        }
    }
}

/// Returned by [`EventBus::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u32);

pub type Handler = Box<dyn FnMut(&GameEvent)>;

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    handler: Handler,
}

/// Synchronous single-threaded event dispatch
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u32,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&GameEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            kind,
            handler: Box::new(handler),
        });
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Call every handler subscribed to this event's kind, in subscription order
    pub fn emit(&mut self, event: &GameEvent) {
        let kind = event.kind();
        for sub in self.subscriptions.iter_mut().filter(|s| s.kind == kind) {
            (sub.handler)(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_matching_kind_only() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        bus.subscribe(EventKind::ScoreChanged, move |e| sink.borrow_mut().push(e.clone()));

        bus.emit(&GameEvent::Flap);
        bus.emit(&GameEvent::ScoreChanged { score: 4 });

        assert_eq!(*seen.borrow(), vec![GameEvent::ScoreChanged { score: 4 }]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));

        let c = count.clone();
        let id = bus.subscribe(EventKind::Flap, move |_| *c.borrow_mut() += 1);
        bus.emit(&GameEvent::Flap);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(&GameEvent::Flap);

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_handlers_run_in_subscription_order() {
        let mut bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second"] {
            let o = order.clone();
            bus.subscribe(EventKind::RankChanged, move |_| o.borrow_mut().push(tag));
        }
        bus.emit(&GameEvent::RankChanged { rank: Some(1) });
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }
}
