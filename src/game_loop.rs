//! The running game: scheduler, session and event bus behind one owner
//!
//! Every mutation goes through `&mut GameLoop`, from either a frame callback
//! or a synchronous input handler. Queued session events are emitted after
//! the mutation finishes.

use crate::events::{EventBus, EventKind, GameEvent, SubscriptionId};
use crate::ledger::{LeaderboardEntry, LeaderboardSnapshot};
use crate::renderer::Painter;
use crate::scheduler::{FrameDriver, GameLoopScheduler, Screen};
use crate::score::ScoreTracker;
use crate::settings::GroundRule;
use crate::sim::{self, GameMode, GameSession, SessionPhase, TickOutcome, TournamentRef};

/// What one frame callback did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Guard closed when the callback fired; nothing ran or drew
    Skipped,
    /// Tick ran and the scene was drawn
    Rendered(TickOutcome),
}

pub struct GameLoop<D> {
    scheduler: GameLoopScheduler,
    session: GameSession,
    bus: EventBus,
    driver: D,
    /// Last ledger table applied
    leaderboard: Vec<LeaderboardEntry>,
}

impl<D: FrameDriver> GameLoop<D> {
    /// Stopped loop on the loading screen with an idle session
    pub fn new(driver: D, seed: u64, best: u64) -> Self {
        Self {
            scheduler: GameLoopScheduler::new(),
            session: GameSession::new(seed, best),
            bus: EventBus::new(),
            driver,
            leaderboard: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        self.scheduler.start(&mut self.driver);
    }

    pub fn stop(&mut self) {
        self.scheduler.stop(&mut self.driver);
    }

    /// Body of a frame callback
    pub fn frame<P: Painter + ?Sized>(&mut self, painter: &mut P) -> FrameOutcome {
        if !self.scheduler.begin_frame() {
            return FrameOutcome::Skipped;
        }

        let outcome = sim::tick(&mut self.session);
        // Drawn before stopping so the final frame shows the crash
        self.session.draw(painter);
        self.flush_events();

        match outcome {
            TickOutcome::Collided(_) | TickOutcome::Halted => self.stop(),
            TickOutcome::Waiting | TickOutcome::Advanced => {
                self.scheduler.schedule_next(&mut self.driver)
            }
        }
        FrameOutcome::Rendered(outcome)
    }

    /// Input accepted: game screen showing and loading done
    pub fn input_enabled(&self) -> bool {
        self.scheduler.guard_open()
    }

    /// Flap input. Returns false if the input was ignored.
    pub fn jump(&mut self) -> bool {
        if !self.input_enabled() {
            return false;
        }
        let applied = sim::jump(&mut self.session);
        self.flush_events();
        applied
    }

    /// Fresh idle play-through in the current mode, loop restarted
    pub fn restart(&mut self, seed: u64) {
        self.stop();
        sim::restart(&mut self.session, seed);
        self.flush_events();
        self.start();
    }

    /// Mode picked on the mode-select screen: reset, show the game, run
    pub fn begin_session(&mut self, mode: GameMode, tournament: Option<TournamentRef>, seed: u64) {
        self.stop();
        self.session.mode = mode;
        self.session.tournament = tournament;
        sim::restart(&mut self.session, seed);
        log::info!("Starting {} session", mode.as_str());
        self.flush_events();
        self.set_screen(Screen::Game);
        self.start();
    }

    pub fn set_screen(&mut self, screen: Screen) {
        if screen != self.scheduler.screen() {
            log::info!("Screen -> {}", screen.element_id());
        }
        self.scheduler.set_screen(screen, &mut self.driver);
    }

    pub fn set_loading_complete(&mut self) {
        log::info!("Loading complete");
        self.scheduler.set_loaded(&mut self.driver);
    }

    /// Page hidden: stop. Page shown again on the game screen with a
    /// session still in play: start again.
    pub fn on_visibility_change(&mut self, hidden: bool) {
        if hidden {
            if self.scheduler.is_running() {
                log::info!("Page hidden, pausing game loop");
                self.stop();
            }
        } else if !self.scheduler.is_running()
            && self.scheduler.screen() == Screen::Game
            && self.session.phase != SessionPhase::Over
        {
            log::info!("Page visible, resuming game loop");
            self.start();
        }
    }

    /// Rank reported by the ledger. Applied whenever it arrives.
    pub fn apply_rank(&mut self, rank: Option<u32>) {
        if self.session.scores().rank() == rank {
            return;
        }
        self.session.scores_mut().set_rank(rank);
        self.bus.emit(&GameEvent::RankChanged { rank });
    }

    /// Everything one ledger read returned. The ledger best can only raise
    /// the local best, a missing rank leaves the current one alone, and the
    /// table is announced only when it changed.
    pub fn apply_leaderboard(&mut self, snapshot: LeaderboardSnapshot) {
        self.seed_best(snapshot.best);
        if snapshot.rank.is_some() {
            self.apply_rank(snapshot.rank);
        }
        if snapshot.entries != self.leaderboard {
            log::debug!("Leaderboard updated ({} entries)", snapshot.entries.len());
            self.leaderboard = snapshot.entries;
            self.bus.emit(&GameEvent::LeaderboardUpdated {
                entries: self.leaderboard.clone(),
            });
        }
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    /// Raise best from a stored value (local table or ledger)
    pub fn seed_best(&mut self, best: u64) {
        self.session.scores_mut().seed_best(best);
    }

    pub fn set_ground_rule(&mut self, rule: GroundRule) {
        self.session.ground_rule = rule;
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&GameEvent) + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn scores(&self) -> &ScoreTracker {
        self.session.scores()
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    pub fn scheduler(&self) -> &GameLoopScheduler {
        &self.scheduler
    }

    pub fn screen(&self) -> Screen {
        self.scheduler.screen()
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    fn flush_events(&mut self) {
        for event in self.session.drain_events() {
            self.bus.emit(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::shapes::SceneBuilder;
    use crate::scheduler::tests::FakeDriver;
    use crate::sim::CollisionKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn loaded_loop(seed: u64, best: u64) -> GameLoop<FakeDriver> {
        let mut game = GameLoop::new(FakeDriver::default(), seed, best);
        game.set_loading_complete();
        game
    }

    fn playing(seed: u64, best: u64) -> GameLoop<FakeDriver> {
        let mut game = loaded_loop(seed, best);
        game.begin_session(GameMode::Practice, None, seed);
        game
    }

    /// Drive frames until the loop stops on its own
    fn run_to_end(game: &mut GameLoop<FakeDriver>) -> TickOutcome {
        let mut scene = SceneBuilder::new();
        for _ in 0..10_000 {
            scene.clear();
            match game.frame(&mut scene) {
                FrameOutcome::Rendered(TickOutcome::Collided(kind)) => {
                    return TickOutcome::Collided(kind);
                }
                FrameOutcome::Rendered(_) => {}
                FrameOutcome::Skipped => panic!("loop halted without a collision"),
            }
        }
        panic!("run never ended");
    }

    #[test]
    fn test_input_ignored_before_game_screen() {
        let mut game = loaded_loop(1, 0);
        game.set_screen(Screen::ModeSelect);
        assert!(!game.jump());
        assert_eq!(game.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_begin_session_runs_loop() {
        let game = playing(1, 0);
        assert_eq!(game.screen(), Screen::Game);
        assert!(game.is_running());
        assert!(game.scheduler().pending_frame().is_some());
        assert_eq!(game.driver().requested.len(), 1);
    }

    #[test]
    fn test_idle_frames_keep_rendering() {
        let mut game = playing(1, 0);
        let mut scene = SceneBuilder::new();
        for _ in 0..3 {
            assert_eq!(
                game.frame(&mut scene),
                FrameOutcome::Rendered(TickOutcome::Waiting)
            );
        }
        assert!(!scene.vertices().is_empty());
        assert!(game.scheduler().pending_frame().is_some());
    }

    #[test]
    fn test_collision_renders_final_frame_then_stops() {
        let mut game = playing(1, 0);
        assert!(game.jump());
        assert_eq!(run_to_end(&mut game), TickOutcome::Collided(CollisionKind::Ground));
        assert_eq!(game.phase(), SessionPhase::Over);
        assert!(!game.is_running());
        assert_eq!(game.scheduler().pending_frame(), None);
        assert!(!game.jump());
    }

    #[test]
    fn test_high_score_reaches_subscribers_once() {
        let mut game = playing(1, 0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        game.subscribe(EventKind::HighScore, move |e| sink.borrow_mut().push(e.clone()));

        game.jump();
        game.session.scores_mut().increment(4);
        run_to_end(&mut game);
        assert_eq!(
            *seen.borrow(),
            vec![GameEvent::HighScore {
                score: 4,
                mode: GameMode::Practice,
                tournament: None
            }]
        );

        // Lower score next time: no submission
        game.restart(2);
        game.jump();
        game.session.scores_mut().increment(2);
        run_to_end(&mut game);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(game.scores().best(), 4);
    }

    #[test]
    fn test_tournament_session_tags_high_score() {
        let cup = TournamentRef {
            id: 3,
            name: "Weekly".to_string(),
        };
        let mut game = loaded_loop(1, 0);
        game.begin_session(GameMode::Tournament, Some(cup.clone()), 1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        game.subscribe(EventKind::HighScore, move |e| sink.borrow_mut().push(e.clone()));

        game.jump();
        game.session.scores_mut().increment(5);
        run_to_end(&mut game);
        assert_eq!(
            *seen.borrow(),
            vec![GameEvent::HighScore {
                score: 5,
                mode: GameMode::Tournament,
                tournament: Some(cup.clone()),
            }]
        );

        // Restart stays in the tournament
        game.restart(2);
        assert_eq!(game.session().mode, GameMode::Tournament);
        assert_eq!(game.session().tournament, Some(cup));
    }

    #[test]
    fn test_restart_from_over_restarts_loop() {
        let mut game = playing(1, 0);
        game.jump();
        run_to_end(&mut game);

        game.restart(9);
        assert_eq!(game.phase(), SessionPhase::Idle);
        assert_eq!(game.scores().score(), 0);
        assert!(game.is_running());
        assert!(game.scheduler().pending_frame().is_some());
        assert_eq!(game.session().seed, 9);
    }

    #[test]
    fn test_visibility_pause_and_resume() {
        let mut game = playing(1, 0);
        game.jump();

        game.on_visibility_change(true);
        assert!(!game.is_running());
        assert_eq!(game.scheduler().pending_frame(), None);

        game.on_visibility_change(false);
        assert!(game.is_running());
        assert!(game.scheduler().pending_frame().is_some());
    }

    #[test]
    fn test_visibility_does_not_revive_finished_run() {
        let mut game = playing(1, 0);
        game.jump();
        run_to_end(&mut game);

        game.on_visibility_change(true);
        game.on_visibility_change(false);
        assert!(!game.is_running());
    }

    #[test]
    fn test_visibility_off_game_screen_stays_stopped() {
        let mut game = playing(1, 0);
        game.set_screen(Screen::ModeSelect);
        game.on_visibility_change(false);
        assert!(!game.is_running());
    }

    #[test]
    fn test_rank_applies_late_and_notifies() {
        let mut game = playing(1, 0);
        let ranks = Rc::new(RefCell::new(Vec::new()));
        let sink = ranks.clone();
        game.subscribe(EventKind::RankChanged, move |e| {
            if let GameEvent::RankChanged { rank } = e {
                sink.borrow_mut().push(*rank);
            }
        });

        game.apply_rank(Some(3));
        game.apply_rank(Some(3));
        game.restart(4);
        assert_eq!(game.scores().rank(), Some(3));
        assert_eq!(*ranks.borrow(), vec![Some(3)]);
    }

    fn entry(name: &str, score: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            player_name: name.to_string(),
            score,
            chain_id: format!("chain-{name}"),
            timestamp: 0,
        }
    }

    #[test]
    fn test_leaderboard_raises_best_and_keeps_rank_when_absent() {
        let mut game = loaded_loop(1, 10);
        game.apply_rank(Some(4));

        game.apply_leaderboard(LeaderboardSnapshot {
            rank: None,
            best: 25,
            entries: vec![entry("bob", 40)],
        });
        assert_eq!(game.scores().best(), 25);
        assert_eq!(game.scores().rank(), Some(4));

        // A lower ledger best does not pull the local one down
        game.apply_leaderboard(LeaderboardSnapshot {
            rank: Some(2),
            best: 3,
            entries: vec![entry("bob", 40)],
        });
        assert_eq!(game.scores().best(), 25);
        assert_eq!(game.scores().rank(), Some(2));
    }

    #[test]
    fn test_leaderboard_event_fires_once_per_changed_table() {
        let mut game = loaded_loop(1, 0);
        let tables = Rc::new(RefCell::new(Vec::new()));
        let sink = tables.clone();
        game.subscribe(EventKind::LeaderboardUpdated, move |e| {
            if let GameEvent::LeaderboardUpdated { entries } = e {
                sink.borrow_mut().push(entries.len());
            }
        });

        let first = LeaderboardSnapshot {
            rank: Some(1),
            best: 9,
            entries: vec![entry("ada", 9)],
        };
        game.apply_leaderboard(first.clone());
        game.apply_leaderboard(first);
        game.apply_leaderboard(LeaderboardSnapshot {
            rank: Some(2),
            best: 9,
            entries: vec![entry("bob", 12), entry("ada", 9)],
        });

        assert_eq!(*tables.borrow(), vec![1, 2]);
        assert_eq!(game.leaderboard().len(), 2);
        assert_eq!(game.leaderboard()[0].player_name, "bob");
    }

    #[test]
    fn test_high_score_round_trip_through_ledger() {
        use crate::identity::FixedIdentity;
        use crate::ledger::{LedgerBridge, MemoryLedger};

        let bridge = LedgerBridge::new(MemoryLedger::default(), FixedIdentity::new("ada"));
        bridge.ledger().insert_record("bob", 50);
        bridge.ledger().insert_record("ada", 30);

        let mut game = playing(1, 0);
        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = pending.clone();
        game.subscribe(EventKind::HighScore, move |e| {
            if let GameEvent::HighScore { score, .. } = e {
                sink.borrow_mut().push(*score);
            }
        });

        game.jump();
        game.session.scores_mut().increment(7);
        run_to_end(&mut game);

        let score = pending.borrow_mut().pop().expect("high score event");
        let snapshot = pollster::block_on(bridge.on_high_score(score)).expect("snapshot");
        game.apply_leaderboard(snapshot);

        // The ledger kept the better earlier run
        assert_eq!(game.scores().best(), 30);
        assert_eq!(game.scores().rank(), Some(2));
        let names: Vec<_> = game.leaderboard().iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, vec!["bob", "ada"]);
    }

    #[test]
    fn test_seed_best_never_lowers() {
        let mut game = loaded_loop(1, 10);
        game.seed_best(4);
        assert_eq!(game.scores().best(), 10);
        game.seed_best(12);
        assert_eq!(game.scores().best(), 12);
    }
}
