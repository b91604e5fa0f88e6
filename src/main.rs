//! Flappy Ledger entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_ledger::audio::{AudioManager, SoundEffect};
    use flappy_ledger::consts::*;
    use flappy_ledger::highscores::format_date;
    use flappy_ledger::identity::{PlayerIdentity, SessionIdentity};
    use flappy_ledger::ledger::{LeaderboardSnapshot, LedgerBridge, WebLedger};
    use flappy_ledger::persistence::{self, LocalStore};
    use flappy_ledger::platform;
    use flappy_ledger::renderer::{RenderState, SceneBuilder};
    use flappy_ledger::sim::{self, GameMode, SessionPhase, TickOutcome, TournamentRef};
    use flappy_ledger::{
        EventKind, FrameDriver, FrameHandle, FrameOutcome, GameEvent, GameLoop, HighScores,
        Screen, Settings,
    };

    type Bridge = LedgerBridge<WebLedger, SessionIdentity<LocalStore>>;

    /// Key the tournament screen stores its table under
    const TOURNAMENTS_KEY: &str = "tournaments";

    /// `requestAnimationFrame`, one closure per requested frame
    struct RafDriver {
        game: Weak<RefCell<Game>>,
    }

    impl FrameDriver for RafDriver {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            let window = web_sys::window()?;
            let game = self.game.clone();
            let callback = Closure::once_into_js(move |time: f64| {
                if let Some(game) = game.upgrade() {
                    game.borrow_mut().run_frame(time);
                }
            });
            window
                .request_animation_frame(callback.unchecked_ref())
                .ok()
                .map(FrameHandle)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle.0);
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        game_loop: GameLoop<RafDriver>,
        render_state: Option<RenderState>,
        scene: SceneBuilder,
        settings: Settings,
        high_scores: HighScores,
        store: LocalStore,
        identity: SessionIdentity<LocalStore>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(driver: RafDriver, seed: u64) -> Self {
            let store = LocalStore::new();
            let settings = Settings::load(&store);
            let high_scores = HighScores::load(&store);
            let best = high_scores.top_score().unwrap_or(0);

            let mut game_loop = GameLoop::new(driver, seed, best);
            game_loop.set_ground_rule(settings.ground_rule);

            Self {
                game_loop,
                render_state: None,
                scene: SceneBuilder::new(),
                settings,
                high_scores,
                store,
                identity: SessionIdentity::new(LocalStore::new()),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Body of a requestAnimationFrame callback
        fn run_frame(&mut self, time: f64) {
            if self.settings.autopilot
                && self.game_loop.is_running()
                && sim::autopilot(self.game_loop.session())
            {
                self.game_loop.jump();
            }

            self.scene.clear();
            let FrameOutcome::Rendered(outcome) = self.game_loop.frame(&mut self.scene) else {
                return;
            };

            self.render();
            self.track_fps(time);
            if let TickOutcome::Collided(_) = outcome {
                self.record_local_score();
            }
            self.update_hud();
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.scene.vertices()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Add the finished run to the local table
        fn record_local_score(&mut self) {
            let session = self.game_loop.session();
            let score = session.scores().score();
            let player = self.identity.current_player_name();
            if let Some(rank) =
                self.high_scores
                    .add_score(score, &player, session.mode, platform::now_ms())
            {
                log::info!("Local high score #{}: {}", rank, score);
                self.high_scores.save(&self.store);
            }
        }

        fn jump(&mut self) {
            if self.game_loop.jump() {
                self.update_hud();
            }
        }

        fn restart(&mut self) {
            let seed = platform::random_seed();
            self.game_loop.restart(seed);
            log::info!("Game restarted with seed: {}", seed);
            self.update_hud();
        }

        fn begin_session(&mut self, mode: GameMode, tournament: Option<TournamentRef>) {
            self.game_loop
                .begin_session(mode, tournament, platform::random_seed());
            show_screen(Screen::Game);
            self.update_hud();
        }

        fn go_to(&mut self, screen: Screen) {
            self.game_loop.set_screen(screen);
            show_screen(screen);
        }

        fn save_settings(&mut self) {
            self.settings.save(&self.store);
            self.game_loop.set_ground_rule(self.settings.ground_rule);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let session = self.game_loop.session();
            let scores = session.scores();

            set_text(&document, "score", &scores.score().to_string());
            set_text(&document, "best", &scores.best().to_string());
            let rank = scores
                .rank()
                .map(|r| format!("#{}", r))
                .unwrap_or_else(|| "-".to_string());
            set_text(&document, "rank", &rank);

            let mode = match &session.tournament {
                Some(t) => format!("Tournament: {}", t.name),
                None => "Practice".to_string(),
            };
            set_text(&document, "mode-label", &mode);

            set_hidden(&document, "fps", !self.settings.show_fps);
            if self.settings.show_fps {
                set_text(&document, "fps", &format!("{} fps", self.fps));
            }

            set_hidden(
                &document,
                "instructions",
                !(session.show_instructions && session.phase == SessionPhase::Idle),
            );

            let over = session.phase == SessionPhase::Over;
            set_hidden(&document, "game-over", !over);
            set_hidden(&document, "restart-btn", !over);
            if over {
                set_text(&document, "final-score", &scores.score().to_string());
                set_text(&document, "final-best", &scores.best().to_string());
                self.fill_high_score_list(&document);
            }
        }

        /// Ledger table; the signed-in player's row is marked
        fn fill_leaderboard_list(&self, document: &Document) {
            let Some(list) = document.get_element_by_id("leaderboard-list") else {
                return;
            };
            list.set_text_content(None);
            let player = self.identity.current_player_name();
            for (i, entry) in self.game_loop.leaderboard().iter().enumerate() {
                let Ok(item) = document.create_element("li") else {
                    return;
                };
                item.set_text_content(Some(&format!(
                    "{}. {} - {}",
                    i + 1,
                    entry.player_name,
                    entry.score
                )));
                if !player.is_empty() && entry.player_name == player {
                    let _ = item.class_list().add_1("current");
                }
                let _ = list.append_child(&item);
            }
        }

        /// Local table under the game-over panel
        fn fill_high_score_list(&self, document: &Document) {
            let Some(list) = document.get_element_by_id("highscore-list") else {
                return;
            };
            list.set_text_content(None);
            let now = platform::now_ms();
            for (i, entry) in self.high_scores.entries.iter().enumerate() {
                let Ok(item) = document.create_element("li") else {
                    return;
                };
                let who = if entry.player.is_empty() {
                    "anonymous"
                } else {
                    entry.player.as_str()
                };
                item.set_text_content(Some(&format!(
                    "{}. {} - {} ({})",
                    i + 1,
                    entry.score,
                    who,
                    format_date(now, entry.timestamp)
                )));
                let _ = list.append_child(&item);
            }
        }

        /// Signed-in state changed: pick the screen and the player's local best
        fn on_auth_changed(&mut self) -> bool {
            let player = self.identity.current_player_name();
            let signed_in = !player.is_empty();
            if let Some(best) = self.high_scores.best_for(&player) {
                self.game_loop.seed_best(best);
            }
            self.go_to(if signed_in { Screen::ModeSelect } else { Screen::Auth });
            signed_in
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    /// Show exactly one screen container
    fn show_screen(screen: Screen) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        for s in Screen::ALL {
            set_hidden(&document, s.element_id(), s != screen);
        }
    }

    /// Tournament picked on the tournament screen
    fn find_tournament(store: &LocalStore, id: u64) -> Option<TournamentRef> {
        let tournaments: Vec<TournamentRef> = persistence::load_json(store, TOURNAMENTS_KEY)?;
        tournaments.into_iter().find(|t| t.id == id)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Flappy Ledger starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        show_screen(Screen::Loading);

        let seed = platform::random_seed();
        let game = Rc::new_cyclic(|weak| {
            RefCell::new(Game::new(RafDriver { game: weak.clone() }, seed))
        });
        log::info!("Game initialized with seed: {}", seed);

        let audio = Rc::new(RefCell::new(AudioManager::new()));
        audio.borrow_mut().apply_settings(&game.borrow().settings);

        let bridge: Rc<Bridge> = Rc::new(LedgerBridge::new(
            WebLedger::from_page(),
            SessionIdentity::new(LocalStore::new()),
        ));

        subscribe_audio(&game, &audio);
        subscribe_ledger(&game, &bridge);

        let canvas = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        match canvas {
            Some(canvas) => {
                canvas.set_width(CANVAS_WIDTH as u32);
                canvas.set_height(CANVAS_HEIGHT as u32);
                match init_renderer(&canvas).await {
                    Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                    Err(e) => log::error!("WebGPU unavailable, playing without canvas: {}", e),
                }
                setup_input_handlers(&canvas, game.clone(), audio.clone());
            }
            None => log::error!("No #canvas element"),
        }

        setup_buttons(game.clone(), bridge.clone());
        setup_navigation(game.clone(), bridge.clone());
        setup_visibility(game.clone());

        // Loading done: the account screen comes first unless already signed in
        {
            let mut g = game.borrow_mut();
            g.game_loop.set_loading_complete();
            g.on_auth_changed();
            g.update_hud();
        }
        refresh_leaderboard(&game, &bridge);

        log::info!("Flappy Ledger running!");
    }

    async fn init_renderer(canvas: &HtmlCanvasElement) -> Result<RenderState, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| e.to_string())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| e.to_string())?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, canvas.width(), canvas.height())
            .await
            .map_err(|e| e.to_string())
    }

    fn subscribe_audio(game: &Rc<RefCell<Game>>, audio: &Rc<RefCell<AudioManager>>) {
        let mut g = game.borrow_mut();
        for kind in [
            EventKind::Flap,
            EventKind::ScoreChanged,
            EventKind::GameOver,
            EventKind::HighScore,
        ] {
            let audio = audio.clone();
            g.game_loop.subscribe(kind, move |event| {
                if let Some(effect) = SoundEffect::for_event(event) {
                    audio.borrow().play(effect);
                }
            });
        }
    }

    /// High score -> ledger, off the frame loop. The table, rank and ledger
    /// best land whenever the ledger answers.
    fn subscribe_ledger(game: &Rc<RefCell<Game>>, bridge: &Rc<Bridge>) {
        let weak = Rc::downgrade(game);
        let bridge = bridge.clone();
        game.borrow_mut()
            .game_loop
            .subscribe(EventKind::HighScore, move |event| {
                let GameEvent::HighScore { score, .. } = event else {
                    return;
                };
                let score = *score;
                let bridge = bridge.clone();
                let weak = weak.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Some(snapshot) = bridge.on_high_score(score).await {
                        apply_leaderboard(&weak, snapshot);
                    }
                });
            });
    }

    fn refresh_leaderboard(game: &Rc<RefCell<Game>>, bridge: &Rc<Bridge>) {
        let weak = Rc::downgrade(game);
        let bridge = bridge.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Some(snapshot) = bridge.refresh().await {
                apply_leaderboard(&weak, snapshot);
            }
        });
    }

    fn apply_leaderboard(game: &Weak<RefCell<Game>>, snapshot: LeaderboardSnapshot) {
        if let Some(game) = game.upgrade() {
            let mut g = game.borrow_mut();
            g.game_loop.apply_leaderboard(snapshot);
            g.update_hud();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.fill_leaderboard_list(&document);
            }
        }
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
        audio: Rc<RefCell<AudioManager>>,
    ) {
        // Mouse click - flap
        {
            let game = game.clone();
            let audio = audio.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                audio.borrow().resume();
                game.borrow_mut().jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - flap
        {
            let game = game.clone();
            let audio = audio.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                audio.borrow().resume();
                game.borrow_mut().jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            if g.game_loop.screen() != Screen::Game {
                return;
            }
            match event.key().as_str() {
                " " | "ArrowUp" | "w" | "W" => {
                    event.prevent_default();
                    audio.borrow().resume();
                    g.jump();
                }
                "Enter" if g.game_loop.phase() == SessionPhase::Over => g.restart(),
                "m" | "M" => {
                    g.settings.muted = !g.settings.muted;
                    audio.borrow_mut().apply_settings(&g.settings);
                    g.save_settings();
                    log::info!("Muted: {}", g.settings.muted);
                }
                "a" | "A" => {
                    g.settings.autopilot = !g.settings.autopilot;
                    g.save_settings();
                    log::info!("Autopilot: {}", g.settings.autopilot);
                }
                "f" | "F" => {
                    g.settings.show_fps = !g.settings.show_fps;
                    g.save_settings();
                    g.update_hud();
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>, bridge: Rc<Bridge>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        {
            let game = game.clone();
            on_click(&document, "refresh-btn", move || refresh_leaderboard(&game, &bridge));
        }

        {
            let game = game.clone();
            on_click(&document, "restart-btn", move || game.borrow_mut().restart());
        }
        {
            let game = game.clone();
            on_click(&document, "practice-btn", move || {
                game.borrow_mut().begin_session(GameMode::Practice, None)
            });
        }
        {
            let game = game.clone();
            on_click(&document, "tournaments-btn", move || {
                game.borrow_mut().go_to(Screen::Tournaments)
            });
        }
        on_click(&document, "back-to-menu-btn", move || {
            game.borrow_mut().go_to(Screen::ModeSelect)
        });
    }

    /// Events raised by the account and tournament screens
    fn setup_navigation(game: Rc<RefCell<Game>>, bridge: Rc<Bridge>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Login or logout finished
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let signed_in = game.borrow_mut().on_auth_changed();
                if signed_in {
                    refresh_leaderboard(&game, &bridge);
                }
            });
            let _ = window
                .add_event_listener_with_callback("authStateChange", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // { detail: { tournamentId } }
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::CustomEvent| {
            let id = js_sys::Reflect::get(&event.detail(), &JsValue::from_str("tournamentId"))
                .ok()
                .and_then(|v| v.as_f64())
                .map(|v| v as u64);
            let mut g = game.borrow_mut();
            let tournament = id.and_then(|id| find_tournament(&g.store, id));
            match tournament {
                Some(tournament) => {
                    log::info!("Tournament selected: {}", tournament.name);
                    g.begin_session(GameMode::Tournament, Some(tournament));
                }
                None => log::warn!("Unknown tournament selected: {:?}", id),
            }
        });
        let _ = window
            .add_event_listener_with_callback("tournamentSelected", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_visibility(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Visibility change (tab switch, minimize)
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut()
                .game_loop
                .on_visibility_change(platform::document_hidden());
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::rc::Rc;

    use flappy_ledger::identity::FixedIdentity;
    use flappy_ledger::ledger::{LedgerBridge, MemoryLedger};
    use flappy_ledger::renderer::SceneBuilder;
    use flappy_ledger::sim::{self, GameMode, TickOutcome};
    use flappy_ledger::{
        EventKind, FrameDriver, FrameHandle, FrameOutcome, GameEvent, GameLoop, GroundRule,
    };

    /// Ticks after which the pilot lets go so the run ends
    const MAX_TICKS: u64 = 3_000;

    /// Driver that just remembers whether a frame was requested
    #[derive(Default)]
    struct ManualDriver {
        next: i32,
        pending: Option<FrameHandle>,
    }

    impl ManualDriver {
        fn take_pending(&mut self) -> Option<FrameHandle> {
            self.pending.take()
        }
    }

    impl FrameDriver for ManualDriver {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            self.next += 1;
            self.pending = Some(FrameHandle(self.next));
            self.pending
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            if self.pending == Some(handle) {
                self.pending = None;
            }
        }
    }

    pub fn run(runs: u32, seed: u64, ground_rule: GroundRule) {
        let ledger = MemoryLedger::new("headless");
        for (name, score) in [("swift", 40), ("robin", 25), ("wren", 12)] {
            ledger.insert_record(name, score);
        }
        let bridge = LedgerBridge::new(ledger, FixedIdentity::new("autopilot"));

        let submissions = Rc::new(RefCell::new(Vec::new()));
        let mut game = GameLoop::new(ManualDriver::default(), seed, 0);
        {
            let submissions = submissions.clone();
            game.subscribe(EventKind::HighScore, move |event| {
                if let GameEvent::HighScore { score, .. } = event {
                    submissions.borrow_mut().push(*score);
                }
            });
        }

        game.set_ground_rule(ground_rule);
        game.set_loading_complete();
        game.begin_session(GameMode::Practice, None, seed);

        let mut scene = SceneBuilder::new();
        for run in 0..runs {
            // Later runs give up sooner, so best stops moving after the first
            let give_up_at = MAX_TICKS / (u64::from(run) + 1);
            let mut end = None;
            while game.driver_mut().take_pending().is_some() {
                if game.session().frame < give_up_at && sim::autopilot(game.session()) {
                    game.jump();
                }
                scene.clear();
                if let FrameOutcome::Rendered(TickOutcome::Collided(cause)) = game.frame(&mut scene) {
                    end = Some(cause);
                }
            }

            let scores = game.scores();
            log::info!(
                "Run {}: score {} best {} ({:?}, {} ticks, {} vertices in last frame)",
                run + 1,
                scores.score(),
                scores.best(),
                end,
                game.session().frame,
                scene.vertices().len()
            );

            for score in submissions.borrow_mut().drain(..) {
                if let Some(snapshot) = pollster::block_on(bridge.on_high_score(score)) {
                    game.apply_leaderboard(snapshot);
                }
            }
            log::info!(
                "Ledger rank: {:?} ({} entries, best {})",
                game.scores().rank(),
                game.leaderboard().len(),
                game.scores().best()
            );

            game.restart(seed.wrapping_add(u64::from(run) + 1));
        }
        game.stop();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Ledger (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let runs = args.next().and_then(|a| a.parse().ok()).unwrap_or(3);
    let seed = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or_else(flappy_ledger::platform::random_seed);

    let ground_rule = args
        .next()
        .and_then(|a| flappy_ledger::GroundRule::from_str(&a))
        .unwrap_or_default();

    log::info!(
        "Headless: {} runs, seed {}, ground {}",
        runs,
        seed,
        ground_rule.as_str()
    );
    headless::run(runs, seed, ground_rule);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
