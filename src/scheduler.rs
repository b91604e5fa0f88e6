//! Cooperative per-frame scheduler
//!
//! At most one frame callback is ever outstanding. Each callback re-checks
//! the guard (running, game screen, loading done) and only then asks for the
//! next one; a callback that finds the guard closed simply does not
//! reschedule, which is how the loop halts.

/// Screens the navigation layer can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Loading,
    Auth,
    ModeSelect,
    Tournaments,
    Game,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Loading,
        Screen::Auth,
        Screen::ModeSelect,
        Screen::Tournaments,
        Screen::Game,
    ];

    /// DOM id of the screen's container
    pub fn element_id(&self) -> &'static str {
        match self {
            Screen::Loading => "initial-loading-screen",
            Screen::Auth => "auth-screen",
            Screen::ModeSelect => "mode-selection-screen",
            Screen::Tournaments => "tournament-screen",
            Screen::Game => "game-screen",
        }
    }

    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.element_id() == id)
    }
}

/// Opaque id of a pending frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Source of display refresh callbacks (`requestAnimationFrame` in the browser)
pub trait FrameDriver {
    /// Ask for one callback on the next refresh
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Start/stop state plus the screen and loading guard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameLoopScheduler {
    running: bool,
    /// Set only while running with a callback outstanding
    pending: Option<FrameHandle>,
    screen: Screen,
    loaded: bool,
}

impl GameLoopScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Frames may run: game screen showing and loading done
    pub fn guard_open(&self) -> bool {
        self.screen == Screen::Game && self.loaded
    }

    /// Start the loop. A frame is requested only while the guard is open;
    /// otherwise the loop stays armed until the guard opens.
    pub fn start(&mut self, driver: &mut impl FrameDriver) {
        if self.pending.is_some() {
            return;
        }
        if !self.running {
            self.running = true;
            log::debug!("Game loop started");
        }
        if self.guard_open() {
            self.request(driver);
        } else {
            log::debug!(
                "Game loop armed, waiting for game screen (screen={}, loaded={})",
                self.screen.element_id(),
                self.loaded
            );
        }
    }

    /// Cancel any pending frame and stop. Safe from any state.
    pub fn stop(&mut self, driver: &mut impl FrameDriver) {
        if let Some(handle) = self.pending.take() {
            driver.cancel_frame(handle);
        }
        if self.running {
            self.running = false;
            log::debug!("Game loop stopped");
        }
    }

    /// Screen change from the navigation layer. Leaving the game screen stops
    /// the loop; arriving on it resumes an armed loop.
    pub fn set_screen(&mut self, screen: Screen, driver: &mut impl FrameDriver) {
        let previous = self.screen;
        self.screen = screen;
        if previous == Screen::Game && screen != Screen::Game {
            self.stop(driver);
        } else {
            self.schedule_next(driver);
        }
    }

    /// Initial asset loading finished
    pub fn set_loaded(&mut self, driver: &mut impl FrameDriver) {
        self.loaded = true;
        self.schedule_next(driver);
    }

    /// Top of a frame callback: the callback has fired, so nothing is pending.
    /// Returns whether this frame should run.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        let go = self.running && self.guard_open();
        if !go {
            log::debug!("Frame skipped, guard closed");
        }
        go
    }

    /// Request the next callback if the loop should keep going and none is pending
    pub fn schedule_next(&mut self, driver: &mut impl FrameDriver) {
        if self.running && self.guard_open() && self.pending.is_none() {
            self.request(driver);
        }
    }

    fn request(&mut self, driver: &mut impl FrameDriver) {
        self.pending = driver.request_frame();
        if self.pending.is_none() {
            log::warn!("Frame request refused by the display driver");
        }
    }
}
