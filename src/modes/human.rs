use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

use crate::game::{GameConfig, GameEngine, GamePhase, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Render at ~30 FPS, independent of the game speed
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Keyboard-driven game in the terminal.
///
/// Owns the ticker: the engine is advanced from a fixed-period interval while
/// it is running. Input, ticks and frames all run on one task, so commands
/// never interleave with a tick.
pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Set whenever a game (re)starts or resumes; the ticker restarts its period
    rearm_ticker: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        }
        .context("Failed to create game engine")?;

        Ok(Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            rearm_ticker: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_interval = Duration::from_millis(self.engine.config().tick_interval_ms);
        let mut tick_timer = interval(tick_interval);
        // A late tick is dropped, never replayed
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut render_timer = interval(RENDER_INTERVAL);
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            "Starting terminal game, {}x{} grid, tick {:?}",
            self.engine.config().grid_width,
            self.engine.config().grid_height,
            tick_interval
        );

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(err)) => warn!("Terminal event error: {}", err),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.engine.phase() == GamePhase::Running {
                        self.update_game();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    let snapshot = self.engine.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if std::mem::take(&mut self.rearm_ticker) {
                // First tick comes a full period after (re)starting
                tick_timer.reset();
            }

            if self.should_quit {
                break;
            }
        }

        info!("Quitting after {} games", self.metrics.games_played);
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        // Resizes only change how the grid is drawn, never the grid itself
        if let Event::Key(key) = event {
            let action = self.input_handler.handle_key_event(key);
            self.apply_action(action)?;
        }

        Ok(())
    }

    fn apply_action(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::Turn(direction) => {
                self.engine.request_direction(direction);
            }
            KeyAction::TogglePause => {
                if self.engine.phase() == GamePhase::Ready {
                    self.start_game();
                } else {
                    match self.engine.toggle_pause() {
                        GamePhase::Paused => self.metrics.on_pause(),
                        GamePhase::Running => {
                            self.metrics.on_resume();
                            self.rearm_ticker = true;
                        }
                        _ => {}
                    }
                }
            }
            KeyAction::Start => {
                if self.engine.phase() == GamePhase::Ready {
                    self.start_game();
                }
            }
            KeyAction::Restart => {
                self.engine.restart().context("Failed to restart game")?;
                self.metrics.on_game_start();
                self.rearm_ticker = true;
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }

        Ok(())
    }

    fn start_game(&mut self) {
        self.engine.start();
        self.metrics.on_game_start();
        self.rearm_ticker = true;
    }

    fn update_game(&mut self) {
        if let TickOutcome::Ended(_) = self.engine.tick() {
            self.metrics.on_game_over();
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
