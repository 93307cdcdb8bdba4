use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::info;

use crate::game::{GamePhase, SimConfig, Simulation};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Interactive terminal play on a 2-D lattice
pub struct HumanMode {
    sim: Simulation<2>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    paused: bool,
}

impl HumanMode {
    pub fn new(config: &SimConfig) -> Result<Self> {
        let sim = Simulation::new(config).context("Invalid game configuration")?;

        Ok(Self {
            sim,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            paused: false,
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

        // Frames at ~30 FPS; the simulation turns measured frame time into ticks
        let frame_interval = Duration::from_millis(33);
        let mut frame_timer = interval(frame_interval);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Advance and render
                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    let dt = now - last_frame;
                    last_frame = now;

                    self.advance(dt);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.sim, &self.metrics, self.paused);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::GameAction(action) => {
                    if !self.paused {
                        self.sim.apply(action);
                    }
                }
                KeyAction::Start => {
                    if self.sim.phase() != GamePhase::Running {
                        self.begin_run()?;
                    }
                }
                KeyAction::Restart => {
                    if self.sim.phase() != GamePhase::NotStarted {
                        self.begin_run()?;
                    }
                }
                KeyAction::TogglePause => {
                    if self.sim.phase() == GamePhase::Running {
                        self.paused = !self.paused;
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    /// Feed one frame of elapsed time into the simulation
    fn advance(&mut self, dt: Duration) {
        if self.paused || self.sim.phase() != GamePhase::Running {
            return;
        }

        self.metrics.record_frame(dt);
        let result = self.sim.update(dt.as_secs_f64());
        self.metrics.record_tick(&result, self.sim.body().len());

        if result.is_game_over() {
            self.metrics.on_game_over(self.sim.score());
            info!(
                score = self.sim.score(),
                high_score = self.metrics.high_score,
                time = %self.metrics.format_time(),
                "game over"
            );
        }
    }

    fn begin_run(&mut self) -> Result<()> {
        self.sim.restart().context("Failed to start a new run")?;
        self.metrics.on_game_start();
        self.paused = false;
        Ok(())
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
