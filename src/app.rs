//! App: terminal init, fixed-rate tick loop and key handling.

use crate::GameConfig;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use keystone::game::GameState;
use keystone::input::{Action, key_to_action};
use keystone::level::Level;
use keystone::theme::Theme;
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Time to wait before the next tick: what is left of the interval, never negative.
/// A tick that overran starts the next one immediately instead of skipping it.
pub fn next_delay(interval: Duration, elapsed: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}

pub struct App {
    config: GameConfig,
    theme: Theme,
    level: Level,
    state: GameState,
    paused: bool,
    restart_requested: bool,
    quit: bool,
}

impl App {
    pub fn new(config: GameConfig, theme: Theme, level: Level) -> Self {
        let state = GameState::new(&level);
        Self {
            paused: config.start_paused,
            config,
            theme,
            level,
            state,
            restart_requested: false,
            quit: false,
        }
    }

    /// Key events only queue commands or flip flags; the grid is touched from the tick alone.
    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Move(command) => {
                if !self.paused {
                    self.state.enqueue(command);
                }
            }
            Action::Pause => self.paused = !self.paused,
            Action::Restart => self.restart_requested = true,
            Action::Quit => self.quit = true,
            Action::None => {}
        }
    }

    /// Advance one tick: pending restart first, then input and gravity unless paused.
    fn tick(&mut self) {
        if self.restart_requested {
            self.restart_requested = false;
            self.state.restart(&self.level);
            info!("restart");
        }
        if !self.paused {
            self.state.update();
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        let result = self.run_loop(&mut terminal);

        // Restore
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let interval = self.config.tick_interval;
        while !self.quit {
            let before = Instant::now();
            self.tick();
            terminal.draw(|f| keystone::ui::draw(f, &self.state, &self.theme, self.paused))?;

            let elapsed = before.elapsed();
            if elapsed > interval {
                debug!(
                    tick = self.state.ticks,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "tick_overrun"
                );
            }
            self.wait_for_input(next_delay(interval, elapsed))?;
        }
        Ok(())
    }

    /// Poll keyboard events until the next tick is due.
    fn wait_for_input(&mut self, delay: Duration) -> Result<()> {
        let deadline = Instant::now() + delay;
        while !self.quit {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                // Ignore repeats and releases so each press queues exactly one command.
                if key.kind == KeyEventKind::Press {
                    self.apply_action(key_to_action(key));
                }
            }
            if remaining.is_zero() {
                break;
            }
        }
        Ok(())
    }
}
