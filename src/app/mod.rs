mod renderer;

use std::{
    io::{Stdout, Write},
    time::{Duration, Instant},
};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

pub use renderer::{Renderer, Tile, compose_tiles, log_terminal};

use crate::{
    session::{Direction, Intents, MazeSession},
    solvers::TraceSearch,
};

/// Everything the user asked for during one frame.
#[derive(Debug, Default, PartialEq)]
struct FrameInput {
    intents: Intents,
    compute_route: bool,
    quit: bool,
    resized: bool,
}

impl FrameInput {
    /// Fold a terminal event into this frame's input.
    fn record(&mut self, event: Event) {
        match event {
            Event::Key(key_event)
                if matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) =>
            {
                match key_event.code {
                    KeyCode::Up => self.intents.set(Direction::Up),
                    KeyCode::Down => self.intents.set(Direction::Down),
                    KeyCode::Left => self.intents.set(Direction::Left),
                    KeyCode::Right => self.intents.set(Direction::Right),
                    KeyCode::Enter => self.compute_route = true,
                    KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
                    _ => {}
                }
            }
            Event::Resize(_, _) => self.resized = true,
            _ => {}
        }
    }
}

pub struct App {
    /// Time budget of one input-then-render frame
    frame_duration: Duration,
}

impl Default for App {
    fn default() -> Self {
        Self {
            frame_duration: Duration::from_secs(1) / 30,
        }
    }
}

impl App {
    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main loop: sample input for one frame, move the agent, search on request, redraw.
    /// Returns when the user presses Esc or `q`.
    pub fn run(&self, stdout: &mut Stdout, mut session: MazeSession) -> std::io::Result<()> {
        let (width, height) = (session.grid().width(), session.grid().height());
        if !Renderer::fits_terminal(width, height)? && !App::wait_for_resize(stdout, width, height)? {
            return Ok(());
        }

        tracing::info!("[app] Starting exploration of a {}x{} maze", width, height);

        let mut renderer = Renderer::new();
        let mut show_route = false;
        let mut status = (String::from("Explore with the arrow keys."), Color::Cyan);
        renderer.draw(stdout, &session, show_route)?;
        App::log_status(stdout, &session, height, &status)?;

        loop {
            let input = self.poll_frame()?;
            if input.quit {
                tracing::info!("[app] Exit requested");
                break;
            }

            let mut dirty = false;
            if input.resized {
                if !Renderer::fits_terminal(width, height)?
                    && !App::wait_for_resize(stdout, width, height)?
                {
                    return Ok(());
                }
                renderer.invalidate();
                dirty = true;
            }

            if !input.intents.is_idle() && session.apply_intents(input.intents).is_some() {
                dirty = true;
            }

            if input.compute_route {
                let outcome = session.compute_shortest_path();
                show_route = true;
                let color = match &outcome {
                    TraceSearch::Found(_) => Color::Green,
                    TraceSearch::NotFound => Color::Red,
                    TraceSearch::NoOp => Color::Yellow,
                };
                status = (outcome.to_string(), color);
                dirty = true;
            }

            if dirty {
                renderer.draw(stdout, &session, show_route)?;
                App::log_status(stdout, &session, height, &status)?;
            }
        }
        Ok(())
    }

    /// Collect input events until the frame's time budget runs out, or the user quits.
    fn poll_frame(&self) -> std::io::Result<FrameInput> {
        let deadline = Instant::now() + self.frame_duration;
        let mut input = FrameInput::default();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || input.quit {
                return Ok(input);
            }
            if event::poll(remaining)? {
                input.record(event::read()?);
            }
        }
    }

    fn log_status(
        stdout: &mut Stdout,
        session: &MazeSession,
        grid_height: u16,
        (message, color): &(String, Color),
    ) -> std::io::Result<()> {
        let text = format!(
            "Visited: {} | Route: {} | {} | ←↑↓→ move, Enter: route, Esc: exit",
            session.trace().len(),
            session.shortest_path().len(),
            message
        );
        log_terminal(stdout, grid_height, &text, *color)
    }

    /// Tell the user the terminal is too small and wait until it is resized to fit.
    /// Returns `Ok(false)` if the user pressed Esc instead.
    fn wait_for_resize(stdout: &mut Stdout, width: u16, height: u16) -> std::io::Result<bool> {
        tracing::warn!("[app] Terminal too small for a {}x{} maze", width, height);
        loop {
            execute!(
                stdout,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                style::PrintStyledContent(
                    format!(
                        "Terminal size is too small for the maze ({}x{} columns/rows needed). Please resize the terminal.\r\n",
                        width.saturating_mul(Tile::WIDTH),
                        height.saturating_add(1)
                    )
                    .with(Color::Yellow)
                    .attribute(Attribute::Bold)
                ),
                style::PrintStyledContent(
                    "Press Esc to exit...\r\n"
                        .with(Color::Blue)
                        .attribute(Attribute::Bold)
                )
            )?;
            match event::read()? {
                Event::Key(event::KeyEvent {
                    code: KeyCode::Esc,
                    kind: KeyEventKind::Press,
                    ..
                }) => return Ok(false),
                Event::Resize(_, _) => {
                    if Renderer::fits_terminal(width, height)? {
                        return Ok(true);
                    }
                }
                _ => {}
            }
        }
    }
}
