//! Terminal front end: a crossterm-backed [`Host`] and the pulse/input loop.

#![cfg(feature = "std")]

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

use crate::controls::ControlAction;
use crate::coord::{Bounds, Coord};
use crate::display::{Canvas, CellDisplay, DisplayPatch, MemoryCanvas, Rgb};
use crate::host::{Host, Sound};
use crate::orchestrator::Orchestrator;
use crate::view;

/// Terminal columns used by one grid cell: border, glyph, border.
pub const CELL_COLUMNS: u16 = 3;

pub const DEFAULT_STATUS: &str = "battleship game";

const HELP: &str = "wasd/arrows move  q/e rotate  enter submit  esc quit";

fn color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Host that keeps a cell buffer and flushes it to the terminal on demand.
pub struct TerminalHost {
    canvas: MemoryCanvas,
    status: String,
    dirty: bool,
    bell: bool,
    stdout: io::Stdout,
}

impl TerminalHost {
    /// Host for a playing grid of `grid`; the control row is added below it.
    pub fn new(grid: Bounds) -> Self {
        Self {
            canvas: MemoryCanvas::new(view::canvas_bounds(grid)),
            status: String::from(DEFAULT_STATUS),
            dirty: true,
            bell: false,
            stdout: io::stdout(),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(EnableMouseCapture)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        self.stdout.flush()?;
        self.dirty = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(DisableMouseCapture)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force a redraw on the next [`draw`](Self::draw).
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Flush the buffer if anything changed since the last draw.
    pub fn draw(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let bounds = self.canvas.bounds();
        for y in 0..bounds.height {
            self.stdout.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..bounds.width {
                let cell = self.canvas.cell_display(Coord::new(x, y));
                self.queue_cell(cell)?;
            }
            self.stdout.queue(ResetColor)?;
        }
        let status_row = bounds.height as u16 + 1;
        self.stdout.queue(cursor::MoveTo(0, status_row))?;
        self.stdout.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        self.stdout.queue(Print(&self.status))?;
        self.stdout.queue(cursor::MoveTo(0, status_row + 1))?;
        self.stdout.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        self.stdout.queue(Print(HELP))?;
        if self.bell {
            self.stdout.queue(Print('\u{7}'))?;
            self.bell = false;
        }
        self.stdout.flush()?;
        self.dirty = false;
        Ok(())
    }

    fn queue_cell(&mut self, cell: CellDisplay) -> Result<()> {
        self.stdout.queue(SetBackgroundColor(color(cell.fill)))?;
        self.stdout.queue(SetForegroundColor(color(cell.border)))?;
        self.stdout.queue(Print('['))?;
        self.stdout.queue(SetForegroundColor(color(cell.fill.contrasting())))?;
        self.stdout.queue(Print(cell.glyph))?;
        self.stdout.queue(SetForegroundColor(color(cell.border)))?;
        self.stdout.queue(Print(']'))?;
        Ok(())
    }
}

impl Canvas for TerminalHost {
    fn cell_display(&self, at: Coord) -> CellDisplay {
        self.canvas.cell_display(at)
    }

    fn set_cell_display(&mut self, at: Coord, patch: DisplayPatch) {
        let before = self.canvas.cell_display(at);
        self.canvas.set_cell_display(at, patch);
        if self.canvas.cell_display(at) != before {
            self.dirty = true;
        }
    }
}

impl Host for TerminalHost {
    fn play_sound(&mut self, sound: Sound) {
        log::debug!("sound {:?}", sound);
        if matches!(sound, Sound::Sunk | Sound::Victory) {
            self.bell = true;
            self.dirty = true;
        }
    }

    fn announce_status(&mut self, text: &str) {
        self.status = String::from(text);
        self.dirty = true;
    }
}

/// Map keyboard input to control actions.
pub fn map_key(key: KeyEvent) -> Option<ControlAction> {
    match key.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(ControlAction::MoveUp),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(ControlAction::MoveLeft),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(ControlAction::MoveDown),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(ControlAction::MoveRight),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(ControlAction::RotateCcw),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(ControlAction::RotateCw),
        KeyCode::Enter => Some(ControlAction::Submit),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Grid coordinate under a terminal position.
pub fn cell_at(column: u16, row: u16) -> Coord {
    Coord::new((column / CELL_COLUMNS) as i32, row as i32)
}

/// Run a session until the player quits. The terminal is restored on exit.
pub async fn run(session: &mut Orchestrator<TerminalHost>, pulses_per_second: u32) -> Result<()> {
    session.host_mut().enter()?;
    let result = event_loop(session, pulses_per_second).await;
    let _ = session.host_mut().exit();
    result
}

async fn event_loop(session: &mut Orchestrator<TerminalHost>, pulses_per_second: u32) -> Result<()> {
    // crossterm's blocking reader lives on its own thread; all game state
    // stays on this task.
    let (tx, mut rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let mut ticker = interval(Duration::from_secs_f64(1.0 / pulses_per_second.max(1) as f64));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                session.pulse();
                session.host_mut().draw()?;
            }
            ev = rx.recv() => {
                let Some(ev) = ev else {
                    return Ok(());
                };
                match ev {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(action) = map_key(key) {
                            session.control_action(action);
                        }
                    }
                    Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                        session.pointer_select(cell_at(mouse.column, mouse.row));
                    }
                    Event::Resize(..) => session.host_mut().invalidate(),
                    _ => {}
                }
            }
        }
    }
}
