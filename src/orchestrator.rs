//! Wires player input to the rules engine and to animation playback.
//!
//! The orchestrator is the only part of the game that talks to the [`Host`].
//! A single input-active flag gates every handler: attack animations clear
//! it in their first step and set it again in their last.

use crate::animation::AnimationQueue;
use crate::common::RuleError;
use crate::config::AnimationTiming;
use crate::controls::ControlAction;
use crate::coord::Coord;
use crate::display::{Canvas, CellDisplay, DisplayPatch};
use crate::fx;
use crate::game::{GameEngine, Selection, SubmitOutcome};
use crate::host::{Host, Sound};
use crate::view;

/// Animation context: the engine, the host and the input gate.
pub struct Table<H> {
    engine: GameEngine,
    host: H,
    input_active: bool,
    timing: AnimationTiming,
}

impl<H: Host> Table<H> {
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn input_active(&self) -> bool {
        self.input_active
    }

    pub fn set_input_active(&mut self, active: bool) {
        self.input_active = active;
    }

    pub fn repaint_grid(&mut self) {
        view::paint_grid(&self.engine, &mut self.host);
    }

    pub fn repaint_all(&mut self) {
        view::paint_all(&self.engine, &mut self.host);
    }
}

impl<H: Host> Canvas for Table<H> {
    fn cell_display(&self, at: Coord) -> CellDisplay {
        self.host.cell_display(at)
    }

    fn set_cell_display(&mut self, at: Coord, patch: DisplayPatch) {
        self.host.set_cell_display(at, patch);
    }
}

/// Owns one game session and its in-flight animation.
pub struct Orchestrator<H: Host + 'static> {
    table: Table<H>,
    animation: Option<AnimationQueue<Table<H>>>,
}

impl<H: Host + 'static> Orchestrator<H> {
    /// Start a session and draw the initial grid and control panel.
    pub fn new(engine: GameEngine, host: H, timing: AnimationTiming) -> Self {
        let mut table = Table {
            engine,
            host,
            input_active: true,
            timing,
        };
        table.repaint_all();
        Self {
            table,
            animation: None,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.table.engine
    }

    pub fn host(&self) -> &H {
        &self.table.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.table.host
    }

    pub fn input_active(&self) -> bool {
        self.table.input_active
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Advance the in-flight animation by one pulse.
    pub fn pulse(&mut self) {
        if let Some(queue) = self.animation.as_mut() {
            queue.pulse(&mut self.table);
            if !queue.is_running() {
                self.animation = None;
            }
        }
    }

    /// A pointer press on the grid or the control-panel row.
    pub fn pointer_select(&mut self, at: Coord) {
        if !self.table.input_active {
            log::trace!("pointer input at {} dropped while inactive", at);
            return;
        }
        let grid = self.table.engine.bounds();
        if at.y == view::panel_row(grid) {
            if let Some(action) = ControlAction::from_panel_slot(at.x) {
                self.control_action(action);
            }
            return;
        }
        match self.table.engine.select(at) {
            Ok(Selection::Ship(_)) => {
                self.table.repaint_grid();
                self.table.host.play_sound(Sound::Select);
            }
            Ok(Selection::Target { at, previous }) => {
                if let Some(previous) = previous {
                    let display = view::cell_display(&self.table.engine, previous);
                    self.table.host.paint(previous, display);
                }
                let display = view::cell_display(&self.table.engine, at);
                self.table.host.paint(at, display);
                self.table.host.play_sound(Sound::Select);
            }
            Err(e) => rejected(e),
        }
    }

    /// A control command from the panel or the keyboard.
    pub fn control_action(&mut self, action: ControlAction) {
        if !self.table.input_active {
            log::trace!("{:?} dropped while inactive", action);
            return;
        }
        let edited = match action {
            ControlAction::RotateCw => self.table.engine.rotate(true),
            ControlAction::RotateCcw => self.table.engine.rotate(false),
            ControlAction::MoveLeft
            | ControlAction::MoveRight
            | ControlAction::MoveUp
            | ControlAction::MoveDown => match action.direction() {
                Some(dir) => self.table.engine.shift(dir),
                None => return,
            },
            ControlAction::Submit => {
                self.submit();
                return;
            }
        };
        match edited {
            Ok(()) => {
                self.table.repaint_grid();
                self.table.host.play_sound(Sound::Shift);
            }
            Err(e) => rejected(e),
        }
    }

    fn submit(&mut self) {
        match self.table.engine.submit() {
            Ok(SubmitOutcome::PlacementDone { next }) => {
                log::debug!("placement submitted, now {:?}", next);
                self.table.repaint_all();
            }
            Ok(SubmitOutcome::Attack(report)) => {
                let grid = self.table.engine.bounds();
                let mut queue = fx::attack_sequence::<H>(report, grid, self.table.timing);
                queue.start();
                self.animation = Some(queue);
            }
            Err(e) => rejected(e),
        }
    }
}

fn rejected(e: RuleError) {
    if e.is_user_rejection() {
        log::trace!("action rejected: {}", e);
    } else {
        log::warn!("action aborted: {}", e);
    }
}
