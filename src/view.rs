//! Mapping from game state to what every cell shows.

use crate::board::CellState;
use crate::controls::{ControlAction, PLAYER_SLOT};
use crate::coord::{Bounds, Coord};
use crate::display::{Canvas, CellDisplay, Rgb};
use crate::game::{GameEngine, GamePhase};
use crate::ship::Ship;

pub const DEFAULT_CELL: CellDisplay = CellDisplay::new(Rgb::GRAY_DARK, Rgb::GRAY, ' ');
pub const PANEL_CELL: CellDisplay = CellDisplay::new(Rgb::BLACK, Rgb::BLACK, ' ');
pub const SHIP_COLOR: Rgb = Rgb::GRAY;
pub const HIT_COLOR: Rgb = Rgb::ORANGE;
pub const SUNK_COLOR: Rgb = Rgb::RED;
pub const MISS_GLYPH: char = 'X';
pub const ANCHOR_GLYPH: char = '•';

/// Row holding the control panel, directly below the grid.
pub fn panel_row(grid: Bounds) -> i32 {
    grid.height
}

/// Canvas area needed for the grid plus the control panel.
pub fn canvas_bounds(grid: Bounds) -> Bounds {
    Bounds::new(grid.width, grid.height + 1)
}

/// Fill used to mark the selected attack target.
pub fn target_highlight() -> Rgb {
    DEFAULT_CELL.fill.contrasting()
}

fn ship_display(ship: &Ship, color: Rgb, at: Coord) -> CellDisplay {
    let glyph = if ship.anchor() == at { ANCHOR_GLYPH } else { ' ' };
    CellDisplay::new(color, color, glyph)
}

/// Display triple of grid cell `at` for the current phase.
pub fn cell_display(engine: &GameEngine, at: Coord) -> CellDisplay {
    let opponent = engine.opponent_side();
    let mut display = DEFAULT_CELL;
    match opponent.board().state(at) {
        Some(CellState::Bombed) => display.glyph = MISS_GLYPH,
        Some(CellState::Hit) => display.fill = HIT_COLOR,
        Some(CellState::Empty) | Some(CellState::Occupied) | None => {}
    }
    match engine.phase() {
        GamePhase::Placing(_) => {
            let current = engine.current_side();
            if let Some(ship) = current.ship_at(at).and_then(|id| current.ship(id)) {
                let color = if engine.selected_ship() == Some(ship.id()) {
                    SHIP_COLOR.contrasting()
                } else {
                    SHIP_COLOR
                };
                display = ship_display(ship, color, at);
            }
        }
        GamePhase::Attacking(_) | GamePhase::End { .. } => {
            if let Some(ship) = opponent.ship_at(at).and_then(|id| opponent.ship(id)) {
                if ship.is_sunk() {
                    display = ship_display(ship, SUNK_COLOR, at);
                }
            }
            if engine.selected_target() == Some(at) {
                display.fill = target_highlight();
            }
        }
    }
    display
}

/// Repaint every grid cell from the engine state.
pub fn paint_grid<C: Canvas + ?Sized>(engine: &GameEngine, canvas: &mut C) {
    for at in engine.bounds().iter() {
        canvas.paint(at, cell_display(engine, at));
    }
}

/// Display triple of control-panel slot `x`.
pub fn panel_display(engine: &GameEngine, x: i32) -> CellDisplay {
    let mut display = PANEL_CELL;
    if x == PLAYER_SLOT {
        let side = match engine.phase() {
            GamePhase::End { winner } => winner,
            _ => engine.current_side().id(),
        };
        display.glyph = side.name().chars().next().unwrap_or(' ');
    } else if let Some(action) = ControlAction::from_panel_slot(x) {
        display.glyph = action.glyph();
    }
    display
}

/// Repaint the control-panel row.
pub fn paint_panel<C: Canvas + ?Sized>(engine: &GameEngine, canvas: &mut C) {
    let grid = engine.bounds();
    let row = panel_row(grid);
    for x in 0..grid.width {
        canvas.paint(Coord::new(x, row), panel_display(engine, x));
    }
}

/// Repaint grid and control panel.
pub fn paint_all<C: Canvas + ?Sized>(engine: &GameEngine, canvas: &mut C) {
    paint_grid(engine, canvas);
    paint_panel(engine, canvas);
}
