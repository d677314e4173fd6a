//! Control actions and their slots on the control-panel row.

use crate::coord::Direction;

/// Player commands besides pointing at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    RotateCw,
    RotateCcw,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Submit,
}

/// Panel slot showing the current player's letter.
pub const PLAYER_SLOT: i32 = 6;

impl ControlAction {
    pub const ALL: [ControlAction; 7] = [
        ControlAction::RotateCw,
        ControlAction::RotateCcw,
        ControlAction::MoveLeft,
        ControlAction::MoveRight,
        ControlAction::MoveUp,
        ControlAction::MoveDown,
        ControlAction::Submit,
    ];

    pub const fn glyph(self) -> char {
        match self {
            ControlAction::RotateCw => '↻',
            ControlAction::RotateCcw => '↺',
            ControlAction::MoveLeft => '←',
            ControlAction::MoveRight => '→',
            ControlAction::MoveUp => '↑',
            ControlAction::MoveDown => '↓',
            ControlAction::Submit => '✔',
        }
    }

    /// Column of this action on the control-panel row.
    pub const fn panel_slot(self) -> i32 {
        match self {
            ControlAction::RotateCw => 0,
            ControlAction::RotateCcw => 1,
            ControlAction::MoveLeft => 2,
            ControlAction::MoveRight => 3,
            ControlAction::MoveUp => 4,
            ControlAction::MoveDown => 5,
            ControlAction::Submit => 7,
        }
    }

    pub fn from_panel_slot(x: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.panel_slot() == x)
    }

    /// The move this action performs, if it is a move.
    pub const fn direction(self) -> Option<Direction> {
        match self {
            ControlAction::MoveLeft => Some(Direction::Left),
            ControlAction::MoveRight => Some(Direction::Right),
            ControlAction::MoveUp => Some(Direction::Up),
            ControlAction::MoveDown => Some(Direction::Down),
            _ => None,
        }
    }
}
