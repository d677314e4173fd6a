//! Commonly used types and utilities for ease of import.

pub use crate::{
    AnimationQueue, AnimationTiming, Canvas, ControlAction, Coord, Direction, Frame, GameConfig,
    GameEngine, GamePhase, Host, Orchestrator, RecordingHost, SideId,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, TerminalHost};
