//! Services the game core calls into: drawing, sound and status text.

use alloc::string::String;
use alloc::vec::Vec;

use crate::coord::{Bounds, Coord};
use crate::display::{Canvas, CellDisplay, DisplayPatch, MemoryCanvas};

/// Sound cues. Playback is fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Select,
    Shift,
    Launch,
    Splash,
    Hit,
    Sunk,
    Victory,
}

/// Everything outside the game core: a canvas plus audio and status output.
pub trait Host: Canvas {
    fn play_sound(&mut self, sound: Sound);

    /// Show a status line. The orchestrator calls this once, when the game ends.
    fn announce_status(&mut self, text: &str);
}

/// In-memory host that records sounds and announcements.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    canvas: MemoryCanvas,
    sounds: Vec<Sound>,
    announcements: Vec<String>,
}

impl RecordingHost {
    /// Host covering `bounds` (grid plus control row).
    pub fn new(bounds: Bounds) -> Self {
        Self {
            canvas: MemoryCanvas::new(bounds),
            sounds: Vec::new(),
            announcements: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &MemoryCanvas {
        &self.canvas
    }

    pub fn sounds(&self) -> &[Sound] {
        &self.sounds
    }

    pub fn announcements(&self) -> &[String] {
        &self.announcements
    }
}

impl Canvas for RecordingHost {
    fn cell_display(&self, at: Coord) -> CellDisplay {
        self.canvas.cell_display(at)
    }

    fn set_cell_display(&mut self, at: Coord, patch: DisplayPatch) {
        self.canvas.set_cell_display(at, patch);
    }
}

impl Host for RecordingHost {
    fn play_sound(&mut self, sound: Sound) {
        self.sounds.push(sound);
    }

    fn announce_status(&mut self, text: &str) {
        self.announcements.push(String::from(text));
    }
}
