//! Per-cell display triples and the canvas they are drawn on.

use alloc::vec;
use alloc::vec::Vec;

use crate::coord::{Bounds, Coord};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const GRAY_LIGHT: Rgb = Rgb::new(192, 192, 192);
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);
    pub const GRAY_DARK: Rgb = Rgb::new(64, 64, 64);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const ORANGE: Rgb = Rgb::new(255, 128, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// sRGB relative luminance in `[0, 1]`.
    pub fn luminance(self) -> f64 {
        fn channel(v: u8) -> f64 {
            let c = v as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                libm::pow((c + 0.055) / 1.055, 2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    /// Black on bright colors, white on dark ones.
    pub fn contrasting(self) -> Rgb {
        if self.luminance() > 0.5 {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    }
}

/// What a cell currently shows. A blank glyph is `' '`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellDisplay {
    pub fill: Rgb,
    pub border: Rgb,
    pub glyph: char,
}

impl CellDisplay {
    pub const fn new(fill: Rgb, border: Rgb, glyph: char) -> Self {
        Self { fill, border, glyph }
    }
}

impl Default for CellDisplay {
    fn default() -> Self {
        Self::new(Rgb::WHITE, Rgb::GRAY, ' ')
    }
}

/// A partial display update: absent fields are left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayPatch {
    pub fill: Option<Rgb>,
    pub border: Option<Rgb>,
    pub glyph: Option<char>,
}

impl DisplayPatch {
    pub const fn none() -> Self {
        Self {
            fill: None,
            border: None,
            glyph: None,
        }
    }

    pub const fn fill(mut self, fill: Rgb) -> Self {
        self.fill = Some(fill);
        self
    }

    pub const fn border(mut self, border: Rgb) -> Self {
        self.border = Some(border);
        self
    }

    pub const fn glyph(mut self, glyph: char) -> Self {
        self.glyph = Some(glyph);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fill.is_none() && self.border.is_none() && self.glyph.is_none()
    }

    /// Overwrite the present fields of `target`.
    pub fn apply_to(&self, target: &mut CellDisplay) {
        if let Some(fill) = self.fill {
            target.fill = fill;
        }
        if let Some(border) = self.border {
            target.border = border;
        }
        if let Some(glyph) = self.glyph {
            target.glyph = glyph;
        }
    }
}

impl From<CellDisplay> for DisplayPatch {
    fn from(d: CellDisplay) -> Self {
        Self {
            fill: Some(d.fill),
            border: Some(d.border),
            glyph: Some(d.glyph),
        }
    }
}

/// Single-cell visual get/set provided by the host.
pub trait Canvas {
    /// Current display triple of `at`.
    fn cell_display(&self, at: Coord) -> CellDisplay;

    /// Apply `patch` to `at`. Out-of-range coordinates are ignored.
    fn set_cell_display(&mut self, at: Coord, patch: DisplayPatch);

    /// Overwrite every field of `at`.
    fn paint(&mut self, at: Coord, display: CellDisplay) {
        self.set_cell_display(at, display.into());
    }
}

/// Canvas backed by a plain row-major buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryCanvas {
    bounds: Bounds,
    cells: Vec<CellDisplay>,
}

impl MemoryCanvas {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: vec![CellDisplay::default(); bounds.area()],
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn cells(&self) -> &[CellDisplay] {
        &self.cells
    }
}

impl Canvas for MemoryCanvas {
    fn cell_display(&self, at: Coord) -> CellDisplay {
        self.bounds
            .index(at)
            .map(|i| self.cells[i])
            .unwrap_or_default()
    }

    fn set_cell_display(&mut self, at: Coord, patch: DisplayPatch) {
        if let Some(i) = self.bounds.index(at) {
            patch.apply_to(&mut self.cells[i]);
        }
    }
}
