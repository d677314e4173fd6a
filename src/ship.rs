//! Ship geometry, rotation/move candidates and hit tracking.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::board::SideId;
use crate::common::{violation, InvariantViolation};
use crate::coord::{Coord, Direction};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Handle of a ship inside its side's fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShipId(pub usize);

/// Placement of a ship: everything its footprint is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipSpec {
    pub len: usize,
    pub orientation: Orientation,
    pub anchor: Coord,
    /// `true` when the footprint extends from the anchor toward +x/+y,
    /// `false` when it extends toward -x/-y.
    pub anchor_leading: bool,
}

impl ShipSpec {
    pub const fn new(len: usize, orientation: Orientation, anchor: Coord) -> Self {
        Self {
            len,
            orientation,
            anchor,
            anchor_leading: true,
        }
    }

    /// The `len` cells covered by this placement, anchor first.
    pub fn cells(&self) -> Vec<Coord> {
        let step = if self.anchor_leading { 1 } else { -1 };
        (0..self.len as i32)
            .map(|i| match self.orientation {
                Orientation::Horizontal => self.anchor.offset(i * step, 0),
                Orientation::Vertical => self.anchor.offset(0, i * step),
            })
            .collect()
    }

    /// This placement turned a quarter about its anchor.
    pub fn rotated(&self, clockwise: bool) -> Self {
        let mut next = *self;
        let flips = match (clockwise, self.orientation) {
            (true, Orientation::Vertical) => true,
            (false, Orientation::Horizontal) => true,
            _ => false,
        };
        if flips {
            next.anchor_leading = !next.anchor_leading;
        }
        next.orientation = self.orientation.toggled();
        next
    }

    /// This placement moved one cell in `dir`.
    pub fn moved(&self, dir: Direction) -> Self {
        let mut next = *self;
        next.anchor = self.anchor.step(dir);
        next
    }

    /// Offset of `c` from the anchor along the ship's axis, if `c` is on the footprint.
    fn segment_of(&self, c: Coord) -> Option<usize> {
        let (along, across) = match self.orientation {
            Orientation::Horizontal => (c.x - self.anchor.x, c.y - self.anchor.y),
            Orientation::Vertical => (c.y - self.anchor.y, c.x - self.anchor.x),
        };
        if across != 0 {
            return None;
        }
        let along = if self.anchor_leading { along } else { -along };
        if along >= 0 && (along as usize) < self.len {
            Some(along as usize)
        } else {
            None
        }
    }
}

/// Result of [`Ship::hit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// A fresh segment was hit, the ship still floats.
    Damaged,
    /// The last intact segment was hit.
    Sunk,
    /// The segment was already hit; nothing changed.
    Repeated,
}

/// A ship of one side, with its hit bitmap.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    id: ShipId,
    spec: ShipSpec,
    hits: Vec<bool>,
    sunk: bool,
    side: SideId,
}

impl Ship {
    pub fn new(id: ShipId, spec: ShipSpec, side: SideId) -> Self {
        Self {
            id,
            spec,
            hits: vec![false; spec.len],
            sunk: false,
            side,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn spec(&self) -> ShipSpec {
        self.spec
    }

    pub fn len(&self) -> usize {
        self.spec.len
    }

    pub fn side(&self) -> SideId {
        self.side
    }

    pub fn anchor(&self) -> Coord {
        self.spec.anchor
    }

    pub fn orientation(&self) -> Orientation {
        self.spec.orientation
    }

    /// Hit bitmap, index = distance from the anchor.
    pub fn hits(&self) -> &[bool] {
        &self.hits
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    pub fn occupied_cells(&self) -> Vec<Coord> {
        self.spec.cells()
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.spec.segment_of(c).is_some()
    }

    pub fn cells_after_rotate(&self, clockwise: bool) -> Vec<Coord> {
        self.spec.rotated(clockwise).cells()
    }

    pub fn cells_after_move(&self, dir: Direction) -> Vec<Coord> {
        self.spec.moved(dir).cells()
    }

    /// Apply a rotation. Only call after the candidate cells were validated.
    pub fn commit_rotate(&mut self, clockwise: bool) {
        self.spec = self.spec.rotated(clockwise);
    }

    /// Apply a move. Only call after the candidate cells were validated.
    pub fn commit_move(&mut self, dir: Direction) {
        self.spec = self.spec.moved(dir);
    }

    /// Register a hit at `c`. A coordinate off the footprint is a rules-engine
    /// defect and leaves the ship untouched.
    pub fn hit(&mut self, c: Coord) -> Result<HitOutcome, InvariantViolation> {
        let idx = self.spec.segment_of(c).ok_or_else(|| {
            violation(InvariantViolation::HitOutsideFootprint { ship: self.id, at: c })
        })?;
        if self.hits[idx] {
            return Ok(HitOutcome::Repeated);
        }
        self.hits[idx] = true;
        if !self.sunk && self.hits.iter().all(|h| *h) {
            self.sunk = true;
            return Ok(HitOutcome::Sunk);
        }
        Ok(HitOutcome::Damaged)
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: {}, side: {}, anchor: {}, orientation: {:?}, leading: {}, hits: {}/{}, sunk: {} }}",
            self.id.0,
            self.side,
            self.spec.anchor,
            self.spec.orientation,
            self.spec.anchor_leading,
            self.hits.iter().filter(|h| **h).count(),
            self.spec.len,
            self.sunk,
        )
    }
}
