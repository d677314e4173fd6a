//! Sparse display overrides that can be played onto a canvas and rolled back.

use alloc::collections::{BTreeMap, BTreeSet};

use crate::coord::Coord;
use crate::display::{Canvas, DisplayPatch};

/// A set of per-cell display patches (`overlay`) and the snapshot of what
/// those cells showed before the frame was first played (`underlay`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    overlay: BTreeMap<Coord, DisplayPatch>,
    underlay: Option<BTreeMap<Coord, DisplayPatch>>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, at: Coord, patch: DisplayPatch) -> Self {
        self.insert(at, patch);
        self
    }

    /// Set the patch for `at`. A held snapshot is kept; a cell it does not
    /// cover yet is captured on the next [`play`](Self::play).
    pub fn insert(&mut self, at: Coord, patch: DisplayPatch) {
        self.overlay.insert(at, patch);
    }

    pub fn overlay(&self) -> &BTreeMap<Coord, DisplayPatch> {
        &self.overlay
    }

    pub fn underlay(&self) -> Option<&BTreeMap<Coord, DisplayPatch>> {
        self.underlay.as_ref()
    }

    pub fn is_captured(&self) -> bool {
        self.underlay.is_some()
    }

    pub fn len(&self) -> usize {
        self.overlay.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlay.is_empty()
    }

    /// Snapshot the live display of every overlay coordinate.
    pub fn recapture<C: Canvas + ?Sized>(&mut self, canvas: &C) {
        let under = self
            .overlay
            .keys()
            .map(|&at| (at, DisplayPatch::from(canvas.cell_display(at))))
            .collect();
        self.underlay = Some(under);
    }

    /// Draw the overlay. Cells missing from the snapshot are captured first;
    /// cells already in it keep their original pre-play display.
    pub fn play<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        let under = self.underlay.get_or_insert_with(BTreeMap::new);
        for &at in self.overlay.keys() {
            under
                .entry(at)
                .or_insert_with(|| DisplayPatch::from(canvas.cell_display(at)));
        }
        for (&at, patch) in &self.overlay {
            canvas.set_cell_display(at, *patch);
        }
    }

    /// Write the snapshot back. Does nothing if the frame was never played.
    pub fn restore<C: Canvas + ?Sized>(&self, canvas: &mut C) -> bool {
        self.restore_except(canvas, &BTreeSet::new())
    }

    /// [`restore`](Self::restore), leaving the cells in `skip` as they are.
    pub fn restore_except<C: Canvas + ?Sized>(&self, canvas: &mut C, skip: &BTreeSet<Coord>) -> bool {
        match &self.underlay {
            Some(under) => {
                for (&at, patch) in under.iter().filter(|(at, _)| !skip.contains(*at)) {
                    canvas.set_cell_display(at, *patch);
                }
                true
            }
            None => {
                log::trace!("restore of an unplayed frame ignored");
                false
            }
        }
    }

    /// The frame with overlay and snapshot swapped; playing it restores this
    /// frame. `None` until a snapshot has been captured.
    pub fn invert(&self) -> Option<Frame> {
        self.underlay.as_ref().map(|under| Frame {
            overlay: under.clone(),
            underlay: Some(self.overlay.clone()),
        })
    }
}
