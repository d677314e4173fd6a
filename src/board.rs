//! Per-player grid of cell states plus the fleet placed on it.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::common::{violation, ConfigError, InvariantViolation, RuleError};
use crate::coord::{Bounds, Coord, Direction};
use crate::ship::{HitOutcome, Orientation, Ship, ShipId, ShipSpec};

/// Identity of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideId {
    A,
    B,
}

impl SideId {
    pub fn other(self) -> Self {
        match self {
            SideId::A => SideId::B,
            SideId::B => SideId::A,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SideId::A => "A",
            SideId::B => "B",
        }
    }
}

impl fmt::Display for SideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// State of one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Empty,
    Occupied,
    Hit,
    /// Targeted but empty: a permanent miss marker.
    Bombed,
}

/// One board cell. `ship` is a lookup handle into the owning side's fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub state: CellState,
    pub ship: Option<ShipId>,
}

/// Row-major grid of cells.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    bounds: Bounds,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: vec![Cell::default(); bounds.area()],
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn cell(&self, c: Coord) -> Option<&Cell> {
        self.bounds.index(c).map(|i| &self.cells[i])
    }

    fn cell_mut(&mut self, c: Coord) -> Option<&mut Cell> {
        self.bounds.index(c).map(move |i| &mut self.cells[i])
    }

    pub fn state(&self, c: Coord) -> Option<CellState> {
        self.cell(c).map(|cell| cell.state)
    }

    /// Every cell together with its coordinate, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        self.bounds.iter().zip(self.cells.iter())
    }

    /// Number of cells in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }

    /// Mark `cells` as covered by `ship`. An off-grid cell is an engine defect
    /// and leaves the board untouched.
    fn occupy(&mut self, cells: &[Coord], ship: ShipId) -> Result<(), InvariantViolation> {
        if let Some(&at) = cells.iter().find(|c| !self.bounds.contains(**c)) {
            return Err(violation(InvariantViolation::FootprintOutOfBounds { ship, at }));
        }
        for c in cells {
            if let Some(cell) = self.cell_mut(*c) {
                *cell = Cell {
                    state: CellState::Occupied,
                    ship: Some(ship),
                };
            }
        }
        Ok(())
    }

    fn vacate(&mut self, cells: &[Coord]) {
        for c in cells {
            if let Some(cell) = self.cell_mut(*c) {
                *cell = Cell::default();
            }
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{} {{", self.bounds.width, self.bounds.height)?;
        for y in 0..self.bounds.height {
            write!(f, "  ")?;
            for x in 0..self.bounds.width {
                let ch = match self.state(Coord::new(x, y)) {
                    Some(CellState::Empty) | None => '.',
                    Some(CellState::Occupied) => 'O',
                    Some(CellState::Hit) => 'H',
                    Some(CellState::Bombed) => 'B',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

fn check_lengths(lengths: &[usize]) -> Result<(), ConfigError> {
    match lengths.iter().position(|&len| len == 0) {
        Some(index) => Err(ConfigError::ZeroLengthShip(index)),
        None => Ok(()),
    }
}

/// What an attack on a cell did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Empty water, now bombed.
    Miss,
    /// A ship was hit but still floats.
    Hit(ShipId),
    /// The hit sank the ship.
    Sunk(ShipId),
}

/// A player: identity, board and fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Side {
    id: SideId,
    board: Board,
    ships: Vec<Ship>,
}

impl Side {
    /// Fleet in the fixed starting layout: ship `i` lies horizontally at `(0, i)`.
    pub fn new(id: SideId, bounds: Bounds, lengths: &[usize]) -> Result<Self, ConfigError> {
        check_lengths(lengths)?;
        if lengths.len() > bounds.height.max(0) as usize {
            return Err(ConfigError::TooManyShips {
                ships: lengths.len(),
                rows: bounds.height,
            });
        }
        if let Some((index, &length)) = lengths
            .iter()
            .enumerate()
            .find(|(_, len)| **len > bounds.width.max(0) as usize)
        {
            return Err(ConfigError::ShipTooLong { index, length });
        }
        let mut side = Self::empty(id, bounds);
        for (i, &len) in lengths.iter().enumerate() {
            let spec = ShipSpec::new(len, Orientation::Horizontal, Coord::new(0, i as i32));
            side.push_ship(spec)
                .map_err(|_| ConfigError::UnableToPlaceShip(i))?;
        }
        Ok(side)
    }

    /// Fleet at random non-overlapping positions.
    pub fn scattered<R: Rng>(
        id: SideId,
        bounds: Bounds,
        lengths: &[usize],
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        check_lengths(lengths)?;
        let mut side = Self::empty(id, bounds);
        for (i, &len) in lengths.iter().enumerate() {
            let spec = side.random_placement(rng, len).ok_or(ConfigError::UnableToPlaceShip(i))?;
            side.push_ship(spec)
                .map_err(|_| ConfigError::UnableToPlaceShip(i))?;
        }
        Ok(side)
    }

    fn empty(id: SideId, bounds: Bounds) -> Self {
        Side {
            id,
            board: Board::new(bounds),
            ships: Vec::new(),
        }
    }

    fn push_ship(&mut self, spec: ShipSpec) -> Result<(), InvariantViolation> {
        let ship_id = ShipId(self.ships.len());
        let ship = Ship::new(ship_id, spec, self.id);
        self.board.occupy(&ship.occupied_cells(), ship_id)?;
        self.ships.push(ship);
        Ok(())
    }

    /// Returns a random in-bounds, non-overlapping placement for a ship of `len`.
    fn random_placement<R: Rng>(&self, rng: &mut R, len: usize) -> Option<ShipSpec> {
        let bounds = self.board.bounds;
        let mut attempts = 0;
        while attempts < 100 {
            attempts += 1;
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_x, max_y) = match orientation {
                Orientation::Horizontal => (bounds.width - len as i32, bounds.height - 1),
                Orientation::Vertical => (bounds.width - 1, bounds.height - len as i32),
            };
            if max_x < 0 || max_y < 0 {
                continue;
            }
            let anchor = Coord::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
            let spec = ShipSpec::new(len, orientation, anchor);
            if spec.cells().iter().all(|c| self.board.state(*c) == Some(CellState::Empty)) {
                return Some(spec);
            }
        }
        None
    }

    pub fn id(&self) -> SideId {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.0)
    }

    /// Ship whose footprint covers `c`.
    pub fn ship_at(&self, c: Coord) -> Option<ShipId> {
        self.board.cell(c).and_then(|cell| cell.ship)
    }

    /// Returns `true` when every ship is sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// A candidate footprint is legal for `ship` when every cell is on the
    /// grid and either free or already covered by `ship` itself.
    pub fn can_occupy(&self, ship: ShipId, cells: &[Coord]) -> bool {
        cells.iter().all(|c| match self.board.cell(*c) {
            Some(cell) => cell.ship.map_or(true, |other| other == ship),
            None => false,
        })
    }

    /// Rotate `ship` about its anchor if the new footprint is legal.
    pub fn try_rotate(&mut self, ship: ShipId, clockwise: bool) -> Result<(), RuleError> {
        let candidate = self.ship_ref(ship)?.cells_after_rotate(clockwise);
        self.relocate(ship, &candidate, |s| s.commit_rotate(clockwise))
    }

    /// Move `ship` one cell if the new footprint is legal.
    pub fn try_shift(&mut self, ship: ShipId, dir: Direction) -> Result<(), RuleError> {
        let candidate = self.ship_ref(ship)?.cells_after_move(dir);
        self.relocate(ship, &candidate, |s| s.commit_move(dir))
    }

    fn ship_ref(&self, id: ShipId) -> Result<&Ship, InvariantViolation> {
        self.ships
            .get(id.0)
            .ok_or_else(|| violation(InvariantViolation::UnknownShip(id)))
    }

    fn relocate(
        &mut self,
        id: ShipId,
        candidate: &[Coord],
        commit: impl FnOnce(&mut Ship),
    ) -> Result<(), RuleError> {
        if !self.can_occupy(id, candidate) {
            return Err(RuleError::Blocked);
        }
        let ship = &mut self.ships[id.0];
        let old = ship.occupied_cells();
        commit(ship);
        self.board.vacate(&old);
        self.board.occupy(candidate, id)?;
        Ok(())
    }

    /// Resolve an attack on `c`.
    pub fn receive_attack(&mut self, c: Coord) -> Result<AttackOutcome, RuleError> {
        let cell = *self.board.cell(c).ok_or(RuleError::OutOfBounds(c))?;
        match cell.state {
            CellState::Hit | CellState::Bombed => Err(RuleError::AlreadyTargeted(c)),
            CellState::Empty => {
                if let Some(cell) = self.board.cell_mut(c) {
                    cell.state = CellState::Bombed;
                }
                Ok(AttackOutcome::Miss)
            }
            CellState::Occupied => {
                let id = cell
                    .ship
                    .ok_or_else(|| violation(InvariantViolation::OrphanCell(c)))?;
                let ship = self
                    .ships
                    .get_mut(id.0)
                    .ok_or_else(|| violation(InvariantViolation::UnknownShip(id)))?;
                let outcome = ship.hit(c)?;
                if let Some(cell) = self.board.cell_mut(c) {
                    cell.state = CellState::Hit;
                }
                Ok(match outcome {
                    HitOutcome::Sunk => AttackOutcome::Sunk(id),
                    HitOutcome::Damaged | HitOutcome::Repeated => AttackOutcome::Hit(id),
                })
            }
        }
    }

    /// Check footprints against the board: in bounds, no overlap, every
    /// covered cell records its ship and every ship cell is covered.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut owner: Vec<Option<ShipId>> = vec![None; self.board.bounds.area()];
        for ship in &self.ships {
            for c in ship.occupied_cells() {
                let idx = self.board.bounds.index(c).ok_or(
                    InvariantViolation::FootprintOutOfBounds { ship: ship.id(), at: c },
                )?;
                if let Some(first) = owner[idx] {
                    return Err(InvariantViolation::OverlappingShips {
                        first,
                        second: ship.id(),
                        at: c,
                    });
                }
                owner[idx] = Some(ship.id());
                if self.board.cells[idx].ship != Some(ship.id()) {
                    return Err(InvariantViolation::CellShipMismatch { ship: ship.id(), at: c });
                }
            }
        }
        for (c, cell) in self.board.iter() {
            match cell.state {
                CellState::Occupied | CellState::Hit if cell.ship.is_none() => {
                    return Err(InvariantViolation::OrphanCell(c));
                }
                _ => {}
            }
            if let (Some(ship), Some(idx)) = (cell.ship, self.board.bounds.index(c)) {
                if owner[idx] != Some(ship) {
                    return Err(InvariantViolation::CellShipMismatch { ship, at: c });
                }
            }
        }
        Ok(())
    }
}
