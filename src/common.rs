//! Common error types: rejected user actions, rules-engine invariant failures
//! and configuration errors.

use crate::coord::Coord;
use crate::ship::ShipId;

/// An action the rules refuse. These are ordinary interaction feedback:
/// callers drop them without surfacing anything to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleError {
    /// Coordinate lies outside the playing grid.
    OutOfBounds(Coord),
    /// Nothing selectable at the given cell.
    NothingToSelect(Coord),
    /// Rotate/move requested without a selected ship.
    NoShipSelected,
    /// Submit during attack without a selected target.
    NoTargetSelected,
    /// Candidate footprint leaves the grid or overlaps another ship.
    Blocked,
    /// Cell was already hit or bombed.
    AlreadyTargeted(Coord),
    /// Operation not available in the current phase.
    WrongPhase,
    /// The attack for this turn has already been resolved.
    TurnAlreadyResolved,
    /// `end_turn` called before the attack was resolved.
    TurnNotResolved,
    /// The game has ended; every input is a no-op.
    GameOver,
    /// The engine detected an internal inconsistency and aborted the operation.
    Invariant(InvariantViolation),
}

impl RuleError {
    /// Returns `true` for plain user rejections (everything but invariant failures).
    pub fn is_user_rejection(&self) -> bool {
        !matches!(self, RuleError::Invariant(_))
    }
}

impl From<InvariantViolation> for RuleError {
    fn from(err: InvariantViolation) -> Self {
        RuleError::Invariant(err)
    }
}

impl core::fmt::Display for RuleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RuleError::OutOfBounds(c) => write!(f, "Coordinate {} is outside the grid", c),
            RuleError::NothingToSelect(c) => write!(f, "Nothing to select at {}", c),
            RuleError::NoShipSelected => write!(f, "No ship is selected"),
            RuleError::NoTargetSelected => write!(f, "No target is selected"),
            RuleError::Blocked => write!(f, "Ship cannot go there"),
            RuleError::AlreadyTargeted(c) => write!(f, "Cell {} was already attacked", c),
            RuleError::WrongPhase => write!(f, "Action not available in this phase"),
            RuleError::TurnAlreadyResolved => write!(f, "This turn's attack is already resolved"),
            RuleError::TurnNotResolved => write!(f, "This turn's attack has not been resolved"),
            RuleError::GameOver => write!(f, "The game is over"),
            RuleError::Invariant(v) => write!(f, "Invariant violation: {}", v),
        }
    }
}

/// A rules-engine defect. Never caused by player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A hit was registered at a cell outside the ship's footprint.
    HitOutsideFootprint { ship: ShipId, at: Coord },
    /// Two ships of the same side share a cell.
    OverlappingShips { first: ShipId, second: ShipId, at: Coord },
    /// A ship footprint leaves the grid.
    FootprintOutOfBounds { ship: ShipId, at: Coord },
    /// A board cell disagrees with the ship said to occupy it.
    CellShipMismatch { ship: ShipId, at: Coord },
    /// An occupied or hit cell carries no ship handle.
    OrphanCell(Coord),
    /// A ship handle does not index the side's ship list.
    UnknownShip(ShipId),
}

impl core::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvariantViolation::HitOutsideFootprint { ship, at } => {
                write!(f, "hit at {} is outside the footprint of ship {}", at, ship.0)
            }
            InvariantViolation::OverlappingShips { first, second, at } => {
                write!(f, "ships {} and {} overlap at {}", first.0, second.0, at)
            }
            InvariantViolation::FootprintOutOfBounds { ship, at } => {
                write!(f, "ship {} extends out of bounds at {}", ship.0, at)
            }
            InvariantViolation::CellShipMismatch { ship, at } => {
                write!(f, "cell {} does not record ship {}", at, ship.0)
            }
            InvariantViolation::OrphanCell(at) => write!(f, "cell {} has no ship handle", at),
            InvariantViolation::UnknownShip(ship) => write!(f, "unknown ship handle {}", ship.0),
        }
    }
}

/// Report an invariant violation: asserts in debug builds, logs in release.
/// The caller must abort the operation without mutating further state.
pub(crate) fn violation(v: InvariantViolation) -> InvariantViolation {
    log::error!("rules engine invariant violated: {}", v);
    debug_assert!(false, "rules engine invariant violated: {}", v);
    v
}

/// Errors from building a game out of a [`GameConfig`](crate::GameConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height is not positive.
    InvalidDimensions { width: i32, height: i32 },
    /// The fleet has no ships.
    EmptyFleet,
    /// A ship has length zero.
    ZeroLengthShip(usize),
    /// A ship is longer than the grid is wide.
    ShipTooLong { index: usize, length: usize },
    /// The fixed layout needs one row per ship.
    TooManyShips { ships: usize, rows: i32 },
    /// Random placement gave up.
    UnableToPlaceShip(usize),
    /// Pulse rate of zero.
    InvalidPulseRate,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidDimensions { width, height } => {
                write!(f, "Grid dimensions {}x{} are invalid", width, height)
            }
            ConfigError::EmptyFleet => write!(f, "The fleet must contain at least one ship"),
            ConfigError::ZeroLengthShip(i) => write!(f, "Ship {} has zero length", i),
            ConfigError::ShipTooLong { index, length } => {
                write!(f, "Ship {} of length {} does not fit the grid", index, length)
            }
            ConfigError::TooManyShips { ships, rows } => {
                write!(f, "{} ships do not fit in {} rows", ships, rows)
            }
            ConfigError::UnableToPlaceShip(i) => write!(f, "Unable to place ship {}", i),
            ConfigError::InvalidPulseRate => write!(f, "Pulse rate must be positive"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RuleError {}
#[cfg(feature = "std")]
impl std::error::Error for InvariantViolation {}
#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
