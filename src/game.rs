use rand::Rng;

use crate::{
    board::{AttackOutcome, CellState, Side, SideId},
    common::{violation, ConfigError, InvariantViolation, RuleError},
    config::GameConfig,
    coord::{Bounds, Coord, Direction},
    ship::ShipId,
};

/// Phase of the game, tagged with the side whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Placing(SideId),
    Attacking(SideId),
    End { winner: SideId },
}

impl GamePhase {
    /// The side allowed to act, `None` once the game has ended.
    pub fn active_side(&self) -> Option<SideId> {
        match self {
            GamePhase::Placing(s) | GamePhase::Attacking(s) => Some(*s),
            GamePhase::End { .. } => None,
        }
    }

    pub fn is_placing(&self) -> bool {
        matches!(self, GamePhase::Placing(_))
    }
}

/// Result of a successful [`GameEngine::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A ship of the current side is now selected.
    Ship(ShipId),
    /// An opponent cell is now the attack target; `previous` was replaced.
    Target { at: Coord, previous: Option<Coord> },
}

/// Everything the caller needs to present a resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackReport {
    pub attacker: SideId,
    pub target: Coord,
    pub outcome: AttackOutcome,
    /// Set only on the attack that ended the game.
    pub winner: Option<SideId>,
}

/// Result of a successful [`GameEngine::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A side finished placing; `next` is the new phase.
    PlacementDone { next: GamePhase },
    /// The selected target was attacked.
    Attack(AttackReport),
}

/// Rules engine: both sides, whose turn it is, and the current selections.
///
/// The two sides live in a fixed array; a turn flip only toggles which
/// index is current, so neither board is copied or moved.
#[derive(Debug, Clone)]
pub struct GameEngine {
    sides: [Side; 2],
    current: usize,
    phase: GamePhase,
    selected_ship: Option<ShipId>,
    selected_target: Option<Coord>,
    turn_resolved: bool,
    submit_count: u32,
}

impl GameEngine {
    /// New game with the fixed starting layout on both sides.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = config.bounds();
        Ok(Self::from_sides(
            Side::new(SideId::A, bounds, &config.ship_lengths)?,
            Side::new(SideId::B, bounds, &config.ship_lengths)?,
        ))
    }

    /// New game with both fleets scattered at random.
    pub fn with_random_layout<R: Rng>(config: &GameConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = config.bounds();
        Ok(Self::from_sides(
            Side::scattered(SideId::A, bounds, &config.ship_lengths, rng)?,
            Side::scattered(SideId::B, bounds, &config.ship_lengths, rng)?,
        ))
    }

    fn from_sides(a: Side, b: Side) -> Self {
        Self {
            sides: [a, b],
            current: 0,
            phase: GamePhase::Placing(SideId::A),
            selected_ship: None,
            selected_target: None,
            turn_resolved: false,
            submit_count: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn winner(&self) -> Option<SideId> {
        match self.phase {
            GamePhase::End { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.sides[0].board().bounds()
    }

    /// The side whose ships are placed or who attacks.
    pub fn current_side(&self) -> &Side {
        &self.sides[self.current]
    }

    /// The side being attacked.
    pub fn opponent_side(&self) -> &Side {
        &self.sides[1 - self.current]
    }

    pub fn side(&self, id: SideId) -> &Side {
        match id {
            SideId::A => &self.sides[0],
            SideId::B => &self.sides[1],
        }
    }

    pub fn selected_ship(&self) -> Option<ShipId> {
        self.selected_ship
    }

    pub fn selected_target(&self) -> Option<Coord> {
        self.selected_target
    }

    /// `true` between a resolved attack and the following [`end_turn`](Self::end_turn).
    pub fn turn_resolved(&self) -> bool {
        self.turn_resolved
    }

    /// Number of accepted submits.
    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Select a ship (placing) or an attack target (attacking) at `at`.
    pub fn select(&mut self, at: Coord) -> Result<Selection, RuleError> {
        if !self.bounds().contains(at) {
            return Err(RuleError::OutOfBounds(at));
        }
        match self.phase {
            GamePhase::End { .. } => Err(RuleError::GameOver),
            GamePhase::Placing(_) => {
                let ship = self
                    .current_side()
                    .ship_at(at)
                    .ok_or(RuleError::NothingToSelect(at))?;
                self.selected_ship = Some(ship);
                Ok(Selection::Ship(ship))
            }
            GamePhase::Attacking(_) => {
                if self.turn_resolved {
                    return Err(RuleError::TurnAlreadyResolved);
                }
                match self.opponent_side().board().state(at) {
                    Some(CellState::Hit) | Some(CellState::Bombed) => {
                        Err(RuleError::AlreadyTargeted(at))
                    }
                    _ => {
                        let previous = self.selected_target.replace(at);
                        Ok(Selection::Target { at, previous })
                    }
                }
            }
        }
    }

    /// Rotate the selected ship a quarter turn about its anchor.
    pub fn rotate(&mut self, clockwise: bool) -> Result<(), RuleError> {
        let ship = self.placing_selection()?;
        self.sides[self.current].try_rotate(ship, clockwise)?;
        self.debug_validate();
        Ok(())
    }

    /// Move the selected ship one cell.
    pub fn shift(&mut self, dir: Direction) -> Result<(), RuleError> {
        let ship = self.placing_selection()?;
        self.sides[self.current].try_shift(ship, dir)?;
        self.debug_validate();
        Ok(())
    }

    fn placing_selection(&self) -> Result<ShipId, RuleError> {
        match self.phase {
            GamePhase::Placing(_) => self.selected_ship.ok_or(RuleError::NoShipSelected),
            GamePhase::Attacking(_) => Err(RuleError::WrongPhase),
            GamePhase::End { .. } => Err(RuleError::GameOver),
        }
    }

    /// Finish placement, or attack the selected target.
    pub fn submit(&mut self) -> Result<SubmitOutcome, RuleError> {
        let outcome = match self.phase {
            GamePhase::End { .. } => return Err(RuleError::GameOver),
            GamePhase::Placing(SideId::A) => {
                self.flip(GamePhase::Placing(SideId::B));
                SubmitOutcome::PlacementDone { next: self.phase }
            }
            GamePhase::Placing(SideId::B) => {
                self.flip(GamePhase::Attacking(SideId::A));
                SubmitOutcome::PlacementDone { next: self.phase }
            }
            GamePhase::Attacking(attacker) => {
                if self.turn_resolved {
                    return Err(RuleError::TurnAlreadyResolved);
                }
                let target = self.selected_target.ok_or(RuleError::NoTargetSelected)?;
                let outcome = self.sides[1 - self.current].receive_attack(target)?;
                self.selected_target = None;
                self.turn_resolved = true;
                let winner = if self.opponent_side().all_sunk() {
                    self.phase = GamePhase::End { winner: attacker };
                    log::info!("side {} won", attacker);
                    Some(attacker)
                } else {
                    None
                };
                log::debug!("side {} attacked {}: {:?}", attacker, target, outcome);
                SubmitOutcome::Attack(AttackReport {
                    attacker,
                    target,
                    outcome,
                    winner,
                })
            }
        };
        self.submit_count += 1;
        Ok(outcome)
    }

    /// Pass the turn to the other attacker once this turn's attack resolved.
    pub fn end_turn(&mut self) -> Result<GamePhase, RuleError> {
        match self.phase {
            GamePhase::End { .. } => Err(RuleError::GameOver),
            GamePhase::Placing(_) => Err(RuleError::WrongPhase),
            GamePhase::Attacking(_) if !self.turn_resolved => Err(RuleError::TurnNotResolved),
            GamePhase::Attacking(side) => {
                self.flip(GamePhase::Attacking(side.other()));
                Ok(self.phase)
            }
        }
    }

    fn flip(&mut self, next: GamePhase) {
        self.current = 1 - self.current;
        self.phase = next;
        self.selected_ship = None;
        self.selected_target = None;
        self.turn_resolved = false;
        debug_assert_eq!(next.active_side(), Some(self.sides[self.current].id()));
        log::debug!("phase -> {:?}", next);
    }

    /// Sweep both sides for footprint and overlap inconsistencies.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        for side in &self.sides {
            side.validate()?;
        }
        Ok(())
    }

    fn debug_validate(&self) {
        if let Err(v) = self.validate() {
            violation(v);
        }
    }
}
