use alloc::vec::Vec;

use crate::common::ConfigError;
use crate::coord::Bounds;

pub const GRID_WIDTH: i32 = 12;
pub const GRID_HEIGHT: i32 = 12;
pub const SHIP_LENGTHS: [usize; 2] = [2, 3];
pub const PULSES_PER_SECOND: u32 = 60;

/// Pulse counts for the attack animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct AnimationTiming {
    /// Pulses between projectile positions.
    pub projectile_step: u32,
    /// Pulses between blast rings.
    pub blast_step: u32,
    /// Pulses the result stays on screen before the turn passes.
    pub result_hold: u32,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            projectile_step: 3,
            blast_step: 4,
            result_hold: 60,
        }
    }
}

/// Game setup: grid, fleet, pulse rate and animation timing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub ship_lengths: Vec<usize>,
    pub pulses_per_second: u32,
    pub timing: AnimationTiming,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            ship_lengths: SHIP_LENGTHS.to_vec(),
            pulses_per_second: PULSES_PER_SECOND,
            timing: AnimationTiming::default(),
        }
    }
}

impl GameConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Check dimensions, fleet and pulse rate. Whether the fleet fits a
    /// particular layout is decided when the sides are built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.ship_lengths.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        for (index, &length) in self.ship_lengths.iter().enumerate() {
            if length == 0 {
                return Err(ConfigError::ZeroLengthShip(index));
            }
            if length > self.width.max(self.height) as usize {
                return Err(ConfigError::ShipTooLong { index, length });
            }
        }
        if self.pulses_per_second == 0 {
            return Err(ConfigError::InvalidPulseRate);
        }
        Ok(())
    }

    /// Parse a JSON configuration; missing fields take their defaults.
    #[cfg(feature = "std")]
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    #[cfg(feature = "std")]
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading {}: {}", path.display(), e))?;
        Self::from_json_str(&text)
    }
}
