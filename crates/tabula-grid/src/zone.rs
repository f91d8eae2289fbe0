//! Zones: one map, one grid, plus map-level vision parameters.

use std::fmt;

use crate::grid::Grid;

/// Configuration errors raised when building a zone.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneError {
    /// Units-per-cell must be positive.
    InvalidUnitsPerCell(f64),
    /// The default vision distance must be positive.
    InvalidVisionDistance(f64),
}

impl fmt::Display for ZoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUnitsPerCell(v) => write!(f, "invalid units per cell {v}"),
            Self::InvalidVisionDistance(v) => write!(f, "invalid vision distance {v}"),
        }
    }
}

impl std::error::Error for ZoneError {}

/// A single game map: owns exactly one [`Grid`] and the unit scale that
/// turns light/vision ranges (map units) into pixels.
///
/// Zones are read-mostly shared state. Conversion, neighbor and distance
/// calls take `&self` and may run from many threads at once; resizing or
/// re-offsetting the grid takes `&mut self`, which the embedding
/// application serializes against all readers (typically behind an
/// `Arc<RwLock<Zone>>`, writers draining readers first). A path search
/// must hold its read access for the whole solve — the topology cannot
/// change under it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    grid: Grid,
    units_per_cell: f64,
    vision_distance: f64,
}

/// Default map units per cell (5 ft squares).
pub const DEFAULT_UNITS_PER_CELL: f64 = 5.0;

/// Default sight range in map units when a sight definition leaves the
/// distance unset.
pub const DEFAULT_VISION_DISTANCE: f64 = 1000.0;

impl Zone {
    /// Create a zone around a grid with default vision parameters.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            units_per_cell: DEFAULT_UNITS_PER_CELL,
            vision_distance: DEFAULT_VISION_DISTANCE,
        }
    }

    /// Override the unit scale. Fatal on non-positive values.
    pub fn with_units_per_cell(mut self, units_per_cell: f64) -> Result<Self, ZoneError> {
        if units_per_cell <= 0.0 {
            return Err(ZoneError::InvalidUnitsPerCell(units_per_cell));
        }
        self.units_per_cell = units_per_cell;
        Ok(self)
    }

    /// Override the default vision distance. Fatal on non-positive values.
    pub fn with_vision_distance(mut self, vision_distance: f64) -> Result<Self, ZoneError> {
        if vision_distance <= 0.0 {
            return Err(ZoneError::InvalidVisionDistance(vision_distance));
        }
        self.vision_distance = vision_distance;
        Ok(self)
    }

    /// The zone's grid.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access for map setup. See the type docs for the locking
    /// discipline this implies.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Map units represented by one cell.
    #[inline]
    pub fn units_per_cell(&self) -> f64 {
        self.units_per_cell
    }

    /// Default vision distance in map units.
    #[inline]
    pub fn vision_distance(&self) -> f64 {
        self.vision_distance
    }

    /// The default vision distance expressed in pixels on this zone's grid.
    pub fn token_vision_px(&self) -> f64 {
        self.vision_distance * f64::from(self.grid.size()) / self.units_per_cell
    }

    /// Convert a range in map units to pixels on this zone's grid.
    pub fn units_to_px(&self, units: f64) -> f64 {
        units * f64::from(self.grid.size()) / self.units_per_cell
    }
}
