//! Per-cell terrain modifiers consumed by the walker.

use std::collections::HashMap;

use tabula_core::CellPoint;

/// How a modifier changes the cost of entering a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainOp {
    /// Multiply the step cost. Values sum before applying; keep them ≥ 1
    /// or A* optimality is off (the heuristic assumes no discounts).
    Multiply,
    /// Add a flat cost in map units.
    Add,
    /// The cell cannot be entered at all.
    Block,
    /// Entering the cell is free of any movement cost.
    Free,
}

/// One terrain modifier on one cell.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainModifier {
    pub op: TerrainOp,
    pub value: f64,
}

impl TerrainModifier {
    /// Shorthand for a multiplier.
    pub const fn multiply(value: f64) -> Self {
        Self {
            op: TerrainOp::Multiply,
            value,
        }
    }

    /// Shorthand for a flat adder (map units).
    pub const fn add(value: f64) -> Self {
        Self {
            op: TerrainOp::Add,
            value,
        }
    }

    /// Shorthand for an impassable cell.
    pub const fn block() -> Self {
        Self {
            op: TerrainOp::Block,
            value: 0.0,
        }
    }

    /// Shorthand for a free cell.
    pub const fn free() -> Self {
        Self {
            op: TerrainOp::Free,
            value: 0.0,
        }
    }
}

/// Source of terrain modifiers, queried once per neighbor cell.
///
/// Implementations append into the caller's buffer so repeated queries
/// allocate nothing.
pub trait TerrainMap {
    /// Append the modifiers affecting `cell` into `buf`. The caller clears
    /// the buffer first.
    fn modifiers(&self, cell: CellPoint, buf: &mut Vec<TerrainModifier>);

    /// The cell rectangle the modifiers live in, as `(min, max)` inclusive,
    /// or `None` when no cell carries a modifier. The walker widens its
    /// search window to cover it so paths can route around blocked spans.
    fn bounds(&self) -> Option<(CellPoint, CellPoint)> {
        None
    }
}

/// A terrain map with no modifiers anywhere.
impl TerrainMap for () {
    fn modifiers(&self, _cell: CellPoint, _buf: &mut Vec<TerrainModifier>) {}
}

/// Cell-keyed terrain storage, the common case: tokens with terrain
/// modifiers stamp their occupied cells into one of these per zone.
#[derive(Clone, Debug, Default)]
pub struct TerrainGrid {
    cells: HashMap<CellPoint, Vec<TerrainModifier>>,
}

impl TerrainGrid {
    /// An empty terrain grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a modifier to one cell.
    pub fn add(&mut self, cell: CellPoint, modifier: TerrainModifier) {
        self.cells.entry(cell).or_default().push(modifier);
    }

    /// Add the same modifier to many cells.
    pub fn add_all(
        &mut self,
        cells: impl IntoIterator<Item = CellPoint>,
        modifier: TerrainModifier,
    ) {
        for cell in cells {
            self.add(cell, modifier);
        }
    }

    /// Remove every modifier from a cell.
    pub fn clear_cell(&mut self, cell: CellPoint) {
        self.cells.remove(&cell);
    }

    /// Whether any cell carries a modifier.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl TerrainMap for TerrainGrid {
    fn modifiers(&self, cell: CellPoint, buf: &mut Vec<TerrainModifier>) {
        if let Some(mods) = self.cells.get(&cell) {
            buf.extend_from_slice(mods);
        }
    }

    fn bounds(&self) -> Option<(CellPoint, CellPoint)> {
        let mut iter = self.cells.keys();
        let first = *iter.next()?;
        let mut min = first;
        let mut max = first;
        for &cell in iter {
            min.x = min.x.min(cell.x);
            min.y = min.y.min(cell.y);
            max.x = max.x.max(cell.x);
            max.y = max.y.max(cell.y);
        }
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_lookup_appends() {
        let mut terrain = TerrainGrid::new();
        terrain.add(CellPoint::new(1, 1), TerrainModifier::multiply(2.0));
        terrain.add(CellPoint::new(1, 1), TerrainModifier::add(5.0));

        let mut buf = Vec::new();
        terrain.modifiers(CellPoint::new(1, 1), &mut buf);
        assert_eq!(buf.len(), 2);

        buf.clear();
        terrain.modifiers(CellPoint::new(0, 0), &mut buf);
        assert!(buf.is_empty());
    }

    #[test]
    fn bounds_cover_all_cells() {
        let mut terrain = TerrainGrid::new();
        assert_eq!(terrain.bounds(), None);
        terrain.add(CellPoint::new(-2, 5), TerrainModifier::block());
        terrain.add(CellPoint::new(7, -1), TerrainModifier::block());
        assert_eq!(
            terrain.bounds(),
            Some((CellPoint::new(-2, -1), CellPoint::new(7, 5)))
        );
    }
}
