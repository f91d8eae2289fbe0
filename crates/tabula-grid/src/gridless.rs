//! Gridless topology: world space carved into size-sized reference cells.
//!
//! A gridless map still needs cell conversions so footprints and area
//! shapes have something to anchor to, but it exposes no adjacency — the
//! capability flags report no pathing and no snapping, and callers fall
//! back to continuous movement.

use tabula_core::{CellPoint, ZonePoint};

use crate::grid::Grid;

pub(crate) fn cell_to_world(g: &Grid, c: CellPoint) -> ZonePoint {
    ZonePoint::new(
        c.x * g.size() + g.offset_x(),
        c.y * g.size() + g.offset_y(),
    )
}

pub(crate) fn world_to_cell(g: &Grid, p: ZonePoint) -> CellPoint {
    CellPoint::new(
        (p.x - g.offset_x()).div_euclid(g.size()),
        (p.y - g.offset_y()).div_euclid(g.size()),
    )
}
