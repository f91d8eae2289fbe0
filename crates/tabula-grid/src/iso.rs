//! Isometric topology: a square grid drawn at 45 degrees.
//!
//! Cells are diamonds twice as wide as they are tall; the cell size is the
//! diamond height so isometric cell coordinates line up with square-grid
//! coordinates for the same map. The converted point of a cell is the top
//! vertex of its diamond.

use tabula_core::{CellPoint, ZonePoint};

use crate::grid::Grid;

#[inline]
fn width_half(g: &Grid) -> f64 {
    f64::from(g.size())
}

#[inline]
fn height_half(g: &Grid) -> f64 {
    f64::from(g.size()) / 2.0
}

pub(crate) fn cell_to_world(g: &Grid, c: CellPoint) -> ZonePoint {
    let map_x = f64::from(c.x - c.y) * width_half(g) + f64::from(g.offset_x());
    let map_y = f64::from(c.x + c.y) * height_half(g) + f64::from(g.offset_y());
    // Round half-up so odd sizes stay invertible on negative diagonals.
    ZonePoint::new(
        (map_x + 0.5).floor() as i32,
        (map_y + 0.5).floor() as i32,
    )
}

pub(crate) fn world_to_cell(g: &Grid, p: ZonePoint) -> CellPoint {
    let dx = f64::from(p.x - g.offset_x()) / width_half(g);
    let dy = f64::from(p.y - g.offset_y()) / height_half(g);
    let iso_x = (dx + dy) / 2.0;
    let iso_y = (dy - dx) / 2.0;
    CellPoint::new(iso_x.floor() as i32, iso_y.floor() as i32)
}

pub(crate) fn nearest_vertex(g: &Grid, p: ZonePoint) -> ZonePoint {
    // Nudge half a cell down so the diamond's top vertex wins the snap.
    let nudged = ZonePoint::new(p.x, p.y + height_half(g) as i32);
    cell_to_world(g, world_to_cell(g, nudged))
}
