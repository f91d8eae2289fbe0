//! Square topology: direct scale between cell and world space.
//!
//! The isometric topology borrows this module's adjacency and facing
//! tables — an isometric diamond is a square cell drawn at 45 degrees.

use tabula_core::{CellPoint, Metric, ZonePoint};

use crate::grid::Grid;

pub(crate) fn cell_to_world(g: &Grid, c: CellPoint) -> ZonePoint {
    ZonePoint::new(
        c.x * g.size() + g.offset_x(),
        c.y * g.size() + g.offset_y(),
    )
}

pub(crate) fn world_to_cell(g: &Grid, p: ZonePoint) -> CellPoint {
    // Floor division so negative world coordinates land in the right cell.
    CellPoint::new(
        (p.x - g.offset_x()).div_euclid(g.size()),
        (p.y - g.offset_y()).div_euclid(g.size()),
    )
}

pub(crate) fn nearest_vertex(g: &Grid, p: ZonePoint) -> ZonePoint {
    let w = g.cell_width();
    let h = g.cell_height();
    let gx = (f64::from(p.x - g.offset_x()) / w).round() as i32;
    let gy = (f64::from(p.y - g.offset_y()) / h).round() as i32;
    ZonePoint::new(
        (f64::from(gx) * w) as i32 + g.offset_x(),
        (f64::from(gy) * h) as i32 + g.offset_y(),
    )
}

pub(crate) fn neighbors(c: CellPoint, metric: Metric, buf: &mut Vec<CellPoint>) {
    const CARDINAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
    const DIAGONAL: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];
    for (dx, dy) in CARDINAL {
        buf.push(c.shift(dx, dy));
    }
    if metric.allows_diagonals() {
        for (dx, dy) in DIAGONAL {
            buf.push(c.shift(dx, dy));
        }
    }
}

pub(crate) fn distance(a: CellPoint, b: CellPoint, metric: Metric) -> f64 {
    let dx = (b.x - a.x).abs();
    let dy = (b.y - a.y).abs();
    let cells = match metric {
        Metric::NoDiagonals | Metric::Manhattan => dx + dy,
        Metric::OneOneOne => dx.max(dy),
        Metric::OneTwoOne => dx.max(dy) + dx.min(dy) / 2,
    };
    f64::from(cells)
}

const ALL_ANGLES: [i32; 8] = [-135, -90, -45, 0, 45, 90, 135, 180];
const VERTEX_ANGLES: [i32; 4] = [-135, -45, 45, 135];
const EDGE_ANGLES: [i32; 4] = [-90, 0, 90, 180];
const NO_ROTATION: [i32; 1] = [90];

pub(crate) fn facing_angles(face_edges: bool, face_vertices: bool) -> &'static [i32] {
    match (face_edges, face_vertices) {
        (true, true) => &ALL_ANGLES,
        (false, true) => &VERTEX_ANGLES,
        (true, false) => &EDGE_ANGLES,
        (false, false) => &NO_ROTATION,
    }
}
