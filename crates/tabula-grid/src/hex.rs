//! Hex topologies, vertical and horizontal.
//!
//! All math happens in generic (u, v) axes where v runs along the line of
//! edge-to-edge hexes: a vertical grid (columns of hexes, points at the
//! sides) maps u to x, a horizontal grid (rows of hexes, points at the
//! top) swaps the axes. Converted points are cell *centers*; odd u-columns
//! sit half a cell further along v.

use tabula_core::{CellPoint, ZonePoint};

use crate::grid::Grid;

/// Java-style rounding: floor(x + 0.5).
#[inline]
fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

#[inline]
fn is_odd(v: i32) -> bool {
    v.rem_euclid(2) == 1
}

// ---------------------------------------------------------------------------
// (u, v) core
// ---------------------------------------------------------------------------

fn cell_to_uv(g: &Grid, cp_u: i32, cp_v: i32, off_u: i32, off_v: i32) -> (i32, i32) {
    let d = g.hex_dims();
    let u = round_half_up(f64::from(cp_u) * (d.edge_projection + d.edge_length) + d.edge_length)
        + off_u;
    let stagger = if is_odd(cp_u) { 2.0 } else { 1.0 };
    let v = (f64::from(cp_v) * 2.0 * d.minor_radius + stagger * d.minor_radius) as i32 + off_v;
    (u, v)
}

fn uv_to_cell(g: &Grid, zp_u: i32, zp_v: i32, off_u: i32, off_v: i32) -> (i32, i32) {
    let d = g.hex_dims();
    let col_width = d.edge_projection + d.edge_length;
    let row_height = 2.0 * d.minor_radius;

    let u = f64::from(zp_u - off_u);
    let v = f64::from(zp_v - off_v);

    let x_sect = if u < 0.0 {
        (u / col_width) as i32 - 1
    } else {
        (u / col_width) as i32
    };
    let odd_col = is_odd(x_sect);
    let y_sect = if v < 0.0 {
        if odd_col {
            ((v - d.minor_radius) / row_height) as i32 - 1
        } else {
            (v / row_height) as i32 - 1
        }
    } else if odd_col {
        ((v - d.minor_radius) / row_height) as i32
    } else {
        (v / row_height) as i32
    };

    // Position within the rectangular section; the sloped cell edge decides
    // whether the point actually belongs to the previous column.
    let x_pxl = ((u - f64::from(x_sect) * col_width) as i32).abs();
    let y_pxl = ((v - f64::from(y_sect) * row_height) as i32).abs();
    let x_pxl = f64::from(x_pxl);
    let y_pxl = f64::from(y_pxl);

    let mut grid_x = x_sect;
    let mut grid_y = y_sect;
    let slope = d.edge_projection / d.minor_radius;

    if !odd_col {
        if y_pxl <= d.minor_radius {
            if x_pxl < d.edge_projection - y_pxl * slope {
                grid_x = x_sect - 1;
                grid_y = y_sect - 1;
            }
        } else if x_pxl < (y_pxl - d.minor_radius) * slope {
            grid_x = x_sect - 1;
        }
    } else if y_pxl >= d.minor_radius {
        if x_pxl < d.edge_projection - (y_pxl - d.minor_radius) * slope {
            grid_x = x_sect - 1;
        }
    } else if x_pxl < y_pxl * slope {
        grid_x = x_sect - 1;
    } else {
        grid_y = y_sect - 1;
    }

    (grid_x, grid_y)
}

fn nearest_vertex_uv(g: &Grid, p_u: i32, p_v: i32, off_u: i32, off_v: i32) -> (i32, i32) {
    let d = g.hex_dims();
    let height_half = d.u_radius() / 2.0;
    let u = f64::from(p_u - off_u);
    let v = f64::from(p_v - off_v);

    let iso_y = (v / d.minor_radius + u / height_half) / 2.0;
    let iso_x = (u / height_half - v / d.minor_radius) / 2.0;
    let new_x = iso_x.floor();
    let new_y = iso_y.floor();

    let map_v = (new_y - new_x) * d.minor_radius;
    let map_u = (new_x + new_y) * height_half + height_half;
    ((map_u as i32) + off_u, (map_v as i32) + off_v)
}

// ---------------------------------------------------------------------------
// Vertical orientation (u = x, v = y)
// ---------------------------------------------------------------------------

pub(crate) fn cell_to_world_v(g: &Grid, c: CellPoint) -> ZonePoint {
    let (u, v) = cell_to_uv(g, c.x, c.y, g.offset_x(), g.offset_y());
    ZonePoint::new(u, v)
}

pub(crate) fn world_to_cell_v(g: &Grid, p: ZonePoint) -> CellPoint {
    let (u, v) = uv_to_cell(g, p.x, p.y, g.offset_x(), g.offset_y());
    CellPoint::new(u, v)
}

pub(crate) fn nearest_vertex_v(g: &Grid, p: ZonePoint) -> ZonePoint {
    let (u, v) = nearest_vertex_uv(g, p.x, p.y, g.offset_x(), g.offset_y());
    ZonePoint::new(u, v)
}

pub(crate) fn neighbors_v(c: CellPoint, buf: &mut Vec<CellPoint>) {
    // Odd columns are staggered half a cell down, which decides whether
    // the side neighbors share the row above or below.
    let offsets: [(i32, i32); 6] = if is_odd(c.x) {
        [(0, -1), (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0)]
    } else {
        [(0, -1), (1, -1), (1, 0), (0, 1), (-1, 0), (-1, -1)]
    };
    for (dx, dy) in offsets {
        buf.push(c.shift(dx, dy));
    }
}

pub(crate) fn distance_v(a: CellPoint, b: CellPoint) -> f64 {
    axial_distance(a.x, a.y, b.x, b.y)
}

// ---------------------------------------------------------------------------
// Horizontal orientation (u = y, v = x)
// ---------------------------------------------------------------------------

pub(crate) fn cell_to_world_h(g: &Grid, c: CellPoint) -> ZonePoint {
    let (u, v) = cell_to_uv(g, c.y, c.x, g.offset_y(), g.offset_x());
    ZonePoint::new(v, u)
}

pub(crate) fn world_to_cell_h(g: &Grid, p: ZonePoint) -> CellPoint {
    let (u, v) = uv_to_cell(g, p.y, p.x, g.offset_y(), g.offset_x());
    CellPoint::new(v, u)
}

pub(crate) fn nearest_vertex_h(g: &Grid, p: ZonePoint) -> ZonePoint {
    let (u, v) = nearest_vertex_uv(g, p.y, p.x, g.offset_y(), g.offset_x());
    ZonePoint::new(v, u)
}

pub(crate) fn neighbors_h(c: CellPoint, buf: &mut Vec<CellPoint>) {
    let offsets: [(i32, i32); 6] = if is_odd(c.y) {
        [(-1, 0), (0, 1), (1, 1), (1, 0), (1, -1), (0, -1)]
    } else {
        [(-1, 0), (-1, 1), (0, 1), (1, 0), (0, -1), (-1, -1)]
    };
    for (dx, dy) in offsets {
        buf.push(c.shift(dx, dy));
    }
}

pub(crate) fn distance_h(a: CellPoint, b: CellPoint) -> f64 {
    axial_distance(a.y, a.x, b.y, b.x)
}

/// Hex distance after converting the staggered axis to 60-degree
/// coordinates.
fn axial_distance(u1: i32, v1: i32, u2: i32, v2: i32) -> f64 {
    let w1 = v1 - (f64::from(u1) / 2.0).floor() as i32;
    let w2 = v2 - (f64::from(u2) / 2.0).floor() as i32;
    let du = u2 - u1;
    let dw = w2 - w1;
    let cells = if du.signum() == dw.signum() {
        (du + dw).abs()
    } else {
        du.abs().max(dw.abs())
    };
    f64::from(cells)
}

// ---------------------------------------------------------------------------
// Facing
// ---------------------------------------------------------------------------

const ALL_ANGLES: [i32; 12] = [-150, -120, -90, -60, -30, 0, 30, 60, 90, 120, 150, 180];
const POINT_ANGLES: [i32; 6] = [-120, -60, 0, 60, 120, 180];
const FACE_ANGLES: [i32; 6] = [-150, -90, -30, 30, 90, 150];
const NO_ROTATION: [i32; 1] = [90];

pub(crate) fn facing_angles(
    horizontal: bool,
    face_edges: bool,
    face_vertices: bool,
) -> &'static [i32] {
    // The two orientations swap which angle set hits edges vs. vertices.
    match (face_edges, face_vertices) {
        (true, true) => &ALL_ANGLES,
        (false, true) => {
            if horizontal {
                &FACE_ANGLES
            } else {
                &POINT_ANGLES
            }
        }
        (true, false) => {
            if horizontal {
                &POINT_ANGLES
            } else {
                &FACE_ANGLES
            }
        }
        (false, false) => &NO_ROTATION,
    }
}
