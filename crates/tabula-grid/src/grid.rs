//! The [`Grid`] topology type and its capability surface.

use std::fmt;

use tabula_core::{CellPoint, Metric, Rect, ZonePoint};

use crate::{gridless, hex, iso, square};

/// The minimum cell size in pixels on any dimension.
///
/// Movement validation subdivides a cell into 3x3 twice, so at least nine
/// pixels are required on each axis.
pub const MIN_GRID_SIZE: i32 = 9;

/// The maximum cell size in pixels.
pub const MAX_GRID_SIZE: i32 = 350;

// ---------------------------------------------------------------------------
// GridKind
// ---------------------------------------------------------------------------

/// The closed set of grid topologies.
///
/// Maps declare their topology by name; [`GridKind::from_name`] is the only
/// way a name enters the system and unknown names are a fatal configuration
/// error, never a fallback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridKind {
    Square,
    HexVertical,
    HexHorizontal,
    Isometric,
    IsometricHex,
    Gridless,
}

impl GridKind {
    /// All kinds, in configuration-name order.
    pub const ALL: [Self; 6] = [
        Self::Square,
        Self::HexVertical,
        Self::HexHorizontal,
        Self::Isometric,
        Self::IsometricHex,
        Self::Gridless,
    ];

    /// The configuration name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Square => "Square",
            Self::HexVertical => "Vertical Hex",
            Self::HexHorizontal => "Horizontal Hex",
            Self::Isometric => "Isometric",
            Self::IsometricHex => "Isometric Hex",
            Self::Gridless => "None",
        }
    }

    /// Resolve a configuration name. Unknown names fail.
    pub fn from_name(name: &str) -> Result<Self, GridError> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == name)
            .ok_or_else(|| GridError::UnknownGridType(name.to_string()))
    }

    /// Whether cells are hexes.
    pub const fn is_hex(self) -> bool {
        matches!(self, Self::HexVertical | Self::HexHorizontal | Self::IsometricHex)
    }

    /// Whether the map is drawn with an isometric projection.
    pub const fn is_isometric(self) -> bool {
        matches!(self, Self::Isometric | Self::IsometricHex)
    }

    /// Whether distance honors the configurable movement metric.
    /// Only the square family does; hexes have one natural metric.
    pub const fn uses_metric(self) -> bool {
        matches!(self, Self::Square | Self::Isometric)
    }
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// GridCapabilities
// ---------------------------------------------------------------------------

/// What a topology supports. Callers must branch on these rather than
/// assume behavior — gridless maps report no pathing, and UI path drawing
/// is suppressed accordingly.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridCapabilities {
    pub pathing: bool,
    pub snap_to_grid: bool,
    pub path_line: bool,
    pub second_dimension_adjustment: bool,
    pub coordinates: bool,
}

impl GridCapabilities {
    /// Whether cell-to-cell path search makes sense on this topology.
    #[inline]
    pub const fn is_pathing_supported(self) -> bool {
        self.pathing
    }

    /// Whether token positions snap to cell boundaries.
    #[inline]
    pub const fn is_snap_to_grid_supported(self) -> bool {
        self.snap_to_grid
    }

    /// Whether a path line between waypoints can be drawn.
    #[inline]
    pub const fn is_path_line_supported(self) -> bool {
        self.path_line
    }

    /// Whether the cell shape has a tunable second dimension (hex aspect).
    #[inline]
    pub const fn is_second_dimension_adjustment_supported(self) -> bool {
        self.second_dimension_adjustment
    }

    /// Whether cell coordinate overlays are meaningful.
    #[inline]
    pub const fn is_coordinates_supported(self) -> bool {
        self.coordinates
    }
}

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Configuration errors raised when building or tuning a grid.
///
/// These are fatal: a zone with an unknown topology name or a degenerate
/// cell size cannot be worked around, so construction fails immediately
/// and is never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The topology name is not in the closed set.
    UnknownGridType(String),
    /// The requested cell size is not positive.
    InvalidCellSize(i32),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGridType(name) => write!(f, "unknown grid type {name:?}"),
            Self::InvalidCellSize(size) => write!(f, "invalid cell size {size}"),
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Hex cell dimensions derived from the grid size.
///
/// `minor_radius` is center-to-face, `edge_length` a full side,
/// `edge_projection` the horizontal reach of a slanted side. The v-axis
/// runs along edge-to-edge hexes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct HexDims {
    pub ratio: f64,
    pub minor_radius: f64,
    pub edge_length: f64,
    pub edge_projection: f64,
}

/// A regular hexagon: ratio of minor radius to edge length.
const REGULAR_HEX_RATIO: f64 = 0.866_025_403_784_438_6; // sqrt(3)/2

impl HexDims {
    fn for_size(size: i32, ratio: f64) -> Self {
        let minor_radius = f64::from(size) / 2.0;
        let edge_length = minor_radius / ratio;
        let edge_projection = edge_length / 2.0;
        Self {
            ratio,
            minor_radius,
            edge_length,
            edge_projection,
        }
    }

    /// Center-to-vertex distance along the u axis.
    pub fn u_radius(&self) -> f64 {
        self.edge_length / 2.0 + self.edge_projection
    }
}

/// A grid topology: cell size, pixel offset and the conversions, adjacency
/// and distance semantics of one [`GridKind`].
///
/// One grid per zone. Conversion methods take `&self` and are safe to call
/// from many readers at once; resizing or re-offsetting the grid is an
/// administrative action that the owning zone must serialize against all
/// readers (an in-flight path search assumes a stable topology for its
/// whole run).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    kind: GridKind,
    size: i32,
    offset_x: i32,
    offset_y: i32,
    hex: HexDims,
}

impl Grid {
    /// Create a grid.
    ///
    /// Non-positive sizes are a configuration error; positive sizes are
    /// clamped into `MIN_GRID_SIZE..=MAX_GRID_SIZE`.
    pub fn new(kind: GridKind, size: i32, offset: (i32, i32)) -> Result<Self, GridError> {
        if size <= 0 {
            return Err(GridError::InvalidCellSize(size));
        }
        let size = size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        Ok(Self {
            kind,
            size,
            offset_x: offset.0,
            offset_y: offset.1,
            hex: HexDims::for_size(size, REGULAR_HEX_RATIO),
        })
    }

    /// Create a grid from a configuration name (see [`GridKind::from_name`]).
    pub fn from_name(name: &str, size: i32, offset: (i32, i32)) -> Result<Self, GridError> {
        Self::new(GridKind::from_name(name)?, size, offset)
    }

    /// The topology kind.
    #[inline]
    pub fn kind(&self) -> GridKind {
        self.kind
    }

    /// Cell size in pixels: edge length for squares, edge-to-edge diameter
    /// for hexes, diamond height for isometric cells.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// The grid's pixel offset.
    #[inline]
    pub fn offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    /// Resize the grid. Same validation as [`Grid::new`].
    pub fn set_size(&mut self, size: i32) -> Result<(), GridError> {
        if size <= 0 {
            return Err(GridError::InvalidCellSize(size));
        }
        self.size = size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        self.hex = HexDims::for_size(self.size, self.hex.ratio);
        Ok(())
    }

    /// Move the grid's pixel offset.
    pub fn set_offset(&mut self, x: i32, y: i32) {
        self.offset_x = x;
        self.offset_y = y;
    }

    /// Whether cells are hexes.
    #[inline]
    pub fn is_hex(&self) -> bool {
        self.kind.is_hex()
    }

    /// Whether the map uses an isometric projection.
    #[inline]
    pub fn is_isometric(&self) -> bool {
        self.kind.is_isometric()
    }

    /// What this topology supports.
    pub fn capabilities(&self) -> GridCapabilities {
        match self.kind {
            GridKind::Square | GridKind::Isometric => GridCapabilities {
                pathing: true,
                snap_to_grid: true,
                path_line: true,
                second_dimension_adjustment: false,
                coordinates: true,
            },
            GridKind::HexVertical | GridKind::HexHorizontal | GridKind::IsometricHex => {
                GridCapabilities {
                    pathing: true,
                    snap_to_grid: true,
                    path_line: true,
                    second_dimension_adjustment: true,
                    coordinates: false,
                }
            }
            GridKind::Gridless => GridCapabilities {
                pathing: false,
                snap_to_grid: false,
                path_line: false,
                second_dimension_adjustment: false,
                coordinates: false,
            },
        }
    }

    // -----------------------------------------------------------------------
    // Conversions
    // -----------------------------------------------------------------------

    /// World-space position of a cell: top-left corner for square-family
    /// cells, center for hex cells, top vertex for isometric diamonds.
    /// Use [`cell_offset`](Self::cell_offset) to reconcile the anchors.
    pub fn cell_to_world(&self, c: CellPoint) -> ZonePoint {
        match self.kind {
            GridKind::Square => square::cell_to_world(self, c),
            GridKind::HexVertical | GridKind::IsometricHex => hex::cell_to_world_v(self, c),
            GridKind::HexHorizontal => hex::cell_to_world_h(self, c),
            GridKind::Isometric => iso::cell_to_world(self, c),
            GridKind::Gridless => gridless::cell_to_world(self, c),
        }
    }

    /// The cell containing a world-space point.
    ///
    /// Inverse of [`cell_to_world`](Self::cell_to_world) up to cell-boundary
    /// rounding: converting a cell to world space and back always yields the
    /// original cell.
    pub fn world_to_cell(&self, p: ZonePoint) -> CellPoint {
        match self.kind {
            GridKind::Square => square::world_to_cell(self, p),
            GridKind::HexVertical | GridKind::IsometricHex => hex::world_to_cell_v(self, p),
            GridKind::HexHorizontal => hex::world_to_cell_h(self, p),
            GridKind::Isometric => iso::world_to_cell(self, p),
            GridKind::Gridless => gridless::world_to_cell(self, p),
        }
    }

    /// Pixel center of a cell.
    pub fn cell_center(&self, c: CellPoint) -> (f64, f64) {
        let zp = self.cell_to_world(c);
        let (dx, dy) = self.center_offset();
        (f64::from(zp.x) + dx, f64::from(zp.y) + dy)
    }

    /// Difference between a cell's center and its converted world point.
    pub fn center_offset(&self) -> (f64, f64) {
        match self.kind {
            GridKind::Square | GridKind::Gridless => {
                (self.cell_width() / 2.0, self.cell_height() / 2.0)
            }
            GridKind::HexVertical | GridKind::HexHorizontal | GridKind::IsometricHex => (0.0, 0.0),
            GridKind::Isometric => (0.0, self.cell_height() / 2.0),
        }
    }

    /// Offset from a cell's converted world point to the top-left of its
    /// bounding rectangle. Zero for square-family cells.
    pub fn cell_offset(&self) -> (i32, i32) {
        match self.kind {
            GridKind::Square | GridKind::Gridless => (0, 0),
            GridKind::HexVertical | GridKind::IsometricHex => {
                (-(self.hex.u_radius() as i32), -(self.hex.minor_radius as i32))
            }
            GridKind::HexHorizontal => {
                (-(self.hex.minor_radius as i32), -(self.hex.u_radius() as i32))
            }
            GridKind::Isometric => (-self.size, 0),
        }
    }

    /// Width of a cell's bounding box in pixels.
    pub fn cell_width(&self) -> f64 {
        match self.kind {
            GridKind::Square | GridKind::Gridless => f64::from(self.size),
            GridKind::HexVertical | GridKind::IsometricHex => self.hex.u_radius() * 2.0,
            GridKind::HexHorizontal => self.hex.minor_radius * 2.0,
            GridKind::Isometric => f64::from(self.size) * 2.0,
        }
    }

    /// Height of a cell's bounding box in pixels.
    pub fn cell_height(&self) -> f64 {
        match self.kind {
            GridKind::Square | GridKind::Gridless => f64::from(self.size),
            GridKind::HexVertical | GridKind::IsometricHex => self.hex.minor_radius * 2.0,
            GridKind::HexHorizontal => self.hex.u_radius() * 2.0,
            GridKind::Isometric => f64::from(self.size),
        }
    }

    /// Pixel rectangle bounding a cell, honoring the grid offset.
    pub fn bounds(&self, c: CellPoint) -> Rect {
        match self.kind {
            GridKind::Square | GridKind::Gridless => {
                let zp = self.cell_to_world(c);
                Rect::new(zp.x, zp.y, self.size, self.size)
            }
            GridKind::HexVertical | GridKind::HexHorizontal | GridKind::IsometricHex => {
                let zp = self.cell_to_world(c);
                let w = self.cell_width() as i32;
                let h = self.cell_height() as i32;
                Rect::new(zp.x - w / 2, zp.y - h / 2, w, h)
            }
            GridKind::Isometric => {
                let zp = self.cell_to_world(c);
                Rect::new(zp.x - self.size, zp.y, self.size * 2, self.size)
            }
        }
    }

    /// Snap a world point to the nearest grid vertex.
    ///
    /// Topologies without snap support ([`GridCapabilities::snap_to_grid`])
    /// return the point unchanged.
    pub fn nearest_vertex(&self, p: ZonePoint) -> ZonePoint {
        match self.kind {
            GridKind::Square => square::nearest_vertex(self, p),
            GridKind::HexVertical | GridKind::IsometricHex => hex::nearest_vertex_v(self, p),
            GridKind::HexHorizontal => hex::nearest_vertex_h(self, p),
            GridKind::Isometric => iso::nearest_vertex(self, p),
            GridKind::Gridless => p,
        }
    }

    // -----------------------------------------------------------------------
    // Adjacency and distance
    // -----------------------------------------------------------------------

    /// Append the topology-correct neighbors of `c` into `buf`.
    ///
    /// Square family: 4 or 8 depending on the metric's diagonal policy.
    /// Hex: always 6, parity-aware. Gridless: none — callers must fall back
    /// to continuous movement (see [`GridCapabilities::pathing`]).
    pub fn neighbors(&self, c: CellPoint, metric: Metric, buf: &mut Vec<CellPoint>) {
        match self.kind {
            GridKind::Square => square::neighbors(c, metric, buf),
            GridKind::HexVertical | GridKind::IsometricHex => hex::neighbors_v(c, buf),
            GridKind::HexHorizontal => hex::neighbors_h(c, buf),
            GridKind::Isometric => square::neighbors(c, metric, buf),
            GridKind::Gridless => {}
        }
    }

    /// Cell-to-cell distance, in cells, ignoring terrain.
    ///
    /// Square: the metric's formula. Hex: the 60-degree-axis hex distance.
    /// Isometric and gridless: Euclidean.
    pub fn distance(&self, a: CellPoint, b: CellPoint, metric: Metric) -> f64 {
        match self.kind {
            GridKind::Square => square::distance(a, b, metric),
            GridKind::HexVertical | GridKind::IsometricHex => hex::distance_v(a, b),
            GridKind::HexHorizontal => hex::distance_h(a, b),
            GridKind::Isometric | GridKind::Gridless => {
                let dx = f64::from(b.x - a.x);
                let dy = f64::from(b.y - a.y);
                (dx * dx + dy * dy).sqrt()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Facing
    // -----------------------------------------------------------------------

    /// The legal facing angles for tokens on this grid, in degrees.
    ///
    /// `face_edges` / `face_vertices` select which features a token may
    /// point at; when both are off rotation is disabled and tokens face 90°.
    pub fn facing_angles(&self, face_edges: bool, face_vertices: bool) -> &'static [i32] {
        match self.kind {
            GridKind::Square | GridKind::Isometric | GridKind::Gridless => {
                square::facing_angles(face_edges, face_vertices)
            }
            GridKind::HexVertical | GridKind::HexHorizontal | GridKind::IsometricHex => {
                hex::facing_angles(self.kind == GridKind::HexHorizontal, face_edges, face_vertices)
            }
        }
    }

    /// Snap a facing to the nearest legal angle.
    pub fn snap_facing(&self, facing: i32, face_edges: bool, face_vertices: bool) -> i32 {
        let angles = self.facing_angles(face_edges, face_vertices);
        // Compare on the circle: the candidate minimizing angular distance.
        let mut best = angles[0];
        let mut best_d = i32::MAX;
        for &a in angles {
            let mut d = (facing - a).rem_euclid(360);
            if d > 180 {
                d = 360 - d;
            }
            if d < best_d {
                best_d = d;
                best = a;
            }
        }
        best
    }

    // -----------------------------------------------------------------------
    // Hex second dimension
    // -----------------------------------------------------------------------

    /// The tunable second dimension of a hex cell (vertex-to-vertex
    /// diameter). Zero for non-hex grids.
    pub fn second_dimension(&self) -> f64 {
        if self.is_hex() {
            self.hex.u_radius() * 2.0
        } else {
            0.0
        }
    }

    /// Stretch or restore the hex aspect. Lengths below the minor diameter
    /// restore the regular hexagon. Ignored for non-hex grids.
    pub fn set_second_dimension(&mut self, length: f64) {
        if !self.is_hex() {
            return;
        }
        let mr = self.hex.minor_radius;
        if length < mr * 2.0 {
            self.hex = HexDims::for_size(self.size, REGULAR_HEX_RATIO);
        } else {
            // Solve for the edge length that puts the vertex-to-vertex
            // diameter at `length`, with the slant projection following
            // Pythagoras.
            let aspect = length / (2.0 * mr);
            let a = 0.75;
            let c = -(aspect * aspect + 1.0) * mr * mr;
            let b = mr * aspect;
            let edge_length = (-b + (b * b - 4.0 * a * c).sqrt()) / (2.0 * a);
            self.hex.edge_length = edge_length;
            self.hex.edge_projection = (edge_length * edge_length - mr * mr).sqrt();
            self.hex.ratio = mr / edge_length;
        }
    }

    #[inline]
    pub(crate) fn hex_dims(&self) -> &HexDims {
        &self.hex
    }

    #[inline]
    pub(crate) fn offset_x(&self) -> i32 {
        self.offset_x
    }

    #[inline]
    pub(crate) fn offset_y(&self) -> i32 {
        self.offset_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_covers_closed_set() {
        for kind in GridKind::ALL {
            assert_eq!(GridKind::from_name(kind.name()), Ok(kind));
        }
        assert_eq!(
            GridKind::from_name("Octagonal"),
            Err(GridError::UnknownGridType("Octagonal".into()))
        );
    }

    #[test]
    fn non_positive_size_is_fatal() {
        assert_eq!(
            Grid::new(GridKind::Square, 0, (0, 0)),
            Err(GridError::InvalidCellSize(0))
        );
        assert_eq!(
            Grid::new(GridKind::Square, -50, (0, 0)),
            Err(GridError::InvalidCellSize(-50))
        );
    }

    #[test]
    fn size_is_clamped_to_supported_range() {
        let g = Grid::new(GridKind::Square, 5, (0, 0)).unwrap();
        assert_eq!(g.size(), MIN_GRID_SIZE);
        let g = Grid::new(GridKind::Square, 1000, (0, 0)).unwrap();
        assert_eq!(g.size(), MAX_GRID_SIZE);
    }

    #[test]
    fn square_concrete_conversion() {
        // size 50, offset (0,0): cell (2,3) <-> world (100,150).
        let g = Grid::new(GridKind::Square, 50, (0, 0)).unwrap();
        assert_eq!(g.cell_to_world(CellPoint::new(2, 3)), ZonePoint::new(100, 150));
        assert_eq!(g.world_to_cell(ZonePoint::new(100, 150)), CellPoint::new(2, 3));
    }

    #[test]
    fn round_trip_all_topologies() {
        for kind in GridKind::ALL {
            for size in [9, 50, 51, 100] {
                for offset in [(0, 0), (7, -3)] {
                    let g = Grid::new(kind, size, offset).unwrap();
                    for x in -8..=8 {
                        for y in -8..=8 {
                            let c = CellPoint::new(x, y);
                            let back = g.world_to_cell(g.cell_to_world(c));
                            assert_eq!(back, c, "{kind} size {size} offset {offset:?} cell {c}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn square_distance_is_chebyshev_by_default() {
        let g = Grid::new(GridKind::Square, 50, (0, 0)).unwrap();
        let o = CellPoint::ZERO;
        for (x, y) in [(1, 0), (1, 1), (3, 2), (-4, 2), (0, -7), (5, 5)] {
            let (x, y): (i32, i32) = (x, y);
            let want = x.abs().max(y.abs());
            assert_eq!(
                g.distance(o, CellPoint::new(x, y), Metric::OneOneOne),
                f64::from(want)
            );
        }
    }

    #[test]
    fn square_distance_one_two_one() {
        let g = Grid::new(GridKind::Square, 50, (0, 0)).unwrap();
        let o = CellPoint::ZERO;
        // max + min/2 with integer halving.
        assert_eq!(g.distance(o, CellPoint::new(1, 1), Metric::OneTwoOne), 1.0);
        assert_eq!(g.distance(o, CellPoint::new(2, 2), Metric::OneTwoOne), 3.0);
        assert_eq!(g.distance(o, CellPoint::new(3, 3), Metric::OneTwoOne), 4.0);
        assert_eq!(g.distance(o, CellPoint::new(5, 2), Metric::OneTwoOne), 6.0);
    }

    #[test]
    fn square_distance_manhattan() {
        let g = Grid::new(GridKind::Square, 50, (0, 0)).unwrap();
        let o = CellPoint::ZERO;
        assert_eq!(g.distance(o, CellPoint::new(3, 4), Metric::Manhattan), 7.0);
        assert_eq!(g.distance(o, CellPoint::new(-3, 4), Metric::NoDiagonals), 7.0);
    }

    #[test]
    fn hex_distances_match_hand_computed_table() {
        let g = Grid::new(GridKind::HexVertical, 50, (0, 0)).unwrap();
        let o = CellPoint::ZERO;
        // (target, distance) with origin (0,0): adjacents, same-column runs
        // and mixed diagonals on the 60-degree axes.
        let table = [
            ((1, 0), 1.0),
            ((0, 1), 1.0),
            ((1, -1), 1.0),
            ((-1, 0), 1.0),
            ((0, -1), 1.0),
            ((-1, -1), 1.0),
            ((2, 0), 2.0),
            ((2, -1), 2.0),
            ((2, 1), 2.0),
            ((0, 3), 3.0),
            ((3, 0), 3.0),
            ((5, 0), 5.0),
            ((2, 2), 3.0),
            ((3, 3), 5.0),
            ((-3, 2), 4.0),
            ((-4, -4), 6.0),
            ((4, 2), 4.0),
            ((1, 5), 6.0),
            ((-2, 3), 4.0),
            ((6, -3), 6.0),
            ((0, -6), 6.0),
            ((-5, 1), 5.0),
        ];
        for ((x, y), want) in table {
            assert_eq!(
                g.distance(o, CellPoint::new(x, y), Metric::OneOneOne),
                want,
                "hex distance to ({x},{y})"
            );
        }
        // Off-origin pairs.
        assert_eq!(g.distance(CellPoint::new(1, 1), CellPoint::new(2, 2), Metric::OneOneOne), 1.0);
        assert_eq!(g.distance(CellPoint::new(2, 0), CellPoint::new(4, 1), Metric::OneOneOne), 2.0);
        assert_eq!(g.distance(CellPoint::new(-1, 2), CellPoint::new(1, 2), Metric::OneOneOne), 2.0);
        assert_eq!(g.distance(CellPoint::new(3, -2), CellPoint::new(3, 4), Metric::OneOneOne), 6.0);
    }

    #[test]
    fn horizontal_hex_distance_mirrors_vertical() {
        let v = Grid::new(GridKind::HexVertical, 50, (0, 0)).unwrap();
        let h = Grid::new(GridKind::HexHorizontal, 50, (0, 0)).unwrap();
        for (x, y) in [(1, 0), (2, 1), (-3, 2), (4, -4), (0, 5)] {
            assert_eq!(
                v.distance(CellPoint::ZERO, CellPoint::new(x, y), Metric::OneOneOne),
                h.distance(CellPoint::ZERO, CellPoint::new(y, x), Metric::OneOneOne),
            );
        }
    }

    #[test]
    fn isometric_distance_is_euclidean() {
        let g = Grid::new(GridKind::Isometric, 50, (0, 0)).unwrap();
        assert_eq!(
            g.distance(CellPoint::ZERO, CellPoint::new(3, 4), Metric::OneOneOne),
            5.0
        );
    }

    #[test]
    fn neighbor_counts_per_topology() {
        let mut buf = Vec::new();
        let square = Grid::new(GridKind::Square, 50, (0, 0)).unwrap();
        square.neighbors(CellPoint::ZERO, Metric::OneOneOne, &mut buf);
        assert_eq!(buf.len(), 8);
        buf.clear();
        square.neighbors(CellPoint::ZERO, Metric::NoDiagonals, &mut buf);
        assert_eq!(buf.len(), 4);

        let hexv = Grid::new(GridKind::HexVertical, 50, (0, 0)).unwrap();
        buf.clear();
        hexv.neighbors(CellPoint::ZERO, Metric::OneOneOne, &mut buf);
        assert_eq!(buf.len(), 6);

        let gridless = Grid::new(GridKind::Gridless, 50, (0, 0)).unwrap();
        buf.clear();
        gridless.neighbors(CellPoint::ZERO, Metric::OneOneOne, &mut buf);
        assert!(buf.is_empty());
        assert!(!gridless.capabilities().is_pathing_supported());
    }

    #[test]
    fn hex_neighbors_are_exactly_the_distance_one_cells() {
        let g = Grid::new(GridKind::HexVertical, 50, (0, 0)).unwrap();
        let mut buf = Vec::new();
        for x in -4..=4 {
            for y in -4..=4 {
                let c = CellPoint::new(x, y);
                buf.clear();
                g.neighbors(c, Metric::OneOneOne, &mut buf);
                let mut from_rule: Vec<_> = buf.clone();
                from_rule.sort();
                let mut from_distance: Vec<_> = (-2..=2)
                    .flat_map(|dx| (-2..=2).map(move |dy| c.shift(dx, dy)))
                    .filter(|&n| g.distance(c, n, Metric::OneOneOne) == 1.0)
                    .collect();
                from_distance.sort();
                assert_eq!(from_rule, from_distance, "at {c}");
            }
        }
    }

    #[test]
    fn square_bounds_and_center() {
        let g = Grid::new(GridKind::Square, 50, (10, 20)).unwrap();
        let b = g.bounds(CellPoint::new(2, 3));
        assert_eq!(b, Rect::new(110, 170, 50, 50));
        assert_eq!(g.cell_center(CellPoint::new(0, 0)), (35.0, 45.0));
    }

    #[test]
    fn hex_bounds_center_on_cell() {
        let g = Grid::new(GridKind::HexVertical, 50, (0, 0)).unwrap();
        let c = CellPoint::new(2, 1);
        let zp = g.cell_to_world(c);
        let b = g.bounds(c);
        // The converted point is the cell center, so bounds surround it.
        assert!(b.contains(zp));
        let (cx, cy) = b.center();
        assert!((cx - f64::from(zp.x)).abs() <= 1.0);
        assert!((cy - f64::from(zp.y)).abs() <= 1.0);
    }

    #[test]
    fn nearest_vertex_square() {
        let g = Grid::new(GridKind::Square, 50, (0, 0)).unwrap();
        assert_eq!(g.nearest_vertex(ZonePoint::new(60, 40)), ZonePoint::new(50, 50));
        assert_eq!(g.nearest_vertex(ZonePoint::new(20, 20)), ZonePoint::new(0, 0));
    }

    #[test]
    fn gridless_has_no_snap() {
        let g = Grid::new(GridKind::Gridless, 50, (0, 0)).unwrap();
        let p = ZonePoint::new(33, 77);
        assert_eq!(g.nearest_vertex(p), p);
        assert!(!g.capabilities().is_snap_to_grid_supported());
    }

    #[test]
    fn second_dimension_round_trip() {
        let mut g = Grid::new(GridKind::HexVertical, 50, (0, 0)).unwrap();
        let regular = g.second_dimension();
        assert!(regular > 50.0);

        g.set_second_dimension(80.0);
        assert!((g.second_dimension() - 80.0).abs() < 1e-6);

        // Below the minor diameter restores the regular hexagon.
        g.set_second_dimension(10.0);
        assert!((g.second_dimension() - regular).abs() < 1e-6);

        let mut sq = Grid::new(GridKind::Square, 50, (0, 0)).unwrap();
        assert_eq!(sq.second_dimension(), 0.0);
        sq.set_second_dimension(80.0);
        assert_eq!(sq.second_dimension(), 0.0);
    }

    #[test]
    fn snap_facing_picks_nearest_legal_angle() {
        let g = Grid::new(GridKind::Square, 50, (0, 0)).unwrap();
        assert_eq!(g.snap_facing(50, true, true), 45);
        assert_eq!(g.snap_facing(100, true, false), 90);
        assert_eq!(g.snap_facing(170, false, true), 135);
        // Rotation disabled: everything snaps to 90.
        assert_eq!(g.snap_facing(0, false, false), 90);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::new(GridKind::HexVertical, 50, (7, -3)).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }
}
