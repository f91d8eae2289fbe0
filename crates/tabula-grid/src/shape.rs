//! Shaped vision/light areas, synthesized per topology.
//!
//! Sight and light definitions describe a shape kind plus a range in map
//! units; a zone turns that into a world-space [`Region`] centered on the
//! token. The region is built at the origin — callers translate it to the
//! token's position and anchor point.

use tabula_core::{CellPoint, Metric, Rect};
use tabula_area::{Region, poly};

use crate::footprint::TokenFootprint;
use crate::grid::{Grid, GridKind};
use crate::zone::Zone;

/// The closed set of vision/light shape kinds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeType {
    /// A circle of the given range.
    #[default]
    Circle,
    /// An axis-aligned square, range pixels from center to edge.
    Square,
    /// A pie wedge centered on the bearer's facing.
    Cone,
    /// A flat hexagon.
    Hex,
    /// A grid-conforming blob of whole cells.
    Grid,
}

/// Everything a shape needs from the token bearing it.
#[derive(Clone, Debug)]
pub struct ShapeParams<'a> {
    pub shape: ShapeType,
    /// Range in map units. Zero falls back to the zone's vision distance;
    /// negative ranges produce the empty region.
    pub range: f64,
    /// Cone width in degrees.
    pub arc_angle: f64,
    /// Cone offset from the facing, in degrees.
    pub offset_angle: i32,
    /// Extend the range by the token's footprint half-extent.
    pub scale_with_token: bool,
    /// The bearer's facing in degrees.
    pub facing: i32,
    pub footprint: &'a TokenFootprint,
}

impl<'a> ShapeParams<'a> {
    /// A plain circle of `range` units around `footprint`.
    pub fn circle(range: f64, footprint: &'a TokenFootprint) -> Self {
        Self {
            shape: ShapeType::Circle,
            range,
            arc_angle: 0.0,
            offset_angle: 0,
            scale_with_token: false,
            facing: 0,
            footprint,
        }
    }
}

impl Grid {
    /// The cell outline as an origin-centered polygon.
    pub fn cell_polygon(&self) -> Vec<(f64, f64)> {
        let s = f64::from(self.size());
        match self.kind() {
            GridKind::Square | GridKind::Gridless => {
                let h = s / 2.0;
                vec![(-h, -h), (h, -h), (h, h), (-h, h)]
            }
            GridKind::HexVertical | GridKind::IsometricHex => {
                let d = self.hex_dims();
                let (mr, half_edge, ur) = (d.minor_radius, d.edge_length / 2.0, d.u_radius());
                vec![
                    (-ur, 0.0),
                    (-half_edge, -mr),
                    (half_edge, -mr),
                    (ur, 0.0),
                    (half_edge, mr),
                    (-half_edge, mr),
                ]
            }
            GridKind::HexHorizontal => {
                let d = self.hex_dims();
                let (mr, half_edge, ur) = (d.minor_radius, d.edge_length / 2.0, d.u_radius());
                vec![
                    (0.0, -ur),
                    (mr, -half_edge),
                    (mr, half_edge),
                    (0.0, ur),
                    (-mr, half_edge),
                    (-mr, -half_edge),
                ]
            }
            GridKind::Isometric => {
                let h = s / 2.0;
                vec![(0.0, -h), (s, 0.0), (0.0, h), (-s, 0.0)]
            }
        }
    }

    /// Center of `cell` relative to the center of cell (0,0), in pixels.
    fn relative_cell_center(&self, cell: CellPoint) -> (f64, f64) {
        let s = f64::from(self.size());
        let (x, y) = (f64::from(cell.x), f64::from(cell.y));
        match self.kind() {
            GridKind::Square | GridKind::Gridless => (x * s, y * s),
            GridKind::HexVertical | GridKind::IsometricHex => {
                let d = self.hex_dims();
                let stagger = if cell.x.rem_euclid(2) == 1 { d.minor_radius } else { 0.0 };
                (
                    x * (d.edge_projection + d.edge_length),
                    y * 2.0 * d.minor_radius + stagger,
                )
            }
            GridKind::HexHorizontal => {
                let d = self.hex_dims();
                let stagger = if cell.y.rem_euclid(2) == 1 { d.minor_radius } else { 0.0 };
                (
                    x * 2.0 * d.minor_radius + stagger,
                    y * (d.edge_projection + d.edge_length),
                )
            }
            GridKind::Isometric => ((x - y) * s, (x + y) * s / 2.0),
        }
    }

    /// A grid-conforming region: every cell within `cell_radius` of the
    /// origin cell (1-2-1 metric), assembled from cell outlines and
    /// centered at the origin. Negative radii give the empty region.
    pub fn grid_area(&self, cell_radius: i32) -> Region {
        if cell_radius < 0 {
            return Region::empty();
        }
        let started = std::time::Instant::now();
        let outline = self.cell_polygon();
        let origin = CellPoint::ZERO;
        let mut area = Region::empty();
        for y in -cell_radius..=cell_radius {
            for x in -cell_radius..=cell_radius {
                let cell = CellPoint::new(x, y);
                if self.distance(origin, cell, Metric::OneTwoOne) > f64::from(cell_radius) {
                    continue;
                }
                let (dx, dy) = self.relative_cell_center(cell);
                let moved: Vec<_> = outline.iter().map(|&(px, py)| (px + dx, py + dy)).collect();
                area = area.union(&poly::polygon(&moved));
            }
        }
        let elapsed = started.elapsed();
        if elapsed.as_millis() > 50 {
            log::debug!(
                "slow grid area build: radius {cell_radius} took {}ms",
                elapsed.as_millis()
            );
        }
        area
    }
}

impl Zone {
    /// The world-space region of one shape definition, centered at the
    /// origin. Callers translate the result to the token's anchor.
    ///
    /// Range semantics follow the vision rules: zero means "as far as the
    /// zone allows" (the default vision distance), negative means no area
    /// at all.
    pub fn shaped_area(&self, params: &ShapeParams<'_>) -> Region {
        if params.range < 0.0 {
            return Region::empty();
        }
        let grid = self.grid();
        let mut vision_px = if params.range == 0.0 {
            self.token_vision_px()
        } else {
            self.units_to_px(params.range)
        };

        let fp_bounds = params.footprint.bounds(grid, None);
        if params.scale_with_token {
            let half_w = f64::from(fp_bounds.width) / 2.0;
            let half_h = f64::from(fp_bounds.height) / 2.0;
            // Hex footprints are not square; the shorter side governs.
            vision_px += half_w.min(half_h);
        }

        match params.shape {
            ShapeType::Circle => poly::circle(0.0, 0.0, vision_px),
            ShapeType::Square => {
                let v = vision_px;
                poly::polygon(&[(-v, -v), (v, -v), (v, v), (-v, v)])
            }
            ShapeType::Cone => {
                // Rotating the flattened arc by the facing is the same as
                // advancing its start angle.
                let start =
                    360.0 - params.arc_angle / 2.0 + f64::from(params.offset_angle + params.facing);
                let wedge = poly::pie(vision_px, start, params.arc_angle);
                let seat = Region::from_rect(Rect::new(
                    -fp_bounds.width / 2,
                    -fp_bounds.height / 2,
                    fp_bounds.width,
                    fp_bounds.height,
                ));
                wedge.union(&seat)
            }
            ShapeType::Hex => {
                let (cx, cy) = fp_bounds.center();
                let adjustment = f64::from(fp_bounds.width.min(fp_bounds.height)) / 2.0;
                poly::hexagon(cx - adjustment, cy - adjustment, vision_px, 0.0)
            }
            ShapeType::Grid => self.grid_shaped_area(params, vision_px),
        }
    }

    fn grid_shaped_area(&self, params: &ShapeParams<'_>, vision_px: f64) -> Region {
        let grid = self.grid();
        if params.range <= 0.0 {
            // Daylight and the like fall back to a plain circle.
            return poly::circle(0.0, 0.0, vision_px);
        }
        let mut cell_radius = (params.range / self.units_per_cell()) as i32;
        let fp_bounds = params.footprint.bounds(grid, None);

        if !params.scale_with_token {
            return grid.grid_area(cell_radius);
        }
        if grid.is_hex() {
            // Hexes widen the radius instead of stamping per occupied cell.
            cell_radius += fp_bounds.width / grid.size() / 2;
            return grid.grid_area(cell_radius);
        }

        // Square family: the radius extends from every occupied cell, so a
        // 15 ft light on a Huge token radiates 15 ft from all its sides.
        let base = grid.grid_area(cell_radius);
        let (cx, cy) = fp_bounds.center();
        let size = f64::from(grid.size());
        let mut area = Region::empty();
        for cell in params.footprint.occupied_cells(CellPoint::ZERO) {
            let dx = f64::from(cell.x) * size + size / 2.0 - cx;
            let dy = f64::from(cell.y) * size + size / 2.0 - cy;
            area = area.union(&base.translate(dx.round() as i32, dy.round() as i32));
        }
        area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::TokenFootprint;
    use crate::grid::{Grid, GridKind};
    use crate::zone::Zone;
    use tabula_core::{Guid, ZonePoint};

    fn zone() -> Zone {
        Zone::new(Grid::new(GridKind::Square, 50, (0, 0)).unwrap())
    }

    fn medium() -> TokenFootprint {
        TokenFootprint::new(Guid::from_raw(1), "Medium", 1.0)
    }

    #[test]
    fn negative_range_is_empty_not_an_error() {
        let zone = zone();
        let fp = medium();
        let mut p = ShapeParams::circle(-5.0, &fp);
        assert!(zone.shaped_area(&p).is_empty());
        p.shape = ShapeType::Cone;
        p.arc_angle = 90.0;
        assert!(zone.shaped_area(&p).is_empty());
    }

    #[test]
    fn zero_range_falls_back_to_zone_vision() {
        let zone = zone();
        let fp = medium();
        let region = zone.shaped_area(&ShapeParams::circle(0.0, &fp));
        // Default vision is 1000 units = 10000 px here; just check it
        // dwarfs any real light.
        assert!(region.contains(ZonePoint::new(5000, 0)));
    }

    #[test]
    fn circle_range_in_map_units() {
        let zone = zone();
        let fp = medium();
        // 20 units at 10 px/unit: radius 200 px.
        let region = zone.shaped_area(&ShapeParams::circle(20.0, &fp));
        assert!(region.contains(ZonePoint::new(150, 0)));
        assert!(!region.contains(ZonePoint::new(250, 0)));
    }

    #[test]
    fn scale_with_token_extends_range() {
        let zone = zone();
        let fp = medium();
        let mut p = ShapeParams::circle(20.0, &fp);
        let plain = zone.shaped_area(&p);
        p.scale_with_token = true;
        let scaled = zone.shaped_area(&p);
        // Medium token: +25 px.
        assert!(scaled.contains(ZonePoint::new(220, 0)));
        assert!(scaled.area() > plain.area());
    }

    #[test]
    fn square_shape_is_square() {
        let zone = zone();
        let fp = medium();
        let mut p = ShapeParams::circle(20.0, &fp);
        p.shape = ShapeType::Square;
        let region = zone.shaped_area(&p);
        assert_eq!(region.area(), 400 * 400);
        assert!(region.contains(ZonePoint::new(199, 199)));
    }

    #[test]
    fn cone_points_along_facing() {
        let zone = zone();
        let fp = medium();
        let mut p = ShapeParams::circle(20.0, &fp);
        p.shape = ShapeType::Cone;
        p.arc_angle = 90.0;
        // Facing 0: east wedge.
        let east = zone.shaped_area(&p);
        assert!(east.contains(ZonePoint::new(150, 0)));
        assert!(!east.contains(ZonePoint::new(-150, 0)));
        // Facing 90: the wedge turns toward the top of the map.
        p.facing = 90;
        let north = zone.shaped_area(&p);
        assert!(north.contains(ZonePoint::new(0, -150)));
        assert!(!north.contains(ZonePoint::new(0, 150)));
        // The bearer's own footprint is always lit.
        assert!(north.contains(ZonePoint::new(-20, 20)));
    }

    #[test]
    fn grid_shape_radius_one_is_three_by_three() {
        let zone = zone();
        let fp = medium();
        let mut p = ShapeParams::circle(5.0, &fp);
        p.shape = ShapeType::Grid;
        let region = zone.shaped_area(&p);
        // radius 1 cell under 1-2-1 includes the diagonals: a 3x3 block.
        assert_eq!(region.area(), 9 * 50 * 50);
    }

    #[test]
    fn grid_area_zero_radius_is_single_cell() {
        let grid = Grid::new(GridKind::Square, 50, (0, 0)).unwrap();
        assert_eq!(grid.grid_area(0).area(), 50 * 50);
        assert!(grid.grid_area(-1).is_empty());
    }

    #[test]
    fn hex_grid_area_tiles_without_gaps() {
        let grid = Grid::new(GridKind::HexVertical, 50, (0, 0)).unwrap();
        let one = grid.grid_area(0).area();
        let seven = grid.grid_area(1).area();
        // Seven hexes; tiling leaves no holes, so the union is close to
        // seven times one cell (rasterization nibbles a few edge pixels).
        let expect = one * 7;
        let diff = seven.abs_diff(expect);
        assert!(diff < expect / 20, "one {one} seven {seven}");
    }

    #[test]
    fn shaped_area_is_deterministic() {
        let zone = zone();
        let fp = medium();
        let mut p = ShapeParams::circle(20.0, &fp);
        p.shape = ShapeType::Grid;
        assert_eq!(zone.shaped_area(&p), zone.shaped_area(&p));
    }
}
