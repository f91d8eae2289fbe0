//! Shape synthesis: f64 polygons rasterized into exact [`Region`]s.
//!
//! Vision and light shapes are defined in continuous world space (a torch
//! is a circle of 20 map units, a dragon's breath a 60° cone) but the
//! algebra that composes them works on exact pixel regions. The functions
//! here bridge the two: build a polygon, then scan-convert it by sampling
//! pixel centers with the even-odd rule. The sampling is pure integer/f64
//! arithmetic with no hashing involved, so a given polygon always produces
//! the same region.
//!
//! Angles follow device conventions: degrees measured counter-clockwise
//! from +X *as if Y grew up*, applied to a Y-grows-down plane (so a 90°
//! arc start points toward the top of the map).

use crate::region::{Region, Span, push_band_raw, push_span};

/// Number of segments used to approximate a full ellipse.
pub const CIRCLE_SEGMENTS: u32 = 60;

/// Rasterize a closed polygon with the even-odd fill rule.
///
/// A pixel is covered when its center lies inside the polygon. Fewer than
/// three vertices produce the empty region.
pub fn polygon(pts: &[(f64, f64)]) -> Region {
    if pts.len() < 3 {
        return Region::empty();
    }
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(_, y) in pts {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        return Region::empty();
    }

    let row0 = y_min.floor() as i32;
    let row1 = y_max.ceil() as i32;

    let mut raw: Vec<(i32, i32, Vec<Span>)> = Vec::new();
    let mut xs: Vec<f64> = Vec::new();
    for row in row0..row1 {
        let sample = f64::from(row) + 0.5;
        xs.clear();
        for i in 0..pts.len() {
            let (ax, ay) = pts[i];
            let (bx, by) = pts[(i + 1) % pts.len()];
            if (ay <= sample) != (by <= sample) {
                let t = (sample - ay) / (by - ay);
                xs.push(ax + t * (bx - ax));
            }
        }
        if xs.is_empty() {
            continue;
        }
        xs.sort_by(f64::total_cmp);

        let mut spans: Vec<Span> = Vec::new();
        for pair in xs.chunks_exact(2) {
            // Pixel p is covered when p + 0.5 lies in [enter, exit).
            let x0 = (pair[0] - 0.5).ceil() as i32;
            let x1 = (pair[1] - 0.5).ceil() as i32;
            if x1 > x0 {
                push_span(&mut spans, x0, x1);
            }
        }
        if !spans.is_empty() {
            push_band_raw(&mut raw, row, row + 1, spans);
        }
    }
    Region::from_raw_bands(raw)
}

/// A line-segment ellipse centered at (cx, cy), approximated with
/// [`CIRCLE_SEGMENTS`] segments. Non-positive radii give the empty region.
pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Region {
    if rx <= 0.0 || ry <= 0.0 {
        return Region::empty();
    }
    let n = CIRCLE_SEGMENTS;
    let mut pts = Vec::with_capacity(n as usize);
    for i in 0..n {
        let t = f64::from(i) * std::f64::consts::TAU / f64::from(n);
        pts.push((cx + rx * t.cos(), cy + ry * t.sin()));
    }
    polygon(&pts)
}

/// A circle centered at (cx, cy). Non-positive radius gives the empty
/// region.
pub fn circle(cx: f64, cy: f64, r: f64) -> Region {
    ellipse(cx, cy, r, r)
}

/// A regular hexagon with vertices `radius` from (cx, cy), optionally
/// rotated about the *origin* by `rotation` radians (matching how
/// grid-conforming hex areas are assembled).
pub fn hexagon(cx: f64, cy: f64, radius: f64, rotation: f64) -> Region {
    if radius <= 0.0 {
        return Region::empty();
    }
    let mut pts = Vec::with_capacity(6);
    for i in 0..6 {
        let t = f64::from(i) * std::f64::consts::TAU / 6.0;
        pts.push((cx + radius * t.cos(), cy + radius * t.sin()));
    }
    if rotation != 0.0 {
        pts = rotate(&pts, rotation);
    }
    polygon(&pts)
}

/// A pie slice centered at the origin: the cone shape of breath weapons
/// and directional lights.
///
/// `start_deg` is the arc's starting angle, `extent_deg` its width; both
/// in degrees, counter-clockwise. The arc is flattened to straight
/// segments of at most 5°. Non-positive radius or extent gives the empty
/// region.
pub fn pie(radius: f64, start_deg: f64, extent_deg: f64) -> Region {
    if radius <= 0.0 || extent_deg <= 0.0 {
        return Region::empty();
    }
    let steps = (extent_deg / 5.0).ceil().max(1.0) as u32;
    let mut pts = Vec::with_capacity(steps as usize + 2);
    pts.push((0.0, 0.0));
    for i in 0..=steps {
        let deg = start_deg + extent_deg * f64::from(i) / f64::from(steps);
        let t = deg.to_radians();
        pts.push((radius * t.cos(), -radius * t.sin()));
    }
    polygon(&pts)
}

/// Rotate polygon vertices about the origin by `theta` radians in device
/// coordinates (positive theta turns +X toward +Y, i.e. visually
/// clockwise on a Y-grows-down map).
pub fn rotate(pts: &[(f64, f64)], theta: f64) -> Vec<(f64, f64)> {
    let (sin, cos) = theta.sin_cos();
    pts.iter()
        .map(|&(x, y)| (x * cos - y * sin, x * sin + y * cos))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_core::ZonePoint;

    #[test]
    fn degenerate_polygon_is_empty() {
        assert!(polygon(&[]).is_empty());
        assert!(polygon(&[(0.0, 0.0), (10.0, 10.0)]).is_empty());
    }

    #[test]
    fn square_polygon_matches_rect() {
        let r = polygon(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert_eq!(r.area(), 100);
        assert!(r.contains(ZonePoint::new(0, 0)));
        assert!(r.contains(ZonePoint::new(9, 9)));
        assert!(!r.contains(ZonePoint::new(10, 5)));
    }

    #[test]
    fn circle_radius_zero_or_negative_is_empty() {
        assert!(circle(0.0, 0.0, 0.0).is_empty());
        assert!(circle(0.0, 0.0, -5.0).is_empty());
    }

    #[test]
    fn circle_covers_center_not_rim() {
        let c = circle(0.0, 0.0, 10.0);
        assert!(c.contains(ZonePoint::new(0, 0)));
        assert!(c.contains(ZonePoint::new(6, 6)));
        assert!(!c.contains(ZonePoint::new(12, 0)));
        assert!(!c.contains(ZonePoint::new(8, 8)));
    }

    #[test]
    fn circle_area_close_to_analytic() {
        let c = circle(0.0, 0.0, 20.0);
        let analytic = std::f64::consts::PI * 400.0;
        let got = c.area() as f64;
        // 60-segment polygon + center sampling stays within a few percent.
        assert!((got - analytic).abs() < analytic * 0.05, "area {got}");
    }

    #[test]
    fn circle_is_deterministic() {
        assert_eq!(circle(3.0, -7.0, 15.0), circle(3.0, -7.0, 15.0));
    }

    #[test]
    fn ellipse_flattens() {
        let e = ellipse(0.0, 0.0, 20.0, 10.0);
        assert!(e.contains(ZonePoint::new(15, 0)));
        assert!(!e.contains(ZonePoint::new(0, 15)));
    }

    #[test]
    fn pie_quarter_area() {
        let p = pie(20.0, 0.0, 90.0);
        let analytic = std::f64::consts::PI * 400.0 / 4.0;
        let got = p.area() as f64;
        assert!((got - analytic).abs() < analytic * 0.08, "area {got}");
        // 0..90 degrees sweeps the top-right quadrant (y up = screen -y).
        assert!(p.contains(ZonePoint::new(10, -4)));
        assert!(!p.contains(ZonePoint::new(-10, 4)));
    }

    #[test]
    fn pie_zero_extent_is_empty() {
        assert!(pie(20.0, 0.0, 0.0).is_empty());
        assert!(pie(0.0, 0.0, 90.0).is_empty());
    }

    #[test]
    fn hexagon_area_close_to_analytic() {
        let h = hexagon(0.0, 0.0, 20.0, 0.0);
        let analytic = 1.5 * 3.0_f64.sqrt() * 400.0;
        let got = h.area() as f64;
        assert!((got - analytic).abs() < analytic * 0.05, "area {got}");
    }

    #[test]
    fn rotate_quarter_turn() {
        let pts = rotate(&[(10.0, 0.0)], std::f64::consts::FRAC_PI_2);
        assert!((pts[0].0).abs() < 1e-9);
        assert!((pts[0].1 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn subtracting_shape_from_itself_is_empty() {
        let c = circle(5.0, 5.0, 12.0);
        assert!(c.subtract(&c).is_empty());
    }
}
