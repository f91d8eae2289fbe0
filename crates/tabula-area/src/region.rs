//! Scanline regions: exact boolean algebra on sets of pixels.

use std::fmt;

use tabula_core::{Rect, ZonePoint};

// ---------------------------------------------------------------------------
// Span
// ---------------------------------------------------------------------------

/// A half-open horizontal run of pixels `[x0, x1)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub x0: i32,
    pub x1: i32,
}

impl Span {
    /// Create a new span. `x1` must be greater than `x0`.
    #[inline]
    pub const fn new(x0: i32, x1: i32) -> Self {
        Self { x0, x1 }
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn len(self) -> u64 {
        (self.x1 - self.x0) as u64
    }

    /// Whether the span covers no pixels.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.x1 <= self.x0
    }
}

/// A run of identical rows `[y0, y1)` sharing one span list.
///
/// Invariants: spans are sorted, pairwise disjoint and non-adjacent;
/// the list is never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Band {
    y0: i32,
    y1: i32,
    spans: Vec<Span>,
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// An exact region of the pixel plane.
///
/// Stored in canonical form: bands sorted by `y0` with disjoint y-ranges,
/// adjacent bands with identical span lists coalesced. Two regions compare
/// equal if and only if they cover the same set of pixels, which is what
/// makes the algebra laws (idempotence, commutativity, associativity of
/// union; `r − r = ∅`) hold structurally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    bands: Vec<Band>,
}

impl Region {
    /// The empty region.
    #[inline]
    pub const fn empty() -> Self {
        Self { bands: Vec::new() }
    }

    /// A region covering exactly one rectangle. Empty rects give the
    /// empty region.
    pub fn from_rect(r: Rect) -> Self {
        if r.is_empty() {
            return Self::empty();
        }
        Self {
            bands: vec![Band {
                y0: r.y,
                y1: r.y + r.height,
                spans: vec![Span::new(r.x, r.x + r.width)],
            }],
        }
    }

    /// Whether the region covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Total number of pixels covered.
    pub fn area(&self) -> u64 {
        self.bands
            .iter()
            .map(|b| {
                let h = (b.y1 - b.y0) as u64;
                h * b.spans.iter().map(|s| s.len()).sum::<u64>()
            })
            .sum()
    }

    /// Bounding rectangle, or the empty rect for the empty region.
    pub fn bounds(&self) -> Rect {
        if self.bands.is_empty() {
            return Rect::default();
        }
        let y0 = self.bands[0].y0;
        let y1 = self.bands[self.bands.len() - 1].y1;
        let mut x0 = i32::MAX;
        let mut x1 = i32::MIN;
        for b in &self.bands {
            x0 = x0.min(b.spans[0].x0);
            x1 = x1.max(b.spans[b.spans.len() - 1].x1);
        }
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Whether the region contains the given pixel.
    pub fn contains(&self, p: ZonePoint) -> bool {
        let Some(band) = self
            .bands
            .iter()
            .find(|b| b.y0 <= p.y && p.y < b.y1)
        else {
            return false;
        };
        band.spans.iter().any(|s| s.x0 <= p.x && p.x < s.x1)
    }

    /// Return the region translated by (dx, dy) pixels.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            bands: self
                .bands
                .iter()
                .map(|b| Band {
                    y0: b.y0 + dy,
                    y1: b.y1 + dy,
                    spans: b
                        .spans
                        .iter()
                        .map(|s| Span::new(s.x0 + dx, s.x1 + dx))
                        .collect(),
                })
                .collect(),
        }
    }

    /// Set union.
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        self.combine(other, |a, b| a || b)
    }

    /// Set difference: pixels of `self` not in `other`.
    pub fn subtract(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }
        self.combine(other, |a, b| a && !b)
    }

    /// Set intersection.
    pub fn intersect(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self::empty();
        }
        self.combine(other, |a, b| a && b)
    }

    /// Union of an arbitrary number of regions.
    pub fn union_all<'a>(regions: impl IntoIterator<Item = &'a Region>) -> Self {
        let mut acc = Self::empty();
        for r in regions {
            acc = acc.union(r);
        }
        acc
    }

    /// Iterate over `(y, span)` rows in top-to-bottom, left-to-right order.
    pub fn rows(&self) -> impl Iterator<Item = (i32, Span)> + '_ {
        self.bands.iter().flat_map(|b| {
            (b.y0..b.y1).flat_map(move |y| b.spans.iter().map(move |&s| (y, s)))
        })
    }

    // -----------------------------------------------------------------------
    // Boolean combine
    // -----------------------------------------------------------------------

    fn combine(&self, other: &Self, keep: impl Fn(bool, bool) -> bool) -> Self {
        // Elementary y-intervals: between consecutive band boundaries the
        // row contents of both operands are constant.
        let mut ys = Vec::with_capacity((self.bands.len() + other.bands.len()) * 2);
        for b in &self.bands {
            ys.push(b.y0);
            ys.push(b.y1);
        }
        for b in &other.bands {
            ys.push(b.y0);
            ys.push(b.y1);
        }
        ys.sort_unstable();
        ys.dedup();

        const NO_SPANS: &[Span] = &[];
        let mut bands: Vec<Band> = Vec::new();
        let mut ia = 0;
        let mut ib = 0;
        for w in ys.windows(2) {
            let (y0, y1) = (w[0], w[1]);
            while ia < self.bands.len() && self.bands[ia].y1 <= y0 {
                ia += 1;
            }
            while ib < other.bands.len() && other.bands[ib].y1 <= y0 {
                ib += 1;
            }
            let sa = match self.bands.get(ia) {
                Some(b) if b.y0 <= y0 => b.spans.as_slice(),
                _ => NO_SPANS,
            };
            let sb = match other.bands.get(ib) {
                Some(b) if b.y0 <= y0 => b.spans.as_slice(),
                _ => NO_SPANS,
            };
            let spans = combine_spans(sa, sb, &keep);
            if !spans.is_empty() {
                push_band(&mut bands, y0, y1, spans);
            }
        }
        Self { bands }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Region({} px in {})", self.area(), self.bounds())
    }
}

/// Append a band, coalescing with the previous one when the y-ranges touch
/// and the span lists are identical. Keeps the representation canonical.
pub(crate) fn push_band_raw(
    bands: &mut Vec<(i32, i32, Vec<Span>)>,
    y0: i32,
    y1: i32,
    spans: Vec<Span>,
) {
    if let Some(last) = bands.last_mut() {
        if last.1 == y0 && last.2 == spans {
            last.1 = y1;
            return;
        }
    }
    bands.push((y0, y1, spans));
}

fn push_band(bands: &mut Vec<Band>, y0: i32, y1: i32, spans: Vec<Span>) {
    if let Some(last) = bands.last_mut() {
        if last.y1 == y0 && last.spans == spans {
            last.y1 = y1;
            return;
        }
    }
    bands.push(Band { y0, y1, spans });
}

impl Region {
    /// Build a region from raw `(y0, y1, spans)` triples produced by the
    /// rasterizer. Triples must be sorted, disjoint and pre-coalesced
    /// (see [`push_band_raw`]).
    pub(crate) fn from_raw_bands(raw: Vec<(i32, i32, Vec<Span>)>) -> Self {
        Self {
            bands: raw
                .into_iter()
                .map(|(y0, y1, spans)| Band { y0, y1, spans })
                .collect(),
        }
    }
}

/// Boolean combine of two canonical span lists over one row.
fn combine_spans(a: &[Span], b: &[Span], keep: &impl Fn(bool, bool) -> bool) -> Vec<Span> {
    let mut xs = Vec::with_capacity((a.len() + b.len()) * 2);
    for s in a {
        xs.push(s.x0);
        xs.push(s.x1);
    }
    for s in b {
        xs.push(s.x0);
        xs.push(s.x1);
    }
    xs.sort_unstable();
    xs.dedup();

    let mut out: Vec<Span> = Vec::new();
    let mut ia = 0;
    let mut ib = 0;
    for w in xs.windows(2) {
        let (x0, x1) = (w[0], w[1]);
        while ia < a.len() && a[ia].x1 <= x0 {
            ia += 1;
        }
        while ib < b.len() && b[ib].x1 <= x0 {
            ib += 1;
        }
        let in_a = ia < a.len() && a[ia].x0 <= x0;
        let in_b = ib < b.len() && b[ib].x0 <= x0;
        if keep(in_a, in_b) {
            push_span(&mut out, x0, x1);
        }
    }
    out
}

pub(crate) fn push_span(out: &mut Vec<Span>, x0: i32, x1: i32) {
    if let Some(last) = out.last_mut() {
        if last.x1 == x0 {
            last.x1 = x1;
            return;
        }
    }
    out.push(Span::new(x0, x1));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Region {
        Region::from_rect(Rect::new(x, y, w, h))
    }

    #[test]
    fn empty_region() {
        let e = Region::empty();
        assert!(e.is_empty());
        assert_eq!(e.area(), 0);
        assert_eq!(e.bounds(), Rect::default());
        assert!(!e.contains(ZonePoint::ZERO));
    }

    #[test]
    fn from_empty_rect_is_empty() {
        assert!(Region::from_rect(Rect::new(5, 5, 0, 10)).is_empty());
        assert!(Region::from_rect(Rect::new(5, 5, -3, 10)).is_empty());
    }

    #[test]
    fn union_of_disjoint_rects() {
        let r = rect(0, 0, 10, 10).union(&rect(20, 0, 10, 10));
        assert_eq!(r.area(), 200);
        assert!(r.contains(ZonePoint::new(5, 5)));
        assert!(r.contains(ZonePoint::new(25, 5)));
        assert!(!r.contains(ZonePoint::new(15, 5)));
    }

    #[test]
    fn union_of_overlapping_rects_counts_overlap_once() {
        let r = rect(0, 0, 10, 10).union(&rect(5, 0, 10, 10));
        assert_eq!(r.area(), 150);
        assert_eq!(r, rect(0, 0, 15, 10));
    }

    #[test]
    fn union_is_idempotent() {
        let a = rect(3, 4, 7, 9);
        assert_eq!(a.union(&a), a);
    }

    #[test]
    fn union_is_commutative_and_associative() {
        let a = rect(0, 0, 10, 10);
        let b = rect(5, 5, 10, 10);
        let c = rect(-3, 2, 6, 4);
        assert_eq!(a.union(&b), b.union(&a));
        assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
        assert_eq!(c.union(&a).union(&b), b.union(&c).union(&a));
    }

    #[test]
    fn union_with_empty_is_noop() {
        let a = rect(1, 2, 3, 4);
        assert_eq!(a.union(&Region::empty()), a);
        assert_eq!(Region::empty().union(&a), a);
    }

    #[test]
    fn subtract_self_is_empty() {
        let a = rect(0, 0, 10, 10);
        assert!(a.subtract(&a).is_empty());
    }

    #[test]
    fn subtract_empty_is_noop() {
        let a = rect(0, 0, 10, 10);
        assert_eq!(a.subtract(&Region::empty()), a);
        assert!(Region::empty().subtract(&a).is_empty());
    }

    #[test]
    fn subtract_punches_hole() {
        let outer = rect(0, 0, 30, 30);
        let hole = rect(10, 10, 10, 10);
        let r = outer.subtract(&hole);
        assert_eq!(r.area(), 900 - 100);
        assert!(r.contains(ZonePoint::new(0, 0)));
        assert!(!r.contains(ZonePoint::new(15, 15)));
        // Adding the hole back restores the original.
        assert_eq!(r.union(&hole), outer);
    }

    #[test]
    fn intersect_basics() {
        let a = rect(0, 0, 10, 10);
        let b = rect(5, 5, 10, 10);
        let i = a.intersect(&b);
        assert_eq!(i, rect(5, 5, 5, 5));
        assert!(a.intersect(&rect(50, 50, 5, 5)).is_empty());
    }

    #[test]
    fn translate_moves_pixels() {
        let a = rect(0, 0, 4, 4).translate(10, -5);
        assert_eq!(a, rect(10, -5, 4, 4));
        assert_eq!(a.area(), 16);
    }

    #[test]
    fn bounds_spans_all_bands() {
        let r = rect(0, 0, 5, 5).union(&rect(10, 20, 5, 5));
        assert_eq!(r.bounds(), Rect::new(0, 0, 15, 25));
    }

    #[test]
    fn canonical_form_makes_eq_set_equality() {
        // Build the same set two different ways.
        let a = rect(0, 0, 10, 4).union(&rect(0, 4, 10, 6));
        let b = rect(0, 0, 10, 10);
        assert_eq!(a, b);

        let c = rect(0, 0, 5, 10).union(&rect(5, 0, 5, 10));
        assert_eq!(c, b);
    }

    #[test]
    fn rows_iteration() {
        let r = rect(2, 3, 3, 2);
        let rows: Vec<_> = r.rows().collect();
        assert_eq!(rows, vec![(3, Span::new(2, 5)), (4, Span::new(2, 5))]);
    }

    #[test]
    fn union_all_matches_folded_union() {
        let parts = [rect(0, 0, 4, 4), rect(2, 2, 4, 4), rect(-4, 0, 4, 4)];
        let folded = parts[0].union(&parts[1]).union(&parts[2]);
        assert_eq!(Region::union_all(parts.iter()), folded);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn region_round_trip() {
        let r = Region::from_rect(Rect::new(0, 0, 10, 10))
            .subtract(&Region::from_rect(Rect::new(2, 2, 3, 3)));
        let json = serde_json::to_string(&r).unwrap();
        let back: Region = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
