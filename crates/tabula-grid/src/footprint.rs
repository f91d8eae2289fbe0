//! Token footprints: which cells a token occupies.
//!
//! A footprint stores topology-agnostic cell offsets around an implied
//! anchor at (0,0). Topology-specific corrections — hex stagger, mostly —
//! are applied at resolution time by registered [`OffsetTranslator`]s,
//! never baked into the stored offsets, so one footprint definition can be
//! shared across maps.

use std::collections::HashSet;

use rand::Rng;
use tabula_core::{CellPoint, Guid, Rect};

use crate::grid::{Grid, GridKind};

/// A per-topology correction applied to each resolved offset cell.
///
/// Arguments are the anchor cell and the already-shifted offset cell;
/// translators run in registration order and may perturb the cell further.
pub type OffsetTranslator = fn(CellPoint, &mut CellPoint);

/// Odd vertical-hex columns are staggered half a cell down, so offsets
/// landing back on an even column need one extra row.
pub fn vertical_hex_translator(anchor: CellPoint, cell: &mut CellPoint) {
    if anchor.x.abs() % 2 == 1 && cell.x.abs() % 2 == 0 {
        cell.y += 1;
    }
}

/// Row-staggered mirror of [`vertical_hex_translator`].
pub fn horizontal_hex_translator(anchor: CellPoint, cell: &mut CellPoint) {
    if anchor.y.abs() % 2 == 1 && cell.y.abs() % 2 == 0 {
        cell.x += 1;
    }
}

/// The stagger correction a topology needs, if any.
pub fn offset_translator(kind: GridKind) -> Option<OffsetTranslator> {
    match kind {
        GridKind::HexVertical | GridKind::IsometricHex => Some(vertical_hex_translator),
        GridKind::HexHorizontal => Some(horizontal_hex_translator),
        GridKind::Square | GridKind::Isometric | GridKind::Gridless => None,
    }
}

// ---------------------------------------------------------------------------
// TokenFootprint
// ---------------------------------------------------------------------------

/// The cell-occupancy shape of a token.
///
/// Identity is the [`Guid`]: two footprints with identical offsets are
/// distinct entities when separately created, and catalogs look entries up
/// by id.
#[derive(Clone, Debug)]
pub struct TokenFootprint {
    id: Guid,
    name: String,
    is_default: bool,
    scale: f64,
    offsets: Vec<CellPoint>,
    translators: Vec<OffsetTranslator>,
}

impl TokenFootprint {
    /// A single-cell footprint with the given scale factor.
    pub fn new(id: Guid, name: impl Into<String>, scale: f64) -> Self {
        debug_assert!(scale > 0.0);
        Self {
            id,
            name: name.into(),
            is_default: false,
            scale,
            offsets: Vec::new(),
            translators: Vec::new(),
        }
    }

    /// A multi-cell footprint. Offsets are relative to the anchor and must
    /// not include (0,0) — the anchor is always occupied implicitly.
    pub fn with_offsets(
        id: Guid,
        name: impl Into<String>,
        offsets: impl IntoIterator<Item = (i32, i32)>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            is_default: false,
            scale: 1.0,
            offsets: offsets
                .into_iter()
                .map(|(x, y)| CellPoint::new(x, y))
                .collect(),
            translators: Vec::new(),
        }
    }

    /// Mark this footprint as its catalog's default.
    pub fn set_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// Register a per-topology translator. Translators run in registration
    /// order when offsets are resolved.
    pub fn add_offset_translator(&mut self, translator: OffsetTranslator) {
        self.translators.push(translator);
    }

    #[inline]
    pub fn id(&self) -> Guid {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Linear scale factor relative to one cell.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The stored offsets, without the implicit anchor.
    #[inline]
    pub fn offsets(&self) -> &[CellPoint] {
        &self.offsets
    }

    /// The cells occupied by a token anchored at `anchor`.
    ///
    /// Always contains the anchor itself; duplicate cells produced by
    /// overlapping offsets collapse.
    pub fn occupied_cells(&self, anchor: CellPoint) -> HashSet<CellPoint> {
        let mut cells = HashSet::with_capacity(self.offsets.len() + 1);
        cells.insert(anchor);
        for &offset in &self.offsets {
            let mut cell = anchor + offset;
            for translate in &self.translators {
                translate(anchor, &mut cell);
            }
            cells.insert(cell);
        }
        cells
    }

    /// World-space bounding rectangle of the occupied cells.
    ///
    /// `anchor` defaults to cell (0,0); the grid's pixel offset is already
    /// folded into each cell rectangle.
    pub fn bounds(&self, grid: &Grid, anchor: Option<CellPoint>) -> Rect {
        let anchor = anchor.unwrap_or(CellPoint::ZERO);
        let mut bounds = Rect::default();
        for cell in self.occupied_cells(anchor) {
            bounds = bounds.union(grid.bounds(cell));
        }
        bounds
    }
}

impl PartialEq for TokenFootprint {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TokenFootprint {}

impl std::hash::Hash for TokenFootprint {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ---------------------------------------------------------------------------
// Stock catalogs
// ---------------------------------------------------------------------------

/// Pick the default entry of a catalog, falling back to the first.
pub fn default_footprint(catalog: &[TokenFootprint]) -> Option<&TokenFootprint> {
    catalog
        .iter()
        .find(|fp| fp.is_default())
        .or_else(|| catalog.first())
}

/// Find a catalog entry by id, falling back to the default.
pub fn footprint_by_id(catalog: &[TokenFootprint], id: Option<Guid>) -> Option<&TokenFootprint> {
    match id {
        Some(id) => catalog
            .iter()
            .find(|fp| fp.id() == id)
            .or_else(|| default_footprint(catalog)),
        None => default_footprint(catalog),
    }
}

/// The stock square-grid token sizes.
pub fn square_catalog(rng: &mut impl Rng) -> Vec<TokenFootprint> {
    fn square_points(size: i32) -> Vec<(i32, i32)> {
        let mut pts = Vec::with_capacity((size * size - 1) as usize);
        for y in 0..size {
            for x in 0..size {
                if x != 0 || y != 0 {
                    pts.push((x, y));
                }
            }
        }
        pts
    }
    vec![
        TokenFootprint::new(Guid::random(rng), "Medium", 1.0).set_default(true),
        TokenFootprint::with_offsets(Guid::random(rng), "Large", square_points(2)),
        TokenFootprint::with_offsets(Guid::random(rng), "Huge", square_points(3)),
        TokenFootprint::with_offsets(Guid::random(rng), "Gargantuan", square_points(4)),
        TokenFootprint::with_offsets(Guid::random(rng), "Colossal", square_points(6)),
    ]
}

/// The stock vertical-hex token sizes, stagger correction attached.
pub fn vertical_hex_catalog(rng: &mut impl Rng) -> Vec<TokenFootprint> {
    let mut catalog = vec![
        TokenFootprint::new(Guid::random(rng), "1/6", 0.408),
        TokenFootprint::new(Guid::random(rng), "1/4", 0.500),
        TokenFootprint::new(Guid::random(rng), "1/3", 0.577),
        TokenFootprint::new(Guid::random(rng), "1/2", 0.707),
        TokenFootprint::new(Guid::random(rng), "2/3", 0.816),
        TokenFootprint::new(Guid::random(rng), "Medium", 1.0).set_default(true),
        TokenFootprint::with_offsets(Guid::random(rng), "Large", [(0, 1), (1, 0)]),
        TokenFootprint::with_offsets(
            Guid::random(rng),
            "Huge",
            [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)],
        ),
        TokenFootprint::with_offsets(
            Guid::random(rng),
            "Humongous",
            [
                (-2, -1),
                (-2, 0),
                (-2, 1),
                (-1, -2),
                (-1, -1),
                (-1, 0),
                (-1, 1),
                (0, -2),
                (0, -1),
                (0, 1),
                (0, 2),
                (1, -2),
                (1, -1),
                (1, 0),
                (1, 1),
                (2, -1),
                (2, 0),
                (2, 1),
            ],
        ),
    ];
    for fp in &mut catalog {
        fp.add_offset_translator(vertical_hex_translator);
    }
    catalog
}

/// The stock horizontal-hex token sizes (axes flipped from vertical).
pub fn horizontal_hex_catalog(rng: &mut impl Rng) -> Vec<TokenFootprint> {
    let mut catalog = vec![
        TokenFootprint::new(Guid::random(rng), "1/6", 0.408),
        TokenFootprint::new(Guid::random(rng), "1/4", 0.500),
        TokenFootprint::new(Guid::random(rng), "1/3", 0.577),
        TokenFootprint::new(Guid::random(rng), "1/2", 0.707),
        TokenFootprint::new(Guid::random(rng), "2/3", 0.816),
        TokenFootprint::new(Guid::random(rng), "Medium", 1.0).set_default(true),
        TokenFootprint::with_offsets(Guid::random(rng), "Large", [(1, 0), (0, 1)]),
        TokenFootprint::with_offsets(
            Guid::random(rng),
            "Huge",
            [(0, 1), (1, 0), (-1, 0), (-1, -1), (0, -1), (-1, 1)],
        ),
        TokenFootprint::with_offsets(
            Guid::random(rng),
            "Humongous",
            [
                (-1, -2),
                (0, -2),
                (1, -2),
                (-2, -1),
                (-1, -1),
                (0, -1),
                (1, -1),
                (-2, 0),
                (-1, 0),
                (1, 0),
                (2, 0),
                (-2, 1),
                (-1, 1),
                (0, 1),
                (1, 1),
                (-1, 2),
                (0, 2),
                (1, 2),
            ],
        ),
    ];
    for fp in &mut catalog {
        fp.add_offset_translator(horizontal_hex_translator);
    }
    catalog
}

/// The stock gridless token sizes: pure scale steps, no cell offsets.
pub fn gridless_catalog(rng: &mut impl Rng) -> Vec<TokenFootprint> {
    const SCALES: [(&str, f64); 32] = [
        ("-11", 0.086),
        ("-10", 0.107),
        ("-9", 0.134),
        ("-8", 0.168),
        ("-7", 0.210),
        ("-6", 0.262),
        ("-5", 0.328),
        ("-4", 0.410),
        ("-3", 0.512),
        ("-2", 0.640),
        ("-1", 0.800),
        ("0", 1.000),
        ("1", 1.200),
        ("2", 1.440),
        ("3", 1.728),
        ("4", 2.074),
        ("5", 2.488),
        ("6", 2.986),
        ("7", 3.583),
        ("8", 4.300),
        ("9", 5.160),
        ("10", 6.192),
        ("11", 7.430),
        ("12", 8.916),
        ("13", 10.699),
        ("14", 12.839),
        ("15", 15.407),
        ("16", 18.488),
        ("17", 22.186),
        ("18", 26.623),
        ("19", 31.948),
        ("20", 38.338),
    ];
    SCALES
        .iter()
        .map(|&(name, scale)| {
            TokenFootprint::new(Guid::random(rng), name, scale).set_default(name == "0")
        })
        .collect()
}

/// The stock catalog for a topology.
pub fn catalog_for(kind: GridKind, rng: &mut impl Rng) -> Vec<TokenFootprint> {
    match kind {
        GridKind::Square | GridKind::Isometric => square_catalog(rng),
        GridKind::HexVertical | GridKind::IsometricHex => vertical_hex_catalog(rng),
        GridKind::HexHorizontal => horizontal_hex_catalog(rng),
        GridKind::Gridless => gridless_catalog(rng),
    }
}
