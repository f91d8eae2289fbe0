//! Campaign catalogs of light sources and sight types.
//!
//! Catalogs are built once by the embedding application at startup and
//! passed by reference wherever composition happens — there is no implicit
//! process-wide default. The `standard_*` builders reproduce the stock
//! entries shipped with the original resource bundles.

use std::collections::BTreeMap;

use rand::Rng;
use tabula_core::Guid;
use tabula_grid::ShapeType;

use crate::light::{Light, LightSource, LightType};
use crate::sight::SightType;

// ---------------------------------------------------------------------------
// LightCatalog
// ---------------------------------------------------------------------------

/// Light sources grouped by category, looked up by id or name.
#[derive(Clone, Debug, Default)]
pub struct LightCatalog {
    groups: BTreeMap<String, Vec<LightSource>>,
}

impl LightCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source under a category. Sources within a category keep
    /// insertion order.
    pub fn insert(&mut self, group: impl Into<String>, source: LightSource) {
        self.groups.entry(group.into()).or_default().push(source);
    }

    /// Category names, sorted.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// The sources of one category.
    pub fn group(&self, name: &str) -> &[LightSource] {
        self.groups.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Find a source by id anywhere in the catalog.
    pub fn by_id(&self, id: Guid) -> Option<&LightSource> {
        self.groups
            .values()
            .flatten()
            .find(|source| source.id() == Some(id))
    }

    /// Find a source by category and name.
    pub fn by_name(&self, group: &str, name: &str) -> Option<&LightSource> {
        self.group(group)
            .iter()
            .find(|source| source.name() == Some(name))
    }

    /// Every source in every category.
    pub fn iter(&self) -> impl Iterator<Item = &LightSource> {
        self.groups.values().flatten()
    }
}

/// The stock "D20" light sources: plain circular lights of the classic
/// ranges.
pub fn standard_lights(rng: &mut impl Rng) -> LightCatalog {
    const D20: [(&str, f64); 6] = [
        ("Candle - 5", 5.0),
        ("Lamp - 15", 15.0),
        ("Torch - 20", 20.0),
        ("Everburning - 20", 20.0),
        ("Lantern, Hooded - 30", 30.0),
        ("Sunrod - 30", 30.0),
    ];
    let mut catalog = LightCatalog::new();
    for (name, radius) in D20 {
        catalog.insert(
            "D20",
            LightSource::regular(
                name,
                Guid::random(rng),
                LightType::Normal,
                false,
                vec![Light::circle(radius)],
            ),
        );
    }
    catalog
}

// ---------------------------------------------------------------------------
// SightCatalog
// ---------------------------------------------------------------------------

/// Sight types looked up by name.
#[derive(Clone, Debug, Default)]
pub struct SightCatalog {
    types: BTreeMap<String, SightType>,
}

impl SightCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sight type, keyed by its name. Replaces an existing entry of
    /// the same name.
    pub fn insert(&mut self, sight: SightType) {
        self.types.insert(sight.name().to_string(), sight);
    }

    /// Look up a sight type by name.
    pub fn get(&self, name: &str) -> Option<&SightType> {
        self.types.get(name)
    }

    /// All sight types, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &SightType> {
        self.types.values()
    }
}

/// The stock sight types.
pub fn standard_sights() -> SightCatalog {
    let mut catalog = SightCatalog::new();

    catalog.insert(SightType::normal("Normal"));

    let mut lowlight = SightType::normal("Lowlight");
    lowlight.multiplier = 2.0;
    catalog.insert(lowlight);

    let mut grid_vision = SightType::normal("Grid Vision");
    grid_vision.shape = ShapeType::Grid;
    catalog.insert(grid_vision);

    let mut square = SightType::normal("Square Vision");
    square.shape = ShapeType::Square;
    catalog.insert(square);

    let mut conic = SightType::normal("Conic Vision");
    conic.shape = ShapeType::Cone;
    conic.arc_angle = 120.0;
    catalog.insert(conic);

    let mut darkvision = SightType::normal("Darkvision");
    darkvision.personal_light = Some(LightSource::personal(true, vec![Light::circle(60.0)]));
    catalog.insert(darkvision);

    catalog
}
