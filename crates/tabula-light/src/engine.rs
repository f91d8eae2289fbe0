//! Anchoring and memoization for composed areas.

use std::collections::HashMap;

use tabula_area::Region;
use tabula_core::{CellPoint, Guid, Rect};
use tabula_grid::Zone;

use crate::light::{Bearer, LightSource};

// ---------------------------------------------------------------------------
// AnchorDirection
// ---------------------------------------------------------------------------

/// Where on a token's footprint a shape is anchored: one of the eight
/// compass points, or the center.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnchorDirection {
    #[default]
    Center,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl AnchorDirection {
    /// Pixel offset from the footprint-bounds center to this anchor,
    /// a fixed half-width/half-height per axis.
    pub fn offset(self, bounds: Rect) -> (i32, i32) {
        let hw = bounds.width / 2;
        let hh = bounds.height / 2;
        match self {
            Self::Center => (0, 0),
            Self::North => (0, -hh),
            Self::NorthEast => (hw, -hh),
            Self::East => (hw, 0),
            Self::SouthEast => (hw, hh),
            Self::South => (0, hh),
            Self::SouthWest => (-hw, hh),
            Self::West => (-hw, 0),
            Self::NorthWest => (-hw, -hh),
        }
    }

    /// Translate an origin-centered region to this anchor of the given
    /// footprint bounds.
    pub fn apply(self, region: &Region, bounds: Rect) -> Region {
        let (dx, dy) = self.offset(bounds);
        if dx == 0 && dy == 0 {
            return region.clone();
        }
        region.translate(dx, dy)
    }
}

// ---------------------------------------------------------------------------
// AreaCache
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    source: Option<Guid>,
    footprint: Guid,
    anchor: CellPoint,
    facing: i32,
}

/// Explicit memoization for composed light-source areas.
///
/// Composition is a pure function of (source, footprint, facing, anchor,
/// grid size), so results can be cached keyed by exactly that tuple. Grid
/// size is the only external invalidation trigger: the cache drops
/// everything when it observes a different size. Each renderer of a zone
/// owns its own cache.
#[derive(Debug, Default)]
pub struct AreaCache {
    grid_size: i32,
    entries: HashMap<CacheKey, Region>,
}

impl AreaCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached areas.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached area.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The composed area of `source` borne at `anchor`, translated to the
    /// anchor cell's footprint bounds. Computed once per key, then served
    /// from cache until the grid size changes.
    pub fn source_area(
        &mut self,
        zone: &Zone,
        source: &LightSource,
        bearer: &Bearer<'_>,
        anchor: CellPoint,
    ) -> Region {
        let size = zone.grid().size();
        if size != self.grid_size {
            if !self.entries.is_empty() {
                log::debug!(
                    "grid size changed to {size}; dropping {} cached areas",
                    self.entries.len()
                );
            }
            self.entries.clear();
            self.grid_size = size;
        }
        let key = CacheKey {
            source: source.id(),
            footprint: bearer.footprint.id(),
            anchor,
            facing: bearer.facing,
        };
        if let Some(hit) = self.entries.get(&key) {
            return hit.clone();
        }
        let bounds = bearer.footprint.bounds(zone.grid(), Some(anchor));
        let (cx, cy) = bounds.center();
        let area = source
            .area(zone, bearer)
            .translate(cx.round() as i32, cy.round() as i32);
        self.entries.insert(key, area.clone());
        area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::Light;
    use tabula_core::ZonePoint;
    use tabula_grid::{Grid, GridKind, TokenFootprint};

    fn zone() -> Zone {
        Zone::new(Grid::new(GridKind::Square, 50, (0, 0)).unwrap())
    }

    fn medium() -> TokenFootprint {
        TokenFootprint::new(Guid::from_raw(1), "Medium", 1.0)
    }

    #[test]
    fn anchor_offsets_are_half_extents() {
        let b = Rect::new(0, 0, 100, 50);
        assert_eq!(AnchorDirection::Center.offset(b), (0, 0));
        assert_eq!(AnchorDirection::North.offset(b), (0, -25));
        assert_eq!(AnchorDirection::SouthWest.offset(b), (-50, 25));
        assert_eq!(AnchorDirection::East.offset(b), (50, 0));
    }

    #[test]
    fn apply_translates_region() {
        let region = Region::from_rect(Rect::new(-10, -10, 20, 20));
        let bounds = Rect::new(0, 0, 50, 50);
        let moved = AnchorDirection::NorthWest.apply(&region, bounds);
        assert!(moved.contains(ZonePoint::new(-30, -30)));
        assert_eq!(moved.area(), region.area());
        assert_eq!(AnchorDirection::Center.apply(&region, bounds), region);
    }

    #[test]
    fn cache_hits_and_size_invalidation() {
        let mut zone = zone();
        let fp = medium();
        let bearer = Bearer {
            footprint: &fp,
            facing: 0,
        };
        let source = LightSource::regular(
            "Torch",
            Guid::from_raw(9),
            crate::light::LightType::Normal,
            false,
            vec![Light::circle(20.0)],
        );

        let mut cache = AreaCache::new();
        let anchor = CellPoint::new(2, 3);
        let first = cache.source_area(&zone, &source, &bearer, anchor);
        assert_eq!(cache.len(), 1);
        let second = cache.source_area(&zone, &source, &bearer, anchor);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        // Different anchor: a new entry.
        cache.source_area(&zone, &source, &bearer, CellPoint::new(4, 4));
        assert_eq!(cache.len(), 2);

        // Grid resize invalidates everything.
        zone.grid_mut().set_size(100).unwrap();
        cache.source_area(&zone, &source, &bearer, anchor);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cached_area_is_anchored_at_the_cell() {
        let zone = zone();
        let fp = medium();
        let bearer = Bearer {
            footprint: &fp,
            facing: 0,
        };
        let source = LightSource::personal(false, vec![Light::circle(20.0)]);
        let mut cache = AreaCache::new();
        // Cell (2,3) bounds center is (125, 175); a 200 px light reaches
        // well around it.
        let area = cache.source_area(&zone, &source, &bearer, CellPoint::new(2, 3));
        assert!(area.contains(ZonePoint::new(125, 175)));
        assert!(area.contains(ZonePoint::new(300, 175)));
        assert!(!area.contains(ZonePoint::new(350, 175)));
    }
}
