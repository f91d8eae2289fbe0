//! Lights and light sources.

use tabula_area::Region;
use tabula_core::Guid;
use tabula_grid::{ShapeParams, ShapeType, TokenFootprint, Zone};

/// The token context a light or sight shape is evaluated against.
#[derive(Clone, Copy, Debug)]
pub struct Bearer<'a> {
    pub footprint: &'a TokenFootprint,
    /// Facing in degrees; cones rotate with it.
    pub facing: i32,
}

// ---------------------------------------------------------------------------
// Light
// ---------------------------------------------------------------------------

/// One illumination shape within a light source.
///
/// A plain value object: the composed area lives in the caller's
/// [`AreaCache`](crate::engine::AreaCache), keyed by what actually
/// invalidates it, never as hidden mutable state here.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Light {
    pub shape: ShapeType,
    /// Radius (or reach, for cones) in map units.
    pub radius: f64,
    /// Cone width in degrees.
    pub arc_angle: f64,
    /// Cone offset from the bearer's facing, in degrees.
    pub facing_offset: i32,
    /// Brightness; negative lumens darken instead of illuminate.
    pub lumens: i32,
    /// Visible to GMs only.
    pub gm_only: bool,
    /// Visible to the owner only.
    pub owner_only: bool,
}

impl Light {
    /// A plain circular light.
    pub fn circle(radius: f64) -> Self {
        Self {
            shape: ShapeType::Circle,
            radius,
            arc_angle: 0.0,
            facing_offset: 0,
            lumens: 100,
            gm_only: false,
            owner_only: false,
        }
    }

    /// A cone light `arc_angle` degrees wide.
    pub fn cone(radius: f64, arc_angle: f64, facing_offset: i32) -> Self {
        Self {
            shape: ShapeType::Cone,
            radius,
            arc_angle,
            facing_offset,
            lumens: 100,
            gm_only: false,
            owner_only: false,
        }
    }

    /// The world-space region this light covers, centered at the origin.
    pub fn area(&self, zone: &Zone, bearer: &Bearer<'_>, scale_with_token: bool) -> Region {
        zone.shaped_area(&ShapeParams {
            shape: self.shape,
            range: self.radius,
            arc_angle: self.arc_angle,
            offset_angle: self.facing_offset,
            scale_with_token,
            facing: bearer.facing,
            footprint: bearer.footprint,
        })
    }
}

// ---------------------------------------------------------------------------
// LightSource
// ---------------------------------------------------------------------------

/// Whether a source illuminates or merely marks an aura.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LightType {
    #[default]
    Normal,
    Aura,
}

/// An ordered list of lights attached to a token.
///
/// Catalog sources carry a name and id; personal sources (attached
/// directly to a sight type) have neither. Identity is the id: all
/// structural content is excluded from equality.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightSource {
    name: Option<String>,
    id: Option<Guid>,
    light_type: LightType,
    scale_with_token: bool,
    lights: Vec<Light>,
}

impl LightSource {
    /// A personal light source, directly attached to a sight type; it
    /// needs no name or id.
    pub fn personal(scale_with_token: bool, lights: impl Into<Vec<Light>>) -> Self {
        Self {
            name: None,
            id: None,
            light_type: LightType::Normal,
            scale_with_token,
            lights: lights.into(),
        }
    }

    /// A catalog light source, referenced by both name and id.
    pub fn regular(
        name: impl Into<String>,
        id: Guid,
        light_type: LightType,
        scale_with_token: bool,
        lights: impl Into<Vec<Light>>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            id: Some(id),
            light_type,
            scale_with_token,
            lights: lights.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> Option<Guid> {
        self.id
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn light_type(&self) -> LightType {
        self.light_type
    }

    #[inline]
    pub fn scale_with_token(&self) -> bool {
        self.scale_with_token
    }

    /// The lights, in composition order.
    #[inline]
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// The largest radius among the lights, in map units.
    pub fn max_range(&self) -> f64 {
        self.lights.iter().map(|l| l.radius).fold(0.0, f64::max)
    }

    /// The combined region of every light, centered at the origin.
    pub fn area(&self, zone: &Zone, bearer: &Bearer<'_>) -> Region {
        let mut area = Region::empty();
        for light in &self.lights {
            area = area.union(&light.area(zone, bearer, self.scale_with_token));
        }
        area
    }

    /// The region of the light at `index`, reduced by the union of every
    /// light *earlier in the list*.
    ///
    /// This ordering is what keeps overlapping ranges from stacking while
    /// still letting a later, larger light extend past an earlier one.
    /// List order is the contract; no other order enters the computation.
    pub fn light_area(&self, index: usize, zone: &Zone, bearer: &Bearer<'_>) -> Option<Region> {
        let light = self.lights.get(index)?;
        let mut area = light.area(zone, bearer, self.scale_with_token);
        for earlier in &self.lights[..index] {
            area = area.subtract(&earlier.area(zone, bearer, self.scale_with_token));
        }
        Some(area)
    }

    /// Every light's hole-punched region, in list order, paired with its
    /// light. The union of the pieces equals [`area`](Self::area) and the
    /// pieces are pairwise disjoint.
    pub fn light_areas<'s>(
        &'s self,
        zone: &Zone,
        bearer: &Bearer<'_>,
    ) -> Vec<(&'s Light, Region)> {
        let mut result = Vec::with_capacity(self.lights.len());
        let mut cumulative = Region::empty();
        for light in &self.lights {
            let shape = light.area(zone, bearer, self.scale_with_token);
            result.push((light, shape.subtract(&cumulative)));
            cumulative = cumulative.union(&shape);
        }
        result
    }
}

impl PartialEq for LightSource {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LightSource {}

impl std::hash::Hash for LightSource {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_grid::{Grid, GridKind};

    fn zone() -> Zone {
        Zone::new(Grid::new(GridKind::Square, 50, (0, 0)).unwrap())
    }

    fn medium() -> TokenFootprint {
        TokenFootprint::new(Guid::from_raw(1), "Medium", 1.0)
    }

    #[test]
    fn union_of_identical_lights_equals_single_shape() {
        let zone = zone();
        let fp = medium();
        let bearer = Bearer {
            footprint: &fp,
            facing: 0,
        };
        let one = LightSource::personal(false, vec![Light::circle(20.0)]);
        let three = LightSource::personal(
            false,
            vec![Light::circle(20.0), Light::circle(20.0), Light::circle(20.0)],
        );
        assert_eq!(one.area(&zone, &bearer), three.area(&zone, &bearer));
    }

    #[test]
    fn later_lights_only_contribute_beyond_earlier_ones() {
        let zone = zone();
        let fp = medium();
        let bearer = Bearer {
            footprint: &fp,
            facing: 0,
        };
        let source = LightSource::personal(false, vec![Light::circle(10.0), Light::circle(20.0)]);
        let pieces = source.light_areas(&zone, &bearer);
        assert_eq!(pieces.len(), 2);

        let inner = &pieces[0].1;
        let outer = &pieces[1].1;
        // The outer piece is an annulus: no pixel of it is inside the
        // inner circle.
        assert!(outer.intersect(inner).is_empty());
        // Together they cover exactly the plain union.
        assert_eq!(inner.union(outer), source.area(&zone, &bearer));
        // And the outer light does extend beyond the inner one.
        assert!(outer.area() > 0);
    }

    #[test]
    fn subtraction_follows_list_order_not_size() {
        let zone = zone();
        let fp = medium();
        let bearer = Bearer {
            footprint: &fp,
            facing: 0,
        };
        // Big light first: the small one is swallowed whole.
        let source = LightSource::personal(false, vec![Light::circle(20.0), Light::circle(10.0)]);
        let pieces = source.light_areas(&zone, &bearer);
        assert!(pieces[1].1.is_empty());
        assert_eq!(pieces[0].1, source.area(&zone, &bearer));
    }

    #[test]
    fn light_area_by_index_matches_composed_pieces() {
        let zone = zone();
        let fp = medium();
        let bearer = Bearer {
            footprint: &fp,
            facing: 0,
        };
        let source = LightSource::personal(
            false,
            vec![Light::circle(10.0), Light::circle(15.0), Light::circle(20.0)],
        );
        let pieces = source.light_areas(&zone, &bearer);
        for (i, (_, piece)) in pieces.iter().enumerate() {
            assert_eq!(source.light_area(i, &zone, &bearer).as_ref(), Some(piece));
        }
        assert!(source.light_area(3, &zone, &bearer).is_none());
    }

    #[test]
    fn composition_is_reproducible() {
        let zone = zone();
        let fp = medium();
        let bearer = Bearer {
            footprint: &fp,
            facing: 42,
        };
        let source = LightSource::personal(
            false,
            vec![Light::cone(20.0, 90.0, 0), Light::circle(5.0), Light::circle(15.0)],
        );
        let a: Vec<_> = source.light_areas(&zone, &bearer).into_iter().map(|p| p.1).collect();
        let b: Vec<_> = source.light_areas(&zone, &bearer).into_iter().map(|p| p.1).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn identity_is_by_id() {
        let a = LightSource::regular("Torch", Guid::from_raw(7), LightType::Normal, false, vec![]);
        let b = LightSource::regular("Candle", Guid::from_raw(7), LightType::Normal, false, vec![]);
        let c = LightSource::regular("Torch", Guid::from_raw(8), LightType::Normal, false, vec![]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn max_range() {
        let source = LightSource::personal(false, vec![Light::circle(5.0), Light::circle(30.0)]);
        assert_eq!(source.max_range(), 30.0);
        assert_eq!(LightSource::personal(false, vec![]).max_range(), 0.0);
    }
}
