//! Sight types: what an observer can see.
//!
//! Structurally a sight type is a light — shape, range, arc — but
//! semantically it is per-observer vision rather than illumination, and it
//! may carry a personal light source that follows the observer around.

use tabula_area::Region;
use tabula_grid::{ShapeParams, ShapeType, Zone};

use crate::light::{Bearer, LightSource};

/// A vision definition, looked up by name from the campaign catalog.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SightType {
    name: String,
    pub shape: ShapeType,
    /// Sight range in map units; zero means "as far as the zone allows".
    pub distance: f64,
    /// Magnification applied to light ranges seen by this observer.
    pub multiplier: f64,
    /// Cone width in degrees.
    pub arc_angle: f64,
    /// Cone offset from the facing, in degrees.
    pub offset_angle: i32,
    pub scale_with_token: bool,
    /// Light the observer itself emits (darkvision and kin).
    pub personal_light: Option<LightSource>,
}

impl SightType {
    /// An unlimited circular sight.
    pub fn normal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: ShapeType::Circle,
            distance: 0.0,
            multiplier: 1.0,
            arc_angle: 0.0,
            offset_angle: 0,
            scale_with_token: false,
            personal_light: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The observer's vision region, centered at the origin.
    pub fn vision_area(&self, zone: &Zone, bearer: &Bearer<'_>) -> Region {
        zone.shaped_area(&ShapeParams {
            shape: self.shape,
            range: self.distance,
            arc_angle: self.arc_angle,
            offset_angle: self.offset_angle,
            scale_with_token: self.scale_with_token,
            facing: bearer.facing,
            footprint: bearer.footprint,
        })
    }

    /// What the observer's personal light illuminates, if any.
    pub fn personal_light_area(&self, zone: &Zone, bearer: &Bearer<'_>) -> Option<Region> {
        self.personal_light
            .as_ref()
            .map(|source| source.area(zone, bearer))
    }
}
