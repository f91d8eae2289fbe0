//! **tabula-light** — light and sight composition.
//!
//! Lights and sight types are shared, immutable reference data looked up
//! from campaign catalogs; this crate turns them into world-space regions
//! against a zone's grid. The interesting part is composition: a
//! [`LightSource`](light::LightSource) is an *ordered* list of lights, and
//! each light's contribution is its shape minus the union of every light
//! before it in the list — overlapping ranges never stack, while later,
//! larger lights still extend beyond earlier ones.

pub mod catalog;
pub mod engine;
pub mod light;
pub mod sight;

pub use catalog::{LightCatalog, SightCatalog};
pub use engine::{AnchorDirection, AreaCache};
pub use light::{Bearer, Light, LightSource, LightType};
pub use sight::SightType;
