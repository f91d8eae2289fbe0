//! **tabula-area** — 2D boolean region algebra for vision and light.
//!
//! A [`Region`] is an exact, canonical set of world-space pixels stored as
//! sorted y-bands of disjoint x-spans. Union, subtraction and intersection
//! are exact set algebra, so composing light and vision shapes is
//! deterministic: the same inputs produce the same region, bit for bit.
//!
//! The [`poly`] module synthesizes the shapes those compositions start
//! from — line-segment ellipses, cone pies, hexes — by even-odd scanline
//! rasterization of f64 polygons.

pub mod poly;
pub mod region;

pub use region::{Region, Span};
