//! **tabula-core** — Tabletop map engine (coordinate spaces and shared value types).
//!
//! This crate provides the foundational types used across the *tabula*
//! ecosystem: the two integer coordinate spaces ([`CellPoint`] for grid
//! cells, [`ZonePoint`] for world pixels), world-space rectangles,
//! movement metrics, and the 128-bit identities used by campaign catalogs.

pub mod geom;
pub mod guid;
pub mod metric;

pub use geom::{CellPoint, Rect, ZonePoint};
pub use guid::Guid;
pub use metric::Metric;
