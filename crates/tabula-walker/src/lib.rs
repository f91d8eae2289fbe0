//! **tabula-walker** — A* path search over zone grids.
//!
//! A walker solves one movement request: start cell, goal cell, a token
//! footprint, and the zone's per-cell terrain modifiers. Each search runs
//! `Pending → Exploring → {Found | Exhausted | Cancelled}` and reports the
//! terminal state on the [`Path`] result rather than through errors — an
//! unreachable goal is an expected outcome, not a failure. Cancellation is
//! cooperative: the caller hands in a [`CancelToken`] that the search
//! polls once per node expansion.
//!
//! Searches own all their state; independent searches for different
//! tokens may run on separate workers concurrently against the same zone.

pub mod astar;
pub mod cancel;
pub mod path;
pub mod terrain;

pub use astar::AStarWalker;
pub use cancel::CancelToken;
pub use path::{Path, PathStatus, PathStep};
pub use terrain::{TerrainGrid, TerrainMap, TerrainModifier, TerrainOp};

#[cfg(feature = "serde")]
pub use path::LegacyPathRecord;
