//! Path results and the legacy saved-path shim.

use tabula_core::CellPoint;

/// How a search ended.
///
/// `Exhausted` covers every "no path found" case — unreachable goals and
/// blocked endpoints alike. It is an expected outcome; callers branch on
/// the status, never on an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathStatus {
    /// The goal was reached; the steps are the full path.
    Found,
    /// The search space was used up without reaching the goal.
    Exhausted,
    /// The cancellation token tripped mid-search. Survives serialization,
    /// so stale in-flight state recovered from a saved session still
    /// reads as cancelled.
    Cancelled,
}

/// One cell along a path, with both distance accumulators at the moment
/// the solver reached it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathStep {
    pub cell: CellPoint,
    /// Distance traveled in cells, terrain multipliers included.
    pub distance: f64,
    /// The same walk ignoring terrain: pure topological distance.
    pub distance_without_terrain: f64,
}

/// An ordered walk from start to goal, inclusive, plus its terminal
/// status and the caller's waypoints.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    steps: Vec<PathStep>,
    status: PathStatus,
    waypoints: Vec<CellPoint>,
}

impl Path {
    pub(crate) fn new(steps: Vec<PathStep>, status: PathStatus) -> Self {
        Self {
            steps,
            status,
            waypoints: Vec::new(),
        }
    }

    /// An empty result with the given terminal status.
    pub(crate) fn terminal(status: PathStatus) -> Self {
        Self::new(Vec::new(), status)
    }

    /// The terminal status.
    #[inline]
    pub fn status(&self) -> PathStatus {
        self.status
    }

    /// Whether the goal was reached.
    #[inline]
    pub fn is_found(&self) -> bool {
        self.status == PathStatus::Found
    }

    /// The steps, start to goal inclusive. Empty unless `Found`.
    #[inline]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// The cells alone, in walk order.
    pub fn cells(&self) -> impl Iterator<Item = CellPoint> + '_ {
        self.steps.iter().map(|s| s.cell)
    }

    /// Total terrain-weighted distance in cells; zero when nothing was
    /// walked.
    pub fn distance(&self) -> f64 {
        self.steps.last().map_or(0.0, |s| s.distance)
    }

    /// Total distance ignoring terrain.
    pub fn distance_without_terrain(&self) -> f64 {
        self.steps.last().map_or(0.0, |s| s.distance_without_terrain)
    }

    // -----------------------------------------------------------------------
    // Waypoints
    // -----------------------------------------------------------------------

    /// Mark a cell as a waypoint.
    pub fn add_waypoint(&mut self, cell: CellPoint) {
        self.waypoints.push(cell);
    }

    /// Whether a cell was marked as a waypoint.
    pub fn is_waypoint(&self, cell: CellPoint) -> bool {
        self.waypoints.contains(&cell)
    }

    /// The most recently added waypoint.
    pub fn last_waypoint(&self) -> Option<CellPoint> {
        self.waypoints.last().copied()
    }

    /// The last waypoint if any, otherwise the last path cell.
    pub fn last_junction(&self) -> Option<CellPoint> {
        self.last_waypoint()
            .or_else(|| self.steps.last().map(|s| s.cell))
    }
}

// ---------------------------------------------------------------------------
// Legacy saved paths
// ---------------------------------------------------------------------------

/// One record of a saved path from older sessions.
///
/// Historically the saved cells were search nodes, so records carry
/// whatever search state was live at save time — distance accumulators, a
/// cancellation mark, parity bits. Only the positional fields matter here;
/// everything unrecognized is discarded on read.
#[cfg(feature = "serde")]
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LegacyPathRecord {
    pub x: Option<i32>,
    pub y: Option<i32>,
    #[serde(alias = "aStarCanceled")]
    pub a_star_canceled: bool,
}

#[cfg(feature = "serde")]
impl LegacyPathRecord {
    /// The position, if the record still has one.
    pub fn position(&self) -> Option<CellPoint> {
        Some(CellPoint::new(self.x?, self.y?))
    }
}

#[cfg(feature = "serde")]
impl Path {
    /// Rebuild a path from legacy records.
    ///
    /// Distance accumulators are not trusted from old data and reset to
    /// zero. A record without a usable position poisons the whole list —
    /// the path is meaningless with a hole in it — and yields `None`
    /// ("no usable legacy data"), never an error. An empty list is no
    /// data either.
    pub fn from_legacy(records: &[LegacyPathRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let mut steps = Vec::with_capacity(records.len());
        let mut cancelled = false;
        for record in records {
            let cell = record.position()?;
            cancelled |= record.a_star_canceled;
            steps.push(PathStep {
                cell,
                distance: 0.0,
                distance_without_terrain: 0.0,
            });
        }
        let status = if cancelled {
            PathStatus::Cancelled
        } else {
            PathStatus::Found
        };
        Some(Self::new(steps, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(x: i32, y: i32, d: f64) -> PathStep {
        PathStep {
            cell: CellPoint::new(x, y),
            distance: d,
            distance_without_terrain: d,
        }
    }

    #[test]
    fn distances_read_from_last_step() {
        let path = Path::new(vec![step(0, 0, 0.0), step(1, 0, 1.0), step(2, 0, 2.0)], PathStatus::Found);
        assert_eq!(path.distance(), 2.0);
        assert_eq!(path.cells().count(), 3);
        assert!(path.is_found());
    }

    #[test]
    fn empty_path_has_zero_distance() {
        let path = Path::terminal(PathStatus::Exhausted);
        assert_eq!(path.distance(), 0.0);
        assert_eq!(path.distance_without_terrain(), 0.0);
        assert!(!path.is_found());
    }

    #[test]
    fn waypoints() {
        let mut path = Path::new(vec![step(0, 0, 0.0), step(1, 0, 1.0)], PathStatus::Found);
        assert_eq!(path.last_junction(), Some(CellPoint::new(1, 0)));
        assert!(path.last_waypoint().is_none());

        path.add_waypoint(CellPoint::new(1, 0));
        assert!(path.is_waypoint(CellPoint::new(1, 0)));
        assert!(!path.is_waypoint(CellPoint::new(0, 0)));
        assert_eq!(path.last_waypoint(), Some(CellPoint::new(1, 0)));
        assert_eq!(path.last_junction(), Some(CellPoint::new(1, 0)));
    }
}
