//! The A* solver.

use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

use tabula_core::{CellPoint, Metric};
use tabula_grid::{TokenFootprint, Zone};

use crate::cancel::CancelToken;
use crate::path::{Path, PathStatus, PathStep};
use crate::terrain::{TerrainMap, TerrainModifier, TerrainOp};

/// Search node identity: the cell plus the 1-2-1 parity bit. The same
/// cell reached on an odd diagonal step has different costs ahead of it
/// than one reached on an even step, so the two are distinct nodes.
type NodeKey = (CellPoint, bool);

struct Node {
    g: f64,
    raw: f64,
    parent: Option<NodeKey>,
    closed: bool,
}

/// Heap entry ordered by lowest f, then lowest h (prefer nodes closer to
/// the goal), then insertion order — fully deterministic tie-breaking.
struct HeapEntry {
    f: f64,
    h: f64,
    seq: u64,
    key: NodeKey,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed so the max-heap pops the smallest entry.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// How one edge is priced.
#[derive(Clone, Copy)]
enum StepCost {
    /// Raw and weighted tracks both advance by this many cells.
    Uniform(f64),
    /// The 1-2-1 diagonal: raw advances 1.5, weighted alternates 1 and 2
    /// with the node's parity bit.
    Alternating,
}

/// One movement solver bound to a zone and a token footprint.
///
/// A search runs `Pending → Exploring → {Found | Exhausted | Cancelled}`;
/// [`walk`](Self::walk) performs the whole run and reports the terminal
/// state on the returned [`Path`]. The walker holds no mutable state
/// between calls, so independent searches can run on separate workers
/// against the same zone.
pub struct AStarWalker<'a> {
    zone: &'a Zone,
    footprint: &'a TokenFootprint,
    metric: Metric,
    ignored_ops: Vec<TerrainOp>,
}

impl<'a> AStarWalker<'a> {
    /// A walker with the default movement metric and no ignored terrain.
    pub fn new(zone: &'a Zone, footprint: &'a TokenFootprint) -> Self {
        Self {
            zone,
            footprint,
            metric: Metric::default(),
            ignored_ops: Vec::new(),
        }
    }

    /// Use a specific movement metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Skip a class of terrain modifiers entirely (flying tokens ignore
    /// `Multiply`, incorporeal ones ignore `Block`, and so on).
    pub fn ignore_op(mut self, op: TerrainOp) -> Self {
        self.ignored_ops.push(op);
        self
    }

    /// Solve a single movement request.
    ///
    /// Expected negative outcomes are statuses, not errors: an
    /// unreachable goal or a blocked endpoint comes back `Exhausted`
    /// (blocked endpoints without expanding a single node), a tripped
    /// `cancel` token comes back `Cancelled`. The heuristic is the grid's
    /// own distance, which is admissible as long as terrain multipliers
    /// stay ≥ 1 — that precondition is the caller's to uphold.
    pub fn walk(
        &self,
        start: CellPoint,
        goal: CellPoint,
        terrain: &impl TerrainMap,
        cancel: &CancelToken,
    ) -> Path {
        let started = Instant::now();
        let grid = self.zone.grid();
        if !grid.capabilities().is_pathing_supported() {
            log::debug!("no pathing on a {} grid", grid.kind());
            return Path::terminal(PathStatus::Exhausted);
        }

        let mut modbuf: Vec<TerrainModifier> = Vec::new();
        if self.footprint_blocked(start, terrain, &mut modbuf)
            || self.footprint_blocked(goal, terrain, &mut modbuf)
        {
            return Path::terminal(PathStatus::Exhausted);
        }

        let (win_min, win_max) = self.search_window(start, goal, terrain);

        let mut nodes: HashMap<NodeKey, Node> = HashMap::new();
        let mut open: BinaryHeap<HeapEntry> = BinaryHeap::new();
        let mut seq: u64 = 0;

        let start_key = (start, false);
        nodes.insert(
            start_key,
            Node {
                g: 0.0,
                raw: 0.0,
                parent: None,
                closed: false,
            },
        );
        let h0 = grid.distance(start, goal, self.metric);
        open.push(HeapEntry {
            f: h0,
            h: h0,
            seq,
            key: start_key,
        });

        let mut nbuf: Vec<CellPoint> = Vec::with_capacity(8);
        let mut found: Option<NodeKey> = None;

        while let Some(entry) = open.pop() {
            // Cooperative cancellation, polled once per expansion.
            if cancel.is_cancelled() {
                return Path::terminal(PathStatus::Cancelled);
            }

            let key = entry.key;
            let Some(node) = nodes.get_mut(&key) else {
                continue;
            };
            if node.closed {
                continue;
            }
            node.closed = true;
            let (cur_g, cur_raw) = (node.g, node.raw);

            if key.0 == goal {
                found = Some(key);
                break;
            }

            nbuf.clear();
            grid.neighbors(key.0, self.metric, &mut nbuf);

            for &ncell in &nbuf {
                if ncell.x < win_min.x
                    || ncell.x > win_max.x
                    || ncell.y < win_min.y
                    || ncell.y > win_max.y
                {
                    continue;
                }
                if self.footprint_blocked(ncell, terrain, &mut modbuf) {
                    continue;
                }

                // Terrain at the neighbor's anchor cell.
                modbuf.clear();
                terrain.modifiers(ncell, &mut modbuf);
                let mut multiplier = 0.0;
                let mut adder = 0.0;
                let mut free = false;
                for m in &modbuf {
                    if self.ignored_ops.contains(&m.op) {
                        continue;
                    }
                    match m.op {
                        TerrainOp::Multiply => multiplier += m.value,
                        TerrainOp::Add => adder += m.value,
                        TerrainOp::Free => free = true,
                        TerrainOp::Block => {}
                    }
                }
                if multiplier == 0.0 {
                    multiplier = 1.0;
                }
                // Net-negative multipliers would corrupt the frontier.
                multiplier = multiplier.abs();
                adder /= self.zone.units_per_cell();

                let step = ncell - key.0;
                let cost = self.step_cost(step);
                let (parity_flips, raw_add) = match cost {
                    StepCost::Uniform(cells) => (false, cells),
                    StepCost::Alternating => (true, 1.5),
                };
                let nparity = key.1 ^ parity_flips;
                let (tentative_g, tentative_raw) = if free {
                    (cur_g, cur_raw)
                } else {
                    let weighted = match cost {
                        StepCost::Uniform(cells) => adder + multiplier * cells,
                        // Odd steps are the cheap half of the alternation.
                        StepCost::Alternating => {
                            adder + multiplier * if nparity { 1.0 } else { 2.0 }
                        }
                    };
                    (cur_g + weighted, cur_raw + raw_add)
                };

                let nkey = (ncell, nparity);
                match nodes.get_mut(&nkey) {
                    Some(node) if node.closed || node.g <= tentative_g => continue,
                    Some(node) => {
                        node.g = tentative_g;
                        node.raw = tentative_raw;
                        node.parent = Some(key);
                    }
                    None => {
                        nodes.insert(
                            nkey,
                            Node {
                                g: tentative_g,
                                raw: tentative_raw,
                                parent: Some(key),
                                closed: false,
                            },
                        );
                    }
                }
                let h = grid.distance(ncell, goal, self.metric);
                seq += 1;
                open.push(HeapEntry {
                    f: tentative_g + h,
                    h,
                    seq,
                    key: nkey,
                });
            }
        }

        let elapsed = started.elapsed();
        if elapsed.as_millis() > 500 {
            log::debug!(
                "slow A* solve: {} -> {} took {}ms",
                start,
                goal,
                elapsed.as_millis()
            );
        }

        let Some(goal_key) = found else {
            return Path::terminal(PathStatus::Exhausted);
        };

        // Walk the parent chain back to the start.
        let mut steps = Vec::new();
        let mut cursor = Some(goal_key);
        while let Some(key) = cursor {
            let node = &nodes[&key];
            steps.push(PathStep {
                cell: key.0,
                distance: node.g,
                distance_without_terrain: node.raw,
            });
            cursor = node.parent;
        }
        steps.reverse();
        Path::new(steps, PathStatus::Found)
    }

    /// Whether any cell the footprint would occupy at `anchor` is blocked.
    fn footprint_blocked(
        &self,
        anchor: CellPoint,
        terrain: &impl TerrainMap,
        buf: &mut Vec<TerrainModifier>,
    ) -> bool {
        if self.ignored_ops.contains(&TerrainOp::Block) {
            return false;
        }
        for cell in self.footprint.occupied_cells(anchor) {
            buf.clear();
            terrain.modifiers(cell, buf);
            if buf.iter().any(|m| m.op == TerrainOp::Block) {
                return true;
            }
        }
        false
    }

    fn step_cost(&self, step: CellPoint) -> StepCost {
        let grid = self.zone.grid();
        if grid.is_hex() {
            return StepCost::Uniform(1.0);
        }
        let diagonal = step.x != 0 && step.y != 0;
        if !diagonal {
            return StepCost::Uniform(1.0);
        }
        if grid.is_isometric() {
            // Euclidean pricing keeps the isometric heuristic admissible.
            return StepCost::Uniform(std::f64::consts::SQRT_2);
        }
        match self.metric {
            Metric::OneTwoOne => StepCost::Alternating,
            _ => StepCost::Uniform(1.0),
        }
    }

    /// The cell window the search may explore: endpoints and all terrain,
    /// grown so a token can route around the outside of any obstacle.
    fn search_window(
        &self,
        start: CellPoint,
        goal: CellPoint,
        terrain: &impl TerrainMap,
    ) -> (CellPoint, CellPoint) {
        let grid = self.zone.grid();
        let mut min = CellPoint::new(start.x.min(goal.x), start.y.min(goal.y));
        let mut max = CellPoint::new(start.x.max(goal.x), start.y.max(goal.y));
        if let Some((tmin, tmax)) = terrain.bounds() {
            min.x = min.x.min(tmin.x);
            min.y = min.y.min(tmin.y);
            max.x = max.x.max(tmax.x);
            max.y = max.y.max(tmax.y);
        }
        let fp = self.footprint.bounds(grid, None);
        let cells_w = (fp.width / grid.size()).max(1);
        let cells_h = (fp.height / grid.size()).max(1);
        let margin = 2 * cells_w.max(cells_h);
        (
            CellPoint::new(min.x - margin, min.y - margin),
            CellPoint::new(max.x + margin, max.y + margin),
        )
    }
}
