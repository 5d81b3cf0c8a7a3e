use crate::error::{PlanError, Result};
use crate::grid::{Cell, Maze, Position, DEFAULT_COST};
use log::{debug, trace, warn};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Distance of a cell the search has not reached.
pub const UNREACHABLE: u64 = u64::MAX;

/// A route from start to goal, both included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub cells: Vec<Position>,
    /// Total entry cost of the cells entered along the route, priced by the
    /// planner that produced it.
    pub cost: u64,
    /// Sum of rewards over every cell entered along the route.
    pub score: u32,
    /// Number of cells the search expanded.
    pub expanded: usize,
}

impl Route {
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// The route without its first and last cell.
    pub fn interior(&self) -> &[Position] {
        if self.cells.len() <= 2 {
            &[]
        } else {
            &self.cells[1..self.cells.len() - 1]
        }
    }
}

pub trait PathPlanner {
    fn find_path(&mut self, maze: &Maze, start: Position, goal: Position) -> Result<Route>;

    fn name(&self) -> &'static str;

    /// Scratch data left behind by the most recent search.
    fn state(&self) -> &SearchState;
}

/// How a planner prices moves and orders its frontier.
pub trait CostModel {
    /// Cost of stepping into `cell`, or `None` if it may not be entered.
    fn entry_cost(&self, cell: &Cell) -> Option<u32>;

    /// Estimated remaining cost from `from` to `goal`.
    fn estimate(&self, _from: Position, _goal: Position) -> f64 {
        0.0
    }
}

/// Unit step cost that refuses blocked cells.
pub(crate) fn unit_cost(cell: &Cell) -> Option<u32> {
    (!cell.blocked).then_some(DEFAULT_COST)
}

/// Per-search scratch data, kept beside the maze rather than on its cells.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    distance: Vec<u64>,
    visited: Vec<bool>,
    score: Vec<u32>,
    expanded: Vec<usize>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets everything from the previous search.
    pub fn reset(&mut self, cell_count: usize) {
        self.distance.clear();
        self.distance.resize(cell_count, UNREACHABLE);
        self.visited.clear();
        self.visited.resize(cell_count, false);
        self.score.clear();
        self.score.resize(cell_count, 0);
        self.expanded.clear();
    }

    pub fn distance(&self, idx: usize) -> Option<u64> {
        self.distance
            .get(idx)
            .copied()
            .filter(|&d| d != UNREACHABLE)
    }

    pub fn is_visited(&self, idx: usize) -> bool {
        self.visited.get(idx).copied().unwrap_or(false)
    }

    /// Reward accumulated by the frontier entry that settled `idx`.
    pub fn score(&self, idx: usize) -> u32 {
        self.score.get(idx).copied().unwrap_or(0)
    }

    /// Arena indices in the order they were popped and settled.
    pub fn expanded(&self) -> &[usize] {
        &self.expanded
    }
}

#[derive(Clone, Copy, Debug)]
struct QueueEntry {
    priority: f64,
    seq: u64,
    idx: usize,
    g: u64,
    score: u32,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the lowest priority, oldest entry first
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority-queue relaxation from `start` until `goal` is settled or the
/// frontier runs dry, followed by the greedy walk back from `goal`.
pub(crate) fn search<M: CostModel>(
    maze: &Maze,
    state: &mut SearchState,
    model: &M,
    start: Position,
    goal: Position,
) -> Result<Route> {
    let source = maze.index(start)?;
    let target = maze.index(goal)?;

    state.reset(maze.cell_count());

    let mut frontier = BinaryHeap::new();
    let mut seq = 0u64;
    state.distance[source] = 0;
    frontier.push(QueueEntry {
        priority: model.estimate(start, goal),
        seq,
        idx: source,
        g: 0,
        score: 0,
    });

    while let Some(entry) = frontier.pop() {
        // Stale duplicate of a cell that is already settled
        if state.visited[entry.idx] {
            continue;
        }
        state.visited[entry.idx] = true;
        state.distance[entry.idx] = entry.g;
        state.score[entry.idx] = entry.score;
        state.expanded.push(entry.idx);
        trace!("settled {:?} at {}", maze.position(entry.idx), entry.g);

        if entry.idx == target {
            break;
        }

        for next in maze.linked(entry.idx) {
            if state.visited[next] {
                continue;
            }
            let cell = maze.cell_at(next);
            let Some(cost) = model.entry_cost(cell) else {
                continue;
            };
            let g = entry.g + u64::from(cost);
            if g < state.distance[next] {
                state.distance[next] = g;
                seq += 1;
                frontier.push(QueueEntry {
                    priority: g as f64 + model.estimate(maze.position(next), goal),
                    seq,
                    idx: next,
                    g,
                    score: entry.score.saturating_add(cell.reward),
                });
            }
        }
    }

    if !state.visited[target] {
        debug!(
            "no path from {:?} to {:?} after {} expansions",
            start,
            goal,
            state.expanded.len()
        );
        return Err(PlanError::NoPathFound { start, goal });
    }

    let trail = reconstruct(maze, state, model, source, target)
        .ok_or(PlanError::NoPathFound { start, goal })?;
    let (cost, score) = trail[1..].iter().fold((0u64, 0u32), |(cost, score), &idx| {
        let cell = maze.cell_at(idx);
        let entry = model.entry_cost(cell).map_or(0, u64::from);
        (cost + entry, score.saturating_add(cell.reward))
    });
    let cells: Vec<Position> = trail.iter().map(|&idx| maze.position(idx)).collect();
    debug!(
        "found {} step path from {:?} to {:?}: cost {} (settled {}), score {} (frontier {}), {} expansions",
        cells.len() - 1,
        start,
        goal,
        cost,
        state.distance[target],
        score,
        state.score[target],
        state.expanded.len()
    );

    Ok(Route {
        cells,
        cost,
        score,
        expanded: state.expanded.len(),
    })
}

/// Walks from `target` back to `source`, always stepping to the enterable
/// neighbor with the strictly smallest distance. Ties keep the first
/// neighbor in `Direction::ALL` order.
fn reconstruct<M: CostModel>(
    maze: &Maze,
    state: &SearchState,
    model: &M,
    source: usize,
    target: usize,
) -> Option<Vec<usize>> {
    let mut path = vec![target];
    let mut current = target;

    while current != source {
        let mut best: Option<(usize, u64)> = None;
        for next in maze.linked(current) {
            if next != source && model.entry_cost(maze.cell_at(next)).is_none() {
                continue;
            }
            let d = state.distance[next];
            if d != UNREACHABLE && best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((next, d));
            }
        }

        match best {
            Some((next, d)) if d < state.distance[current] => {
                path.push(next);
                current = next;
            }
            _ => {
                warn!(
                    "path reconstruction stuck at {:?}",
                    maze.position(current)
                );
                return None;
            }
        }
    }

    path.reverse();
    Some(path)
}
