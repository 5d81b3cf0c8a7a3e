use crate::algorithms::common::{search, unit_cost, CostModel, PathPlanner, Route, SearchState};
use crate::error::Result;
use crate::grid::{Cell, Maze, Position};
use clap::ValueEnum;

/// Distance estimate used to order the A* frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Heuristic {
    /// Always 0; A* degenerates into uniform-cost search.
    Zero,
    #[default]
    Manhattan,
    Euclidean,
}

impl Heuristic {
    pub fn estimate(self, from: Position, to: Position) -> f64 {
        match self {
            Heuristic::Zero => 0.0,
            Heuristic::Manhattan => from.manhattan(to) as f64,
            Heuristic::Euclidean => {
                let dr = from.row.abs_diff(to.row) as f64;
                let dc = from.col.abs_diff(to.col) as f64;
                dr.hypot(dc)
            }
        }
    }
}

struct Guided {
    heuristic: Heuristic,
    weight: f64,
}

impl CostModel for Guided {
    fn entry_cost(&self, cell: &Cell) -> Option<u32> {
        unit_cost(cell)
    }

    fn estimate(&self, from: Position, goal: Position) -> f64 {
        self.weight * self.heuristic.estimate(from, goal)
    }
}

/// Heuristic-guided search over unit-cost steps, avoiding blocked cells.
///
/// The frontier is ordered by `g + weight * h`. A weight above 1 makes the
/// estimate inadmissible: fewer cells get expanded and the route may be
/// longer than the shortest one.
#[derive(Debug)]
pub struct AStar {
    heuristic: Heuristic,
    weight: f64,
    state: SearchState,
}

impl Default for AStar {
    fn default() -> Self {
        AStar::new(Heuristic::default(), 1.0)
    }
}

impl AStar {
    pub fn new(heuristic: Heuristic, weight: f64) -> Self {
        AStar {
            heuristic,
            weight,
            state: SearchState::new(),
        }
    }
}

impl PathPlanner for AStar {
    fn find_path(&mut self, maze: &Maze, start: Position, goal: Position) -> Result<Route> {
        let model = Guided {
            heuristic: self.heuristic,
            weight: self.weight,
        };
        search(maze, &mut self.state, &model, start, goal)
    }

    fn name(&self) -> &'static str {
        "a_star"
    }

    fn state(&self) -> &SearchState {
        &self.state
    }
}
