use crate::algorithms::common::{search, unit_cost, CostModel, PathPlanner, Route, SearchState};
use crate::error::Result;
use crate::grid::{Cell, Maze, Position};

struct UnitCost;

impl CostModel for UnitCost {
    fn entry_cost(&self, cell: &Cell) -> Option<u32> {
        unit_cost(cell)
    }
}

/// Uniform-cost search: every step costs 1 and blocked cells are never
/// entered.
#[derive(Debug, Default)]
pub struct Dijkstra {
    state: SearchState,
}

impl Dijkstra {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PathPlanner for Dijkstra {
    fn find_path(&mut self, maze: &Maze, start: Position, goal: Position) -> Result<Route> {
        search(maze, &mut self.state, &UnitCost, start, goal)
    }

    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn state(&self) -> &SearchState {
        &self.state
    }
}
