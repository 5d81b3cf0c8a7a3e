use crate::algorithms::common::{search, CostModel, PathPlanner, Route, SearchState};
use crate::error::{PlanError, Result};
use crate::grid::{Cell, Maze, Position};

/// Entry cost of a hazard cell in weighted mode.
pub const HAZARD_COST: u32 = 2;

#[derive(Clone, Copy)]
struct HazardPenalty {
    blocked_cost: u32,
}

impl CostModel for HazardPenalty {
    fn entry_cost(&self, cell: &Cell) -> Option<u32> {
        if cell.blocked {
            Some(self.blocked_cost)
        } else {
            Some(cell.traversal_cost)
        }
    }
}

/// Cost-weighted search. Hazards are crossed at a penalty instead of being
/// avoided, and rewards along the way are summed into `Route::score`.
///
/// The route is still chosen by cost alone; the score is only reported.
#[derive(Debug)]
pub struct WeightedDijkstra {
    blocked_cost: u32,
    state: SearchState,
}

impl Default for WeightedDijkstra {
    fn default() -> Self {
        WeightedDijkstra {
            blocked_cost: HAZARD_COST,
            state: SearchState::new(),
        }
    }
}

impl WeightedDijkstra {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `cost` as the entry cost of blocked cells.
    pub fn with_blocked_cost(cost: u32) -> Result<Self> {
        if cost == 0 {
            return Err(PlanError::InvalidCost(cost));
        }
        Ok(WeightedDijkstra {
            blocked_cost: cost,
            state: SearchState::new(),
        })
    }
}

impl PathPlanner for WeightedDijkstra {
    fn find_path(&mut self, maze: &Maze, start: Position, goal: Position) -> Result<Route> {
        let model = HazardPenalty {
            blocked_cost: self.blocked_cost,
        };
        search(maze, &mut self.state, &model, start, goal)
    }

    fn name(&self) -> &'static str {
        "weighted_dijkstra"
    }

    fn state(&self) -> &SearchState {
        &self.state
    }
}
