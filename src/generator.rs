use crate::error::{PlanError, Result};
use crate::grid::{Direction, HazardMode, Maze, Position};
use log::debug;
use rand::Rng;

/// Resampling budget when the end lands on the start's border.
pub const MAX_ENDPOINT_ATTEMPTS: usize = 16;

/// Builds random mazes by flipping a coin for every right and down link.
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    pub rows: usize,
    pub cols: usize,
    pub link_probability: f64,
    pub hazard_count: usize,
    pub hazard_mode: HazardMode,
    pub reward_count: usize,
    pub max_reward: u32,
}

impl MazeGenerator {
    pub fn new(rows: usize, cols: usize) -> Self {
        MazeGenerator {
            rows,
            cols,
            link_probability: 0.5,
            hazard_count: 0,
            hazard_mode: HazardMode::Block,
            reward_count: 0,
            max_reward: 10,
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Maze> {
        if !(0.0..=1.0).contains(&self.link_probability) {
            return Err(PlanError::InvalidParameter {
                name: "link probability",
                expected: "within [0, 1]",
                value: self.link_probability,
            });
        }
        let mut maze = Maze::new(self.rows, self.cols)?;

        for row in 0..self.rows {
            for col in 0..self.cols {
                let pos = Position::new(row, col);
                if col + 1 < self.cols && rng.gen_bool(self.link_probability) {
                    maze.connect(pos, Direction::Right)?;
                }
                if row + 1 < self.rows && rng.gen_bool(self.link_probability) {
                    maze.connect(pos, Direction::Down)?;
                }
            }
        }

        // Placements may repeat a cell, so the final counts can be lower
        for _ in 0..self.hazard_count {
            let pos = self.random_cell(rng);
            maze.set_hazard(pos, self.hazard_mode)?;
        }
        for _ in 0..self.reward_count {
            let pos = self.random_cell(rng);
            maze.set_reward(pos, rng.gen_range(1..=self.max_reward.max(1)))?;
        }

        debug!(
            "generated {}x{} maze with {} hazards and {} rewards",
            self.rows,
            self.cols,
            maze.hazards().len(),
            maze.rewards().len()
        );
        Ok(maze)
    }

    fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(rng.gen_range(0..self.rows), rng.gen_range(0..self.cols))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

fn side_of(pos: Position, rows: usize, cols: usize) -> Option<Side> {
    if pos.col == 0 {
        Some(Side::Left)
    } else if pos.col == cols - 1 {
        Some(Side::Right)
    } else if pos.row == 0 {
        Some(Side::Top)
    } else if pos.row == rows - 1 {
        Some(Side::Bottom)
    } else {
        None
    }
}

fn point_on<R: Rng + ?Sized>(side: Side, rows: usize, cols: usize, rng: &mut R) -> Position {
    match side {
        Side::Top => Position::new(0, rng.gen_range(1..cols - 1)),
        Side::Bottom => Position::new(rows - 1, rng.gen_range(1..cols - 1)),
        Side::Left => Position::new(rng.gen_range(1..rows - 1), 0),
        Side::Right => Position::new(rng.gen_range(1..rows - 1), cols - 1),
    }
}

/// Picks a start on the left border and an end on a different border.
///
/// Corners are never chosen. Grids smaller than 3x3 have no such cells.
pub fn select_endpoints<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<(Position, Position)> {
    if rows < 3 || cols < 3 {
        return Err(PlanError::InvalidDimensions { rows, cols });
    }

    let start = point_on(Side::Left, rows, cols, rng);
    let start_side = side_of(start, rows, cols);
    let sides = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    for _ in 0..MAX_ENDPOINT_ATTEMPTS {
        let side = sides[rng.gen_range(0..sides.len())];
        if Some(side) != start_side {
            return Ok((start, point_on(side, rows, cols, rng)));
        }
    }
    Ok((start, point_on(Side::Right, rows, cols, rng)))
}
