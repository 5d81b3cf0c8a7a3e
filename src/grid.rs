use crate::error::{PlanError, Result};
use rustc_hash::FxHashSet;
use std::fmt::Write;

/// Entry cost of an ordinary cell.
pub const DEFAULT_COST: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    pub fn manhattan(&self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// The four link slots of a cell.
///
/// `ALL` is also the order in which neighbors are visited and in which
/// ties are broken while tracing a path back from the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// How `Maze::set_hazard` marks a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardMode {
    /// Impassable for the unit-cost planners.
    Block,
    /// Passable, but entering the cell costs the given amount.
    Weight(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    links: [Option<usize>; 4],
    pub blocked: bool,
    pub traversal_cost: u32,
    pub reward: u32,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            links: [None; 4],
            blocked: false,
            traversal_cost: DEFAULT_COST,
            reward: 0,
        }
    }
}

impl Cell {
    /// Arena index of the neighbor linked in `dir`, if the wall is open.
    pub fn link(&self, dir: Direction) -> Option<usize> {
        self.links[dir.slot()]
    }

    pub fn is_hazard(&self) -> bool {
        self.blocked || self.traversal_cost > DEFAULT_COST
    }
}

/// A `rows x cols` grid of cells stored in a flat arena.
///
/// Links between cells are arena indices and are always kept as symmetric
/// pairs: if A links right to B then B links left to A.
#[derive(Debug, Clone)]
pub struct Maze {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Maze {
    /// Creates a grid where every wall is closed.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(PlanError::InvalidDimensions { rows, cols });
        }
        Ok(Maze {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
        })
    }

    /// Creates a grid where every pair of adjacent cells is linked.
    pub fn open(rows: usize, cols: usize) -> Result<Self> {
        let mut maze = Maze::new(rows, cols)?;
        for row in 0..rows {
            for col in 0..cols {
                let pos = Position::new(row, col);
                if col + 1 < cols {
                    maze.connect(pos, Direction::Right)?;
                }
                if row + 1 < rows {
                    maze.connect(pos, Direction::Down)?;
                }
            }
        }
        Ok(maze)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn index(&self, pos: Position) -> Result<usize> {
        if !self.contains(pos) {
            return Err(PlanError::InvalidCell {
                row: pos.row,
                col: pos.col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(pos.row * self.cols + pos.col)
    }

    pub fn position(&self, idx: usize) -> Position {
        Position::new(idx / self.cols, idx % self.cols)
    }

    pub fn cell(&self, pos: Position) -> Result<&Cell> {
        let idx = self.index(pos)?;
        Ok(&self.cells[idx])
    }

    pub(crate) fn cell_at(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// Grid coordinates one step from `pos` in `dir`, ignoring walls.
    fn step(&self, pos: Position, dir: Direction) -> Option<Position> {
        let next = match dir {
            Direction::Left => Position::new(pos.row, pos.col.checked_sub(1)?),
            Direction::Right => Position::new(pos.row, pos.col + 1),
            Direction::Up => Position::new(pos.row.checked_sub(1)?, pos.col),
            Direction::Down => Position::new(pos.row + 1, pos.col),
        };
        self.contains(next).then_some(next)
    }

    fn endpoints(&self, pos: Position, dir: Direction) -> Result<(usize, usize)> {
        let a = self.index(pos)?;
        let next = self
            .step(pos, dir)
            .ok_or(PlanError::OffGrid(pos, dir.name()))?;
        Ok((a, self.index(next)?))
    }

    /// Opens the wall between `pos` and its grid neighbor in `dir`.
    pub fn connect(&mut self, pos: Position, dir: Direction) -> Result<()> {
        let (a, b) = self.endpoints(pos, dir)?;
        self.cells[a].links[dir.slot()] = Some(b);
        self.cells[b].links[dir.opposite().slot()] = Some(a);
        Ok(())
    }

    /// Closes the wall between `pos` and its grid neighbor in `dir`.
    pub fn disconnect(&mut self, pos: Position, dir: Direction) -> Result<()> {
        let (a, b) = self.endpoints(pos, dir)?;
        self.cells[a].links[dir.slot()] = None;
        self.cells[b].links[dir.opposite().slot()] = None;
        Ok(())
    }

    pub(crate) fn linked(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        let cell = &self.cells[idx];
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| cell.link(dir))
    }

    /// Linked neighbors of `pos` in `Direction::ALL` order.
    pub fn neighbors(&self, pos: Position) -> Result<Vec<Position>> {
        let idx = self.index(pos)?;
        Ok(self.linked(idx).map(|n| self.position(n)).collect())
    }

    /// Marks `pos` as a hazard. Returns whether the cell changed.
    ///
    /// A weight only ever raises the traversal cost; a cell already costlier
    /// than `cost` is left alone. Weights that would not make the cell a
    /// hazard are rejected.
    pub fn set_hazard(&mut self, pos: Position, mode: HazardMode) -> Result<bool> {
        let idx = self.index(pos)?;
        let cell = &mut self.cells[idx];
        match mode {
            HazardMode::Block => {
                let changed = !cell.blocked;
                cell.blocked = true;
                Ok(changed)
            }
            HazardMode::Weight(cost) if cost <= DEFAULT_COST => Err(PlanError::InvalidCost(cost)),
            HazardMode::Weight(cost) => {
                let raised = cell.traversal_cost.max(cost);
                let changed = raised != cell.traversal_cost;
                cell.traversal_cost = raised;
                Ok(changed)
            }
        }
    }

    pub fn is_hazard(&self, pos: Position) -> Result<bool> {
        Ok(self.cell(pos)?.is_hazard())
    }

    pub fn set_reward(&mut self, pos: Position, value: u32) -> Result<()> {
        let idx = self.index(pos)?;
        self.cells[idx].reward = value;
        Ok(())
    }

    pub fn hazards(&self) -> Vec<Position> {
        (0..self.cells.len())
            .filter(|&idx| self.cells[idx].is_hazard())
            .map(|idx| self.position(idx))
            .collect()
    }

    pub fn rewards(&self) -> Vec<(Position, u32)> {
        (0..self.cells.len())
            .filter(|&idx| self.cells[idx].reward > 0)
            .map(|idx| (self.position(idx), self.cells[idx].reward))
            .collect()
    }

    /// Checks that every link is paired, never loops back to its own cell
    /// and only joins grid-adjacent cells.
    pub fn is_symmetric(&self) -> bool {
        (0..self.cells.len()).all(|idx| {
            let pos = self.position(idx);
            Direction::ALL.iter().all(|&dir| match self.cells[idx].link(dir) {
                None => true,
                Some(other) => {
                    other != idx
                        && self.step(pos, dir) == Some(self.position(other))
                        && self.cells[other].link(dir.opposite()) == Some(idx)
                }
            })
        })
    }

    /// Draws walls, hazards, rewards and routes as text.
    ///
    /// Legend: S=start, G=goal, X=blocked, *=first route, o=second route,
    /// !=weighted hazard, $=reward.
    pub fn render(
        &self,
        start: Option<Position>,
        goal: Option<Position>,
        routes: &[&[Position]],
    ) -> String {
        let on_route: Vec<FxHashSet<Position>> = routes
            .iter()
            .map(|route| route.iter().copied().collect())
            .collect();

        let mut out = String::new();
        out.push('+');
        for _ in 0..self.cols {
            out.push_str("-+");
        }
        out.push('\n');

        for row in 0..self.rows {
            out.push('|');
            for col in 0..self.cols {
                let pos = Position::new(row, col);
                let cell = &self.cells[row * self.cols + col];
                let glyph = if Some(pos) == start {
                    'S'
                } else if Some(pos) == goal {
                    'G'
                } else if cell.blocked {
                    'X'
                } else if on_route.get(1).is_some_and(|r| r.contains(&pos)) {
                    'o'
                } else if on_route.first().is_some_and(|r| r.contains(&pos)) {
                    '*'
                } else if cell.is_hazard() {
                    '!'
                } else if cell.reward > 0 {
                    '$'
                } else {
                    ' '
                };
                out.push(glyph);
                out.push(if cell.link(Direction::Right).is_some() { ' ' } else { '|' });
            }
            out.push('\n');

            out.push('+');
            for col in 0..self.cols {
                let cell = &self.cells[row * self.cols + col];
                out.push(if cell.link(Direction::Down).is_some() { ' ' } else { '-' });
                out.push('+');
            }
            out.push('\n');
        }

        let _ = writeln!(
            out,
            "{} hazards, {} rewards",
            self.hazards().len(),
            self.rewards().len()
        );
        out
    }
}
