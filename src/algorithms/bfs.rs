use crate::error::Result;
use crate::grid::{Maze, Position};
use pathfinding::prelude::bfs;

/// Fewest steps from `start` to `goal` avoiding blocked cells, or `None`
/// when the goal cannot be reached.
///
/// Independent of the planners; used as a reference length.
pub fn shortest_steps(maze: &Maze, start: Position, goal: Position) -> Result<Option<usize>> {
    let source = maze.index(start)?;
    let target = maze.index(goal)?;

    let path = bfs(
        &source,
        |&idx| {
            maze.linked(idx)
                .filter(|&next| !maze.cell_at(next).blocked)
                .collect::<Vec<_>>()
        },
        |&idx| idx == target,
    );
    Ok(path.map(|p| p.len() - 1))
}
