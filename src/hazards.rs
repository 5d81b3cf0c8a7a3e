use crate::error::Result;
use crate::grid::{HazardMode, Maze, Position};
use clap::ValueEnum;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;

/// Which cells of a path receive hazards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Selection {
    /// The first cells of the path, in order.
    Prefix,
    /// A uniform sample of the path's cells.
    #[default]
    RandomSubset,
}

/// Marks `count` distinct cells of `path` as hazards.
///
/// Returns how many of them were not hazards before; cells that already
/// were do not count. Fewer than `count` cells are touched when the path is
/// shorter than that. Callers that want the endpoints kept clear should pass
/// `Route::interior`.
pub fn place_hazards<R: Rng + ?Sized>(
    maze: &mut Maze,
    path: &[Position],
    count: usize,
    selection: Selection,
    mode: HazardMode,
    rng: &mut R,
) -> Result<usize> {
    let mut seen = FxHashSet::default();
    let distinct: Vec<Position> = path.iter().copied().filter(|p| seen.insert(*p)).collect();

    let chosen: Vec<Position> = match selection {
        Selection::Prefix => distinct.into_iter().take(count).collect(),
        Selection::RandomSubset => distinct.choose_multiple(rng, count).copied().collect(),
    };

    let mut added = 0;
    for pos in chosen {
        let was_hazard = maze.is_hazard(pos)?;
        maze.set_hazard(pos, mode)?;
        if !was_hazard {
            added += 1;
            debug!("placed {:?} hazard at {:?}", mode, pos);
        }
    }
    Ok(added)
}
