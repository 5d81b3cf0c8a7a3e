use crate::algorithms::bfs::shortest_steps;
use crate::algorithms::weighted::HAZARD_COST;
use crate::algorithms::{AStar, Dijkstra, PathPlanner, Route, WeightedDijkstra};
use crate::config::{Algorithm, Config};
use crate::error::{PlanError, Result};
use crate::generator::{select_endpoints, MazeGenerator};
use crate::grid::{HazardMode, Maze, Position};
use crate::hazards::place_hazards;
use crate::statistics::{PlanStatistics, TimingData};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashSet;
use std::time::Instant;

/// Everything a renderer needs after a successful session.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub maze: Maze,
    pub start: Position,
    pub goal: Position,
    pub original: Route,
    pub replanned: Route,
    /// Cells turned into hazards between the two searches.
    pub injected: Vec<Position>,
    pub statistics: PlanStatistics,
    pub timing: TimingData,
}

/// Generates a maze, plans across it, drops hazards on the route and
/// plans again, starting over on a fresh maze when any step fails.
pub struct PlanningSession {
    config: Config,
    rng: StdRng,
    planner: Box<dyn PathPlanner>,
}

impl PlanningSession {
    pub fn new(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let planner = Self::planner_for(&config);
        PlanningSession {
            config,
            rng,
            planner,
        }
    }

    pub fn planner_for(config: &Config) -> Box<dyn PathPlanner> {
        if config.weighted {
            return Box::new(WeightedDijkstra::new());
        }
        match config.algorithm {
            Algorithm::Dijkstra => Box::new(Dijkstra::new()),
            Algorithm::AStar => Box::new(AStar::new(config.heuristic, config.heuristic_weight)),
        }
    }

    pub fn hazard_mode(&self) -> HazardMode {
        if self.config.weighted {
            HazardMode::Weight(HAZARD_COST)
        } else {
            HazardMode::Block
        }
    }

    pub fn planner_name(&self) -> &'static str {
        self.planner.name()
    }

    pub fn run(&mut self) -> Result<SessionReport> {
        self.config.validate()?;
        let mut timing = TimingData::new();
        for attempt in 1..=self.config.max_attempts {
            if let Some(report) = self.attempt(attempt, &mut timing)? {
                return Ok(report);
            }
        }
        Err(PlanError::AttemptsExhausted(self.config.max_attempts))
    }

    /// One maze. `Ok(None)` means this maze was unusable and another should
    /// be generated.
    fn attempt(&mut self, attempt: usize, timing: &mut TimingData) -> Result<Option<SessionReport>> {
        let mut generator = MazeGenerator::new(self.config.rows, self.config.cols);
        generator.link_probability = self.config.link_probability;
        generator.hazard_count = self.config.hazard_count;
        generator.hazard_mode = self.hazard_mode();
        generator.reward_count = self.config.reward_count;

        let mut maze = generator.generate(&mut self.rng)?;
        let (start, goal) = select_endpoints(self.config.rows, self.config.cols, &mut self.rng)?;
        info!("attempt {}: planning from {:?} to {:?}", attempt, start, goal);

        let Some(original) = self.timed_find_path(&maze, start, goal, timing)? else {
            warn!("attempt {}: no path from start to goal", attempt);
            return Ok(None);
        };
        let reference_steps = shortest_steps(&maze, start, goal)?;

        let mode = self.hazard_mode();
        let before: FxHashSet<Position> = maze.hazards().into_iter().collect();
        let requested = self.config.hazards_to_inject;
        let added = place_hazards(
            &mut maze,
            original.interior(),
            requested,
            self.config.selection,
            mode,
            &mut self.rng,
        )?;
        if added < requested {
            warn!(
                "attempt {}: only {} of {} hazards landed on the route",
                attempt, added, requested
            );
            return Ok(None);
        }
        let injected: Vec<Position> = original
            .interior()
            .iter()
            .copied()
            .filter(|p| !before.contains(p) && maze.is_hazard(*p).unwrap_or(false))
            .collect();

        let Some(replanned) = self.timed_find_path(&maze, start, goal, timing)? else {
            warn!("attempt {}: no path after injecting hazards", attempt);
            return Ok(None);
        };

        let statistics = PlanStatistics {
            planner: self.planner.name(),
            attempts: attempt,
            reference_steps,
            original_steps: original.steps(),
            original_cost: original.cost,
            replanned_steps: replanned.steps(),
            replanned_cost: replanned.cost,
            hazards_requested: requested,
            hazards_injected: added,
            score: replanned.score,
            expanded: original.expanded + replanned.expanded,
        };
        info!(
            "attempt {}: route went from {} to {} steps",
            attempt, statistics.original_steps, statistics.replanned_steps
        );

        Ok(Some(SessionReport {
            maze,
            start,
            goal,
            original,
            replanned,
            injected,
            statistics,
            timing: timing.clone(),
        }))
    }

    /// Runs the planner and records how long it took. A missing path is
    /// `Ok(None)`; every other error is passed up.
    fn timed_find_path(
        &mut self,
        maze: &Maze,
        start: Position,
        goal: Position,
        timing: &mut TimingData,
    ) -> Result<Option<Route>> {
        let find_path_start = Instant::now();
        let result = self.planner.find_path(maze, start, goal);
        timing.find_path_times.push(find_path_start.elapsed());

        match result {
            Ok(route) => Ok(Some(route)),
            Err(PlanError::NoPathFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
