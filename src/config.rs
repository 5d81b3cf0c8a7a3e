use crate::algorithms::Heuristic;
use crate::error::{PlanError, Result};
use crate::hazards::Selection;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Algorithm {
    #[default]
    Dijkstra,
    AStar,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 30)]
    pub rows: usize,

    #[arg(long, default_value_t = 30)]
    pub cols: usize,

    /// Chance that the generator opens any given wall
    #[arg(long, default_value_t = 0.5)]
    pub link_probability: f64,

    /// Hazards scattered by the maze generator
    #[arg(long, default_value_t = 25)]
    pub hazard_count: usize,

    /// Rewards scattered by the maze generator
    #[arg(long, default_value_t = 5)]
    pub reward_count: usize,

    #[arg(long, value_enum, default_value_t = Algorithm::Dijkstra)]
    pub algorithm: Algorithm,

    #[arg(long, value_enum, default_value_t = Heuristic::Manhattan)]
    pub heuristic: Heuristic,

    #[arg(long, default_value_t = 1.0)]
    pub heuristic_weight: f64,

    /// Hazards dropped onto the first route before re-planning
    #[arg(long, default_value_t = 2)]
    pub hazards_to_inject: usize,

    #[arg(long, value_enum, default_value_t = Selection::RandomSubset)]
    pub selection: Selection,

    /// Cross hazards at a cost instead of avoiding them
    #[arg(long, default_value_t = false)]
    pub weighted: bool,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Mazes to try before giving up
    #[arg(long, default_value_t = 20)]
    pub max_attempts: usize,

    #[arg(long, default_value_t = false)]
    pub no_render: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config::parse_from(["maze_planner"])
    }
}

impl Config {
    /// Rejects numeric options the generator or planners cannot use.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.link_probability) {
            return Err(PlanError::InvalidParameter {
                name: "link probability",
                expected: "within [0, 1]",
                value: self.link_probability,
            });
        }
        if !self.heuristic_weight.is_finite() || self.heuristic_weight < 0.0 {
            return Err(PlanError::InvalidParameter {
                name: "heuristic weight",
                expected: "finite and non-negative",
                value: self.heuristic_weight,
            });
        }
        Ok(())
    }
}
