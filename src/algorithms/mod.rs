pub mod a_star;
pub mod bfs;
pub mod common;
pub mod dijkstra;
pub mod weighted;

pub use a_star::{AStar, Heuristic};
pub use common::{PathPlanner, Route, SearchState};
pub use dijkstra::Dijkstra;
pub use weighted::WeightedDijkstra;
