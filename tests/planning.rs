use maze_planner::algorithms::bfs::shortest_steps;
use maze_planner::algorithms::{AStar, Dijkstra, Heuristic, PathPlanner, Route, WeightedDijkstra};
use maze_planner::generator::MazeGenerator;
use maze_planner::grid::{HazardMode, Maze, Position};
use maze_planner::hazards::{place_hazards, Selection};
use maze_planner::PlanError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_mazes(seed: u64, count: usize, rows: usize, cols: usize) -> Vec<Maze> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut generator = MazeGenerator::new(rows, cols);
    generator.link_probability = 0.7;
    generator.hazard_count = rows * cols / 8;
    generator.reward_count = 4;
    (0..count)
        .map(|_| generator.generate(&mut rng).unwrap())
        .collect()
}

fn assert_walkable(maze: &Maze, route: &Route, start: Position, goal: Position) {
    assert_eq!(route.cells.first(), Some(&start));
    assert_eq!(route.cells.last(), Some(&goal));
    for pair in route.cells.windows(2) {
        assert!(
            maze.neighbors(pair[0]).unwrap().contains(&pair[1]),
            "{:?} -> {:?} is not a link",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn generated_links_are_symmetric() {
    for maze in random_mazes(1, 20, 9, 13) {
        assert!(maze.is_symmetric());
    }
}

#[test]
fn dijkstra_matches_bfs_on_three_by_three() {
    let mut maze = Maze::open(3, 3).unwrap();
    maze.set_hazard(Position::new(1, 1), HazardMode::Block).unwrap();
    let mut planner = Dijkstra::new();

    for sr in 0..3 {
        for sc in 0..3 {
            for gr in 0..3 {
                for gc in 0..3 {
                    let start = Position::new(sr, sc);
                    let goal = Position::new(gr, gc);
                    let expected = shortest_steps(&maze, start, goal).unwrap();
                    match planner.find_path(&maze, start, goal) {
                        Ok(route) => {
                            assert_eq!(Some(route.steps()), expected);
                            assert_walkable(&maze, &route, start, goal);
                            assert!(!route.cells[1..].contains(&Position::new(1, 1)));
                        }
                        Err(PlanError::NoPathFound { .. }) => {
                            assert_eq!(expected, None);
                            assert_eq!(goal, Position::new(1, 1));
                        }
                        Err(e) => panic!("unexpected error {e}"),
                    }
                }
            }
        }
    }
}

#[test]
fn dijkstra_matches_bfs_on_random_mazes() {
    let start = Position::new(0, 0);
    let goal = Position::new(9, 11);
    let mut planner = Dijkstra::new();
    let mut found = 0;

    for maze in random_mazes(2, 30, 10, 12) {
        let expected = shortest_steps(&maze, start, goal).unwrap();
        match planner.find_path(&maze, start, goal) {
            Ok(route) => {
                found += 1;
                assert_eq!(Some(route.steps()), expected);
                assert_eq!(route.cost as usize, route.steps());
                assert_walkable(&maze, &route, start, goal);
            }
            Err(PlanError::NoPathFound { .. }) => assert_eq!(expected, None),
            Err(e) => panic!("unexpected error {e}"),
        }
    }
    assert!(found > 0);
}

#[test]
fn settled_distances_never_decrease() {
    let mut uniform = Dijkstra::new();
    let mut weighted = WeightedDijkstra::new();

    for maze in random_mazes(3, 10, 8, 8) {
        let start = Position::new(0, 0);
        let goal = Position::new(7, 7);

        for planner in [&mut uniform as &mut dyn PathPlanner, &mut weighted] {
            let _ = planner.find_path(&maze, start, goal);
            let state = planner.state();
            let popped: Vec<u64> = state
                .expanded()
                .iter()
                .map(|&idx| state.distance(idx).unwrap())
                .collect();
            assert!(!popped.is_empty());
            assert!(popped.windows(2).all(|w| w[0] <= w[1]), "{:?}", popped);
        }
    }
}

#[test]
fn disjoint_components_have_no_path() {
    let maze = Maze::new(2, 2).unwrap();
    let start = Position::new(0, 0);
    let goal = Position::new(1, 1);

    let planners: Vec<Box<dyn PathPlanner>> = vec![
        Box::new(Dijkstra::new()),
        Box::new(WeightedDijkstra::new()),
        Box::new(AStar::default()),
    ];
    for mut planner in planners {
        assert_eq!(
            planner.find_path(&maze, start, goal),
            Err(PlanError::NoPathFound { start, goal })
        );
    }
}

#[test]
fn reinjecting_hazards_changes_nothing() {
    let mut maze = Maze::open(5, 5).unwrap();
    let start = Position::new(0, 0);
    let goal = Position::new(4, 4);
    let route = Dijkstra::new().find_path(&maze, start, goal).unwrap();
    let mut rng = StdRng::seed_from_u64(4);

    let first = place_hazards(
        &mut maze,
        route.interior(),
        3,
        Selection::Prefix,
        HazardMode::Block,
        &mut rng,
    )
    .unwrap();
    let hazards = maze.hazards();
    let second = place_hazards(
        &mut maze,
        route.interior(),
        3,
        Selection::Prefix,
        HazardMode::Block,
        &mut rng,
    )
    .unwrap();

    assert_eq!(first, 3);
    assert_eq!(second, 0);
    assert_eq!(maze.hazards(), hazards);
}

#[test]
fn replanning_never_shortens_the_route() {
    let start = Position::new(2, 0);
    let goal = Position::new(2, 4);
    let mut planner = Dijkstra::new();

    for selection in [Selection::Prefix, Selection::RandomSubset] {
        for seed in 0..10 {
            let mut maze = Maze::open(5, 5).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let original = planner.find_path(&maze, start, goal).unwrap();
            assert_eq!(original.steps(), 4);

            let added = place_hazards(
                &mut maze,
                original.interior(),
                1,
                selection,
                HazardMode::Block,
                &mut rng,
            )
            .unwrap();
            assert_eq!(added, 1);

            let replanned = planner.find_path(&maze, start, goal).unwrap();
            assert!(replanned.steps() >= original.steps());
            assert!(replanned.cost >= original.cost);
            assert_walkable(&maze, &replanned, start, goal);
        }
    }
}

#[test]
fn weighted_mode_reports_reward_score() {
    let mut maze = Maze::open(1, 3).unwrap();
    maze.set_reward(Position::new(0, 1), 5).unwrap();

    let route = WeightedDijkstra::new()
        .find_path(&maze, Position::new(0, 0), Position::new(0, 2))
        .unwrap();
    assert_eq!(route.score, 5);
    assert_eq!(route.cells.len(), 3);
}

#[test]
fn zero_heuristic_a_star_matches_dijkstra() {
    let start = Position::new(0, 0);
    let goal = Position::new(7, 9);
    let mut uniform = Dijkstra::new();
    let mut guided = AStar::new(Heuristic::Zero, 1.0);

    for maze in random_mazes(5, 20, 8, 10) {
        let expected = uniform.find_path(&maze, start, goal).map(|r| r.steps());
        let actual = guided.find_path(&maze, start, goal).map(|r| r.steps());
        assert_eq!(actual, expected);
    }
}

#[test]
fn admissible_a_star_is_optimal() {
    let start = Position::new(0, 0);
    let goal = Position::new(7, 9);
    let mut planner = AStar::new(Heuristic::Manhattan, 1.0);

    for maze in random_mazes(6, 20, 8, 10) {
        let expected = shortest_steps(&maze, start, goal).unwrap();
        match planner.find_path(&maze, start, goal) {
            Ok(route) => {
                assert_eq!(Some(route.steps()), expected);
                assert_walkable(&maze, &route, start, goal);
            }
            Err(_) => assert_eq!(expected, None),
        }
    }
}

#[test]
fn overweighted_a_star_still_returns_walkable_routes() {
    let start = Position::new(0, 0);
    let goal = Position::new(7, 9);
    let mut planner = AStar::new(Heuristic::Euclidean, 4.0);

    for maze in random_mazes(7, 20, 8, 10) {
        let expected = shortest_steps(&maze, start, goal).unwrap();
        match planner.find_path(&maze, start, goal) {
            Ok(route) => {
                match expected {
                    Some(best) => assert!(route.steps() >= best),
                    None => panic!("route found on an unreachable maze: {:?}", route.cells),
                }
                assert_eq!(route.cost as usize, route.steps());
                assert_walkable(&maze, &route, start, goal);
            }
            Err(PlanError::NoPathFound { .. }) => assert_eq!(expected, None),
            Err(e) => panic!("unexpected error {e}"),
        }
    }
}

#[test]
fn route_cost_matches_cells_entered() {
    let start = Position::new(0, 0);
    let goal = Position::new(7, 9);
    let mut planner = AStar::new(Heuristic::Euclidean, 4.0);
    let mut found = 0;

    for maze in random_mazes(8, 200, 8, 10) {
        if let Ok(route) = planner.find_path(&maze, start, goal) {
            found += 1;
            assert_eq!(route.cost as usize, route.steps(), "{:?}", route.cells);
        }
    }
    assert!(found > 0);
}
