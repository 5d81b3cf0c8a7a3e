use clap::Parser;

use maze_planner::config::Config;
use maze_planner::session::PlanningSession;
use maze_planner::PlanError;

fn main() {
    let config = Config::parse();

    let default_filter = if config.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if !config.quiet {
        println!("Starting maze planning...");
        println!("Grid size: {}x{}", config.rows, config.cols);
        println!(
            "Hazards: {}, Rewards: {}, Injected: {}",
            config.hazard_count, config.reward_count, config.hazards_to_inject
        );
        if let Some(seed) = config.seed {
            println!("Seed: {}", seed);
        }
        println!();
    }

    let mut session = PlanningSession::new(config.clone());
    let report = match session.run() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Planning failed: {}", e);
            if matches!(e, PlanError::AttemptsExhausted(_)) {
                eprintln!("Try lowering --hazard-count or raising --link-probability");
            }
            std::process::exit(1);
        }
    };

    if !config.no_render {
        println!("Legend: S=Start, G=Goal, X=Blocked, !=Hazard, $=Reward, *=Original, o=Re-planned");
        print!(
            "{}",
            report.maze.render(
                Some(report.start),
                Some(report.goal),
                &[report.original.cells.as_slice(), report.replanned.cells.as_slice()],
            )
        );
        println!();
    }

    println!("Start: ({}, {})", report.start.row, report.start.col);
    println!("Goal: ({}, {})", report.goal.row, report.goal.col);
    println!("Injected hazards: {:?}", report.injected);

    println!("\n=== FINAL RESULTS ===");
    println!("{}", report.statistics);

    println!("=== TIMING ANALYSIS ===");
    println!("Total pathfinding calls: {}", report.timing.total_calls());
    println!(
        "Average find_path time: {:.2?}",
        report.timing.average_find_path_time()
    );
    println!(
        "Total time in find_path: {:.2?}",
        report.timing.total_find_path_time()
    );
}
