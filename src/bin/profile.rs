use std::time::{Duration, Instant};

use clap::Parser;
use mazetrail::{
    Direction, MazeConfig, MazeSession, TraceSearch, generators::get_rng, logging,
};
use rand::Rng;

/// Headless run: generate mazes, random-walk an agent through each, then search
/// the trace. Reports timings.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of generate + walk + search cycles
    #[arg(long, default_value_t = 100)]
    iterations: u64,

    /// Agent steps per cycle
    #[arg(long, default_value_t = 2_000)]
    steps: usize,

    #[arg(long, default_value_t = 255)]
    rows: u16,

    #[arg(long, default_value_t = 255)]
    cols: u16,

    /// Seed of the first cycle, incremented for each following one
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_stderr_logging()?;

    let mut generate_time = Duration::ZERO;
    let mut search_time = Duration::ZERO;
    let mut found = 0u64;

    for i in 0..args.iterations {
        let seed = args.seed + i;
        let config = MazeConfig::new(args.rows, args.cols).with_seed(seed);

        let started = Instant::now();
        let mut session = MazeSession::new(&config)?;
        generate_time += started.elapsed();

        let mut rng = get_rng(Some(seed));
        for _ in 0..args.steps {
            session.step(Direction::ALL[rng.random_range(0..Direction::ALL.len())]);
        }

        let started = Instant::now();
        let outcome = session.compute_shortest_path();
        search_time += started.elapsed();

        if let TraceSearch::Found(route) = &outcome {
            found += 1;
            tracing::debug!(
                "seed {}: {} visited cells, route of {}",
                seed,
                session.trace().len(),
                route.len()
            );
        }
    }

    tracing::info!(
        "{} cycles of {}x{}: generation {:?}, search {:?}, {} routes found",
        args.iterations,
        args.rows,
        args.cols,
        generate_time,
        search_time,
        found
    );
    Ok(())
}
