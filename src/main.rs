use std::path::PathBuf;

use clap::Parser;
use mazetrail::{
    MazeConfig, MazeSession,
    app::App,
    generators::{GeneratedMaze, generate_maze, get_rng},
    logging,
};

/// Walk a generated maze with the arrow keys, then press Enter to see the shortest
/// route from where you started to where you are, using only cells you visited.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of grid rows
    #[arg(long, default_value_t = MazeConfig::DEFAULT_ROWS)]
    rows: u16,

    /// Number of grid columns
    #[arg(long, default_value_t = MazeConfig::DEFAULT_COLS)]
    cols: u16,

    /// Chance of carving a second branch at each step
    #[arg(long, default_value_t = MazeConfig::DEFAULT_BRANCH_PROBABILITY)]
    branch_probability: f64,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write logs. Filter with RUST_LOG.
    #[arg(long, default_value = "mazetrail.log")]
    log_file: PathBuf,

    /// Print the maze as text and exit
    #[arg(long)]
    dump: bool,
}

impl Args {
    fn config(&self) -> MazeConfig {
        MazeConfig {
            rows: self.rows,
            cols: self.cols,
            branch_probability: self.branch_probability,
            seed: self.seed,
        }
    }
}

/// Text form of a generated maze, `@` marking the start cell.
fn dump(maze: &GeneratedMaze) -> String {
    let mut out = String::new();
    for y in 0..maze.grid.height() {
        for x in 0..maze.grid.width() {
            if (x, y) == maze.start {
                out.push('@');
            } else {
                out.push_str(&maze.grid[(x, y)].to_string());
            }
        }
        out.push('\n');
    }
    out
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init_file_logging(&args.log_file)?;
    let config = args.config();
    tracing::info!("Starting with {:?}", config);

    if args.dump {
        let maze = generate_maze(&config, &mut get_rng(config.seed))?;
        print!("{}", dump(&maze));
        return Ok(());
    }

    // Fail on bad configuration before touching the terminal
    let session = MazeSession::new(&config)?;

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = App::default().run(&mut stdout, session);
    App::restore_terminal(&mut stdout)?;
    result?;

    tracing::info!("Exiting");
    Ok(())
}
