use aco_pso_planner::config::PlannerConfig;
use aco_pso_planner::export::{write_path_csv, Svg};
use aco_pso_planner::grid::Grid;
use aco_pso_planner::planner::{AcoPso, Supervisor};
use aco_pso_planner::util::Point;

use clap::Parser;
use csv::Writer;
use env_logger::Env;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::error::Error;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "aco-pso-planner")]
#[command(about = "Plans 2D paths with an ant colony tuned by a particle swarm")]
#[command(version)]
struct Cli {
    /// Config file or glob pattern of config files (.yaml, .yml or .ron)
    config: String,

    /// Directory receiving statistics, paths and drawings
    #[arg(short, long, default_value = "out")]
    output: PathBuf,

    /// Also export the N cheapest ants of the last generation
    #[arg(short, long, default_value_t = 0)]
    candidates: usize,

    /// Seed overriding the one given in the config
    #[arg(long)]
    seed: Option<u64>,

    /// Skip svg drawings
    #[arg(long)]
    no_svg: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    fs::create_dir_all(&cli.output)?;

    let mut runs = 0;
    for entry in glob(&cli.config)? {
        let path = entry?;
        run_config(&cli, &path)?;
        runs += 1;
    }
    if runs == 0 {
        return Err(format!("no config file matches {}", cli.config).into());
    }

    Ok(())
}

fn run_config(cli: &Cli, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut config = PlannerConfig::from_file(path)?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let params = config.params()?;
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("plan")
        .to_string();
    info!("running {} with seed {}", path.display(), params.seed);

    let stats = File::create(cli.output.join(format!("{}_stats.csv", name)))?;
    let generations = params.n_iterations;
    let supervisor = Supervisor::new(Writer::from_writer(stats));
    let mut planner = AcoPso::new(params, config.tuner(), supervisor)?;

    let bar = ProgressBar::new(generations as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len} generations ({eta})")
            .progress_chars("=> "),
    );
    bar.set_message(&name);
    while !planner.is_finished() {
        planner.single_generation()?;
        bar.inc(1);
    }
    bar.finish_with_message(&format!("{}: best length {:.4}", name, planner.best_length()));
    planner.supervisor.flush()?;

    let goal = planner.params().final_point;
    match planner.best_path() {
        Some(best) => {
            let label = format!("{}_best", name);
            export(cli, planner.grid(), best, planner.best_length(), goal, &label)?
        }
        None => warn!("{}: no ant completed a path", name),
    }

    let candidates = planner
        .ranked_ants()
        .into_iter()
        .filter(|ant| ant.is_candidate())
        .take(cli.candidates);
    for (rank, ant) in candidates.enumerate() {
        let label = format!("{}_candidate_{}", name, rank + 1);
        export(cli, planner.grid(), ant.path(), ant.cost(), goal, &label)?;
    }

    Ok(())
}

fn export(
    cli: &Cli,
    grid: &Grid,
    path: &[Point],
    cost: f64,
    goal: Point,
    name: &str,
) -> Result<(), Box<dyn Error>> {
    write_path_csv(File::create(cli.output.join(format!("{}.csv", name)))?, path)?;
    if !cli.no_svg {
        let drawing = Svg::default().export_path(grid, path, cost, goal, name)?;
        fs::write(cli.output.join(format!("{}.svg", name)), drawing)?;
    }
    info!("{}: {} waypoints, length {:.4}", name, path.len(), cost);

    Ok(())
}
