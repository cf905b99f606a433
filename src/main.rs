use anyhow::Result;
use clap::Parser;
use dormancy_lib::model::config::AppConfig;
use dormancy_lib::model::metrics::init_logging;
use dormancy_lib::model::scene::Scene;
use dormancy_lib::model::simulation::Simulation;
use dormancy_lib::model::SceneGraph;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene description (TOML). Runs the built-in demo scene when omitted.
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Number of steps to run (overrides the config)
    #[arg(long)]
    steps: Option<u64>,

    /// Log every sleep and wake transition
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    if args.verbose {
        config.sleep.verbose = true;
    }
    init_logging(config.sleep.verbose);

    let scene = match &args.scene {
        Some(path) => Scene::load(path, config.simulation.dt)?,
        None => Scene::demo(config.simulation.dt)?,
    };
    let steps = args.steps.unwrap_or(config.simulation.steps);

    let mut sim = Simulation::new(scene, config)?;
    println!(
        "Tracking {} node(s), {} rejected",
        sim.init_report().tracked,
        sim.init_report().rejected.len()
    );

    let report = sim.run(steps);

    println!(
        "Ran {} steps in {:.2?}: {} sleep transition(s), {} wake transition(s)",
        sim.step_count(),
        sim.metrics.elapsed(),
        report.asleep.len(),
        report.woken.len()
    );
    for group in sim.controller.tracked() {
        let state = if sim.scene.is_sleeping(group.context) {
            "asleep"
        } else {
            "awake"
        };
        println!("  {:<24} {state}", sim.scene.name(group.context));
    }
    Ok(())
}
