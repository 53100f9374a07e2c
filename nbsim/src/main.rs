use nbsim::{IntegrationStrategy, ScenarioConfig, Scenario, AsciiFrame};
use nbsim::{run_terminal, bench_step};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Gravitational N-body simulation drawn as ASCII art")]
struct Args {
    /// Scenario YAML; bare names are also looked up in the crate's `scenarios/` directory
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Integration strategy, overrides the scenario file
    #[arg(short, long, value_enum)]
    integrator: Option<IntegrationStrategy>,

    /// Number of random bodies, overrides the scenario file unless it lists bodies explicitly
    #[arg(short = 'n', long)]
    bodies: Option<usize>,

    /// Seed for the random initial state
    #[arg(long)]
    seed: Option<u64>,

    /// Run this many steps without a terminal UI and print the final frame
    #[arg(long, value_name = "STEPS")]
    headless: Option<u64>,

    /// Time the integrator for growing body counts and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let mut cfg = match &args.file {
        Some(path) => {
            let config_path = if path.exists() {
                path.clone()
            } else {
                PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(path)
            };
            let file = File::open(&config_path)
                .with_context(|| format!("cannot open scenario {}", config_path.display()))?;
            ScenarioConfig::from_yaml_reader(BufReader::new(file))
                .with_context(|| format!("cannot parse scenario {}", config_path.display()))?
        }
        None => ScenarioConfig::default(),
    };

    // Command line wins over the file
    if let Some(integrator) = args.integrator {
        cfg.engine.integrator = integrator;
    }
    if let Some(n) = args.bodies {
        cfg.set_body_count(n).context("--bodies conflicts with the scenario file")?;
    }
    if let Some(seed) = args.seed {
        cfg.parameters.seed = Some(seed);
    }

    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if args.bench {
        bench_step()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario(&args)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg).context("failed to build scenario")?;

    match args.headless {
        Some(steps) => {
            scenario.run_steps(steps).context("simulation failed")?;
            let mut frame = AsciiFrame::for_world(&scenario.world)?;
            frame.draw(&scenario.world);
            print!("{}", frame.render());
            println!(
                "seed {}  step {}  t = {:.2}  {:?}",
                scenario.parameters.seed, scenario.world.steps, scenario.world.t, scenario.engine.integrator
            );
        }
        None => run_terminal(scenario).context("terminal driver failed")?,
    }

    Ok(())
}
