use gravsim::{ScenarioConfig, Scenario, OrbitQualityHarness, SUBSTEP_LADDER};
use gravsim::{bench_gravity, bench_precision_checks, bench_step_curve};
use gravsim::{format_elapsed_time, BaseUnits};
use gravsim::simulation::time_display::base_units_for_label;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "2D N-body gravity sandbox")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scenario file from the scenarios directory
    Run {
        #[arg(short, default_value = "five_body_cross.yaml")]
        file_name: String,

        /// Override the number of ticks from the scenario
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Log timings and the monitored body every tick
        #[arg(short, long)]
        stepping: bool,
    },
    /// Measure orbital radius drift across substep densities
    OrbitQuality {
        #[arg(short, long, default_value_t = 10)]
        orbits: u64,

        /// Substeps per simulated minute; defaults to the full ladder
        #[arg(short, long, value_delimiter = ',')]
        substeps: Vec<u32>,

        /// Run the precision-checked integrator
        #[arg(short, long)]
        check_precision: bool,
    },
    /// Cost benchmarks
    Bench {
        #[arg(long, default_value_t = 10_000_000)]
        iterations: u64,
    },
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn run_scenario(file_name: &str, ticks: Option<u64>, stepping: bool) -> Result<()> {
    let scenario_cfg = load_scenario_from_yaml(file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg).context("building scenario")?;

    let ticks = ticks.unwrap_or(scenario.ticks);
    let space = scenario.engine.state().space().clone();
    let base_units = base_units_for_label(space.time_units());

    for _ in 0..ticks {
        scenario.engine.step(scenario.tick, stepping);
    }

    let frame = scenario.engine.frame();
    info!("Elapsed {}", format_elapsed_time(frame.elapsed, base_units));
    for (i, b) in frame.bodies.iter().enumerate() {
        info!(
            "Body #{i}: position = ({:.3}, {:.3}) {}, velocity = ({:.3}, {:.3}) {}",
            b.x.x,
            b.x.y,
            space.distance_units(),
            space.to_display_velocity(b.v.x),
            space.to_display_velocity(b.v.y),
            space.velocity_units()
        );
    }

    let diagnostics = scenario.engine.diagnostics();
    info!(
        "{} precision warnings, {} symmetry violations, {} clamped accelerations",
        diagnostics.precision.detected(),
        diagnostics.symmetry_violations,
        diagnostics.clamped_accelerations
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    match args.command {
        Command::Run { file_name, ticks, stepping } => run_scenario(&file_name, ticks, stepping)?,
        Command::OrbitQuality { orbits, substeps, check_precision } => {
            let ladder = if substeps.is_empty() { SUBSTEP_LADDER.to_vec() } else { substeps };
            let harness = OrbitQualityHarness {
                check_precision,
                ..OrbitQualityHarness::default()
            };
            for report in harness.run_ladder(&ladder, orbits) {
                if let Some(last) = report.samples.last() {
                    info!(
                        "{} substeps/min: last orbit ended at {}",
                        report.substeps_per_minute,
                        format_elapsed_time(last.elapsed, BaseUnits::Minutes)
                    );
                }
            }
        }
        Command::Bench { iterations } => {
            bench_gravity();
            bench_step_curve();
            bench_precision_checks(iterations);
        }
    }

    Ok(())
}
