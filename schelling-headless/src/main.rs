#![deny(clippy::all)]
#![forbid(unsafe_code)]

use clap::{Parser, ValueEnum};
use log::{error, info};
use schelling::{RelocationMethod, SchellingWorld, ShuffleMethod, SimulationConfig, Threshold};
use std::process::ExitCode;
use world_grid::Random;

const DEFAULT_MAX_STEPS: u64 = 1_000;
const DEFAULT_TOTAL_LOCATIONS: u32 = 90_000;
const REPORT_EVERY_STEPS: u64 = 10;

#[derive(Parser, Debug)]
#[command(
    name = "schelling-headless",
    version,
    about = "Run the segregation model without a window"
)]
struct Args {
    /// Seed for a repeatable run.
    seed: Option<u64>,

    /// Stop after this many steps if the grid has not settled.
    #[arg(default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: u64,

    /// Fraction of same-group neighbors an agent needs to be satisfied.
    #[arg(
        long,
        value_name = "FRACTION",
        default_value_t = Threshold::default().value(),
        value_parser = parse_threshold
    )]
    threshold: f64,

    /// Requested number of grid cells; the grid side is its rounded square root.
    #[arg(
        long,
        value_name = "COUNT",
        default_value_t = DEFAULT_TOTAL_LOCATIONS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    locations: u32,

    #[arg(long, value_enum, default_value_t = RelocationArg::Directed)]
    relocation: RelocationArg,

    #[arg(long, value_enum, default_value_t = ShuffleArg::SwapEach)]
    shuffle: ShuffleArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RelocationArg {
    Directed,
    Pooled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ShuffleArg {
    SwapEach,
    FisherYates,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            total_locations: self.locations,
            threshold: self.threshold,
            relocation: match self.relocation {
                RelocationArg::Directed => RelocationMethod::DirectedMoves,
                RelocationArg::Pooled => RelocationMethod::PooledReshuffle,
            },
            shuffle: match self.shuffle {
                ShuffleArg::SwapEach => ShuffleMethod::SwapEachCell,
                ShuffleArg::FisherYates => ShuffleMethod::FisherYates,
            },
            seed: self.seed,
            ..Default::default()
        }
    }
}

fn parse_threshold(arg: &str) -> Result<f64, String> {
    let value: f64 = arg.parse().map_err(|err| format!("{err}"))?;
    Threshold::new(value)
        .map(|threshold| threshold.value())
        .map_err(|err| err.to_string())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut world = match SchellingWorld::new(&args.config(), Random::new()) {
        Ok(world) => world,
        Err(err) => {
            error!("Invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let summary = world.run_observed(args.max_steps, |steps, report| {
        if steps % REPORT_EVERY_STEPS == 0 {
            info!(
                "Step {}: {:.1}% satisfied, {} relocated",
                steps,
                100.0 * report.satisfaction.satisfied_fraction(),
                report.relocated
            );
        }
    });

    let satisfaction = world.satisfaction();
    println!(
        "{} after {} steps: {} satisfied, {} unsatisfied",
        if summary.settled { "Settled" } else { "Stopped" },
        world.steps(),
        satisfaction.satisfied,
        satisfaction.unsatisfied
    );
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use world_grid::World;

    #[test]
    fn defaults_match_the_standard_run() {
        let args = Args::try_parse_from(["schelling-headless"]).unwrap();
        assert_eq!(args.seed, None);
        assert_eq!(args.max_steps, DEFAULT_MAX_STEPS);
        assert_eq!(args.config(), SimulationConfig::default());
    }

    #[test]
    fn positional_seed_and_step_limit() {
        let args = Args::try_parse_from(["schelling-headless", "42", "25"]).unwrap();
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.max_steps, 25);
        assert_eq!(args.config().seed, Some(42));
    }

    #[test]
    fn flags_select_threshold_and_methods() {
        let args = Args::try_parse_from([
            "schelling-headless",
            "--threshold",
            "0.625",
            "--relocation",
            "pooled",
            "--shuffle",
            "fisher-yates",
            "--locations",
            "400",
        ])
        .unwrap();
        let config = args.config();
        assert_eq!(config.threshold, 0.625);
        assert_eq!(config.relocation, RelocationMethod::PooledReshuffle);
        assert_eq!(config.shuffle, ShuffleMethod::FisherYates);
        assert_eq!(config.total_locations, 400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn help_is_not_a_seed() {
        let err = Args::try_parse_from(["schelling-headless", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn rejects_bad_values() {
        for argv in [
            vec!["schelling-headless", "not-a-seed"],
            vec!["schelling-headless", "--threshold", "1.5"],
            vec!["schelling-headless", "--threshold", "abc"],
            vec!["schelling-headless", "--locations", "0"],
            vec!["schelling-headless", "--relocation", "sideways"],
        ] {
            let err = Args::try_parse_from(argv).unwrap_err();
            assert_ne!(err.kind(), ErrorKind::DisplayHelp);
        }
    }

    #[test]
    fn parsed_arguments_build_a_world() {
        let args =
            Args::try_parse_from(["schelling-headless", "7", "5", "--locations", "100"]).unwrap();
        let mut world = SchellingWorld::new(&args.config(), Random::new()).unwrap();
        let summary = world.run(args.max_steps);
        assert!(summary.steps <= 5);
        assert_eq!(world.num_cells(), 100);
    }
}
