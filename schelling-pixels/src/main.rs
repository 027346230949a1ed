#![deny(clippy::all)]
#![forbid(unsafe_code)]

use log::error;
use pixels_main_support::{AnimationSettings, animate, dot_size};
use schelling::{SchellingWorld, SimulationConfig};
use std::process::ExitCode;
use std::time::Duration;
use world_grid::Random;

const TIME_STEP_MILLIS: u64 = 32;
const CANVAS_EXTENT: f64 = 400.0;
const MARGIN: f64 = 1.0;

fn main() -> ExitCode {
    env_logger::init();

    let config = SimulationConfig::default();
    let world = match SchellingWorld::new(&config, Random::new()) {
        Ok(world) => world,
        Err(err) => {
            error!("Invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let settings = AnimationSettings {
        title: "Segregation".to_string(),
        time_step: Duration::from_millis(TIME_STEP_MILLIS),
        dot_size: dot_size(CANVAS_EXTENT, MARGIN, config.total_locations),
    };
    match animate(settings, world) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
