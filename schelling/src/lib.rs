#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod occupant;
mod population;
mod relocation;
mod satisfaction;
mod world;

pub use config::{Distribution, RelocationMethod, ShuffleMethod, SimulationConfig, Threshold};
pub use error::{ConfigError, Result};
pub use occupant::{Occupant, PopulationCounts, Satisfaction, SatisfactionCounts};
pub use population::{create_grid, initialize, shuffle_grid};
pub use relocation::{StepReport, relocate, step};
pub use satisfaction::{classify, classify_cell};
pub use world::{RunSummary, SchellingWorld};

use world_grid::WorldGridCells;

pub type SchellingGrid = WorldGridCells<Occupant>;
