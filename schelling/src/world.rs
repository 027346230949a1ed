use crate::SchellingGrid;
use crate::config::{RelocationMethod, SimulationConfig, Threshold};
use crate::error::Result;
use crate::occupant::{PopulationCounts, SatisfactionCounts};
use crate::population::initialize;
use crate::relocation::{StepReport, step_with};
use crate::satisfaction::classify;
use log::info;
use world_grid::{GridCell, GridSize, Random, World};

#[derive(Debug)]
pub struct SchellingWorld {
    grid: SchellingGrid,
    threshold: Threshold,
    relocation: RelocationMethod,
    rand: Random,
    steps: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u64,
    pub settled: bool,
    pub last_report: Option<StepReport>,
}

impl SchellingWorld {
    /// Builds a world from `config`. A seed in the config takes precedence
    /// over `rand`.
    pub fn new(config: &SimulationConfig, rand: Random) -> Result<Self> {
        config.validate()?;
        let mut rand = config.seed.map_or(rand, Random::from_seed);
        let grid = initialize(
            &config.distribution,
            config.total_locations,
            config.shuffle,
            &mut rand,
        )?;
        Ok(Self::from_grid(
            grid,
            Threshold::new(config.threshold)?,
            config.relocation,
            rand,
        ))
    }

    pub fn from_grid(
        grid: SchellingGrid,
        threshold: Threshold,
        relocation: RelocationMethod,
        rand: Random,
    ) -> Self {
        Self {
            grid,
            threshold,
            relocation,
            rand,
            steps: 0,
        }
    }

    pub fn grid(&self) -> &SchellingGrid {
        &self.grid
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn population(&self) -> PopulationCounts {
        PopulationCounts::of(&self.grid)
    }

    pub fn satisfaction(&self) -> SatisfactionCounts {
        SatisfactionCounts::of(&classify(&self.grid, self.threshold))
    }

    pub fn step(&mut self) -> StepReport {
        self.steps += 1;
        step_with(&mut self.grid, self.threshold, self.relocation, &mut self.rand)
    }

    pub fn run(&mut self, max_steps: u64) -> RunSummary {
        self.run_observed(max_steps, |_, _| {})
    }

    pub fn run_observed<F>(&mut self, max_steps: u64, mut on_step: F) -> RunSummary
    where
        F: FnMut(u64, &StepReport),
    {
        let mut summary = RunSummary {
            steps: 0,
            settled: false,
            last_report: None,
        };
        while summary.steps < max_steps {
            let report = self.step();
            summary.steps += 1;
            summary.last_report = Some(report);
            on_step(self.steps, &report);
            if report.is_settled() {
                summary.settled = true;
                info!("Settled after {} steps", self.steps);
                break;
            }
        }
        summary
    }
}

impl World for SchellingWorld {
    fn size(&self) -> GridSize {
        self.grid.size()
    }

    fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &impl GridCell> + Clone {
        self.grid.cells_iter()
    }

    fn update(&mut self) {
        self.step();
    }
}
