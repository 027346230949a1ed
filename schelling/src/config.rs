use crate::error::{ConfigError, Result};
use crate::occupant::PopulationCounts;

const SUM_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Distribution {
    group_a: f64,
    group_b: f64,
    empty: f64,
}

impl Distribution {
    pub fn new(group_a: f64, group_b: f64, empty: f64) -> Result<Self> {
        Self::check_fraction("group A", group_a)?;
        Self::check_fraction("group B", group_b)?;
        Self::check_fraction("empty", empty)?;

        let sum = group_a + group_b + empty;
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(ConfigError::DistributionSum(sum));
        }
        Ok(Self {
            group_a,
            group_b,
            empty,
        })
    }

    fn check_fraction(name: &'static str, value: f64) -> Result<()> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidFraction { name, value })
        }
    }

    pub fn group_a(&self) -> f64 {
        self.group_a
    }

    pub fn group_b(&self) -> f64 {
        self.group_b
    }

    pub fn empty(&self) -> f64 {
        self.empty
    }

    pub fn target_counts(&self, total_locations: u32) -> PopulationCounts {
        let count = |fraction: f64| (fraction * total_locations as f64).round() as usize;
        PopulationCounts {
            group_a: count(self.group_a),
            group_b: count(self.group_b),
            empty: count(self.empty),
        }
    }
}

impl Default for Distribution {
    fn default() -> Self {
        Self {
            group_a: 0.5,
            group_b: 0.3,
            empty: 0.2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::ThresholdOutOfRange(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(0.75)
    }
}

impl TryFrom<f64> for Threshold {
    type Error = ConfigError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShuffleMethod {
    /// Each cell in turn swaps with a uniformly chosen cell. Not a uniform
    /// permutation: some arrangements come up more often than others.
    #[default]
    SwapEachCell,
    FisherYates,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RelocationMethod {
    /// Each unsatisfied agent moves to a random empty cell. Cells vacated
    /// during the step become available to later movers in the same step.
    #[default]
    DirectedMoves,
    /// Every cell that is not satisfied (unsatisfied agents and empty cells)
    /// swaps with a random cell from that same pool.
    PooledReshuffle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    pub distribution: Distribution,
    pub total_locations: u32,
    pub threshold: f64,
    pub shuffle: ShuffleMethod,
    pub relocation: RelocationMethod,
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.total_locations == 0 {
            return Err(ConfigError::NoLocations);
        }
        Threshold::new(self.threshold)?;
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            distribution: Distribution::default(),
            total_locations: 90_000,
            threshold: Threshold::default().value(),
            shuffle: ShuffleMethod::default(),
            relocation: RelocationMethod::default(),
            seed: None,
        }
    }
}
