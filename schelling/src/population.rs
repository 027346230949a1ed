use crate::SchellingGrid;
use crate::config::{Distribution, ShuffleMethod};
use crate::error::{ConfigError, Result};
use crate::occupant::{Occupant, PopulationCounts};
use log::info;
use std::iter;
use world_grid::{GridSize, Random};

pub fn initialize(
    distribution: &Distribution,
    total_locations: u32,
    shuffle: ShuffleMethod,
    rand: &mut Random,
) -> Result<SchellingGrid> {
    let mut grid = create_grid(distribution, total_locations)?;
    shuffle_grid(&mut grid, shuffle, rand);

    let counts = PopulationCounts::of(&grid);
    info!(
        "Created {}x{} grid: {} group A, {} group B, {} empty",
        grid.size().width,
        grid.size().height,
        counts.group_a,
        counts.group_b,
        counts.empty
    );
    Ok(grid)
}

/// Builds an unshuffled square grid, filled row-major with group A, then
/// group B, then empty cells. The side is `round(sqrt(total_locations))`, so
/// the grid may hold fewer or more cells than requested; extra occupants are
/// dropped and leftover cells stay empty.
pub fn create_grid(distribution: &Distribution, total_locations: u32) -> Result<SchellingGrid> {
    if total_locations == 0 {
        return Err(ConfigError::NoLocations);
    }

    let side = (total_locations as f64).sqrt().round() as u32;
    let mut grid = SchellingGrid::new(GridSize::square(side));

    let targets = distribution.target_counts(total_locations);
    let occupants = iter::repeat_n(Occupant::GroupA, targets.group_a)
        .chain(iter::repeat_n(Occupant::GroupB, targets.group_b))
        .chain(iter::repeat_n(Occupant::Empty, targets.empty));
    for (cell, occupant) in grid.cells_iter_mut().zip(occupants) {
        *cell = occupant;
    }
    Ok(grid)
}

pub fn shuffle_grid(grid: &mut SchellingGrid, method: ShuffleMethod, rand: &mut Random) {
    match method {
        ShuffleMethod::SwapEachCell => swap_each_cell(grid, rand),
        ShuffleMethod::FisherYates => grid.shuffle(rand),
    }
}

fn swap_each_cell(grid: &mut SchellingGrid, rand: &mut Random) {
    let size = grid.size();
    for loc in grid.locs_iter() {
        let other = rand.next_loc(size);
        grid.swap(loc, other);
    }
}
