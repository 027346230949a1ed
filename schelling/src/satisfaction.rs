use crate::SchellingGrid;
use crate::config::Threshold;
use crate::occupant::{Occupant, Satisfaction};
use world_grid::{Loc, Neighborhood, WorldGridCells};

pub fn classify(grid: &SchellingGrid, threshold: Threshold) -> WorldGridCells<Satisfaction> {
    let mut states = WorldGridCells::new(grid.size());
    for loc in grid.locs_iter() {
        states[loc] = classify_cell(grid, loc, threshold);
    }
    states
}

pub fn classify_cell(grid: &SchellingGrid, loc: Loc, threshold: Threshold) -> Satisfaction {
    let occupant = grid[loc];
    if occupant.is_empty() {
        return Satisfaction::NotApplicable;
    }

    let (same, different) = count_neighbors(&Neighborhood::new(grid, loc), occupant);
    let relevant = same + different;
    if relevant == 0 || same as f64 / relevant as f64 >= threshold.value() {
        Satisfaction::Satisfied
    } else {
        Satisfaction::Unsatisfied
    }
}

fn count_neighbors(neighborhood: &Neighborhood<Occupant>, occupant: Occupant) -> (u32, u32) {
    let mut same = 0;
    let mut different = 0;
    neighborhood.for_neighbor_cells(|neighbor| {
        if neighbor.is_empty() {
            return;
        }
        if *neighbor == occupant {
            same += 1;
        } else {
            different += 1;
        }
    });
    (same, different)
}
