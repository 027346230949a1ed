use crate::SchellingGrid;
use crate::config::{RelocationMethod, Threshold};
use crate::error::Result;
use crate::occupant::{Satisfaction, SatisfactionCounts};
use crate::satisfaction::classify;
use log::debug;
use world_grid::{Loc, Random, WorldGridCells};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub satisfaction: SatisfactionCounts,
    pub relocated: usize,
}

impl StepReport {
    pub fn is_settled(&self) -> bool {
        self.satisfaction.unsatisfied == 0
    }
}

pub fn step(
    grid: &mut SchellingGrid,
    threshold: f64,
    method: RelocationMethod,
    rand: &mut Random,
) -> Result<StepReport> {
    let threshold = Threshold::new(threshold)?;
    Ok(step_with(grid, threshold, method, rand))
}

pub(crate) fn step_with(
    grid: &mut SchellingGrid,
    threshold: Threshold,
    method: RelocationMethod,
    rand: &mut Random,
) -> StepReport {
    let states = classify(grid, threshold);
    let satisfaction = SatisfactionCounts::of(&states);
    let relocated = relocate(grid, &states, method, rand);
    debug!(
        "Step: {} satisfied, {} unsatisfied, {} empty, {} relocated",
        satisfaction.satisfied, satisfaction.unsatisfied, satisfaction.not_applicable, relocated
    );
    StepReport {
        satisfaction,
        relocated,
    }
}

pub fn relocate(
    grid: &mut SchellingGrid,
    states: &WorldGridCells<Satisfaction>,
    method: RelocationMethod,
    rand: &mut Random,
) -> usize {
    debug_assert_eq!(grid.size(), states.size());
    match method {
        RelocationMethod::DirectedMoves => move_to_empty_cells(grid, states, rand),
        RelocationMethod::PooledReshuffle => reshuffle_unsatisfied(grid, states, rand),
    }
}

fn move_to_empty_cells(
    grid: &mut SchellingGrid,
    states: &WorldGridCells<Satisfaction>,
    rand: &mut Random,
) -> usize {
    let mut empty_locs = locs_where(states, |state| state == Satisfaction::NotApplicable);
    let unsatisfied_locs = locs_where(states, |state| state == Satisfaction::Unsatisfied);

    let mut relocated = 0;
    for loc in unsatisfied_locs {
        if empty_locs.is_empty() {
            break;
        }
        let index = rand.next_in_range(0..empty_locs.len());
        grid.swap(loc, empty_locs[index]);
        // Order within the pool doesn't matter, only that the vacated cell joins it.
        empty_locs.swap_remove(index);
        empty_locs.push(loc);
        relocated += 1;
    }
    relocated
}

fn reshuffle_unsatisfied(
    grid: &mut SchellingGrid,
    states: &WorldGridCells<Satisfaction>,
    rand: &mut Random,
) -> usize {
    let pool = locs_where(states, |state| state != Satisfaction::Satisfied);
    for &loc in &pool {
        let other = pool[rand.next_in_range(0..pool.len())];
        grid.swap(loc, other);
    }
    pool.len()
}

fn locs_where<P>(states: &WorldGridCells<Satisfaction>, predicate: P) -> Vec<Loc>
where
    P: Fn(Satisfaction) -> bool,
{
    states
        .locs_iter()
        .filter(|&loc| predicate(states[loc]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::occupant::{Occupant, PopulationCounts};
    use world_grid::GridSize;

    use crate::occupant::Occupant::{Empty as E, GroupA as A, GroupB as B};

    const METHODS: [RelocationMethod; 2] = [
        RelocationMethod::DirectedMoves,
        RelocationMethod::PooledReshuffle,
    ];

    fn grid_from_rows(rows: &[&[Occupant]]) -> SchellingGrid {
        let mut grid = SchellingGrid::new(GridSize::square(rows.len() as u32));
        for (loc, occupant) in grid.locs_iter().zip(rows.iter().flat_map(|row| row.iter())) {
            grid[loc] = *occupant;
        }
        grid
    }

    fn checkerboard(side: u32) -> SchellingGrid {
        let mut grid = SchellingGrid::new(GridSize::square(side));
        for loc in grid.locs_iter() {
            grid[loc] = if (loc.row + loc.col) % 2 == 0 { A } else { B };
        }
        grid
    }

    #[test]
    fn all_satisfied_full_grid_is_unchanged() {
        for method in METHODS {
            let mut grid = SchellingGrid::new(GridSize::square(5));
            for cell in grid.cells_iter_mut() {
                *cell = A;
            }
            let before = grid.clone();

            let report = step(&mut grid, 0.875, method, &mut Random::from_seed(1)).unwrap();
            assert_eq!(grid, before);
            assert_eq!(report.relocated, 0);
            assert!(report.is_settled());
        }
    }

    #[test]
    fn unsatisfied_agents_stay_put_without_empty_cells() {
        let mut grid = checkerboard(4);
        let before = grid.clone();

        let report = step(
            &mut grid,
            0.75,
            RelocationMethod::DirectedMoves,
            &mut Random::from_seed(1),
        )
        .unwrap();
        assert_eq!(report.satisfaction.unsatisfied, 16);
        assert_eq!(report.relocated, 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn all_empty_grid_is_a_valid_state() {
        for method in METHODS {
            let mut grid = SchellingGrid::new(GridSize::square(3));
            let report = step(&mut grid, 0.5, method, &mut Random::from_seed(1)).unwrap();
            assert_eq!(report.satisfaction.not_applicable, 9);
            assert!(report.is_settled());
            assert_eq!(PopulationCounts::of(&grid).empty, 9);
        }
    }

    #[test]
    fn every_unsatisfied_agent_moves_when_empty_cells_exist() {
        let mut grid = grid_from_rows(&[
            &[A, B, A, B],
            &[B, A, B, A],
            &[E, E, E, E],
            &[E, E, E, E],
        ]);
        let threshold = Threshold::new(0.75).unwrap();
        let states = classify(&grid, threshold);
        let unsatisfied = SatisfactionCounts::of(&states).unsatisfied;
        assert!(unsatisfied > 0);

        let relocated = relocate(
            &mut grid,
            &states,
            RelocationMethod::DirectedMoves,
            &mut Random::from_seed(5),
        );
        assert_eq!(relocated, unsatisfied);
    }

    #[test]
    fn satisfied_cells_are_never_touched() {
        for method in METHODS {
            for seed in 0..20 {
                let mut rand = Random::from_seed(seed);
                let mut grid = crate::initialize(
                    &crate::Distribution::default(),
                    400,
                    crate::ShuffleMethod::default(),
                    &mut rand,
                )
                .unwrap();
                let before = grid.clone();
                let states = classify(&grid, Threshold::new(0.625).unwrap());

                relocate(&mut grid, &states, method, &mut rand);
                for loc in grid.locs_iter() {
                    if states[loc] == Satisfaction::Satisfied {
                        assert_eq!(grid[loc], before[loc]);
                    }
                }
            }
        }
    }

    #[test]
    fn moved_agents_land_on_previously_empty_or_vacated_cells() {
        let mut rand = Random::from_seed(9);
        let mut grid = crate::initialize(
            &crate::Distribution::default(),
            900,
            crate::ShuffleMethod::default(),
            &mut rand,
        )
        .unwrap();
        let before = grid.clone();
        let states = classify(&grid, Threshold::new(0.75).unwrap());

        relocate(&mut grid, &states, RelocationMethod::DirectedMoves, &mut rand);
        for loc in grid.locs_iter() {
            if grid[loc] != before[loc] {
                assert_ne!(states[loc], Satisfaction::Satisfied);
            }
            if !grid[loc].is_empty() && before[loc].is_empty() {
                assert_eq!(states[loc], Satisfaction::NotApplicable);
            }
        }
    }

    #[test]
    fn steps_conserve_population() {
        for method in METHODS {
            let mut rand = Random::from_seed(21);
            let mut grid = crate::initialize(
                &crate::Distribution::new(0.45, 0.45, 0.1).unwrap(),
                2500,
                crate::ShuffleMethod::default(),
                &mut rand,
            )
            .unwrap();
            let counts = PopulationCounts::of(&grid);
            for _ in 0..10 {
                step(&mut grid, 0.75, method, &mut rand).unwrap();
                assert_eq!(PopulationCounts::of(&grid), counts);
            }
        }
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let mut grid = checkerboard(3);
        let before = grid.clone();
        let mut rand = Random::from_seed(1);
        assert_eq!(
            step(&mut grid, 1.5, RelocationMethod::DirectedMoves, &mut rand),
            Err(ConfigError::ThresholdOutOfRange(1.5))
        );
        assert!(step(&mut grid, -0.5, RelocationMethod::DirectedMoves, &mut rand).is_err());
        assert!(step(&mut grid, f64::NAN, RelocationMethod::DirectedMoves, &mut rand).is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn same_seed_gives_same_step() {
        let run = |seed| {
            let mut rand = Random::from_seed(seed);
            let mut grid = crate::initialize(
                &crate::Distribution::default(),
                900,
                crate::ShuffleMethod::default(),
                &mut rand,
            )
            .unwrap();
            step(&mut grid, 0.75, RelocationMethod::DirectedMoves, &mut rand).unwrap();
            grid
        };
        assert_eq!(run(4), run(4));
    }
}
