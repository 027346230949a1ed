use world_grid::{GridCell, WorldGridCells};

const GROUP_A_COLOR: [u8; 4] = [0xff, 0x00, 0x00, 0xff];
const GROUP_B_COLOR: [u8; 4] = [0x00, 0x00, 0xff, 0xff];
const EMPTY_COLOR: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Occupant {
    #[default]
    Empty,
    GroupA,
    GroupB,
}

impl Occupant {
    pub fn is_empty(&self) -> bool {
        *self == Occupant::Empty
    }
}

impl GridCell for Occupant {
    fn color_rgba(&self) -> [u8; 4] {
        match self {
            Occupant::GroupA => GROUP_A_COLOR,
            Occupant::GroupB => GROUP_B_COLOR,
            Occupant::Empty => EMPTY_COLOR,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Satisfaction {
    Satisfied,
    Unsatisfied,
    #[default]
    NotApplicable,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PopulationCounts {
    pub group_a: usize,
    pub group_b: usize,
    pub empty: usize,
}

impl PopulationCounts {
    pub fn of(cells: &WorldGridCells<Occupant>) -> Self {
        let mut result = Self::default();
        for occupant in cells.cells_iter() {
            match occupant {
                Occupant::GroupA => result.group_a += 1,
                Occupant::GroupB => result.group_b += 1,
                Occupant::Empty => result.empty += 1,
            }
        }
        result
    }

    pub fn total(&self) -> usize {
        self.group_a + self.group_b + self.empty
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SatisfactionCounts {
    pub satisfied: usize,
    pub unsatisfied: usize,
    pub not_applicable: usize,
}

impl SatisfactionCounts {
    pub fn of(states: &WorldGridCells<Satisfaction>) -> Self {
        let mut result = Self::default();
        for state in states.cells_iter() {
            match state {
                Satisfaction::Satisfied => result.satisfied += 1,
                Satisfaction::Unsatisfied => result.unsatisfied += 1,
                Satisfaction::NotApplicable => result.not_applicable += 1,
            }
        }
        result
    }

    pub fn satisfied_fraction(&self) -> f64 {
        let agents = self.satisfied + self.unsatisfied;
        if agents == 0 {
            1.0
        } else {
            self.satisfied as f64 / agents as f64
        }
    }
}
