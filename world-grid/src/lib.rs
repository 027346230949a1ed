#![deny(clippy::all)]
#![forbid(unsafe_code)]

use arrayvec::ArrayVec;
use rand::SeedableRng;
use rand::distr::uniform::{SampleRange, SampleUniform};
use rand::prelude::*;
use rand::rngs::SmallRng;
use std::ops::{Index, IndexMut};

pub trait World {
    fn size(&self) -> GridSize;
    fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &impl GridCell> + Clone;
    fn update(&mut self);

    fn num_cells(&self) -> usize {
        self.size().num_cells()
    }
}

pub trait GridCell
where
    Self: Copy + Default,
{
    fn color_rgba(&self) -> [u8; 4];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0);
        Self { width, height }
    }

    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    pub fn num_cells(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, loc: Loc) -> bool {
        loc.row < self.height && loc.col < self.width
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldGridCells<C>
where
    C: Copy + Default,
{
    cells: Vec<C>,
    size: GridSize,
}

impl<C> WorldGridCells<C>
where
    C: Copy + Default,
{
    pub fn new(size: GridSize) -> Self {
        Self {
            cells: vec![C::default(); size.num_cells()],
            size,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &C> + Clone {
        self.cells.iter()
    }

    pub fn cells_iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut C> {
        self.cells.iter_mut()
    }

    pub fn locs_iter(&self) -> impl Iterator<Item = Loc> + use<C> {
        let GridSize { width, height } = self.size;
        (0..height).flat_map(move |row| (0..width).map(move |col| Loc::new(row, col)))
    }

    pub fn cell(&self, loc: Loc) -> Option<&C> {
        loc.grid_index(self.size).map(|index| &self.cells[index])
    }

    pub fn cell_mut(&mut self, loc: Loc) -> Option<&mut C> {
        loc.grid_index(self.size).map(|index| &mut self.cells[index])
    }

    pub fn swap(&mut self, a: Loc, b: Loc) {
        let a_index = self.index_of(a);
        let b_index = self.index_of(b);
        self.cells.swap(a_index, b_index);
    }

    pub fn shuffle(&mut self, rand: &mut Random) {
        rand.shuffle(&mut self.cells);
    }

    fn index_of(&self, loc: Loc) -> usize {
        loc.grid_index(self.size)
            .unwrap_or_else(|| panic!("Indices {}, {} out of bounds", loc.row, loc.col))
    }
}

impl<C> Index<Loc> for WorldGridCells<C>
where
    C: Copy + Default,
{
    type Output = C;

    fn index(&self, loc: Loc) -> &Self::Output {
        self.cell(loc)
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col))
    }
}

impl<C> IndexMut<Loc> for WorldGridCells<C>
where
    C: Copy + Default,
{
    fn index_mut(&mut self, loc: Loc) -> &mut Self::Output {
        self.cell_mut(loc)
            .unwrap_or_else(|| panic!("Index_mut indices {}, {} out of bounds", loc.row, loc.col))
    }
}

/// The Moore neighborhood of a cell, clipped at the grid edges (no wraparound).
pub struct Neighborhood<'a, C>
where
    C: Copy + Default,
{
    cells: &'a WorldGridCells<C>,
    neighbor_locs: ArrayVec<Loc, 8>,
}

impl<'a, C> Neighborhood<'a, C>
where
    C: Copy + Default,
{
    const OFFSETS: [(i64, i64); 8] = [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, -1),
        (0, 1),
        (1, -1),
        (1, 0),
        (1, 1),
    ];

    pub fn new(cells: &'a WorldGridCells<C>, center: Loc) -> Self {
        let neighbor_locs = Self::OFFSETS
            .iter()
            .filter_map(|&(row_offset, col_offset)| {
                center.offset(row_offset, col_offset, cells.size())
            })
            .collect();
        Self {
            cells,
            neighbor_locs,
        }
    }

    pub fn num_neighbors(&self) -> usize {
        self.neighbor_locs.len()
    }

    pub fn neighbor_locs(&self) -> &[Loc] {
        &self.neighbor_locs
    }

    pub fn for_neighbor_cells<F>(&self, mut f: F)
    where
        F: FnMut(&C),
    {
        for &loc in &self.neighbor_locs {
            f(&self.cells[loc]);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Loc {
    pub row: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, size: GridSize) -> Option<usize> {
        if size.contains(*self) {
            Some(self.row as usize * size.width as usize + self.col as usize)
        } else {
            None
        }
    }

    pub fn offset(&self, row_offset: i64, col_offset: i64, size: GridSize) -> Option<Loc> {
        let row = self.row as i64 + row_offset;
        let col = self.col as i64 + col_offset;
        if row < 0 || col < 0 || row >= size.height as i64 || col >= size.width as i64 {
            None
        } else {
            Some(Loc::new(row as u32, col as u32))
        }
    }
}

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_in_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    pub fn next_loc(&mut self, size: GridSize) -> Loc {
        let row = self.next_in_range(0..size.height);
        let col = self.next_in_range(0..size.width);
        Loc::new(row, col)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}
