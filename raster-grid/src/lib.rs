#![deny(clippy::all)]
#![forbid(unsafe_code)]

pub mod ppm;

use rand::distr::uniform::{SampleRange, SampleUniform};
use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::ops::{Index, IndexMut};

pub trait World {
    fn raster(&self) -> &Raster;
    fn update(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn num_cells(&self) -> usize {
        self.width as usize * self.height as usize
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
        if self.row < size.height && self.col < size.width {
            Some(self.row as usize * size.width as usize + self.col as usize)
        } else {
            None
        }
    }

    fn from_grid_index(index: usize, size: GridSize) -> Self {
        let width = size.width as usize;
        Self::new((index / width) as u32, (index % width) as u32)
    }

    pub fn sq_distance(&self, col: i64, row: i64) -> u128 {
        sq_distance(self.col as i64, self.row as i64, col, row)
    }
}

/// Exact for any pair of `i64` points except where the sum would pass `u128::MAX`,
/// which it saturates to.
pub fn sq_distance(x1: i64, y1: i64, x2: i64, y2: i64) -> u128 {
    let dx = x1.abs_diff(x2) as u128;
    let dy = y1.abs_diff(y2) as u128;
    (dx * dx).saturating_add(dy * dy)
}

/// One pixel color, channels in R, G, B, A order. [`Rgba::to_rgba_bytes`] and
/// [`Rgba::to_rgb_bytes`] are the only places where that order turns into bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0x00, 0x00, 0x00);
    pub const WHITE: Rgba = Rgba::opaque(0xff, 0xff, 0xff);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// From `0xRRGGBB`.
    pub const fn from_hex(rgb: u32) -> Self {
        Self::opaque((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub fn to_rgba_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_rgb_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Color grid plus a parallel grid of best squared distances, both indexed by [`Loc`].
#[derive(Clone, Debug)]
pub struct Raster {
    size: GridSize,
    colors: Vec<Rgba>,
    depths: Vec<u128>,
}

impl Raster {
    pub fn new(size: GridSize) -> Self {
        assert!(size.width != 0 && size.height != 0);
        Self {
            size,
            colors: vec![Rgba::default(); size.num_cells()],
            depths: vec![u128::MAX; size.num_cells()],
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn num_cells(&self) -> usize {
        self.colors.len()
    }

    pub fn color(&self, loc: Loc) -> Option<Rgba> {
        loc.grid_index(self.size).map(|index| self.colors[index])
    }

    pub fn color_mut(&mut self, loc: Loc) -> Option<&mut Rgba> {
        loc.grid_index(self.size)
            .map(|index| &mut self.colors[index])
    }

    pub fn depth(&self, loc: Loc) -> Option<u128> {
        loc.grid_index(self.size).map(|index| self.depths[index])
    }

    pub fn colors_iter(&self) -> impl DoubleEndedIterator<Item = &Rgba> + Clone {
        self.colors.iter()
    }

    pub fn colors_iter_mut(&mut self) -> impl Iterator<Item = (Loc, &mut Rgba)> {
        let size = self.size;
        self.colors
            .iter_mut()
            .enumerate()
            .map(move |(index, color)| (Loc::from_grid_index(index, size), color))
    }

    pub fn cells_iter_mut(&mut self) -> impl Iterator<Item = (Loc, &mut Rgba, &mut u128)> {
        let size = self.size;
        self.colors
            .iter_mut()
            .zip(self.depths.iter_mut())
            .enumerate()
            .map(move |(index, (color, depth))| {
                (Loc::from_grid_index(index, size), color, depth)
            })
    }

    pub fn fill(&mut self, color: Rgba) {
        self.colors.fill(color);
    }

    pub fn reset_depths(&mut self) {
        self.depths.fill(u128::MAX);
    }

    /// Sets every in-bounds pixel within `radius` of the center. Pixels off the grid are
    /// skipped.
    pub fn stamp_disc(&mut self, center_col: i64, center_row: i64, radius: u32, color: Rgba) {
        let radius = radius as i64;
        let min_col = center_col.saturating_sub(radius).max(0);
        let max_col = center_col
            .saturating_add(radius)
            .min(self.size.width as i64 - 1);
        let min_row = center_row.saturating_sub(radius).max(0);
        let max_row = center_row
            .saturating_add(radius)
            .min(self.size.height as i64 - 1);
        let radius_sq = (radius as u128) * (radius as u128);

        for row in min_row..=max_row {
            for col in min_col..=max_col {
                if sq_distance(col, row, center_col, center_row) <= radius_sq {
                    self[Loc::new(row as u32, col as u32)] = color;
                }
            }
        }
    }
}

impl Index<Loc> for Raster {
    type Output = Rgba;

    fn index(&self, loc: Loc) -> &Self::Output {
        let index = loc
            .grid_index(self.size)
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col));
        &self.colors[index]
    }
}

impl IndexMut<Loc> for Raster {
    fn index_mut(&mut self, loc: Loc) -> &mut Self::Output {
        self.color_mut(loc)
            .unwrap_or_else(|| panic!("Index_mut indices {}, {} out of bounds", loc.row, loc.col))
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

    /// Uniform in `[0, 1)`.
    pub fn next_fraction(&mut self) -> f32 {
        self.rng.random()
    }

    pub fn next_in_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.random_range(range)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}
