use raster_grid::{sq_distance, GridSize, Random};
use std::f32::consts::TAU;
use std::ops::RangeInclusive;
use std::slice::Iter;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn from_polar(angle: f32, magnitude: f32) -> Self {
        Self::new(angle.cos() * magnitude, angle.sin() * magnitude)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Seed {
    pub position: Vector,
    pub velocity: Vector,
}

impl Seed {
    pub fn new(position: Vector, velocity: Vector) -> Self {
        Self { position, velocity }
    }

    pub fn at(x: f32, y: f32) -> Self {
        Self::new(Vector::new(x, y), Vector::default())
    }

    /// Position truncated toward zero, as used by distance computations.
    pub fn grid_coords(&self) -> (i64, i64) {
        (self.position.x as i64, self.position.y as i64)
    }

    pub fn marker_center(&self) -> (i64, i64) {
        (
            self.position.x.round() as i64,
            self.position.y.round() as i64,
        )
    }

    pub fn sq_distance_to(&self, col: i64, row: i64) -> u128 {
        let (x, y) = self.grid_coords();
        sq_distance(col, row, x, y)
    }

    /// Moves one step. An axis whose next coordinate would leave `[0, size]` keeps its
    /// coordinate for this step and reverses its velocity instead.
    pub fn advance(&mut self, size: GridSize) {
        Self::advance_axis(
            &mut self.position.x,
            &mut self.velocity.x,
            size.width as f32,
        );
        Self::advance_axis(
            &mut self.position.y,
            &mut self.velocity.y,
            size.height as f32,
        );
    }

    fn advance_axis(position: &mut f32, velocity: &mut f32, max: f32) {
        let next = *position + *velocity;
        if (0.0..=max).contains(&next) {
            *position = next;
        } else {
            *velocity = -*velocity;
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SeedSet {
    seeds: Vec<Seed>,
}

impl SeedSet {
    pub fn new(seeds: Vec<Seed>) -> Self {
        Self { seeds }
    }

    pub fn random(
        count: usize,
        size: GridSize,
        speed: RangeInclusive<f32>,
        rand: &mut Random,
    ) -> Self {
        let seeds = (0..count)
            .map(|_| {
                let x = rand.next_in_range(0..size.width) as f32;
                let y = rand.next_in_range(0..size.height) as f32;
                let angle = rand.next_fraction() * TAU;
                let magnitude = rand.next_in_range(speed.clone());
                Seed::new(Vector::new(x, y), Vector::from_polar(angle, magnitude))
            })
            .collect();
        Self::new(seeds)
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Seed> {
        self.seeds.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Seed> {
        self.seeds.get(index)
    }

    pub fn tick(&mut self, size: GridSize) {
        for seed in &mut self.seeds {
            seed.advance(size);
        }
    }

    /// Index of the seed closest to the pixel. Ties go to the lowest index.
    pub fn nearest(&self, col: i64, row: i64) -> Option<usize> {
        let mut best: Option<(usize, u128)> = None;
        for (index, seed) in self.seeds.iter().enumerate() {
            let distance = seed.sq_distance_to(col, row);
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }
}

impl<'a> IntoIterator for &'a SeedSet {
    type Item = &'a Seed;
    type IntoIter = Iter<'a, Seed>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
