//! Nearest-seed region assignment. Both formulations color each pixel with the palette
//! color of its closest seed under squared distance, ties going to the lower seed index.

use crate::seed::SeedSet;
use crate::Palette;
use raster_grid::Raster;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssignStrategy {
    /// Seed-major passes over the whole raster, keeping the best distance per pixel.
    #[default]
    Depth,
    /// Pixel-major: one scan over the seeds for each pixel.
    Scan,
}

impl AssignStrategy {
    pub fn assign(self, raster: &mut Raster, seeds: &SeedSet, palette: &Palette) {
        match self {
            AssignStrategy::Depth => assign_by_depth(raster, seeds, palette),
            AssignStrategy::Scan => assign_by_scan(raster, seeds, palette),
        }
    }
}

pub fn assign_by_depth(raster: &mut Raster, seeds: &SeedSet, palette: &Palette) {
    raster.reset_depths();
    for (index, seed) in seeds.iter().enumerate() {
        let color = palette.color_for(index);
        for (loc, cell_color, depth) in raster.cells_iter_mut() {
            let distance = seed.sq_distance_to(loc.col as i64, loc.row as i64);
            // Strict: an equally distant later seed never takes the pixel. The first
            // seed claims everything, even at a saturated distance.
            if index == 0 || distance < *depth {
                *depth = distance;
                *cell_color = color;
            }
        }
    }
}

pub fn assign_by_scan(raster: &mut Raster, seeds: &SeedSet, palette: &Palette) {
    if seeds.is_empty() {
        return;
    }
    for (loc, cell_color) in raster.colors_iter_mut() {
        if let Some(index) = seeds.nearest(loc.col as i64, loc.row as i64) {
            *cell_color = palette.color_for(index);
        }
    }
}
