#![deny(clippy::all)]
#![forbid(unsafe_code)]

pub mod assign;
pub mod seed;

pub use assign::AssignStrategy;
pub use seed::{Seed, SeedSet, Vector};

use raster_grid::{GridSize, Random, Raster, Rgba, World};
use std::ops::RangeInclusive;

pub const GRUVBOX_BRIGHT_RED: Rgba = Rgba::from_hex(0xfb4934);
pub const GRUVBOX_BRIGHT_GREEN: Rgba = Rgba::from_hex(0xb8bb26);
pub const GRUVBOX_BRIGHT_YELLOW: Rgba = Rgba::from_hex(0xfabd2f);
pub const GRUVBOX_BRIGHT_BLUE: Rgba = Rgba::from_hex(0x83a598);
pub const GRUVBOX_BRIGHT_PURPLE: Rgba = Rgba::from_hex(0xd3869b);
pub const GRUVBOX_BRIGHT_AQUA: Rgba = Rgba::from_hex(0x8ec07c);
pub const GRUVBOX_BRIGHT_ORANGE: Rgba = Rgba::from_hex(0xfe8019);

/// Region colors, handed out to seeds by index modulo length.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    pub fn new(colors: Vec<Rgba>) -> Self {
        assert!(!colors.is_empty());
        Self { colors }
    }

    pub fn gruvbox() -> Self {
        Self::new(vec![
            GRUVBOX_BRIGHT_RED,
            GRUVBOX_BRIGHT_GREEN,
            GRUVBOX_BRIGHT_YELLOW,
            GRUVBOX_BRIGHT_BLUE,
            GRUVBOX_BRIGHT_PURPLE,
            GRUVBOX_BRIGHT_AQUA,
            GRUVBOX_BRIGHT_ORANGE,
        ])
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color_for(&self, seed_index: usize) -> Rgba {
        self.colors[seed_index % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::gruvbox()
    }
}

#[derive(Clone, Debug)]
pub struct VoronoiConfig {
    pub grid_size: GridSize,
    pub seed_count: usize,
    pub palette: Palette,
    pub background: Rgba,
    pub marker_color: Rgba,
    pub marker_radius: u32,
    pub speed: RangeInclusive<f32>,
    pub strategy: AssignStrategy,
}

impl Default for VoronoiConfig {
    fn default() -> Self {
        Self {
            grid_size: GridSize::new(800, 600),
            seed_count: 20,
            palette: Palette::gruvbox(),
            background: Rgba::from_hex(0x181818),
            marker_color: Rgba::BLACK,
            marker_radius: 5,
            speed: 10.0..=20.0,
            strategy: AssignStrategy::Depth,
        }
    }
}

/// Owns the raster and the seeds; each update is one animation tick.
#[derive(Debug)]
pub struct VoronoiWorld {
    config: VoronoiConfig,
    raster: Raster,
    seeds: SeedSet,
}

impl VoronoiWorld {
    pub fn new(config: VoronoiConfig, rand: &mut Random) -> Self {
        let seeds = SeedSet::random(
            config.seed_count,
            config.grid_size,
            config.speed.clone(),
            rand,
        );
        Self::with_seeds(config, seeds)
    }

    pub fn with_seeds(config: VoronoiConfig, seeds: SeedSet) -> Self {
        log::info!(
            "Voronoi world {}x{} with {} seeds, {:?} assignment",
            config.grid_size.width,
            config.grid_size.height,
            seeds.len(),
            config.strategy
        );
        let mut result = Self {
            raster: Raster::new(config.grid_size),
            config,
            seeds,
        };
        result.render();
        result
    }

    pub fn seeds(&self) -> &SeedSet {
        &self.seeds
    }

    fn render(&mut self) {
        self.raster.fill(self.config.background);
        self.config
            .strategy
            .assign(&mut self.raster, &self.seeds, &self.config.palette);
        self.render_seed_markers();
    }

    fn render_seed_markers(&mut self) {
        for seed in &self.seeds {
            let (col, row) = seed.marker_center();
            self.raster.stamp_disc(
                col,
                row,
                self.config.marker_radius,
                self.config.marker_color,
            );
        }
    }
}

impl World for VoronoiWorld {
    fn raster(&self) -> &Raster {
        &self.raster
    }

    fn update(&mut self) {
        self.seeds.tick(self.config.grid_size);
        self.render();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_grid::Loc;

    fn small_config() -> VoronoiConfig {
        VoronoiConfig {
            grid_size: GridSize::new(40, 30),
            marker_radius: 2,
            ..VoronoiConfig::default()
        }
    }

    #[test]
    fn palette_wraps_around() {
        let palette = Palette::gruvbox();
        assert_eq!(palette.len(), 7);
        assert_eq!(palette.color_for(7), palette.color_for(0));
        assert_eq!(palette.color_for(19), palette.color_for(5));
        assert_ne!(palette.color_for(1), palette.color_for(0));
    }

    #[test]
    fn palette_colors_are_opaque_and_distinct() {
        let palette = Palette::gruvbox();
        for i in 0..palette.len() {
            assert_eq!(palette.color_for(i).a, 0xff);
            for j in 0..i {
                assert_ne!(palette.color_for(i), palette.color_for(j));
            }
        }
    }

    #[test]
    #[should_panic]
    fn empty_palette_is_rejected() {
        Palette::new(vec![]);
    }

    #[test]
    fn default_config_matches_fixed_constants() {
        let config = VoronoiConfig::default();
        assert_eq!(config.grid_size, GridSize::new(800, 600));
        assert_eq!(config.seed_count, 20);
        assert_eq!(config.marker_radius, 5);
        assert_eq!(config.speed, 10.0..=20.0);
    }

    #[test]
    fn new_world_is_rendered_with_markers() {
        let seeds = SeedSet::new(vec![Seed::at(10.0, 10.0), Seed::at(30.0, 20.0)]);
        let world = VoronoiWorld::with_seeds(small_config(), seeds);
        let raster = world.raster();

        assert_eq!(raster[Loc::new(10, 10)], Rgba::BLACK);
        assert_eq!(raster[Loc::new(12, 10)], Rgba::BLACK);
        assert_eq!(raster[Loc::new(0, 0)], GRUVBOX_BRIGHT_RED);
        assert_eq!(raster[Loc::new(29, 39)], GRUVBOX_BRIGHT_GREEN);
    }

    #[test]
    fn update_moves_seeds_then_redraws() {
        let seeds = SeedSet::new(vec![
            Seed::new(Vector::new(10.0, 10.0), Vector::new(5.0, 0.0)),
            Seed::at(35.0, 25.0),
        ]);
        let mut world = VoronoiWorld::with_seeds(small_config(), seeds);
        world.update();

        assert_eq!(world.seeds().get(0).unwrap().position, Vector::new(15.0, 10.0));
        let raster = world.raster();
        assert_eq!(raster[Loc::new(10, 15)], Rgba::BLACK);
        assert_eq!(raster[Loc::new(10, 10)], GRUVBOX_BRIGHT_RED);
    }

    #[test]
    fn markers_are_stamped_at_rounded_positions() {
        let config = VoronoiConfig {
            marker_radius: 0,
            ..small_config()
        };
        let seeds = SeedSet::new(vec![Seed::at(10.6, 10.4)]);
        let world = VoronoiWorld::with_seeds(config, seeds);
        assert_eq!(world.raster()[Loc::new(10, 11)], Rgba::BLACK);
        assert_eq!(world.raster()[Loc::new(10, 10)], GRUVBOX_BRIGHT_RED);
    }

    #[test]
    fn seed_far_off_the_grid_renders_frames() {
        let config = VoronoiConfig {
            grid_size: GridSize::new(10, 10),
            ..small_config()
        };
        let seeds = SeedSet::new(vec![
            Seed::at(5.0, 5.0),
            Seed::new(Vector::new(1.0e20, 5.0), Vector::new(3.0, 0.0)),
            Seed::at(4.0e9, -1.0e20),
        ]);
        let mut world = VoronoiWorld::with_seeds(config, seeds);
        for _ in 0..3 {
            world.update();
        }

        let raster = world.raster();
        assert_eq!(raster[Loc::new(5, 5)], Rgba::BLACK);
        assert_eq!(raster[Loc::new(0, 0)], GRUVBOX_BRIGHT_RED);
        assert_eq!(raster[Loc::new(9, 9)], GRUVBOX_BRIGHT_RED);
        assert_eq!(world.seeds().get(1).unwrap().position.x, 1.0e20);
    }

    #[test]
    fn world_without_seeds_shows_background() {
        let config = VoronoiConfig {
            seed_count: 0,
            ..small_config()
        };
        let mut world = VoronoiWorld::new(config, &mut Random::from_seed(1));
        world.update();
        assert!(
            world
                .raster()
                .colors_iter()
                .all(|&color| color == Rgba::from_hex(0x181818))
        );
    }

    #[test]
    fn strategies_render_identical_frames() {
        let depth_config = small_config();
        let scan_config = VoronoiConfig {
            strategy: AssignStrategy::Scan,
            ..small_config()
        };
        let mut depth_world = VoronoiWorld::new(depth_config, &mut Random::from_seed(42));
        let mut scan_world = VoronoiWorld::new(scan_config, &mut Random::from_seed(42));
        for _ in 0..10 {
            depth_world.update();
            scan_world.update();
            assert!(
                depth_world
                    .raster()
                    .colors_iter()
                    .eq(scan_world.raster().colors_iter())
            );
        }
    }

    #[test]
    fn alpha_stays_opaque_across_frames() {
        let mut world = VoronoiWorld::new(small_config(), &mut Random::from_seed(8));
        for _ in 0..5 {
            world.update();
            assert!(world.raster().colors_iter().all(|color| color.a == 0xff));
        }
    }
}
