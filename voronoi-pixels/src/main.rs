#![deny(clippy::all)]
#![forbid(unsafe_code)]

use pixels_main_support::animate;
use raster_grid::ppm::save_ppm;
use raster_grid::{Random, World};
use std::process::ExitCode;
use std::time::Duration;
use voronoi_grid::{VoronoiConfig, VoronoiWorld};

const TITLE: &str = "Voronoi";
const TIME_STEP: Duration = Duration::from_micros(1_000_000 / 60);
const OUTPUT_FILE_PATH: &str = "output.ppm";

fn main() -> ExitCode {
    env_logger::init();

    let world = VoronoiWorld::new(VoronoiConfig::default(), &mut Random::new());
    let world = match animate(TITLE, TIME_STEP, world) {
        Ok(world) => world,
        Err(err) => {
            eprintln!("ERROR: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = save_ppm(world.raster(), OUTPUT_FILE_PATH) {
        eprintln!("ERROR: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
