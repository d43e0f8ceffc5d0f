//! # Voxel Terrain Demo
//!
//! Walks an observer across the world for a fixed number of ticks and logs what
//! the pipeline produced. Takes an optional path to a JSON world config.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- world.json
//! ```

use std::process::ExitCode;

use log::{error, info};
use web_time::{Duration, Instant};

use voxel_terrain::{EngineState, WorldConfig};

const TICKS: usize = 600;
const TICK: Duration = Duration::from_millis(16);

fn main() -> ExitCode {
    voxel_terrain::init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => WorldConfig::from_file(&path),
        None => Ok(WorldConfig::default()),
    };
    let mut engine = match config.and_then(EngineState::new) {
        Ok(engine) => engine,
        Err(err) => {
            error!("Invalid world configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let seed = engine.chunk_manager().config().seed as u64;
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut observer = engine.spawn_point();
    let (mut uploads, mut faces, mut released) = (0usize, 0usize, 0usize);
    let start = Instant::now();

    for _ in 0..TICKS {
        let tick_start = Instant::now();

        observer.x += rng.f32() * 2.0 - 0.5;
        observer.z += rng.f32() * 2.0 - 0.5;
        if let Some(report) = engine.process_input(observer) {
            info!("Entered {:?}: {:?}", engine.current_chunk(), report);
        }

        engine.process_tasks();
        for upload in engine.drain_mesh_uploads() {
            uploads += 1;
            faces += upload.mesh.face_count();
        }
        engine.drain_visibility_changes();
        released += engine.drain_evictions().len();

        if let Some(rest) = TICK.checked_sub(tick_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    let manager = engine.chunk_manager();
    info!(
        "{} ticks in {:?}: {} meshes uploaded ({} faces), {} released, {} resident, {} active, {:?}",
        TICKS,
        start.elapsed(),
        uploads,
        faces,
        released,
        manager.resident_count(),
        manager.active_count(),
        manager.stats()
    );
    ExitCode::SUCCESS
}
