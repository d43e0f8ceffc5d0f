use std::collections::HashSet;

use cgmath::Point3;
use web_time::Duration;

use voxel_terrain::engine_state::voxels::chunk_manager::desired_set;
use voxel_terrain::{BlockType, ChunkCoord, ChunkStatus, EngineState, WorldConfig};

const WIDTH: usize = 8;
const TIMEOUT: Duration = Duration::from_secs(60);

fn config() -> WorldConfig {
    WorldConfig {
        seed: 2024,
        chunk_width: WIDTH,
        chunk_height: 64,
        world_size_in_chunks: 32,
        view_distance: 1,
        min_terrain_height: 4,
        max_terrain_height: 40,
        water_level: 20,
        worker_threads: 2,
        ..WorldConfig::default()
    }
}

/// Centre of a chunk, high above the terrain.
fn above(coord: ChunkCoord) -> Point3<f32> {
    let half = WIDTH as f32 / 2.0;
    Point3::new(
        (coord.x * WIDTH as i32) as f32 + half,
        60.0,
        (coord.z * WIDTH as i32) as f32 + half,
    )
}

fn settle(engine: &mut EngineState) {
    assert!(
        engine.chunk_manager_mut().run_until_idle(TIMEOUT),
        "pipeline did not drain"
    );
}

fn window(center: ChunkCoord) -> HashSet<ChunkCoord> {
    (-1..=1)
        .flat_map(|dx| (-1..=1).map(move |dz| ChunkCoord::new(center.x + dx, center.z + dz)))
        .collect()
}

fn column(x: i32, zs: std::ops::RangeInclusive<i32>) -> HashSet<ChunkCoord> {
    zs.map(|z| ChunkCoord::new(x, z)).collect()
}

/// Highest non-air y of a world column.
fn top(engine: &EngineState, x: i32, z: i32) -> i32 {
    (0..64)
        .rev()
        .find(|y| engine.get_block(Point3::new(x, *y, z)) != BlockType::Air)
        .expect("column has bedrock")
}

#[test]
fn spawn_window_is_meshed_and_shown() {
    let mut engine = EngineState::new(config()).unwrap();
    settle(&mut engine);

    let center = ChunkCoord::new(16, 16);
    assert_eq!(engine.current_chunk(), Some(center));

    let manager = engine.chunk_manager();
    let active: HashSet<_> = manager.active_chunks().collect();
    assert_eq!(active, window(center));
    for coord in &active {
        assert_eq!(manager.status(*coord), ChunkStatus::Ready { active: true });
    }
    // The ring around the window is resident for border culling but not meshed.
    assert_eq!(manager.status(ChunkCoord::new(18, 16)), ChunkStatus::Parked);
    assert_eq!(manager.status(ChunkCoord::new(20, 16)), ChunkStatus::NotTracked);

    let uploads: HashSet<_> = engine.drain_mesh_uploads().into_iter().map(|u| u.coord).collect();
    assert_eq!(uploads, active);

    let shown = engine.drain_visibility_changes();
    assert_eq!(shown.len(), 9);
    assert!(shown.iter().all(|change| change.visible));
}

#[test]
fn moving_one_chunk_swaps_the_edge_columns() {
    let mut engine = EngineState::new(config()).unwrap();
    settle(&mut engine);
    engine.drain_mesh_uploads();
    engine.drain_visibility_changes();

    let report = engine.process_input(above(ChunkCoord::new(17, 16))).unwrap();
    assert_eq!(report.activated, 3);
    assert_eq!(report.deactivated, 3);
    assert_eq!(report.created, 0);

    let hidden = engine.drain_visibility_changes();
    assert_eq!(hidden.len(), 3);
    assert!(hidden.iter().all(|c| !c.visible && c.coord.x == 15));

    settle(&mut engine);
    let manager = engine.chunk_manager();
    for z in 15..=17 {
        let left = ChunkCoord::new(15, z);
        assert!(!manager.is_active(left));
        assert!(manager.world().get().contains(left));
        assert_eq!(manager.status(left), ChunkStatus::Ready { active: false });

        let entered = ChunkCoord::new(18, z);
        assert_eq!(manager.status(entered), ChunkStatus::Ready { active: true });
    }

    let shown: HashSet<_> = engine
        .drain_visibility_changes()
        .into_iter()
        .filter(|c| c.visible)
        .map(|c| c.coord)
        .collect();
    assert_eq!(shown, column(18, 15..=17));
}

#[test]
fn staying_inside_a_chunk_does_not_reconcile() {
    let mut engine = EngineState::new(config()).unwrap();
    let mut position = above(ChunkCoord::new(16, 16));
    position.x += 1.5;
    assert!(engine.process_input(position).is_none());
}

#[test]
fn desired_set_shifts_by_one_column() {
    let engine = EngineState::new(config()).unwrap();
    let bounds = engine.chunk_manager().bounds();

    let at_origin = desired_set(&bounds, ChunkCoord::new(0, 0), 1);
    let moved = desired_set(&bounds, ChunkCoord::new(1, 0), 1);
    let entering: HashSet<_> = moved.difference(&at_origin).copied().collect();
    assert_eq!(entering, HashSet::from([ChunkCoord::new(2, 0), ChunkCoord::new(2, 1)]));
    assert!(at_origin.difference(&moved).next().is_none());

    let before = desired_set(&bounds, ChunkCoord::new(10, 10), 1);
    let after = desired_set(&bounds, ChunkCoord::new(11, 10), 1);
    let leaving: HashSet<_> = before.difference(&after).copied().collect();
    let entering: HashSet<_> = after.difference(&before).copied().collect();
    assert_eq!(leaving, column(9, 9..=11));
    assert_eq!(entering, column(12, 9..=11));
}

#[test]
fn block_queries_outside_generated_terrain_read_air() {
    let mut engine = EngineState::new(config()).unwrap();
    settle(&mut engine);

    assert_eq!(engine.get_block(Point3::new(-1, 10, 4)), BlockType::Air);
    assert_eq!(engine.get_block(Point3::new(130, -1, 130)), BlockType::Air);
    assert_eq!(engine.get_block(Point3::new(130, 64, 130)), BlockType::Air);
    assert_eq!(engine.get_block(Point3::new(32 * 8, 10, 4)), BlockType::Air);
    // Chunk (0, 0) was never requested.
    assert_eq!(engine.get_block(Point3::new(3, 0, 3)), BlockType::Air);

    assert_eq!(engine.get_block(Point3::new(130, 0, 130)), BlockType::Bedrock);
}

#[test]
fn edit_relights_and_remeshes_the_chunk() {
    let mut engine = EngineState::new(config()).unwrap();
    settle(&mut engine);
    engine.drain_mesh_uploads();

    let coord = ChunkCoord::new(16, 16);
    let (x, z) = (16 * 8 + 3, 16 * 8 + 3);
    let y = top(&engine, x, z) + 1;
    let target = Point3::new(x, y, z);

    assert!(engine.set_block(target, BlockType::Stone));
    assert!(!engine.set_block(target, BlockType::Stone));
    assert_eq!(engine.get_block(target), BlockType::Stone);
    assert_ne!(
        engine.chunk_manager().status(coord),
        ChunkStatus::Ready { active: true }
    );

    settle(&mut engine);
    let manager = engine.chunk_manager();
    assert_eq!(manager.status(coord), ChunkStatus::Ready { active: true });

    let chunk = manager.world().get().get_chunk_at(coord).unwrap();
    let chunk = chunk.get();
    assert_eq!(chunk.light_at(3, y as usize, 3), 0);
    assert_eq!(chunk.light_at(3, y as usize + 1, 3), 15);
    drop(chunk);

    let uploads: Vec<_> = engine.drain_mesh_uploads().into_iter().map(|u| u.coord).collect();
    assert_eq!(uploads, vec![coord]);
}

#[test]
fn border_edit_remeshes_the_neighbour() {
    let mut engine = EngineState::new(config()).unwrap();
    settle(&mut engine);
    engine.drain_mesh_uploads();

    // Local x == 0 of chunk (16, 16) borders chunk (15, 16).
    let (x, z) = (16 * 8, 16 * 8 + 3);
    let y = top(&engine, x, z) + 1;
    assert!(engine.set_block(Point3::new(x, y, z), BlockType::Dirt));

    settle(&mut engine);
    let uploads: HashSet<_> = engine.drain_mesh_uploads().into_iter().map(|u| u.coord).collect();
    assert_eq!(
        uploads,
        HashSet::from([ChunkCoord::new(16, 16), ChunkCoord::new(15, 16)])
    );
}

#[test]
fn editing_an_unloaded_chunk_generates_it_first() {
    let mut engine = EngineState::new(config()).unwrap();
    let target = Point3::new(20, 60, 20);
    assert_eq!(engine.get_block(target), BlockType::Air);

    assert!(engine.set_block(target, BlockType::Sand));
    assert_eq!(engine.get_block(target), BlockType::Sand);
    assert_eq!(engine.get_block(Point3::new(20, 0, 20)), BlockType::Bedrock);
    assert!(engine.chunk_manager().stats().sync_terrain >= 1);

    assert!(!engine.set_block(Point3::new(-5, 10, 5), BlockType::Sand));
    settle(&mut engine);
    assert_eq!(
        engine.chunk_manager().status(ChunkCoord::new(2, 2)),
        ChunkStatus::Parked
    );
}

#[test]
fn structures_are_stamped_once_terrain_lands() {
    let mut engine = EngineState::new(config()).unwrap();
    let target = Point3::new(40, 62, 40);
    assert!(engine
        .chunk_manager_mut()
        .place_structure(target, BlockType::Gravel));
    settle(&mut engine);
    assert_eq!(engine.get_block(target), BlockType::Gravel);
}

#[test]
fn walking_stays_within_the_resident_budget() {
    let cfg = WorldConfig {
        max_resident_chunks: 25,
        ..config()
    };
    let mut engine = EngineState::new(cfg).unwrap();
    settle(&mut engine);

    let mut uploaded: HashSet<ChunkCoord> = HashSet::new();
    let mut evicted: Vec<ChunkCoord> = Vec::new();
    for x in 17..=22 {
        let center = ChunkCoord::new(x, 16);
        engine.process_input(above(center)).unwrap();
        settle(&mut engine);
        uploaded.extend(engine.drain_mesh_uploads().into_iter().map(|u| u.coord));

        let gone = engine.drain_evictions();
        for coord in &gone {
            assert!(!window(center).contains(coord), "active chunk {coord:?} evicted");
        }
        evicted.extend(gone);

        let manager = engine.chunk_manager();
        assert!(manager.resident_count() <= 25, "{} resident", manager.resident_count());
        assert_eq!(manager.active_chunks().collect::<HashSet<_>>(), window(center));
        for coord in window(center) {
            assert_eq!(manager.status(coord), ChunkStatus::Ready { active: true });
        }
    }

    let stats = engine.chunk_manager().stats();
    assert!(stats.evictions > 0);
    assert_eq!(evicted.len() as u64, stats.evictions);
    assert!(
        evicted.iter().any(|coord| uploaded.contains(coord)),
        "no shown chunk was reported as destroyed"
    );
    assert!(engine.drain_evictions().is_empty());
}
