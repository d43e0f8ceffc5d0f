use voxel_terrain::engine_state::rendering::meshing::{build_mesh, MeshInput};
use voxel_terrain::engine_state::voxels::block::BlockSide;
use voxel_terrain::engine_state::voxels::coords::{Cardinal, ChunkCoord, ChunkDimensions};
use voxel_terrain::engine_state::voxels::generation::TerrainGenerator;
use voxel_terrain::{BlockType, ChunkMesh, WorldConfig};

const DIMS: ChunkDimensions = ChunkDimensions::new(6, 10);

fn mesh(blocks: &[u8], neighbours: [Option<&[u8]>; 4]) -> ChunkMesh {
    build_mesh(&MeshInput {
        dims: DIMS,
        blocks,
        neighbours,
        atlas_size: 16,
    })
}

/// Straightforward face count: a face shows unless the cell across it is
/// opaque, the same block, or a missing neighbour.
fn reference_face_count(blocks: &[u8], neighbours: [Option<&[u8]>; 4]) -> usize {
    let w = DIMS.width as i32;
    let mut count = 0;
    for y in 0..DIMS.height as i32 {
        for z in 0..w {
            for x in 0..w {
                let block = BlockType::from_id(blocks[DIMS.index(x as usize, y as usize, z as usize)]);
                if block == BlockType::Air {
                    continue;
                }
                for side in BlockSide::all() {
                    let [dx, dy, dz] = side.offset();
                    let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                    if ny < 0 || ny >= DIMS.height as i32 {
                        count += 1;
                        continue;
                    }
                    let across = if (0..w).contains(&nx) && (0..w).contains(&nz) {
                        Some(blocks[DIMS.index(nx as usize, ny as usize, nz as usize)])
                    } else {
                        let (dir, lx, lz) = if nz >= w {
                            (Cardinal::North, nx, 0)
                        } else if nz < 0 {
                            (Cardinal::South, nx, w - 1)
                        } else if nx >= w {
                            (Cardinal::East, 0, nz)
                        } else {
                            (Cardinal::West, w - 1, nz)
                        };
                        neighbours[dir as usize]
                            .map(|n| n[DIMS.index(lx as usize, ny as usize, lz as usize)])
                    };
                    if let Some(id) = across {
                        let other = BlockType::from_id(id);
                        if !other.is_opaque() && other != block {
                            count += 1;
                        }
                    }
                }
            }
        }
    }
    count
}

fn random_blocks(rng: &mut fastrand::Rng) -> Vec<u8> {
    let palette = [
        BlockType::Air,
        BlockType::Air,
        BlockType::Air,
        BlockType::Stone,
        BlockType::Dirt,
        BlockType::Water,
        BlockType::GrassPlant,
    ];
    (0..DIMS.volume())
        .map(|_| palette[rng.usize(..palette.len())].id())
        .collect()
}

#[test]
fn random_chunks_match_the_reference_count() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    for _ in 0..8 {
        let blocks = random_blocks(&mut rng);
        let north = random_blocks(&mut rng);
        let west = random_blocks(&mut rng);
        let neighbours = [Some(north.as_slice()), None, None, Some(west.as_slice())];

        let mesh = mesh(&blocks, neighbours);
        assert_eq!(mesh.face_count(), reference_face_count(&blocks, neighbours));
    }
}

#[test]
fn buffers_stay_consistent() {
    let mut rng = fastrand::Rng::with_seed(17);
    let blocks = random_blocks(&mut rng);
    let mesh = mesh(&blocks, [None; 4]);
    let faces = mesh.face_count();

    assert_eq!(mesh.vertices.len(), faces * 4);
    assert_eq!(mesh.normals.len(), faces * 4);
    assert_eq!(mesh.uvs.len(), faces * 4);
    assert_eq!(mesh.opaque_indices.len() + mesh.transparent_indices.len(), faces * 6);
    assert!(mesh
        .opaque_indices
        .iter()
        .chain(&mesh.transparent_indices)
        .all(|&i| (i as usize) < mesh.vertices.len()));
    assert!(mesh.uvs.iter().flatten().all(|uv| (0.0..=1.0).contains(uv)));

    assert_eq!(mesh.vertex_bytes().len(), mesh.vertices.len() * 12);
    assert_eq!(mesh.uv_bytes().len(), mesh.uvs.len() * 8);
    assert_eq!(mesh.opaque_index_bytes().len(), mesh.opaque_indices.len() * 4);
}

#[test]
fn neighbours_only_add_border_faces() {
    let cfg = WorldConfig {
        chunk_width: DIMS.width,
        chunk_height: DIMS.height,
        min_terrain_height: 1,
        max_terrain_height: 6,
        water_level: 4,
        ..WorldConfig::default()
    };
    let generator = TerrainGenerator::new(&cfg);
    let center = ChunkCoord::new(4, 4);
    let blocks = generator.generate(center).blocks;
    let around: Vec<Vec<u8>> = center
        .cardinal_neighbours()
        .iter()
        .map(|c| generator.generate(*c).blocks)
        .collect();

    let closed = mesh(&blocks, [None; 4]);
    let open = mesh(
        &blocks,
        [
            Some(around[0].as_slice()),
            Some(around[1].as_slice()),
            Some(around[2].as_slice()),
            Some(around[3].as_slice()),
        ],
    );

    assert!(open.face_count() >= closed.face_count());
    // Bedrock floor is always drawn from below.
    assert!(closed.opaque_face_count() >= DIMS.columns());
}

#[test]
fn water_faces_go_to_the_transparent_pass() {
    let mut blocks = vec![BlockType::Air.id(); DIMS.volume()];
    blocks[DIMS.index(2, 3, 2)] = BlockType::Water.id();
    blocks[DIMS.index(3, 3, 2)] = BlockType::Water.id();

    let mesh = mesh(&blocks, [None; 4]);
    assert_eq!(mesh.opaque_face_count(), 0);
    assert_eq!(mesh.transparent_face_count(), 10);
}
