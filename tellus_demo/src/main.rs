use tellus_terrain::{build_mesh_into, TerrainGenerator, TerrainMesh};

const SEED: u32 = 1337;
const GRID_WIDTH: f64 = 100.0;
const GRID_HEIGHT: f64 = 100.0;
const QUAD_SIZE: f64 = 1.0;
const SCROLL_STEP: f64 = 0.02;
const TICKS: u32 = 8;

fn main() {
    // Initialize logging
    env_logger::init();

    println!("=== Scrolling Terrain Generation Demo ===\n");

    let generator = TerrainGenerator::new(SEED);
    log::info!("terrain generator ready (seed {})", SEED);

    // One mesh allocation for the whole run; each tick refills it
    let mut mesh = TerrainMesh::default();
    let mut z_offset = 0.0;

    for tick in 0..TICKS {
        let grid = generator.generate(GRID_WIDTH, GRID_HEIGHT, QUAD_SIZE, z_offset);
        build_mesh_into(&grid, &mut mesh);

        log::info!(
            "tick {}: z_offset {:.2}, {} quads -> {} vertices",
            tick,
            z_offset,
            grid.rows() * grid.cols(),
            mesh.vertex_count()
        );
        z_offset += SCROLL_STEP;
    }

    let grid = generator.generate(GRID_WIDTH, GRID_HEIGHT, QUAD_SIZE, 0.0);

    println!("Grid:");
    println!("  Dimensions: {}x{} quads", grid.rows(), grid.cols());
    println!("  Quad Size: {}", QUAD_SIZE);
    println!();

    println!("Quad (0, 0) corners:");
    for corner in grid.quads[0][0].corners() {
        println!("  ({:.3}, {:.3}, {:+.5})", corner.x, corner.y, corner.z);
    }
    println!();

    build_mesh_into(&grid, &mut mesh);
    println!("Mesh:");
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Triangles: {}", mesh.triangle_count());
    println!("  Upload Size: {} KB", mesh.as_bytes().len() / 1024);
    println!();

    let rolling = generator
        .noise()
        .sample_fbm(0.5, 0.5, 0.0, 4, 2.0, 0.5);
    println!("FBM sample at (0.5, 0.5), 4 octaves: {:+.5}", rolling);
}
