pub mod heightfield;
pub mod mesher;
pub mod noise;

// Re-export commonly used items
pub use heightfield::{CornerSampling, HeightGrid, TerrainGenerator, TerrainQuad};
pub use mesher::{build_mesh, build_mesh_into, TerrainMesh, TerrainVertex};
pub use noise::NoiseField;
