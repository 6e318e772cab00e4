use glam::DVec3;

use crate::heightfield::HeightGrid;

/// Corner emission order for the two triangles of a quad. Both triangles
/// share the corner0-corner2 diagonal and wind the same way.
const QUAD_VERTEX_ORDER: [usize; 6] = [0, 1, 2, 0, 3, 2];

/// Bare-position vertex, laid out for direct upload to a GPU vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct TerrainVertex {
    pub position: [f32; 3],
}

/// Flat triangle-vertex stream for a height grid, 6 vertices per quad.
/// No index buffer: consumers draw `vertex_count() / 3` triangles directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainMesh {
    pub vertices: Vec<TerrainVertex>,
}

impl TerrainMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// The vertex stream as raw bytes, ready for a buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Flatten a height grid into a fresh triangle-vertex stream.
pub fn build_mesh(grid: &HeightGrid) -> TerrainMesh {
    let mut mesh = TerrainMesh::default();
    build_mesh_into(grid, &mut mesh);
    mesh
}

/// Flatten a height grid into a caller-owned mesh, reusing its allocation.
///
/// Each row is paired with the row below it; the last row has no partner and
/// is never the top of a strip, so a grid with fewer than two rows produces
/// an empty mesh. The quad's four logical corners combine the current quad's
/// origin-edge elevations with the next row's, keeping consecutive strips
/// joined along their shared edge.
pub fn build_mesh_into(grid: &HeightGrid, mesh: &mut TerrainMesh) {
    mesh.vertices.clear();

    let rows = grid.rows();
    if rows < 2 {
        return;
    }
    mesh.vertices.reserve((rows - 1) * grid.cols() * 6);

    for (row, row_below) in grid.quads.iter().zip(grid.quads.iter().skip(1)) {
        for (quad, below) in row.iter().zip(row_below.iter()) {
            let corners = [
                DVec3::new(quad.x, quad.y, quad.elevations[0]),
                DVec3::new(quad.x, quad.y + quad.size, below.elevations[0]),
                DVec3::new(quad.x + quad.size, quad.y + quad.size, below.elevations[3]),
                DVec3::new(quad.x + quad.size, quad.y, quad.elevations[3]),
            ];

            for &corner in QUAD_VERTEX_ORDER.iter() {
                mesh.vertices.push(TerrainVertex {
                    position: corners[corner].as_vec3().to_array(),
                });
            }
        }
    }

    log::debug!(
        "meshed height grid: {} vertices ({} triangles)",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
}
