use glam::DVec3;

use crate::noise::NoiseField;

/// Noise-lattice distance between adjacent quads, per axis. Fixed regardless
/// of quad size, so quad size controls mesh density without changing the
/// sampled frequency.
const NOISE_STEP: f64 = 0.02;

/// Sample spacing for raw heightfield planes.
const PLANE_STEP: f64 = 0.2;

/// How a quad picks noise coordinates for its far (+x / +y) corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerSampling {
    /// Every corner samples at its own lattice offset, so neighboring quads
    /// share corner samples and the surface is continuous across quad edges.
    Shared,
    /// Far-corner offsets are multiplied by the quad's row/column index, and
    /// the +x corner takes the raw row index as its y coordinate. Neighboring
    /// quads do not share far-corner samples; the surface reads as detached
    /// plateaus that spread with distance from the origin.
    IndexScaled,
}

impl Default for CornerSampling {
    fn default() -> Self {
        Self::Shared
    }
}

/// One terrain cell: a world-space square with an elevation at each corner.
///
/// Corner order is (origin, +y edge, +x+y corner, +x edge) and is what the
/// mesher's triangulation assumes.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainQuad {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub elevations: [f64; 4],
}

impl TerrainQuad {
    /// Corner positions as (x, y, elevation) points, in corner order.
    pub fn corners(&self) -> [DVec3; 4] {
        [
            DVec3::new(self.x, self.y, self.elevations[0]),
            DVec3::new(self.x, self.y + self.size, self.elevations[1]),
            DVec3::new(self.x + self.size, self.y + self.size, self.elevations[2]),
            DVec3::new(self.x + self.size, self.y, self.elevations[3]),
        ]
    }
}

/// Row-major grid of terrain quads produced by one `generate` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeightGrid {
    pub quads: Vec<Vec<TerrainQuad>>,
}

impl HeightGrid {
    pub fn rows(&self) -> usize {
        self.quads.len()
    }

    pub fn cols(&self) -> usize {
        self.quads.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }
}

/// Produces scrolling heightfield grids from a seeded noise field.
///
/// Holds no per-frame state: callers regenerate the grid every tick with an
/// advancing `z_offset` to animate the terrain.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    noise: NoiseField,
    corner_sampling: CornerSampling,
}

impl TerrainGenerator {
    pub fn new(seed: u32) -> Self {
        Self::with_corner_sampling(seed, CornerSampling::default())
    }

    pub fn with_corner_sampling(seed: u32, corner_sampling: CornerSampling) -> Self {
        Self {
            noise: NoiseField::new(seed),
            corner_sampling,
        }
    }

    /// The underlying noise field.
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Generate a quad grid covering `width` x `height` world units.
    ///
    /// Dimensions truncate: `rows = floor(height / quad_size)`,
    /// `cols = floor(width / quad_size)`. The quad at row `i`, column `j`
    /// has origin `(j * quad_size, i * quad_size)`. A non-positive width,
    /// height, or quad size yields an empty grid rather than an error.
    /// `z_offset` is fed through as the noise third coordinate, so advancing
    /// it scrolls elevations without moving the x/y lattice.
    pub fn generate(&self, width: f64, height: f64, quad_size: f64, z_offset: f64) -> HeightGrid {
        if width <= 0.0 || height <= 0.0 || quad_size <= 0.0 {
            return HeightGrid::default();
        }

        let rows = (height / quad_size).floor() as usize;
        let cols = (width / quad_size).floor() as usize;

        let mut quads = Vec::with_capacity(rows);
        let mut y_off = 0.0;
        for row in 0..rows {
            let mut quad_row = Vec::with_capacity(cols);
            let mut x_off = 0.0;
            for col in 0..cols {
                quad_row.push(TerrainQuad {
                    x: col as f64 * quad_size,
                    y: row as f64 * quad_size,
                    size: quad_size,
                    elevations: self.corner_elevations(row, col, x_off, y_off, z_offset),
                });
                x_off += NOISE_STEP;
            }
            quads.push(quad_row);
            y_off += NOISE_STEP;
        }

        log::debug!(
            "generated height grid: {}x{} ({} quads)",
            rows,
            cols,
            rows * cols
        );

        HeightGrid { quads }
    }

    fn corner_elevations(
        &self,
        row: usize,
        col: usize,
        x_off: f64,
        y_off: f64,
        z: f64,
    ) -> [f64; 4] {
        match self.corner_sampling {
            CornerSampling::Shared => [
                self.noise.sample(x_off, y_off, z),
                self.noise.sample(x_off, y_off + NOISE_STEP, z),
                self.noise.sample(x_off + NOISE_STEP, y_off + NOISE_STEP, z),
                self.noise.sample(x_off + NOISE_STEP, y_off, z),
            ],
            CornerSampling::IndexScaled => [
                self.noise.sample(x_off, y_off, z),
                self.noise.sample(x_off, (row + 1) as f64 * y_off, z),
                self.noise
                    .sample((col + 1) as f64 * x_off, (row + 1) as f64 * y_off, z),
                self.noise.sample((col + 1) as f64 * x_off, row as f64, z),
            ],
        }
    }

    /// Sample a raw heightfield lattice of `width` x `height` points at a
    /// fixed spacing, `z` fed through as the noise third coordinate.
    pub fn generate_plane(&self, width: u32, height: u32, z: f64) -> Vec<Vec<f64>> {
        let mut plane = Vec::with_capacity(height as usize);
        let mut y_off = 0.0;
        for _ in 0..height {
            let mut row = Vec::with_capacity(width as usize);
            let mut x_off = 0.0;
            for _ in 0..width {
                row.push(self.noise.sample(x_off, y_off, z));
                x_off += PLANE_STEP;
            }
            plane.push(row);
            y_off += PLANE_STEP;
        }
        plane
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> TerrainGenerator {
        TerrainGenerator::new(1337)
    }

    #[test]
    fn test_grid_dimensions_follow_extent() {
        let grid = generator().generate(100.0, 100.0, 1.0, 0.0);
        assert_eq!(grid.rows(), 100);
        assert_eq!(grid.cols(), 100);
    }

    #[test]
    fn test_fractional_extents_truncate() {
        let grid = generator().generate(10.5, 7.9, 2.0, 0.0);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 5);
    }

    #[test]
    fn test_non_positive_extents_yield_empty_grid() {
        let gen = generator();
        assert!(gen.generate(0.0, 100.0, 1.0, 0.0).is_empty());
        assert!(gen.generate(100.0, 0.0, 1.0, 0.0).is_empty());
        assert!(gen.generate(100.0, 100.0, 0.0, 0.0).is_empty());
        assert!(gen.generate(-5.0, 100.0, 1.0, 0.0).is_empty());
        assert!(gen.generate(100.0, 100.0, -1.0, 0.0).is_empty());
    }

    #[test]
    fn test_quad_origins_follow_lattice() {
        let grid = generator().generate(8.0, 6.0, 2.0, 0.0);
        for (i, row) in grid.quads.iter().enumerate() {
            for (j, quad) in row.iter().enumerate() {
                assert_eq!(quad.x, j as f64 * 2.0);
                assert_eq!(quad.y, i as f64 * 2.0);
                assert_eq!(quad.size, 2.0);
            }
        }
    }

    #[test]
    fn test_elevations_stay_in_noise_range() {
        let grid = generator().generate(30.0, 30.0, 1.0, 2.5);
        for row in &grid.quads {
            for quad in row {
                for &e in &quad.elevations {
                    assert!((-1.0..=1.0).contains(&e));
                }
            }
        }
    }

    #[test]
    fn test_shared_sampling_is_continuous_between_neighbors() {
        let grid = generator().generate(20.0, 20.0, 1.0, 0.0);

        for row in &grid.quads {
            for pair in row.windows(2) {
                assert_eq!(pair[0].elevations[3], pair[1].elevations[0]);
                assert_eq!(pair[0].elevations[2], pair[1].elevations[1]);
            }
        }

        for rows in grid.quads.windows(2) {
            for (upper, lower) in rows[0].iter().zip(rows[1].iter()) {
                assert_eq!(upper.elevations[1], lower.elevations[0]);
                assert_eq!(upper.elevations[2], lower.elevations[3]);
            }
        }
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let gen = generator();
        let a = gen.generate(30.0, 30.0, 1.0, 0.5);
        let b = gen.generate(30.0, 30.0, 1.0, 0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_scroll_offset_moves_elevations_not_lattice() {
        let gen = generator();
        let a = gen.generate(10.0, 10.0, 1.0, 0.0);
        let b = gen.generate(10.0, 10.0, 1.0, 0.5);

        assert_ne!(a, b);
        for (row_a, row_b) in a.quads.iter().zip(b.quads.iter()) {
            for (qa, qb) in row_a.iter().zip(row_b.iter()) {
                assert_eq!(qa.x, qb.x);
                assert_eq!(qa.y, qb.y);
                assert_eq!(qa.size, qb.size);
            }
        }
    }

    #[test]
    fn test_shared_corners_match_direct_samples() {
        let gen = generator();
        let grid = gen.generate(4.0, 4.0, 1.0, 0.25);
        let nn = gen.noise();

        // Quad (1, 1) sits one accumulator step along each axis
        let q = &grid.quads[1][1];
        assert_eq!(q.elevations[0], nn.sample(NOISE_STEP, NOISE_STEP, 0.25));
        assert_eq!(
            q.elevations[1],
            nn.sample(NOISE_STEP, NOISE_STEP + NOISE_STEP, 0.25)
        );
        assert_eq!(
            q.elevations[2],
            nn.sample(NOISE_STEP + NOISE_STEP, NOISE_STEP + NOISE_STEP, 0.25)
        );
        assert_eq!(
            q.elevations[3],
            nn.sample(NOISE_STEP + NOISE_STEP, NOISE_STEP, 0.25)
        );
    }

    #[test]
    fn test_index_scaled_corners_match_their_formulas() {
        let gen = TerrainGenerator::with_corner_sampling(7, CornerSampling::IndexScaled);
        let grid = gen.generate(6.0, 6.0, 1.0, 0.25);
        let nn = gen.noise();

        let q = &grid.quads[1][1];
        let off = NOISE_STEP;
        assert_eq!(q.elevations[0], nn.sample(off, off, 0.25));
        assert_eq!(q.elevations[1], nn.sample(off, 2.0 * off, 0.25));
        assert_eq!(q.elevations[2], nn.sample(2.0 * off, 2.0 * off, 0.25));
        assert_eq!(q.elevations[3], nn.sample(2.0 * off, 1.0, 0.25));
    }

    #[test]
    fn test_quad_corners_accessor_order() {
        let quad = TerrainQuad {
            x: 3.0,
            y: 5.0,
            size: 2.0,
            elevations: [0.1, 0.2, 0.3, 0.4],
        };
        let corners = quad.corners();
        assert_eq!(corners[0], DVec3::new(3.0, 5.0, 0.1));
        assert_eq!(corners[1], DVec3::new(3.0, 7.0, 0.2));
        assert_eq!(corners[2], DVec3::new(5.0, 7.0, 0.3));
        assert_eq!(corners[3], DVec3::new(5.0, 5.0, 0.4));
    }

    #[test]
    fn test_plane_dimensions_and_samples() {
        let gen = generator();
        let plane = gen.generate_plane(4, 3, 1.5);

        assert_eq!(plane.len(), 3);
        for row in &plane {
            assert_eq!(row.len(), 4);
        }
        assert_eq!(plane[1][1], gen.noise().sample(PLANE_STEP, PLANE_STEP, 1.5));
        assert_eq!(plane, gen.generate_plane(4, 3, 1.5));
    }

    #[test]
    fn test_empty_plane() {
        let gen = generator();
        assert!(gen.generate_plane(0, 3, 0.0).iter().all(Vec::is_empty));
        assert!(gen.generate_plane(3, 0, 0.0).is_empty());
    }
}
