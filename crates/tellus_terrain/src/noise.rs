use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// Seeded 3D gradient noise backed by a permutation table.
///
/// The table is a pseudo-random permutation of 0..=255 derived entirely from
/// the seed, duplicated to 512 entries so corner hashing never needs a
/// modulo. Two fields built with the same seed produce bit-identical output
/// for every input. Values stay inside [-1.0, 1.0] for all finite inputs;
/// NaN or infinite coordinates are the caller's problem.
#[derive(Debug, Clone)]
pub struct NoiseField {
    perm: [u8; 512],
}

impl NoiseField {
    /// Build a noise field from a seed. Total for any seed.
    pub fn new(seed: u32) -> Self {
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }

        // PCG keeps the shuffle stable across platforms for a given seed
        let mut rng = Pcg64Mcg::seed_from_u64(u64::from(seed));
        table.shuffle(&mut rng);

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i % 256];
        }

        Self { perm }
    }

    /// Sample the field at an arbitrary point.
    ///
    /// Gradients live at integer lattice points; the returned value is the
    /// trilinear blend of the eight surrounding corner contributions, with
    /// the fade curve applied to the fractional offsets. Exactly zero at
    /// every integer lattice point.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;
        let zi = (z.floor() as i64 & 255) as usize;

        let xf = x - x.floor();
        let yf = y - y.floor();
        let zf = z - z.floor();

        let u = fade(xf);
        let v = fade(yf);
        let w = fade(zf);

        // Hash the eight cube corners through the table
        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let aa = p[a] as usize + zi;
        let ab = p[a + 1] as usize + zi;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize + zi;
        let bb = p[b + 1] as usize + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(
                    u,
                    grad(p[aa], xf, yf, zf),
                    grad(p[ba], xf - 1.0, yf, zf),
                ),
                lerp(
                    u,
                    grad(p[ab], xf, yf - 1.0, zf),
                    grad(p[bb], xf - 1.0, yf - 1.0, zf),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p[aa + 1], xf, yf, zf - 1.0),
                    grad(p[ba + 1], xf - 1.0, yf, zf - 1.0),
                ),
                lerp(
                    u,
                    grad(p[ab + 1], xf, yf - 1.0, zf - 1.0),
                    grad(p[bb + 1], xf - 1.0, yf - 1.0, zf - 1.0),
                ),
            ),
        )
    }

    /// Stack `octaves` samples with increasing frequency and decreasing
    /// amplitude, normalized back to [-1.0, 1.0].
    ///
    /// One octave is identical to `sample`; zero octaves yields 0.0.
    pub fn sample_fbm(
        &self,
        x: f64,
        y: f64,
        z: f64,
        octaves: u32,
        lacunarity: f64,
        persistence: f64,
    ) -> f64 {
        if octaves == 0 {
            return 0.0;
        }

        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            value += self.sample(x * frequency, y * frequency, z * frequency) * amplitude;
            max_value += amplitude;

            amplitude *= persistence;
            frequency *= lacunarity;
        }

        value / max_value
    }
}

fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
