use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

use crate::worldgen::WorldGenConfig;

/// Deterministic per-seed height sampler.
///
/// Perlin lattice noise summed over `octaves` with doubling frequency and
/// halving amplitude. FastNoiseLite divides the sum by the cumulative
/// amplitude, so the fractal stays in roughly `[-1, 1]` before scaling.
pub struct HeightField {
    noise: FastNoiseLite,
    amplitude: f32,
}

impl HeightField {
    pub fn new(seed: i32, cfg: &WorldGenConfig) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::Perlin));
        noise.set_frequency(Some(cfg.height.frequency));
        noise.set_fractal_type(Some(FractalType::FBm));
        noise.set_fractal_octaves(Some(cfg.height.octaves.max(1)));
        noise.set_fractal_lacunarity(Some(2.0));
        noise.set_fractal_gain(Some(0.5));
        Self {
            noise,
            amplitude: cfg.height.amplitude,
        }
    }

    #[inline]
    pub fn normalized(&self, x: i32, z: i32) -> f32 {
        self.noise.get_noise_2d(x as f32, z as f32)
    }

    #[inline]
    pub fn sample(&self, x: i32, z: i32) -> i32 {
        (self.normalized(x, z) * self.amplitude).floor() as i32
    }
}
