//! Random source for spawn velocities, drop rolls and power-up kinds
//!
//! The simulation never touches a global RNG. Everything random is drawn
//! through [`RandomSource`] so a session can be replayed from its seed, and
//! tests can script exact rolls.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform source of values in `[0, 1)`
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;
}

/// Seeded PCG generator used by real sessions
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    inner: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn next_f32(&mut self) -> f32 {
        self.inner.random::<f32>()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f32(&mut self) -> f32 {
        (**self).next_f32()
    }
}

/// Replays a fixed list of values, cycling when exhausted
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f32>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedRng {
    pub fn new(values: &[f32]) -> Self {
        assert!(!values.is_empty(), "scripted rng needs at least one value");
        Self {
            values: values.to_vec(),
            cursor: 0,
        }
    }

    /// Always returns `value`
    pub fn constant(value: f32) -> Self {
        Self::new(&[value])
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn next_f32(&mut self) -> f32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
