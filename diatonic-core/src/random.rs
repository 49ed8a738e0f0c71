//! Pluggable randomness for chord-type selection and progression generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform floats in [0, 1).
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Weighted coin flip: true with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform index into a collection of `len` items (`len` must be > 0)
    fn index(&mut self, len: usize) -> usize {
        ((self.next_f64() * len as f64) as usize).min(len.saturating_sub(1))
    }

    /// Uniform pick from a non-empty slice
    fn pick<T: Copy>(&mut self, items: &[T]) -> T
    where
        Self: Sized,
    {
        items[self.index(items.len())]
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// `rand`'s standard generator, seeded or from entropy
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn seeded(seed: u64) -> Self {
        StdRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        StdRandom {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, otherwise from entropy
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for StdRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of values, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    position: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        ScriptedRandom {
            values,
            position: 0,
        }
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_values_cycle() {
        let mut rng = ScriptedRandom::new(vec![0.1, 0.9]);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.next_f64(), 0.9);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn test_pick_and_chance() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5, 0.999, 0.69, 0.7]);
        let items = ["a", "b", "c"];
        assert_eq!(rng.pick(&items), "a");
        assert_eq!(rng.pick(&items), "b");
        assert_eq!(rng.pick(&items), "c");
        assert!(rng.chance(0.7));
        assert!(!rng.chance(0.7));
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = StdRandom::seeded(42);
        let mut b = StdRandom::seeded(42);
        for _ in 0..10 {
            let x = a.next_f64();
            assert_eq!(x, b.next_f64());
            assert!((0.0..1.0).contains(&x));
        }
    }
}
