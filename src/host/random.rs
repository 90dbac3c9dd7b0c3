use rand::Rng;
use std::collections::VecDeque;

/// Source of randomness for message picks, spawn points and idle behaviour.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        let i = (self.unit() * len as f64) as usize;
        i.min(len.saturating_sub(1))
    }

    /// Uniform value in `[low, low + span)`.
    fn within(&mut self, low: f64, span: f64) -> f64 {
        low + self.unit() * span.max(0.0)
    }
}

/// Adapter over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Replays a fixed list of values, cycling once exhausted. An empty script yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values: values.into_iter().map(|v| v.clamp(0.0, 0.999_999)).collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn unit(&mut self) -> f64 {
        match self.values.pop_front() {
            Some(v) => {
                self.values.push_back(v);
                v
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn scripted_values_cycle() {
        let mut r = ScriptedRandom::new(vec![0.1, 0.2]);
        assert_eq!(r.unit(), 0.1);
        assert_eq!(r.unit(), 0.2);
        assert_eq!(r.unit(), 0.1);
    }

    #[test]
    fn index_stays_in_range() {
        let mut r = RngSource(StdRng::seed_from_u64(11));
        for _ in 0..1000 {
            assert!(r.index(8) < 8);
        }
        let mut edge = ScriptedRandom::new(vec![1.0]);
        assert_eq!(edge.index(4), 3);
    }

    #[test]
    fn within_respects_bounds() {
        let mut r = RngSource(StdRng::seed_from_u64(3));
        for _ in 0..1000 {
            let v = r.within(20.0, 360.0);
            assert!((20.0..380.0).contains(&v));
        }
    }
}
