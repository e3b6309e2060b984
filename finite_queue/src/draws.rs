use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::Distribution;

use crate::params::UniformRange;

/// Source of continuous uniform samples.
pub trait DrawSource {
    fn draw(&mut self, range: &UniformRange) -> f64;
}

/// Seeded generator owned by a single run.
pub struct SeededDraws {
    rng: StdRng,
}

impl SeededDraws {
    pub fn new(seed: u64) -> Self {
        SeededDraws {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DrawSource for SeededDraws {
    fn draw(&mut self, range: &UniformRange) -> f64 {
        range.dist().sample(&mut self.rng)
    }
}

/// Counts draws against a fixed allowance and remembers the cutoff time:
/// the scheduled time of the event whose draw used up the allowance.
#[derive(Debug, Clone)]
pub struct DrawBudget {
    used: u64,
    max: u64,
    cutoff: Option<f64>,
}

impl DrawBudget {
    pub fn new(max: u64) -> Self {
        DrawBudget {
            used: 0,
            max,
            cutoff: None,
        }
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    pub fn cutoff(&self) -> Option<f64> {
        self.cutoff
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.max
    }

    /// Take one sample, or `None` once the allowance is spent.
    pub fn draw<D: DrawSource>(&mut self, source: &mut D, range: &UniformRange) -> Option<f64> {
        if self.is_exhausted() {
            return None;
        }
        self.used += 1;
        Some(source.draw(range))
    }

    /// Called with the time of the event just scheduled. Returns true only the
    /// one time the cutoff gets established.
    pub fn mark_scheduled(&mut self, event_t: f64) -> bool {
        if self.used == self.max && self.cutoff.is_none() {
            self.cutoff = Some(event_t);
            return true;
        }
        false
    }
}
