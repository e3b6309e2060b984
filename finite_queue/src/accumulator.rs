/// Simulated time spent at each occupancy level 0..=K.
#[derive(Debug, Clone)]
pub struct StateTimeTable {
    buckets: Vec<f64>,
    last_t: f64,
}

impl StateTimeTable {
    pub fn new(capacity: usize) -> Self {
        StateTimeTable {
            buckets: vec![0.0; capacity + 1],
            last_t: 0.0,
        }
    }

    /// Credit the time since the last fold to `occupancy` (the level held
    /// before the transition about to happen) and move the cursor to `up_to`.
    /// A cursor already at or past `up_to` is left alone.
    pub fn fold(&mut self, up_to: f64, occupancy: usize) {
        let dt = up_to - self.last_t;
        if dt > 0.0 {
            let level = occupancy.min(self.buckets.len() - 1);
            self.buckets[level] += dt;
            self.last_t = up_to;
        }
    }

    pub fn last_observed(&self) -> f64 {
        self.last_t
    }

    pub fn buckets(&self) -> &[f64] {
        &self.buckets
    }

    pub fn total(&self) -> f64 {
        self.buckets.iter().sum()
    }

    /// Each bucket over the total; all zeros when no time has elapsed.
    pub fn probabilities(&self) -> Vec<f64> {
        let total = self.total();
        let divisor = if total > 0.0 { total } else { 1.0 };
        self.buckets.iter().map(|b| b / divisor).collect()
    }
}
