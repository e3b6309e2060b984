use serde::{Deserialize, Serialize};

/// Snapshot of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Number of servers (c)
    pub servers: usize,
    /// System capacity (K)
    pub capacity: usize,
    /// End of the measured timeline
    pub final_time: f64,
    /// Arrivals turned away at capacity
    pub lost: u64,
    /// Arrivals processed, accepted or lost
    pub arrivals: u64,
    pub draws_used: u64,
    /// Time spent at each occupancy level 0..=K
    pub state_time: Vec<f64>,
    /// `state_time` normalised by its total
    pub state_prob: Vec<f64>,
}

impl SimulationReport {
    pub fn total_time(&self) -> f64 {
        self.state_time.iter().sum()
    }

    /// Fraction of arrivals that were lost
    pub fn loss_ratio(&self) -> f64 {
        if self.arrivals == 0 {
            return 0.0;
        }
        self.lost as f64 / self.arrivals as f64
    }

    /// Time-averaged number of customers in the system
    pub fn mean_occupancy(&self) -> f64 {
        self.state_prob
            .iter()
            .enumerate()
            .map(|(n, p)| n as f64 * p)
            .sum()
    }

    pub fn print_summary(&self) {
        println!("\n=== G/G/{}/{} ===", self.servers, self.capacity);
        println!("Servers (c): {} | Capacity (K): {}", self.servers, self.capacity);
        println!("Global time: {:.6}", self.final_time);
        println!(
            "Lost: {} of {} arrivals ({:.4})",
            self.lost,
            self.arrivals,
            self.loss_ratio()
        );
        println!("Draws used: {}", self.draws_used);
        println!("Mean occupancy: {:.6}", self.mean_occupancy());
        println!("{:>5}  {:>14}  {:>8}", "State", "Time", "Prob");
        for (n, (time, prob)) in self.state_time.iter().zip(&self.state_prob).enumerate() {
            println!("{:>5}  {:>14.6}  {:>8.6}", n, time, prob);
        }
    }
}
