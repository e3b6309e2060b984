use rand_distr::Uniform;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Bounds of a continuous uniform distribution, validated on construction.
#[derive(Debug, Clone)]
pub struct UniformRange {
    low: f64,
    high: f64,
    dist: Uniform<f64>,
}

impl UniformRange {
    pub fn new(name: &'static str, low: f64, high: f64) -> Result<Self, ConfigError> {
        let dist = Uniform::new(low, high)
            .map_err(|_| ConfigError::InvalidRange { name, low, high })?;
        Ok(UniformRange { low, high, dist })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn dist(&self) -> &Uniform<f64> {
        &self.dist
    }
}

/// Parameters of one G/G/c/K run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueParams {
    /// Number of servers (c)
    pub servers: usize,
    /// Maximum customers in the system, in service plus waiting (K)
    pub capacity: usize,
    /// Inter-arrival time bounds (low, high)
    pub inter_arrival: (f64, f64),
    /// Service time bounds (low, high)
    pub service: (f64, f64),
    /// Random draws allowed before the run is cut off
    pub max_draws: u64,
    /// Seed for the run's generator
    pub seed: u64,
}

impl QueueParams {
    /// G/G/1/5 with the default arrival and service ranges
    pub fn single_server() -> Self {
        QueueParams::default()
    }

    /// G/G/2/5 with the default arrival and service ranges
    pub fn two_servers() -> Self {
        QueueParams {
            servers: 2,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<ValidatedParams, ConfigError> {
        if self.servers == 0 {
            return Err(ConfigError::NoServers);
        }
        if self.capacity == 0 {
            return Err(ConfigError::NoCapacity);
        }
        let inter_arrival =
            UniformRange::new("inter_arrival", self.inter_arrival.0, self.inter_arrival.1)?;
        let service = UniformRange::new("service", self.service.0, self.service.1)?;
        if self.servers > self.capacity {
            log::warn!(
                "{} servers exceed capacity {}; only {} can ever be busy",
                self.servers,
                self.capacity,
                self.capacity
            );
        }
        Ok(ValidatedParams {
            servers: self.servers,
            capacity: self.capacity,
            inter_arrival,
            service,
            max_draws: self.max_draws,
        })
    }
}

impl Default for QueueParams {
    fn default() -> Self {
        QueueParams {
            servers: 1,
            capacity: 5,
            inter_arrival: (2.0, 5.0),
            service: (3.0, 5.0),
            max_draws: 100_000,
            seed: 42,
        }
    }
}

/// Parameters that passed validation; the only way to build a `Station`.
#[derive(Debug, Clone)]
pub struct ValidatedParams {
    pub servers: usize,
    pub capacity: usize,
    pub inter_arrival: UniformRange,
    pub service: UniformRange,
    pub max_draws: u64,
}
