pub mod accumulator;
pub mod draws;
pub mod params;
pub mod report;
pub mod scenarios;
pub mod station;

pub use draws::{DrawSource, SeededDraws};
pub use params::{QueueParams, UniformRange, ValidatedParams};
pub use report::SimulationReport;
pub use scenarios::{simulate, simulate_with};
pub use station::Station;

/// The first customer always arrives here; scheduling it costs no draw.
pub const FIRST_ARRIVAL_TIME: f64 = 2.0;

/// Events in the finite-capacity queue. At equal times arrivals come
/// before departures, and departures go in server order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Event {
    /// A customer reaches the station
    Arrival,
    /// The customer on `server` finishes service
    Departure { server: usize },
}

/// Stats enum for DES framework compatibility
#[derive(Debug, Clone)]
pub enum Stats {
    Station(SimulationReport),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("at least one server is required")]
    NoServers,
    #[error("capacity must be at least 1")]
    NoCapacity,
    #[error("{name} range [{low}, {high}) must be finite with low < high")]
    InvalidRange {
        name: &'static str,
        low: f64,
        high: f64,
    },
}
