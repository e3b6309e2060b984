use des::{Agent, EventLoop};

use crate::draws::{DrawSource, SeededDraws};
use crate::params::QueueParams;
use crate::report::SimulationReport;
use crate::station::Station;
use crate::{ConfigError, Event, FIRST_ARRIVAL_TIME, Stats};

/// Run one configuration with a generator seeded from `params.seed`.
pub fn simulate(params: &QueueParams) -> Result<SimulationReport, ConfigError> {
    simulate_with(params, SeededDraws::new(params.seed))
}

/// Run one configuration drawing from `draws`.
pub fn simulate_with<D>(params: &QueueParams, draws: D) -> Result<SimulationReport, ConfigError>
where
    D: DrawSource + 'static,
{
    let validated = params.validate()?;
    log::info!(
        "running G/G/{}/{} with {} draws",
        validated.servers,
        validated.capacity,
        validated.max_draws
    );

    let station = Station::new(validated, draws);
    let agents: Vec<Box<dyn Agent<Event, Stats>>> = vec![Box::new(station)];
    let mut event_loop = EventLoop::new(vec![(FIRST_ARRIVAL_TIME, Event::Arrival)], agents);

    event_loop.run(f64::INFINITY);

    let report = match event_loop.stats().into_iter().next() {
        Some(Stats::Station(report)) => report,
        _ => panic!("Expected station stats from event loop"),
    };
    log::info!(
        "finished at t={} after {} events: {} lost, {} draws",
        report.final_time,
        event_loop.processed(),
        report.lost,
        report.draws_used
    );
    Ok(report)
}

/// The single- and two-server configurations, sharing seed and draw allowance.
pub fn standard_pair(seed: u64, max_draws: u64) -> [QueueParams; 2] {
    [
        QueueParams {
            seed,
            max_draws,
            ..QueueParams::single_server()
        },
        QueueParams {
            seed,
            max_draws,
            ..QueueParams::two_servers()
        },
    ]
}
