use des::{Agent, Response};

use crate::accumulator::StateTimeTable;
use crate::draws::{DrawBudget, DrawSource, SeededDraws};
use crate::params::ValidatedParams;
use crate::report::SimulationReport;
use crate::{Event, Stats};

/// A single waiting line in front of `c` servers with room for `K` customers.
///
/// Every follow-up event costs one random draw. Once the allowance is spent
/// no further events are scheduled, and the time of the event that took the
/// last draw becomes the horizon the run is measured up to.
pub struct Station<D: DrawSource = SeededDraws> {
    params: ValidatedParams,
    draws: D,
    budget: DrawBudget,
    table: StateTimeTable,
    /// Busy flag per server, scanned in index order
    busy: Vec<bool>,
    /// Customers in service plus waiting
    system_size: usize,
    waiting: usize,
    lost: u64,
    arrivals: u64,
    last_event_t: f64,
}

impl<D: DrawSource> Station<D> {
    pub fn new(params: ValidatedParams, draws: D) -> Self {
        Station {
            budget: DrawBudget::new(params.max_draws),
            table: StateTimeTable::new(params.capacity),
            busy: vec![false; params.servers],
            system_size: 0,
            waiting: 0,
            lost: 0,
            arrivals: 0,
            last_event_t: 0.0,
            params,
            draws,
        }
    }

    pub fn system_size(&self) -> usize {
        self.system_size
    }

    pub fn waiting(&self) -> usize {
        self.waiting
    }

    pub fn busy_servers(&self) -> usize {
        self.busy.iter().filter(|b| **b).count()
    }

    pub fn lost(&self) -> u64 {
        self.lost
    }

    pub fn budget(&self) -> &DrawBudget {
        &self.budget
    }

    /// Draw a delay for `event` and return it with its absolute time, or
    /// `None` once the draw allowance is used up.
    fn schedule(&mut self, now: f64, event: Event) -> Option<(f64, Event)> {
        let range = match event {
            Event::Arrival => &self.params.inter_arrival,
            Event::Departure { .. } => &self.params.service,
        };
        let delay = self.budget.draw(&mut self.draws, range)?;
        let at = now + delay;
        if self.budget.mark_scheduled(at) {
            log::debug!(
                "draw {}/{} spent scheduling {:?} at {at}; cutoff established",
                self.budget.used(),
                self.budget.max(),
                event
            );
        }
        Some((at, event))
    }

    fn arrive(&mut self, now: f64) -> Vec<(f64, Event)> {
        self.arrivals += 1;
        let mut events = Vec::with_capacity(2);

        if self.system_size >= self.params.capacity {
            self.lost += 1;
            log::trace!("[{now}] arrival lost at capacity {}", self.params.capacity);
            events.extend(self.schedule(now, Event::Arrival));
            return events;
        }

        self.system_size += 1;
        match self.busy.iter().position(|b| !*b) {
            Some(server) => {
                self.busy[server] = true;
                events.extend(self.schedule(now, Event::Departure { server }));
            }
            None => self.waiting += 1,
        }
        events.extend(self.schedule(now, Event::Arrival));
        events
    }

    fn depart(&mut self, now: f64, server: usize) -> Vec<(f64, Event)> {
        if self.busy.get(server) != Some(&true) {
            log::debug!("[{now}] ignoring departure from idle server {server}");
            return Vec::new();
        }

        self.system_size -= 1;
        if self.waiting > 0 {
            // the same server takes the next customer without going idle
            self.waiting -= 1;
            self.schedule(now, Event::Departure { server })
                .into_iter()
                .collect()
        } else {
            self.busy[server] = false;
            Vec::new()
        }
    }

    /// End of the measured timeline: the cutoff if one was reached,
    /// otherwise the last event processed.
    pub fn final_time(&self) -> f64 {
        self.budget.cutoff().unwrap_or(self.last_event_t)
    }

    pub fn report(&self) -> SimulationReport {
        let final_time = self.final_time();
        let mut table = self.table.clone();
        table.fold(final_time, self.system_size);

        SimulationReport {
            servers: self.params.servers,
            capacity: self.params.capacity,
            final_time,
            lost: self.lost,
            arrivals: self.arrivals,
            draws_used: self.budget.used(),
            state_prob: table.probabilities(),
            state_time: table.buckets().to_vec(),
        }
    }
}

impl<D: DrawSource> Agent<Event, Stats> for Station<D> {
    fn act(&mut self, current_t: f64, data: &Event) -> Response<Event> {
        log::trace!(
            "[{current_t}] {:?} size={} waiting={}",
            data,
            self.system_size,
            self.waiting
        );
        self.table.fold(current_t, self.system_size);
        self.last_event_t = current_t;

        let events = match data {
            Event::Arrival => self.arrive(current_t),
            Event::Departure { server } => self.depart(current_t, *server),
        };
        Response::events(events).with_horizon(self.budget.cutoff())
    }

    fn stats(&self) -> Stats {
        Stats::Station(self.report())
    }
}
