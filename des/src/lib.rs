use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Events later than a stop horizon by less than this are still processed.
pub const TIME_EPSILON: f64 = 1e-12;

struct Scheduled<T> {
    t: f64,
    seq: u64,
    data: T,
}

impl<T: Ord> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for Scheduled<T> {}

// Reversed so the max-heap yields the earliest time, then the smallest event,
// then the lowest sequence.
impl<T: Ord> Ord for Scheduled<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .t
            .total_cmp(&self.t)
            .then_with(|| other.data.cmp(&self.data))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T: Ord> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Future event list ordered by time. Events at the same time come out in
/// their own `Ord` order, and equal events in insertion order.
pub struct EventQueue<T> {
    heap: BinaryHeap<Scheduled<T>>,
    next_seq: u64,
}

impl<T: Ord> EventQueue<T> {
    pub fn new() -> EventQueue<T> {
        EventQueue {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, t: f64, data: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled { t, seq, data });
    }

    pub fn pop_earliest(&mut self) -> Option<(f64, T)> {
        self.heap.pop().map(|event| (event.t, event.data))
    }

    pub fn peek_time(&self) -> Option<f64> {
        self.heap.peek().map(|event| event.t)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T: Ord> Default for EventQueue<T> {
    fn default() -> Self {
        EventQueue::new()
    }
}

/// What an agent wants to happen after reacting to an event.
pub struct Response<T> {
    pub events: Vec<(f64, T)>,
    /// No event later than this may be processed.
    pub horizon: Option<f64>,
}

impl<T> Response<T> {
    pub fn new() -> Response<T> {
        Response {
            events: Vec::new(),
            horizon: None,
        }
    }

    pub fn event(t: f64, data: T) -> Response<T> {
        Response {
            events: vec![(t, data)],
            horizon: None,
        }
    }

    pub fn events(events: Vec<(f64, T)>) -> Response<T> {
        Response {
            events,
            horizon: None,
        }
    }

    pub fn with_horizon(mut self, horizon: Option<f64>) -> Response<T> {
        self.horizon = horizon;
        self
    }
}

impl<T> Default for Response<T> {
    fn default() -> Self {
        Response::new()
    }
}

pub trait Agent<T, S> {
    fn act(&mut self, _current_t: f64, _data: &T) -> Response<T> {
        Response::new()
    }

    fn stats(&self) -> S;
}

pub struct EventLoop<T, S> {
    queue: EventQueue<T>,
    current_t: f64,
    horizon: Option<f64>,
    processed: usize,
    agents: Vec<Box<dyn Agent<T, S>>>,
}

impl<T: Ord, S> EventLoop<T, S> {
    pub fn new(events: Vec<(f64, T)>, agents: Vec<Box<dyn Agent<T, S>>>) -> EventLoop<T, S> {
        let mut queue = EventQueue::new();
        for (t, data) in events {
            queue.push(t, data);
        }
        EventLoop {
            queue,
            current_t: 0.0,
            horizon: None,
            processed: 0,
            agents,
        }
    }

    pub fn current_t(&self) -> f64 {
        self.current_t
    }

    pub fn horizon(&self) -> Option<f64> {
        self.horizon
    }

    /// Number of events broadcast so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn tighten_horizon(&mut self, horizon: f64) {
        let tightened = match self.horizon {
            Some(current) => current.min(horizon),
            None => horizon,
        };
        if self.horizon != Some(tightened) {
            log::debug!("horizon set to {tightened}");
        }
        self.horizon = Some(tightened);
    }

    fn broadcast(&mut self, t: f64, data: T) {
        self.current_t = t;
        self.processed += 1;
        let mut new_events = Vec::new();
        let mut horizons = Vec::new();
        for agent in &mut self.agents {
            let response = agent.act(t, &data);
            horizons.extend(response.horizon);
            new_events.extend(response.events);
        }
        for (new_t, new_data) in new_events {
            if new_t >= self.current_t {
                self.queue.push(new_t, new_data);
            } else {
                log::warn!(
                    "dropping event scheduled at {new_t} before current time {}",
                    self.current_t
                );
            }
        }
        for horizon in horizons {
            self.tighten_horizon(horizon);
        }
    }

    /// Process events in time order until the queue drains or the next event
    /// lies beyond `run_until` (or an agent-published horizon, if tighter).
    pub fn run(&mut self, run_until: f64) {
        while let Some((t, data)) = self.queue.pop_earliest() {
            let limit = self.horizon.map_or(run_until, |h| h.min(run_until));
            if t > limit + TIME_EPSILON {
                log::debug!("stopping at {t}: beyond limit {limit}");
                break;
            }
            self.broadcast(t, data);
        }
    }

    pub fn stats(&self) -> Vec<S> {
        self.agents.iter().map(|agent| agent.stats()).collect()
    }
}
