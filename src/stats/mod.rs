//! Request counters with a sliding window per counter
//!
//! This module provides:
//! - `Counter`: the three tracked counters
//! - `StatsCounter`: monotonic counts plus bounded snapshot windows behind one lock
//! - `StatsReport`: a consistent read of counts and rates, rendered by `/_status`
//! - `StatsTicker`: the background service that snapshots once per second

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::fmt;

pub mod ticker;

pub use ticker::StatsTicker;

/// Tracked counters, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    Requests,
    Failures,
    Success,
}

impl Counter {
    pub const ALL: [Counter; 3] = [Counter::Requests, Counter::Failures, Counter::Success];

    pub fn name(&self) -> &'static str {
        match self {
            Counter::Requests => "nb_requests",
            Counter::Failures => "nb_failures",
            Counter::Success => "nb_success",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Default)]
struct CounterState {
    value: u64,
    /// Snapshots of `value`, oldest first
    window: VecDeque<u64>,
}

impl CounterState {
    fn rate(&self) -> u64 {
        match (self.window.front(), self.window.back()) {
            (Some(head), Some(tail)) => tail.saturating_sub(*head),
            _ => 0,
        }
    }
}

/// Concurrency-safe counters, each with a window of at most `period` snapshots.
#[derive(Debug)]
pub struct StatsCounter {
    period: usize,
    inner: Mutex<HashMap<Counter, CounterState>>,
}

impl StatsCounter {
    pub fn new(period: usize) -> Self {
        let inner = Counter::ALL
            .iter()
            .map(|counter| (*counter, CounterState::default()))
            .collect();

        Self {
            period,
            inner: Mutex::new(inner),
        }
    }

    /// Window capacity in seconds
    pub fn period(&self) -> usize {
        self.period
    }

    pub fn increment(&self, counter: Counter) {
        let mut inner = self.inner.lock();
        inner.entry(counter).or_default().value += 1;
    }

    pub fn get(&self, counter: Counter) -> u64 {
        let inner = self.inner.lock();
        inner.get(&counter).map(|state| state.value).unwrap_or(0)
    }

    /// Current raw value of every counter.
    pub fn snapshot(&self) -> HashMap<Counter, u64> {
        let inner = self.inner.lock();
        inner
            .iter()
            .map(|(counter, state)| (*counter, state.value))
            .collect()
    }

    /// Difference between the newest and oldest snapshot in the window.
    pub fn rate(&self, counter: Counter) -> u64 {
        let inner = self.inner.lock();
        inner.get(&counter).map(CounterState::rate).unwrap_or(0)
    }

    pub fn window_len(&self, counter: Counter) -> usize {
        let inner = self.inner.lock();
        inner.get(&counter).map(|state| state.window.len()).unwrap_or(0)
    }

    /// Append the current value of each counter to its window, evicting the
    /// oldest snapshots beyond `period`.
    pub fn tick(&self) {
        let mut inner = self.inner.lock();
        for state in inner.values_mut() {
            state.window.push_back(state.value);
            while state.window.len() > self.period {
                state.window.pop_front();
            }
        }
    }

    /// Counts and rates read under a single lock acquisition.
    pub fn report(&self) -> StatsReport {
        let inner = self.inner.lock();
        let read = |counter: Counter| {
            inner
                .get(&counter)
                .map(|state| (state.value, state.rate()))
                .unwrap_or((0, 0))
        };

        let mut counters = Vec::with_capacity(Counter::ALL.len());
        let mut rates = Vec::with_capacity(Counter::ALL.len());
        for counter in Counter::ALL {
            let (value, rate) = read(counter);
            counters.push((counter, value));
            rates.push((counter, rate));
        }

        StatsReport {
            period: self.period,
            counters,
            rates,
        }
    }
}

/// Point-in-time view of all counters and their windowed rates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsReport {
    pub period: usize,
    pub counters: Vec<(Counter, u64)>,
    pub rates: Vec<(Counter, u64)>,
}

impl StatsReport {
    pub fn value(&self, counter: Counter) -> u64 {
        self.counters
            .iter()
            .find(|(c, _)| *c == counter)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }

    pub fn rate(&self, counter: Counter) -> u64 {
        self.rates
            .iter()
            .find(|(c, _)| *c == counter)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (counter, value) in &self.counters {
            writeln!(f, "{}: {}", counter, value)?;
        }
        writeln!(f)?;
        for (counter, rate) in &self.rates {
            writeln!(f, "{}_{}s: {}", counter, self.period, rate)?;
        }
        Ok(())
    }
}
