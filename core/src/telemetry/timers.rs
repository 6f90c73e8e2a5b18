//! telemetry/timers.rs
//! Stage timers for one process call.
use std::{
    collections::{hash_map, HashMap},
    fmt,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Prepare,
    Load,
    Execute,
    Measure,
    Record,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Prepare => "prepare",
            Stage::Load    => "load",
            Stage::Execute => "execute",
            Stage::Measure => "measure",
            Stage::Record  => "record",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimes {
    times: HashMap<Stage, Duration>,
}

impl StageTimes {
    /// Add duration to a stage (accumulates if already present).
    pub fn add(&mut self, stage: Stage, dur: Duration) {
        *self.times.entry(stage).or_insert(Duration::ZERO) += dur;
    }

    pub fn get(&self, stage: Stage) -> Duration {
        self.times.get(&stage).copied().unwrap_or(Duration::ZERO)
    }

    /// Duration in milliseconds (f64).
    pub fn get_ms(&self, stage: Stage) -> f64 {
        self.get(stage).as_secs_f64() * 1_000.0
    }

    pub fn total(&self) -> Duration {
        self.times.values().copied().sum()
    }

    pub fn contains(&self, stage: Stage) -> bool {
        self.times.contains_key(&stage)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Stage, &Duration)> {
        self.times.iter()
    }
}

impl<'a> IntoIterator for &'a StageTimes {
    type Item = (&'a Stage, &'a Duration);
    type IntoIter = hash_map::Iter<'a, Stage, Duration>;

    fn into_iter(self) -> Self::IntoIter {
        self.times.iter()
    }
}

/// Wall-clock timer with per-stage accumulation.
#[derive(Clone, Debug)]
pub struct OperationTimer {
    start_time: Instant,
    stage_start: Instant,
    pub stage_times: StageTimes,
}

impl OperationTimer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self { start_time: now, stage_start: now, stage_times: StageTimes::default() }
    }

    /// Close the running stage, charging its time to `stage`, and start the next.
    pub fn lap(&mut self, stage: Stage) -> Duration {
        let now = Instant::now();
        let dur = now.duration_since(self.stage_start);
        self.stage_times.add(stage, dur);
        self.stage_start = now;
        dur
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for OperationTimer {
    fn default() -> Self {
        Self::new()
    }
}
