//! The single ad-hoc timer. State is persisted in `timer.json`, a missing document means that no
//! timer is running.

use std::fmt::Display;

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    state::{entities::TimerEntity, StateKey, StateStore},
    utils::clock::Clock,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running(TimerEntity),
}

/// Whole minutes between two moments, floored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    total_minutes: i64,
}

impl Elapsed {
    pub fn between(start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let millis = (now - start).num_milliseconds();
        if millis < 0 {
            warn!("Timer start {start} is in the future, counting it as zero");
            return Self::from_minutes(0);
        }
        Self::from_minutes(millis.div_euclid(60_000))
    }

    pub fn from_minutes(total_minutes: i64) -> Self {
        Self { total_minutes }
    }

    pub fn total_minutes(&self) -> i64 {
        self.total_minutes
    }

    pub fn hours(&self) -> i64 {
        self.total_minutes.div_euclid(60)
    }

    pub fn minutes(&self) -> i64 {
        self.total_minutes.rem_euclid(60)
    }

    /// Jira duration notation, always in minutes.
    pub fn to_time_spent(&self) -> String {
        format!("{}m", self.total_minutes)
    }
}

impl Display for Elapsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} hours and {} minutes", self.hours(), self.minutes())
    }
}

/// Snapshot of a running timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerReading {
    pub timer: TimerEntity,
    pub elapsed: Elapsed,
}

pub struct TimerTracker<'a> {
    store: &'a StateStore,
    clock: &'a dyn Clock,
}

impl<'a> TimerTracker<'a> {
    pub fn new(store: &'a StateStore, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    pub async fn state(&self) -> Result<TimerState> {
        Ok(match self.store.load::<TimerEntity>(StateKey::Timer).await? {
            Some(timer) => TimerState::Running(timer),
            None => TimerState::Idle,
        })
    }

    /// Starts a new timer. A timer that is already running is replaced.
    pub async fn start(&self, id: &str) -> Result<TimerEntity> {
        let id = id.trim();
        if id.is_empty() {
            bail!("A timer needs an issue id");
        }
        let timer = TimerEntity {
            id: id.to_string(),
            start_time: self.clock.time(),
        };
        self.store.save(StateKey::Timer, &timer).await?;
        info!("Started timer {}", timer.id);
        Ok(timer)
    }

    /// Reading of the running timer, `None` when idle.
    pub async fn current(&self) -> Result<Option<TimerReading>> {
        Ok(match self.state().await? {
            TimerState::Idle => None,
            TimerState::Running(timer) => Some(self.read(timer)),
        })
    }

    /// Stops the running timer. The elapsed time is only returned, nothing is kept.
    pub async fn stop(&self) -> Result<Option<TimerReading>> {
        let Some(reading) = self.current().await? else {
            return Ok(None);
        };
        self.store.delete(StateKey::Timer).await?;
        info!("Stopped timer {}", reading.timer.id);
        Ok(Some(reading))
    }

    /// Drops the timer without reading it. Returns whether there was one.
    pub async fn clear(&self) -> Result<bool> {
        Ok(self.store.delete(StateKey::Timer).await?)
    }

    fn read(&self, timer: TimerEntity) -> TimerReading {
        let elapsed = Elapsed::between(timer.start_time, self.clock.time());
        TimerReading { timer, elapsed }
    }
}
