use chrono::{DateTime, Utc};

/// Represents an entity responsible for providing dates across application. This allows timers
/// and worklogs to be tested against a pinned moment.
pub trait Clock: Sync + Send {
    fn time(&self) -> DateTime<Utc>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always answers with the same moment.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl Clock for FixedClock {
    fn time(&self) -> DateTime<Utc> {
        self.0
    }
}
