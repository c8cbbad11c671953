use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

/// Format Jira expects for the `started` field of a worklog, e.g. `2024-05-01T02:00:00.000+0200`.
pub const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Midnight UTC of the given calendar date.
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

pub fn to_jira_timestamp<Tz: TimeZone>(moment: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    moment.format(JIRA_TIMESTAMP_FORMAT).to_string()
}

/// Human readable local time, used for console output.
pub fn to_local_display(moment: DateTime<Utc>) -> String {
    moment
        .with_timezone(&Local)
        .format(DISPLAY_FORMAT)
        .to_string()
}
