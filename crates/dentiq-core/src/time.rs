use time::{Date, OffsetDateTime};

/// Current instant in UTC. All persisted timestamps go through this.
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Current calendar date in UTC. Used for invoice due dates.
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}
