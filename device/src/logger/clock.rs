use std::io;
use time::macros::format_description;
use time::OffsetDateTime;

/// Source of row timestamps, formatted `YYYY-MM-DD HH:MM:SS`.
pub trait Clock {
    fn now(&self) -> io::Result<String>;
}

/// Wall-clock time in the local offset, or UTC when the local offset
/// cannot be determined.
#[derive(Debug, Default, Copy, Clone)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> io::Result<String> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        format_timestamp(now)
    }
}

pub fn format_timestamp(at: OffsetDateTime) -> io::Result<String> {
    at.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
