use chrono::{DateTime, Utc};

/// Source of record timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of record identifiers.
pub trait IdSource {
    fn next_id(&mut self, at: DateTime<Utc>) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Epoch-millisecond ids. Two records created in the same millisecond (or
/// after the wall clock steps back) get the previous id + 1.
#[derive(Debug, Clone, Default)]
pub struct TimestampIds {
    last: Option<i64>,
}

impl IdSource for TimestampIds {
    fn next_id(&mut self, at: DateTime<Utc>) -> String {
        let millis = at.timestamp_millis();
        let id = match self.last {
            Some(last) if millis <= last => last + 1,
            _ => millis,
        };
        self.last = Some(id);
        id.to_string()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Yields `prefix-1`, `prefix-2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 1,
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, _at: DateTime<Utc>) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_ids_use_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let mut ids = TimestampIds::default();
        assert_eq!(ids.next_id(at), "1700000000123");
    }

    #[test]
    fn test_timestamp_ids_unique_within_same_millisecond() {
        let at = Utc.timestamp_millis_opt(1_000).unwrap();
        let earlier = Utc.timestamp_millis_opt(500).unwrap();
        let mut ids = TimestampIds::default();
        assert_eq!(ids.next_id(at), "1000");
        assert_eq!(ids.next_id(at), "1001");
        assert_eq!(ids.next_id(earlier), "1002");
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new("rec");
        let at = Utc::now();
        assert_eq!(ids.next_id(at), "rec-1");
        assert_eq!(ids.next_id(at), "rec-2");
    }

    #[test]
    fn test_fixed_clock() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), clock.now());
    }
}
