use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * 3600 * 1000;

/// Length of one banner period in days.
pub const BANNER_PERIOD_DAYS: i64 = 14;

/// Length of one banner period in milliseconds.
pub const BANNER_PERIOD_MS: i64 = BANNER_PERIOD_DAYS * DAY_MS;

/// Unix time in milliseconds (the dataset's native time unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn millis(&self) -> i64 {
        self.0
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Convert to chrono DateTime<Utc>.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Create from chrono DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }

    /// Shift by a signed number of milliseconds, saturating at the `i64` range.
    pub const fn offset_by(&self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// Shift by a signed number of milliseconds, `None` on overflow.
    pub const fn checked_offset_by(&self, millis: i64) -> Option<Self> {
        match self.0.checked_add(millis) {
            Some(ms) => Some(Self(ms)),
            None => None,
        }
    }

    /// Whether the instant falls inside the calendar range chrono can render.
    pub fn is_representable(&self) -> bool {
        DateTime::from_timestamp_millis(self.0).is_some()
    }

    /// Calendar quarter label, e.g. `2021'Q3` (UTC).
    pub fn quarter_label(&self) -> String {
        let dt = self.to_datetime();
        format!("{}'Q{}", dt.year(), quarter_of(dt.month()))
    }

    /// Calendar date label, `YYYY-MM-DD` (UTC).
    pub fn date_label(&self) -> String {
        self.to_datetime().format("%Y-%m-%d").to_string()
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp::from_millis(millis)
    }
}

/// Accepts integer or floating point millisecond values; fractional
/// milliseconds are floored.
impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum IntOrFloat {
            Int(i64),
            Float(f64),
        }

        match IntOrFloat::deserialize(deserializer)? {
            IntOrFloat::Int(ms) => Ok(Timestamp(ms)),
            IntOrFloat::Float(ms) if ms.is_finite() => Ok(Timestamp(ms.floor() as i64)),
            IntOrFloat::Float(ms) => Err(serde::de::Error::custom(format!(
                "timestamp must be finite, got {}",
                ms
            ))),
        }
    }
}

/// Quarter number (1-4) of a calendar month (1-12).
pub fn quarter_of(month: u32) -> u32 {
    (month.saturating_sub(1)) / 3 + 1
}

/// Whole days in a millisecond delta, floored toward negative infinity.
///
/// `-1ms` is day `-1`, so something ending a moment from now reads as
/// "not yet elapsed" rather than "0 days ago".
pub fn delta_to_days(delta_ms: i64) -> i64 {
    delta_ms.div_euclid(DAY_MS)
}

/// Whole days from `from` to `to`. The millisecond delta saturates.
pub fn days_between(from: Timestamp, to: Timestamp) -> i64 {
    delta_to_days(to.millis().saturating_sub(from.millis()))
}

/// Whole days elapsed between `since` and `now`.
pub fn days_since(since: Timestamp, now: Timestamp) -> i64 {
    days_between(since, now)
}

/// Time since something last happened. `Never` orders above every finite
/// wait so that never-seen entries sort as the most overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Elapsed {
    Days(i64),
    Never,
}

impl Elapsed {
    /// Finite day count, `None` for `Never`.
    pub fn days(&self) -> Option<i64> {
        match self {
            Elapsed::Days(days) => Some(*days),
            Elapsed::Never => None,
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Elapsed::Never)
    }
}
