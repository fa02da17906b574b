use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SummaryInterval {
    Hourly,
    Daily,
}

impl SummaryInterval {
    /// Postgres `date_trunc` field for this interval.
    pub fn trunc_field(&self) -> &'static str {
        match self {
            SummaryInterval::Hourly => "hour",
            SummaryInterval::Daily => "day",
        }
    }

    /// Truncates a time down to the start of its bucket.
    pub fn bucket(&self, time: NaiveDateTime) -> NaiveDateTime {
        let day = time.date().and_hms_opt(0, 0, 0).unwrap();
        match self {
            SummaryInterval::Hourly => day
                .with_hour(time.hour())
                .unwrap(),
            SummaryInterval::Daily => day,
        }
    }
}

impl std::fmt::Display for SummaryInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryInterval::Hourly => write!(f, "hourly"),
            SummaryInterval::Daily => write!(f, "daily"),
        }
    }
}

impl std::str::FromStr for SummaryInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hourly" | "hour" => Ok(SummaryInterval::Hourly),
            "daily" | "day" => Ok(SummaryInterval::Daily),
            other => Err(format!("unknown summary interval: {}", other)),
        }
    }
}

/// Contiguous span of time buckets a summary already covers.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityPeriod {
    pub period_start: NaiveDateTime,
    pub period_end: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn hourly_bucket_truncates_to_hour() {
        assert_eq!(
            SummaryInterval::Hourly.bucket(ts(2024, 5, 2, 13, 42)),
            ts(2024, 5, 2, 13, 0)
        );
    }

    #[test]
    fn daily_bucket_truncates_to_midnight() {
        assert_eq!(
            SummaryInterval::Daily.bucket(ts(2024, 5, 2, 13, 42)),
            ts(2024, 5, 2, 0, 0)
        );
    }
}
