//! Bucket key extrapolation and labelling

use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;
use trend_api::AggregationInterval;
use trend_spi::{Result, TrendError};

/// Project `count` keys past `last_key`, stepping by the gap between the two
/// most recent keys.
pub fn future_keys(last_key: &str, second_last_key: &str, count: usize) -> Result<Vec<String>> {
    let last = parse_key(last_key)?;
    let previous = parse_key(second_last_key)?;
    let overflow = || TrendError::KeyOverflow {
        key: last_key.to_string(),
    };
    let delta = last.checked_sub(previous).ok_or_else(overflow)?;

    (1..=count)
        .map(|i| {
            i64::try_from(i)
                .ok()
                .and_then(|i| delta.checked_mul(i))
                .and_then(|step| last.checked_add(step))
                .map(|key| key.to_string())
                .ok_or_else(overflow)
        })
        .collect()
}

/// Render one epoch-millisecond key as a bucket label in `tz`.
pub fn format_key(key: &str, interval: AggregationInterval, tz: Tz) -> Result<String> {
    let millis = parse_key(key)?;
    let at = to_datetime(millis)?.with_timezone(&tz);

    let label = match interval {
        AggregationInterval::Day => at.format("%d-%m-%Y").to_string(),
        AggregationInterval::Week => format!("{}-{}", at.format("%V"), at.format("%Y")),
        AggregationInterval::Month => at.format("%m-%Y").to_string(),
        AggregationInterval::Quarter => format!("{}-{}", at.month0() / 3 + 1, at.format("%Y")),
        AggregationInterval::Year => at.format("%Y").to_string(),
    };
    Ok(label)
}

pub fn format_keys(keys: &[String], interval: AggregationInterval, tz: Tz) -> Result<Vec<String>> {
    keys.iter().map(|k| format_key(k, interval, tz)).collect()
}

fn parse_key(key: &str) -> Result<i64> {
    key.parse::<i64>().map_err(|e| TrendError::UnparseableKey {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn to_datetime(millis: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or(TrendError::InvalidTimestamp(millis))
}
