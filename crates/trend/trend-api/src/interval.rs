//! Aggregation interval

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use trend_spi::TrendError;

/// Bucket granularity of an aggregated series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationInterval {
    #[default]
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl AggregationInterval {
    pub const ALL: [AggregationInterval; 5] = [
        AggregationInterval::Day,
        AggregationInterval::Week,
        AggregationInterval::Month,
        AggregationInterval::Quarter,
        AggregationInterval::Year,
    ];

    /// Resolve a caller-supplied interval name, falling back to `Day`.
    pub fn resolve(name: Option<&str>) -> Self {
        name.and_then(|n| n.parse().ok()).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationInterval::Day => "day",
            AggregationInterval::Week => "week",
            AggregationInterval::Month => "month",
            AggregationInterval::Quarter => "quarter",
            AggregationInterval::Year => "year",
        }
    }
}

impl FromStr for AggregationInterval {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(AggregationInterval::Day),
            "week" => Ok(AggregationInterval::Week),
            "month" => Ok(AggregationInterval::Month),
            "quarter" => Ok(AggregationInterval::Quarter),
            "year" => Ok(AggregationInterval::Year),
            other => Err(TrendError::InvalidParameter {
                name: "interval".to_string(),
                reason: format!("unknown aggregation interval '{}'", other),
            }),
        }
    }
}

impl fmt::Display for AggregationInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
