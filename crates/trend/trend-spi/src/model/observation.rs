//! Aggregated metric observation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{BandPoint, ForecastPoint};

/// One aggregated metric value for one time bucket.
///
/// Serialized with snake_case keys. Optional members are omitted when absent,
/// and members this type does not model are carried through in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Bucket key, usually epoch milliseconds as a decimal string
    pub key: String,
    /// Human-readable bucket label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tickets: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points_sum: Option<f64>,
    /// Fallback value when the signal field itself is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bollinger_avg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bollinger_std: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_lower_bound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_upper_bound: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Observation {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Synthetic forecast bucket: key, label and the three prediction values only.
    pub fn forecast(key: impl Into<String>, label: impl Into<String>, point: ForecastPoint) -> Self {
        Self {
            key: key.into(),
            additional_key: Some(label.into()),
            prediction: Some(point.mid),
            prediction_lower_bound: Some(point.lower),
            prediction_upper_bound: Some(point.upper),
            ..Self::default()
        }
    }

    pub fn with_additional_key(mut self, label: impl Into<String>) -> Self {
        self.additional_key = Some(label.into());
        self
    }

    pub fn with_count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_total(mut self, total: i64) -> Self {
        self.total = Some(total);
        self
    }

    /// Copy of this observation carrying the given rolling statistics.
    pub fn with_bands(&self, band: BandPoint) -> Self {
        Self {
            bollinger_avg: Some(band.avg),
            bollinger_std: Some(band.std),
            ..self.clone()
        }
    }

    /// Whether this is a synthetic forecast bucket.
    pub fn is_forecast(&self) -> bool {
        self.prediction.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_observation_is_bare() {
        let obs = Observation::new("1700000000000");
        assert_eq!(obs.key, "1700000000000");
        assert!(obs.additional_key.is_none());
        assert!(obs.count.is_none());
        assert!(obs.bollinger_avg.is_none());
        assert!(!obs.is_forecast());
    }

    #[test]
    fn test_forecast_observation_has_no_signal() {
        let obs = Observation::forecast("300", "01-01-1970", ForecastPoint::new(1.0, 2.0, 3.0));
        assert_eq!(obs.additional_key.as_deref(), Some("01-01-1970"));
        assert_eq!(obs.prediction, Some(2.0));
        assert_eq!(obs.prediction_lower_bound, Some(1.0));
        assert_eq!(obs.prediction_upper_bound, Some(3.0));
        assert!(obs.count.is_none());
        assert!(obs.total.is_none());
        assert!(obs.is_forecast());
    }

    #[test]
    fn test_with_bands_leaves_source_untouched() {
        let obs = Observation::new("1").with_count(7);
        let banded = obs.with_bands(BandPoint::new(3.5, 1.25));

        assert!(obs.bollinger_avg.is_none());
        assert_eq!(banded.count, Some(7));
        assert_eq!(banded.bollinger_avg, Some(3.5));
        assert_eq!(banded.bollinger_std, Some(1.25));
    }

    #[test]
    fn test_serialization_omits_absent_members() {
        let obs = Observation::new("100").with_count(5);
        let value = serde_json::to_value(&obs).unwrap();
        assert_eq!(value, json!({ "key": "100", "count": 5 }));
    }

    #[test]
    fn test_deserialization_keeps_unknown_members() {
        let value = json!({
            "key": "100",
            "additional_key": "01-01-1970",
            "count": 3,
            "stacks": [{ "key": "bug", "count": 1 }]
        });
        let obs: Observation = serde_json::from_value(value.clone()).unwrap();

        assert_eq!(obs.count, Some(3));
        assert!(obs.extra.contains_key("stacks"));
        assert_eq!(serde_json::to_value(&obs).unwrap(), value);
    }

    #[test]
    fn test_prediction_members_use_snake_case() {
        let obs = Observation::forecast("5", "label", ForecastPoint::new(-1.0, 0.5, 2.0));
        let value = serde_json::to_value(&obs).unwrap();
        assert_eq!(value["prediction_lower_bound"], json!(-1.0));
        assert_eq!(value["prediction_upper_bound"], json!(2.0));
        assert_eq!(value["prediction"], json!(0.5));
    }
}
