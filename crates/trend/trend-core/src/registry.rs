//! Signal field registry
//!
//! Fixed, ordered table of the observation fields that can carry the signal.
//! Order is priority: when several fields are populated the first one wins.

use trend_spi::{Observation, Result, TrendError};

type Reader = fn(&Observation) -> Option<f64>;

/// A candidate signal field and its numeric reader
#[derive(Debug, Clone, Copy)]
pub struct SignalField {
    name: &'static str,
    read: Reader,
}

static REGISTRY: [SignalField; 8] = [
    SignalField { name: "count", read: read_count },
    SignalField { name: "total_tickets", read: read_total_tickets },
    SignalField { name: "sum", read: read_sum },
    SignalField { name: "mean", read: read_mean },
    SignalField { name: "median", read: read_median },
    SignalField { name: "min", read: read_min },
    SignalField { name: "max", read: read_max },
    SignalField { name: "story_points_sum", read: read_story_points_sum },
];

fn read_count(o: &Observation) -> Option<f64> {
    o.count.map(|v| v as f64)
}

fn read_total_tickets(o: &Observation) -> Option<f64> {
    o.total_tickets.map(|v| v as f64)
}

fn read_sum(o: &Observation) -> Option<f64> {
    o.sum
}

fn read_mean(o: &Observation) -> Option<f64> {
    o.mean
}

fn read_median(o: &Observation) -> Option<f64> {
    o.median.map(|v| v as f64)
}

fn read_min(o: &Observation) -> Option<f64> {
    o.min.map(|v| v as f64)
}

fn read_max(o: &Observation) -> Option<f64> {
    o.max.map(|v| v as f64)
}

fn read_story_points_sum(o: &Observation) -> Option<f64> {
    o.story_points_sum
}

impl SignalField {
    /// All candidate fields in priority order.
    pub fn all() -> &'static [SignalField] {
        &REGISTRY
    }

    pub fn from_name(name: &str) -> Option<&'static SignalField> {
        REGISTRY.iter().find(|f| f.name == name)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Raw field value, without fallback.
    pub fn read(&self, observation: &Observation) -> Option<f64> {
        (self.read)(observation)
    }

    /// Field value, falling back to `total` when the field is absent.
    pub fn value(&self, observation: &Observation) -> Option<f64> {
        self.read(observation)
            .or_else(|| observation.total.map(|v| v as f64))
    }

    /// Signal series for a whole sequence.
    pub fn extract(&self, observations: &[Observation]) -> Result<Vec<f64>> {
        observations
            .iter()
            .enumerate()
            .map(|(index, o)| {
                self.value(o).ok_or_else(|| TrendError::MissingSignal {
                    field: self.name.to_string(),
                    index,
                })
            })
            .collect()
    }
}

impl PartialEq for SignalField {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for SignalField {}
