//! Signal field detection

use trend_spi::Observation;

use crate::registry::SignalField;

/// First registered field populated on the first observation.
///
/// Sequences are assumed homogeneous, so later observations are not inspected.
pub fn detect_signal_field(observations: &[Observation]) -> Option<&'static SignalField> {
    let first = observations.first()?;
    SignalField::all()
        .iter()
        .find(|field| field.read(first).is_some())
}
