//! Model module containing data structures

mod band_point;
mod forecast_point;
mod observation;

pub use band_point::BandPoint;
pub use forecast_point::ForecastPoint;
pub use observation::Observation;
