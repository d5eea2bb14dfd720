//! Rolling history of air-quality readings

pub mod buffer;
pub mod reading;

pub use buffer::HistoryBuffer;
pub use reading::{AirQualityReading, HistoricalDataPoint, MetricKey, UnknownMetric};
