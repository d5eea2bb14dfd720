//! Sensor snapshot types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown metric: {0}")]
pub struct UnknownMetric(pub String);

/// Metrics reported by the air-quality sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKey {
    Co2,
    Co,
    Combustible,
    Temp,
    Humidity,
}

impl MetricKey {
    pub const ALL: [MetricKey; 5] = [
        MetricKey::Co2,
        MetricKey::Co,
        MetricKey::Combustible,
        MetricKey::Temp,
        MetricKey::Humidity,
    ];

    /// Wire name of the metric
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Co2 => "co2",
            MetricKey::Co => "co",
            MetricKey::Combustible => "combustible",
            MetricKey::Temp => "temp",
            MetricKey::Humidity => "humidity",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

/// One sensor snapshot; `None` marks a missing reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirQualityReading {
    pub co2: Option<f64>,
    pub co: Option<f64>,
    pub combustible: Option<f64>,
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
}

impl AirQualityReading {
    pub fn get(&self, metric: MetricKey) -> Option<f64> {
        match metric {
            MetricKey::Co2 => self.co2,
            MetricKey::Co => self.co,
            MetricKey::Combustible => self.combustible,
            MetricKey::Temp => self.temp,
            MetricKey::Humidity => self.humidity,
        }
    }

    pub fn set(&mut self, metric: MetricKey, value: Option<f64>) {
        let slot = match metric {
            MetricKey::Co2 => &mut self.co2,
            MetricKey::Co => &mut self.co,
            MetricKey::Combustible => &mut self.combustible,
            MetricKey::Temp => &mut self.temp,
            MetricKey::Humidity => &mut self.humidity,
        };
        *slot = value;
    }
}

/// Reading stamped with its arrival time (Unix milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalDataPoint {
    pub timestamp_ms: i64,

    #[serde(flatten)]
    pub reading: AirQualityReading,
}

impl HistoricalDataPoint {
    pub fn new(timestamp_ms: i64, reading: AirQualityReading) -> Self {
        Self {
            timestamp_ms,
            reading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_round_trip() {
        for key in MetricKey::ALL {
            assert_eq!(key.as_str().parse::<MetricKey>().unwrap(), key);
            assert_eq!(key.to_string(), key.as_str());
        }

        let err = "pm25".parse::<MetricKey>().unwrap_err();
        assert_eq!(err, UnknownMetric("pm25".to_string()));
    }

    #[test]
    fn test_get_and_set() {
        let mut reading = AirQualityReading::default();
        assert_eq!(reading.get(MetricKey::Temp), None);

        reading.set(MetricKey::Temp, Some(27.4));
        reading.set(MetricKey::Co2, Some(612.0));

        assert_eq!(reading.get(MetricKey::Temp), Some(27.4));
        assert_eq!(reading.get(MetricKey::Co2), Some(612.0));
        assert_eq!(reading.get(MetricKey::Humidity), None);
    }

    #[test]
    fn test_data_point_json_shape() {
        let json = r#"{"timestamp_ms": 1700000000000, "co2": 450.0, "co": null, "temp": 22.5}"#;
        let point: HistoricalDataPoint = serde_json::from_str(json).unwrap();

        assert_eq!(point.timestamp_ms, 1_700_000_000_000);
        assert_eq!(point.reading.get(MetricKey::Co2), Some(450.0));
        assert_eq!(point.reading.get(MetricKey::Co), None);
        assert_eq!(point.reading.get(MetricKey::Humidity), None);
        assert_eq!(point.reading.get(MetricKey::Temp), Some(22.5));
    }
}
