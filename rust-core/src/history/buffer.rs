//! Rolling window of historical readings
//!
//! Fixed-capacity ring buffer; once full, each new point evicts the oldest.

use super::reading::{HistoricalDataPoint, MetricKey};
use ringbuf::{ring_buffer::RbBase, HeapRb, Rb};

/// Rolling history of sensor snapshots
pub struct HistoryBuffer {
    points: HeapRb<HistoricalDataPoint>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create new history buffer
    ///
    /// # Arguments
    /// * `capacity` - Number of points retained (a zero capacity keeps one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);

        Self {
            points: HeapRb::new(capacity),
            capacity,
        }
    }

    /// Append a point
    ///
    /// # Returns
    /// The evicted oldest point, if the window was full
    pub fn push(&mut self, point: HistoricalDataPoint) -> Option<HistoricalDataPoint> {
        self.points.push_overwrite(point)
    }

    /// Values of one metric, oldest first
    ///
    /// Missing and non-finite readings are dropped, so the result is a dense
    /// series ready for the spectral transform.
    pub fn metric_values(&self, metric: MetricKey) -> Vec<f64> {
        self.metric_series(metric).0
    }

    /// Dense series of one metric with its sample interval
    ///
    /// The interval is the mean spacing of the points that supplied a value,
    /// not of every retained point.
    pub fn metric_series(&self, metric: MetricKey) -> (Vec<f64>, Option<f64>) {
        let (timestamps, values): (Vec<i64>, Vec<f64>) = self
            .points
            .iter()
            .filter_map(|point| {
                point
                    .reading
                    .get(metric)
                    .filter(|value| value.is_finite())
                    .map(|value| (point.timestamp_ms, value))
            })
            .unzip();

        let interval = mean_spacing_secs(
            timestamps.first().copied(),
            timestamps.last().copied(),
            timestamps.len(),
        );
        (values, interval)
    }

    /// Mean spacing between retained points in seconds
    ///
    /// None with fewer than two points or a non-increasing time span.
    pub fn mean_interval_secs(&self) -> Option<f64> {
        let first = self.points.iter().next().map(|point| point.timestamp_ms);
        let last = self.latest().map(|point| point.timestamp_ms);
        mean_spacing_secs(first, last, self.points.len())
    }

    /// Most recent point
    pub fn latest(&self) -> Option<&HistoricalDataPoint> {
        self.points.iter().last()
    }

    /// Iterate points, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoricalDataPoint> {
        self.points.iter()
    }

    /// Get number of retained points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get buffer capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all points
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

fn mean_spacing_secs(first: Option<i64>, last: Option<i64>, count: usize) -> Option<f64> {
    if count < 2 {
        return None;
    }

    let span_ms = last? - first?;
    if span_ms <= 0 {
        return None;
    }

    Some(span_ms as f64 / (count - 1) as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::reading::AirQualityReading;

    fn point(timestamp_ms: i64, co2: Option<f64>, temp: Option<f64>) -> HistoricalDataPoint {
        HistoricalDataPoint::new(
            timestamp_ms,
            AirQualityReading {
                co2,
                temp,
                ..AirQualityReading::default()
            },
        )
    }

    #[test]
    fn test_history_push_read() {
        let mut history = HistoryBuffer::new(8);
        assert!(history.is_empty());

        history.push(point(0, Some(450.0), Some(22.0)));
        history.push(point(3000, Some(470.0), Some(22.5)));

        assert_eq!(history.len(), 2);
        assert_eq!(history.metric_values(MetricKey::Co2), vec![450.0, 470.0]);
        assert_eq!(history.latest().unwrap().timestamp_ms, 3000);
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = HistoryBuffer::new(3);

        for i in 0..5 {
            let evicted = history.push(point(i * 1000, Some(i as f64), None));
            if i < 3 {
                assert!(evicted.is_none());
            } else {
                assert_eq!(evicted.unwrap().timestamp_ms, (i - 3) * 1000);
            }
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.capacity(), 3);
        assert_eq!(history.metric_values(MetricKey::Co2), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_missing_values_skipped() {
        let mut history = HistoryBuffer::new(10);
        history.push(point(0, Some(500.0), None));
        history.push(point(1000, None, Some(23.0)));
        history.push(point(2000, Some(f64::NAN), Some(f64::INFINITY)));
        history.push(point(3000, Some(520.0), Some(24.0)));

        assert_eq!(history.metric_values(MetricKey::Co2), vec![500.0, 520.0]);
        assert_eq!(history.metric_values(MetricKey::Temp), vec![23.0, 24.0]);
        assert!(history.metric_values(MetricKey::Humidity).is_empty());
    }

    #[test]
    fn test_mean_interval() {
        let mut history = HistoryBuffer::new(10);
        assert_eq!(history.mean_interval_secs(), None);

        history.push(point(10_000, Some(1.0), None));
        assert_eq!(history.mean_interval_secs(), None);

        history.push(point(13_000, Some(1.0), None));
        history.push(point(16_000, Some(1.0), None));
        assert_eq!(history.mean_interval_secs(), Some(3.0));
    }

    #[test]
    fn test_metric_series_interval_follows_present_values() {
        let mut history = HistoryBuffer::new(10);
        for i in 0..8 {
            let temp = if i % 2 == 0 { Some(21.0 + i as f64) } else { None };
            history.push(point(i * 3000, Some(600.0), temp));
        }

        let (temps, temp_interval) = history.metric_series(MetricKey::Temp);
        assert_eq!(temps, vec![21.0, 23.0, 25.0, 27.0]);
        assert_eq!(temp_interval, Some(6.0));

        let (co2, co2_interval) = history.metric_series(MetricKey::Co2);
        assert_eq!(co2.len(), 8);
        assert_eq!(co2_interval, Some(3.0));

        assert_eq!(history.metric_series(MetricKey::Humidity), (Vec::new(), None));
    }

    #[test]
    fn test_clear_and_zero_capacity() {
        let mut history = HistoryBuffer::new(0);
        assert_eq!(history.capacity(), 1);

        history.push(point(0, Some(1.0), None));
        history.push(point(1, Some(2.0), None));
        assert_eq!(history.metric_values(MetricKey::Co2), vec![2.0]);

        history.clear();
        assert!(history.is_empty());
        assert!(history.iter().next().is_none());
    }
}
