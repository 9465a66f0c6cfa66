use std::ops::Index;
use std::slice;
/// One ECG measurement: seconds since the first sample and the voltage in millivolts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub voltage: f64,
}
/// Ordered, uniformly spaced run of samples.
///
/// Times are synthesized as `index * sampling_interval` when the series is
/// built from raw voltages, so the spacing invariant holds by construction.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSeries {
    sampling_interval: f64,
    samples: Vec<Sample>,
}
impl SampleSeries {
    pub fn empty(sampling_interval: f64) -> Self {
        Self {
            sampling_interval,
            samples: Vec::new(),
        }
    }
    pub fn from_voltages(sampling_interval: f64, voltages: impl IntoIterator<Item = f64>) -> Self {
        let samples = voltages
            .into_iter()
            .enumerate()
            .map(|(i, voltage)| Sample {
                time: i as f64 * sampling_interval,
                voltage,
            })
            .collect();
        Self {
            sampling_interval,
            samples,
        }
    }
    /// Builds a new series that keeps this series' timestamps and takes its
    /// voltages from `voltages`, which must have the same length.
    pub(crate) fn with_voltages(&self, voltages: Vec<f64>) -> Self {
        debug_assert_eq!(voltages.len(), self.samples.len());
        let samples = self
            .samples
            .iter()
            .zip(voltages)
            .map(|(sample, voltage)| Sample {
                time: sample.time,
                voltage,
            })
            .collect();
        Self {
            sampling_interval: self.sampling_interval,
            samples,
        }
    }
    pub fn sampling_interval(&self) -> f64 {
        self.sampling_interval
    }
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
    pub fn iter(&self) -> slice::Iter<'_, Sample> {
        self.samples.iter()
    }
    pub fn voltages(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.voltage)
    }
    /// `(time, voltage)` pairs in temporal order, as handed to plot sinks.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples.iter().map(|s| (s.time, s.voltage))
    }
    pub fn duration_seconds(&self) -> f64 {
        self.samples.last().map(|s| s.time).unwrap_or(0.0)
    }
    /// Smallest and largest voltage, or `None` for an empty series.
    pub fn voltage_range(&self) -> Option<(f64, f64)> {
        let mut voltages = self.voltages();
        let first = voltages.next()?;
        Some(voltages.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}
impl Index<usize> for SampleSeries {
    type Output = Sample;
    fn index(&self, index: usize) -> &Sample {
        &self.samples[index]
    }
}
impl<'a> IntoIterator for &'a SampleSeries {
    type Item = &'a Sample;
    type IntoIter = slice::Iter<'a, Sample>;
    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn timestamps_follow_sampling_interval() {
        let series = SampleSeries::from_voltages(0.004, vec![1.0, 2.0, 3.0]);
        let times: Vec<f64> = series.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![0.0, 0.004, 0.008]);
        assert_eq!(series[2].voltage, 3.0);
        assert!((series.duration_seconds() - 0.008).abs() < 1e-12);
    }
    #[test]
    fn voltage_range_handles_empty_and_negative() {
        assert_eq!(SampleSeries::empty(0.004).voltage_range(), None);
        let series = SampleSeries::from_voltages(0.004, vec![0.2, -1.5, 3.25, 0.0]);
        assert_eq!(series.voltage_range(), Some((-1.5, 3.25)));
    }
    #[test]
    fn with_voltages_keeps_times() {
        let series = SampleSeries::from_voltages(0.5, vec![1.0, 2.0]);
        let replaced = series.with_voltages(vec![9.0, 8.0]);
        assert_eq!(replaced.points().collect::<Vec<_>>(), vec![(0.0, 9.0), (0.5, 8.0)]);
        assert_eq!(series[0].voltage, 1.0);
    }
}
