use log::{debug, warn};
use crate::drivers::error::EcgError;
use crate::drivers::series::SampleSeries;
/// Centered moving average over voltages.
///
/// For every interior index `i` in `[h, len - h)`, with `h = window_size / 2`,
/// the output voltage is the sum of `input[i - h ..= i + h]` divided by
/// `window_size`. The first and last `h` samples are copied through, and a
/// series of at most `2 * h` samples comes back unchanged. Timestamps are
/// never touched.
///
/// Even window sizes are accepted as-is: the summed range still spans
/// `2 * h + 1` samples while the divisor stays `window_size`, so the result is
/// scaled by `(window_size + 1) / window_size` rather than being a true mean.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovingAverageFilter {
    window_size: usize,
}
impl MovingAverageFilter {
    pub const DEFAULT_WINDOW_SIZE: usize = 5;
    pub fn new(window_size: usize) -> Result<Self, EcgError> {
        if window_size == 0 {
            return Err(EcgError::InvalidParameter(
                "moving average window size must be at least 1".into(),
            ));
        }
        if let Some(note) = even_window_note(window_size) {
            warn!("{note}");
        }
        Ok(Self { window_size })
    }
    pub fn window_size(&self) -> usize {
        self.window_size
    }
    pub fn half_window(&self) -> usize {
        self.window_size / 2
    }
    pub fn apply(&self, input: &SampleSeries) -> SampleSeries {
        let half = self.half_window();
        let voltages: Vec<f64> = input.voltages().collect();
        debug!(
            "moving average over {} samples, window {} (half {half})",
            voltages.len(),
            self.window_size
        );
        if voltages.len() <= 2 * half {
            if !voltages.is_empty() {
                warn!(
                    "series of {} samples is too short for window {}; passing through",
                    voltages.len(),
                    self.window_size
                );
            }
            return input.with_voltages(voltages);
        }
        let divisor = self.window_size as f64;
        let mut output = voltages.clone();
        for i in half..voltages.len() - half {
            let sum: f64 = voltages[i - half..=i + half].iter().sum();
            output[i] = sum / divisor;
        }
        input.with_voltages(output)
    }
}
impl Default for MovingAverageFilter {
    fn default() -> Self {
        Self {
            window_size: Self::DEFAULT_WINDOW_SIZE,
        }
    }
}
fn even_window_note(window_size: usize) -> Option<String> {
    (window_size % 2 == 0).then(|| {
        format!(
            "even moving average window {window_size} sums {} samples but divides by {window_size}",
            window_size + 1
        )
    })
}
/// One-shot form of [`MovingAverageFilter::apply`].
pub fn moving_average(input: &SampleSeries, window_size: usize) -> Result<SampleSeries, EcgError> {
    Ok(MovingAverageFilter::new(window_size)?.apply(input))
}
#[cfg(test)]
mod tests {
    use super::*;
    const TOLERANCE: f64 = 1e-9;
    fn series(voltages: &[f64]) -> SampleSeries {
        SampleSeries::from_voltages(0.004, voltages.iter().copied())
    }
    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < TOLERANCE, "index {i}: {a} != {e}");
        }
    }
    fn ecg_like(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| {
                let t = i as f64 * 0.004;
                (2.0 * std::f64::consts::PI * 1.2 * t).sin() + 0.1 * ((i * 7919) % 13) as f64
            })
            .collect()
    }
    #[test]
    fn spike_is_averaged_into_its_neighbours() {
        let input = series(&[1.0, 1.0, 1.0, 10.0, 1.0, 1.0, 1.0]);
        let output = moving_average(&input, 3).unwrap();
        let voltages: Vec<f64> = output.voltages().collect();
        assert_close(&voltages, &[1.0, 1.0, 4.0, 4.0, 4.0, 1.0, 1.0]);
    }
    #[test]
    fn linear_ramp_is_unchanged() {
        let input = series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let output = moving_average(&input, 3).unwrap();
        let voltages: Vec<f64> = output.voltages().collect();
        assert_close(&voltages, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }
    #[test]
    fn length_timestamps_and_edges_are_preserved() {
        let input = series(&ecg_like(300));
        for window in [1, 3, 5, 7, 11, 4] {
            let filter = MovingAverageFilter::new(window).unwrap();
            let half = filter.half_window();
            let output = filter.apply(&input);
            assert_eq!(output.len(), input.len());
            for (i, (out, inp)) in output.iter().zip(&input).enumerate() {
                assert_eq!(out.time, inp.time);
                if i < half || i >= input.len() - half {
                    assert_eq!(out.voltage, inp.voltage, "edge {i}, window {window}");
                }
            }
        }
    }
    #[test]
    fn interior_points_are_window_means() {
        let raw = ecg_like(120);
        let input = series(&raw);
        let output = moving_average(&input, 7).unwrap();
        for i in 3..raw.len() - 3 {
            let mean = raw[i - 3..=i + 3].iter().sum::<f64>() / 7.0;
            assert!((output[i].voltage - mean).abs() < TOLERANCE);
        }
    }
    #[test]
    fn input_is_not_modified() {
        let input = series(&[0.0, 3.0, 0.0, 3.0, 0.0]);
        let before = input.clone();
        let _ = moving_average(&input, 3).unwrap();
        assert_eq!(input, before);
    }
    #[test]
    fn empty_series_filters_to_empty() {
        let output = moving_average(&SampleSeries::empty(0.004), 5).unwrap();
        assert!(output.is_empty());
    }
    #[test]
    fn short_series_passes_through() {
        // len <= 2 * half for window 7 (half 3)
        for len in 1..=6 {
            let input = series(&ecg_like(len));
            let output = moving_average(&input, 7).unwrap();
            assert_eq!(output, input);
        }
        let input = series(&[1.0, 5.0, 9.0, 2.0, 2.0, 2.0, 8.0]);
        let output = moving_average(&input, 7).unwrap();
        assert!((output[3].voltage - 29.0 / 7.0).abs() < TOLERANCE);
    }
    #[test]
    fn window_of_one_is_identity() {
        let input = series(&ecg_like(50));
        assert_eq!(moving_average(&input, 1).unwrap(), input);
    }
    #[test]
    fn even_window_sums_centered_range_over_window_size() {
        // window 4 -> half 2: five samples summed, divided by four
        let input = series(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        let output = moving_average(&input, 4).unwrap();
        let voltages: Vec<f64> = output.voltages().collect();
        assert_close(&voltages, &[1.0, 1.0, 1.25, 1.25, 1.0, 1.0]);
    }
    #[test]
    fn even_window_note_describes_the_scaling() {
        assert_eq!(even_window_note(7), None);
        assert_eq!(
            even_window_note(4).as_deref(),
            Some("even moving average window 4 sums 5 samples but divides by 4")
        );
    }
    #[test]
    fn zero_window_is_rejected() {
        assert!(matches!(
            MovingAverageFilter::new(0),
            Err(EcgError::InvalidParameter(_))
        ));
        assert!(matches!(
            moving_average(&series(&[1.0, 2.0]), 0),
            Err(EcgError::InvalidParameter(_))
        ));
    }
    #[test]
    fn default_window_is_five() {
        assert_eq!(MovingAverageFilter::default().window_size(), 5);
        assert_eq!(MovingAverageFilter::default().half_window(), 2);
    }
}
