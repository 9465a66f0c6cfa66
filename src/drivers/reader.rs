use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use log::{debug, info, warn};
use crate::drivers::error::EcgError;
use crate::drivers::series::SampleSeries;
/// Parses whitespace separated voltage tokens into a timestamped series.
#[derive(Clone, Copy, Debug)]
pub struct SampleReader {
    sampling_interval: f64,
}
impl SampleReader {
    /// 250 Hz acquisition.
    pub const DEFAULT_SAMPLING_INTERVAL: f64 = 0.004;
    pub fn new(sampling_interval: f64) -> Result<Self, EcgError> {
        if !sampling_interval.is_finite() || sampling_interval <= 0.0 {
            return Err(EcgError::InvalidParameter(format!(
                "sampling interval must be a positive number of seconds, got {sampling_interval}"
            )));
        }
        Ok(Self { sampling_interval })
    }
    pub fn sampling_interval(&self) -> f64 {
        self.sampling_interval
    }
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<SampleSeries, EcgError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| EcgError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("reading samples from {}", path.display());
        Ok(self.read(file))
    }
    /// Reads tokens until the first one that is not a finite number, or the
    /// end of the source. Trailing garbage truncates the series silently
    /// apart from a warning in the log.
    pub fn read(&self, source: impl Read) -> SampleSeries {
        let mut voltages = Vec::new();
        'lines: for (line_no, line) in BufReader::new(source).lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!("stopped reading at line {}: {err}", line_no + 1);
                    break;
                }
            };
            for token in line.split_whitespace() {
                match parse_voltage(token) {
                    Some(voltage) => voltages.push(voltage),
                    None => {
                        warn!(
                            "stopped reading at non-numeric token {token:?} on line {}",
                            line_no + 1
                        );
                        break 'lines;
                    }
                }
            }
        }
        info!("read {} data points", voltages.len());
        SampleSeries::from_voltages(self.sampling_interval, voltages)
    }
}
impl Default for SampleReader {
    fn default() -> Self {
        Self {
            sampling_interval: Self::DEFAULT_SAMPLING_INTERVAL,
        }
    }
}
fn parse_voltage(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
