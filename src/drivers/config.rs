use std::fs;
use std::path::{Path, PathBuf};
use serde::Deserialize;
use crate::drivers::error::EcgError;
use crate::drivers::filter::MovingAverageFilter;
use crate::drivers::gnuplot::GnuplotExporter;
use crate::drivers::plot::{PlotExporter, PlotLabels, PlotStyle, PngExporter};
use crate::drivers::reader::SampleReader;
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlotBackend {
    /// Render in-process.
    #[default]
    Native,
    /// Pipe into an external gnuplot.
    Gnuplot,
}
/// Output image and title for the unfiltered plot.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawStageConfig {
    pub output: PathBuf,
    pub title: String,
}
impl Default for RawStageConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("original.png"),
            title: "Raw ECG Signal".into(),
        }
    }
}
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilteredStageConfig {
    pub output: PathBuf,
    pub title: String,
    pub window_size: usize,
}
impl Default for FilteredStageConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("filtered.png"),
            title: "Filtered ECG Signal".into(),
            window_size: 7,
        }
    }
}
/// Everything a single pipeline run needs. Missing fields in a JSON file
/// fall back to the defaults below.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub input: PathBuf,
    /// Seconds between consecutive samples.
    pub sampling_interval: f64,
    pub backend: PlotBackend,
    pub gnuplot_program: String,
    pub width: u32,
    pub height: u32,
    pub x_label: String,
    pub y_label: String,
    pub legend: String,
    pub raw: RawStageConfig,
    pub filtered: FilteredStageConfig,
}
impl Default for PipelineConfig {
    fn default() -> Self {
        let labels = PlotLabels::default();
        Self {
            input: PathBuf::from("ecg_data.dat"),
            sampling_interval: SampleReader::DEFAULT_SAMPLING_INTERVAL,
            backend: PlotBackend::default(),
            gnuplot_program: GnuplotExporter::DEFAULT_PROGRAM.into(),
            width: 1280,
            height: 720,
            x_label: labels.x_label,
            y_label: labels.y_label,
            legend: labels.legend,
            raw: RawStageConfig::default(),
            filtered: FilteredStageConfig::default(),
        }
    }
}
impl PipelineConfig {
    pub fn from_json_str(text: &str) -> Result<Self, EcgError> {
        Ok(serde_json::from_str(text)?)
    }
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EcgError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|err| EcgError::Config(format!("cannot read {}: {err}", path.display())))?;
        Self::from_json_str(&text)
    }
    pub fn reader(&self) -> Result<SampleReader, EcgError> {
        SampleReader::new(self.sampling_interval)
    }
    pub fn filter(&self) -> Result<MovingAverageFilter, EcgError> {
        MovingAverageFilter::new(self.filtered.window_size)
    }
    pub fn labels(&self, title: &str) -> PlotLabels {
        PlotLabels {
            title: title.to_string(),
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            legend: self.legend.clone(),
        }
    }
    pub fn exporter(&self) -> Box<dyn PlotExporter> {
        match self.backend {
            PlotBackend::Native => Box::new(PngExporter::new(PlotStyle {
                width: self.width,
                height: self.height,
                ..PlotStyle::default()
            })),
            PlotBackend::Gnuplot => Box::new(GnuplotExporter::new(
                self.gnuplot_program.clone(),
                self.width,
                self.height,
            )),
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn defaults_match_the_standard_run() {
        let config = PipelineConfig::default();
        assert_eq!(config.input, PathBuf::from("ecg_data.dat"));
        assert_eq!(config.sampling_interval, 0.004);
        assert_eq!(config.filtered.window_size, 7);
        assert_eq!(config.raw.output, PathBuf::from("original.png"));
        assert_eq!(config.filtered.output, PathBuf::from("filtered.png"));
        assert_eq!(config.raw.title, "Raw ECG Signal");
        assert_eq!(config.filtered.title, "Filtered ECG Signal");
        assert_eq!(config.backend, PlotBackend::Native);
    }
    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = PipelineConfig::from_json_str(
            r#"{
                "input": "holter.dat",
                "sampling_interval": 0.002,
                "backend": "gnuplot",
                "raw": { "output": "plots/raw.png" },
                "filtered": { "window_size": 9 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.input, PathBuf::from("holter.dat"));
        assert_eq!(config.sampling_interval, 0.002);
        assert_eq!(config.backend, PlotBackend::Gnuplot);
        assert_eq!(config.filtered.window_size, 9);
        assert_eq!(config.filtered.title, "Filtered ECG Signal");
        assert_eq!(config.raw.output, PathBuf::from("plots/raw.png"));
        assert_eq!(config.raw.title, "Raw ECG Signal");
    }
    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            PipelineConfig::from_json_str("{ \"window\": "),
            Err(EcgError::Config(_))
        ));
        assert!(matches!(
            PipelineConfig::from_json_str(r#"{ "filtered": { "window_size": -3 } }"#),
            Err(EcgError::Config(_))
        ));
    }
    #[test]
    fn invalid_values_surface_when_consumed() {
        let config = PipelineConfig {
            sampling_interval: 0.0,
            filtered: FilteredStageConfig {
                window_size: 0,
                ..FilteredStageConfig::default()
            },
            ..PipelineConfig::default()
        };
        assert!(matches!(config.reader(), Err(EcgError::InvalidParameter(_))));
        assert!(matches!(config.filter(), Err(EcgError::InvalidParameter(_))));
    }
    #[test]
    fn labels_carry_configured_axes() {
        let config = PipelineConfig {
            y_label: "Voltage (uV)".into(),
            ..PipelineConfig::default()
        };
        let labels = config.labels("Lead II");
        assert_eq!(labels.title, "Lead II");
        assert_eq!(labels.x_label, "Time (s)");
        assert_eq!(labels.y_label, "Voltage (uV)");
    }
    #[test]
    fn missing_config_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = PipelineConfig::from_json_file(dir.path().join("nope.json"));
        assert!(matches!(result, Err(EcgError::Config(_))));
    }
}
