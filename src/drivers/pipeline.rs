use std::path::Path;
use log::{error, info, warn};
use crate::drivers::config::PipelineConfig;
use crate::drivers::error::EcgError;
use crate::drivers::plot::PlotExporter;
use crate::drivers::series::SampleSeries;
/// Read, plot raw, smooth, plot smoothed.
pub struct EcgPipeline<E: PlotExporter> {
    config: PipelineConfig,
    exporter: E,
}
/// What a run produced. Only an unreadable input aborts a run outright; every
/// other failure is recorded here.
#[derive(Debug)]
pub struct PipelineReport {
    pub raw: SampleSeries,
    pub raw_export: Result<(), EcgError>,
    pub filtered: Result<SampleSeries, EcgError>,
    /// `None` when the filter rejected its parameters and nothing was plotted.
    pub filtered_export: Option<Result<(), EcgError>>,
}
impl PipelineReport {
    pub fn filter_rejected(&self) -> bool {
        self.filtered.is_err()
    }
    pub fn exports_succeeded(&self) -> bool {
        self.raw_export.is_ok() && matches!(self.filtered_export, Some(Ok(())))
    }
}
impl<E: PlotExporter> EcgPipeline<E> {
    pub fn new(config: PipelineConfig, exporter: E) -> Self {
        Self { config, exporter }
    }
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
    pub fn run(&self) -> Result<PipelineReport, EcgError> {
        let reader = self.config.reader()?;
        let raw = reader.read_path(&self.config.input)?;
        Ok(self.process(raw))
    }
    pub fn process(&self, raw: SampleSeries) -> PipelineReport {
        if raw.is_empty() {
            warn!("input contained no samples; plots will be empty");
        }
        let raw_export = self.export(&raw, &self.config.raw.output, &self.config.raw.title);
        let filtered = self.config.filter().map(|filter| filter.apply(&raw));
        let filtered_export = match &filtered {
            Ok(series) => Some(self.export(
                series,
                &self.config.filtered.output,
                &self.config.filtered.title,
            )),
            Err(err) => {
                error!("filter rejected: {err}");
                None
            }
        };
        PipelineReport {
            raw,
            raw_export,
            filtered,
            filtered_export,
        }
    }
    fn export(
        &self,
        series: &SampleSeries,
        destination: &Path,
        title: &str,
    ) -> Result<(), EcgError> {
        let labels = self.config.labels(title);
        let result = self.exporter.export(series, destination, &labels);
        match &result {
            Ok(()) => info!("plotted {title:?} to {}", destination.display()),
            Err(err) => error!("could not plot {title:?} to {}: {err}", destination.display()),
        }
        result
    }
}
