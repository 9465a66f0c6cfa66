pub mod config;
pub mod error;
pub mod filter;
pub mod gnuplot;
pub mod pipeline;
pub mod plot;
pub mod reader;
pub mod series;
pub use config::{FilteredStageConfig, PipelineConfig, PlotBackend, RawStageConfig};
pub use error::EcgError;
pub use filter::{moving_average, MovingAverageFilter};
pub use gnuplot::GnuplotExporter;
pub use pipeline::{EcgPipeline, PipelineReport};
pub use plot::{render_series_png, PlotExporter, PlotLabels, PlotStyle, PngExporter, StagedOutput};
pub use reader::SampleReader;
pub use series::{Sample, SampleSeries};
