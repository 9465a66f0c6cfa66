use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::error;
use ecg_smoother::{EcgPipeline, PipelineConfig, PipelineReport, PlotBackend};
/// Smooth an ECG recording with a centered moving average and plot the raw
/// and filtered signals.
#[derive(Parser, Debug)]
#[command(name = "ecg-smoother")]
#[command(version)]
struct Args {
    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Whitespace separated voltage samples in millivolts
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Seconds between samples (0.004 = 250 Hz)
    #[arg(long)]
    sampling_interval: Option<f64>,
    /// Moving average window for the filtered plot
    #[arg(short, long)]
    window_size: Option<usize>,
    #[arg(long)]
    raw_output: Option<PathBuf>,
    #[arg(long)]
    filtered_output: Option<PathBuf>,
    #[arg(long)]
    raw_title: Option<String>,
    #[arg(long)]
    filtered_title: Option<String>,
    #[arg(short, long, value_enum)]
    backend: Option<Backend>,
    /// gnuplot executable used by the gnuplot backend
    #[arg(long)]
    gnuplot: Option<String>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
}
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Backend {
    Native,
    Gnuplot,
}
impl From<Backend> for PlotBackend {
    fn from(value: Backend) -> Self {
        match value {
            Backend::Native => PlotBackend::Native,
            Backend::Gnuplot => PlotBackend::Gnuplot,
        }
    }
}
impl Args {
    fn into_config(self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(interval) = self.sampling_interval {
            config.sampling_interval = interval;
        }
        if let Some(window_size) = self.window_size {
            config.filtered.window_size = window_size;
        }
        if let Some(output) = self.raw_output {
            config.raw.output = output;
        }
        if let Some(output) = self.filtered_output {
            config.filtered.output = output;
        }
        if let Some(title) = self.raw_title {
            config.raw.title = title;
        }
        if let Some(title) = self.filtered_title {
            config.filtered.title = title;
        }
        if let Some(backend) = self.backend {
            config.backend = backend.into();
        }
        if let Some(program) = self.gnuplot {
            config.gnuplot_program = program;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        Ok(config)
    }
}
fn run(args: Args) -> Result<PipelineReport> {
    let config = args.into_config()?;
    let exporter = config.exporter();
    let input = config.input.clone();
    let pipeline = EcgPipeline::new(config, exporter);
    pipeline
        .run()
        .with_context(|| format!("cannot process {}", input.display()))
}
fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    match run(Args::parse()) {
        Ok(_) => {
            println!("Processing complete. Check .png files!");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
