use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use log::info;
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::drivers::error::EcgError;
use crate::drivers::series::SampleSeries;
/// Caller supplied text for one plot. Axis labels are conventions of the
/// caller, never derived from the data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlotLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: String,
}
impl PlotLabels {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}
impl Default for PlotLabels {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_label: "Time (s)".into(),
            y_label: "Voltage (mV)".into(),
            legend: "ECG".into(),
        }
    }
}
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub foreground: RGBColor,
    pub line: RGBColor,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            background: WHITE,
            foreground: BLACK,
            line: RGBColor(200, 30, 30),
        }
    }
}
/// Sink that turns a series into an image file.
///
/// Implementations either leave a complete image at `destination` or nothing.
pub trait PlotExporter {
    fn export(
        &self,
        series: &SampleSeries,
        destination: &Path,
        labels: &PlotLabels,
    ) -> Result<(), EcgError>;
}
impl<T: PlotExporter + ?Sized> PlotExporter for Box<T> {
    fn export(
        &self,
        series: &SampleSeries,
        destination: &Path,
        labels: &PlotLabels,
    ) -> Result<(), EcgError> {
        (**self).export(series, destination, labels)
    }
}
/// Renders in-process with plotters and writes a PNG.
#[derive(Clone, Debug, Default)]
pub struct PngExporter {
    style: PlotStyle,
}
impl PngExporter {
    pub fn new(style: PlotStyle) -> Self {
        Self { style }
    }
}
impl PlotExporter for PngExporter {
    fn export(
        &self,
        series: &SampleSeries,
        destination: &Path,
        labels: &PlotLabels,
    ) -> Result<(), EcgError> {
        let png = render_series_png(series, labels, &self.style)?;
        let staged = StagedOutput::new(destination);
        fs::write(staged.path(), &png).map_err(|err| {
            EcgError::SinkUnavailable(format!("cannot write {}: {err}", destination.display()))
        })?;
        staged.commit()?;
        info!(
            "wrote {} ({} samples, {} bytes)",
            destination.display(),
            series.len(),
            png.len()
        );
        Ok(())
    }
}
/// Largest canvas the native renderer allocates (8192 x 8192).
pub const MAX_PIXELS: usize = 8192 * 8192;
pub fn render_series_png(
    series: &SampleSeries,
    labels: &PlotLabels,
    style: &PlotStyle,
) -> Result<Vec<u8>, EcgError> {
    if style.width == 0 || style.height == 0 {
        return Err(EcgError::Plot(format!(
            "image size {}x{} has no pixels",
            style.width, style.height
        )));
    }
    let bytes = (style.width as usize)
        .checked_mul(style.height as usize)
        .filter(|pixels| *pixels <= MAX_PIXELS)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or_else(|| {
            EcgError::Plot(format!(
                "image size {}x{} exceeds {MAX_PIXELS} pixels",
                style.width, style.height
            ))
        })?;
    let mut buffer = vec![0u8; bytes];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let x_max = if series.duration_seconds() > 0.0 {
            series.duration_seconds()
        } else {
            1.0
        };
        let (y_min, y_max) = y_bounds(series);
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(
                &labels.title,
                ("sans-serif", 24).into_font().color(&style.foreground),
            )
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 45)
            .build_cartesian_2d(0f64..x_max, y_min..y_max)?;
        chart
            .configure_mesh()
            .x_desc(labels.x_label.as_str())
            .y_desc(labels.y_label.as_str())
            .axis_style(&style.foreground)
            .label_style(("sans-serif", 14).into_font().color(&style.foreground))
            .light_line_style(&style.foreground.mix(0.1))
            .draw()?;
        let color = style.line;
        chart
            .draw_series(LineSeries::new(series.points(), &color))?
            .label(labels.legend.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        chart
            .configure_series_labels()
            .border_style(&style.foreground.mix(0.2))
            .background_style(&style.background)
            .draw()?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn y_bounds(series: &SampleSeries) -> (f64, f64) {
    match series.voltage_range() {
        None => (-1.0, 1.0),
        Some((lo, hi)) if (hi - lo).abs() < f64::EPSILON => (lo - 1.0, hi + 1.0),
        Some((lo, hi)) => {
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        }
    }
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EcgError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| EcgError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
/// Sibling file that is renamed onto the destination on [`commit`](Self::commit)
/// and removed on drop otherwise.
#[derive(Debug)]
pub struct StagedOutput {
    staging: PathBuf,
    destination: PathBuf,
    committed: bool,
}
impl StagedOutput {
    pub fn new(destination: &Path) -> Self {
        let name = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "plot".into());
        let staging = destination.with_file_name(format!(".{name}.partial"));
        Self {
            staging,
            destination: destination.to_path_buf(),
            committed: false,
        }
    }
    pub fn path(&self) -> &Path {
        &self.staging
    }
    pub fn commit(mut self) -> Result<(), EcgError> {
        fs::rename(&self.staging, &self.destination).map_err(|err| {
            EcgError::SinkUnavailable(format!(
                "cannot move image into {}: {err}",
                self.destination.display()
            ))
        })?;
        self.committed = true;
        Ok(())
    }
}
impl Drop for StagedOutput {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.staging);
        }
    }
}
