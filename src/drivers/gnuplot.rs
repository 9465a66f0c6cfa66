use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use log::{debug, info};
use crate::drivers::error::EcgError;
use crate::drivers::plot::{PlotExporter, PlotLabels, StagedOutput};
use crate::drivers::series::SampleSeries;
/// Plots by piping a script and inline data into an external gnuplot process.
#[derive(Clone, Debug)]
pub struct GnuplotExporter {
    program: String,
    width: u32,
    height: u32,
}
impl GnuplotExporter {
    pub const DEFAULT_PROGRAM: &'static str = "gnuplot";
    pub fn new(program: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            program: program.into(),
            width,
            height,
        }
    }
    pub fn program(&self) -> &str {
        &self.program
    }
}
impl Default for GnuplotExporter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM, 1280, 720)
    }
}
impl PlotExporter for GnuplotExporter {
    fn export(
        &self,
        series: &SampleSeries,
        destination: &Path,
        labels: &PlotLabels,
    ) -> Result<(), EcgError> {
        let staged = StagedOutput::new(destination);
        let mut session = GnuplotSession::spawn(&self.program)?;
        {
            let mut writer = BufWriter::new(session.stdin()?);
            write_script(
                &mut writer,
                series,
                staged.path(),
                labels,
                (self.width, self.height),
            )
            .and_then(|_| writer.flush())
            .map_err(|err| {
                EcgError::SinkUnavailable(format!("failed to send data to {}: {err}", self.program))
            })?;
        }
        session.finish()?;
        let written = fs::metadata(staged.path()).map(|m| m.len()).unwrap_or(0);
        if written == 0 {
            return Err(EcgError::SinkUnavailable(format!(
                "{} produced no image for {}",
                self.program,
                destination.display()
            )));
        }
        staged.commit()?;
        info!(
            "wrote {} via {} ({} samples)",
            destination.display(),
            self.program,
            series.len()
        );
        Ok(())
    }
}
/// Running gnuplot child. The pipe is closed and the process reaped on every
/// exit path; an unfinished session is killed on drop.
struct GnuplotSession {
    child: Child,
    stdin: Option<ChildStdin>,
    finished: bool,
}
impl GnuplotSession {
    fn spawn(program: &str) -> Result<Self, EcgError> {
        let mut child = Command::new(program)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|err| EcgError::SinkUnavailable(format!("cannot start {program}: {err}")))?;
        debug!("spawned {program} (pid {})", child.id());
        let stdin = child.stdin.take();
        Ok(Self {
            child,
            stdin,
            finished: false,
        })
    }
    fn stdin(&mut self) -> Result<&mut ChildStdin, EcgError> {
        self.stdin
            .as_mut()
            .ok_or_else(|| EcgError::SinkUnavailable("gnuplot stdin is not piped".into()))
    }
    fn finish(mut self) -> Result<(), EcgError> {
        drop(self.stdin.take());
        let status = self
            .child
            .wait()
            .map_err(|err| EcgError::SinkUnavailable(format!("gnuplot did not exit: {err}")))?;
        self.finished = true;
        if !status.success() {
            return Err(EcgError::SinkUnavailable(format!("gnuplot exited with {status}")));
        }
        Ok(())
    }
}
impl Drop for GnuplotSession {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if !self.finished {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
pub fn write_script<W: Write>(
    out: &mut W,
    series: &SampleSeries,
    output: &Path,
    labels: &PlotLabels,
    (width, height): (u32, u32),
) -> io::Result<()> {
    writeln!(out, "set terminal pngcairo enhanced size {width},{height}")?;
    writeln!(out, "set output {}", quote(&output.to_string_lossy()))?;
    writeln!(out, "set title {}", quote(&labels.title))?;
    writeln!(out, "set xlabel {}", quote(&labels.x_label))?;
    writeln!(out, "set ylabel {}", quote(&labels.y_label))?;
    writeln!(
        out,
        "plot '-' with lines lw 1 title {}",
        quote(&labels.legend)
    )?;
    for (time, voltage) in series.points() {
        writeln!(out, "{time:.6} {voltage:.6}")?;
    }
    writeln!(out, "e")?;
    writeln!(out, "set output")?;
    Ok(())
}
// gnuplot single-quoted strings escape a quote by doubling it
fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
