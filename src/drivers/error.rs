use std::io;
use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum EcgError {
    #[error("cannot open sample source {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("plot sink unavailable: {0}")]
    SinkUnavailable(String),
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for EcgError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        EcgError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for EcgError {
    fn from(value: image::ImageError) -> Self {
        EcgError::Plot(value.to_string())
    }
}
impl From<serde_json::Error> for EcgError {
    fn from(value: serde_json::Error) -> Self {
        EcgError::Config(value.to_string())
    }
}
