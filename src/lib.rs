//! ECG smoothing pipeline: read voltage samples, apply a centered moving
//! average and plot the raw and smoothed signals.
pub mod drivers;
pub use drivers::*;
