//! Evaluation of wavelength meter measurement logs.
//!
//! Log files are read with [`reader::read_lta_file`] and stitched into one
//! continuous [`series::SeriesAggregator`], which computes descriptive
//! statistics and the stability of the measured wavelength or frequency.

pub mod analysis;
pub mod config;
pub mod error;
pub mod manager;
pub mod model;
pub mod reader;
pub mod series;
pub mod stats;

pub use error::EvalError;
pub use model::{Encoding, Mode};
pub use reader::ReadOptions;
pub use series::{SeriesAggregator, find_nearest};
