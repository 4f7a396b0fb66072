use crate::error::EvalError;
use crate::model::{Mode, Row, Sample};
use crate::reader::{ReadOptions, read_lta_file};
use crate::stats::Statistics;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cumulative measurement series built from one or more log files.
///
/// Time, wavelength and frequency are stored as parallel arrays. Each file
/// is appended so that its time axis starts where the previous one ended,
/// which keeps the time array sorted.
#[derive(Debug, Default, Clone)]
pub struct SeriesAggregator {
    time: Vec<f64>,
    wavelength: Vec<f64>,
    frequency: Vec<f64>,
    n_files: usize,
}

/// Summary of the files ingested so far.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesInfo {
    pub n_files: usize,
    /// Total measurement time in s, `None` if there are no samples.
    pub total_time: Option<f64>,
}

impl SeriesAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a log file and append its samples.
    pub fn ingest<P: AsRef<Path>>(
        &mut self,
        file: P,
        options: &ReadOptions,
    ) -> Result<(), EvalError> {
        let rows = read_lta_file(file, options)?;
        self.append_rows(&rows);
        Ok(())
    }

    /// Append the rows of one file.
    ///
    /// Rows with a negative wavelength (under- or overexposure) are dropped.
    /// The file counter is incremented even if no row remains.
    pub fn append_rows(&mut self, rows: &[Row]) {
        let time_offset = self.time.last().copied().unwrap_or(0.0);

        let n_vals = self.len();
        for &row in rows.iter().filter(|row| row.wavelength_nm >= 0.0) {
            self.push(Sample::from_row(row, time_offset));
        }
        log::debug!(
            "appended {} of {} rows with time offset {time_offset} s",
            self.len() - n_vals,
            rows.len()
        );

        self.n_files += 1;
    }

    fn push(&mut self, sample: Sample) {
        self.time.push(sample.time);
        self.wavelength.push(sample.wavelength);
        self.frequency.push(sample.frequency);
    }

    pub fn clear(&mut self) {
        self.time.clear();
        self.wavelength.clear();
        self.frequency.clear();
        self.n_files = 0;
    }

    /// Time in s.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Wavelength in nm.
    pub fn wavelength(&self) -> &[f64] {
        &self.wavelength
    }

    /// Frequency in GHz.
    pub fn frequency(&self) -> &[f64] {
        &self.frequency
    }

    pub fn values(&self, mode: Mode) -> &[f64] {
        match mode {
            Mode::Wavelength => &self.wavelength,
            Mode::Frequency => &self.frequency,
        }
    }

    pub fn n_files(&self) -> usize {
        self.n_files
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn info(&self) -> SeriesInfo {
        SeriesInfo {
            n_files: self.n_files,
            total_time: self.time.last().copied(),
        }
    }

    /// Compute the statistics of the selected series.
    pub fn statistics(&self, mode: Mode) -> Statistics {
        Statistics::from_values(self.values(mode))
    }

    /// Compute the stability of the selected series.
    ///
    /// For every sample, returns its value minus the value of the sample
    /// whose time is nearest to its own time plus `time_delta`.
    ///
    /// # Errors
    /// Returns [`EvalError::InvalidArgument`] if `time_delta` is not finite.
    pub fn stability(&self, time_delta: f64, mode: Mode) -> Result<Vec<f64>, EvalError> {
        if !time_delta.is_finite() {
            return Err(EvalError::InvalidArgument(format!(
                "time delta must be finite, but is {time_delta}"
            )));
        }
        let vals = self.values(mode);
        let diffs = self
            .time
            .iter()
            .zip(vals)
            .filter_map(|(&time, &val)| {
                find_nearest(&self.time, time + time_delta).map(|idx| val - vals[idx])
            })
            .collect();
        Ok(diffs)
    }
}

/// Find the index of the element of a sorted array nearest to `target`.
///
/// If two elements are equally near, the earlier one is chosen.
/// Returns `None` if the array is empty.
pub fn find_nearest(sorted: &[f64], target: f64) -> Option<usize> {
    if sorted.is_empty() {
        return None;
    }
    let idx = sorted.partition_point(|&val| val < target);
    if idx == 0 {
        return Some(0);
    }
    if idx == sorted.len() {
        return Some(idx - 1);
    }
    if (target - sorted[idx - 1]).abs() <= (target - sorted[idx]).abs() {
        Some(idx - 1)
    } else {
        Some(idx)
    }
}
