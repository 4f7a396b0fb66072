use crate::config::AnalysisConfig;
use crate::error::EvalError;
use crate::model::Mode;
use crate::series::{SeriesAggregator, SeriesInfo};
use crate::stats::Statistics;
use anyhow::{Context, Result};
use rmp_serde::{decode, encode};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// Statistics of one quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeReport {
    pub mode: Mode,
    pub stats: Statistics,
}

/// Stability of one quantity at one time delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityReport {
    pub mode: Mode,
    pub time_delta: f64,
    /// Statistics of the differences.
    pub stats: Statistics,
    /// Difference of every sample with its nearest sample at `time_delta`.
    pub diffs: Vec<f64>,
}

impl StabilityReport {
    pub fn new(
        series: &SeriesAggregator,
        time_delta: f64,
        mode: Mode,
    ) -> Result<Self, EvalError> {
        let diffs = series.stability(time_delta, mode)?;
        Ok(Self {
            mode,
            time_delta,
            stats: Statistics::from_values(&diffs),
            diffs,
        })
    }
}

/// Results of the evaluation of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub info: SeriesInfo,
    pub statistics: Vec<ModeReport>,
    pub stability: Vec<StabilityReport>,
}

impl Report {
    pub fn new(series: &SeriesAggregator, cfg: &AnalysisConfig) -> Result<Self> {
        let statistics = cfg
            .modes
            .iter()
            .map(|&mode| ModeReport {
                mode,
                stats: series.statistics(mode),
            })
            .collect();

        let mut stability = Vec::with_capacity(cfg.modes.len() * cfg.time_deltas.len());
        for &mode in &cfg.modes {
            for &time_delta in &cfg.time_deltas {
                let report = StabilityReport::new(series, time_delta, mode).with_context(|| {
                    format!("failed to compute {mode} stability at {time_delta} s")
                })?;
                stability.push(report);
            }
        }

        Ok(Self {
            info: series.info(),
            statistics,
            stability,
        })
    }

    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = file.as_ref();
        let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
        let mut writer = BufWriter::new(file);
        encode::write_named(&mut writer, self).context("failed to serialize report")?;
        writer.flush().context("failed to flush writer stream")?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let file = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
        let mut reader = BufReader::new(file);
        let report = decode::from_read(&mut reader).context("failed to deserialize report")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;

    #[test]
    fn build_and_save_report() {
        let mut series = SeriesAggregator::new();
        series.append_rows(&[
            Row::new(0.0, 500.0),
            Row::new(1000.0, 500.0),
            Row::new(2000.0, 502.0),
        ]);
        let cfg = AnalysisConfig {
            modes: vec![Mode::Wavelength, Mode::Frequency],
            time_deltas: vec![0.0, 1.0],
        };

        let report = Report::new(&series, &cfg).unwrap();
        assert_eq!(report.info.n_files, 1);
        assert_eq!(report.info.total_time, Some(2.0));
        assert_eq!(report.statistics.len(), 2);
        assert_eq!(report.statistics[0].stats.max, 502.0);
        assert_eq!(report.stability.len(), 4);
        assert_eq!(report.stability[0].diffs, vec![0.0; 3]);
        assert_eq!(report.stability[1].diffs, vec![0.0, -2.0, 0.0]);
        assert_eq!(report.stability[1].stats.min, -2.0);

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("results.msgpack");
        report.save(&file).unwrap();
        assert_eq!(Report::load(&file).unwrap(), report);
    }
}
