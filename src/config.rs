use crate::model::Mode;
use crate::reader::ReadOptions;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Evaluation configuration parameters.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input files parameters.
    pub input: InputConfig,
    /// Analysis parameters.
    pub analysis: AnalysisConfig,
}

/// Input files parameters.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Glob pattern of the log files, relative to the data directory.
    ///
    /// Matching files are ingested in lexicographic order of their paths,
    /// which sets the time offset of each file. `run-10.lta` comes before
    /// `run-9.lta`, so file indices should be zero-padded. At least one
    /// file must match.
    pub pattern: String,

    /// Options used to read each file.
    #[serde(flatten)]
    pub read: ReadOptions,
}

/// Analysis parameters.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Quantities to analyze.
    pub modes: Vec<Mode>,
    /// Time deltas of the stability analysis in s.
    pub time_deltas: Vec<f64>,
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// The file must be TOML-encoded and contain a serialized [`Config`].
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.input.pattern.trim().is_empty() {
            bail!("input pattern must not be empty");
        }
        if self.input.read.marker.is_empty() {
            bail!("marker must not be empty");
        }
        check_num(self.input.read.skip_after_marker, 0..1000)
            .context("invalid number of lines to skip after the marker")?;

        check_num(self.analysis.modes.len(), 1..).context("invalid number of modes")?;
        for (i_delta, &time_delta) in self.analysis.time_deltas.iter().enumerate() {
            if !time_delta.is_finite() {
                bail!("time delta {i_delta} must be finite, but is {time_delta}");
            }
        }

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
