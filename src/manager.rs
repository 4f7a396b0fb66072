use crate::analysis::{Report, StabilityReport};
use crate::config::Config;
use crate::model::Mode;
use crate::series::SeriesAggregator;
use anyhow::{Context, Result, bail};
use glob::{Pattern, glob};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub struct Manager {
    data_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        let cfg =
            Config::from_file(data_dir.join("config.toml")).context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self { data_dir, cfg })
    }

    pub fn show_info(&self) -> Result<()> {
        let series = self.load_series().context("failed to load series")?;
        let info = series.info();
        log::info!("number of loaded files: {}", info.n_files);
        match info.total_time {
            Some(total_time) => log::info!("total measurement time: {total_time} s"),
            None => log::warn!("no valid samples found"),
        }
        Ok(())
    }

    pub fn show_statistics(&self, mode: Mode) -> Result<()> {
        let series = self.load_series().context("failed to load series")?;
        let stats = series.statistics(mode);
        let unit = mode.unit();
        log::info!("{mode} statistics:");
        log::info!("mean: {} {unit}", stats.mean);
        log::info!("standard deviation: {} {unit}", stats.std_dev);
        log::info!("minimum value: {} {unit}", stats.min);
        log::info!("maximum value: {} {unit}", stats.max);
        log::info!("delta(max, min): {} {unit}", stats.diff_min_max);
        Ok(())
    }

    pub fn show_stability(&self, time_delta: f64, mode: Mode) -> Result<()> {
        let series = self.load_series().context("failed to load series")?;
        let report = StabilityReport::new(&series, time_delta, mode)
            .context("failed to compute stability")?;
        let unit = mode.unit();
        log::info!(
            "{mode} stability at {time_delta} s over {} samples:",
            report.diffs.len()
        );
        log::info!("mean difference: {} {unit}", report.stats.mean);
        log::info!("standard deviation: {} {unit}", report.stats.std_dev);
        log::info!("minimum difference: {} {unit}", report.stats.min);
        log::info!("maximum difference: {} {unit}", report.stats.max);
        Ok(())
    }

    pub fn analyze(&self) -> Result<()> {
        let series = self.load_series().context("failed to load series")?;

        let report = Report::new(&series, &self.cfg.analysis).context("failed to build report")?;

        let results_file = self.results_file();
        report
            .save(&results_file)
            .context("failed to save results")?;
        log::info!("saved {results_file:?}");

        Ok(())
    }

    pub fn clean(&self) -> Result<()> {
        let results_file = self.results_file();
        if results_file.exists() {
            fs::remove_file(&results_file)
                .with_context(|| format!("failed to remove {results_file:?}"))?;
            log::info!("removed {results_file:?}");
        }
        Ok(())
    }

    fn load_series(&self) -> Result<SeriesAggregator> {
        let mut series = SeriesAggregator::new();
        for file in self.input_files().context("failed to list input files")? {
            series
                .ingest(&file, &self.cfg.input.read)
                .with_context(|| format!("failed to ingest {file:?}"))?;
            log::info!("ingested {file:?}");
        }
        Ok(series)
    }

    fn input_files(&self) -> Result<Vec<PathBuf>> {
        let data_dir = self.data_dir.to_str().context("data dir is not valid UTF-8")?;
        let pattern = format!("{}/{}", Pattern::escape(data_dir), self.cfg.input.pattern);
        let mut files = glob(&pattern)
            .context("failed to glob input files")?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to read input path")?;
        files.retain(|p| p.is_file());
        if files.is_empty() {
            bail!("no input files match {pattern:?}");
        }
        files.sort();
        Ok(files)
    }

    fn results_file(&self) -> PathBuf {
        self.data_dir.join("results.msgpack")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "\
[input]
pattern = \"run-*.lta\"

[analysis]
modes = [\"frequency\"]
time_deltas = [1.0]
";

    const LOG: &str = "Time  [ms]\tSignal 1  [nm]\n0\t500.0\n10\t501.0\n";

    fn setup_dir(data_dir: &Path, files: &[&str]) {
        fs::create_dir_all(data_dir).expect("failed to create data dir");
        fs::write(data_dir.join("config.toml"), CONFIG).expect("failed to write config file");
        for file in files {
            fs::write(data_dir.join(file), LOG).expect("failed to write log file");
        }
    }

    #[test]
    fn input_files_in_lexicographic_order() {
        let dir = tempfile::tempdir().unwrap();
        setup_dir(dir.path(), &["run-9.lta", "run-10.lta", "notes.txt"]);

        let mgr = Manager::new(dir.path()).unwrap();
        let files = mgr.input_files().unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("run-10.lta"), dir.path().join("run-9.lta")]
        );
    }

    #[test]
    fn input_files_in_dir_with_glob_characters() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("scan[1]*?");
        setup_dir(&data_dir, &["run-0.lta", "run-1.lta"]);

        let mgr = Manager::new(&data_dir).unwrap();
        let series = mgr.load_series().unwrap();
        assert_eq!(series.n_files(), 2);
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn no_input_files() {
        let dir = tempfile::tempdir().unwrap();
        setup_dir(dir.path(), &["notes.txt"]);

        let mgr = Manager::new(dir.path()).unwrap();
        assert!(mgr.load_series().is_err());
        assert!(mgr.show_statistics(Mode::Wavelength).is_err());
    }
}
