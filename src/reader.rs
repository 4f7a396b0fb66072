use crate::error::EvalError;
use crate::model::{Encoding, Row};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Line that introduces the data section of a log file.
pub const DEFAULT_MARKER: &str = "Time  [ms]";

/// Options controlling how a log file is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Text encoding of the file.
    #[serde(default)]
    pub encoding: Encoding,
    /// Prefix of the line that ends the header.
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Number of metadata lines between the marker line and the data rows.
    #[serde(default)]
    pub skip_after_marker: usize,
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_owned()
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            encoding: Encoding::default(),
            marker: default_marker(),
            skip_after_marker: 0,
        }
    }
}

impl ReadOptions {
    pub fn with_encoding(encoding: Encoding) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }
}

/// Read the (time, wavelength) rows of a log file.
///
/// The header is skipped up to and including the first line starting with
/// the marker. Only the first two columns of each data row are kept, and rows
/// where either of them is missing or not a number are dropped.
///
/// # Errors
/// Returns [`EvalError::IOError`] if the file cannot be read,
/// [`EvalError::Decode`] if it is not valid in the selected encoding and
/// [`EvalError::Format`] if the marker is never found.
pub fn read_lta_file<P: AsRef<Path>>(
    file: P,
    options: &ReadOptions,
) -> Result<Vec<Row>, EvalError> {
    let file = file.as_ref();
    let bytes = fs::read(file)?;
    let text = options
        .encoding
        .decode(bytes)
        .ok_or_else(|| EvalError::Decode {
            path: file.to_path_buf(),
            encoding: options.encoding.to_string(),
        })?;

    let mut lines = text.lines();

    let mut n_header_lines = 0;
    loop {
        match lines.next() {
            Some(line) if line.starts_with(&options.marker) => break,
            Some(_) => n_header_lines += 1,
            None => {
                return Err(EvalError::Format {
                    path: file.to_path_buf(),
                    marker: options.marker.clone(),
                });
            }
        }
    }
    log::debug!("skipped {n_header_lines} header lines of {file:?}");

    let mut rows = Vec::new();
    let mut n_dropped = 0;
    for line in lines.skip(options.skip_after_marker) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line) {
            Some(row) => rows.push(row),
            None => n_dropped += 1,
        }
    }
    if n_dropped > 0 {
        log::debug!("dropped {n_dropped} invalid rows of {file:?}");
    }

    Ok(rows)
}

fn parse_row(line: &str) -> Option<Row> {
    let mut fields = line.split_whitespace();
    let time_ms = parse_field(fields.next()?)?;
    let wavelength_nm = parse_field(fields.next()?)?;
    Some(Row::new(time_ms, wavelength_nm))
}

fn parse_field(field: &str) -> Option<f64> {
    // Accept decimal commas written by some instrument locales.
    let val: f64 = field.replace(',', ".").parse().ok()?;
    val.is_finite().then_some(val)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("failed to create temporary file");
        file.write_all(bytes).expect("failed to write temporary file");
        file
    }

    const LOG: &str = "\
[Measurement]
Start = 2019-05-03 11:32:07
Channels = 1

Time  [ms]\tSignal 1  [nm]\tSignal 2  [nm]
0\t500.000123\t600.1
10\t500.000124\t600.2
20\tUnder.\t600.3
30\t-3.0\t600.4
40\t500.000125

50
60\t500.000126\t600.6\t1.0
";

    #[test]
    fn read_rows() {
        let file = write_file(LOG.as_bytes());
        let rows = read_lta_file(file.path(), &ReadOptions::default()).unwrap();
        assert_eq!(
            rows,
            vec![
                Row::new(0.0, 500.000123),
                Row::new(10.0, 500.000124),
                Row::new(30.0, -3.0),
                Row::new(40.0, 500.000125),
                Row::new(60.0, 500.000126),
            ]
        );
    }

    #[test]
    fn skip_metadata_after_marker() {
        let file = write_file(LOG.as_bytes());
        let options = ReadOptions {
            skip_after_marker: 2,
            ..ReadOptions::default()
        };
        let rows = read_lta_file(file.path(), &options).unwrap();
        assert_eq!(rows.first(), Some(&Row::new(30.0, -3.0)));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn decimal_comma() {
        let file = write_file(b"Time  [ms]\n0\t780,5\n10\t1,2,3\n20\t780.5,\n30,5\t780\n");
        let rows = read_lta_file(file.path(), &ReadOptions::default()).unwrap();
        assert_eq!(rows, vec![Row::new(0.0, 780.5), Row::new(30.5, 780.0)]);
    }

    #[test]
    fn missing_marker() {
        let file = write_file(b"[Measurement]\n0\t500.0\n");
        let result = read_lta_file(file.path(), &ReadOptions::default());
        assert!(matches!(result, Err(EvalError::Format { .. })));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_lta_file(dir.path().join("absent.lta"), &ReadOptions::default());
        assert!(matches!(result, Err(EvalError::IOError(_))));
    }

    #[test]
    fn latin1_header() {
        let mut bytes = b"Operator = J\xfcrgen\r\nTime  [ms]\tSignal 1  [nm]\r\n".to_vec();
        bytes.extend_from_slice(b"5\t780,241\r\n");

        let file = write_file(&bytes);
        let result = read_lta_file(file.path(), &ReadOptions::default());
        assert!(matches!(result, Err(EvalError::Decode { .. })));

        let options = ReadOptions::with_encoding(Encoding::Latin1);
        let rows = read_lta_file(file.path(), &options).unwrap();
        assert_eq!(rows, vec![Row::new(5.0, 780.241)]);
    }
}
