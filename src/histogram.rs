//! histogram — fixed-binning 1-D histogram with JSON persistence.
//!
//! Purpose
//! -------
//! Bin per-event `cos θ` values for inspection and persist the result to a
//! file that other tools can read back.
//!
//! Key behaviors
//! -------------
//! - [`HistogramSpec`] validates the binning (`bins > 0`, finite
//!   `low < high`). The default is 20 bins over `[-1, 1]`.
//! - Bins are half-open `[low + k·w, low + (k+1)·w)`. Values below `low`
//!   go to `underflow`; values at or above `high` (and NaN) go to
//!   `overflow`. `entries` counts every fill.
//! - [`Histogram1D::write_json`] / [`Histogram1D::read_json`] persist the
//!   full state with `serde_json`.
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// Result alias for histogram construction and persistence.
pub type HistogramResult<T> = Result<T, HistogramError>;

#[derive(Debug, Clone, PartialEq)]
pub enum HistogramError {
    /// `bins` must be > 0 and `low < high`, both finite.
    InvalidBinning { bins: usize, low: f64, high: f64 },

    /// File could not be created, written or read.
    Io { path: String, message: String },

    /// JSON encoding or decoding failed.
    Serde { path: String, message: String },
}

impl std::error::Error for HistogramError {}

impl std::fmt::Display for HistogramError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistogramError::InvalidBinning { bins, low, high } => {
                write!(f, "Invalid binning: {bins} bins over [{low}, {high}]")
            }
            HistogramError::Io { path, message } => {
                write!(f, "Histogram file '{path}': {message}")
            }
            HistogramError::Serde { path, message } => {
                write!(f, "Histogram file '{path}' is not valid JSON: {message}")
            }
        }
    }
}

/// Name, title and binning of a histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSpec {
    pub name: String,
    pub title: String,
    pub bins: usize,
    pub low: f64,
    pub high: f64,
}

impl HistogramSpec {
    /// # Errors
    /// - [`HistogramError::InvalidBinning`] for zero bins or a bad range.
    pub fn new(
        name: impl Into<String>, title: impl Into<String>, bins: usize, low: f64, high: f64,
    ) -> HistogramResult<Self> {
        if bins == 0 || !low.is_finite() || !high.is_finite() || low >= high {
            return Err(HistogramError::InvalidBinning { bins, low, high });
        }
        Ok(Self { name: name.into(), title: title.into(), bins, low, high })
    }
}

impl Default for HistogramSpec {
    fn default() -> Self {
        Self {
            name: "costh".to_string(),
            title: "cos(theta) of the negative particle".to_string(),
            bins: 20,
            low: -1.0,
            high: 1.0,
        }
    }
}

/// Uniformly binned 1-D histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram1D {
    #[serde(flatten)]
    spec: HistogramSpec,
    counts: Vec<u64>,
    underflow: u64,
    overflow: u64,
    entries: u64,
}

impl Histogram1D {
    /// Empty histogram for `spec`.
    ///
    /// # Errors
    /// - [`HistogramError::InvalidBinning`] if `spec` was built by hand with
    ///   an invalid binning.
    pub fn new(spec: HistogramSpec) -> HistogramResult<Self> {
        let spec = HistogramSpec::new(spec.name, spec.title, spec.bins, spec.low, spec.high)?;
        Ok(Self { counts: vec![0; spec.bins], spec, underflow: 0, overflow: 0, entries: 0 })
    }

    pub fn spec(&self) -> &HistogramSpec {
        &self.spec
    }

    pub fn bin_width(&self) -> f64 {
        (self.spec.high - self.spec.low) / self.spec.bins as f64
    }

    /// In-range bin of `x`, or `None` for under/overflow.
    pub fn bin_index(&self, x: f64) -> Option<usize> {
        if !(x >= self.spec.low && x < self.spec.high) {
            return None;
        }
        let k = ((x - self.spec.low) / self.bin_width()) as usize;
        Some(k.min(self.spec.bins - 1))
    }

    pub fn bin_center(&self, k: usize) -> f64 {
        self.spec.low + (k as f64 + 0.5) * self.bin_width()
    }

    pub fn fill(&mut self, x: f64) {
        self.entries += 1;
        match self.bin_index(x) {
            Some(k) => self.counts[k] += 1,
            None if x < self.spec.low => self.underflow += 1,
            None => self.overflow += 1,
        }
    }

    pub fn fill_all<'a, I: IntoIterator<Item = &'a f64>>(&mut self, values: I) {
        for &x in values {
            self.fill(x);
        }
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn underflow(&self) -> u64 {
        self.underflow
    }

    pub fn overflow(&self) -> u64 {
        self.overflow
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Sum of in-range bin contents.
    pub fn integral(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Write the histogram as pretty-printed JSON, replacing `path`.
    ///
    /// # Errors
    /// - [`HistogramError::Io`] / [`HistogramError::Serde`].
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> HistogramResult<()> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let io_err = |e: std::io::Error| HistogramError::Io {
            path: display.clone(),
            message: e.to_string(),
        };
        let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|e| HistogramError::Serde {
            path: display.clone(),
            message: e.to_string(),
        })?;
        writer.write_all(b"\n").map_err(io_err)?;
        writer.flush().map_err(io_err)
    }

    /// Read a histogram written by [`write_json`](Self::write_json).
    ///
    /// # Errors
    /// - [`HistogramError::Io`] / [`HistogramError::Serde`].
    /// - [`HistogramError::InvalidBinning`] if the stored binning is invalid
    ///   or does not match the stored counts.
    pub fn read_json<P: AsRef<Path>>(path: P) -> HistogramResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let file = File::open(path)
            .map_err(|e| HistogramError::Io { path: display.clone(), message: e.to_string() })?;
        let hist: Self = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| HistogramError::Serde { path: display.clone(), message: e.to_string() })?;
        let spec = &hist.spec;
        HistogramSpec::new(spec.name.clone(), spec.title.clone(), spec.bins, spec.low, spec.high)?;
        if hist.counts.len() != spec.bins {
            return Err(HistogramError::InvalidBinning {
                bins: hist.counts.len(),
                low: spec.low,
                high: spec.high,
            });
        }
        Ok(hist)
    }
}
