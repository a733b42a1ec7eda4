//! analysis — the end-to-end asymmetry measurement.
//!
//! Purpose
//! -------
//! Wire the stages together for one data file: load the events, compute the
//! counting estimate, fill and persist the `cos θ` histogram, fit the
//! angular distribution with MIGRAD and MINOS, and keep everything needed
//! to print the report.
//!
//! Key behaviors
//! -------------
//! - [`AnalysisConfig`] holds the fixed run constants (`L3.dat`,
//!   `asymmetrie.json`, capacity 1000, 20 bins, `A = 0.0 ± 0.1` start,
//!   500 iterations, tolerance 1.0, `up = 0.5`).
//! - [`run_analysis`] returns an [`AnalysisOutcome`]; it never prints.
//! - [`AnalysisOutcome::render`] produces the console report.
//!
//! Conventions
//! -----------
//! - Load failures and empty samples are errors. A fit that is not valid,
//!   a degraded covariance, or a MINOS side without a crossing are reported,
//!   not raised.
use crate::{
    events::{DataError, LoadOptions, SampleMeta, load_events},
    histogram::{Histogram1D, HistogramError, HistogramSpec},
    minimizer::{FitResult, Minimizer, MinimizerOptions, Parameter, ParameterSet},
    model::{AngularDistribution, CountingEstimate, PHYSICAL_LIMIT},
    optimization::errors::OptError,
    report::{format_counting_report, format_fit_report},
};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Default input file.
pub const DEFAULT_INPUT: &str = "L3.dat";
/// Default histogram output file.
pub const DEFAULT_OUTPUT: &str = "asymmetrie.json";

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Failure of any pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    InvalidConfig { reason: &'static str },
    Data(DataError),
    Fit(OptError),
    Histogram(HistogramError),
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::InvalidConfig { .. } => None,
            AnalysisError::Data(e) => Some(e),
            AnalysisError::Fit(e) => Some(e),
            AnalysisError::Histogram(e) => Some(e),
        }
    }
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::InvalidConfig { reason } => {
                write!(f, "Invalid analysis configuration: {reason}")
            }
            AnalysisError::Data(_) => write!(f, "Failed to load the event sample"),
            AnalysisError::Fit(_) => write!(f, "Asymmetry fit failed"),
            AnalysisError::Histogram(_) => write!(f, "Failed to write the histogram"),
        }
    }
}

impl From<DataError> for AnalysisError {
    fn from(err: DataError) -> Self {
        AnalysisError::Data(err)
    }
}

impl From<OptError> for AnalysisError {
    fn from(err: OptError) -> Self {
        AnalysisError::Fit(err)
    }
}

impl From<HistogramError> for AnalysisError {
    fn from(err: HistogramError) -> Self {
        AnalysisError::Histogram(err)
    }
}

/// Run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub load: LoadOptions,
    pub histogram: HistogramSpec,
    pub minimizer: MinimizerOptions,
    /// Start value of `A`.
    pub initial_asymmetry: f64,
    /// Initial step of `A`.
    pub initial_step: f64,
    pub run_minos: bool,
}

impl AnalysisConfig {
    /// Defaults with the given input and output paths.
    ///
    /// # Errors
    /// - [`AnalysisError::InvalidConfig`] if either path is empty.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> AnalysisResult<Self> {
        let config = Self { input: input.into(), output: output.into(), ..Self::default() };
        config.validate()?;
        Ok(config)
    }

    /// Check the settings that are not already validated by their own
    /// constructors.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.input.as_os_str().is_empty() {
            return Err(AnalysisError::InvalidConfig { reason: "input path is empty" });
        }
        if self.output.as_os_str().is_empty() {
            return Err(AnalysisError::InvalidConfig { reason: "output path is empty" });
        }
        if !self.initial_asymmetry.is_finite() {
            return Err(AnalysisError::InvalidConfig { reason: "initial asymmetry is not finite" });
        }
        Ok(())
    }

    /// The single-parameter set `{A}` the fit starts from.
    pub fn parameters(&self) -> AnalysisResult<ParameterSet> {
        let a = Parameter::new(
            AngularDistribution::PARAMETERS[0],
            self.initial_asymmetry,
            self.initial_step,
        )?;
        Ok(ParameterSet::new(vec![a])?)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            load: LoadOptions::default(),
            histogram: HistogramSpec::default(),
            minimizer: MinimizerOptions::default(),
            initial_asymmetry: 0.0,
            initial_step: 0.1,
            run_minos: true,
        }
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub sample_meta: SampleMeta,
    pub counting: CountingEstimate,
    pub fit: FitResult,
    pub histogram: Histogram1D,
}

impl AnalysisOutcome {
    /// Counting block, then the minimizer report.
    pub fn render(&self) -> String {
        let mut out = format_counting_report(&self.counting);
        out.push_str("\n\n");
        out.push_str(&format_fit_report(&self.fit));
        out
    }
}

/// Run the full measurement described by `config`.
///
/// # Errors
/// - [`AnalysisError::InvalidConfig`] for bad paths or start values.
/// - [`AnalysisError::Data`] if the input cannot be read or holds no event.
/// - [`AnalysisError::Histogram`] if the histogram cannot be written.
/// - [`AnalysisError::Fit`] if the likelihood cannot be evaluated.
pub fn run_analysis(config: &AnalysisConfig) -> AnalysisResult<AnalysisOutcome> {
    config.validate()?;
    let params = config.parameters()?;

    let sample = load_events(&config.input, &config.load)?;
    let sample_meta = sample.meta();
    info!(
        input = %config.input.display(),
        events = sample.len(),
        truncated = sample_meta.truncated,
        "Loaded event sample"
    );

    let counting = CountingEstimate::from_sample(&sample);
    info!(a = counting.asymmetry, error = counting.error, "Counting estimate");

    let mut histogram = Histogram1D::new(config.histogram.clone())?;
    histogram.fill_all(sample.iter());
    histogram.write_json(&config.output)?;
    debug!(output = %config.output.display(), entries = histogram.entries(), "Histogram written");

    let minimizer = Minimizer::new(&AngularDistribution, &sample, config.minimizer.clone());
    let mut fit = minimizer.migrad(&params)?;
    if !fit.valid {
        warn!(status = %fit.status, edm = fit.edm, "Minimum is not valid");
    }
    if !fit.physical {
        warn!(
            a = fit.parameters.first().map_or(f64::NAN, |p| p.value),
            limit = PHYSICAL_LIMIT,
            "Fitted asymmetry is outside the physical region"
        );
    }
    if config.run_minos {
        fit = minimizer.minos(&params, &fit)?;
    }

    Ok(AnalysisOutcome { sample_meta, counting, fit, histogram })
}
