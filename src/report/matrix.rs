//! Covariance/correlation matrices and their fixed-width dumps.
use crate::optimization::numerical_stability::COV_EPS;
use ndarray::Array2;
use std::fmt;

/// Covariance cells: 10 wide, 3-digit mantissa, `e±XX` exponent.
pub const COVARIANCE_CELL: CellFormat = CellFormat::Scientific { width: 10, precision: 3 };
/// Correlation cells: 6 wide, 3 decimals.
pub const CORRELATION_CELL: CellFormat = CellFormat::Fixed { width: 6, precision: 3 };

/// Normalize a covariance matrix to correlations.
///
/// `corr[i][j] = cov[i][j] / sqrt(cov[i][i] · cov[j][j])`, or 0 when the
/// product of the diagonals is at most `COV_EPS`. Values are clamped to
/// `[-1, 1]` against rounding.
pub fn correlation_matrix(cov: &Array2<f64>) -> Array2<f64> {
    Array2::from_shape_fn(cov.dim(), |(i, j)| {
        let denom = cov[[i, i]] * cov[[j, j]];
        if denom > COV_EPS { (cov[[i, j]] / denom.sqrt()).clamp(-1.0, 1.0) } else { 0.0 }
    })
}

/// Scientific notation with a signed exponent of at least two digits,
/// e.g. `1.234e-02`, `-5.0e+03`.
pub fn scientific(v: f64, precision: usize) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let raw = format!("{v:.precision$e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        None => raw,
    }
}

/// Width and notation of one matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    Scientific { width: usize, precision: usize },
    Fixed { width: usize, precision: usize },
}

impl CellFormat {
    pub fn render(&self, v: f64) -> String {
        match *self {
            CellFormat::Scientific { width, precision } => {
                format!("{:>width$}", scientific(v, precision))
            }
            CellFormat::Fixed { width, precision } => format!("{v:>width$.precision$}"),
        }
    }
}

/// Titled matrix dump; every cell is preceded by one space.
#[derive(Debug, Clone, Copy)]
pub struct MatrixTable<'a> {
    pub title: &'a str,
    pub matrix: &'a Array2<f64>,
    pub cell: CellFormat,
}

impl fmt::Display for MatrixTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: ", self.title)?;
        for row in self.matrix.rows() {
            for &v in row {
                write!(f, " {}", self.cell.render(v))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Render `matrix` as a [`MatrixTable`].
pub fn format_matrix(title: &str, matrix: &Array2<f64>, cell: CellFormat) -> String {
    MatrixTable { title, matrix, cell }.to_string()
}
