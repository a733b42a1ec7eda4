//! Counting block, minimizer summary, parameter table and the full report.
use crate::{
    minimizer::{FitResult, ParameterResult},
    model::CountingEstimate,
    report::matrix::{
        CORRELATION_CELL, COVARIANCE_CELL, MatrixTable, correlation_matrix, scientific,
    },
};
use std::fmt;

const RULE: &str = "-------------------------------------";

/// `A = <value> +- <error>` with three decimals each.
pub fn format_counting(est: &CountingEstimate) -> String {
    format!("A = {:5.3} +- {:5.3}", est.asymmetry, est.error)
}

/// Heading plus the counting line.
pub fn format_counting_report(est: &CountingEstimate) -> String {
    format!("Asymmetry by counting::\n{}\n", format_counting(est))
}

/// Minimizer summary block.
#[derive(Debug, Clone, Copy)]
pub struct FitSummary<'a>(pub &'a FitResult);

impl fmt::Display for FitSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fit = self.0;
        writeln!(f, "Results of MIGRAD minimisation")?;
        writeln!(f, "{RULE}")?;
        writeln!(f)?;
        writeln!(f, " Minimal function value:              {:8.3}", fit.fmin)?;
        writeln!(f, " Estimated difference to true minimum: {:>11}", scientific(fit.edm, 3))?;
        writeln!(f, " Number of parameters:         {:3}", fit.n_variable)?;
        writeln!(f, " Error definition (Fmin + Delta):      {:8.3}", fit.error_def)?;
        if fit.covariance_exact() {
            writeln!(f, " Exact covariance matrix.")?;
        } else {
            writeln!(f, " No/error with covariance matrix.")?;
            writeln!(f, " Error code: {}", fit.covariance_status.code())?;
        }
        if !fit.valid {
            writeln!(
                f,
                " Minimum not valid: {} after {} iterations, {} calls.",
                fit.status, fit.iterations, fit.calls
            )?;
        }
        if !fit.physical {
            writeln!(f, " Parameters outside the physical region.")?;
        }
        Ok(())
    }
}

/// Table of the variable parameters: value, error, MINOS errors (positive
/// first), bounds.
#[derive(Debug, Clone, Copy)]
pub struct ParameterTable<'a>(pub &'a FitResult);

impl fmt::Display for ParameterTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "   Parameter     Value       Error    positive    negative    L_BND    U_BND"
        )?;
        for (index, p) in self.0.parameters.iter().enumerate().filter(|(_, p)| !p.fixed) {
            let (pos, neg) = minos_cells(p);
            writeln!(
                f,
                "{index:2} {:>10} {:>10} {:>10} {pos:>10} {neg:>10} {:>8} {:>8}",
                p.name,
                scientific(p.value, 3),
                scientific(p.error, 3),
                bound(p.lower),
                bound(p.upper),
            )?;
        }
        Ok(())
    }
}

/// `(positive, negative)` MINOS cells. A side without a valid crossing is
/// marked with `*`; without MINOS both read zero.
fn minos_cells(p: &ParameterResult) -> (String, String) {
    let cell = |offset: f64, valid: bool, signed: bool| {
        let sign = if signed && offset >= 0.0 { "+" } else { "" };
        let mark = if valid { "" } else { "*" };
        format!("{sign}{}{mark}", scientific(offset, 3))
    };
    match p.minos {
        Some(m) => (cell(m.upper, m.upper_valid, true), cell(m.lower, m.lower_valid, false)),
        None => (cell(0.0, true, true), cell(0.0, true, false)),
    }
}

/// Absent bounds print as zero.
fn bound(b: Option<f64>) -> String {
    scientific(b.unwrap_or(0.0), 1)
}

pub fn format_fit_summary(fit: &FitResult) -> String {
    FitSummary(fit).to_string()
}

pub fn format_parameter_table(fit: &FitResult) -> String {
    ParameterTable(fit).to_string()
}

/// Summary, parameter table, covariance and correlation matrices, each
/// followed by a blank line.
pub fn format_fit_report(fit: &FitResult) -> String {
    let mut out = format_fit_summary(fit);
    out.push('\n');
    out.push_str(&format_parameter_table(fit));
    out.push('\n');
    match &fit.covariance {
        Some(cov) => {
            let corr = correlation_matrix(cov);
            let blocks = [
                MatrixTable { title: "Covariance matrix", matrix: cov, cell: COVARIANCE_CELL },
                MatrixTable { title: "Correlation matrix", matrix: &corr, cell: CORRELATION_CELL },
            ];
            for block in blocks {
                out.push_str(&block.to_string());
                out.push('\n');
            }
        }
        None => out.push_str("Covariance matrix: \n n/a\n\n"),
    }
    out
}
