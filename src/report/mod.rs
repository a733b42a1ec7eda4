//! report — pure text formatting of estimates and fit results.
//!
//! Purpose
//! -------
//! Render the console report: counting estimate, minimizer summary,
//! parameter table, covariance and correlation matrices, laid out field for
//! field like the classic MINUIT `results()` printout. Every function
//! maps data to a `String`; nothing here prints, logs or inspects the
//! minimizer beyond the [`FitResult`](crate::minimizer::FitResult) it is
//! given.
//!
//! Key behaviors
//! -------------
//! - Each block is a small `Display` type ([`FitSummary`],
//!   [`ParameterTable`], [`MatrixTable`]); the `format_*` functions are
//!   their `to_string()`.
//!
//! Conventions
//! -----------
//! - The counting line is exactly `A = <3 decimals> +- <3 decimals>`.
//! - Only variable parameters appear in the table and matrices.
//! - Table values are `%10.3e`-style with two-digit exponents, positive MINOS
//!   error before negative, bounds `%8.1e` with zero meaning "no bound".
//! - Covariance cells are `%10.3e`, correlation cells `%6.3f`.

pub mod format;
pub mod matrix;

pub use self::format::{
    FitSummary, ParameterTable, format_counting, format_counting_report, format_fit_report,
    format_fit_summary, format_parameter_table,
};
pub use self::matrix::{
    CORRELATION_CELL, COVARIANCE_CELL, CellFormat, MatrixTable, correlation_matrix, format_matrix,
    scientific,
};
