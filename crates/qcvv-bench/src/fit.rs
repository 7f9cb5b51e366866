//! Exponential decay fitting.
//!
//! Survival probability is modelled as `f(m) = A·r^m`, so `log f` is linear
//! in the depth `m` with slope `log r`. An ordinary least-squares fit of the
//! log survival probabilities gives `r = exp(slope)` and, by first-order
//! error propagation, `σ_r = r·σ_slope`.

use serde::{Deserialize, Serialize};

use crate::aggregate::ResultTable;
use crate::error::{BenchError, BenchResult};
use crate::sample::Variant;

/// Minimum number of usable rows, and of distinct depths, for a fit.
///
/// With exactly this many points the residual has no degrees of freedom
/// and the slope standard error is reported as zero.
pub const MIN_FIT_POINTS: usize = 2;

/// Ordinary least-squares line `y = intercept + slope·x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Fitted slope.
    pub slope: f64,
    /// Fitted intercept.
    pub intercept: f64,
    /// Standard error of the slope.
    pub slope_stderr: f64,
    /// Number of points in the fit.
    pub num_points: usize,
}

/// Fit a straight line through `points`.
///
/// Returns `None` with fewer than two points or when all `x` coincide.
pub fn linear_regression(points: &[(f64, f64)]) -> Option<LinearFit> {
    let n = points.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / nf;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / nf;

    let sxx: f64 = points.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    let sxy: f64 = points
        .iter()
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    if sxx <= 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let slope_stderr = if n > 2 {
        let ssr: f64 = points
            .iter()
            .map(|(x, y)| (y - intercept - slope * x).powi(2))
            .sum();
        (ssr / (nf - 2.0) / sxx).sqrt()
    } else {
        0.0
    };

    Some(LinearFit {
        slope,
        intercept,
        slope_stderr,
        num_points: n,
    })
}

/// Fitted decay of one experiment variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayFit {
    /// The fitted variant.
    pub variant: Variant,
    /// Per-depth survival retention `r`.
    pub decay_coefficient: f64,
    /// Standard deviation of `r`.
    pub decay_coefficient_std: f64,
    /// Survival probability extrapolated to depth 0, `A`.
    pub amplitude: f64,
    /// Usable rows that entered the fit.
    pub num_points: usize,
}

/// Fit the decay of `variant`, skipping rows with non-positive survival.
pub fn fit_decay(table: &ResultTable, variant: Variant) -> BenchResult<DecayFit> {
    let points = table.usable_points(variant);
    let distinct_depths = table.usable_depths(variant).len();
    let dropped = table.variant_rows(variant).count() - points.len();
    if dropped > 0 {
        tracing::debug!(%variant, dropped, "Dropped rows with non-positive survival probability");
    }

    let insufficient = || BenchError::InsufficientData {
        variant,
        usable: points.len(),
        distinct_depths,
        required: MIN_FIT_POINTS,
    };
    if points.len() < MIN_FIT_POINTS || distinct_depths < MIN_FIT_POINTS {
        return Err(insufficient());
    }
    let line = linear_regression(&points).ok_or_else(insufficient)?;
    if line.num_points == MIN_FIT_POINTS {
        tracing::warn!(
            %variant,
            "Decay fitted through exactly {MIN_FIT_POINTS} points; standard error is not meaningful"
        );
    }

    let decay_coefficient = line.slope.exp();
    let fit = DecayFit {
        variant,
        decay_coefficient,
        decay_coefficient_std: line.slope_stderr * decay_coefficient,
        amplitude: line.intercept.exp(),
        num_points: line.num_points,
    };
    tracing::info!(
        %variant,
        decay = fit.decay_coefficient,
        std = fit.decay_coefficient_std,
        points = fit.num_points,
        "Fitted decay"
    );
    Ok(fit)
}
