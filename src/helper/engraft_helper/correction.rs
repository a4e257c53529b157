use getset::Getters;
use serde::{Deserialize, Serialize};

use super::error::EngraftError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
pub struct Correction {
    #[getset(get = "pub")]
    factor: f64,
    #[getset(get = "pub")]
    corr_d: f64,
    #[getset(get = "pub")]
    corr_p: f64,
}

/// Scales donor and pre totals to fractions of the post sample.
///
/// When fewer reads were assigned than the expected alignment yield
/// (`total_n * mean_ratio`) the denominator is scaled down by `mean_ratio`,
/// otherwise the totals are divided by `total_n` as-is. Never corrects below
/// the observed totals.
pub fn correct(
    sample: &str,
    d_tot: u64,
    p_tot: u64,
    total_n: u64,
    mean_ratio: f64,
) -> Result<Correction, EngraftError> {
    if total_n == 0 {
        return Err(EngraftError::ZeroTotalReads(sample.to_string()));
    }
    let total = total_n as f64;
    let factor = if total * mean_ratio > (d_tot + p_tot) as f64 {
        mean_ratio
    } else {
        1.0
    };
    if factor == 0.0 {
        return Err(EngraftError::ZeroCorrection(sample.to_string()));
    }

    Ok(Correction {
        factor,
        corr_d: d_tot as f64 / (total * factor),
        corr_p: p_tot as f64 / (total * factor),
    })
}
