//! Splits ambiguous reads (aligned to both donor and pre references) between the two origins.
//!
//! Unique alignments are taken as ground truth. Ambiguous reads are shared out by
//! weighing the unique-read prior of each origin against how likely the *other*
//! origin's cross-alignment process is to produce a read that also lands on this
//! reference. This is a heuristic Bayes-like update rather than a likelihood model,
//! and it is only as good as `total_n` and the background rates are non-degenerate.

use getset::Getters;
use serde::{Deserialize, Serialize};

use super::background::BackgroundRates;
use super::read_ids::ReadPartition;

/// Probability used when there is no evidence either way.
pub const UNINFORMATIVE_PRIOR: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
pub struct AmbiguitySplit {
    /// chance a pre-originated read appears on the donor reference
    #[getset(get = "pub")]
    prob_d_p: f64,
    /// chance a donor-originated read appears on the pre reference
    #[getset(get = "pub")]
    prob_p_d: f64,
    #[getset(get = "pub")]
    prob_d: f64,
    #[getset(get = "pub")]
    prob_p: f64,
    #[getset(get = "pub")]
    amb_d: f64,
    #[getset(get = "pub")]
    amb_p: f64,
    #[getset(get = "pub")]
    amb_donor_reads: u64,
    #[getset(get = "pub")]
    amb_pre_reads: u64,
    #[getset(get = "pub")]
    d_tot: u64,
    #[getset(get = "pub")]
    p_tot: u64,
}

/// Cross-alignment count normalised by the expected true-positive volume.
/// A zero volume carries no cross-alignment pressure.
fn cross_probability(count: u64, base_rate: f64, total_n: u64) -> f64 {
    let volume = base_rate * total_n as f64;
    if volume > 0.0 {
        count as f64 / volume
    } else {
        0.0
    }
}

/// Prior share of donor and pre reads from unique alignments.
fn unique_prior(d_uniq: u64, p_uniq: u64) -> (f64, f64) {
    let denominator = d_uniq + p_uniq;
    if denominator == 0 {
        return (UNINFORMATIVE_PRIOR, UNINFORMATIVE_PRIOR);
    }
    let prob_d = d_uniq as f64 / denominator as f64;
    (prob_d, 1.0 - prob_d)
}

/// Posterior share of ambiguous reads for (donor, pre).
fn posterior_split(prob_d_p: f64, prob_p_d: f64, prob_d: f64, prob_p: f64) -> (f64, f64) {
    let donor_weight = prob_p_d * prob_d;
    let denominator = donor_weight + prob_d_p * prob_p;
    if denominator == 0.0 || !denominator.is_finite() {
        return (UNINFORMATIVE_PRIOR, UNINFORMATIVE_PRIOR);
    }
    let amb_d = donor_weight / denominator;
    (amb_d, 1.0 - amb_d)
}

/// Resolves the ambiguous reads of a sample into donor and pre totals.
///
/// The donor share of ambiguous reads is rounded half-to-even and the pre share
/// is its complement, so `amb_donor_reads + amb_pre_reads == ambig` always holds.
pub fn resolve(partition: &ReadPartition, rates: &BackgroundRates) -> AmbiguitySplit {
    let total_n = *partition.total_n();
    let d_uniq = *partition.d_uniq();
    let p_uniq = *partition.p_uniq();
    let ambig = *partition.ambig();

    let prob_d_p = cross_probability(*rates.base_p_d(), *rates.base_pre(), total_n);
    let prob_p_d = cross_probability(*rates.base_d_p(), *rates.base_donor(), total_n);
    let (prob_d, prob_p) = unique_prior(d_uniq, p_uniq);
    let (amb_d, amb_p) = posterior_split(prob_d_p, prob_p_d, prob_d, prob_p);

    let amb_donor_reads = ((amb_d * ambig as f64).round_ties_even() as u64).min(ambig);
    let amb_pre_reads = ambig - amb_donor_reads;

    AmbiguitySplit {
        prob_d_p,
        prob_p_d,
        prob_d,
        prob_p,
        amb_d,
        amb_p,
        amb_donor_reads,
        amb_pre_reads,
        d_tot: d_uniq + amb_donor_reads,
        p_tot: p_uniq + amb_pre_reads,
    }
}
