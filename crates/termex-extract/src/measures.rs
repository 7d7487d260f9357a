//! Association measures over contingency tables.
//!
//! A [`Contingency`] for an n-gram holds `2^n` observed cells. Cell index bit
//! `j` is set when position `j` does *not* hold the candidate's token, so cell
//! 0 is the joint count (`n_ii`) and the last cell is the all-other count
//! (`n_oo`).
//!
//! Bigram cells follow the NSP derivation from the four marginals:
//! `n_io = n_ix - n_ii`, `n_oi = n_xi - n_ii` and `n_oo = n_xx - n_ix - n_xi`.
//! Longer n-grams derive their cells from joint marginals by
//! inclusion-exclusion. Expected counts multiply the per-position row totals
//! of the observed cells and divide by `n_xx` for every extra position.
//!
//! Every measure returns 0 instead of a non-finite value.

use std::{fmt, str::FromStr};

use crate::ExtractError;

/// The enumerated association measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssociationMeasure {
    /// Joint count over total.
    RawFreq,
    /// Log-likelihood ratio.
    LogLikelihood,
    /// Pointwise mutual information.
    Pmi,
    /// Poisson-Stirling.
    PoissonStirling,
    /// Mutual information summed over all cells.
    TrueMi,
    /// Chi-square, NSP variant.
    ChiSq,
    /// Chi-square, Text-NSP variant (`n_xx * phi^2`).
    ChiSqNspText,
    /// Phi-square.
    PhiSq,
    /// Dice coefficient.
    Dice,
    /// Jaccard index.
    Jaccard,
    /// Student's t-score.
    StudentT,
    /// Odds ratio.
    OddsRatio,
    /// Z-score.
    ZScore,
    /// Church MI.
    Mi,
    /// Church MI squared.
    Mi2,
    /// Church MI cubed.
    Mi3,
}

impl AssociationMeasure {
    /// Every measure in registry order.
    pub const ALL: [Self; 16] = [
        Self::RawFreq,
        Self::LogLikelihood,
        Self::Pmi,
        Self::PoissonStirling,
        Self::TrueMi,
        Self::ChiSq,
        Self::ChiSqNspText,
        Self::PhiSq,
        Self::Dice,
        Self::Jaccard,
        Self::StudentT,
        Self::OddsRatio,
        Self::ZScore,
        Self::Mi,
        Self::Mi2,
        Self::Mi3,
    ];

    /// Canonical name, as stored in the candidate's `measure`.
    pub fn name(self) -> &'static str {
        match self {
            Self::RawFreq => "raw_freq",
            Self::LogLikelihood => "loglikelihood",
            Self::Pmi => "pmi",
            Self::PoissonStirling => "poisson_stirling",
            Self::TrueMi => "true_mi",
            Self::ChiSq => "chi_sq",
            Self::ChiSqNspText => "chi_sq_nsp_text",
            Self::PhiSq => "phi_sq",
            Self::Dice => "dice",
            Self::Jaccard => "jaccard",
            Self::StudentT => "student_t",
            Self::OddsRatio => "odds_ratio",
            Self::ZScore => "z_score",
            Self::Mi => "mi",
            Self::Mi2 => "mi2",
            Self::Mi3 => "mi3",
        }
    }

    /// Returns true if the measure is defined for n-grams of this order.
    pub fn supports(self, order: usize) -> bool {
        match order {
            2 => true,
            3 | 4 => matches!(
                self,
                Self::RawFreq
                    | Self::LogLikelihood
                    | Self::Pmi
                    | Self::PoissonStirling
                    | Self::TrueMi
                    | Self::ChiSq
                    | Self::Jaccard
                    | Self::StudentT
            ),
            _ => false,
        }
    }

    /// Scores a contingency table.
    ///
    /// Returns 0 for degenerate tables and for orders the measure does not
    /// support.
    pub fn score(self, table: &Contingency) -> f64 {
        if !self.supports(table.order()) {
            return 0.0;
        }
        let value = match self {
            Self::RawFreq => table.joint() / table.total,
            Self::LogLikelihood => 2.0 * table.sum_log_cells(|n, m| n * (n / m).log2()),
            Self::Pmi => log2_ratio(table.joint(), table.expected(0)),
            Self::PoissonStirling => {
                let (n, m) = (table.joint(), table.expected(0));
                if n > 0.0 && m > 0.0 {
                    n * (n.log2() - m.log2() - 1.0)
                } else {
                    0.0
                }
            }
            Self::TrueMi => table.sum_log_cells(|n, m| (n / table.total) * (n / m).log2()),
            Self::ChiSq if table.order() == 2 => {
                2.0 * table.sum_cells(|n, m| ((n - m) / m).powi(2))
            }
            Self::ChiSq => table.sum_cells(|n, m| (n - m).powi(2) / m),
            Self::ChiSqNspText => table.total * phi_sq(table),
            Self::PhiSq => phi_sq(table),
            Self::Dice => {
                let (n_ix, n_xi) = (table.marginal(0), table.marginal(1));
                2.0 * table.joint() / (n_xi + n_ix)
            }
            Self::Jaccard => {
                let last = table.cell_count() - 1;
                let any_matched: f64 = table.observed[..last].iter().sum();
                table.joint() / any_matched
            }
            Self::StudentT => (table.joint() - table.expected(0)) / table.joint().sqrt(),
            Self::OddsRatio => {
                let [n_ii, n_oi, n_io, n_oo] = table.bigram_cells();
                (n_ii * n_oo) / (clamp_zero(n_io) * clamp_zero(n_oi))
            }
            Self::ZScore => (table.joint() - table.expected(0)) / table.expected(0).sqrt(),
            Self::Mi => church_mi(table, 1),
            Self::Mi2 => church_mi(table, 2),
            Self::Mi3 => church_mi(table, 3),
        };
        finite_or_zero(value)
    }
}

impl fmt::Display for AssociationMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AssociationMeasure {
    type Err = ExtractError;

    /// Parses a measure name. Case, `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        let measure = match normalized.as_str() {
            "raw_freq" | "freq" | "frequency" => Self::RawFreq,
            "loglikelihood" | "log_likelihood" | "likelihood_ratio" | "ll" => Self::LogLikelihood,
            "pmi" => Self::Pmi,
            "poisson_stirling" => Self::PoissonStirling,
            "true_mi" | "mi_like" => Self::TrueMi,
            "chi_sq" | "chi_square" | "chisq" => Self::ChiSq,
            "chi_sq_nsp_text" | "chi_sq_text" => Self::ChiSqNspText,
            "phi_sq" => Self::PhiSq,
            "dice" => Self::Dice,
            "jaccard" => Self::Jaccard,
            "student_t" | "t_score" | "tscore" => Self::StudentT,
            "odds_ratio" | "odds" => Self::OddsRatio,
            "z_score" | "zscore" => Self::ZScore,
            "mi" => Self::Mi,
            "mi2" => Self::Mi2,
            "mi3" => Self::Mi3,
            _ => return Err(ExtractError::UnknownMeasure(s.to_string())),
        };
        Ok(measure)
    }
}

/// Observed cells and per-position totals for one n-gram.
#[derive(Debug, Clone, PartialEq)]
pub struct Contingency {
    /// Observed count per cell.
    observed: Vec<f64>,
    /// Per position, the summed cells where the position holds its token.
    present: Vec<f64>,
    /// Per position, the summed cells where the position holds another token.
    absent: Vec<f64>,
    /// Total token count.
    total: f64,
}

impl Contingency {
    /// Builds a table from joint marginals.
    ///
    /// `marginal(mask)` returns how often the positions whose bit is set in
    /// `mask` hold the candidate's tokens at once; it is never called with an
    /// empty mask, which stands for `total`.
    pub fn from_marginals(order: usize, total: f64, marginal: impl Fn(u32) -> f64) -> Self {
        if order == 2 {
            return Self::bigram(marginal(0b11), marginal(0b01), marginal(0b10), total);
        }

        let full: u32 = (1 << order) - 1;
        let joint_count = |mask: u32| if mask == 0 { total } else { marginal(mask) };

        let observed = (0..=full)
            .map(|cell| {
                let matched = full & !cell;
                let mut sum = 0.0;
                let mut extra = cell;
                loop {
                    let sign = if extra.count_ones() % 2 == 0 { 1.0 } else { -1.0 };
                    sum += sign * joint_count(matched | extra);
                    if extra == 0 {
                        break;
                    }
                    extra = (extra - 1) & cell;
                }
                sum
            })
            .collect();
        Self::from_cells(observed, total)
    }

    /// Builds a bigram table from `n_ii`, `n_ix`, `n_xi` and `n_xx`.
    pub fn bigram(n_ii: f64, n_ix: f64, n_xi: f64, n_xx: f64) -> Self {
        let n_io = n_ix - n_ii;
        let n_oi = n_xi - n_ii;
        let n_oo = n_xx - n_ix - n_xi;
        Self::from_cells(vec![n_ii, n_oi, n_io, n_oo], n_xx)
    }

    /// Builds a table from its observed cells.
    fn from_cells(observed: Vec<f64>, total: f64) -> Self {
        let order = observed.len().trailing_zeros() as usize;
        let row_total = |position: usize, other: bool| -> f64 {
            observed
                .iter()
                .enumerate()
                .filter(|&(cell, _)| ((cell >> position) & 1 == 1) == other)
                .map(|(_, &count)| count)
                .sum()
        };
        let present = (0..order).map(|j| row_total(j, false)).collect();
        let absent = (0..order).map(|j| row_total(j, true)).collect();
        Self {
            observed,
            present,
            absent,
            total,
        }
    }

    /// N-gram order.
    pub fn order(&self) -> usize {
        self.present.len()
    }

    /// Number of cells, `2^order`.
    pub fn cell_count(&self) -> usize {
        self.observed.len()
    }

    /// Total token count.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Joint count of the n-gram.
    pub fn joint(&self) -> f64 {
        self.observed[0]
    }

    /// Observed count of a cell.
    pub fn observed(&self, cell: usize) -> f64 {
        self.observed[cell]
    }

    /// Count of the token at `position`.
    pub fn marginal(&self, position: usize) -> f64 {
        self.present[position]
    }

    /// Expected count of a cell under independence.
    pub fn expected(&self, cell: usize) -> f64 {
        if self.total <= 0.0 {
            return 0.0;
        }
        (0..self.order()).fold(self.total, |acc, j| {
            let row = if cell & (1 << j) == 0 {
                self.present[j]
            } else {
                self.absent[j]
            };
            acc * row / self.total
        })
    }

    /// Bigram cells `[n_ii, n_oi, n_io, n_oo]`.
    fn bigram_cells(&self) -> [f64; 4] {
        [
            self.observed[0],
            self.observed[1],
            self.observed[2],
            self.observed[3],
        ]
    }

    /// Sums `f(observed, expected)` over cells, skipping non-finite terms.
    fn sum_cells(&self, f: impl Fn(f64, f64) -> f64) -> f64 {
        (0..self.cell_count())
            .map(|cell| finite_or_zero(f(self.observed[cell], self.expected(cell))))
            .sum()
    }

    /// Sums a logarithmic term `f(observed, expected)` over cells.
    ///
    /// `f` is only called with positive arguments. A bigram with any
    /// non-positive cell scores 0 as a whole; longer n-grams skip such cells.
    fn sum_log_cells(&self, f: impl Fn(f64, f64) -> f64) -> f64 {
        let cells: Vec<(f64, f64)> = (0..self.cell_count())
            .map(|cell| (self.observed[cell], self.expected(cell)))
            .collect();
        let degenerate = |&(n, m): &(f64, f64)| n <= 0.0 || m <= 0.0;
        if self.order() == 2 && cells.iter().any(degenerate) {
            return 0.0;
        }
        cells
            .iter()
            .filter(|&cell| !degenerate(cell))
            .map(|&(n, m)| finite_or_zero(f(n, m)))
            .sum()
    }
}

/// `log2(n / m)`, or 0 when either side is not positive.
fn log2_ratio(n: f64, m: f64) -> f64 {
    if n > 0.0 && m > 0.0 { (n / m).log2() } else { 0.0 }
}

/// Replaces non-finite values with 0.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Zero becomes 1.
fn clamp_zero(value: f64) -> f64 {
    if value == 0.0 { 1.0 } else { value }
}

/// Bigram phi-square.
fn phi_sq(table: &Contingency) -> f64 {
    let [n_ii, n_oi, n_io, n_oo] = table.bigram_cells();
    let (n_ix, n_xi) = (table.marginal(0), table.marginal(1));
    (n_ii * n_oo - n_io * n_oi).powi(2) / (n_xi * n_ix * (n_oi + n_oo) * (n_io + n_oo))
}

/// Church-style `log2((n_ii / E11)^k)` with `E11 = n_xi * n_ix / n_xx`.
fn church_mi(table: &Contingency, k: i32) -> f64 {
    let e11 = table.marginal(0) * table.marginal(1) / table.total;
    let ratio = (table.joint() / e11).powi(k);
    if ratio > 0.0 { ratio.log2() } else { 0.0 }
}
