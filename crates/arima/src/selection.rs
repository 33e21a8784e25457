//! AIC-based ARIMA order selection over a bounded grid.

use std::ops::RangeInclusive;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ArimaError;
use crate::fit::ArimaFit;
use crate::spec::ArimaSpec;

/// Inclusive ranges of `p`, `d` and `q` to search.
///
/// Orders are enumerated p-major, then d, then q. That order decides ties.
///
/// ```
/// use demand_arima::SearchGrid;
///
/// let grid = SearchGrid::new(0..=2, 0..=1, 0..=2).with_parallel(false);
/// assert_eq!(grid.len(), 18);
/// assert_eq!(grid.orders()[1].order(), (0, 0, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchGrid {
    p: RangeInclusive<usize>,
    d: RangeInclusive<usize>,
    q: RangeInclusive<usize>,
    max_order: Option<usize>,
    parallel: bool,
}

impl Default for SearchGrid {
    fn default() -> Self {
        Self {
            p: 0..=4,
            d: 0..=2,
            q: 0..=4,
            max_order: None,
            parallel: true,
        }
    }
}

impl SearchGrid {
    pub fn new(p: RangeInclusive<usize>, d: RangeInclusive<usize>, q: RangeInclusive<usize>) -> Self {
        Self {
            p,
            d,
            q,
            max_order: None,
            parallel: true,
        }
    }

    /// Fit candidates on the rayon pool (default) or one after another.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Skips orders with `p + q` above `max_order`.
    pub fn with_max_order(mut self, max_order: Option<usize>) -> Self {
        self.max_order = max_order;
        self
    }

    pub fn p(&self) -> &RangeInclusive<usize> {
        &self.p
    }

    pub fn d(&self) -> &RangeInclusive<usize> {
        &self.d
    }

    pub fn q(&self) -> &RangeInclusive<usize> {
        &self.q
    }

    pub fn max_order(&self) -> Option<usize> {
        self.max_order
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Every order in enumeration order.
    pub fn orders(&self) -> Vec<ArimaSpec> {
        let mut out = Vec::with_capacity(self.len());
        for p in self.p.clone() {
            for d in self.d.clone() {
                for q in self.q.clone() {
                    if self.max_order.is_some_and(|m| p + q > m) {
                        continue;
                    }
                    out.push(ArimaSpec::new(p, d, q));
                }
            }
        }
        out
    }

    /// Number of candidate orders.
    pub fn len(&self) -> usize {
        let n_d = self.d.clone().count();
        let n_pq = match self.max_order {
            None => self.p.clone().count() * self.q.clone().count(),
            Some(m) => self
                .p
                .clone()
                .map(|p| self.q.clone().filter(|q| p + q <= m).count())
                .sum(),
        };
        n_pq * n_d
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How one candidate fit ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CandidateOutcome {
    Fitted { aic: f64 },
    Failed { reason: String },
}

/// One order of the grid and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub order: ArimaSpec,
    #[serde(flatten)]
    pub outcome: CandidateOutcome,
}

impl Candidate {
    /// AIC of a successful fit.
    pub fn aic(&self) -> Option<f64> {
        match self.outcome {
            CandidateOutcome::Fitted { aic } => Some(aic),
            CandidateOutcome::Failed { .. } => None,
        }
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.outcome, CandidateOutcome::Fitted { .. })
    }
}

/// Every candidate of a search plus the winning fit.
#[derive(Debug, Clone)]
pub struct SearchReport {
    candidates: Vec<Candidate>,
    best: usize,
    best_fit: ArimaFit,
}

impl SearchReport {
    /// All candidates in enumeration order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// The minimum-AIC candidate.
    pub fn best(&self) -> &Candidate {
        &self.candidates[self.best]
    }

    /// Position of [`best()`](Self::best) in [`candidates()`](Self::candidates).
    pub fn best_index(&self) -> usize {
        self.best
    }

    pub fn best_order(&self) -> ArimaSpec {
        self.best_fit.spec()
    }

    pub fn best_fit(&self) -> &ArimaFit {
        &self.best_fit
    }

    pub fn into_best_fit(self) -> ArimaFit {
        self.best_fit
    }

    pub fn n_failed(&self) -> usize {
        self.candidates.iter().filter(|c| !c.is_fitted()).count()
    }
}

/// Index of the candidate with the smallest finite AIC.
///
/// Ties keep the earliest candidate. Returns `None` when nothing fitted.
pub fn best_candidate(candidates: &[Candidate]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in candidates.iter().enumerate() {
        let Some(aic) = c.aic() else { continue };
        if !aic.is_finite() {
            continue;
        }
        if best.is_none_or(|(_, b)| aic < b) {
            best = Some((i, aic));
        }
    }
    best.map(|(i, _)| i)
}

/// Fits every order of `grid` to `data` and keeps the minimum-AIC model.
///
/// A failing order is recorded as [`CandidateOutcome::Failed`] and never
/// aborts the search. A fit whose AIC is not finite counts as failed.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ArimaError::EmptyGrid`] | a range of `grid` is empty |
/// | [`ArimaError::AllCandidatesFailed`] | no order could be fit |
#[tracing::instrument(skip_all, fields(n_obs = data.len(), n_candidates = grid.len()))]
pub fn search_orders(data: &[f64], grid: &SearchGrid) -> Result<SearchReport, ArimaError> {
    let orders = grid.orders();
    if orders.is_empty() {
        return Err(ArimaError::EmptyGrid);
    }

    let results: Vec<(Candidate, Option<ArimaFit>)> = if grid.parallel {
        orders.par_iter().map(|&order| evaluate(order, data)).collect()
    } else {
        orders.iter().map(|&order| evaluate(order, data)).collect()
    };

    let (candidates, mut fits): (Vec<Candidate>, Vec<Option<ArimaFit>>) = results.into_iter().unzip();

    let best = best_candidate(&candidates).ok_or(ArimaError::AllCandidatesFailed {
        n_candidates: candidates.len(),
    })?;
    let best_fit = fits[best].take().ok_or(ArimaError::AllCandidatesFailed {
        n_candidates: candidates.len(),
    })?;

    let n_failed = candidates.iter().filter(|c| !c.is_fitted()).count();
    info!(
        best = %best_fit.spec(),
        aic = best_fit.aic(),
        n_failed,
        "order search finished"
    );

    Ok(SearchReport {
        candidates,
        best,
        best_fit,
    })
}

fn evaluate(order: ArimaSpec, data: &[f64]) -> (Candidate, Option<ArimaFit>) {
    let failed = |reason: String| {
        warn!(%order, %reason, "candidate failed");
        (
            Candidate {
                order,
                outcome: CandidateOutcome::Failed { reason },
            },
            None,
        )
    };

    match order.fit(data) {
        Ok(fit) => {
            let aic = fit.aic();
            if !aic.is_finite() {
                return failed(format!("non-finite AIC ({aic})"));
            }
            debug!(%order, aic, "candidate fitted");
            (
                Candidate {
                    order,
                    outcome: CandidateOutcome::Fitted { aic },
                },
                Some(fit),
            )
        }
        Err(e) => failed(e.to_string()),
    }
}
