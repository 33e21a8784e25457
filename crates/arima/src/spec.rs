//! ARIMA model specification (unfitted).

use serde::{Deserialize, Serialize};

use crate::error::ArimaError;
use crate::fit::ArimaFit;

/// An unfitted ARIMA(p,d,q) model specification.
///
/// This is the entry point of the typestate workflow. Create a spec with
/// [`ArimaSpec::new()`], then call [`ArimaSpec::fit()`] to obtain an [`ArimaFit`].
///
/// # Typestate Workflow
///
/// ```mermaid
/// graph LR
///     A["ArimaSpec::new(p, d, q)"] -->|".fit(&data)?"| B["ArimaFit"]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArimaSpec {
    p: usize,
    d: usize,
    q: usize,
}

impl ArimaSpec {
    /// Creates an ARIMA(p,d,q) specification.
    ///
    /// # Example
    ///
    /// ```
    /// use demand_arima::ArimaSpec;
    ///
    /// let spec = ArimaSpec::new(2, 1, 3);
    /// assert_eq!(spec.order(), (2, 1, 3));
    /// assert_eq!(spec.to_string(), "ARIMA(2,1,3)");
    /// ```
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Returns the AR order (`p`).
    pub fn p(&self) -> usize {
        self.p
    }

    /// Returns the differencing order (`d`).
    pub fn d(&self) -> usize {
        self.d
    }

    /// Returns the MA order (`q`).
    pub fn q(&self) -> usize {
        self.q
    }

    /// Returns `(p, d, q)`.
    pub fn order(&self) -> (usize, usize, usize) {
        (self.p, self.d, self.q)
    }

    /// Whether a mean is estimated (only for undifferenced models).
    pub fn includes_mean(&self) -> bool {
        self.d == 0
    }

    /// Smallest series length this order can be fit to.
    pub fn min_observations(&self) -> usize {
        self.d + self.p.max(self.q).max(1) + 1
    }

    /// Fits this specification to observed levels via exact
    /// maximum-likelihood (Kalman filter) on the differenced series.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArimaError::EmptyData`] | `data` is empty |
    /// | [`ArimaError::NonFiniteData`] | any element is NaN or infinite |
    /// | [`ArimaError::InsufficientData`] | `data.len() < min_observations()` |
    /// | [`ArimaError::ConstantData`] | the differenced series is constant |
    /// | [`ArimaError::LikelihoodFailed`] | the filter breaks down at the optimum |
    /// | [`ArimaError::OptimizationFailed`] | optimizer fails or likelihood is not finite |
    pub fn fit(&self, data: &[f64]) -> Result<ArimaFit, ArimaError> {
        crate::optimizer::fit_arima(*self, data)
    }
}

impl std::fmt::Display for ArimaSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)
    }
}
