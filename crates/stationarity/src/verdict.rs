use serde::Serialize;

/// Decision of a unit-root test at a given significance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The unit-root null is rejected.
    Stationary,
    /// The unit-root null cannot be rejected.
    NonStationary,
}

impl Verdict {
    /// `Stationary` iff `p_value <= alpha`. A NaN p-value never rejects.
    pub fn from_p_value(p_value: f64, alpha: f64) -> Self {
        if p_value <= alpha {
            Verdict::Stationary
        } else {
            Verdict::NonStationary
        }
    }

    pub fn is_stationary(self) -> bool {
        self == Verdict::Stationary
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Stationary => f.write_str("stationary"),
            Verdict::NonStationary => f.write_str("non-stationary"),
        }
    }
}
