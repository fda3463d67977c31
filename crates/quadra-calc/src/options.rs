//! Options, resource limits and completion status of an integration call.

use std::fmt;

use quadra_ball::effective_prec;

/// How much an integration call reports through `tracing`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No events.
    #[default]
    Silent,
    /// One event per call.
    Summary,
    /// One event per segment decision, plus the summary.
    Detail,
}

impl Verbosity {
    /// Maps the numeric levels 0, 1, 2 (and above) to a verbosity.
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Verbosity::Silent,
            1 => Verbosity::Summary,
            _ => Verbosity::Detail,
        }
    }
}

/// Caller-supplied options. Immutable for the duration of a call.
///
/// Unset caps are derived from the working precision and goal when the call
/// starts (see [`IntegrationOptions::limits`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntegrationOptions {
    /// Maximum Gauss–Legendre degree per segment.
    pub deg_limit: Option<usize>,
    /// Maximum number of integrand evaluations.
    pub eval_limit: Option<u64>,
    /// Maximum subdivision depth.
    pub depth_limit: Option<u32>,
    /// Process the segment with the largest error first instead of LIFO.
    pub use_heap: bool,
    /// Reporting level.
    pub verbosity: Verbosity,
}

impl IntegrationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deg_limit(mut self, deg: usize) -> Self {
        self.deg_limit = Some(deg);
        self
    }

    pub fn with_eval_limit(mut self, evals: u64) -> Self {
        self.eval_limit = Some(evals);
        self
    }

    pub fn with_depth_limit(mut self, depth: u32) -> Self {
        self.depth_limit = Some(depth);
        self
    }

    pub fn with_heap(mut self, use_heap: bool) -> Self {
        self.use_heap = use_heap;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Resolves the caps for a call at precision `prec` with goal `goal`.
    ///
    /// Defaults: degree `⌊min(p, g)/2⌋ + 60`, evaluations `1000p + p²`,
    /// depth `2p`, where `p` is the effective precision.
    pub fn limits(&self, prec: u32, goal: u32) -> Limits {
        let p = effective_prec(prec);
        let default_degree = (p.min(goal) / 2) as usize + 60;
        let p64 = u64::from(p);
        Limits {
            degree: self.deg_limit.unwrap_or(default_degree).max(1),
            evaluations: self.eval_limit.unwrap_or(1000 * p64 + p64 * p64),
            depth: self.depth_limit.unwrap_or(2 * p),
        }
    }
}

/// Resolved resource caps for one call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    pub degree: usize,
    pub evaluations: u64,
    pub depth: u32,
}

/// Which resource ran out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Exhaustion {
    /// Working precision: a segment could not be split further or rounding
    /// error exceeded the budget.
    Precision,
    /// Subdivision depth cap.
    DepthLimit,
    /// Evaluation cap.
    EvalLimit,
}

impl Exhaustion {
    fn severity(self) -> u8 {
        match self {
            Exhaustion::Precision => 1,
            Exhaustion::DepthLimit => 2,
            Exhaustion::EvalLimit => 3,
        }
    }
}

/// Completion status of an integration.
///
/// The enclosure is sound in every case; only `Converged` promises that the
/// requested tolerance was met.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Status {
    #[default]
    Converged,
    ResourceExhausted(Exhaustion),
}

impl Status {
    pub fn is_converged(self) -> bool {
        self == Status::Converged
    }

    fn severity(self) -> u8 {
        match self {
            Status::Converged => 0,
            Status::ResourceExhausted(e) => e.severity(),
        }
    }

    /// Combines the statuses of two parts of one result; the worse one wins.
    pub fn merge(self, other: Status) -> Status {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Converged => write!(f, "converged"),
            Status::ResourceExhausted(Exhaustion::Precision) => {
                write!(f, "not converged (working precision)")
            }
            Status::ResourceExhausted(Exhaustion::DepthLimit) => {
                write!(f, "not converged (depth limit)")
            }
            Status::ResourceExhausted(Exhaustion::EvalLimit) => {
                write!(f, "not converged (evaluation limit)")
            }
        }
    }
}
