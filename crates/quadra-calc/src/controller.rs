//! Apportioning the global tolerance over pending segments.

use quadra_ball::mag::{div_down, mul_down, sub_down};

use crate::options::{Exhaustion, Limits, Status};

/// Fraction of the tolerance handed to segments; the rest absorbs rounding
/// in the running sum.
const BUDGET_FRACTION: f64 = 15.0 / 16.0;

/// Live accounting for one integration call.
///
/// Each request for a local tolerance divides the *remaining* budget evenly
/// over the *currently* pending segments. Accepting a segment subtracts its
/// error, so the accepted errors never sum past the budget as long as every
/// accepted error met its share.
///
/// Every pending segment holds one integrand call in reserve for its
/// trivial enclosure, so `evaluations + pending` never exceeds the limit.
#[derive(Clone, Debug)]
pub struct AccuracyController {
    tolerance: f64,
    remaining: f64,
    pending: u64,
    evaluations: u64,
    limits: Limits,
    status: Status,
}

impl AccuracyController {
    /// Starts with one pending segment.
    pub fn new(tolerance: f64, limits: Limits) -> Self {
        Self {
            tolerance,
            remaining: mul_down(tolerance, BUDGET_FRACTION).max(0.0),
            pending: 1,
            evaluations: 0,
            limits,
            status: Status::Converged,
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn pending(&self) -> u64 {
        self.pending
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// The share of the remaining budget for the next segment.
    pub fn local_tolerance(&self) -> f64 {
        if self.pending == 0 {
            return self.remaining;
        }
        div_down(self.remaining, self.pending as f64).max(0.0)
    }

    /// Folds an accepted error into the budget.
    pub fn accept(&mut self, error: f64) {
        self.remaining = sub_down(self.remaining, error).max(0.0);
        self.pending = self.pending.saturating_sub(1);
    }

    /// One segment became two.
    pub fn split(&mut self) {
        self.pending += 1;
    }

    pub fn record_evaluations(&mut self, count: u64) {
        self.evaluations += count;
    }

    /// Integrand calls the segment being processed may spend, after
    /// reserving one for every other pending segment.
    pub fn evaluation_budget(&self) -> u64 {
        let reserved = self.evaluations + self.pending.saturating_sub(1);
        self.limits.evaluations.saturating_sub(reserved)
    }

    /// Returns true if splitting the current segment keeps one call in
    /// reserve for each pending segment.
    pub fn can_afford_split(&self) -> bool {
        self.evaluations + self.pending < self.limits.evaluations
    }

    /// Returns true if a child at `depth` would exceed the depth cap.
    pub fn too_deep(&self, depth: u32) -> bool {
        depth > self.limits.depth
    }

    /// Records that a resource ran out.
    pub fn exhaust(&mut self, why: Exhaustion) {
        self.status = self.status.merge(Status::ResourceExhausted(why));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> Limits {
        Limits {
            degree: 32,
            evaluations: 100,
            depth: 4,
        }
    }

    #[test]
    fn test_budget_is_apportioned_over_pending() {
        let mut c = AccuracyController::new(16.0, limits());
        assert!(c.local_tolerance() <= 15.0);
        assert!(c.local_tolerance() > 14.9);

        c.split();
        let share = c.local_tolerance();
        assert!(share <= 7.5 && share > 7.4);

        c.accept(1.0);
        // 14 remaining over one pending segment
        assert!(c.local_tolerance() <= 14.0 && c.local_tolerance() > 13.9);
        assert_eq!(c.pending(), 1);
    }

    #[test]
    fn test_accepted_errors_stay_within_budget() {
        let mut c = AccuracyController::new(1.0, limits());
        let mut total = 0.0;
        for _ in 0..5 {
            c.split();
        }
        while c.pending() > 0 {
            let share = c.local_tolerance();
            total += share;
            c.accept(share);
        }
        assert!(total <= 1.0);
    }

    #[test]
    fn test_overshoot_clamps_at_zero() {
        let mut c = AccuracyController::new(1.0, limits());
        c.split();
        c.accept(5.0);
        assert_eq!(c.local_tolerance(), 0.0);
    }

    #[test]
    fn test_limits_and_status() {
        let mut c = AccuracyController::new(1.0, limits());
        assert!(!c.too_deep(4));
        assert!(c.too_deep(5));
        assert_eq!(c.evaluation_budget(), 100);
        c.record_evaluations(90);
        c.split();
        c.split();
        // two other segments keep one call each
        assert_eq!(c.evaluation_budget(), 8);
        assert!(c.can_afford_split());
        c.record_evaluations(7);
        assert!(!c.can_afford_split());
        assert_eq!(c.evaluation_budget(), 1);
        c.record_evaluations(1);
        assert_eq!(c.evaluation_budget(), 0);

        c.exhaust(Exhaustion::DepthLimit);
        c.exhaust(Exhaustion::Precision);
        assert_eq!(c.status(), Status::ResourceExhausted(Exhaustion::DepthLimit));
    }
}
