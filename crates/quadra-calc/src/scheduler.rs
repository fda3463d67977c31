//! The accept/split loop.

use num_traits::Zero;
use quadra_ball::Acb;
use tracing::info;

use crate::controller::AccuracyController;
use crate::evaluator::{QuadratureEvaluator, SegmentStatus};
use crate::integrand::{ContractViolation, Integrand};
use crate::options::{Exhaustion, Status, Verbosity};
use crate::queue::SegmentQueue;
use crate::segment::Segment;
use crate::stats::IntegrationStats;

/// Result of one scheduler run.
#[derive(Clone, Copy, Debug)]
pub struct Outcome {
    pub value: Acb,
    pub status: Status,
    pub stats: IntegrationStats,
}

/// What happened to a popped segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Decision {
    Accept,
    AcceptExhausted(Exhaustion),
    Split,
}

/// Drives the pending segments to completion.
///
/// Owns the queue and every live segment; the ordering policy is whatever
/// `Q` implements.
pub struct Scheduler<Q> {
    queue: Q,
    controller: AccuracyController,
    verbosity: Verbosity,
    sum: Acb,
    stats: IntegrationStats,
}

impl<Q: SegmentQueue> Scheduler<Q> {
    pub fn new(queue: Q, controller: AccuracyController, verbosity: Verbosity) -> Self {
        Self {
            queue,
            controller,
            verbosity,
            sum: Acb::zero(),
            stats: IntegrationStats::default(),
        }
    }

    fn decide(&self, segment: &Segment, status: SegmentStatus, tol: f64) -> Decision {
        if status == SegmentStatus::Converged && segment.error <= tol {
            return Decision::Accept;
        }
        if self.controller.too_deep(segment.depth + 1) {
            return Decision::AcceptExhausted(Exhaustion::DepthLimit);
        }
        if !segment.can_split() {
            return Decision::AcceptExhausted(Exhaustion::Precision);
        }
        if !self.controller.can_afford_split() {
            return Decision::AcceptExhausted(Exhaustion::EvalLimit);
        }
        Decision::Split
    }

    fn fold(&mut self, segment: &Segment) {
        let value = segment.contribution();
        self.sum = self.sum + value;
        self.controller.accept(value.radius());
        self.stats.accepted += 1;
        self.stats.max_depth = self.stats.max_depth.max(segment.depth);
        self.stats.max_degree = self.stats.max_degree.max(segment.degree);
    }

    /// Closes every pending segment with its trivial enclosure, or with the
    /// indeterminate one once no call is left.
    fn drain<P, F>(
        &mut self,
        evaluator: &QuadratureEvaluator<'_, P, F>,
    ) -> Result<(), ContractViolation>
    where
        P: ?Sized,
        F: Integrand<P> + ?Sized,
    {
        for segment in self.queue.drain_all() {
            let value = if self.controller.evaluation_budget() > 0 {
                self.controller.record_evaluations(1);
                evaluator.enclose_trivially(&segment)?
            } else {
                Acb::indeterminate()
            };
            self.fold(&segment.evaluated(value, 0));
        }
        Ok(())
    }

    /// Processes `root` and everything it splits into.
    pub fn run<P, F>(
        mut self,
        root: Segment,
        evaluator: &mut QuadratureEvaluator<'_, P, F>,
    ) -> Result<Outcome, ContractViolation>
    where
        P: ?Sized,
        F: Integrand<P> + ?Sized,
    {
        self.queue.push(root);

        while let Some(segment) = self.queue.pop() {
            let budget = self.controller.evaluation_budget();
            if budget == 0 {
                self.queue.push(segment);
                self.controller.exhaust(Exhaustion::EvalLimit);
                self.drain(evaluator)?;
                break;
            }

            let tol = self.controller.local_tolerance();
            let estimate = evaluator.estimate(&segment, tol, budget)?;
            self.controller.record_evaluations(estimate.evaluations);
            let segment = segment.evaluated(estimate.value, estimate.degree);

            let decision = self.decide(&segment, estimate.status, tol);
            if self.verbosity >= Verbosity::Detail {
                info!(
                    a = %segment.a,
                    b = %segment.b,
                    depth = segment.depth,
                    degree = segment.degree,
                    error = segment.error,
                    tol,
                    ?decision,
                    "segment"
                );
            }

            match decision {
                Decision::Accept => self.fold(&segment),
                Decision::AcceptExhausted(why) => {
                    self.controller.exhaust(why);
                    self.fold(&segment);
                }
                Decision::Split => {
                    let (left, right) = segment.split();
                    self.controller.split();
                    self.stats.splits += 1;
                    self.queue.push(right);
                    self.queue.push(left);
                }
            }
        }

        if !(self.sum.radius() <= self.controller.tolerance()) {
            self.controller.exhaust(Exhaustion::Precision);
        }
        self.stats.evaluations = self.controller.evaluations();

        Ok(Outcome {
            value: self.sum,
            status: self.controller.status(),
            stats: self.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrand::{Holomorphic, Request};
    use crate::options::Limits;
    use crate::queue::{HeapQueue, StackQueue};
    use num_complex::Complex64;
    use quadra_ball::Arb;

    fn limits(depth: u32, evaluations: u64) -> Limits {
        Limits {
            degree: 64,
            evaluations,
            depth,
        }
    }

    fn root(a: f64, b: f64) -> Segment {
        Segment::root(Complex64::new(a, 0.0), Complex64::new(b, 0.0))
    }

    #[test]
    fn test_single_segment_converges() {
        let f = Holomorphic(|z: &Acb| z.sqr());
        let mut ev = QuadratureEvaluator::new(&f, &(), 53, 64);
        let controller = AccuracyController::new(1e-10, limits(20, 10_000));
        let out = Scheduler::new(StackQueue::new(), controller, Verbosity::Silent)
            .run(root(0.0, 3.0), &mut ev)
            .unwrap();
        assert!(out.status.is_converged());
        assert!(out.value.re().contains_f64(9.0));
        assert!(out.value.radius() <= 1e-10);
        assert_eq!(out.stats.splits, 0);
    }

    #[test]
    fn test_splits_around_singularity_nearby() {
        // 1/(x^2 + 1e-4) has poles at ±0.01i
        let f = Holomorphic(|z: &Acb| (z.sqr() + Acb::from(1e-4)).inv());
        let mut ev = QuadratureEvaluator::new(&f, &(), 53, 64);
        let controller = AccuracyController::new(1e-8, limits(40, 100_000));
        let out = Scheduler::new(HeapQueue::new(), controller, Verbosity::Silent)
            .run(root(-1.0, 1.0), &mut ev)
            .unwrap();
        let exact = 2.0 * 100.0 * 100f64.atan();
        assert!(out.status.is_converged());
        assert!(out.value.re().contains_f64(exact));
        assert!(out.stats.splits > 0);
        assert_eq!(out.stats.accepted, out.stats.splits + 1);
    }

    #[test]
    fn test_depth_limit_is_reported() {
        let f = Holomorphic(|z: &Acb| (z.scale(Arb::exact(100.0))).sin());
        let mut ev = QuadratureEvaluator::new(&f, &(), 53, 4);
        let controller = AccuracyController::new(1e-12, limits(2, 100_000));
        let out = Scheduler::new(StackQueue::new(), controller, Verbosity::Silent)
            .run(root(0.0, 1.0), &mut ev)
            .unwrap();
        assert_eq!(out.status, Status::ResourceExhausted(Exhaustion::DepthLimit));
        assert!(out.value.re().contains_f64((1.0 - 100f64.cos()) / 100.0));
        assert!(out.stats.max_depth <= 2);
    }

    #[test]
    fn test_eval_limit_drains_queue() {
        let f = Holomorphic(|z: &Acb| (z.scale(Arb::exact(100.0))).sin());
        let mut ev = QuadratureEvaluator::new(&f, &(), 53, 8);
        let controller = AccuracyController::new(1e-12, limits(60, 50));
        let out = Scheduler::new(StackQueue::new(), controller, Verbosity::Silent)
            .run(root(0.0, 1.0), &mut ev)
            .unwrap();
        assert_eq!(out.status, Status::ResourceExhausted(Exhaustion::EvalLimit));
        assert!(out.value.re().contains_f64((1.0 - 100f64.cos()) / 100.0));
        assert_eq!(out.stats.accepted, out.stats.splits + 1);
        assert!(out.stats.evaluations <= 50);
    }

    #[test]
    fn test_eval_limit_is_never_exceeded() {
        // floor is piecewise constant: every probe across an integer fails
        let f = |z: &Acb, request: Request, _: &(), _: u32| -> Result<Acb, ContractViolation> {
            if request.is_probe() && z.re().contains_int() {
                return Ok(Acb::indeterminate());
            }
            Ok(Acb::new(z.re().floor(), z.im()))
        };
        for limit in [1, 2, 7, 30, 240, 1000] {
            for heap in [false, true] {
                let mut ev = QuadratureEvaluator::new(&f, &(), 53, 64);
                let controller = AccuracyController::new(1e-10, limits(60, limit));
                let out = if heap {
                    Scheduler::new(HeapQueue::new(), controller, Verbosity::Silent)
                        .run(root(0.5, 20.5), &mut ev)
                        .unwrap()
                } else {
                    Scheduler::new(StackQueue::new(), controller, Verbosity::Silent)
                        .run(root(0.5, 20.5), &mut ev)
                        .unwrap()
                };
                assert!(out.stats.evaluations <= limit, "{} > {}", out.stats.evaluations, limit);
                assert!(out.value.re().contains_f64(200.0));
            }
        }
    }

    #[test]
    fn test_zero_eval_limit_gives_indeterminate() {
        let f = Holomorphic(|z: &Acb| z.exp());
        let mut ev = QuadratureEvaluator::new(&f, &(), 53, 64);
        let controller = AccuracyController::new(1e-10, limits(20, 0));
        let out = Scheduler::new(StackQueue::new(), controller, Verbosity::Silent)
            .run(root(0.0, 1.0), &mut ev)
            .unwrap();
        assert_eq!(out.stats.evaluations, 0);
        assert!(!out.value.is_finite());
        assert_eq!(out.status, Status::ResourceExhausted(Exhaustion::EvalLimit));
    }
}
