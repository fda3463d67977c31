//! Straight-line pieces of an integration path.

use num_complex::Complex64;
use quadra_ball::{Acb, Arb};

/// A pending or accepted piece of the path from `a` to `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Complex64,
    pub b: Complex64,
    /// Number of bisections between the root segment and this one.
    pub depth: u32,
    /// Best enclosure of the sub-integral so far, if any.
    pub estimate: Option<Acb>,
    /// Error bound inherited from the parent; the processing priority.
    pub error: f64,
    /// Quadrature degree last used on this piece.
    pub degree: usize,
}

impl Segment {
    /// The root segment of an integration.
    pub fn root(a: Complex64, b: Complex64) -> Self {
        Self {
            a,
            b,
            depth: 0,
            estimate: None,
            error: f64::INFINITY,
            degree: 0,
        }
    }

    /// Records the enclosure and degree of an evaluation; the error becomes
    /// its radius.
    pub fn evaluated(self, value: Acb, degree: usize) -> Segment {
        Segment {
            estimate: Some(value),
            error: value.radius(),
            degree,
            ..self
        }
    }

    /// The enclosure this segment contributes to the total, indeterminate
    /// until it has been evaluated.
    pub fn contribution(&self) -> Acb {
        self.estimate.unwrap_or_else(Acb::indeterminate)
    }

    /// Floating-point midpoint of the endpoints.
    pub fn midpoint(&self) -> Complex64 {
        self.a * 0.5 + self.b * 0.5
    }

    /// Returns true if the midpoint is distinct from both endpoints.
    pub fn can_split(&self) -> bool {
        let m = self.midpoint();
        m != self.a && m != self.b
    }

    /// Bisects at the floating-point midpoint.
    ///
    /// Both halves start at `depth + 1` without an enclosure and inherit the
    /// parent's error as their priority and its degree.
    pub fn split(&self) -> (Segment, Segment) {
        let m = self.midpoint();
        let child = |a, b| Segment {
            a,
            b,
            depth: self.depth + 1,
            estimate: None,
            error: self.error,
            degree: self.degree,
        };
        (child(self.a, m), child(m, self.b))
    }

    /// Smallest box containing the segment.
    pub fn hull(&self) -> Acb {
        Acb::hull(self.a, self.b)
    }

    /// Encloses `b - a`.
    pub fn length(&self) -> Acb {
        Acb::from(self.b) - Acb::from(self.a)
    }

    /// Encloses the half-length `δ = (b - a)/2`.
    pub fn half_length(&self) -> Acb {
        self.length().mul_2exp(-1)
    }

    /// Encloses the centre `(a + b)/2`.
    pub fn centre(&self) -> Acb {
        (Acb::from(self.a) + Acb::from(self.b)).mul_2exp(-1)
    }

    /// A box containing the Bernstein ellipse `E_ρ` mapped onto the segment.
    ///
    /// `E_ρ` has semi-axes `(ρ + 1/ρ)/2` and `(ρ - 1/ρ)/2`; its image under
    /// `t ↦ centre + δ t` lies in `centre + δ · ([-α, α] + i[-β, β])`.
    pub fn bernstein_box(&self, rho: f64) -> Acb {
        let rho = Arb::exact(rho);
        let inv = rho.inv();
        let alpha = (rho + inv).mul_2exp(-1).upper();
        let beta = (rho - inv).mul_2exp(-1).upper();
        let unit = Acb::new(Arb::new(0.0, alpha), Arb::new(0.0, beta));
        self.centre() + self.half_length() * unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_split_depth_and_cover() {
        let value = Acb::new(Arb::new(1.0, 0.5), Arb::exact(0.0));
        let s = Segment::root(c(0.0, 0.0), c(2.0, 2.0)).evaluated(value, 8);
        let (l, r) = s.split();
        assert_eq!(l.depth, 1);
        assert_eq!(r.depth, 1);
        assert_eq!(l.b, r.a);
        assert_eq!(l.a, s.a);
        assert_eq!(r.b, s.b);
        assert_eq!(l.error, 0.5);
        assert_eq!(r.degree, 8);
        assert_eq!(l.estimate, None);
    }

    #[test]
    fn test_contribution_before_and_after_evaluation() {
        let s = Segment::root(c(0.0, 0.0), c(1.0, 0.0));
        assert!(!s.contribution().is_finite());
        assert_eq!(s.error, f64::INFINITY);
        let v = Acb::from_f64(0.5, 0.0);
        let e = s.evaluated(v, 4);
        assert_eq!(e.contribution(), v);
        assert_eq!(e.degree, 4);
        assert_eq!(e.error, 0.0);
    }

    #[test]
    fn test_cannot_split_adjacent_floats() {
        let a = 1.0;
        let b = quadra_ball::mag::next_up(a);
        let s = Segment::root(c(a, 0.0), c(b, 0.0));
        assert!(!s.can_split());
        assert!(Segment::root(c(0.0, 0.0), c(1.0, 0.0)).can_split());
    }

    #[test]
    fn test_bernstein_box_contains_ellipse_points() {
        let s = Segment::root(c(0.0, 0.0), c(2.0, 0.0));
        let rho: f64 = 2.0;
        let b = s.bernstein_box(rho);
        // t = ((ρ + 1/ρ)/2) maps to 1 + 1.25
        assert!(b.contains_point(c(2.25, 0.0)));
        assert!(b.contains_point(c(1.0, 0.75)));
        assert!(b.contains_point(c(-0.25, 0.0)));
    }

    #[test]
    fn test_bernstein_box_rotated_segment() {
        let s = Segment::root(c(0.0, 0.0), c(0.0, 2.0));
        let b = s.bernstein_box(3.0);
        // vertical segment: the long axis is imaginary
        let alpha = (3.0 + 1.0 / 3.0) / 2.0;
        assert!(b.contains_point(c(0.0, 1.0 + alpha)));
        assert!(b.contains(&s.hull()));
    }
}
