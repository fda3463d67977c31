//! Piecewise-linear paths and closed contours.

use num_complex::Complex64;
use smallvec::SmallVec;

use quadra_ball::mag::div_down;

use crate::error::IntegrationError;
use crate::integrand::Integrand;
use crate::integrate::{integrate, Integral};
use crate::options::IntegrationOptions;

/// A polyline through the complex plane, integrated edge by edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    vertices: SmallVec<[Complex64; 8]>,
}

impl Contour {
    /// An open path through `vertices` in order.
    pub fn path<I: IntoIterator<Item = Complex64>>(vertices: I) -> Result<Self, IntegrationError> {
        let vertices: SmallVec<[Complex64; 8]> = vertices.into_iter().collect();
        if vertices.len() < 2 || vertices.windows(2).any(|w| w[0] == w[1]) {
            return Err(IntegrationError::InvalidContour);
        }
        Ok(Self { vertices })
    }

    /// A closed polygon: the last vertex connects back to the first.
    pub fn closed<I: IntoIterator<Item = Complex64>>(
        vertices: I,
    ) -> Result<Self, IntegrationError> {
        let mut vertices: SmallVec<[Complex64; 8]> = vertices.into_iter().collect();
        if let Some(&first) = vertices.first() {
            if vertices.last() != Some(&first) {
                vertices.push(first);
            }
        }
        Self::path(vertices)
    }

    /// The counterclockwise boundary of the rectangle with corners `lo`, `hi`.
    pub fn rectangle(lo: Complex64, hi: Complex64) -> Result<Self, IntegrationError> {
        Self::closed([
            lo,
            Complex64::new(hi.re, lo.im),
            hi,
            Complex64::new(lo.re, hi.im),
        ])
    }

    pub fn vertices(&self) -> &[Complex64] {
        &self.vertices
    }

    /// Directed edges `(a, b)` in path order.
    pub fn edges(&self) -> impl Iterator<Item = (Complex64, Complex64)> + '_ {
        self.vertices.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn is_closed(&self) -> bool {
        self.vertices.first() == self.vertices.last()
    }

    /// Integrates over every edge and sums the results.
    ///
    /// A positive `abs_tol` is split evenly across edges; with `abs_tol = 0`
    /// each edge is integrated to relative goal `goal` on its own.
    #[allow(clippy::too_many_arguments)]
    pub fn integrate<P, F>(
        &self,
        f: &F,
        param: &P,
        goal: u32,
        abs_tol: f64,
        options: &IntegrationOptions,
        prec: u32,
    ) -> Result<Integral, IntegrationError>
    where
        P: ?Sized,
        F: Integrand<P> + ?Sized,
    {
        let edges = self.vertices.len() - 1;
        let edge_tol = div_down(abs_tol, edges as f64).max(0.0);
        let mut total = Integral::zero();
        for (a, b) in self.edges() {
            let part = integrate(f, param, a, b, goal, edge_tol, options, prec)?;
            total = total.combine(&part);
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrand::Holomorphic;
    use quadra_ball::Acb;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_rectangle_is_closed_and_ccw() {
        let r = Contour::rectangle(c(-1.0, -1.0), c(1.0, 1.0)).unwrap();
        assert!(r.is_closed());
        assert_eq!(r.edges().count(), 4);
        assert_eq!(r.vertices()[1], c(1.0, -1.0));
    }

    #[test]
    fn test_invalid_contours() {
        assert_eq!(
            Contour::path([c(0.0, 0.0)]),
            Err(IntegrationError::InvalidContour)
        );
        assert!(Contour::path([c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0)]).is_err());
    }

    #[test]
    fn test_residue_of_inverse() {
        // ∮ dz/z = 2πi
        let f = Holomorphic(|z: &Acb| z.inv());
        let r = Contour::rectangle(c(-1.0, -1.0), c(1.0, 1.0)).unwrap();
        let opts = IntegrationOptions::default();
        let res = r.integrate(&f, &(), 40, 1e-10, &opts, 53).unwrap().div_2pi_i();
        assert!(res.is_converged());
        assert!(res.value.contains_point(c(1.0, 0.0)));
        assert!(res.value.radius() < 1e-9);
    }

    #[test]
    fn test_open_path_is_path_independent() {
        let f = Holomorphic(|z: &Acb| z.exp());
        let opts = IntegrationOptions::default();
        let bent = Contour::path([c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)]).unwrap();
        let r = bent.integrate(&f, &(), 40, 1e-10, &opts, 53).unwrap();
        let exact = c(1.0, 1.0).exp() - 1.0;
        assert!(r.value.contains_point(exact));
    }
}
