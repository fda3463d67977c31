//! The contract between the engine and the function being integrated.
//!
//! The engine asks an integrand two kinds of questions about a point or a
//! (possibly wide) region `z`:
//!
//! - [`Request::Value`]: enclose `f` over `z`.
//! - [`Request::AnalyticityProbe`]: enclose `f` over `z` *and* certify that
//!   `f` is holomorphic on `z`, or return an indeterminate ball.
//!
//! Piecewise real functions such as `|x|` or `⌊x⌋` can be integrated
//! rigorously by answering probes with an indeterminate ball whenever the
//! region touches their non-analytic locus. The engine then refuses to use
//! a high-degree rule there and subdivides instead.

use quadra_ball::Acb;
use thiserror::Error;

/// The kind of enclosure requested from an integrand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Request {
    /// Plain enclosure of the function over the region.
    Value,
    /// Enclosure valid only if the function is holomorphic on the region.
    AnalyticityProbe,
}

impl Request {
    /// The raw derivative order: 0 for a value, 1 for a probe.
    pub fn order(self) -> u32 {
        match self {
            Request::Value => 0,
            Request::AnalyticityProbe => 1,
        }
    }

    /// Maps a raw order back to a request. Any positive order is a probe.
    pub fn from_order(order: u32) -> Self {
        if order == 0 {
            Request::Value
        } else {
            Request::AnalyticityProbe
        }
    }

    pub fn is_probe(self) -> bool {
        self == Request::AnalyticityProbe
    }
}

/// An integrand was asked for something it does not support.
///
/// This is fatal: the integration call returns it immediately.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("integrand does not support order {} requests: {reason}", request.order())]
pub struct ContractViolation {
    /// The request that could not be served.
    pub request: Request,
    /// Human-readable explanation.
    pub reason: String,
}

impl ContractViolation {
    pub fn new(request: Request, reason: impl Into<String>) -> Self {
        Self {
            request,
            reason: reason.into(),
        }
    }
}

/// A function the engine can integrate.
///
/// `P` is an auxiliary parameter passed through every layer unchanged.
/// Indeterminate answers are non-finite [`Acb`] values, not errors.
pub trait Integrand<P: ?Sized> {
    /// Encloses `f(z)` for the given request at working precision `prec`.
    fn evaluate(
        &self,
        z: &Acb,
        request: Request,
        param: &P,
        prec: u32,
    ) -> Result<Acb, ContractViolation>;
}

impl<P, F> Integrand<P> for F
where
    P: ?Sized,
    F: Fn(&Acb, Request, &P, u32) -> Result<Acb, ContractViolation>,
{
    fn evaluate(
        &self,
        z: &Acb,
        request: Request,
        param: &P,
        prec: u32,
    ) -> Result<Acb, ContractViolation> {
        self(z, request, param, prec)
    }
}

/// Integrand built from a function that is holomorphic wherever its ball
/// enclosure is finite.
///
/// Both requests evaluate the same closure. This is correct for entire
/// functions and for meromorphic ones whose ball evaluation turns
/// indeterminate on regions containing a pole.
#[derive(Clone, Copy, Debug)]
pub struct Holomorphic<F>(pub F);

impl<P: ?Sized, F: Fn(&Acb) -> Acb> Integrand<P> for Holomorphic<F> {
    fn evaluate(
        &self,
        z: &Acb,
        _request: Request,
        _param: &P,
        _prec: u32,
    ) -> Result<Acb, ContractViolation> {
        Ok((self.0)(z))
    }
}

/// Integrand that can only produce plain values.
///
/// Any analyticity probe is a contract violation, so integrating a
/// `ValueOnly` function aborts as soon as the engine needs a certificate.
#[derive(Clone, Copy, Debug)]
pub struct ValueOnly<F>(pub F);

impl<P: ?Sized, F: Fn(&Acb) -> Acb> Integrand<P> for ValueOnly<F> {
    fn evaluate(
        &self,
        z: &Acb,
        request: Request,
        _param: &P,
        _prec: u32,
    ) -> Result<Acb, ContractViolation> {
        match request {
            Request::Value => Ok((self.0)(z)),
            Request::AnalyticityProbe => Err(ContractViolation::new(
                request,
                "function supports plain values only",
            )),
        }
    }
}
