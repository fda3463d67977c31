//! # Quadra
//!
//! Certified numerical integration in ball arithmetic.
//!
//! Quadra computes enclosures of integrals of complex functions along
//! segments and polygonal contours. Every result is a ball guaranteed to
//! contain the exact value, together with a status saying whether the
//! requested accuracy was reached.
//!
//! ## Crates
//!
//! - **Ball arithmetic** ([`ball`]): real and complex balls, elementary
//!   functions, ζ and Lambert W
//! - **Quadrature** ([`calc`]): adaptive Gauss–Legendre with rigorous
//!   Bernstein-ellipse error bounds
//! - **Examples** ([`catalog`]): holomorphic extensions of piecewise
//!   functions and a catalogue of test integrals
//!
//! ## Quick Start
//!
//! ```rust
//! use quadra::prelude::*;
//!
//! let f = Holomorphic(|z: &Acb| (z.sqr() + Acb::from(1.0)).inv());
//! let r = integrate(
//!     &f,
//!     &(),
//!     Complex64::new(0.0, 0.0),
//!     Complex64::new(1.0, 0.0),
//!     40,
//!     1e-10,
//!     &IntegrationOptions::default(),
//!     53,
//! )
//! .unwrap();
//! assert!(r.value.re().contains_f64(std::f64::consts::FRAC_PI_4));
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use quadra_ball as ball;
pub use quadra_calc as calc;
pub use quadra_catalog as catalog;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use num_complex::Complex64;
    pub use quadra_ball::{const_pi, Acb, Arb, Enclosure};
    pub use quadra_calc::{
        integrate, Contour, ContractViolation, Holomorphic, Integral, Integrand,
        IntegrationError, IntegrationOptions, Request, Status, ValueOnly, Verbosity,
    };
    pub use quadra_catalog::{holomorphic, Settings};
}
