//! Wellrad implements published formulas for the radius of influence and the
//! radius of investigation of a pumping well in a confined aquifer
//!
//! The formulas follow the compilation of Bresciani et al. (Ref #1). All of
//! them reduce to a criterion-dependent coefficient multiplying the
//! characteristic diffusion length `sqrt(T t / S)`, where the coefficient is
//! either a published constant or the solution of a transcendental relation
//! involving the Theis well function `W(u) = E1(u)`.
//!
//! # Contents
//!
//! * [`well_function`] and its inverse -- the kernel: `E1`, the inverse of
//!   `E1`, and the auxiliary functions used by volume and averaging criteria
//! * [`RadiusOfInfluence`] -- nine definitions of the radius of influence
//!   during the drawdown phase
//! * [`RadiusOfInvestigation`] -- twelve definitions of the radius of
//!   investigation during the drawdown phase
//! * [`RecoveryInvestigation`] -- the radius of investigation during the
//!   recovery phase following pump shutoff
//!
//! All evaluations are pure functions of their inputs: no global state, no
//! interior mutability, and thus safe to call concurrently.
//!
//! # Reference
//!
//! 1. Bresciani E, Shandilya RN, Kang PK, Lee S (2020) Well radius of
//!    influence and radius of investigation: What exactly are they and how
//!    to estimate them? Journal of Hydrology, 583:124646

use std::fmt;

/// Defines the error type
///
/// Two kinds suffice for this library: an input outside its physical domain,
/// and a root-finder that failed to converge. Messages are static
/// strings stating the violated constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadiusError {
    /// An input violates its required positivity or range constraint
    Domain(&'static str),
    /// The kernel's bounded root-finder did not reach the tolerance
    Convergence(&'static str),
}

impl fmt::Display for RadiusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RadiusError::Domain(msg) => write!(f, "domain error: {}", msg),
            RadiusError::Convergence(msg) => write!(f, "convergence error: {}", msg),
        }
    }
}

impl std::error::Error for RadiusError {}

mod influence;
mod investigation;
mod recovery;
mod reference_data;
mod wellfunc;
pub use crate::influence::*;
pub use crate::investigation::*;
pub use crate::recovery::*;
pub use crate::reference_data::*;
pub use crate::wellfunc::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
