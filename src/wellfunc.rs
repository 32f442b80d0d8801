use crate::RadiusError;
use russell_lab::{RootFinder, StrError};

/// Euler-Mascheroni constant
pub(crate) const EULER: f64 = 0.577215664901532860606512090082402431;

/// Tolerance for the power series of E1
const TOL_SERIES: f64 = 1e-15;

/// Tolerance for the continued fraction of E1
const TOL_FRACTION: f64 = 1e-15;

/// Maximum number of terms of the power series of E1
const MAX_SERIES_TERMS: usize = 50;

/// Maximum number of terms of the continued fraction of E1
const MAX_FRACTION_TERMS: usize = 100;

/// Evaluates E1 assuming u > 0 (checked by the public wrappers)
///
/// Uses the power series around `-ln(u) - γ` for u ≤ 1 and the modified
/// Lentz continued fraction for u > 1, so that neither cancellation (small u)
/// nor overflow (large u) occurs. See Ref #1, Chapter 6.3.
///
/// # Reference
///
/// 1. Press WH, Teukolsky SA, Vetterling WT, Flannery BP (2007) Numerical
///    Recipes: The Art of Scientific Computing, 3rd ed, Cambridge University Press
pub(crate) fn e1(u: f64) -> Result<f64, StrError> {
    if u <= 1.0 {
        let mut sum = -EULER - f64::ln(u);
        let mut term = 1.0;
        for k in 1..=MAX_SERIES_TERMS {
            term *= -u / (k as f64);
            let delta = -term / (k as f64);
            sum += delta;
            if f64::abs(delta) < TOL_SERIES * f64::abs(sum) {
                break;
            }
        }
        return Ok(sum);
    }
    let mut b = u + 1.0;
    let mut c = 1.0 / f64::MIN_POSITIVE;
    let mut d = 1.0 / b;
    let mut h = d;
    for i in 1..=MAX_FRACTION_TERMS {
        let a = -((i * i) as f64);
        b += 2.0;
        d = 1.0 / (a * d + b);
        c = b + a / c;
        let delta = c * d;
        h *= delta;
        if f64::abs(delta - 1.0) < TOL_FRACTION {
            return Ok(h * f64::exp(-u));
        }
    }
    Err("continued fraction for E1 did not converge")
}

/// Evaluates the Theis well function W(u) = E1(u)
///
/// # Input
///
/// * `u` -- the dimensionless argument `u = r² S / (4 T t)`; must be positive
pub fn well_function(u: f64) -> Result<f64, RadiusError> {
    if !(u > 0.0) {
        return Err(RadiusError::Domain("u must be positive"));
    }
    e1(u).map_err(RadiusError::Convergence)
}

/// Finds u > 0 such that W(u) = w
///
/// W is strictly decreasing on (0, ∞) with W → ∞ as u → 0⁺ and W → 0 as
/// u → ∞, hence a bracket always exists for w ∈ (0, ∞). The lower end comes
/// from the small-u asymptotics `W(u) ≈ -ln(u) - γ`; the upper end is
/// expanded a bounded number of times for extremely small targets. The root
/// is solved in ln(u) so that very small roots keep full relative accuracy;
/// Brent's method then converges to near machine precision within its
/// internal iteration limit.
///
/// # Input
///
/// * `w` -- the target well-function value; must be positive
pub fn inverse_well_function(w: f64) -> Result<f64, RadiusError> {
    if !(w > 0.0) {
        return Err(RadiusError::Domain("w must be positive"));
    }
    // W(a) ≈ w + ln(2) > w at the asymptotic guess
    let a = f64::min(1e-12, 0.5 * f64::exp(-(w + EULER)));
    if a < 1e-300 {
        return Err(RadiusError::Convergence("target well-function value is too large to invert"));
    }
    let mut b = 100.0;
    for _ in 0..4 {
        if e1(b).map_err(RadiusError::Convergence)? <= w {
            break;
        }
        b *= 8.0; // e1 underflows to zero long before the last doubling
    }
    let args = &mut 0;
    let solver = RootFinder::new();
    let (root, _) = solver
        .brent(f64::ln(a), f64::ln(b), args, |y, _| Ok(e1(f64::exp(y))? - w))
        .map_err(RadiusError::Convergence)?;
    Ok(f64::exp(root))
}

/// Evaluates the cone-of-depression volume function F(u) = exp(-u) - u E1(u)
///
/// F gives the fraction of the depression-cone volume located beyond the
/// dimensionless distance u; it decreases from 1 at u → 0⁺ to 0 at u → ∞.
pub fn cone_volume_fraction(u: f64) -> Result<f64, RadiusError> {
    if !(u > 0.0) {
        return Err(RadiusError::Domain("u must be positive"));
    }
    let w = e1(u).map_err(RadiusError::Convergence)?;
    Ok(f64::exp(-u) - u * w)
}

/// Finds u > 0 such that F(u) = x with F the cone-of-depression volume function
///
/// # Input
///
/// * `x` -- the target volume fraction; must be within (0, 1)
pub fn inverse_cone_volume_fraction(x: f64) -> Result<f64, RadiusError> {
    if !(x > 0.0 && x < 1.0) {
        return Err(RadiusError::Domain("volume fraction must be within (0, 1)"));
    }
    let args = &mut 0;
    let solver = RootFinder::new();
    let (root, _) = solver
        .brent(1e-12, 1e2, args, |u, _| Ok(f64::exp(-u) - u * e1(u)? - x))
        .map_err(RadiusError::Convergence)?;
    Ok(root)
}

/// Evaluates the drawdown averaging function
///
/// `G(u, uw) = (E1(uw) + E1(u)) ln((E1(uw) + E1(u)) / E1(uw))`
///
/// where uw is the dimensionless argument at the well radius. G decreases
/// monotonically from ∞ at u → 0⁺ to 0 at u → ∞.
pub fn drawdown_average_function(u: f64, uw: f64) -> Result<f64, RadiusError> {
    if !(u > 0.0) {
        return Err(RadiusError::Domain("u must be positive"));
    }
    if !(uw > 0.0) {
        return Err(RadiusError::Domain("uw must be positive"));
    }
    let ww = e1(uw).map_err(RadiusError::Convergence)?;
    let w = e1(u).map_err(RadiusError::Convergence)?;
    Ok((ww + w) * f64::ln((ww + w) / ww))
}

/// Finds u > 0 such that G(u, uw) = x with G the drawdown averaging function
pub fn inverse_drawdown_average_function(x: f64, uw: f64) -> Result<f64, RadiusError> {
    if !(x > 0.0) {
        return Err(RadiusError::Domain("x must be positive"));
    }
    if !(uw > 0.0) {
        return Err(RadiusError::Domain("uw must be positive"));
    }
    let ww = e1(uw).map_err(RadiusError::Convergence)?;
    let args = &mut 0;
    let solver = RootFinder::new();
    let (root, _) = solver
        .brent(1e-12, 1e2, args, |u, _| {
            let w = e1(u)?;
            Ok((ww + w) * f64::ln((ww + w) / ww) - x)
        })
        .map_err(RadiusError::Convergence)?;
    Ok(root)
}

/// Evaluates the drawdown-derivative averaging function
///
/// `H(u, uw) = (exp(-uw) + exp(-u)) ln((exp(-uw) + exp(-u)) / exp(-uw))`
pub fn derivative_average_function(u: f64, uw: f64) -> Result<f64, RadiusError> {
    if !(u > 0.0) {
        return Err(RadiusError::Domain("u must be positive"));
    }
    if !(uw > 0.0) {
        return Err(RadiusError::Domain("uw must be positive"));
    }
    let ew = f64::exp(-uw);
    let e = f64::exp(-u);
    Ok((ew + e) * f64::ln((ew + e) / ew))
}

/// Finds u > 0 such that H(u, uw) = x with H the drawdown-derivative averaging function
pub fn inverse_derivative_average_function(x: f64, uw: f64) -> Result<f64, RadiusError> {
    if !(x > 0.0) {
        return Err(RadiusError::Domain("x must be positive"));
    }
    if !(uw > 0.0) {
        return Err(RadiusError::Domain("uw must be positive"));
    }
    let ew = f64::exp(-uw);
    let args = &mut 0;
    let solver = RootFinder::new();
    let (root, _) = solver
        .brent(1e-12, 1e2, args, |u, _| {
            let e = f64::exp(-u);
            Ok((ew + e) * f64::ln((ew + e) / ew) - x)
        })
        .map_err(RadiusError::Convergence)?;
    Ok(root)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
