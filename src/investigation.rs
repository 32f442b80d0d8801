use crate::{
    inverse_derivative_average_function, inverse_drawdown_average_function, inverse_well_function, well_function,
    RadiusError,
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Defines the criterion selecting one published definition of the radius of investigation
///
/// The radius of investigation quantifies the distance to which the aquifer
/// has measurably influenced the observed drawdown response, a different
/// physical notion from the radius of influence. Constants and formulas
/// follow Bresciani et al. (2020), Table 2.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum InvestigationCriterion {
    /// Absolute drawdown difference threshold
    AbsoluteDrawdownDiff {
        rate: f64,      // pumping rate Q
        threshold: f64, // absolute drawdown difference threshold s_c
    },
    /// Absolute drawdown derivative difference threshold over a log-time window
    AbsoluteDerivativeDiff {
        rate: f64,      // pumping rate Q
        window: f64,    // window size δ used to calculate the derivative
        threshold: f64, // absolute derivative difference threshold s_c
    },
    /// Relative drawdown difference threshold
    RelativeDrawdownDiff {
        well_radius: f64, // well radius r_w
        threshold: f64,   // relative threshold α
    },
    /// Relative drawdown derivative difference threshold
    RelativeDerivativeDiff {
        well_radius: f64, // well radius r_w
        threshold: f64,   // relative threshold α
    },
    /// Relative drawdown averaging threshold
    RelativeDrawdownAverage {
        well_radius: f64, // well radius r_w
        threshold: f64,   // relative threshold α
    },
    /// Relative drawdown derivative averaging threshold
    RelativeDerivativeAverage {
        well_radius: f64, // well radius r_w
        threshold: f64,   // relative threshold α
    },
    /// Proportion of the linear-barrier regime, analysis in linear scale
    BarrierRegimeLinear {
        confidence: f64, // confidence level α for barrier detection
    },
    /// Proportion of the linear-barrier regime, analysis in logarithmic scale
    BarrierRegimeLog {
        confidence: f64, // confidence level α for barrier detection
    },
    /// Semi-empirical start of a constant-head boundary effect (C = 2.64)
    ConstantHead,
    /// Intersection of the unbounded and closed-boundary regimes (C = 2)
    ClosedReservoir,
    /// Intersection of the unbounded and linear-barrier regimes (C = 0.75)
    LinearBarrier,
    /// Peak of the impulse response difference (C = 1)
    ImpulsePeak,
}

/// Implements the radius of investigation of a pumping well during the drawdown phase
///
/// Every definition reduces to `r_inv(t) = C · sqrt(T t / S)` with the
/// coefficient C fixed by the criterion. Units are free but must be
/// consistent across all parameters.
pub struct RadiusOfInvestigation {
    transmissivity: f64,               // transmissivity T
    storativity: f64,                  // storativity S
    criterion: InvestigationCriterion, // selected published definition
}

impl RadiusOfInvestigation {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `transmissivity` -- aquifer transmissivity T
    /// * `storativity` -- aquifer storativity S (dimensionless)
    /// * `criterion` -- the criterion with its parameters
    pub fn new(transmissivity: f64, storativity: f64, criterion: InvestigationCriterion) -> Result<Self, RadiusError> {
        if !(transmissivity > 0.0) {
            return Err(RadiusError::Domain("transmissivity must be positive"));
        }
        if !(storativity > 0.0) {
            return Err(RadiusError::Domain("storativity must be positive"));
        }
        match criterion {
            InvestigationCriterion::AbsoluteDrawdownDiff { rate, threshold } => {
                if !(rate > 0.0) {
                    return Err(RadiusError::Domain("rate must be positive"));
                }
                if !(threshold > 0.0) {
                    return Err(RadiusError::Domain("drawdown threshold must be positive"));
                }
            }
            InvestigationCriterion::AbsoluteDerivativeDiff { rate, window, threshold } => {
                if !(rate > 0.0) {
                    return Err(RadiusError::Domain("rate must be positive"));
                }
                if !(window > 0.0) {
                    return Err(RadiusError::Domain("window must be positive"));
                }
                if !(threshold > 0.0) {
                    return Err(RadiusError::Domain("drawdown threshold must be positive"));
                }
                // the argument of the logarithm must stay below one
                let sc_star = 4.0 * PI * transmissivity * threshold / rate;
                if f64::sqrt(2.0) * sc_star / window >= 1.0 {
                    return Err(RadiusError::Domain("window must exceed sqrt(2) times the dimensionless threshold"));
                }
            }
            InvestigationCriterion::RelativeDrawdownDiff { well_radius, threshold }
            | InvestigationCriterion::RelativeDerivativeDiff { well_radius, threshold }
            | InvestigationCriterion::RelativeDrawdownAverage { well_radius, threshold }
            | InvestigationCriterion::RelativeDerivativeAverage { well_radius, threshold } => {
                if !(well_radius > 0.0) {
                    return Err(RadiusError::Domain("well radius must be positive"));
                }
                if !(threshold > 0.0 && threshold < 1.0) {
                    return Err(RadiusError::Domain("relative threshold must be within (0, 1)"));
                }
            }
            InvestigationCriterion::BarrierRegimeLinear { confidence }
            | InvestigationCriterion::BarrierRegimeLog { confidence } => {
                if !(confidence > 0.0 && confidence < 1.0) {
                    return Err(RadiusError::Domain("confidence level must be within (0, 1)"));
                }
            }
            _ => (),
        }
        Ok(RadiusOfInvestigation {
            transmissivity,
            storativity,
            criterion,
        })
    }

    /// Calculates the dimensionless coefficient C at time t
    pub fn coefficient(&self, t: f64) -> Result<f64, RadiusError> {
        if !(t > 0.0) {
            return Err(RadiusError::Domain("t must be positive"));
        }
        let uw_of = |well_radius: f64| self.storativity * well_radius * well_radius / (4.0 * self.transmissivity * t);
        let c = match self.criterion {
            InvestigationCriterion::AbsoluteDrawdownDiff { rate, threshold } => {
                let sc_star = 4.0 * PI * self.transmissivity * threshold / rate;
                f64::sqrt(inverse_well_function(sc_star)?)
            }
            InvestigationCriterion::AbsoluteDerivativeDiff { rate, window, threshold } => {
                let sc_star = 4.0 * PI * self.transmissivity * threshold / rate;
                f64::sqrt(-f64::ln(f64::sqrt(2.0) * sc_star / window))
            }
            InvestigationCriterion::RelativeDrawdownDiff { well_radius, threshold } => {
                let ww = well_function(uw_of(well_radius))?;
                f64::sqrt(inverse_well_function(threshold * ww)?)
            }
            InvestigationCriterion::RelativeDerivativeDiff { well_radius, threshold } => {
                f64::sqrt(uw_of(well_radius) - f64::ln(threshold))
            }
            InvestigationCriterion::RelativeDrawdownAverage { well_radius, threshold } => {
                2.0 * f64::sqrt(inverse_drawdown_average_function(threshold, uw_of(well_radius))?)
            }
            InvestigationCriterion::RelativeDerivativeAverage { well_radius, threshold } => {
                2.0 * f64::sqrt(inverse_derivative_average_function(threshold, uw_of(well_radius))?)
            }
            InvestigationCriterion::BarrierRegimeLinear { confidence } => f64::sqrt(-f64::ln(confidence)),
            InvestigationCriterion::BarrierRegimeLog { confidence } => {
                f64::sqrt(-f64::ln(f64::powf(2.0, confidence) - 1.0))
            }
            InvestigationCriterion::ConstantHead => 2.64,
            InvestigationCriterion::ClosedReservoir => 2.0,
            InvestigationCriterion::LinearBarrier => 0.75,
            InvestigationCriterion::ImpulsePeak => 1.0,
        };
        Ok(c)
    }

    /// Calculates the radius of investigation at time t since the beginning of pumping
    pub fn radius(&self, t: f64) -> Result<f64, RadiusError> {
        let c = self.coefficient(t)?;
        Ok(c * f64::sqrt(self.transmissivity * t / self.storativity))
    }

    /// Calculates the radius of investigation for a series of times
    ///
    /// Returns one radius per entry of `times`, in the same order.
    pub fn radius_series(&self, times: &[f64]) -> Result<Vec<f64>, RadiusError> {
        times.iter().map(|&t| self.radius(t)).collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
