use crate::{inverse_cone_volume_fraction, inverse_well_function, well_function, RadiusError};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Defines the criterion selecting one published definition of the radius of influence
///
/// Fields carry the criterion-specific parameters; the aquifer properties and
/// the elapsed time are held by [`crate::RadiusOfInfluence`]. Constants and
/// formulas follow Bresciani et al. (2020), Table 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum InfluenceCriterion {
    /// Absolute drawdown threshold at the front
    AbsoluteDrawdown {
        rate: f64,      // pumping rate Q
        threshold: f64, // absolute drawdown threshold s_c
    },
    /// Drawdown threshold relative to the drawdown at the well
    RelativeDrawdown {
        well_radius: f64, // well radius r_w
        threshold: f64,   // relative drawdown threshold α
    },
    /// Flow rate threshold relative to the pumping rate
    RelativeFlow {
        threshold: f64, // relative flow threshold α
    },
    /// Volume threshold relative to the volume of the cone of depression
    RelativeVolume {
        threshold: f64, // relative volume threshold α
    },
    /// Quasi-steady state model (C = 2)
    QuasiSteady,
    /// Jones' formula (C = 4)
    Jones,
    /// Extension of the closed-reservoir regime (C = 2.83)
    ClosedReservoir,
    /// Peak of the impulse response (C = 2)
    ImpulsePeak,
    /// Extension of the logarithmic regime (C = 1.5)
    LogRegime,
}

/// Implements the radius of influence of a pumping well during the drawdown phase
///
/// The radius of influence is the distance beyond which the drawdown caused
/// by pumping is negligible under the selected criterion. Every definition
/// reduces to
///
/// ```text
/// r_infl(t) = C · sqrt(T t / S)
/// ```
///
/// with the coefficient C fixed by the criterion (possibly through the
/// inverse well function). Units are free but must be consistent across all
/// parameters.
pub struct RadiusOfInfluence {
    transmissivity: f64,            // transmissivity T
    storativity: f64,               // storativity S
    criterion: InfluenceCriterion,  // selected published definition
}

impl RadiusOfInfluence {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `transmissivity` -- aquifer transmissivity T
    /// * `storativity` -- aquifer storativity S (dimensionless)
    /// * `criterion` -- the criterion with its parameters
    pub fn new(transmissivity: f64, storativity: f64, criterion: InfluenceCriterion) -> Result<Self, RadiusError> {
        if !(transmissivity > 0.0) {
            return Err(RadiusError::Domain("transmissivity must be positive"));
        }
        if !(storativity > 0.0) {
            return Err(RadiusError::Domain("storativity must be positive"));
        }
        match criterion {
            InfluenceCriterion::AbsoluteDrawdown { rate, threshold } => {
                if !(rate > 0.0) {
                    return Err(RadiusError::Domain("rate must be positive"));
                }
                if !(threshold > 0.0) {
                    return Err(RadiusError::Domain("drawdown threshold must be positive"));
                }
            }
            InfluenceCriterion::RelativeDrawdown { well_radius, threshold } => {
                if !(well_radius > 0.0) {
                    return Err(RadiusError::Domain("well radius must be positive"));
                }
                if !(threshold > 0.0 && threshold < 1.0) {
                    return Err(RadiusError::Domain("relative threshold must be within (0, 1)"));
                }
            }
            InfluenceCriterion::RelativeFlow { threshold } | InfluenceCriterion::RelativeVolume { threshold } => {
                if !(threshold > 0.0 && threshold < 1.0) {
                    return Err(RadiusError::Domain("relative threshold must be within (0, 1)"));
                }
            }
            _ => (),
        }
        Ok(RadiusOfInfluence {
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
        let c = match self.criterion {
            InfluenceCriterion::AbsoluteDrawdown { rate, threshold } => {
                let sc_star = 4.0 * PI * self.transmissivity * threshold / rate;
                2.0 * f64::sqrt(inverse_well_function(sc_star)?)
            }
            InfluenceCriterion::RelativeDrawdown { well_radius, threshold } => {
                let uw = self.storativity * well_radius * well_radius / (4.0 * self.transmissivity * t);
                let ww = well_function(uw)?;
                2.0 * f64::sqrt(inverse_well_function(threshold * ww)?)
            }
            InfluenceCriterion::RelativeFlow { threshold } => 2.0 * f64::sqrt(-f64::ln(threshold)),
            InfluenceCriterion::RelativeVolume { threshold } => {
                2.0 * f64::sqrt(inverse_cone_volume_fraction(threshold)?)
            }
            InfluenceCriterion::QuasiSteady => 2.0,
            InfluenceCriterion::Jones => 4.0,
            InfluenceCriterion::ClosedReservoir => 2.83,
            InfluenceCriterion::ImpulsePeak => 2.0,
            InfluenceCriterion::LogRegime => 1.5,
        };
        Ok(c)
    }

    /// Calculates the radius of influence at time t since the beginning of pumping
    pub fn radius(&self, t: f64) -> Result<f64, RadiusError> {
        let c = self.coefficient(t)?;
        Ok(c * f64::sqrt(self.transmissivity * t / self.storativity))
    }

    /// Calculates the radius of influence for a series of times
    ///
    /// Returns one radius per entry of `times`, in the same order.
    pub fn radius_series(&self, times: &[f64]) -> Result<Vec<f64>, RadiusError> {
        times.iter().map(|&t| self.radius(t)).collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{InfluenceCriterion, RadiusOfInfluence};
    use crate::RadiusError;
    use russell_lab::approx_eq;

    // parameters of the worked example of Bresciani et al. (2020)
    const T: f64 = 10.0;
    const S: f64 = 1e-4;

    #[test]
    fn new_captures_invalid_inputs() {
        assert_eq!(
            RadiusOfInfluence::new(0.0, S, InfluenceCriterion::QuasiSteady).err(),
            Some(RadiusError::Domain("transmissivity must be positive"))
        );
        assert_eq!(
            RadiusOfInfluence::new(T, -1e-4, InfluenceCriterion::Jones).err(),
            Some(RadiusError::Domain("storativity must be positive"))
        );
        assert_eq!(
            RadiusOfInfluence::new(T, S, InfluenceCriterion::AbsoluteDrawdown { rate: 0.0, threshold: 0.05 }).err(),
            Some(RadiusError::Domain("rate must be positive"))
        );
        assert_eq!(
            RadiusOfInfluence::new(T, S, InfluenceCriterion::AbsoluteDrawdown { rate: 30.0, threshold: 0.0 }).err(),
            Some(RadiusError::Domain("drawdown threshold must be positive"))
        );
        assert_eq!(
            RadiusOfInfluence::new(
                T,
                S,
                InfluenceCriterion::RelativeDrawdown {
                    well_radius: -0.15,
                    threshold: 0.01,
                }
            )
            .err(),
            Some(RadiusError::Domain("well radius must be positive"))
        );
        assert_eq!(
            RadiusOfInfluence::new(T, S, InfluenceCriterion::RelativeFlow { threshold: 1.0 }).err(),
            Some(RadiusError::Domain("relative threshold must be within (0, 1)"))
        );
        assert_eq!(
            RadiusOfInfluence::new(T, S, InfluenceCriterion::RelativeVolume { threshold: 0.0 }).err(),
            Some(RadiusError::Domain("relative threshold must be within (0, 1)"))
        );
    }

    #[test]
    fn radius_captures_non_positive_time() {
        let ana = RadiusOfInfluence::new(T, S, InfluenceCriterion::QuasiSteady).unwrap();
        assert_eq!(ana.radius(0.0).err(), Some(RadiusError::Domain("t must be positive")));
        assert_eq!(ana.radius(-1.0).err(), Some(RadiusError::Domain("t must be positive")));
    }

    #[test]
    fn constant_coefficient_formulas_are_correct() {
        // sqrt(T t / S) = 316.22776601683796 at t = 1
        let cases = [
            (InfluenceCriterion::QuasiSteady, 632.4555320336759),
            (InfluenceCriterion::Jones, 1264.9110640673518),
            (InfluenceCriterion::ClosedReservoir, 894.9245778276514),
            (InfluenceCriterion::ImpulsePeak, 632.4555320336759),
            (InfluenceCriterion::LogRegime, 474.34164902525697),
        ];
        for (criterion, reference) in cases {
            let ana = RadiusOfInfluence::new(T, S, criterion).unwrap();
            approx_eq(ana.radius(1.0).unwrap(), reference, 1e-9);
        }
    }

    #[test]
    fn criterion_based_formulas_are_correct() {
        let ana = RadiusOfInfluence::new(T, S, InfluenceCriterion::AbsoluteDrawdown { rate: 30.0, threshold: 0.05 })
            .unwrap();
        approx_eq(ana.radius(1.0).unwrap(), 641.1821391790684, 1e-5);

        let ana = RadiusOfInfluence::new(
            T,
            S,
            InfluenceCriterion::RelativeDrawdown {
                well_radius: 0.15,
                threshold: 0.01,
            },
        )
        .unwrap();
        approx_eq(ana.radius(1.0).unwrap(), 689.6772310280794, 1e-5);

        let ana = RadiusOfInfluence::new(T, S, InfluenceCriterion::RelativeFlow { threshold: 0.01 }).unwrap();
        approx_eq(ana.radius(1.0).unwrap(), 1357.2280848830223, 1e-9);

        let ana = RadiusOfInfluence::new(T, S, InfluenceCriterion::RelativeVolume { threshold: 0.01 }).unwrap();
        approx_eq(ana.radius(1.0).unwrap(), 1104.681040670817, 1e-5);
    }

    #[test]
    fn radius_is_non_decreasing_in_time() {
        let criteria = [
            InfluenceCriterion::AbsoluteDrawdown { rate: 30.0, threshold: 0.05 },
            InfluenceCriterion::RelativeDrawdown {
                well_radius: 0.15,
                threshold: 0.01,
            },
            InfluenceCriterion::RelativeFlow { threshold: 0.01 },
            InfluenceCriterion::RelativeVolume { threshold: 0.01 },
            InfluenceCriterion::QuasiSteady,
            InfluenceCriterion::Jones,
            InfluenceCriterion::ClosedReservoir,
            InfluenceCriterion::ImpulsePeak,
            InfluenceCriterion::LogRegime,
        ];
        let times: Vec<f64> = (1..=10).map(|i| 0.5 * (i as f64)).collect();
        for criterion in criteria {
            let ana = RadiusOfInfluence::new(T, S, criterion).unwrap();
            let radii = ana.radius_series(&times).unwrap();
            assert_eq!(radii.len(), times.len());
            for pair in radii.windows(2) {
                assert!(pair[1] >= pair[0], "radius must not decrease in time ({:?})", criterion);
            }
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let ana = RadiusOfInfluence::new(T, S, InfluenceCriterion::AbsoluteDrawdown { rate: 30.0, threshold: 0.05 })
            .unwrap();
        let first = ana.radius(2.5).unwrap();
        let second = ana.radius(2.5).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }
}
