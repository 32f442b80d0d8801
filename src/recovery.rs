use crate::wellfunc::e1;
use crate::{inverse_well_function, RadiusError};
use russell_lab::{RootFinder, StrError};
use std::f64::consts::PI;

/// Implements the radius of investigation during the recovery phase after pump shutoff
///
/// During recovery the observed response is the superposition of the pumping
/// well and its shutoff image; the radius of investigation is the distance at
/// which the residual "barrier effect" equals the apparent resolution of the
/// measurement. In dimensionless form, with `t* = (t_p + Δt) / t_p` and
/// `r* = r / sqrt(T t_p / S)`,
///
/// ```text
/// E1(r*² / t*) - E1(r*² / (t* - 1)) = s_c*,    s_c* = 4 π T s_c / Q
/// ```
///
/// The radius grows after shutoff, peaks at [`RecoveryInvestigation::time_of_maximum`],
/// and shrinks back to zero at [`RecoveryInvestigation::time_of_termination`];
/// past that time the relation has no root and the radius is defined as zero.
///
/// Elapsed recovery time Δt is counted from the shutoff (Δt = 0 allowed),
/// while the pumping duration t_p must be strictly positive.
pub struct RecoveryInvestigation {
    pumping_duration: f64, // pumping duration t_p before shutoff
    resolution_star: f64,  // dimensionless apparent resolution s_c* = 4 π T s_c / Q
    radius_pumping: f64,   // characteristic radius sqrt(T t_p / S)
}

/// Dimensionless barrier effect left at radius rs and time ts during recovery
fn barrier_effect(rs: f64, ts: f64) -> Result<f64, StrError> {
    let first = e1(rs * rs / ts)?;
    let second = if ts > 1.0 { e1(rs * rs / (ts - 1.0))? } else { 0.0 };
    Ok(first - second)
}

impl RecoveryInvestigation {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `transmissivity` -- aquifer transmissivity T
    /// * `storativity` -- aquifer storativity S (dimensionless)
    /// * `rate` -- pumping rate Q before shutoff
    /// * `pumping_duration` -- duration t_p of the pumping phase
    /// * `resolution` -- apparent resolution s_c of the drawdown measurement
    pub fn new(
        transmissivity: f64,
        storativity: f64,
        rate: f64,
        pumping_duration: f64,
        resolution: f64,
    ) -> Result<Self, RadiusError> {
        if !(transmissivity > 0.0) {
            return Err(RadiusError::Domain("transmissivity must be positive"));
        }
        if !(storativity > 0.0) {
            return Err(RadiusError::Domain("storativity must be positive"));
        }
        if !(rate > 0.0) {
            return Err(RadiusError::Domain("rate must be positive"));
        }
        if !(pumping_duration > 0.0) {
            return Err(RadiusError::Domain("pumping duration must be positive"));
        }
        if !(resolution > 0.0) {
            return Err(RadiusError::Domain("resolution must be positive"));
        }
        Ok(RecoveryInvestigation {
            pumping_duration,
            resolution_star: 4.0 * PI * transmissivity * resolution / rate,
            radius_pumping: f64::sqrt(transmissivity * pumping_duration / storativity),
        })
    }

    /// Calculates the radius of investigation at time dt since pump shutoff
    ///
    /// Returns zero once dt reaches the termination time of the recovery test.
    pub fn radius(&self, dt: f64) -> Result<f64, RadiusError> {
        if !(dt >= 0.0) {
            return Err(RadiusError::Domain("dt must be zero or positive"));
        }
        if dt == 0.0 {
            // limit t* → 1⁺: the image-well term vanishes
            let rs2 = inverse_well_function(self.resolution_star)?;
            return Ok(f64::sqrt(rs2) * self.radius_pumping);
        }
        // the barrier effect cannot exceed ln(t*/(t*-1)); past the
        // termination time the relation has no root anywhere
        if dt >= self.time_of_termination() {
            return Ok(0.0);
        }
        let ts = (self.pumping_duration + dt) / self.pumping_duration;
        let sc_star = self.resolution_star;
        let args = &mut 0;
        let solver = RootFinder::new();
        let (root, _) = solver
            .brent(1e-12, 1e3, args, |rs, _| Ok(barrier_effect(rs, ts)? - sc_star))
            .map_err(RadiusError::Convergence)?;
        Ok(root * self.radius_pumping)
    }

    /// Calculates the radius of investigation for a series of times since shutoff
    ///
    /// Returns one radius per entry of `dts`, in the same order.
    pub fn radius_series(&self, dts: &[f64]) -> Result<Vec<f64>, RadiusError> {
        dts.iter().map(|&dt| self.radius(dt)).collect()
    }

    /// Calculates the time since shutoff at which the radius of investigation is maximum
    pub fn time_of_maximum(&self) -> Result<f64, RadiusError> {
        let ts = self.calc_ts_max()?;
        Ok((ts - 1.0) * self.pumping_duration)
    }

    /// Calculates the maximum radius of investigation reached during recovery
    pub fn maximum_radius(&self) -> Result<f64, RadiusError> {
        let ts = self.calc_ts_max()?;
        let rs = f64::sqrt(ts * (ts - 1.0) * f64::ln(ts / (ts - 1.0)));
        Ok(rs * self.radius_pumping)
    }

    /// Calculates the time since shutoff at which the radius of investigation returns to zero
    ///
    /// At termination the residual barrier effect falls below the apparent
    /// resolution everywhere; the recovery test may be considered over. From
    /// `ln(t*/(t*-1)) = s_c*` follows the closed form `Δt_end = t_p / (exp(s_c*) - 1)`.
    pub fn time_of_termination(&self) -> f64 {
        self.pumping_duration / (f64::exp(self.resolution_star) - 1.0)
    }

    /// Finds the dimensionless time at which the radius of investigation peaks
    fn calc_ts_max(&self) -> Result<f64, RadiusError> {
        let sc_star = self.resolution_star;
        let args = &mut 0;
        let solver = RootFinder::new();
        let (root, _) = solver
            .brent(1.0 + 1e-10, 1e5, args, |ts, _| {
                let log_ratio = f64::ln(ts / (ts - 1.0));
                Ok(e1((ts - 1.0) * log_ratio)? - e1(ts * log_ratio)? - sc_star)
            })
            .map_err(RadiusError::Convergence)?;
        Ok(root)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::RecoveryInvestigation;
    use crate::RadiusError;
    use russell_lab::approx_eq;

    // parameters of the recovery worked example of Bresciani et al. (2020)
    const T: f64 = 10.0;
    const S: f64 = 1e-4;
    const Q: f64 = 100.0;
    const TP: f64 = 1.0;
    const SC: f64 = 0.01;

    #[test]
    fn new_captures_invalid_inputs() {
        assert_eq!(
            RecoveryInvestigation::new(0.0, S, Q, TP, SC).err(),
            Some(RadiusError::Domain("transmissivity must be positive"))
        );
        assert_eq!(
            RecoveryInvestigation::new(T, 0.0, Q, TP, SC).err(),
            Some(RadiusError::Domain("storativity must be positive"))
        );
        assert_eq!(
            RecoveryInvestigation::new(T, S, 0.0, TP, SC).err(),
            Some(RadiusError::Domain("rate must be positive"))
        );
        assert_eq!(
            RecoveryInvestigation::new(T, S, Q, 0.0, SC).err(),
            Some(RadiusError::Domain("pumping duration must be positive"))
        );
        assert_eq!(
            RecoveryInvestigation::new(T, S, Q, TP, -0.01).err(),
            Some(RadiusError::Domain("resolution must be positive"))
        );
    }

    #[test]
    fn radius_captures_negative_time() {
        let ana = RecoveryInvestigation::new(T, S, Q, TP, SC).unwrap();
        assert_eq!(
            ana.radius(-0.1).err(),
            Some(RadiusError::Domain("dt must be zero or positive"))
        );
        assert_eq!(
            ana.radius(f64::NAN).err(),
            Some(RadiusError::Domain("dt must be zero or positive"))
        );
    }

    #[test]
    fn radius_is_correct() {
        let ana = RecoveryInvestigation::new(T, S, Q, TP, SC).unwrap();
        // at shutoff the relation reduces to E1(r*²) = s_c*
        approx_eq(ana.radius(0.0).unwrap(), 550.4199460464754, 1e-4);
        approx_eq(ana.radius(1e-4).unwrap(), 550.4474663557879, 1e-4);
        approx_eq(ana.radius(0.5).unwrap(), 674.0451427207878, 1e-4);
    }

    #[test]
    fn maximum_and_termination_are_correct() {
        let ana = RecoveryInvestigation::new(T, S, Q, TP, SC).unwrap();
        let dt_max = ana.time_of_maximum().unwrap();
        approx_eq(dt_max, 28.779185234927084, 1e-5);
        let r_max = ana.maximum_radius().unwrap();
        approx_eq(r_max, 1710.9498115639426, 1e-4);
        // the radius at the peak time must equal the peak radius
        approx_eq(ana.radius(dt_max).unwrap(), r_max, 1e-4);
        approx_eq(ana.time_of_termination(), 79.07851874074277, 1e-8);
    }

    #[test]
    fn radius_vanishes_after_termination() {
        let ana = RecoveryInvestigation::new(T, S, Q, TP, SC).unwrap();
        let dt_end = ana.time_of_termination();
        assert_eq!(ana.radius(dt_end).unwrap(), 0.0);
        assert_eq!(ana.radius(2.0 * dt_end).unwrap(), 0.0);
        // shortly before termination the radius is small but positive
        let r = ana.radius(0.999 * dt_end).unwrap();
        assert!(r > 0.0 && r < 100.0);
    }

    #[test]
    fn radius_series_rises_then_falls() {
        let ana = RecoveryInvestigation::new(T, S, Q, TP, SC).unwrap();
        let dt_max = ana.time_of_maximum().unwrap();
        let before: Vec<f64> = (0..10).map(|i| dt_max * (i as f64) / 10.0).collect();
        let radii = ana.radius_series(&before).unwrap();
        assert_eq!(radii.len(), before.len());
        for pair in radii.windows(2) {
            assert!(pair[1] >= pair[0], "radius must rise before the peak");
        }
        let after: Vec<f64> = (0..10)
            .map(|i| dt_max + (ana.time_of_termination() - dt_max) * (i as f64) / 10.0)
            .collect();
        let radii = ana.radius_series(&after).unwrap();
        for pair in radii.windows(2) {
            assert!(pair[1] <= pair[0], "radius must fall after the peak");
        }
    }
}
