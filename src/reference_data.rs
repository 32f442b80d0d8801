use russell_lab::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds reference radii of influence for comparisons and tests
#[derive(Serialize, Deserialize)]
pub struct InfluenceReference {
    pub absolute_drawdown: f64,
    pub relative_drawdown: f64,
    pub relative_flow: f64,
    pub relative_volume: f64,
    pub quasi_steady: f64,
    pub jones: f64,
    pub closed_reservoir: f64,
    pub impulse_peak: f64,
    pub log_regime: f64,
}

/// Holds reference radii of investigation for comparisons and tests
#[derive(Serialize, Deserialize)]
pub struct InvestigationReference {
    pub absolute_drawdown_diff: f64,
    pub absolute_derivative_diff: f64,
    pub relative_drawdown_diff: f64,
    pub relative_derivative_diff: f64,
    pub relative_drawdown_average: f64,
    pub relative_derivative_average: f64,
    pub barrier_regime_linear: f64,
    pub barrier_regime_log: f64,
    pub constant_head: f64,
    pub closed_reservoir: f64,
    pub linear_barrier: f64,
    pub impulse_peak: f64,
}

/// Holds a reference drawdown-phase scenario with the radii of all criteria
#[derive(Serialize, Deserialize)]
pub struct DrawdownReference {
    pub transmissivity: f64,
    pub storativity: f64,
    pub time: f64,
    pub rate: f64,
    pub well_radius: f64,
    pub drawdown_threshold: f64,
    pub relative_threshold: f64,
    pub confidence: f64,
    pub window: f64,
    pub influence: InfluenceReference,
    pub investigation: InvestigationReference,
}

/// Holds a reference recovery-phase scenario with radii at selected times
#[derive(Serialize, Deserialize)]
pub struct RecoveryReference {
    pub transmissivity: f64,
    pub storativity: f64,
    pub rate: f64,
    pub pumping_duration: f64,
    pub resolution: f64,
    pub radius_at_shutoff: f64,
    pub times: Vec<f64>, // elapsed times since shutoff
    pub radii: Vec<f64>, // radius of investigation at each entry of times
    pub time_of_maximum: f64,
    pub maximum_radius: f64,
    pub time_of_termination: f64,
}

macro_rules! impl_json_io {
    ($struct_name:ident) => {
        impl $struct_name {
            /// Reads a JSON file containing the reference results
            ///
            /// # Input
            ///
            /// * `full_path` -- may be a String, &str, or Path
            pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
            where
                P: AsRef<OsStr> + ?Sized,
            {
                let path = Path::new(full_path).to_path_buf();
                let file = File::open(&path).map_err(|_| "file not found")?;
                let reader = BufReader::new(file);
                let data = serde_json::from_reader(reader).map_err(|_| "deserialize failed")?;
                Ok(data)
            }

            /// Writes a JSON file with the reference results
            ///
            /// # Input
            ///
            /// * `full_path` -- may be a String, &str, or Path
            pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
            where
                P: AsRef<OsStr> + ?Sized,
            {
                let path = Path::new(full_path).to_path_buf();
                if let Some(p) = path.parent() {
                    fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
                }
                let mut file = File::create(&path).map_err(|_| "cannot create file")?;
                serde_json::to_writer_pretty(&mut file, &self).map_err(|_| "cannot write file")?;
                Ok(())
            }
        }
    };
}

impl_json_io!(DrawdownReference);
impl_json_io!(RecoveryReference);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{DrawdownReference, RecoveryReference};

    #[test]
    fn drawdown_reference_works() {
        let reference = DrawdownReference::read_json("data/results/bresciani_2020_drawdown.json").unwrap();
        assert!(reference.transmissivity > 0.0);
        assert!(reference.influence.quasi_steady > 0.0);
        assert!(reference.investigation.impulse_peak > 0.0);
    }

    #[test]
    fn recovery_reference_works() {
        let reference = RecoveryReference::read_json("data/results/bresciani_2020_recovery.json").unwrap();
        assert_eq!(reference.times.len(), reference.radii.len());
        assert!(reference.maximum_radius > reference.radius_at_shutoff);
    }

    #[test]
    fn read_json_captures_missing_file() {
        assert_eq!(
            DrawdownReference::read_json("data/results/__does_not_exist__.json").err(),
            Some("file not found")
        );
    }
}
