use crate::{error::LinkBudgetError, fresnel::Regime};
use std::fmt;

/// Which closed-form expression produced the effective path loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formula {
    FreeSpace,
    PlaneEarth,
    FreeSpacePlusSlope,
    PlaneEarthPlusSlope,
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FreeSpace => write!(f, "FSL"),
            Self::PlaneEarth => write!(f, "PEL"),
            Self::FreeSpacePlusSlope => write!(f, "FSL + SL"),
            Self::PlaneEarthPlusSlope => write!(f, "PEL + SL"),
        }
    }
}

/// Free-space loss in dB for km distance and MHz frequency.
pub fn free_space_loss_db(freq_mhz: f64, total_km: f64) -> f64 {
    20.0 * (41.87 * freq_mhz * total_km).log10()
}

/// Plane-earth loss in dB.
///
/// Undefined for a zero antenna height; use [`compute_epl`] for the
/// checked form.
pub fn plane_earth_loss_db(total_km: f64, tx_height_m: f64, rx_height_m: f64) -> f64 {
    115.11 + 40.0 * total_km.log10() - 20.0 * (tx_height_m * rx_height_m).log10()
}

/// Diffraction slope loss over a free-space baseline.
fn free_space_slope_db(height_m: f64, d1_km: f64, freq_mhz: f64) -> f64 {
    19.22 * height_m.log10() - 9.5 * d1_km.log10() + 10.0 * freq_mhz.log10() - 41.84
}

/// Diffraction slope loss over a plane-earth baseline.
fn plane_earth_slope_db(height_m: f64, d1_km: f64, freq_mhz: f64) -> f64 {
    20.3 * height_m.log10() - 20.0 * d1_km.log10() + 10.0 * freq_mhz.log10() - 40.0
}

/// Effective path loss for the given obstruction regime.
///
/// Plane-earth loss is only evaluated on the branches that need it, so
/// a clear path with a ground-level antenna is still well defined.
pub fn compute_epl(
    regime: Regime,
    d1_km: f64,
    height_m: f64,
    freq_mhz: f64,
    total_km: f64,
    tx_height_m: f64,
    rx_height_m: f64,
) -> Result<(f64, Formula), LinkBudgetError> {
    let fsl = free_space_loss_db(freq_mhz, total_km);
    match regime {
        Regime::BelowFresnel => Ok((fsl, Formula::FreeSpace)),
        Regime::WithinFresnel => {
            let pel = checked_pel(total_km, tx_height_m, rx_height_m)?;
            Ok((pel, Formula::PlaneEarth))
        }
        Regime::BlocksLos => {
            let pel = checked_pel(total_km, tx_height_m, rx_height_m)?;
            if height_m <= 0.0 || d1_km <= 0.0 {
                return Err(LinkBudgetError::DegenerateGeometry(
                    "slope loss needs a positive obstacle height and distance",
                ));
            }
            if fsl > pel {
                Ok((
                    fsl + free_space_slope_db(height_m, d1_km, freq_mhz),
                    Formula::FreeSpacePlusSlope,
                ))
            } else {
                Ok((
                    pel + plane_earth_slope_db(height_m, d1_km, freq_mhz),
                    Formula::PlaneEarthPlusSlope,
                ))
            }
        }
    }
}

fn checked_pel(
    total_km: f64,
    tx_height_m: f64,
    rx_height_m: f64,
) -> Result<f64, LinkBudgetError> {
    if tx_height_m * rx_height_m <= 0.0 {
        return Err(LinkBudgetError::ZeroAntennaHeight);
    }
    Ok(plane_earth_loss_db(total_km, tx_height_m, rx_height_m))
}

#[cfg(test)]
mod tests {
    use super::{compute_epl, free_space_loss_db, plane_earth_loss_db, Formula};
    use crate::{error::LinkBudgetError, fresnel::Regime};
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_free_space_loss() {
        assert_approx_eq!(
            free_space_loss_db(610.0, 10.0),
            20.0 * (41.87_f64 * 610.0 * 10.0).log10()
        );
    }

    #[test]
    fn test_plane_earth_loss() {
        assert_approx_eq!(
            plane_earth_loss_db(10.0, 30.0, 30.0),
            115.11 + 40.0 - 20.0 * 900.0_f64.log10()
        );
    }

    #[test]
    fn test_below_fresnel_is_free_space() {
        let (epl, formula) =
            compute_epl(Regime::BelowFresnel, 0.0, 0.0, 610.0, 10.0, 30.0, 30.0).unwrap();
        assert_approx_eq!(epl, free_space_loss_db(610.0, 10.0));
        assert_eq!(formula, Formula::FreeSpace);
    }

    #[test]
    fn test_within_fresnel_is_plane_earth() {
        let (epl, formula) =
            compute_epl(Regime::WithinFresnel, 5.0, 28.0, 610.0, 10.0, 30.0, 30.0).unwrap();
        assert_approx_eq!(epl, plane_earth_loss_db(10.0, 30.0, 30.0));
        assert_eq!(formula, Formula::PlaneEarth);
    }

    #[test]
    fn test_blocking_adds_slope_to_larger_baseline() {
        let fsl = free_space_loss_db(610.0, 10.0);
        let pel = plane_earth_loss_db(10.0, 30.0, 30.0);
        let (epl, formula) =
            compute_epl(Regime::BlocksLos, 5.0, 40.0, 610.0, 10.0, 30.0, 30.0).unwrap();
        let baseline = fsl.max(pel);
        assert!(epl > baseline);
        match formula {
            Formula::FreeSpacePlusSlope => assert!(fsl > pel),
            Formula::PlaneEarthPlusSlope => assert!(pel >= fsl),
            other => panic!("unexpected formula {other:?}"),
        }
    }

    #[test]
    fn test_zero_antenna_height_rejected_when_pel_needed() {
        let err =
            compute_epl(Regime::WithinFresnel, 5.0, 28.0, 610.0, 10.0, 0.0, 30.0).unwrap_err();
        assert!(matches!(err, LinkBudgetError::ZeroAntennaHeight));

        // Free-space branch never touches PEL.
        assert!(compute_epl(Regime::BelowFresnel, 5.0, 1.0, 610.0, 10.0, 0.0, 30.0).is_ok());
    }

    #[test]
    fn test_degenerate_slope_inputs_rejected() {
        let err = compute_epl(Regime::BlocksLos, 0.0, 40.0, 610.0, 10.0, 30.0, 30.0).unwrap_err();
        assert!(matches!(err, LinkBudgetError::DegenerateGeometry(_)));
    }
}
