/// First Fresnel zone radius coefficient for km distances, MHz
/// frequency, and meter radius.
const FRESNEL_COEFF: f64 = 548.0;

/// Fraction of the first Fresnel zone that must stay clear.
const CLEARANCE_FRACTION: f64 = 0.6;

/// How badly the dominant obstacle intrudes on the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Clear of 0.6 of the first Fresnel zone.
    BelowFresnel,
    /// Inside 0.6 of the first Fresnel zone, but below the line of
    /// sight.
    WithinFresnel,
    /// Above the line of sight.
    BlocksLos,
}

/// Obstruction severity of one obstacle relative to the line of sight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clearance {
    /// Height of the line of sight over the obstacle.
    pub los_height_m: f64,
    /// 0.6 of the first Fresnel zone radius at the obstacle.
    pub fresnel_clearance_m: f64,
    pub regime: Regime,
}

/// Classifies the corrected obstacle height `height_m` at distances
/// `d1`/`d2` from the transmitter/receiver against the line of sight
/// joining the antennas and the 0.6 first-Fresnel-zone clearance.
///
/// Both boundaries are strict: an obstacle exactly on the clearance
/// height or exactly on the line of sight classifies as
/// [`Regime::WithinFresnel`].
pub fn classify(
    d1_km: f64,
    d2_km: f64,
    tx_height_m: f64,
    rx_height_m: f64,
    total_km: f64,
    height_m: f64,
    freq_mhz: f64,
) -> Clearance {
    let los_height_m = if rx_height_m > tx_height_m {
        (rx_height_m - tx_height_m) * d1_km / total_km + tx_height_m
    } else if tx_height_m > rx_height_m {
        (tx_height_m - rx_height_m) * d2_km / total_km + rx_height_m
    } else {
        tx_height_m
    };

    let fresnel_clearance_m =
        CLEARANCE_FRACTION * FRESNEL_COEFF * (d1_km * d2_km / freq_mhz / total_km).sqrt();

    let regime = if height_m < los_height_m - fresnel_clearance_m {
        Regime::BelowFresnel
    } else if height_m > los_height_m {
        Regime::BlocksLos
    } else {
        Regime::WithinFresnel
    };

    Clearance {
        los_height_m,
        fresnel_clearance_m,
        regime,
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, Regime};
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_los_interpolates_towards_taller_antenna() {
        // Receiver taller: LOS climbs from tx along d1.
        let clearance = classify(2.0, 8.0, 10.0, 50.0, 10.0, 0.0, 600.0);
        assert_approx_eq!(clearance.los_height_m, (50.0 - 10.0) * 2.0 / 10.0 + 10.0);

        // Transmitter taller: mirrored, measured back from the receiver.
        let clearance = classify(2.0, 8.0, 50.0, 10.0, 10.0, 0.0, 600.0);
        assert_approx_eq!(clearance.los_height_m, (50.0 - 10.0) * 8.0 / 10.0 + 10.0);

        // Level antennas.
        let clearance = classify(2.0, 8.0, 30.0, 30.0, 10.0, 0.0, 600.0);
        assert_eq!(clearance.los_height_m, 30.0);
    }

    #[test]
    fn test_fresnel_radius_midpath() {
        let clearance = classify(5.0, 5.0, 30.0, 30.0, 10.0, 0.0, 610.0);
        let expected = 0.6 * 548.0 * (5.0_f64 * 5.0 / 610.0 / 10.0).sqrt();
        assert_approx_eq!(clearance.fresnel_clearance_m, expected);
    }

    #[test]
    fn test_regimes() {
        // Well below the clearance height.
        let clearance = classify(5.0, 5.0, 30.0, 30.0, 10.0, 1.0, 610.0);
        assert_eq!(clearance.regime, Regime::BelowFresnel);

        // Between clearance and LOS.
        let clearance = classify(5.0, 5.0, 30.0, 30.0, 10.0, 29.0, 610.0);
        assert_eq!(clearance.regime, Regime::WithinFresnel);

        // Above LOS.
        let clearance = classify(5.0, 5.0, 30.0, 30.0, 10.0, 31.0, 610.0);
        assert_eq!(clearance.regime, Regime::BlocksLos);
    }

    /// Ties resolve to the less severe branch on both boundaries.
    #[test]
    fn test_regime_boundaries_are_strict() {
        // Exactly on the line of sight: not blocking.
        let on_los = classify(5.0, 5.0, 30.0, 30.0, 10.0, 30.0, 610.0);
        assert_eq!(on_los.regime, Regime::WithinFresnel);

        // Exactly on the clearance height: not below.
        let probe = classify(5.0, 5.0, 30.0, 30.0, 10.0, 0.0, 610.0);
        let ffz_height = probe.los_height_m - probe.fresnel_clearance_m;
        let on_clearance = classify(5.0, 5.0, 30.0, 30.0, 10.0, ffz_height, 610.0);
        assert_eq!(on_clearance.regime, Regime::WithinFresnel);
    }
}
