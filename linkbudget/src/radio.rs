use crate::error::LinkBudgetError;
use std::{fmt, str::FromStr};

/// Fade margin a link must exceed, in dB, before it is called through.
pub const VIABLE_FADE_MARGIN_DB: f64 = 20.0;

/// Accepted deviation from the channel raster, in MHz.
const CHANNEL_TOLERANCE_MHZ: f64 = 1e-6;

/// Fixed RF characteristics of one radio class.
///
/// The same antenna and cable are assumed at both ends of the link.
/// Receiver sensitivity is taken at 2048 kbps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkParams {
    pub tx_power_dbm: f64,
    pub antenna_gain_dbi: f64,
    pub cable_loss_db: f64,
    pub rx_sensitivity_dbm: f64,
    /// Lowest and highest tunable frequency.
    pub band_mhz: (f64, f64),
    pub channel_step_mhz: f64,
}

const R406_PARAMS: LinkParams = LinkParams {
    tx_power_dbm: 40.0,
    antenna_gain_dbi: 15.0,
    cable_loss_db: 9.0,
    rx_sensitivity_dbm: -82.0,
    band_mhz: (225.0, 1999.75),
    channel_step_mhz: 0.25,
};

const R408_PARAMS: LinkParams = LinkParams {
    tx_power_dbm: 36.0,
    antenna_gain_dbi: 20.0,
    cable_loss_db: 2.4,
    rx_sensitivity_dbm: -82.0,
    band_mhz: (225.0, 2499.95),
    channel_step_mhz: 0.05,
};

/// Supported radio classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radio {
    R406,
    R408,
}

impl Radio {
    pub const ALL: [Radio; 2] = [Radio::R406, Radio::R408];

    pub fn params(self) -> &'static LinkParams {
        match self {
            Self::R406 => &R406_PARAMS,
            Self::R408 => &R408_PARAMS,
        }
    }

    /// Allowable path loss between the antennas.
    pub fn allowable_path_loss_db(self) -> f64 {
        let params = self.params();
        params.tx_power_dbm + 2.0 * params.antenna_gain_dbi
            - 2.0 * params.cable_loss_db
            - params.rx_sensitivity_dbm
    }

    /// True when `freq_mhz` falls inside this class's band on its
    /// channel raster.
    pub fn valid_freq(self, freq_mhz: f64) -> bool {
        let params = self.params();
        let (lo, hi) = params.band_mhz;
        if freq_mhz < lo || freq_mhz > hi {
            return false;
        }
        let channels = (freq_mhz - lo) / params.channel_step_mhz;
        (channels - channels.round()).abs() * params.channel_step_mhz < CHANNEL_TOLERANCE_MHZ
    }
}

impl fmt::Display for Radio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::R406 => write!(f, "406"),
            Self::R408 => write!(f, "408"),
        }
    }
}

impl FromStr for Radio {
    type Err = LinkBudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "406" => Ok(Self::R406),
            "408" => Ok(Self::R408),
            other => Err(LinkBudgetError::UnknownRadio(other.to_string())),
        }
    }
}

/// Outcome of weighing an effective path loss against a radio class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    /// Allowable path loss for the radio class.
    pub apl_db: f64,
    pub fade_margin_db: f64,
    /// Strictly more than [`VIABLE_FADE_MARGIN_DB`] of margin.
    pub viable: bool,
}

/// Forms the fade-margin verdict for `epl_db` on the given radio.
pub fn evaluate_budget(radio: Radio, epl_db: f64) -> Verdict {
    let apl_db = radio.allowable_path_loss_db();
    let fade_margin_db = apl_db - epl_db;
    Verdict {
        apl_db,
        fade_margin_db,
        viable: fade_margin_db > VIABLE_FADE_MARGIN_DB,
    }
}

#[cfg(test)]
mod tests {
    use super::{evaluate_budget, Radio};
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_allowable_path_loss() {
        assert_approx_eq!(Radio::R406.allowable_path_loss_db(), 134.0);
        assert_approx_eq!(Radio::R408.allowable_path_loss_db(), 153.2);
    }

    #[test]
    fn test_margin_of_exactly_20db_is_not_viable() {
        let verdict = evaluate_budget(Radio::R406, 114.0);
        assert_eq!(verdict.fade_margin_db, 20.0);
        assert!(!verdict.viable);

        let verdict = evaluate_budget(Radio::R406, 113.9999);
        assert!(verdict.fade_margin_db > 20.0);
        assert!(verdict.viable);
    }

    #[test]
    fn test_channel_raster() {
        assert!(Radio::R406.valid_freq(610.0));
        assert!(Radio::R406.valid_freq(225.25));
        assert!(!Radio::R406.valid_freq(610.1));
        assert!(!Radio::R406.valid_freq(224.75));
        assert!(!Radio::R406.valid_freq(2000.0));

        assert!(Radio::R408.valid_freq(610.1));
        assert!(Radio::R408.valid_freq(2499.95));
        assert!(!Radio::R408.valid_freq(610.07));
        assert!(!Radio::R408.valid_freq(2500.0));
    }

    #[test]
    fn test_radio_round_trips_through_str() {
        for radio in Radio::ALL {
            assert_eq!(radio.to_string().parse::<Radio>().unwrap(), radio);
        }
        assert!("407".parse::<Radio>().is_err());
    }
}
