//! Military grid reference (MGR) helpers.
//!
//! Grid references arrive as digit pairs at 100m resolution
//! (`"100 100"`) and are stored in kilometers. Bearings are grid
//! bearings in mils, 6400 to the full circle, north = 0.

mod error;

pub use crate::error::MgrError;
use geo::{algorithm::EuclideanDistance, Point};
use std::{fmt, str::FromStr};

/// Mils in a full circle.
const MILS_PER_REV: f64 = 6400.0;

/// Conversion from radians to mils.
const MILS_PER_RADIAN: f64 = MILS_PER_REV / std::f64::consts::TAU;

/// Grid value (100m units) per kilometer.
const GRID_PER_KM: f64 = 10.0;

/// One grid reference, in kilometers east/north of the grid origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mgr(Point<f64>);

impl Mgr {
    pub fn new(easting_km: f64, northing_km: f64) -> Self {
        Self(Point::new(easting_km, northing_km))
    }

    pub fn easting_km(&self) -> f64 {
        self.0.x()
    }

    pub fn northing_km(&self) -> f64 {
        self.0.y()
    }

    /// Straight-line distance to `other`, in kilometers.
    pub fn distance(&self, other: &Mgr) -> f64 {
        self.0.euclidean_distance(&other.0)
    }

    /// Grid bearing to `other` in mils `[0, 6400)`.
    ///
    /// A zero-length baseline points north. Bearings along a grid axis
    /// skip the arctangent so the cardinal values stay exact.
    pub fn azimuth_mils(&self, other: &Mgr) -> f64 {
        let d_east = other.0.x() - self.0.x();
        let d_north = other.0.y() - self.0.y();

        if d_east == 0.0 {
            return if d_north >= 0.0 {
                0.0
            } else {
                MILS_PER_REV / 2.0
            };
        }
        if d_north == 0.0 {
            return if d_east > 0.0 {
                MILS_PER_REV / 4.0
            } else {
                MILS_PER_REV * 3.0 / 4.0
            };
        }

        let mils = d_east.atan2(d_north) * MILS_PER_RADIAN;
        if mils < 0.0 {
            mils + MILS_PER_REV
        } else {
            mils
        }
    }
}

impl fmt::Display for Mgr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0} {:.0}",
            self.0.x() * GRID_PER_KM,
            self.0.y() * GRID_PER_KM
        )
    }
}

impl FromStr for Mgr {
    type Err = MgrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let numbers = parse_grid_numbers(s, 2)?;
        Ok(Self::new(numbers[0], numbers[1]))
    }
}

/// Parses the four-number `"100 100\n200 200"` form into a pair of
/// grid references. Any whitespace separates the numbers.
pub fn parse_pair(s: &str) -> Result<(Mgr, Mgr), MgrError> {
    let numbers = parse_grid_numbers(s, 4)?;
    Ok((
        Mgr::new(numbers[0], numbers[1]),
        Mgr::new(numbers[2], numbers[3]),
    ))
}

/// Splits `s` into exactly `expected` whitespace-separated grid
/// numbers, converting raw 100m grid digits to kilometers.
fn parse_grid_numbers(s: &str, expected: usize) -> Result<Vec<f64>, MgrError> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    if tokens.len() != expected {
        return Err(MgrError::TokenCount {
            expected,
            found: tokens.len(),
        });
    }
    tokens
        .iter()
        .map(|token| {
            token
                .parse::<f64>()
                .map(|raw| raw / GRID_PER_KM)
                .map_err(|_| MgrError::Number((*token).to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_pair, Mgr};
    use assert_approx_eq::assert_approx_eq;

    fn mgr(s: &str) -> Mgr {
        s.parse().unwrap()
    }

    #[test]
    fn test_cardinal_azimuths_are_exact() {
        let origin = mgr("100 100");
        assert_eq!(origin.azimuth_mils(&mgr("100 200")), 0.0); // North
        assert_eq!(origin.azimuth_mils(&mgr("200 100")), 1600.0); // East
        assert_eq!(origin.azimuth_mils(&mgr("100 0")), 3200.0); // South
        assert_eq!(origin.azimuth_mils(&mgr("0 100")), 4800.0); // West
    }

    #[test]
    fn test_diagonal_azimuths() {
        let origin = mgr("100 100");
        assert_approx_eq!(origin.azimuth_mils(&mgr("200 200")), 800.0); // North-east
        assert_approx_eq!(origin.azimuth_mils(&mgr("150 50")), 2400.0); // South-east
        assert_approx_eq!(origin.azimuth_mils(&mgr("50 50")), 4000.0); // South-west
        assert_approx_eq!(origin.azimuth_mils(&mgr("50 150")), 5600.0); // North-west
    }

    #[test]
    fn test_azimuth_to_self_is_north() {
        let origin = mgr("100 100");
        assert_eq!(origin.azimuth_mils(&origin), 0.0);
    }

    #[test]
    fn test_distance() {
        let a = mgr("100 100");
        let b = mgr("200 200");
        // 10km east and 10km north.
        assert_approx_eq!(a.distance(&b), 200.0_f64.sqrt());
        assert_eq!(a.distance(&b), b.distance(&a));
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_parsing() {
        let point = mgr("123 456");
        assert_approx_eq!(point.easting_km(), 12.3);
        assert_approx_eq!(point.northing_km(), 45.6);
        assert_eq!(point.to_string(), "123 456");

        let (a, b) = parse_pair("100 100\n200 200").unwrap();
        assert_eq!(a, mgr("100 100"));
        assert_eq!(b, mgr("200 200"));

        assert!("100".parse::<Mgr>().is_err());
        assert!("100 abc".parse::<Mgr>().is_err());
        assert!(parse_pair("100 100 200").is_err());
    }
}
