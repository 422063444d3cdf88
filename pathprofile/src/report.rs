use linkbudget::{Formula, LinkBudget, Obstacle, Radio};
use mgr::Mgr;
use serde::Serialize;
use std::fmt;

/// Inputs and result of one completed calculation, ready to render.
#[derive(Debug, Clone)]
pub struct Report {
    pub mgrs: Option<(Mgr, Mgr)>,
    pub radio: Radio,
    pub freq_mhz: f64,
    pub distance_km: f64,
    pub tx_height_m: f64,
    pub rx_height_m: f64,
    pub obstacles: Vec<Obstacle>,
    pub budget: LinkBudget,
}

impl Report {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        #[derive(Serialize)]
        struct JsonObstacle {
            distance_km: f64,
            height_m: f64,
        }

        impl From<&Obstacle> for JsonObstacle {
            fn from(obstacle: &Obstacle) -> Self {
                Self {
                    distance_km: obstacle.distance_km,
                    height_m: obstacle.height_m,
                }
            }
        }

        #[derive(Serialize)]
        struct JsonReport {
            mgr1: Option<String>,
            mgr2: Option<String>,
            radio: String,
            freq_mhz: f64,
            distance_km: f64,
            tx_height_m: f64,
            rx_height_m: f64,
            obstacles: Vec<JsonObstacle>,
            effective_obstacle: JsonObstacle,
            los_height_m: f64,
            fresnel_clearance_m: f64,
            regime: String,
            formula: String,
            epl_db: f64,
            apl_db: f64,
            fade_margin_db: f64,
            viable: bool,
        }

        let reshaped = JsonReport {
            mgr1: self.mgrs.map(|(mgr1, _)| mgr1.to_string()),
            mgr2: self.mgrs.map(|(_, mgr2)| mgr2.to_string()),
            radio: self.radio.to_string(),
            freq_mhz: self.freq_mhz,
            distance_km: self.distance_km,
            tx_height_m: self.tx_height_m,
            rx_height_m: self.rx_height_m,
            obstacles: self.obstacles.iter().map(JsonObstacle::from).collect(),
            effective_obstacle: JsonObstacle {
                distance_km: self.budget.obstacle.distance_km,
                height_m: self.budget.obstacle.height_m,
            },
            los_height_m: self.budget.los_height_m,
            fresnel_clearance_m: self.budget.fresnel_clearance_m,
            regime: format!("{:?}", self.budget.regime),
            formula: self.budget.formula.to_string(),
            epl_db: self.budget.epl_db,
            apl_db: self.budget.apl_db,
            fade_margin_db: self.budget.fade_margin_db,
            viable: self.budget.viable,
        };
        serde_json::to_string_pretty(&reshaped)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((mgr1, mgr2)) = &self.mgrs {
            writeln!(f, "MGR 1: {mgr1}")?;
            writeln!(f, "MGR 2: {mgr2}")?;
        }
        writeln!(f, "Distance: {:.1}km", self.distance_km)?;
        writeln!(f, "Radio: {}", self.radio)?;
        writeln!(f, "Frequency: {}MHz", self.freq_mhz)?;
        writeln!(f, "Transmitting height: {}m", self.tx_height_m)?;
        writeln!(f, "Receiving height: {}m", self.rx_height_m)?;

        for (i, obstacle) in self.obstacles.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "Obstacle {}", i + 1)?;
            writeln!(f, "Distance: {:.0}km", obstacle.distance_km)?;
            writeln!(f, "Height: {:.0}m", obstacle.height_m)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "The final calculated obstacle is {:.1}km away from the transmitting node, \
             with a height of {:.1}m",
            self.budget.obstacle.distance_km, self.budget.obstacle.height_m
        )?;
        writeln!(
            f,
            "The height of the LOS over the obstacle is {:.1}m",
            self.budget.los_height_m
        )?;
        writeln!(
            f,
            "0.6 of the first fresnel zone radius is {:.1}m",
            self.budget.fresnel_clearance_m
        )?;

        writeln!(f)?;
        let explanation = match self.budget.formula {
            Formula::FreeSpace => {
                "Since the obstacle is not within 0.6 of the first fresnel zone, EPL = FSL"
            }
            Formula::PlaneEarth => {
                "Since the obstacle is within 0.6 of the first fresnel zone \
                 but does not block the LOS, EPL = PEL"
            }
            Formula::FreeSpacePlusSlope => "Since the obstacle blocks the LOS, EPL = FSL + SL",
            Formula::PlaneEarthPlusSlope => "Since the obstacle blocks the LOS, EPL = PEL + SL",
        };
        writeln!(f, "{explanation}")?;

        writeln!(f)?;
        writeln!(f, "EPL = {:.1}dB", self.budget.epl_db)?;
        writeln!(f, "APL = {}dB", self.budget.apl_db)?;
        writeln!(f, "FM = {:.1}dB", self.budget.fade_margin_db)?;

        writeln!(f)?;
        if self.budget.viable {
            write!(f, "Comms through!!!")
        } else {
            write!(f, "No comms :(")
        }
    }
}
