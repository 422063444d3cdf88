use crate::{
    error::LinkBudgetError,
    fresnel::{classify, Regime},
    loss::{compute_epl, Formula},
    obstacle::{apply_curvature, reduce_obstacles, EffectiveObstacle, Obstacle},
    radio::{evaluate_budget, Radio},
};
use log::debug;

/// Complete path-loss budget for one link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkBudget {
    /// Dominant effective obstacle after earth-curvature correction.
    pub obstacle: EffectiveObstacle,
    /// Height of the line of sight over the obstacle.
    pub los_height_m: f64,
    /// 0.6 of the first Fresnel zone radius at the obstacle.
    pub fresnel_clearance_m: f64,
    pub regime: Regime,
    /// Which loss expression produced `epl_db`.
    pub formula: Formula,
    /// Effective path loss.
    pub epl_db: f64,
    /// Allowable path loss for the radio class.
    pub apl_db: f64,
    pub fade_margin_db: f64,
    pub viable: bool,
}

impl LinkBudget {
    pub fn builder() -> LinkBudgetBuilder {
        LinkBudgetBuilder {
            radio: None,
            freq_mhz: None,
            distance_km: None,
            tx_height_m: None,
            rx_height_m: None,
            obstacles: Vec::new(),
        }
    }
}

pub struct LinkBudgetBuilder {
    /// Radio class (required).
    radio: Option<Radio>,

    /// Transmitting frequency in MHz (required).
    freq_mhz: Option<f64>,

    /// Path length between the nodes in km (required).
    distance_km: Option<f64>,

    /// Transmitting antenna height in meters (required).
    tx_height_m: Option<f64>,

    /// Receiving antenna height in meters (required).
    rx_height_m: Option<f64>,

    /// Obstacles between the nodes, in no particular order.
    obstacles: Vec<Obstacle>,
}

impl LinkBudgetBuilder {
    /// Radio class (required).
    #[must_use]
    pub fn radio(mut self, radio: Radio) -> Self {
        self.radio = Some(radio);
        self
    }

    /// Transmitting frequency in MHz (required).
    #[must_use]
    pub fn freq_mhz(mut self, freq_mhz: f64) -> Self {
        self.freq_mhz = Some(freq_mhz);
        self
    }

    /// Path length between the nodes in km (required).
    #[must_use]
    pub fn distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }

    /// Transmitting antenna height in meters (required).
    #[must_use]
    pub fn tx_height(mut self, meters: f64) -> Self {
        self.tx_height_m = Some(meters);
        self
    }

    /// Receiving antenna height in meters (required).
    #[must_use]
    pub fn rx_height(mut self, meters: f64) -> Self {
        self.rx_height_m = Some(meters);
        self
    }

    /// Adds one obstacle.
    #[must_use]
    pub fn obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    /// Adds every obstacle in `obstacles`.
    #[must_use]
    pub fn obstacles<I>(mut self, obstacles: I) -> Self
    where
        I: IntoIterator<Item = Obstacle>,
    {
        self.obstacles.extend(obstacles);
        self
    }

    /// Validates the inputs and runs the full reduction, classification
    /// and loss pipeline.
    pub fn build(&self) -> Result<LinkBudget, LinkBudgetError> {
        let radio = self.radio.ok_or(LinkBudgetError::Builder("radio"))?;
        let freq_mhz = self.freq_mhz.ok_or(LinkBudgetError::Builder("freq_mhz"))?;
        let distance_km = self
            .distance_km
            .ok_or(LinkBudgetError::Builder("distance_km"))?;
        let tx_height_m = self
            .tx_height_m
            .ok_or(LinkBudgetError::Builder("tx_height"))?;
        let rx_height_m = self
            .rx_height_m
            .ok_or(LinkBudgetError::Builder("rx_height"))?;

        if distance_km <= 0.0 {
            return Err(LinkBudgetError::DegenerateGeometry(
                "path distance must be positive",
            ));
        }
        if !radio.valid_freq(freq_mhz) {
            return Err(LinkBudgetError::InvalidFrequency { freq_mhz, radio });
        }
        for obstacle in &self.obstacles {
            obstacle.validate(distance_km)?;
        }

        let dominant = reduce_obstacles(&self.obstacles, distance_km);
        let corrected = apply_curvature(dominant, distance_km);
        let d1_km = corrected.distance_km;
        let d2_km = distance_km - d1_km;

        let clearance = classify(
            d1_km,
            d2_km,
            tx_height_m,
            rx_height_m,
            distance_km,
            corrected.height_m,
            freq_mhz,
        );
        let (epl_db, formula) = compute_epl(
            clearance.regime,
            d1_km,
            corrected.height_m,
            freq_mhz,
            distance_km,
            tx_height_m,
            rx_height_m,
        )?;
        let verdict = evaluate_budget(radio, epl_db);

        debug!(
            "budget; regime: {:?}, epl: {epl_db:.1}dB, margin: {:.1}dB",
            clearance.regime, verdict.fade_margin_db
        );

        Ok(LinkBudget {
            obstacle: corrected,
            los_height_m: clearance.los_height_m,
            fresnel_clearance_m: clearance.fresnel_clearance_m,
            regime: clearance.regime,
            formula,
            epl_db,
            apl_db: verdict.apl_db,
            fade_margin_db: verdict.fade_margin_db,
            viable: verdict.viable,
        })
    }
}
