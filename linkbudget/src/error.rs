use crate::radio::Radio;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkBudgetError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("obstacle at {distance_km}km is not strictly between the nodes (0, {total_km})km")]
    InvalidObstacleDistance { distance_km: f64, total_km: f64 },

    #[error("{freq_mhz}MHz is not a valid channel for the {radio} radio")]
    InvalidFrequency { freq_mhz: f64, radio: Radio },

    #[error("unknown radio type '{0}'")]
    UnknownRadio(String),

    #[error("plane-earth loss is undefined for a zero antenna height")]
    ZeroAntennaHeight,

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
}
