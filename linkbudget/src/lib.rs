//! # Radio Link Budgeting
//!
//! `linkbudget` estimates whether a point-to-point radio link survives
//! the terrain between two ground stations.
//!
//! Obstacles along the path are reduced to a single dominant effective
//! obstacle, corrected for earth curvature, and classified against the
//! line of sight and 0.6 of the first Fresnel zone. The classification
//! selects one of three closed-form path-loss expressions, and the
//! resulting effective path loss is weighed against the radio class's
//! allowable path loss to produce a fade-margin verdict.

mod error;
pub mod fresnel;
pub mod loss;
pub mod obstacle;
pub mod profile;
pub mod radio;

pub use crate::{
    error::LinkBudgetError,
    fresnel::{classify, Clearance, Regime},
    loss::{compute_epl, free_space_loss_db, plane_earth_loss_db, Formula},
    obstacle::{apply_curvature, reduce_obstacles, EffectiveObstacle, Obstacle},
    profile::{LinkBudget, LinkBudgetBuilder},
    radio::{evaluate_budget, Radio, Verdict, VIABLE_FADE_MARGIN_DB},
};
