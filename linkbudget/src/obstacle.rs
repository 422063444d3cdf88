use crate::error::LinkBudgetError;
use log::debug;

/// Divisor encoding effective-earth-radius scaling for km distances
/// and meter heights.
const EARTH_BULGE_DIVISOR: f64 = 12.75;

/// Atmospheric k-factor.
const K_FACTOR: f64 = 0.7;

/// A point obstacle on the path, `distance_km` from the transmitting
/// node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub distance_km: f64,
    pub height_m: f64,
}

impl Obstacle {
    pub fn new(distance_km: f64, height_m: f64) -> Self {
        Self {
            distance_km,
            height_m,
        }
    }

    /// Errors unless the obstacle lies strictly between the nodes.
    ///
    /// The boundary distances are excluded because the pairwise
    /// reduction divides by `distance_km` and `total_km - distance_km`.
    pub fn validate(&self, total_km: f64) -> Result<(), LinkBudgetError> {
        if self.distance_km <= 0.0 || self.distance_km >= total_km {
            return Err(LinkBudgetError::InvalidObstacleDistance {
                distance_km: self.distance_km,
                total_km,
            });
        }
        Ok(())
    }
}

/// An obstacle as the link sees it: either a real obstacle or the
/// crossing point of two obstacle silhouette rays. Its height need not
/// match any physical obstacle's height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveObstacle {
    pub distance_km: f64,
    pub height_m: f64,
}

impl From<Obstacle> for EffectiveObstacle {
    fn from(obstacle: Obstacle) -> Self {
        Self {
            distance_km: obstacle.distance_km,
            height_m: obstacle.height_m,
        }
    }
}

/// Reduces all obstacles on a path to the single dominant effective
/// obstacle.
///
/// Every pair is intersected (transmitter-side ray through the first,
/// receiver-side ray through the second) and a running maximum by
/// height is kept, seeded with the tallest raw obstacle. With zero or
/// one obstacle the result is the tallest given obstacle, or the
/// ground point `(0, 0)` if there are none.
pub fn reduce_obstacles(obstacles: &[Obstacle], total_km: f64) -> EffectiveObstacle {
    let mut dominant = obstacles
        .iter()
        .copied()
        .max_by(|a, b| a.height_m.total_cmp(&b.height_m))
        .map_or(
            EffectiveObstacle {
                distance_km: 0.0,
                height_m: 0.0,
            },
            EffectiveObstacle::from,
        );

    for (i, tx_side) in obstacles.iter().enumerate() {
        for rx_side in &obstacles[i + 1..] {
            if let Some(crossing) = intersect(*tx_side, *rx_side, total_km) {
                if crossing.height_m > dominant.height_m {
                    dominant = crossing;
                }
            }
        }
    }

    debug!(
        "reduced {} obstacles to ({}km, {}m)",
        obstacles.len(),
        dominant.distance_km,
        dominant.height_m
    );

    dominant
}

/// Crossing point of the ray from the transmitter's ground point
/// through `a` and the ray from the receiver's ground point through
/// `b`.
///
/// Returns `None` for parallel rays, which only occur when both
/// heights are zero; such a crossing could never beat the running
/// maximum anyway.
fn intersect(a: Obstacle, b: Obstacle, total_km: f64) -> Option<EffectiveObstacle> {
    let grad_a = a.height_m / a.distance_km;
    let grad_b = -b.height_m / (total_km - b.distance_km);
    if grad_a == grad_b {
        return None;
    }
    let distance_km = (grad_b * b.distance_km - b.height_m) / (grad_b - grad_a);
    Some(EffectiveObstacle {
        distance_km,
        height_m: grad_a * distance_km,
    })
}

/// Raises the obstacle by the earth-bulge height at its position.
///
/// Applied unconditionally, even to the synthetic `(0, 0)` point of an
/// unobstructed path (where the bulge term happens to be zero).
pub fn apply_curvature(obstacle: EffectiveObstacle, total_km: f64) -> EffectiveObstacle {
    let d1 = obstacle.distance_km;
    let d2 = total_km - d1;
    EffectiveObstacle {
        distance_km: d1,
        height_m: obstacle.height_m + d1 * d2 / EARTH_BULGE_DIVISOR / K_FACTOR,
    }
}
