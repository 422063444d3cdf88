use anyhow::{anyhow, Error as AnyError};
use clap::{Args, Parser, Subcommand};
use linkbudget::{Obstacle, Radio};
use mgr::Mgr;
use std::str::FromStr;

/// Path profile, distance, and azimuth calculations between two grid
/// references.
#[derive(Parser, Debug)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Distance in km between two MGRs.
    Distance(MgrPair),

    /// Azimuth in mils from MGR 1 to MGR 2.
    Azimuth(MgrPair),

    /// Link budget for a path with known obstacles.
    Budget(BudgetArgs),

    /// Prompt for inputs step by step, then report the link budget.
    Interactive,
}

#[derive(Debug, Args)]
pub struct MgrPair {
    /// First grid reference, e.g. "100 100".
    #[arg(long)]
    pub mgr1: Mgr,

    /// Second grid reference, e.g. "200 200".
    #[arg(long)]
    pub mgr2: Mgr,
}

#[derive(Debug, Args)]
pub struct BudgetArgs {
    /// Radio type, 406 or 408.
    #[arg(short, long)]
    pub radio: Radio,

    /// Transmitting frequency in MHz.
    #[arg(short, long)]
    pub freq: f64,

    /// Path length in km; alternative to an MGR pair.
    #[arg(short, long, conflicts_with_all = ["mgr1", "mgr2"])]
    pub distance_km: Option<f64>,

    /// Transmitting node grid reference.
    #[arg(long, requires = "mgr2")]
    pub mgr1: Option<Mgr>,

    /// Receiving node grid reference.
    #[arg(long, requires = "mgr1")]
    pub mgr2: Option<Mgr>,

    /// Transmitting node height in meters.
    #[arg(long)]
    pub tx_height: f64,

    /// Receiving node height in meters.
    #[arg(long)]
    pub rx_height: f64,

    /// Obstacle as "distance_km,height_m"; repeat per obstacle.
    #[arg(long = "obstacle")]
    pub obstacles: Vec<ObstacleArg>,

    #[command(subcommand)]
    pub output: Option<Output>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Output {
    /// Step-by-step prose report.
    Report,

    /// Print the result as JSON.
    Json,

    /// Plot the path profile to the terminal.
    Plot,
}

#[derive(Debug, Clone, Copy)]
pub struct ObstacleArg(pub Obstacle);

impl FromStr for ObstacleArg {
    type Err = AnyError;

    fn from_str(s: &str) -> Result<Self, AnyError> {
        let (distance_str, height_str) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("not a valid distance_km,height_m"))?;
        let distance_km = f64::from_str(distance_str.trim())?;
        let height_m = f64::from_str(height_str.trim())?;
        Ok(Self(Obstacle::new(distance_km, height_m)))
    }
}
