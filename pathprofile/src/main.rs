#![allow(clippy::cast_possible_truncation)]

mod options;
mod report;
mod session;

use anyhow::{anyhow, Error as AnyError};
use clap::Parser;
use linkbudget::LinkBudget;
use options::{BudgetArgs, Cli, Command, MgrPair, ObstacleArg, Output};
use report::Report;
use session::{Reply, Session};
use std::io::{self, BufRead};
use textplots::{Chart, Plot, Shape};

fn main() -> Result<(), AnyError> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Distance(MgrPair { mgr1, mgr2 }) => {
            println!(
                "MGR 1: {mgr1}\nMGR 2: {mgr2}\nDistance: {:.3}km",
                mgr1.distance(&mgr2)
            );
        }
        Command::Azimuth(MgrPair { mgr1, mgr2 }) => {
            println!(
                "MGR 1: {mgr1}\nMGR 2: {mgr2}\nAzimuth: {:.0}mils",
                mgr1.azimuth_mils(&mgr2)
            );
        }
        Command::Budget(args) => run_budget(&args)?,
        Command::Interactive => run_interactive()?,
    }
    Ok(())
}

fn run_budget(args: &BudgetArgs) -> Result<(), AnyError> {
    let (mgrs, distance_km) = match (args.mgr1, args.mgr2, args.distance_km) {
        (Some(mgr1), Some(mgr2), None) => (Some((mgr1, mgr2)), mgr1.distance(&mgr2)),
        (None, None, Some(distance_km)) => (None, distance_km),
        _ => {
            return Err(anyhow!(
                "give either --distance-km or both --mgr1 and --mgr2"
            ))
        }
    };

    let budget = LinkBudget::builder()
        .radio(args.radio)
        .freq_mhz(args.freq)
        .distance_km(distance_km)
        .tx_height(args.tx_height)
        .rx_height(args.rx_height)
        .obstacles(args.obstacles.iter().map(|ObstacleArg(obstacle)| *obstacle))
        .build()?;

    let report = Report {
        mgrs,
        radio: args.radio,
        freq_mhz: args.freq,
        distance_km,
        tx_height_m: args.tx_height,
        rx_height_m: args.rx_height,
        obstacles: args
            .obstacles
            .iter()
            .map(|ObstacleArg(obstacle)| *obstacle)
            .collect(),
        budget,
    };

    match args.output.clone().unwrap_or(Output::Report) {
        Output::Report => println!("{report}"),
        Output::Json => println!("{}", report.to_json()?),
        Output::Plot => plot_ascii(&report),
    }
    Ok(())
}

fn run_interactive() -> Result<(), AnyError> {
    let mut session = Session::new();
    println!("{}", session.prompt());
    println!("(enter 'cancel' to abort)");

    for line in io::stdin().lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("cancel") {
            println!("Operation cancelled.");
            return Ok(());
        }
        match session.advance(input) {
            Reply::Prompt(prompt) => println!("{prompt}"),
            Reply::Invalid(message) => println!("{message}"),
            Reply::Report(report) => {
                println!("{report}");
                return Ok(());
            }
            Reply::Failed(message) => return Err(anyhow!(message)),
        }
    }
    Ok(())
}

/// Plots the line of sight and the obstacle silhouette to the
/// terminal.
fn plot_ascii(report: &Report) {
    let los = [
        (0.0, report.tx_height_m as f32),
        (report.distance_km as f32, report.rx_height_m as f32),
    ];
    let obstacles: Vec<(f32, f32)> = report
        .obstacles
        .iter()
        .map(|obstacle| (obstacle.distance_km as f32, obstacle.height_m as f32))
        .collect();
    let dominant = [(
        report.budget.obstacle.distance_km as f32,
        report.budget.obstacle.height_m as f32,
    )];

    Chart::new(280, 120, 0.0, report.distance_km as f32)
        .lineplot(&Shape::Lines(&los))
        .lineplot(&Shape::Points(&obstacles))
        .lineplot(&Shape::Points(&dominant))
        .display();
}
