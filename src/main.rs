use std::process::ExitCode;

use log::{LevelFilter, error};
use prettytable::{Table, row};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use ers_vent::Reactor::{Scenario, Trajectory, run_scenario};

fn print_summary(name: &str, traj: &Trajectory) {
    let mut table = Table::new();
    table.add_row(row!["Scenario", name]);
    table.add_row(row!["Termination", format!("{}", traj.termination)]);
    table.add_row(row!["Steps", traj.len()]);
    table.add_row(row![
        "Max pressure, kPa",
        format!("{:.1}", traj.max_pressure())
    ]);
    table.add_row(row![
        "Max temperature, C",
        format!("{:.1}", traj.max_temperature())
    ]);
    table.add_row(row![
        "Max vent rate, mol/s",
        format!("{:.3e}", traj.max_vent_rate())
    ]);
    if let Some(q) = traj.min_quality() {
        table.add_row(row!["Min exit quality", format!("{q:.4}")]);
    }
    table.add_row(row![
        "H2O2 conversion",
        format!("{:.4}", traj.conversion())
    ]);
    table.printstd();
}

fn main() -> ExitCode {
    if let Err(e) = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger initialization failed: {e}");
    }

    // 100 gal vessel, 30 wt% peroxide, contaminated charge behind a
    // 2 in rupture disc set to 1000 kPa
    let mut scenario = Scenario::new(100.0);
    scenario.kf = 100.0;
    scenario.RD = true;
    scenario.P_RD = 1000.0;
    scenario.two_phase = true;

    match run_scenario(scenario) {
        Ok(traj) => {
            print_summary("contaminated charge, 2 in rupture disc", &traj);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(
                "simulation failed after {} recorded steps: {}",
                e.steps.len(),
                e.error
            );
            ExitCode::FAILURE
        }
    }
}
