//! acladder - AC ladder impedance calculator
//!
//! Reads a ladder description, reduces it to its equivalent impedance and
//! prints the source current, per-component voltages and currents, and power.
//!
//! # Usage
//!
//! ```bash
//! acladder filter.lad --frequency 1000 --voltage 10 --phase 30
//! acladder filter.lad --sweep 10 100000 50 --log
//! RUST_LOG=debug acladder filter.lad --json
//! ```

use std::path::PathBuf;

use acladder::{
    analyze_with, dsl,
    error::{LadderError, Result},
    format::{self, Phasor},
    solver::sweep::{linspace, logspace_hz, sweep, SweepPoint},
    Analysis, Ladder, OperatingPoint, ReducerConfig, ZeroBranchPolicy, DEFAULT_FREQUENCY_HZ,
    DEFAULT_VOLTAGE,
};
use clap::{Parser, ValueEnum};
use log::{debug, info};

/// Zero-impedance branch handling in parallel groups
#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    /// Leave zero branches out of the admittance sum
    Exclude,
    /// A zero branch shorts the whole group
    Dominate,
}

impl From<PolicyArg> for ZeroBranchPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Exclude => ZeroBranchPolicy::Exclude,
            PolicyArg::Dominate => ZeroBranchPolicy::ShortDominates,
        }
    }
}

/// Series/parallel AC ladder impedance calculator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the ladder description file
    #[arg(value_name = "LADDER_FILE")]
    circuit_file: PathBuf,

    /// Source frequency in Hz (overrides `.frequency`)
    #[arg(short, long)]
    frequency: Option<f64>,

    /// Source voltage magnitude in volts (overrides `.source`)
    #[arg(long)]
    voltage: Option<f64>,

    /// Source phase in degrees (overrides `.source`)
    #[arg(long, allow_hyphen_values = true)]
    phase: Option<f64>,

    /// Zero-impedance branch policy (overrides `.policy`)
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Sweep the equivalent impedance over a frequency range
    #[arg(long, num_args = 3, value_names = ["START", "STOP", "POINTS"])]
    sweep: Option<Vec<f64>>,

    /// Logarithmic frequency spacing for --sweep
    #[arg(long, requires = "sweep")]
    log: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    // Parse the ladder file
    let ast = dsl::parse_file(&args.circuit_file)?;

    // Build the ladder
    let ladder = Ladder::from_ast(&ast)?;
    info!(
        "Loaded {} components from {}",
        ladder.len(),
        args.circuit_file.display()
    );

    let mut config = ast.reducer_config();
    if let Some(policy) = args.policy {
        config = config.with_zero_branch(policy.into());
    }

    if let Some(range) = &args.sweep {
        return run_sweep(&ladder, range, args.log, &config, args.json);
    }

    let file_op = ast.operating_point(DEFAULT_FREQUENCY_HZ, DEFAULT_VOLTAGE)?;
    let op = OperatingPoint::with_phase_degrees(
        args.frequency.unwrap_or(file_op.frequency_hz),
        args.voltage.unwrap_or(file_op.voltage_magnitude()),
        args.phase.unwrap_or(file_op.phase_degrees()),
    )?;
    debug!("Operating point: {:?}", op);

    let analysis = analyze_with(ladder.components(), &op, &config)?;

    if args.json {
        print_json(&analysis)
    } else {
        print_report(&ladder, &analysis);
        Ok(())
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| LadderError::OutputError {
        message: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}

fn run_sweep(ladder: &Ladder, range: &[f64], log_spacing: bool, config: &ReducerConfig, json: bool) -> Result<()> {
    let [start, stop, points] = range else {
        return Err(LadderError::OutputError {
            message: "--sweep takes START STOP POINTS".to_string(),
        });
    };
    if *points < 1.0 || points.fract() != 0.0 {
        return Err(LadderError::OutputError {
            message: format!("sweep point count must be a positive integer (got {})", points),
        });
    }
    let n = *points as usize;

    let frequencies = if log_spacing {
        logspace_hz(*start, *stop, n)?
    } else {
        linspace(*start, *stop, n)
    };
    let results: Vec<SweepPoint> = sweep(ladder.components(), frequencies, config)?;

    if json {
        return print_json(&results);
    }

    println!("{:>14}  {:>28}  {:>24}", "Frequency (Hz)", "Z (rectangular)", "Z (polar)");
    for point in &results {
        println!(
            "{:>14.4}  {:>28}  {:>24}",
            point.frequency_hz,
            format::rectangular(point.impedance),
            format::polar(point.impedance)
        );
    }
    Ok(())
}

fn print_report(ladder: &Ladder, analysis: &Analysis) {
    println!("Source frequency: {:.2} Hz", analysis.frequency_hz);
    println!();

    println!("Components:");
    for component in ladder.components() {
        println!(
            "  {:<6} {:<9} {:>10} {:<3}  Z = {}",
            component.name,
            component.link,
            component.element.magnitude(),
            component.element.unit(),
            Phasor(component.impedance(analysis.frequency_hz))
        );
    }
    println!();

    println!("Total equivalent impedance (Z_total):");
    println!("  Rectangular: {} Ohms", format::rectangular(analysis.impedance));
    println!("  Polar:       {} Ohms", format::polar(analysis.impedance));
    println!();

    println!("Source voltage (V_source):");
    println!("  Rectangular: {} V", format::rectangular(analysis.voltage));
    println!("  Polar:       {} V", format::polar(analysis.voltage));
    println!();

    println!("Total current (I_total):");
    println!("  Rectangular: {} A", format::rectangular(analysis.current));
    println!("  Polar:       {} A", format::polar(analysis.current));
    if analysis.is_open_circuit() {
        println!("  (open circuit: no current flows)");
    }
    println!();

    println!("Per-component values:");
    for report in &analysis.components {
        println!("  {} ({})", report.name, report.state);
        println!("    V = {} V", Phasor(report.voltage));
        println!("    I = {} A", Phasor(report.current));
    }
    println!();

    println!("Power:");
    println!("  Active (P):    {:.4} W", analysis.active_power);
    println!("  Reactive (Q):  {:.4} var", analysis.reactive_power);
    println!("  Apparent (S):  {:.4} VA", analysis.apparent_power);
    println!("  Power factor:  {:.4}", analysis.power_factor);
}
