use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use hab_dynamics::telemetry_system::{display_trajectory, write_trajectory_file};
use hab_dynamics::trajectory_system::{DescentIntegrator, DescentRequest};
use hab_dynamics::*;
use serde::Serialize;

const TABLE_ROWS: usize = 20;

#[derive(Parser)]
#[command(name = "hab_sim")]
#[command(version = "0.1.0")]
#[command(about = "High-altitude balloon ascent and descent simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with simulation settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Write the simulated trajectory to this CSV file
    #[arg(long, global = true)]
    csv: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the helium mass for a target mean ascent rate
    Ascent {
        /// Burst altitude (m)
        #[arg(short = 'b', long)]
        burst_altitude: Option<f64>,

        /// Starting altitude (m)
        #[arg(short = 's', long)]
        start_altitude: Option<f64>,

        /// Desired mean ascent rate (m/s)
        #[arg(short = 'r', long)]
        target_rate: Option<f64>,
    },

    /// Simulate the fall from burst to the ground
    Descent {
        /// Burst altitude (m)
        #[arg(short = 'b', long)]
        burst_altitude: Option<f64>,

        /// Ground level (m)
        #[arg(short = 'g', long)]
        ground_level: Option<f64>,

        /// Vertical velocity at burst (m/s, positive up)
        #[arg(short = 'v', long, allow_hyphen_values = true)]
        burst_velocity: Option<f64>,
    },

    /// Print the standard atmosphere at a geopotential altitude
    Atmosphere {
        /// Geopotential altitude (m)
        #[arg(short = 'a', long)]
        altitude: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Serialize)]
struct AscentOutput<'a> {
    search: &'a SearchResult,
    profile: Option<FlightReport>,
    profile_error: Option<String>,
}

#[derive(Debug, Serialize)]
struct DescentOutput {
    average_descent_rate: f64,
    profile: FlightReport,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    match cli.command {
        Commands::Ascent {
            burst_altitude,
            start_altitude,
            target_rate,
        } => {
            if burst_altitude.is_none() || start_altitude.is_none() || target_rate.is_none() {
                print_instructions(&[
                    "Starting altitude must be greater than or equal to zero.",
                    "Burst altitude must be less than or equal to 100 km.",
                    "Burst altitude must be larger than starting altitude.",
                    "Desired ascent rate must be greater than 0.",
                ]);
            }
            let burst = value_or_prompt(burst_altitude, "Burst Altitude [m]: ")?;
            let start = value_or_prompt(start_altitude, "Starting Altitude [m]: ")?;
            let rate = value_or_prompt(target_rate, "Desired Ascent Rate [m/s]: ")?;

            run_ascent(&config, burst, start, rate, cli.output, cli.csv.as_deref())?;
        }

        Commands::Descent {
            burst_altitude,
            ground_level,
            burst_velocity,
        } => {
            if burst_altitude.is_none() || ground_level.is_none() || burst_velocity.is_none() {
                print_instructions(&[
                    "Ground level must be greater than or equal to zero.",
                    "Burst altitude must be less than or equal to 100 km.",
                    "Burst altitude must be larger than ground level.",
                    "Burst velocity is positive upward.",
                ]);
            }
            let burst = value_or_prompt(burst_altitude, "Burst Altitude [m]: ")?;
            let ground = value_or_prompt(ground_level, "Ground Level [m]: ")?;
            let velocity = value_or_prompt(burst_velocity, "Burst Velocity [m/s]: ")?;

            run_descent(&config, burst, ground, velocity, cli.output, cli.csv.as_deref())?;
        }

        Commands::Atmosphere { altitude } => {
            let altitude = value_or_prompt(altitude, "Enter geopotential altitude in meters -> ")?;
            let state = AtmosphericState::at_geopotential(altitude)?;

            match cli.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&state)?),
                OutputFormat::Table => {
                    println!("Layer:                     {}", state.layer);
                    println!("Temperature [K]:           {:.4}", state.temperature);
                    println!("Pressure [Pa]:             {:.5e}", state.pressure);
                    println!("Pressure [mbar]:           {:.5e}", state.pressure / 100.0);
                    println!("Air Density [kg/m^3]:      {:.5e}", state.density);
                }
            }
        }
    }

    Ok(())
}

fn run_ascent(
    config: &SimulationConfig,
    burst: f64,
    start: f64,
    target_rate: f64,
    output: OutputFormat,
    csv: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let search = MassSearch::new(config.clone());
    let result = search.find(burst, start, target_rate)?;

    if !result.feasible {
        match output {
            OutputFormat::Json => {
                let report = AscentOutput {
                    search: &result,
                    profile: None,
                    profile_error: None,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Table => {
                println!("\nMaximum helium mass is insufficient for these conditions.\n");
                println!("Maximum helium mass [kg]:");
                println!("{:.4}", result.mass_kg);
                println!("Maximum achieved ascent rate [m/s] under limit:");
                println!("{:.4}", result.achieved_rate);
                println!("Initial net force at maximum mass [N]:");
                println!("{:.4}", result.gage_force);
            }
        }
        result.ensure_feasible()?;
        return Ok(());
    }

    let profile = search.ascent(result.mass_kg, start, burst);
    let report = FlightReport::from_result(&profile);

    match output {
        OutputFormat::Json => {
            let json = AscentOutput {
                search: &result,
                profile: Some(report),
                profile_error: profile.error.as_ref().map(|e| e.to_string()),
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            println!("Mass for target rate [kg]:");
            println!("{:.4}", result.mass_kg);
            println!("Initial net force for target rate [N]:");
            println!("{:.4}", result.gage_force);
            println!("Final achieved ascent rate [m/s]:");
            println!("{:.4}", result.achieved_rate);

            match &profile.error {
                Some(e) => {
                    println!("\nWARNING: Detailed ascent simulation encountered an issue.");
                    println!("Reason:");
                    println!("{}", e);
                }
                None => {
                    println!("\nDetailed ascent simulation completed successfully.");
                    println!("Mean ascent rate from profile [m/s]:");
                    println!("{:.4}", profile.mean_rate);
                    report.display_data();
                    display_trajectory(&profile.trajectory, TABLE_ROWS);
                }
            }
        }
    }

    if let Some(path) = csv {
        write_trajectory_file(path, &profile.trajectory)?;
        eprintln!("Trajectory written to {}", path.display());
    }

    Ok(())
}

fn run_descent(
    config: &SimulationConfig,
    burst: f64,
    ground: f64,
    burst_velocity: f64,
    output: OutputFormat,
    csv: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let integrator = DescentIntegrator::new(config.descent, config.max_steps);
    let result = integrator.run(&DescentRequest {
        burst_altitude: burst,
        ground_level: ground,
        burst_velocity,
        time_step: config.time_step_s,
    });
    if let Some(error) = &result.error {
        return Err(error.clone().into());
    }

    let report = FlightReport::from_result(&result);
    match output {
        OutputFormat::Json => {
            let json = DescentOutput {
                average_descent_rate: result.mean_rate,
                profile: report,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            println!("Average descent rate [m/s]:");
            println!("{:.4}", result.mean_rate);
            report.display_data();
            display_trajectory(&result.trajectory, TABLE_ROWS);
        }
    }

    if let Some(path) = csv {
        write_trajectory_file(path, &result.trajectory)?;
        eprintln!("Trajectory written to {}", path.display());
    }

    Ok(())
}

fn print_instructions(lines: &[&str]) {
    println!("\n***********************************************************\n");
    println!("INSTRUCTIONS\n");
    for line in lines {
        println!("{}", line);
    }
    println!("\n***********************************************************\n");
}

fn value_or_prompt(value: Option<f64>, label: &str) -> Result<f64, Box<dyn Error>> {
    if let Some(value) = value {
        return Ok(value);
    }

    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let trimmed = line.trim();
    trimmed.parse::<f64>().map_err(|_| {
        Box::<dyn Error>::from(SimulationError::InvalidInput(format!(
            "'{}' is not a number",
            trimmed
        )))
    })
}
