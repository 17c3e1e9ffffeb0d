use clap::{Args, Parser, Subcommand};
use isa_atmos::{
    AltitudeKind, AltitudeSweep, AtmosError, Atmosphere, ModelConfig, ProfileRow, Property,
    compute_profile,
};
use isa_core::{CONSTANTS, ConstantName, Constants, IsaError, UnitRegistry, UnitStandard};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Atmos(#[from] AtmosError),
    #[error(transparent)]
    Core(#[from] IsaError),
    #[error("Expected NAME=VALUE, got '{0}'")]
    BadConstant(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "isa-cli")]
#[command(about = "ISA 1983 standard atmosphere calculator (0-47 km)", long_about = None)]
struct Cli {
    /// Unit standard for inputs and outputs: SI, USCS or IMPERIAL
    #[arg(long, global = true, default_value = "SI")]
    units: String,
    /// Uniform temperature offset from the standard day (degrees of the unit standard)
    #[arg(long, global = true, default_value_t = 0.0, allow_negative_numbers = true)]
    offset: f64,
    /// Override a constant, e.g. `--constant g=9.81` (each name at most once)
    #[arg(long = "constant", global = true, value_name = "NAME=VALUE")]
    constants: Vec<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct AltitudeArgs {
    /// Altitude (km for SI, ft otherwise)
    altitude: f64,
    /// Treat the altitude as geometric instead of geopotential
    #[arg(long)]
    geometric: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full atmospheric state at an altitude
    State {
        #[command(flatten)]
        at: AltitudeArgs,
        /// Flight speed for Mach number and dynamic pressure
        #[arg(long)]
        velocity: Option<f64>,
    },
    /// Print a single named property (e.g. density, lapse_rate)
    Get {
        /// Property name
        property: String,
        #[command(flatten)]
        at: AltitudeArgs,
    },
    /// Tabulate the atmosphere over a range of altitudes
    Profile {
        /// First altitude
        #[arg(long, default_value_t = 0.0)]
        start: f64,
        /// Last altitude
        #[arg(long)]
        end: f64,
        /// Number of points (>= 2)
        #[arg(long, default_value_t = 21)]
        points: usize,
        /// Bounds are geometric heights
        #[arg(long)]
        geometric: bool,
        /// Emit JSON instead of CSV
        #[arg(long)]
        json: bool,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the physical constants in use
    Constants,
    /// List the unit symbols of the selected standard
    Units,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    UnitRegistry::set_unit_standard(&cli.units)?;
    let constants = build_constants(&cli.constants)?;
    let config = ModelConfig::from_registry().with_constants(constants);
    debug!(standard = %config.standard(), "configuration ready");

    match cli.command {
        Commands::State { at, velocity } => cmd_state(config, cli.offset, &at, velocity),
        Commands::Get { property, at } => cmd_get(config, cli.offset, &property, &at),
        Commands::Profile {
            start,
            end,
            points,
            geometric,
            json,
            output,
        } => {
            let kind = if geometric {
                AltitudeKind::Geometric
            } else {
                AltitudeKind::Geopotential
            };
            let sweep = AltitudeSweep::new(start, end, points, kind)?;
            cmd_profile(config, cli.offset, &sweep, json, output.as_deref())
        }
        Commands::Constants => {
            cmd_constants(config.constants());
            Ok(())
        }
        Commands::Units => {
            cmd_units();
            Ok(())
        }
    }
}

fn build_constants(overrides: &[String]) -> CliResult<Constants> {
    let mut builder = Constants::builder();
    for item in overrides {
        let (name, value) = item
            .split_once('=')
            .ok_or_else(|| CliError::BadConstant(item.clone()))?;
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| CliError::BadConstant(item.clone()))?;
        builder = builder.set_by_name(name, value)?;
    }
    Ok(builder.build())
}

fn build_atmosphere(config: ModelConfig, offset: f64, at: &AltitudeArgs) -> CliResult<Atmosphere> {
    let atm = if at.geometric {
        Atmosphere::from_geometric_height_with(config, offset, at.altitude)?
    } else {
        Atmosphere::new_with(config, offset, at.altitude)?
    };
    Ok(atm)
}

fn cmd_state(
    config: ModelConfig,
    offset: f64,
    at: &AltitudeArgs,
    velocity: Option<f64>,
) -> CliResult<()> {
    let atm = build_atmosphere(config, offset, at)?;

    println!("{}", atm);
    println!("  Layer: {}", atm.atmosphere());
    for property in Property::ALL {
        if property.is_layer_property() {
            continue;
        }
        println!("  {:<20} {:.6}", property.name(), atm.get(property));
    }

    if let Some(v) = velocity {
        println!("\nAt {} {}:", v, atm.speed_of_sound().symbol());
        println!("  {:<20} {:.4}", "mach_number", atm.mach_number(v)?);
        println!("  {:<20} {:.4}", "dynamic_pressure", atm.dynamic_pressure(v)?);
    }
    Ok(())
}

fn cmd_get(config: ModelConfig, offset: f64, name: &str, at: &AltitudeArgs) -> CliResult<()> {
    let atm = build_atmosphere(config, offset, at)?;
    println!("{:.6}", atm.property(name)?);
    Ok(())
}

fn cmd_profile(
    config: ModelConfig,
    offset: f64,
    sweep: &AltitudeSweep,
    json: bool,
    output: Option<&Path>,
) -> CliResult<()> {
    let rows = compute_profile(config, offset, sweep)?;

    let text = if json {
        serde_json::to_string_pretty(&rows)?
    } else {
        profile_csv(&rows)
    };

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, text)?;
        println!("✓ Exported {} profile points to {}", rows.len(), path.display());
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn profile_csv(rows: &[ProfileRow]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let mut csv = format!(
        "altitude_{},geometric_height_{},layer,temperature_{},pressure_{},density_{},speed_of_sound_{},dynamic_viscosity_{},kinematic_viscosity_{}\n",
        first.altitude.symbol(),
        first.geometric_height.symbol(),
        first.temperature.symbol(),
        first.pressure.symbol(),
        first.density.symbol(),
        first.speed_of_sound.symbol(),
        first.dynamic_viscosity.symbol(),
        first.kinematic_viscosity.symbol(),
    );
    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            row.altitude.value(),
            row.geometric_height.value(),
            row.layer,
            row.temperature.value(),
            row.pressure.value(),
            row.density.value(),
            row.speed_of_sound.value(),
            row.dynamic_viscosity.value(),
            row.kinematic_viscosity.value(),
        ));
    }
    csv
}

fn cmd_constants(constants: &Constants) {
    println!("Constants (SI):");
    for name in ConstantName::ALL {
        let unit = name
            .quantity()
            .map(|q| q.symbol(UnitStandard::Si))
            .unwrap_or("m/s²");
        let marker = if constants.get(name) != CONSTANTS.get(name) {
            "  (overridden)"
        } else {
            ""
        };
        println!(
            "  {:<24} {:<14} {}{}",
            name.as_str(),
            constants.get(name),
            unit,
            marker
        );
    }
}

fn cmd_units() {
    let table = UnitRegistry::get_units();
    println!("Unit standard: {}", table.standard());
    for (quantity, symbol) in table.iter() {
        println!("  {:<24} {}", quantity.to_string(), symbol);
    }
}
