//! pcbai: parametric KiCad footprint generator
//!
//! Generates `.kicad_mod` footprints from package dimensions given on the
//! command line or in a package-guess JSON file.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use pcbai::config::{self, Config};
use pcbai::footprint::{FootprintGenerator, PackageFamily, PackageInputs};
use pcbai::guess::PackageGuess;
use pcbai::kicad::{self, ModuleWriter};

/// Parametric KiCad footprint generator.
///
/// Builds footprints for chip passives, SOIC, QFN and QFP packages from a
/// few package dimensions.
#[derive(Parser, Debug)]
#[command(name = "pcbai")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a KiCad footprint (.kicad_mod) from package dimensions
    Footprint(FootprintArgs),

    /// Generate a KiCad footprint from a package-guess JSON file
    FromGuess(FromGuessArgs),
}

/// Package family selector.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum FamilyArg {
    /// Two-pad chip passive
    SmdRc,
    /// Dual-row SOIC
    Soic,
    /// Flush-lead quad with optional exposed pad
    Qfn,
    /// Gullwing quad
    Qfp,
}

impl From<FamilyArg> for PackageFamily {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::SmdRc => Self::SmdRc,
            FamilyArg::Soic => Self::Soic,
            FamilyArg::Qfn => Self::Qfn,
            FamilyArg::Qfp => Self::Qfp,
        }
    }
}

/// Where and how the footprint is emitted.
#[derive(ClapArgs, Debug)]
struct OutputArgs {
    /// Footprint name (derived from the dimensions if omitted)
    #[arg(long)]
    name: Option<String>,

    /// Output directory (defaults to the configured output_dir)
    #[arg(long = "out", value_name = "DIR")]
    out: Option<PathBuf>,

    /// Print the footprint instead of writing a file
    #[arg(long, conflicts_with = "json")]
    stdout: bool,

    /// Print the generated geometry as JSON instead of writing a file
    #[arg(long)]
    json: bool,
}

#[derive(ClapArgs, Debug)]
struct FootprintArgs {
    /// Package family
    #[arg(long = "type", value_enum)]
    family: FamilyArg,

    #[command(flatten)]
    output: OutputArgs,

    /// Total pin count
    #[arg(long)]
    pins: Option<u32>,

    /// Pin pitch (mm)
    #[arg(long)]
    pitch: Option<f64>,

    /// Body length (mm)
    #[arg(long)]
    body_l: Option<f64>,

    /// Body width (mm)
    #[arg(long)]
    body_w: Option<f64>,

    /// Pad length (mm)
    #[arg(long)]
    pad_l: Option<f64>,

    /// Pad width (mm)
    #[arg(long)]
    pad_w: Option<f64>,

    /// Gap between pad edges, two-pad only (mm)
    #[arg(long)]
    gap: Option<f64>,

    /// Body centre to pad row distance, SOIC only (mm)
    #[arg(long)]
    row_offset: Option<f64>,

    /// Exposed pad length, QFN only (mm)
    #[arg(long)]
    ep_l: Option<f64>,

    /// Exposed pad width, QFN only (mm)
    #[arg(long)]
    ep_w: Option<f64>,

    /// Extra outward pad offset, QFP only (mm)
    #[arg(long)]
    gullwing_ext: Option<f64>,

    /// Omit the pin-1 locator, SOIC only
    #[arg(long)]
    no_pin1_marker: bool,

    /// Solder mask margin override (mm)
    #[arg(long)]
    mask_expansion: Option<f64>,

    /// Paste aperture relative to the pad, e.g. 0.9 for a 10% reduction
    #[arg(long)]
    paste_ratio: Option<f64>,
}

impl FootprintArgs {
    fn inputs(&self) -> PackageInputs {
        PackageInputs {
            name: self.output.name.clone(),
            pins: self.pins,
            pitch: self.pitch,
            body_length: self.body_l,
            body_width: self.body_w,
            pad_length: self.pad_l,
            pad_width: self.pad_w,
            gap: self.gap,
            row_offset: self.row_offset,
            ep_length: self.ep_l,
            ep_width: self.ep_w,
            gullwing_extension: self.gullwing_ext,
            pin1_marker: Some(!self.no_pin1_marker),
            mask_expansion: self.mask_expansion,
            paste_ratio: self.paste_ratio,
        }
    }
}

#[derive(ClapArgs, Debug)]
struct FromGuessArgs {
    /// Package-guess JSON file
    #[arg(value_name = "GUESS_JSON")]
    guess: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds, generates and emits the requested footprint.
fn run(command: &Command, cfg: &Config) -> Result<(), Box<dyn Error>> {
    let (footprint, output) = match command {
        Command::Footprint(args) => (
            args.inputs().build(args.family.into(), &cfg.footprint)?,
            &args.output,
        ),
        Command::FromGuess(args) => {
            let guess = PackageGuess::load(&args.guess)?;
            let family = guess.family()?;
            info!(family = %family, path = %args.guess.display(), "Using package guess");
            (
                guess
                    .to_inputs(args.output.name.clone())
                    .build(family, &cfg.footprint)?,
                &args.output,
            )
        }
    };

    let doc = footprint.generate()?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else if output.stdout {
        print!("{}", kicad::render(&doc));
    } else {
        let dir = output.out.clone().unwrap_or_else(|| cfg.output_dir.clone());
        let path = ModuleWriter::new(dir)?.write(&doc)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Entry point for the pcbai CLI.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg.with_env_overrides(|key| std::env::var(key).ok()),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            if config_path.is_none() {
                if let Some(default_path) = config::default_config_path() {
                    eprintln!("\nLoaded from: {}", default_path.display());
                }
            }
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = cfg.validate() {
        eprintln!("Configuration error: {e}");
        return ExitCode::FAILURE;
    }

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        output_dir = %cfg.output_dir.display(),
        "Starting pcbai"
    );

    match run(&args.command, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Footprint generation failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn parses_footprint_command() {
        let args = Args::try_parse_from([
            "pcbai", "footprint", "--type", "smd-rc", "--name", "R_0603", "--body-l", "1.6",
            "--body-w", "0.8", "--pad-l", "0.9", "--pad-w", "0.8", "--gap", "0.8", "--stdout",
        ])
        .unwrap();

        let Command::Footprint(fp) = args.command else {
            panic!("expected footprint command");
        };
        assert!(matches!(fp.family, FamilyArg::SmdRc));
        assert!(fp.output.stdout);
        let inputs = fp.inputs();
        assert_eq!(inputs.name.as_deref(), Some("R_0603"));
        assert_eq!(inputs.gap, Some(0.8));
        assert_eq!(inputs.pin1_marker, Some(true));
    }

    #[test]
    fn parses_from_guess_command() {
        let args =
            Args::try_parse_from(["pcbai", "-vv", "from-guess", "guess.json", "--out", "lib"])
                .unwrap();
        assert_eq!(args.verbose, 2);
        let Command::FromGuess(fg) = args.command else {
            panic!("expected from-guess command");
        };
        assert_eq!(fg.guess, PathBuf::from("guess.json"));
        assert_eq!(fg.output.out, Some(PathBuf::from("lib")));
    }

    #[test]
    fn rejects_unknown_family() {
        assert!(Args::try_parse_from(["pcbai", "footprint", "--type", "bga"]).is_err());
    }

    #[test]
    fn log_level_selection() {
        assert_eq!(get_log_level(0, true, "trace"), Level::ERROR);
        assert_eq!(get_log_level(0, false, "debug"), Level::DEBUG);
        assert_eq!(get_log_level(0, false, "nonsense"), Level::WARN);
        assert_eq!(get_log_level(1, false, "error"), Level::INFO);
        assert_eq!(get_log_level(5, false, "error"), Level::TRACE);
    }
}
