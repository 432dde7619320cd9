//! MIPS Pipeline Hazard Simulator CLI.
//!
//! Parses the command-line arguments, loads the program and optional
//! configuration, and prints the hazard report and/or timing diagram.
//!
//! # Usage
//!
//! ```text
//! mips-pipeline-sim --commands "ADD R1, R2, R3 | SUB R4, R1, R5" \
//!     --operation both --forwarding_unit off
//! ```

use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser, ValueEnum};
use log::info;

use mips_pipeline_sim::common::{SimError, SimResult};
use mips_pipeline_sim::config::Config;
use mips_pipeline_sim::core::Forwarding;
use mips_pipeline_sim::render::{self, JsonOutput};
use mips_pipeline_sim::sim::{self, loader, Operation};
use mips_pipeline_sim::stats::SimStats;

/// Command-line arguments for the pipeline hazard simulator.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "MIPS Pipeline Hazard Detection and Timing Sequence Generator"
)]
#[command(group(ArgGroup::new("program").required(true).args(["commands", "file"])))]
struct Args {
    /// Pipe separated list of MIPS commands.
    #[arg(long)]
    commands: Option<String>,

    /// File of MIPS commands, one per line; `#` starts a comment.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// 'detect' finds all hazards, 'timing' draws the timing diagram, 'both' does both.
    #[arg(long, value_enum)]
    operation: OperationArg,

    /// Presence of a forwarding unit; alters the timing diagram.
    #[arg(long = "forwarding_unit", value_enum)]
    forwarding_unit: ForwardingArg,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// Print every stage's description after the timing diagram.
    #[arg(long)]
    describe: bool,

    /// Print run statistics.
    #[arg(long)]
    stats: bool,

    /// Log hazard and stall decisions to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OperationArg {
    Detect,
    Timing,
    Both,
}

impl From<OperationArg> for Operation {
    fn from(val: OperationArg) -> Self {
        match val {
            OperationArg::Detect => Operation::Detect,
            OperationArg::Timing => Operation::Timing,
            OperationArg::Both => Operation::Both,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ForwardingArg {
    On,
    Off,
}

impl From<ForwardingArg> for Forwarding {
    fn from(val: ForwardingArg) -> Self {
        match val {
            ForwardingArg::On => Forwarding::On,
            ForwardingArg::Off => Forwarding::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("[!] FATAL: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> SimResult<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let log_spec = if args.verbose {
        "debug"
    } else {
        config.general.log_level.as_str()
    };
    let _logger = flexi_logger::Logger::try_with_str(log_spec)?.start()?;
    if let Some(path) = &args.config {
        info!("Loaded configuration from {}", path.display());
    }

    let program = match (&args.commands, &args.file) {
        (Some(commands), _) => loader::load_commands(commands)?,
        (None, Some(path)) => loader::load_file(path)?,
        (None, None) => return Err(SimError::NoInstructions),
    };

    let operation = Operation::from(args.operation);
    let forwarding = Forwarding::from(args.forwarding_unit);
    let render_cfg = config.render;
    let base_width = render_cfg.base_width();
    info!(
        "Running {:?} on {} instruction(s), forwarding unit {}",
        operation,
        program.len(),
        forwarding.label()
    );

    let report = sim::hazard_report(&program);
    let rows = sim::timing_rows(&program, forwarding, base_width);
    let stats = args
        .stats
        .then(|| SimStats::collect(&report, &rows, base_width));

    if args.format == FormatArg::Json {
        let output = JsonOutput::new(operation, forwarding, &report, &rows, base_width, stats);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mut lines = render::text_output(operation, forwarding, &report, &rows, &render_cfg);
    if args.describe {
        lines.extend(render::describe_section(&rows, &render_cfg));
    }
    if let Some(stats) = stats {
        lines.extend(stats.lines());
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
