mod output;

use clap::{Parser, Subcommand, ValueEnum};
use cs_compute::{
    ComputeBackend, ComputeOutput, ComputeParams, ComputeRequest, ComputeResponse, ComputeWorker,
    InlineBackend, RequestId, handle,
};
use cs_controls::{ControlError, linspace, logspace};
use cs_project::{Diagram, ProjectError};
use cs_sim::{Driver, DriverConfig, SimError};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Control(#[from] ControlError),

    #[error("Calculation failed: {0}")]
    Compute(String),

    #[error("Unexpected {kind} result")]
    UnexpectedResult { kind: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "cs-cli")]
#[command(about = "ControlSim CLI - Discrete control block diagram simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Backend {
    /// Compute on the calling thread
    Inline,
    /// Compute on a dedicated worker thread
    Worker,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate diagram file syntax and parameters
    Validate {
        /// Path to the diagram file (.yaml, .yml or .json)
        diagram_path: PathBuf,
    },
    /// Run a diagram to its configured duration
    Run {
        /// Path to the diagram file (.yaml, .yml or .json)
        diagram_path: PathBuf,
        #[arg(long, value_enum, default_value = "inline")]
        backend: Backend,
        /// Write per-block series as CSV (optional, defaults to a summary only)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Step response of a discrete transfer function
    Step {
        /// Numerator coefficients, highest order first
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        num: Vec<f64>,
        /// Denominator coefficients, highest order first
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        den: Vec<f64>,
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        amplitude: f64,
        /// Duration in seconds
        #[arg(long, default_value_t = 1.0)]
        duration: f64,
        /// Sample time in seconds
        #[arg(long, default_value_t = 0.01)]
        sample_time: f64,
        /// Print the raw response as JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
    /// Frequency response (magnitude and phase) over a sweep
    Freq {
        /// Numerator coefficients, highest order first
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        num: Vec<f64>,
        /// Denominator coefficients, highest order first
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        den: Vec<f64>,
        /// First frequency in Hz
        #[arg(long, default_value_t = 0.01)]
        start: f64,
        /// Last frequency in Hz
        #[arg(long, default_value_t = 100.0)]
        stop: f64,
        #[arg(long, default_value_t = 50)]
        points: usize,
        /// Space frequencies linearly instead of logarithmically
        #[arg(long)]
        linear: bool,
        /// Print the raw response as JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { diagram_path } => cmd_validate(&diagram_path),
        Commands::Run {
            diagram_path,
            backend,
            output,
        } => cmd_run(&diagram_path, backend, output.as_deref()),
        Commands::Step {
            num,
            den,
            amplitude,
            duration,
            sample_time,
            json,
        } => cmd_step(
            ComputeParams::StepResponse {
                numerator: num,
                denominator: den,
                amplitude,
                duration,
                sample_time,
            },
            sample_time,
            json,
        ),
        Commands::Freq {
            num,
            den,
            start,
            stop,
            points,
            linear,
            json,
        } => {
            let frequencies = if linear {
                linspace(start, stop, points)?
            } else {
                logspace(start, stop, points)?
            };
            cmd_freq(
                ComputeParams::FrequencyResponse {
                    numerator: num,
                    denominator: den,
                    frequencies,
                },
                json,
            )
        }
    }
}

fn cmd_validate(diagram_path: &Path) -> CliResult<()> {
    println!("Validating diagram: {}", diagram_path.display());
    let diagram = cs_project::load(diagram_path)?;
    println!("✓ Diagram is valid");
    println!(
        "  {} - {} blocks, sample time {} s, duration {} s",
        diagram.name,
        diagram.blocks.len(),
        diagram.simulation.sample_time,
        diagram.simulation.duration
    );
    for block in &diagram.blocks {
        println!("  {} ({})", block.id, block.kind.label());
    }
    Ok(())
}

fn cmd_run(diagram_path: &Path, backend: Backend, output: Option<&Path>) -> CliResult<()> {
    let diagram = cs_project::load(diagram_path)?;
    println!("Running diagram: {}", diagram.name);

    match backend {
        Backend::Inline => run_with(&diagram, InlineBackend::new(), output),
        Backend::Worker => run_with(&diagram, ComputeWorker::start(), output),
    }
}

fn run_with<B: ComputeBackend>(
    diagram: &Diagram,
    backend: B,
    output: Option<&Path>,
) -> CliResult<()> {
    let clock = diagram.simulation.clock()?;
    let mut driver = Driver::new(
        diagram.blocks.clone(),
        clock,
        backend,
        DriverConfig::default(),
    );

    let started = Instant::now();
    let summary = driver.run_to_completion()?;
    let elapsed = started.elapsed();
    info!(elapsed_ms = elapsed.as_millis() as u64, "run complete");

    println!(
        "✓ {} steps, {} samples in {:.1} ms",
        summary.steps,
        summary.samples,
        elapsed.as_secs_f64() * 1000.0
    );
    if !summary.failures.is_empty() {
        println!("  {} block failures:", summary.failures.len());
        for failure in &summary.failures {
            println!("    {}: {}", failure.block_id, failure.message);
        }
    }

    if let Some(path) = output {
        let order = diagram.blocks.iter().map(|b| &b.id);
        let csv = output::series_csv(driver.context().series(), order);
        std::fs::write(path, csv)?;
        println!("✓ Exported series to {}", path.display());
    }
    Ok(())
}

fn compute(params: ComputeParams) -> ComputeResponse {
    handle(&ComputeRequest::new(RequestId::new(0), 0, params))
}

fn cmd_step(params: ComputeParams, sample_time: f64, json: bool) -> CliResult<()> {
    let response = compute(params);
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }
    match response.into_result().map_err(CliError::Compute)? {
        ComputeOutput::Sequence(output) => {
            print!("{}", output::step_csv(sample_time, &output));
            Ok(())
        }
        _ => Err(CliError::UnexpectedResult {
            kind: "step response",
        }),
    }
}

fn cmd_freq(params: ComputeParams, json: bool) -> CliResult<()> {
    let response = compute(params);
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }
    match response.into_result().map_err(CliError::Compute)? {
        ComputeOutput::Frequency(samples) => {
            print!("{}", output::frequency_csv(&samples));
            Ok(())
        }
        _ => Err(CliError::UnexpectedResult {
            kind: "frequency response",
        }),
    }
}
