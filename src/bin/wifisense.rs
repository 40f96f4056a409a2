//! Wifisense CLI - Command-line interface for the Wifisense simulator
//!
//! Commands:
//! - run: combined evaluation loop (WiFi performance)
//! - wifi: signal, movement and breathing loop
//! - environment: temperature and humidity loop
//! - embedded: send/receive loop against the simulated device
//!
//! Loops run until `--count` is reached or Ctrl+C is pressed.
//! - classify: classify one set of conditions given on the command line
//! - config: print the effective configuration

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fmt::Display;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use tracing::Level;

use wifisense::config::DEFAULT_EXCHANGE_INTERVAL_MS;
use wifisense::encoder::{RecordEncoder, RecordKind, RunSummary};
use wifisense::{
    ClassifierVariant, CombinedSimulator, DeviceResponse, Driver, EmbeddedSimulator,
    EnvironmentSimulator, Evaluation, Movement, PerformanceClassifier, RandomSource, Signal,
    SimError, SimulationConfig, StopHandle, WifiSimulator, WIFISENSE_VERSION,
};

/// Wifisense - simulated WiFi sensing with performance classification
#[derive(Parser)]
#[command(name = "wifisense")]
#[command(version = WIFISENSE_VERSION)]
#[command(about = "Simulate WiFi sensing and classify WiFi performance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output_format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate WiFi performance from combined readings
    Run {
        #[command(flatten)]
        loop_args: LoopArgs,

        /// Classifier variant
        #[arg(long)]
        variant: Option<VariantArg>,

        /// Load configuration from a JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Simulate signal strength, movement and breathing
    Wifi {
        #[command(flatten)]
        loop_args: LoopArgs,
    },

    /// Simulate temperature and humidity
    Environment {
        #[command(flatten)]
        loop_args: LoopArgs,
    },

    /// Alternate between sending data to and receiving a response from the embedded device
    Embedded {
        #[command(flatten)]
        loop_args: LoopArgs,
    },

    /// Classify one set of conditions
    Classify {
        /// WiFi signal (strong, weak, no-signal)
        #[arg(long)]
        signal: Signal,

        /// Temperature (Celsius)
        #[arg(long, allow_negative_numbers = true)]
        temperature: i32,

        /// Relative humidity (percent)
        #[arg(long, allow_negative_numbers = true)]
        humidity: i32,

        /// Embedded device response (acknowledge, error, timeout)
        #[arg(long)]
        response: DeviceResponse,

        /// Movement (none, walking, running, falling); omit for the basic variant
        #[arg(long)]
        movement: Option<Movement>,

        /// Load thresholds from a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration as JSON
    Config {
        /// Configuration file to load and validate
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct LoopArgs {
    /// Delay between iterations in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Stop after this many iterations (runs until interrupted when omitted)
    #[arg(long)]
    count: Option<u64>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable lines
    Text,
    /// Newline-delimited JSON (one record per line)
    Ndjson,
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    /// Movement is drawn and constrains every tier
    MovementAware,
    /// Movement is ignored
    Basic,
}

impl From<VariantArg> for ClassifierVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::MovementAware => ClassifierVariant::MovementAware,
            VariantArg::Basic => ClassifierVariant::Basic,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let error = CliError::from(e);
            eprintln!(
                "{}",
                serde_json::to_string(&error).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), WifisenseCliError> {
    let format = cli.output_format;

    match cli.command {
        Commands::Run {
            loop_args,
            variant,
            config,
        } => {
            let config = merge_config(load_config(config.as_deref())?, variant, &loop_args)?;
            cmd_run(&config, format)
        }

        Commands::Wifi { loop_args } => {
            let config = merge_config(SimulationConfig::default(), None, &loop_args)?;
            cmd_wifi(&config, format)
        }

        Commands::Environment { loop_args } => {
            let config = merge_config(SimulationConfig::default(), None, &loop_args)?;
            cmd_environment(&config, format)
        }

        Commands::Embedded { loop_args } => {
            let base = SimulationConfig {
                interval_ms: DEFAULT_EXCHANGE_INTERVAL_MS,
                ..Default::default()
            };
            let config = merge_config(base, None, &loop_args)?;
            cmd_embedded(&config, format)
        }

        Commands::Classify {
            signal,
            temperature,
            humidity,
            response,
            movement,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            config.thresholds.validate()?;
            cmd_classify(
                &config,
                signal,
                temperature,
                humidity,
                response,
                movement,
                format,
            )
        }

        Commands::Config { config } => {
            let config = load_config(config.as_deref())?;
            config.validate()?;
            println!("{}", config.to_json()?);
            Ok(())
        }
    }
}

fn cmd_run(config: &SimulationConfig, format: OutputFormat) -> Result<(), WifisenseCliError> {
    let mut simulator = CombinedSimulator::from_config(config);
    let driver = Driver::from_config(config);
    stop_on_ctrl_c(driver.stop_handle());

    let mut emitter = Emitter::new(format, Some(simulator.seed()), io::stdout());
    run_combined(&mut simulator, &driver, &mut emitter)?;
    Ok(())
}

/// Evaluate on every tick, then emit the label tally however the run ended
fn run_combined<W: Write>(
    simulator: &mut CombinedSimulator,
    driver: &Driver,
    emitter: &mut Emitter<W>,
) -> Result<RunSummary, WifisenseCliError> {
    let mut summary = RunSummary::default();

    tracing::info!(
        seed = simulator.seed(),
        variant = simulator.variant().as_str(),
        "starting combined simulation"
    );

    let stats = driver.run(|tick| {
        let evaluation = simulator.evaluate();
        summary.record(evaluation.performance);
        emitter.emit(RecordKind::Evaluation, tick, &evaluation, &evaluation)
    })?;

    emitter.emit(RecordKind::Summary, stats.ticks, summary, summary)?;
    Ok(summary)
}

fn cmd_wifi(config: &SimulationConfig, format: OutputFormat) -> Result<(), WifisenseCliError> {
    let source = random_source(config);
    let mut emitter = Emitter::new(format, Some(source.seed()), io::stdout());
    let mut simulator = WifiSimulator::new(source);
    let driver = Driver::from_config(config);
    stop_on_ctrl_c(driver.stop_handle());

    driver.run(|tick| {
        let reading = simulator.sample();
        emitter.emit(RecordKind::Wifi, tick, reading, reading)
    })?;

    Ok(())
}

fn cmd_environment(
    config: &SimulationConfig,
    format: OutputFormat,
) -> Result<(), WifisenseCliError> {
    let source = random_source(config);
    let mut emitter = Emitter::new(format, Some(source.seed()), io::stdout());
    let mut simulator = EnvironmentSimulator::new(source);
    let driver = Driver::from_config(config);
    stop_on_ctrl_c(driver.stop_handle());

    driver.run(|tick| {
        let reading = simulator.sample();
        emitter.emit(RecordKind::Environment, tick, reading, reading)
    })?;

    Ok(())
}

/// One tick sends, the next receives, so each half is one interval apart
fn cmd_embedded(config: &SimulationConfig, format: OutputFormat) -> Result<(), WifisenseCliError> {
    let source = random_source(config);
    let mut emitter = Emitter::new(format, Some(source.seed()), io::stdout());
    let mut simulator = EmbeddedSimulator::new(source);
    let driver = Driver::from_config(config);
    stop_on_ctrl_c(driver.stop_handle());

    driver.run(|tick| {
        let event = simulator.next_event();
        emitter.emit(RecordKind::Device, tick, event, event)
    })?;

    Ok(())
}

fn cmd_classify(
    config: &SimulationConfig,
    signal: Signal,
    temperature_c: i32,
    humidity_pct: i32,
    response: DeviceResponse,
    movement: Option<Movement>,
    format: OutputFormat,
) -> Result<(), WifisenseCliError> {
    let classifier = PerformanceClassifier::new(config.thresholds);
    let performance = classifier.classify(signal, temperature_c, humidity_pct, response, movement);

    let evaluation = Evaluation {
        observed_at: Utc::now(),
        temperature_c,
        humidity_pct,
        response,
        signal,
        movement,
        performance,
    };

    // Nothing is drawn, so there is no seed to report
    let mut emitter = Emitter::new(format, None, io::stdout());
    emitter.emit(RecordKind::Evaluation, 0, &evaluation, &evaluation)
}

// Helper functions

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// Trigger `stop` on the first Ctrl+C instead of killing the process
fn stop_on_ctrl_c(stop: StopHandle) {
    let spawned = thread::Builder::new()
        .name("ctrl-c".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    tracing::warn!(error = %e, "Ctrl+C handler unavailable");
                    return;
                }
            };

            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        tracing::info!("Ctrl+C received, stopping");
                        stop.stop();
                    }
                    Err(e) => tracing::warn!(error = %e, "failed to listen for Ctrl+C"),
                }
            });
        });

    if let Err(e) = spawned {
        tracing::warn!(error = %e, "Ctrl+C handler unavailable");
    }
}

/// Read a configuration file without validating it; callers validate after merging flags
fn load_config(path: Option<&Path>) -> Result<SimulationConfig, WifisenseCliError> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            Ok(SimulationConfig::parse_json(&json)?)
        }
        None => Ok(SimulationConfig::default()),
    }
}

/// Apply command-line overrides on top of `config`, then validate the result
fn merge_config(
    mut config: SimulationConfig,
    variant: Option<VariantArg>,
    loop_args: &LoopArgs,
) -> Result<SimulationConfig, WifisenseCliError> {
    if let Some(variant) = variant {
        config.variant = variant.into();
    }
    if let Some(interval_ms) = loop_args.interval_ms {
        config.interval_ms = interval_ms;
    }
    if loop_args.count.is_some() {
        config.max_iterations = loop_args.count;
    }
    if loop_args.seed.is_some() {
        config.seed = loop_args.seed;
    }

    config.validate()?;
    Ok(config)
}

fn random_source(config: &SimulationConfig) -> RandomSource {
    match config.seed {
        Some(seed) => RandomSource::seeded(seed),
        None => RandomSource::from_entropy(),
    }
}

/// Writes each tick as text or as an NDJSON record
struct Emitter<W> {
    format: OutputFormat,
    encoder: RecordEncoder,
    out: W,
}

impl<W: Write> Emitter<W> {
    fn new(format: OutputFormat, seed: Option<u64>, out: W) -> Self {
        let encoder = match seed {
            Some(seed) => RecordEncoder::new(seed),
            None => RecordEncoder::unseeded(),
        };

        Self {
            format,
            encoder,
            out,
        }
    }

    fn emit<T: Serialize>(
        &mut self,
        kind: RecordKind,
        sequence: u64,
        data: T,
        text: impl Display,
    ) -> Result<(), WifisenseCliError> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", text)?,
            OutputFormat::Ndjson => {
                let line = self.encoder.encode_to_json(kind, sequence, data)?;
                writeln!(self.out, "{}", line)?
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

// Error types

#[derive(Debug)]
enum WifisenseCliError {
    Io(io::Error),
    Sim(SimError),
}

impl From<io::Error> for WifisenseCliError {
    fn from(e: io::Error) -> Self {
        WifisenseCliError::Io(e)
    }
}

impl From<SimError> for WifisenseCliError {
    fn from(e: SimError) -> Self {
        WifisenseCliError::Sim(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<WifisenseCliError> for CliError {
    fn from(e: WifisenseCliError) -> Self {
        match e {
            WifisenseCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            WifisenseCliError::Sim(SimError::JsonError(e)) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            WifisenseCliError::Sim(e @ SimError::InvalidConfig(_)) => CliError {
                code: "INVALID_CONFIG".to_string(),
                message: e.to_string(),
                hint: Some("Run 'wifisense config' to see the effective configuration".to_string()),
            },
            WifisenseCliError::Sim(e @ SimError::UnknownValue { .. }) => CliError {
                code: "UNKNOWN_VALUE".to_string(),
                message: e.to_string(),
                hint: Some("Run with --help to list accepted values".to_string()),
            },
        }
    }
}
