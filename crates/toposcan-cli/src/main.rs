use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use toposcan::prelude::*;
use toposcan::store::to_line;
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "toposcan",
    version,
    about = "Enumerate glued block configurations and keep the SCFT and LST ones"
)]
struct Cli {
    /// Disable console output
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Grow every input configuration by one block at its trailing end
    Extend(RunArgs),

    /// Hang single side links or instantons off node blocks
    Decorate(DecorateArgs),

    /// Classify input configurations and write their intersection forms
    Classify(RunArgs),

    /// Write one single-node configuration per node bank value
    Seed(SeedArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Input line file, directory of line files, or record database
    #[arg(value_hint = ValueHint::AnyPath)]
    input: PathBuf,

    /// Output directory, created if absent
    #[arg(value_hint = ValueHint::DirPath)]
    out_dir: PathBuf,

    /// How the input path is read: auto, db or line
    #[arg(long = "in", default_value = "auto", value_parser = parse_format)]
    format: InputFormat,

    /// Worker threads; defaults to the available parallelism
    #[arg(long)]
    threads: Option<usize>,

    /// Pipeline configuration file (TOML or YAML)
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Output format override
    #[arg(long, value_enum)]
    emit: Option<EmitArg>,
}

#[derive(Args, Debug)]
struct DecorateArgs {
    #[command(flatten)]
    run: RunArgs,

    /// Node blocks to decorate: all, head, or a comma list of indices
    #[arg(long, default_value = "all", value_parser = parse_nodes)]
    nodes: NodeSelection,

    /// Decoration kinds: S, I or S,I
    #[arg(long, default_value = "S,I", value_parser = parse_kinds)]
    kinds: KindSelection,

    /// Shard prefix mode: none, kind or head-kind
    #[arg(long, default_value = "none", value_parser = parse_prefix)]
    prefix: PrefixMode,
}

#[derive(Args, Debug)]
struct SeedArgs {
    /// Line file to write
    #[arg(value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Pipeline configuration file naming a growth table
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EmitArg {
    Line,
    Matrix,
}

impl From<EmitArg> for EmitFormat {
    fn from(arg: EmitArg) -> Self {
        match arg {
            EmitArg::Line => EmitFormat::Line,
            EmitArg::Matrix => EmitFormat::Matrix,
        }
    }
}

fn parse_format(s: &str) -> Result<InputFormat, String> {
    s.parse().map_err(|e: toposcan::store::StoreError| e.to_string())
}

fn parse_nodes(s: &str) -> Result<NodeSelection, String> {
    s.parse().map_err(|e: EngineError| e.to_string())
}

fn parse_kinds(s: &str) -> Result<KindSelection, String> {
    s.parse().map_err(|e: EngineError| e.to_string())
}

fn parse_prefix(s: &str) -> Result<PrefixMode, String> {
    s.parse().map_err(|e: EngineError| e.to_string())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    if !cli.quiet {
        toposcan::console::init();
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(message)) => {
            eprintln!("error: {}", message);
            ExitCode::from(1)
        }
        Err(CliError::Run(e)) => {
            error!(event = "run_failed", error = %e);
            ExitCode::SUCCESS
        }
    }
}

#[derive(Debug)]
enum CliError {
    /// Bad configuration file; the run never started.
    Usage(String),
    /// The run started and failed; reported, not fatal.
    Run(EngineError),
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig, CliError> {
    match path {
        Some(path) => PipelineConfig::load(path)
            .map_err(|e| CliError::Usage(format!("{}: {}", path.display(), e))),
        None => Ok(PipelineConfig::default()),
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Extend(args) => run_with(JobSpec::Extend, &args),
        Command::Classify(args) => run_with(JobSpec::Classify, &args),
        Command::Decorate(args) => {
            let config = load_config(args.run.config.as_deref())?;
            let plan = DecorationPlan::from_config(&config.decoration)
                .with_nodes(args.nodes)
                .with_kinds(args.kinds);
            let spec = JobSpec::Decorate {
                plan,
                prefix: args.prefix,
            };
            run_with(spec, &args.run)
        }
        Command::Seed(args) => seed(&args),
    }
}

fn run_with(spec: JobSpec, args: &RunArgs) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(threads) = args.threads {
        config = config.with_threads(ThreadCount::Specific(threads));
    }
    if let Some(emit) = args.emit {
        config = config.with_emit(emit.into());
    }

    let summary = run_job(&spec, &args.input, args.format, &args.out_dir, config)
        .map_err(CliError::Run)?;
    println!("Output dir: {}", summary.out_dir.display());
    Ok(())
}

fn seed(args: &SeedArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let table = config
        .growth_table()
        .map_err(|e| CliError::Usage(e.to_string()))?;

    let mut text = String::new();
    for configuration in table.seeds() {
        text.push_str(&to_line(&configuration));
        text.push('\n');
    }
    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CliError::Usage(e.to_string()))?;
    }
    fs::write(&args.output, text).map_err(|e| CliError::Usage(e.to_string()))?;
    println!("Seeds: {}", args.output.display());
    Ok(())
}
