use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "seqline", version)]
struct Cli {
    /// Log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a sequence and write the plan as JSON.
    Compile(CompileArgs),
    /// Compile a sequence and print a short summary.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Input sequence JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Engine settings JSON (default duration, eases, repeat limit).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write single-line JSON.
    #[arg(long)]
    compact: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input sequence JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Engine settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Compile(args) => cmd_compile(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON '{}'", path.display()))
}

fn make_sequencer(settings: Option<&Path>) -> anyhow::Result<seqline::Sequencer> {
    let sequencer = seqline::Sequencer::new();
    Ok(match settings {
        Some(path) => sequencer.with_settings(read_json(path, "settings")?),
        None => sequencer,
    })
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let seq: seqline::Sequence = read_json(&args.in_path, "sequence")?;
    let sequencer = make_sequencer(args.settings.as_deref())?;
    let plan = sequencer
        .compile(&seq)
        .with_context(|| format!("compile '{}'", args.in_path.display()))?;

    let mut json = if args.compact {
        serde_json::to_string(&plan)?
    } else {
        serde_json::to_string_pretty(&plan)?
    };
    json.push('\n');

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            std::io::stdout()
                .lock()
                .write_all(json.as_bytes())
                .context("write plan to stdout")?;
        }
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let seq: seqline::Sequence = read_json(&args.in_path, "sequence")?;
    let sequencer = make_sequencer(args.settings.as_deref())?;
    let plan = sequencer
        .compile(&seq)
        .with_context(|| format!("compile '{}'", args.in_path.display()))?;

    println!("duration: {}", plan.duration);
    println!("subjects: {}", plan.subjects.len());
    println!("tracks: {}", plan.track_count());
    println!("warnings: {}", plan.warnings.len());
    for w in &plan.warnings {
        println!("  {w}");
    }
    Ok(())
}
