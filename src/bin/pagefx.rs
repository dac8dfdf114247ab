use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "pagefx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the CSS declarations of an effect at a given progress.
    Sample(SampleArgs),
    /// Print per-child stagger delays, one per line.
    Stagger(StaggerArgs),
    /// Replay a scene's scroll offsets and print target styles per frame as JSON lines.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Effect JSON.
    #[arg(long)]
    effect: PathBuf,

    /// Timeline progress in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Child index (requires --total).
    #[arg(long, requires = "total")]
    index: Option<usize>,

    /// Sibling count.
    #[arg(long)]
    total: Option<usize>,
}

#[derive(Parser, Debug)]
struct StaggerArgs {
    /// Sibling count.
    #[arg(long)]
    total: usize,

    /// Delay step in milliseconds.
    #[arg(long)]
    amount: f64,

    #[arg(long, value_enum, default_value_t = FromChoice::First)]
    from: FromChoice,

    /// Grid column count; switches to grid staggering.
    #[arg(long)]
    columns: Option<u32>,

    #[arg(long, value_enum, default_value_t = DirectionChoice::Row)]
    direction: DirectionChoice,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FromChoice {
    First,
    Last,
    Center,
    Edges,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionChoice {
    Row,
    Column,
    Diagonal,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Stagger(args) => cmd_stagger(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON '{}'", path.display()))
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let effect: pagefx::Effect = read_json(&args.effect, "effect")?;
    effect.validate()?;

    let opts = pagefx::RenderOpts::default();
    let style = match (args.index, args.total) {
        (Some(index), Some(total)) => {
            if index >= total {
                anyhow::bail!("--index {index} is out of range for --total {total}");
            }
            effect.child_renderable(index, total, args.progress, opts)
        }
        _ => effect.renderable(args.progress, opts),
    };

    for (property, value) in style.declarations() {
        println!("{property}: {value};");
    }
    Ok(())
}

fn cmd_stagger(args: StaggerArgs) -> anyhow::Result<()> {
    use pagefx::motion::stagger::GridDirection;

    let policy = match args.columns {
        Some(0) => anyhow::bail!("--columns must be > 0"),
        Some(columns) => {
            let direction = match args.direction {
                DirectionChoice::Row => GridDirection::Row,
                DirectionChoice::Column => GridDirection::Column,
                DirectionChoice::Diagonal => GridDirection::Diagonal,
            };
            pagefx::StaggerPolicy::grid(args.amount, columns, direction)
        }
        None => {
            let from = match args.from {
                FromChoice::First => pagefx::StaggerFrom::First,
                FromChoice::Last => pagefx::StaggerFrom::Last,
                FromChoice::Center => pagefx::StaggerFrom::Center,
                FromChoice::Edges => pagefx::StaggerFrom::Edges,
            };
            pagefx::StaggerPolicy::linear(args.amount, from)
        }
    };

    for index in 0..args.total {
        let delay = pagefx::stagger_delay(index, args.total, &policy);
        println!("{}", pagefx::style::property::format_number(delay));
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read scene '{}'", args.in_path.display()))?;
    let scene = pagefx::Scene::from_json_str(&raw)
        .with_context(|| format!("load scene '{}'", args.in_path.display()))?;

    for report in scene.run() {
        let line = serde_json::to_string(&report).with_context(|| "serialize frame report")?;
        println!("{line}");
    }
    Ok(())
}
