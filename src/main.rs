//! Merge two Steam screenshots.vdf files from the command line.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use steam_screenshot_merge::{merge_screenshots, parse_text, write_text_file};

/// Merge two Steam screenshots.vdf files.
///
/// Screenshots from SOURCE are appended to TARGET's per-game entries,
/// renumbered so no index collides, and the result is written to OUTPUT.
/// TARGET and SOURCE are not modified.
#[derive(Parser, Debug)]
#[command(name = "steam-screenshot-merge", version, about)]
struct Cli {
    /// Base screenshots.vdf; its entries keep their indices
    target: PathBuf,

    /// screenshots.vdf whose entries are appended after the base file's
    source: PathBuf,

    /// Path for the merged output (written atomically)
    output: PathBuf,

    /// Verbose output (repeat for trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q')]
    quiet: bool,
}

/// Initialize the tracing subscriber from CLI flags, with `RUST_LOG`
/// overriding the default filter.
fn init_logging(verbose: u8, quiet: bool) {
    let default_directive = if quiet {
        "steam_screenshot_merge=error"
    } else {
        match verbose {
            0 => "steam_screenshot_merge=info",
            1 => "steam_screenshot_merge=debug",
            _ => "steam_screenshot_merge=trace",
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    for path in [&cli.target, &cli.source] {
        if !path.is_file() {
            anyhow::bail!("input file does not exist: {}", path.display());
        }
    }

    info!("reading {}", cli.target.display());
    let target_text = std::fs::read_to_string(&cli.target)
        .with_context(|| format!("failed to read {}", cli.target.display()))?;
    let target = parse_text(&target_text)
        .with_context(|| format!("failed to parse {}", cli.target.display()))?;

    info!("reading {}", cli.source.display());
    let source_text = std::fs::read_to_string(&cli.source)
        .with_context(|| format!("failed to read {}", cli.source.display()))?;
    let source = parse_text(&source_text)
        .with_context(|| format!("failed to parse {}", cli.source.display()))?;

    info!("merging");
    let merged = merge_screenshots(target, source);
    debug!(
        games = merged
            .get_obj(&["screenshots"])
            .map_or(0, steam_screenshot_merge::Obj::len),
        "merge complete"
    );

    info!("writing {}", cli.output.display());
    write_text_file(&cli.output, &merged)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    Ok(())
}
