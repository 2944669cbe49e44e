//! CLI binary for tavern-strip.
//!
//! A thin shim over the library crate that maps CLI flags to library calls
//! and prints per-file results.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tavern_strip::{inspect, process_file, CardSummary, ProcessOutput, StorageConfig};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Strip one card; output lands in ./processed/de8_alice.png
  tavern-strip alice.png

  # Batch, explicit output directory
  tavern-strip -o /tmp/clean cards/*.png

  # Look before touching anything
  tavern-strip --inspect-only alice.png

  # Machine-readable results
  tavern-strip --json -o out alice.png bob.png

OUTPUT:
  Each input produces exactly one new file named de8_<input name> in the
  output directory. The input file is never modified. Cards whose payload
  was stored as plain JSON are normalized to the base64-wrapped form.

ENVIRONMENT VARIABLES:
  TAVERN_STRIP_OUT   Default output directory (same as --out-dir)
  RUST_LOG           Tracing filter, e.g. RUST_LOG=tavern_strip=debug
"#;

/// Strip paired asterisk emphasis from Tavern character-card PNGs.
#[derive(Parser, Debug)]
#[command(
    name = "tavern-strip",
    version,
    about = "Strip paired asterisk emphasis from Tavern character-card PNGs",
    long_about = "Rewrite the character card embedded in each PNG's `Chara` text chunk, \
removing matched *asterisk* pairs from the prose fields while preserving the image pixels \
and every other metadata chunk. Outputs a de8_-prefixed copy; inputs are never modified.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Character-card PNG files to process.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory for de8_-prefixed copies.
    ///
    /// Defaults to the platform processed directory: on Termux/Android the
    /// Termux home, elsewhere ./processed under the current directory.
    #[arg(short, long, env = "TAVERN_STRIP_OUT")]
    out_dir: Option<PathBuf>,

    /// Decode and report each card, write nothing.
    #[arg(long)]
    inspect_only: bool,

    /// Print one JSON object per file instead of human-readable lines.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let mut failures = 0usize;
        for input in &cli.inputs {
            match inspect(input) {
                Ok(summary) => print_summary(&cli, input, &summary)?,
                Err(e) => {
                    failures += 1;
                    eprintln!("{} {}: {e}", red("✗"), input.display());
                }
            }
        }
        if failures == cli.inputs.len() {
            bail!("no files could be inspected");
        }
        return Ok(());
    }

    // ── Resolve output directory ─────────────────────────────────────────
    let out_dir = match cli.out_dir.clone() {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
            dir
        }
        None => {
            let storage = default_storage();
            storage
                .ensure_dirs()
                .context("failed to create default storage directories")?;
            storage.processed_dir
        }
    };

    // ── Process each input ───────────────────────────────────────────────
    let mut processed: Vec<ProcessOutput> = Vec::new();
    let mut failures = 0usize;
    for input in &cli.inputs {
        match process_file(input, &out_dir) {
            Ok(output) => {
                if cli.json {
                    println!("{}", serde_json::to_string(&output)?);
                } else if !cli.quiet {
                    println!(
                        "{} {}  →  {}  {}",
                        green("✓"),
                        input.display(),
                        bold(&output.output_path.display().to_string()),
                        dim(&format!("{} fields changed", output.stats.fields_changed)),
                    );
                }
                processed.push(output);
            }
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {e}", red("✗"), input.display());
            }
        }
    }

    // ── Summary ──────────────────────────────────────────────────────────
    if processed.is_empty() {
        bail!("no files were successfully processed");
    }
    if !cli.quiet && !cli.json && cli.inputs.len() > 1 {
        eprintln!(
            "{} {}/{} files processed into {}",
            if failures == 0 { green("✔") } else { red("⚠") },
            bold(&processed.len().to_string()),
            cli.inputs.len(),
            out_dir.display(),
        );
    }

    Ok(())
}

/// Platform defaults matching the original tool family: Termux-on-Android
/// gets fixed home paths, everything else works under the current directory.
fn default_storage() -> StorageConfig {
    if cfg!(target_os = "linux") && std::env::var_os("ANDROID_STORAGE").is_some() {
        return StorageConfig::new(
            "/data/data/com.termux/files/home/uploads",
            "/data/data/com.termux/files/home/processed",
        );
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    StorageConfig::under(cwd)
}

fn print_summary(cli: &Cli, input: &PathBuf, summary: &CardSummary) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string(summary)?);
        return Ok(());
    }
    println!("File:                {}", input.display());
    println!(
        "Name:                {}",
        summary.name.as_deref().unwrap_or("<unnamed>")
    );
    println!("Payload encoding:    {:?}", summary.encoding);
    println!("Lorebook entries:    {}", summary.book_entries);
    println!("Alternate greetings: {}", summary.alternate_greetings);
    println!("Fields with markers: {}", summary.fields_with_markers);
    Ok(())
}
