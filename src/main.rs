use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use chordsheet::sheet::DEFAULT_WIDTH;
use chordsheet::RenderOptions;

#[derive(Debug, Parser)]
#[command(name = "chordsheet", version, about)]
struct Cli {
    /// Sheet source (YAML frontmatter + lyrics)
    input: PathBuf,

    /// Write the output here instead of stdout
    output: Option<PathBuf>,

    /// Semitones to transpose by, added to the sheet's own pitch
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pitch: i32,

    /// Columns per rendered line
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Emit the resolved view as JSON instead of a text sheet
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("Error reading file '{}'", cli.input.display()))?;

    let options = RenderOptions {
        pitch: cli.pitch,
        width: cli.width,
    };

    let rendered = if cli.json {
        let view = chordsheet::render_view(&source, &options)?;
        serde_json::to_string_pretty(&view)?
    } else {
        chordsheet::render_with_options(&source, &options)?
    };

    match cli.output {
        Some(path) => {
            fs::write(&path, &rendered)
                .with_context(|| format!("Error writing to '{}'", path.display()))?;
            eprintln!("Wrote chord sheet to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
