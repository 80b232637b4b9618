use anyhow::{Context, Result};
use clap::Parser;
use respond_client::{evaluation_config, parse_schema};
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{fs, io};
use tracing::info;

/// Derive per-field grading rules from a field schema.
///
/// The schema is a flat JSON object mapping snake_case field names to short
/// descriptions. It may be wrapped in a ```json fence, as model output usually is.
#[derive(Debug, Parser)]
#[command(
    name = "evaluation-config",
    author,
    version,
    about = "Build an evaluation config from a field schema",
    long_about = None
)]
struct Args {
    /// Path to the schema JSON; reads stdin when omitted or `-`
    #[arg(short = 's', long = "schema")]
    schema_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    logger::init();
    let args = Args::parse();

    let raw = read_input(args.schema_path.as_deref())?;
    let schema = parse_schema(&raw).context("Failed to parse schema")?;
    let config = evaluation_config(&schema);
    info!(fields = config.len(), "derived evaluation config");

    let out = json!({
        "schema": schema,
        "evaluation_config": config,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading schema from stdin")?;
            Ok(buf)
        }
    }
}
