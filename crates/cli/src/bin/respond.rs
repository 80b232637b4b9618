use anyhow::{Context, Result};
use clap::Parser;
use respond_client::config::env_allows_remote;
use respond_client::{write_record, RespondClient, RespondConfig, DEFAULT_SERVER_URL};

const DEFAULT_PROMPT: &str = "Write a short poem about spring.";
const DEFAULT_CONTEXT: &str = "You are a helpful assistant.";

/// Send a prompt and context to the local respond API and print the merged record.
///
/// The record is `{"prompt", "context", "answer"}` as 2-space indented JSON on stdout.
/// Any connection, HTTP or decode failure exits non-zero and prints nothing to stdout.
#[derive(Debug, Parser)]
#[command(
    name = "respond",
    author,
    version,
    about = "POST a prompt/context pair to the respond API and print the record",
    long_about = None
)]
struct Args {
    /// Endpoint that answers `{prompt, context}` with `{output}`
    #[arg(short = 'u', long = "url", env = "RESPOND_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    url: String,

    /// Prompt text sent to the server
    #[arg(short = 'p', long = "prompt", default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Context text sent alongside the prompt
    #[arg(short = 'c', long = "context", default_value = DEFAULT_CONTEXT)]
    context: String,

    /// Allow an endpoint that is not on this machine (also RESPOND_ALLOW_REMOTE=1)
    #[arg(long = "allow-remote")]
    allow_remote: bool,
}

fn main() -> Result<()> {
    // .env must be loaded before parsing so clap sees RESPOND_SERVER_URL from it.
    dotenvy::dotenv().ok();
    logger::init();

    let args = Args::parse();

    let config =
        RespondConfig::new(args.url).allow_remote(args.allow_remote || env_allows_remote());
    let client = RespondClient::new(config).context("Failed to initialize respond client")?;

    let record = client
        .run(&args.prompt, &args.context)
        .with_context(|| format!("POST {} failed", client.endpoint()))?;

    write_record(&mut std::io::stdout().lock(), &record)
        .context("Failed to write record to stdout")?;

    Ok(())
}
