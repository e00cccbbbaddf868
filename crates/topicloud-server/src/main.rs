use anyhow::Context as _;
use clap::{Parser, Subcommand};
use std::io::Write as _;
use topicloud_server::config::{AggregateArgs, RenderArgs, ServeArgs};
use tracing_subscriber::EnvFilter;

/// Topic-sentiment word clouds: API server and command-line tools.
#[derive(Debug, Parser)]
#[command(name = "topicloud", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the topic API, the cloud page and static files.
    Serve(ServeArgs),
    /// Print the aggregated topic mapping as JSON.
    Aggregate(AggregateArgs),
    /// Render the topic cloud to SVG.
    Render(RenderArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Serve(args) => topicloud_server::serve(args).await,
        Command::Aggregate(args) => aggregate(&args),
        Command::Render(args) => render(&args),
    }
}

fn aggregate(args: &AggregateArgs) -> anyhow::Result<()> {
    let topics = topicloud::read_source(&args.source.topics)?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&topics)?
    } else {
        serde_json::to_string(&topics)?
    };
    writeln!(std::io::stdout().lock(), "{json}")?;
    Ok(())
}

fn render(args: &RenderArgs) -> anyhow::Result<()> {
    let options = args.cloud.options(args.id.as_deref());
    let svg = topicloud::render::render_source_svg_sync(&args.source.topics, &options)?;
    match args.out.as_deref() {
        Some(out) => {
            std::fs::write(out, &svg)
                .with_context(|| format!("failed to write {}", out.display()))?;
            tracing::info!(out = %out.display(), "wrote topic cloud");
        }
        None => writeln!(std::io::stdout().lock(), "{svg}")?,
    }
    Ok(())
}
