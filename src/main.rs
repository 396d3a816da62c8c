use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use thesis_topics::{Commands, Container, ContainerConfig, Router};

#[derive(Parser)]
#[command(name = "thesis-topics")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Generate topics offline without calling Gemini
    #[arg(long, global = true)]
    mock: bool,

    /// Gemini model identifier (defaults to GEMINI_MODEL or gemini-2.5-flash)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Gemini API base URL (defaults to GEMINI_BASE_URL or the public endpoint)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(ContainerConfig {
        mock: cli.mock,
        model: cli.model,
        base_url: cli.base_url,
    });

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
