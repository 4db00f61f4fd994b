use clap::{Parser, Subcommand};
use anyhow::Result;
use dotenvy::dotenv;

mod out;

mod courts;
mod scrape;
mod telemetry;
mod util;

#[derive(Parser)]
#[command(name = "opinions", about = "Court opinion scraping CLI")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Courts(courts::CourtsCmd),
    Scrape(scrape::ScrapeCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    out::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and OPINIONS_LOG_FORMAT
    telemetry::config::init_tracing();

    match cli.command {
        Commands::Courts(args) => courts::run(args)?,
        Commands::Scrape(args) => scrape::run(args).await?,
    }

    Ok(())
}
