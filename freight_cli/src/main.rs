use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{estimate::EstimateArgs, locations::LocationsArgs};

mod estimate;
mod gazetteer_args;
mod locations;
mod output;
mod parsers;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the locations that can be used as start, stopover or end
    #[command(visible_alias = "l")]
    Locations {
        #[command(flatten)]
        args: LocationsArgs,
    },
    /// Estimate the cost of one truck trip
    #[command(visible_alias = "e")]
    Estimate {
        #[command(flatten)]
        args: EstimateArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Locations { args } => locations::run(args)?,
        Commands::Estimate { args } => estimate::run(args).await?,
    }

    Ok(())
}
