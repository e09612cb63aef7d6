use clap::Args;
use freight_estimator::config::FreightConfig;
use tracing::debug;

use crate::{gazetteer_args::GazetteerArgs, output};

#[derive(Args)]
pub struct LocationsArgs {
    #[command(flatten)]
    gazetteer: GazetteerArgs,
}

pub fn run(args: LocationsArgs) -> Result<(), anyhow::Error> {
    let config = FreightConfig::from_env()?;
    let gazetteer = args.gazetteer.load(&config)?;
    debug!("Loaded {} locations", gazetteer.locations().len());

    println!("{}", output::locations_table(&gazetteer));
    println!(
        "Default route: {} -> {}",
        gazetteer.default_start(),
        gazetteer.default_end()
    );

    Ok(())
}
