use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Args;
use freight_estimator::{
    config::FreightConfig,
    cost::{
        DEFAULT_FUEL_COST_PER_KM, DEFAULT_RENTAL_FEE_PER_DAY, DEFAULT_UNPAVED_SURCHARGE_FACTOR,
        Pricing,
    },
    estimator::{EstimateError, Estimator, Itinerary},
    view::estimate_view,
};
use freight_routing::ors_api::OrsDirectionsClient;
use tracing::{info, warn};

use crate::{gazetteer_args::GazetteerArgs, output, parsers};

#[derive(Args)]
pub struct EstimateArgs {
    /// Start, optional stopover and end, in travel order, as listed by `freight locations`
    #[arg(required = true, value_name = "LOCATION")]
    waypoints: Vec<String>,

    /// Truck rental in dollars per day
    #[arg(long, default_value_t = DEFAULT_RENTAL_FEE_PER_DAY)]
    rental_fee: f64,

    /// Fuel and wear in dollars per km
    #[arg(long, default_value_t = DEFAULT_FUEL_COST_PER_KM)]
    fuel_cost: f64,

    /// Unpaved road surcharge factor (1.0 to 3.0), not applied to the total
    #[arg(long, value_parser = parsers::parse_surcharge, default_value_t = DEFAULT_UNPAVED_SURCHARGE_FACTOR)]
    surcharge: f64,

    /// openrouteservice key, used when ORS_API_KEY and the secrets file have none
    #[arg(long)]
    api_key: Option<String>,

    /// Timeout for the directions request (e.g., "30s", "PT1M")
    #[arg(long, value_parser = parsers::parse_timeout)]
    timeout: Option<Duration>,

    /// Write the map overlay (route and markers) as GeoJSON
    #[arg(long)]
    map_out: Option<PathBuf>,

    /// Print the raw estimate as JSON instead of tables
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    gazetteer: GazetteerArgs,
}

impl EstimateArgs {
    fn itinerary(&self) -> Result<Itinerary, EstimateError> {
        let waypoints: Vec<&str> = self.waypoints.iter().map(String::as_str).collect();
        Itinerary::from_waypoints(&waypoints)
    }

    fn pricing(&self) -> Pricing {
        Pricing {
            rental_fee_per_day: self.rental_fee,
            fuel_cost_per_km: self.fuel_cost,
            unpaved_surcharge_factor: self.surcharge,
        }
    }
}

pub async fn run(args: EstimateArgs) -> Result<(), anyhow::Error> {
    let mut config = FreightConfig::from_env()?;
    if let Some(timeout) = args.timeout {
        config.http_timeout = timeout;
    }

    let gazetteer = args
        .gazetteer
        .load(&config)
        .context("Failed to load the gazetteer")?;
    let client = OrsDirectionsClient::new(config.ors_params())?;
    let estimator = Estimator::new(gazetteer, client);

    let itinerary = args.itinerary()?;
    let credentials = config.credential_chain(args.api_key.clone());

    let estimate = match estimator
        .estimate(&itinerary, &args.pricing(), &credentials)
        .await
    {
        Ok(estimate) => estimate,
        Err(err) if err.is_warning() => {
            warn!("{}", err);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let view = estimate_view(&estimate);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        println!("{}", output::tiles_table(&view));
        println!("{}", output::breakdown_table(&view));
        println!("{}", output::surface_note(&view.surface));
    }

    if let Some(path) = &args.map_out {
        let overlay = serde_json::to_string_pretty(&view.map.overlay)?;
        std::fs::write(path, overlay)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Map overlay written to {}", path.display());
    }

    Ok(())
}
