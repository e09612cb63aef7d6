use std::path::PathBuf;

use clap::Args;
use freight_estimator::{
    config::FreightConfig,
    gazetteer::{Gazetteer, GazetteerError, GazetteerPreset},
};

/// Overrides for the location table configured through the environment.
#[derive(Args)]
pub struct GazetteerArgs {
    /// Built-in location table ("cambodia" or "cambodia-vietnam")
    #[arg(short, long, conflicts_with = "gazetteer")]
    preset: Option<GazetteerPreset>,

    /// TOML file with [[locations]] entries (name, lon, lat)
    #[arg(short, long)]
    gazetteer: Option<PathBuf>,
}

impl GazetteerArgs {
    pub fn load(&self, config: &FreightConfig) -> Result<Gazetteer, GazetteerError> {
        match (&self.gazetteer, self.preset) {
            (Some(path), _) => Gazetteer::from_file(path),
            (None, Some(preset)) => Ok(Gazetteer::from_preset(preset)),
            (None, None) => config.load_gazetteer(),
        }
    }
}
