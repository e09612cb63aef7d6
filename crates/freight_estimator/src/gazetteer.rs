use std::{fmt::Display, path::Path, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GazetteerError {
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Duplicate location: {0}")]
    DuplicateLocation(String),

    #[error("Invalid coordinates for {name}: ({lon}, {lat})")]
    InvalidCoordinates { name: String, lon: f64, lat: f64 },

    #[error("Gazetteer needs at least two locations, got {0}")]
    TooFewLocations(usize),

    #[error("Unknown gazetteer preset: {0}")]
    UnknownPreset(String),

    #[error("Failed to read gazetteer file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid gazetteer file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Longitude and latitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && self.lon.abs() <= 180.0
            && self.lat.abs() <= 90.0
    }

    pub fn midpoint(&self, other: &Coordinates) -> Coordinates {
        Coordinates::new((self.lon + other.lon) / 2.0, (self.lat + other.lat) / 2.0)
    }
}

impl From<&Coordinates> for geo_types::Point {
    fn from(coordinates: &Coordinates) -> Self {
        geo_types::Point::new(coordinates.lon, coordinates.lat)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            name: name.into(),
            lon,
            lat,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lon, self.lat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum GazetteerPreset {
    /// Cities, the deep sea port and the Thai border crossing in Cambodia
    Cambodia,
    /// Cambodia plus southern Vietnam: ports, border crossings and the Mekong delta
    CambodiaVietnam,
}

impl Display for GazetteerPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                GazetteerPreset::Cambodia => "cambodia",
                GazetteerPreset::CambodiaVietnam => "cambodia-vietnam",
            }
        )
    }
}

impl FromStr for GazetteerPreset {
    type Err = GazetteerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cambodia" => Ok(GazetteerPreset::Cambodia),
            "cambodia-vietnam" => Ok(GazetteerPreset::CambodiaVietnam),
            other => Err(GazetteerError::UnknownPreset(other.to_owned())),
        }
    }
}

const CAMBODIA: [(&str, f64, f64); 8] = [
    ("Phnom Penh", 104.9282, 11.5564),
    ("Sihanoukville (Port)", 103.5299, 10.6253),
    ("Siem Reap", 103.8552, 13.3633),
    ("Battambang", 103.0605, 13.0957),
    ("Kampot", 104.1819, 10.6148),
    ("Poipet (Border)", 102.5636, 13.6565),
    ("Kratie", 106.0167, 12.4886),
    ("Stung Treng", 105.9699, 13.5258),
];

const SOUTHERN_VIETNAM: [(&str, f64, f64); 8] = [
    ("Ho Chi Minh City", 106.6297, 10.8231),
    ("Cat Lai (Port)", 106.7700, 10.7570),
    ("Cai Mep (Port)", 107.0310, 10.5420),
    ("Moc Bai (Border)", 106.1900, 11.0730),
    ("Tay Ninh", 106.0983, 11.3100),
    ("Can Tho", 105.7469, 10.0452),
    ("Chau Doc", 105.1170, 10.7050),
    ("Ha Tien (Border)", 104.4870, 10.3830),
];

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GazetteerFile {
    locations: Vec<Location>,
}

/// Fixed table of named places. Insertion order is kept since it is the
/// order offered for selection.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    locations: Vec<Location>,
}

impl Gazetteer {
    pub fn new(locations: Vec<Location>) -> Result<Self, GazetteerError> {
        if locations.len() < 2 {
            return Err(GazetteerError::TooFewLocations(locations.len()));
        }

        for (index, location) in locations.iter().enumerate() {
            if !location.coordinates().is_valid() {
                return Err(GazetteerError::InvalidCoordinates {
                    name: location.name.clone(),
                    lon: location.lon,
                    lat: location.lat,
                });
            }

            if locations[..index]
                .iter()
                .any(|other| other.name == location.name)
            {
                return Err(GazetteerError::DuplicateLocation(location.name.clone()));
            }
        }

        Ok(Self { locations })
    }

    pub fn from_preset(preset: GazetteerPreset) -> Self {
        let entries: Vec<(&str, f64, f64)> = match preset {
            GazetteerPreset::Cambodia => CAMBODIA.to_vec(),
            GazetteerPreset::CambodiaVietnam => {
                CAMBODIA.iter().chain(SOUTHERN_VIETNAM.iter()).copied().collect()
            }
        };

        Self {
            locations: entries
                .into_iter()
                .map(|(name, lon, lat)| Location::new(name, lon, lat))
                .collect(),
        }
    }

    /// Parses a table of `[[locations]]` entries with `name`, `lon` and `lat`.
    pub fn from_toml_str(content: &str) -> Result<Self, GazetteerError> {
        let file: GazetteerFile = toml::from_str(content)?;
        Self::new(file.locations)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GazetteerError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn resolve(&self, name: &str) -> Result<Coordinates, GazetteerError> {
        self.locations
            .iter()
            .find(|location| location.name == name)
            .map(Location::coordinates)
            .ok_or_else(|| GazetteerError::UnknownLocation(name.to_owned()))
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn default_start(&self) -> &str {
        &self.locations[0].name
    }

    pub fn default_end(&self) -> &str {
        &self.locations[1].name
    }
}

impl Default for Gazetteer {
    fn default() -> Self {
        Gazetteer::from_preset(GazetteerPreset::Cambodia)
    }
}
