use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Road surface classes as reported by the openrouteservice `surface` extra.
/// https://giscience.github.io/openrouteservice/api-reference/endpoints/directions/extra-info/surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceCategory {
    Unknown,
    Paved,
    Unpaved,
    Asphalt,
    Concrete,
    Cobblestone,
    Metal,
    Wood,
    CompactedGravel,
    FineGravel,
    Gravel,
    Dirt,
    Ground,
    Ice,
    PavingStones,
    Sand,
    Woodchips,
    Grass,
    GrassPaver,
}

impl SurfaceCategory {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => SurfaceCategory::Paved,
            2 => SurfaceCategory::Unpaved,
            3 => SurfaceCategory::Asphalt,
            4 => SurfaceCategory::Concrete,
            5 => SurfaceCategory::Cobblestone,
            6 => SurfaceCategory::Metal,
            7 => SurfaceCategory::Wood,
            8 => SurfaceCategory::CompactedGravel,
            9 => SurfaceCategory::FineGravel,
            10 => SurfaceCategory::Gravel,
            11 => SurfaceCategory::Dirt,
            12 => SurfaceCategory::Ground,
            13 => SurfaceCategory::Ice,
            14 => SurfaceCategory::PavingStones,
            15 => SurfaceCategory::Sand,
            16 => SurfaceCategory::Woodchips,
            17 => SurfaceCategory::Grass,
            18 => SurfaceCategory::GrassPaver,
            _ => SurfaceCategory::Unknown,
        }
    }

    pub fn is_paved(&self) -> bool {
        matches!(
            self,
            SurfaceCategory::Paved
                | SurfaceCategory::Asphalt
                | SurfaceCategory::Concrete
                | SurfaceCategory::Cobblestone
                | SurfaceCategory::Metal
                | SurfaceCategory::Wood
                | SurfaceCategory::PavingStones
        )
    }

    pub fn is_unpaved(&self) -> bool {
        !self.is_paved() && *self != SurfaceCategory::Unknown
    }
}

/// A range of geometry vertex indices sharing one surface category.
/// Indices point into the route geometry, they are not distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SurfaceSegment {
    pub start_index: usize,
    pub end_index: usize,
    pub category: SurfaceCategory,
}

type RawSegment = (usize, usize, i64);

/// ORS has shipped both the bare value list and the `{values, summary}` object.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum RawSurfaceExtra {
    Values(Vec<RawSegment>),
    Detailed { values: Vec<RawSegment> },
}

impl RawSurfaceExtra {
    pub(crate) fn into_segments(self) -> Vec<SurfaceSegment> {
        let values = match self {
            RawSurfaceExtra::Values(values) => values,
            RawSurfaceExtra::Detailed { values } => values,
        };

        values
            .into_iter()
            .map(|(start_index, end_index, code)| SurfaceSegment {
                start_index,
                end_index,
                category: SurfaceCategory::from_code(code),
            })
            .collect()
    }
}

/// Segment counts per surface class. Only counts are kept: mapping index
/// ranges onto travelled distance is not done, so nothing here feeds pricing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SurfaceSummary {
    pub paved_segments: usize,
    pub unpaved_segments: usize,
    pub unknown_segments: usize,
}

impl SurfaceSummary {
    pub fn from_segments(segments: &[SurfaceSegment]) -> Self {
        segments
            .iter()
            .fold(SurfaceSummary::default(), |mut summary, segment| {
                if segment.category.is_paved() {
                    summary.paved_segments += 1;
                } else if segment.category.is_unpaved() {
                    summary.unpaved_segments += 1;
                } else {
                    summary.unknown_segments += 1;
                }
                summary
            })
    }
}
