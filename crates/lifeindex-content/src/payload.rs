//! Raw generation payloads.
//!
//! These mirror what the model is asked to produce, but every field is
//! optional or defaulted: the adapter passes through whatever parses and
//! leaves the soft bounds (five sectors, five to ten points) to the prompt.
//! Out-of-range values are repaired here rather than rejected.

use lifeindex_core::model::{DiscoveryCategory, EncounterStep, EntityKind};
use serde::Deserialize;

use crate::error::GenerationError;
use crate::fence::strip_code_fence;

const CENTER: f64 = 50.0;

/// A planet as returned by the model, before assembly.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPlanet {
    /// Display name.
    pub name: String,
    /// Classification code such as `EXO-882`.
    pub code: String,
    /// Atmospheric and geological summary.
    pub description: String,
    /// Sectors in display order.
    pub sectors: Vec<RawSector>,
}

/// A sector as returned by the model.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSector {
    /// Provider-supplied id, usually absent.
    pub id: Option<String>,
    /// Sector name.
    pub name: String,
    /// Landscape description.
    pub description: String,
    /// Points of interest.
    pub discovery_points: Vec<RawDiscoveryPoint>,
}

/// A discovery point as returned by the model.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDiscoveryPoint {
    /// Provider-supplied id.
    pub id: Option<String>,
    /// Short title.
    pub label: String,
    /// Observation text.
    pub data: String,
    /// Category tag; unknown tags are repaired to `geology`.
    pub icon_type: String,
    /// Horizontal position in percent.
    pub x: Option<f64>,
    /// Vertical position in percent.
    pub y: Option<f64>,
}

impl RawDiscoveryPoint {
    /// The category, falling back to `Geology` for an unknown tag.
    #[must_use]
    pub fn category(&self) -> DiscoveryCategory {
        DiscoveryCategory::parse(&self.icon_type).unwrap_or(DiscoveryCategory::Geology)
    }

    /// The `(x, y)` position clamped into `[0, 100]`; missing or non-finite
    /// values are centered.
    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (clamp_percent(self.x), clamp_percent(self.y))
    }
}

fn clamp_percent(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 100.0),
        _ => CENTER,
    }
}

/// An encounter as returned by the model. Steps pass through unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEncounter {
    /// Name of the entity.
    pub entity_name: String,
    /// Flora or fauna.
    #[serde(rename = "type")]
    pub kind: EntityKind,
    /// The step graph.
    #[serde(default)]
    pub steps: Vec<EncounterStep>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PlanetBatch {
    Many(Vec<RawPlanet>),
    Wrapped { planets: Vec<RawPlanet> },
}

/// Parses a planet batch from model text, stripping a code fence first.
///
/// A bare array and an object with a `planets` array are accepted. Entries
/// without sectors are dropped, so a batch of blanks comes back empty.
///
/// # Errors
///
/// Returns `GenerationError::Malformed` if the text is not a planet batch.
pub fn parse_planets(text: &str) -> Result<Vec<RawPlanet>, GenerationError> {
    let body = strip_code_fence(text);
    let batch: PlanetBatch =
        serde_json::from_str(&body).map_err(|e| GenerationError::Malformed(e.to_string()))?;
    let (PlanetBatch::Many(planets) | PlanetBatch::Wrapped { planets }) = batch;
    Ok(planets.into_iter().filter(|p| !p.sectors.is_empty()).collect())
}

/// Parses one encounter from model text, stripping a code fence first.
///
/// # Errors
///
/// Returns `GenerationError::Malformed` if the text is not an encounter.
pub fn parse_encounter(text: &str) -> Result<RawEncounter, GenerationError> {
    let body = strip_code_fence(text);
    serde_json::from_str(&body).map_err(|e| GenerationError::Malformed(e.to_string()))
}
