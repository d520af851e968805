//! Canonical data model shared by every context.
//!
//! The serialized shape (camelCase, `nextStepId: null` for ending choices)
//! is the document format written by the durable stores and returned by the
//! HTTP API.

use serde::{Deserialize, Serialize};

/// Number of sectors a finalized planet carries.
pub const SECTORS_PER_PLANET: usize = 5;

/// Category tag of a discovery point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryCategory {
    /// Gravity, radiation and field anomalies.
    Physics,
    /// Rock, crust and mineral structures.
    Geology,
    /// Gas composition and weather.
    Atmosphere,
    /// Organic traces and life signs.
    Biology,
    /// Energy emissions.
    Energy,
    /// Extractable resources.
    Resource,
}

impl DiscoveryCategory {
    /// All categories in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Physics,
        Self::Geology,
        Self::Atmosphere,
        Self::Biology,
        Self::Energy,
        Self::Resource,
    ];

    /// Parses a category tag case-insensitively.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(tag))
    }

    /// The lowercase wire tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Physics => "physics",
            Self::Geology => "geology",
            Self::Atmosphere => "atmosphere",
            Self::Biology => "biology",
            Self::Energy => "energy",
            Self::Resource => "resource",
        }
    }
}

/// A fixed-position point of interest inside a sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryPoint {
    /// Identifier, unique within its sector.
    pub id: String,
    /// Short title.
    pub label: String,
    /// Descriptive payload revealed when examined.
    pub data: String,
    /// Category tag.
    pub icon_type: DiscoveryCategory,
    /// Horizontal position, percent of display width in `[0, 100]`.
    pub x: f64,
    /// Vertical position, percent of display height in `[0, 100]`.
    pub y: f64,
}

/// Kind of entity met in an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityKind {
    /// Plant-like entity.
    Flora,
    /// Animal-like entity.
    Fauna,
}

/// Where a choice leads.
///
/// Serialized as the nullable `nextStepId` field: a step id continues the
/// encounter, `null` ends it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ChoiceOutcome {
    /// Advance to the step with this id.
    Continue(String),
    /// End the encounter.
    #[default]
    End,
}

impl From<Option<String>> for ChoiceOutcome {
    fn from(next: Option<String>) -> Self {
        match next {
            Some(id) => Self::Continue(id),
            None => Self::End,
        }
    }
}

impl From<ChoiceOutcome> for Option<String> {
    fn from(outcome: ChoiceOutcome) -> Self {
        match outcome {
            ChoiceOutcome::Continue(id) => Some(id),
            ChoiceOutcome::End => None,
        }
    }
}

/// An action the explorer can take at a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// The explorer's action.
    pub text: String,
    /// Next step, or the end of the encounter.
    #[serde(rename = "nextStepId", default)]
    pub outcome: ChoiceOutcome,
    /// The entity's reaction to the action.
    #[serde(rename = "finalResponse")]
    pub response: String,
}

/// One node of an encounter's step graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterStep {
    /// Identifier, unique within the encounter.
    pub id: String,
    /// Non-verbal description shown at this step.
    pub message: String,
    /// Available choices, in display order.
    pub choices: Vec<Choice>,
}

/// One accepted choice and the response it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The action text of the chosen choice.
    pub choice: String,
    /// The response text of the chosen choice.
    pub response: String,
}

/// A branching, non-verbal interaction attached to a sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    /// Name of the entity.
    pub entity_name: String,
    /// Flora or fauna.
    #[serde(rename = "type")]
    pub kind: EntityKind,
    /// The step graph.
    pub steps: Vec<EncounterStep>,
    /// Id of the step currently shown. Empty when the graph has no steps.
    pub current_step_id: String,
    /// Accepted choices, oldest first.
    pub history: Vec<HistoryEntry>,
    /// Terminal flag; never reverts once set.
    pub is_completed: bool,
}

impl Encounter {
    /// Looks up a step by id.
    #[must_use]
    pub fn step(&self, id: &str) -> Option<&EncounterStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// The step `current_step_id` points at, if it exists.
    #[must_use]
    pub fn current_step(&self) -> Option<&EncounterStep> {
        self.step(&self.current_step_id)
    }

    /// Choice targets that do not resolve to any step, as `(step id, target)`.
    #[must_use]
    pub fn dangling_targets(&self) -> Vec<(String, String)> {
        self.steps
            .iter()
            .flat_map(|step| {
                step.choices.iter().filter_map(move |choice| match &choice.outcome {
                    ChoiceOutcome::Continue(target) if self.step(target).is_none() => {
                        Some((step.id.clone(), target.clone()))
                    }
                    _ => None,
                })
            })
            .collect()
    }
}

/// One navigable area of a planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    /// Opaque unique id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Landscape description.
    pub description: String,
    /// Image reference.
    pub image_url: String,
    /// Points of interest; order is for display only.
    pub discovery_points: Vec<DiscoveryPoint>,
    /// At most one encounter, attached once and never replaced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Encounter>,
}

impl Sector {
    /// Looks up a discovery point by id.
    #[must_use]
    pub fn discovery_point(&self, id: &str) -> Option<&DiscoveryPoint> {
        self.discovery_points.iter().find(|p| p.id == id)
    }
}

/// Top-level generated exploration unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    /// Opaque unique id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Classification code, conventionally `PREFIX-NUMBER`.
    pub code: String,
    /// Summary text.
    pub description: String,
    /// Sectors in navigation order.
    pub sectors: Vec<Sector>,
    /// Whether non-admin explorers can see this planet.
    pub is_visible: bool,
    /// Display-only creation stamp.
    pub timestamp: String,
}

impl Planet {
    /// Whether any sector of this planet already has an encounter.
    #[must_use]
    pub fn has_encounter(&self) -> bool {
        self.sectors.iter().any(|s| s.encounter.is_some())
    }

    /// Index of the last sector, if the planet has any.
    #[must_use]
    pub fn last_sector_index(&self) -> Option<usize> {
        self.sectors.len().checked_sub(1)
    }
}

/// A free-text note an explorer wrote about a planet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorationLog {
    /// Opaque unique id.
    pub id: String,
    /// Planet the note was written for.
    pub planet_id: String,
    /// Planet name captured at write time.
    pub planet_name: String,
    /// Nickname of the author.
    pub author: String,
    /// Note body.
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Visibility flag.
    pub is_visible: bool,
}
