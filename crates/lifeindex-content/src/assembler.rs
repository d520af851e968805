//! Entity assembler: raw payloads to domain entities.
//!
//! Assembly never mutates its input and always builds a fresh entity graph.

use std::collections::HashSet;

use lifeindex_core::clock::Clock;
use lifeindex_core::ids::prefixed_id;
use lifeindex_core::model::{DiscoveryPoint, Encounter, Planet, SECTORS_PER_PLANET, Sector};
use lifeindex_core::rng::DeterministicRng;
use tracing::warn;

use crate::payload::{RawDiscoveryPoint, RawEncounter, RawPlanet, RawSector};

/// Environment image for one sector.
///
/// The seed combines the planet code, the sector index and the generation
/// time, so assembling the same payload twice gives different images.
#[must_use]
pub fn image_url(code: &str, sector_index: usize, generated_at_millis: i64) -> String {
    format!("https://picsum.photos/seed/{code}-S{sector_index}-{generated_at_millis}/1600/900")
}

/// Builds a planet from a raw payload: fresh planet id, ids for sectors that
/// lack one, derived image references, visible, stamped with the clock.
pub fn assemble_planet(
    raw: &RawPlanet,
    clock: &dyn Clock,
    rng: &mut dyn DeterministicRng,
) -> Planet {
    if raw.sectors.len() != SECTORS_PER_PLANET {
        warn!(
            code = %raw.code,
            sectors = raw.sectors.len(),
            "generated planet does not have the expected sector count"
        );
    }

    let generated_at = clock.now_millis();
    let sectors = raw
        .sectors
        .iter()
        .enumerate()
        .map(|(index, sector)| assemble_sector(sector, &raw.code, index, generated_at, rng))
        .collect();

    Planet {
        id: prefixed_id("planet", rng),
        name: raw.name.clone(),
        code: raw.code.clone(),
        description: raw.description.clone(),
        sectors,
        is_visible: true,
        timestamp: clock.stardate(),
    }
}

fn assemble_sector(
    raw: &RawSector,
    code: &str,
    index: usize,
    generated_at: i64,
    rng: &mut dyn DeterministicRng,
) -> Sector {
    let id = match raw.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_owned(),
        _ => prefixed_id("sector", rng),
    };

    let mut seen = HashSet::new();
    let discovery_points = raw
        .discovery_points
        .iter()
        .enumerate()
        .map(|(j, point)| assemble_point(point, &id, j, &mut seen))
        .collect();

    Sector {
        name: raw.name.clone(),
        description: raw.description.clone(),
        image_url: image_url(code, index, generated_at),
        discovery_points,
        encounter: None,
        id,
    }
}

fn assemble_point(
    raw: &RawDiscoveryPoint,
    sector_id: &str,
    index: usize,
    seen: &mut HashSet<String>,
) -> DiscoveryPoint {
    let id = match raw.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() && !seen.contains(id) => id.to_owned(),
        _ => format!("dp-{sector_id}-{index}"),
    };
    seen.insert(id.clone());
    let (x, y) = raw.position();

    DiscoveryPoint {
        id,
        label: raw.label.clone(),
        data: raw.data.clone(),
        icon_type: raw.category(),
        x,
        y,
    }
}

/// Builds an encounter at its first step with empty history.
///
/// An empty step list yields an empty `current_step_id`; such an encounter
/// cannot accept choices.
pub fn assemble_encounter(raw: &RawEncounter) -> Encounter {
    let encounter = Encounter {
        entity_name: raw.entity_name.clone(),
        kind: raw.kind,
        steps: raw.steps.clone(),
        current_step_id: raw.steps.first().map(|s| s.id.clone()).unwrap_or_default(),
        history: Vec::new(),
        is_completed: false,
    };

    let dangling = encounter.dangling_targets();
    if !dangling.is_empty() {
        warn!(
            entity = %encounter.entity_name,
            ?dangling,
            "encounter has choices targeting unknown steps"
        );
    }
    encounter
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use lifeindex_core::model::{
        Choice, ChoiceOutcome, DiscoveryCategory, EncounterStep, EntityKind,
    };
    use lifeindex_test_support::{FixedClock, MockRng, SequenceRng};

    use super::*;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 3, 9, 12, 0, 0).unwrap())
    }

    fn raw_planet(sectors: usize) -> RawPlanet {
        RawPlanet {
            name: "Gliese Orion".to_owned(),
            code: "GLIESE-581".to_owned(),
            description: "Tidally locked.".to_owned(),
            sectors: (0..sectors)
                .map(|i| RawSector {
                    id: None,
                    name: format!("Terminator Band {i}"),
                    description: "Twilight forever.".to_owned(),
                    discovery_points: vec![
                        RawDiscoveryPoint {
                            id: Some("p".to_owned()),
                            label: "Wind Shear".to_owned(),
                            data: "Constant westward flow.".to_owned(),
                            icon_type: "ATMOSPHERE".to_owned(),
                            x: Some(-5.0),
                            y: Some(30.0),
                        },
                        RawDiscoveryPoint {
                            id: Some("p".to_owned()),
                            label: "Salt Flat".to_owned(),
                            data: "Evaporite crust.".to_owned(),
                            icon_type: "resource".to_owned(),
                            x: Some(60.0),
                            y: None,
                        },
                    ],
                })
                .collect(),
        }
    }

    #[test]
    fn test_planet_assembly_stamps_ids_images_and_visibility() {
        // Arrange
        let raw = raw_planet(5);
        let mut rng = SequenceRng::with_ints(vec![1; 64]);

        // Act
        let planet = assemble_planet(&raw, &clock(), &mut rng);

        // Assert
        assert!(planet.id.starts_with("planet-"));
        assert!(planet.is_visible);
        assert_eq!(planet.timestamp, "STARDATE 2026.3");
        assert_eq!(planet.sectors.len(), 5);
        let millis = clock().now_millis();
        for (i, sector) in planet.sectors.iter().enumerate() {
            assert!(sector.id.starts_with("sector-"));
            assert_eq!(sector.image_url, image_url("GLIESE-581", i, millis));
            assert!(sector.encounter.is_none());
        }
    }

    #[test]
    fn test_points_are_repaired_and_ids_made_unique() {
        let raw = raw_planet(1);

        let planet = assemble_planet(&raw, &clock(), &mut MockRng);

        let points = &planet.sectors[0].discovery_points;
        assert_eq!(points[0].id, "p");
        assert_eq!(points[1].id, format!("dp-{}-1", planet.sectors[0].id));
        assert_eq!(points[0].icon_type, DiscoveryCategory::Atmosphere);
        assert_eq!((points[0].x, points[0].y), (0.0, 30.0));
        assert_eq!((points[1].x, points[1].y), (60.0, 50.0));
    }

    #[test]
    fn test_assembled_planet_survives_document_round_trip() {
        let mut planet = assemble_planet(&raw_planet(5), &clock(), &mut MockRng);
        planet.sectors[2].encounter = Some(lifeindex_test_support::branching_encounter());

        let document = serde_json::to_value(&planet).unwrap();
        let restored: Planet = serde_json::from_value(document).unwrap();

        let names: Vec<_> = restored.sectors.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            (0..5).map(|i| format!("Terminator Band {i}")).collect::<Vec<_>>()
        );
        for (before, after) in planet.sectors.iter().zip(&restored.sectors) {
            assert_eq!(before.id, after.id);
            assert_eq!(before.discovery_points, after.discovery_points);
        }
        assert_eq!(restored, planet);
    }

    #[test]
    fn test_provided_sector_id_is_kept() {
        let mut raw = raw_planet(2);
        raw.sectors[1].id = Some("sector-given".to_owned());

        let planet = assemble_planet(&raw, &clock(), &mut MockRng);

        assert_eq!(planet.sectors[1].id, "sector-given");
    }

    #[test]
    fn test_assembly_does_not_touch_input() {
        let raw = raw_planet(5);
        let before = raw.clone();

        let _ = assemble_planet(&raw, &clock(), &mut MockRng);

        assert_eq!(raw, before);
    }

    #[test]
    fn test_short_planet_passes_through() {
        let planet = assemble_planet(&raw_planet(3), &clock(), &mut MockRng);

        assert_eq!(planet.sectors.len(), 3);
    }

    #[test]
    fn test_encounter_starts_at_first_step() {
        let raw = RawEncounter {
            entity_name: "Glass Moth".to_owned(),
            kind: EntityKind::Fauna,
            steps: vec![
                EncounterStep {
                    id: "approach".to_owned(),
                    message: "Wings chime.".to_owned(),
                    choices: vec![Choice {
                        text: "Hum back".to_owned(),
                        outcome: ChoiceOutcome::Continue("dance".to_owned()),
                        response: "It circles.".to_owned(),
                    }],
                },
                EncounterStep {
                    id: "dance".to_owned(),
                    message: "It spirals upward.".to_owned(),
                    choices: vec![],
                },
            ],
        };

        let encounter = assemble_encounter(&raw);

        assert_eq!(encounter.current_step_id, "approach");
        assert!(encounter.history.is_empty());
        assert!(!encounter.is_completed);
        assert_eq!(encounter.steps, raw.steps);
    }

    #[test]
    fn test_encounter_without_steps_has_empty_current_step() {
        let raw = RawEncounter {
            entity_name: "Nothing".to_owned(),
            kind: EntityKind::Flora,
            steps: vec![],
        };

        let encounter = assemble_encounter(&raw);

        assert_eq!(encounter.current_step_id, "");
        assert!(encounter.current_step().is_none());
    }
}
