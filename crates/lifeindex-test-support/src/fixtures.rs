//! Fixture builders for planets, sectors and encounters.

use lifeindex_core::model::{
    Choice, ChoiceOutcome, DiscoveryCategory, DiscoveryPoint, Encounter, EncounterStep,
    EntityKind, Planet, Sector,
};

/// A sector with two discovery points and no encounter.
#[must_use]
pub fn sample_sector(planet_id: &str, index: usize) -> Sector {
    let id = format!("{planet_id}-sector-{index}");
    Sector {
        discovery_points: vec![
            DiscoveryPoint {
                id: format!("dp-{id}-0"),
                label: "Gravity Drift".to_owned(),
                data: "Local gravity fluctuates by 3%.".to_owned(),
                icon_type: DiscoveryCategory::Physics,
                x: 25.0,
                y: 40.0,
            },
            DiscoveryPoint {
                id: format!("dp-{id}-1"),
                label: "Crystal Vein".to_owned(),
                data: "A refractive silicate vein runs under the crust.".to_owned(),
                icon_type: DiscoveryCategory::Geology,
                x: 70.0,
                y: 55.5,
            },
        ],
        name: format!("Sector {}", index + 1),
        description: "Wind-carved basalt.".to_owned(),
        image_url: format!("https://picsum.photos/seed/{id}/1600/900"),
        encounter: None,
        id,
    }
}

/// A visible planet with five encounter-free sectors.
#[must_use]
pub fn sample_planet(id: &str) -> Planet {
    Planet {
        id: id.to_owned(),
        name: "Kepler Void".to_owned(),
        code: "KEPLER-442".to_owned(),
        description: "A cold world under a dim star.".to_owned(),
        sectors: (0..5).map(|i| sample_sector(id, i)).collect(),
        is_visible: true,
        timestamp: "STARDATE 2026.1".to_owned(),
    }
}

/// The two-step encounter used across state-machine tests:
/// `start --A--> mid --C--> end`, with `start --B--> end` as a shortcut.
#[must_use]
pub fn branching_encounter() -> Encounter {
    Encounter {
        entity_name: "Lumen Spores".to_owned(),
        kind: EntityKind::Flora,
        steps: vec![
            EncounterStep {
                id: "start".to_owned(),
                message: "A colony of spores pulses blue.".to_owned(),
                choices: vec![
                    Choice {
                        text: "A".to_owned(),
                        outcome: ChoiceOutcome::Continue("mid".to_owned()),
                        response: "responseA".to_owned(),
                    },
                    Choice {
                        text: "B".to_owned(),
                        outcome: ChoiceOutcome::End,
                        response: "responseB".to_owned(),
                    },
                ],
            },
            EncounterStep {
                id: "mid".to_owned(),
                message: "The light turns red.".to_owned(),
                choices: vec![Choice {
                    text: "C".to_owned(),
                    outcome: ChoiceOutcome::End,
                    response: "responseC".to_owned(),
                }],
            },
        ],
        current_step_id: "start".to_owned(),
        history: vec![],
        is_completed: false,
    }
}
