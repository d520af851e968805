//! Local planet and encounter generator.
//!
//! Builds entities from built-in tables with the injected RNG. Used when no
//! remote provider is configured or when it yields nothing.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use lifeindex_core::clock::Clock;
use lifeindex_core::ids::prefixed_id;
use lifeindex_core::model::{
    Choice, ChoiceOutcome, DiscoveryCategory, DiscoveryPoint, Encounter, EncounterStep,
    EntityKind, Planet, SECTORS_PER_PLANET, Sector,
};
use lifeindex_core::provider::ContentProvider;
use lifeindex_core::rng::DeterministicRng;

const PREFIXES: &[&str] = &[
    "NEO", "EXO", "TRAPPIST", "KEPLER", "GLIESE", "ZETA", "ALTAIR", "VEGA", "PROXIMA",
];
const SUFFIXES: &[&str] = &["PRIME", "BETA", "9", "IV", "VII", "X", "ORION", "VOID", "CORE"];
const SECTOR_NAMES: &[&str] = &[
    "Silent Plain",
    "Crystal Caverns",
    "Liquid Methane Lake",
    "Silicon Spire Field",
    "Inversion Zone",
    "Dense Carbon Delta",
    "Electric Storm Desert",
    "Volatile Gas Canyon",
    "Frozen Magma Basin",
];
const DISCOVERY_LABELS: &[&str] = &[
    "Atmospheric Composition",
    "Crustal Structure Scan",
    "Energy Wave Trace",
    "Trace Element Track",
    "Gravity Fluctuation Log",
    "Radiant Energy Reading",
];
const DISCOVERY_DATA: &[&str] = &[
    "High concentrations of inert gas detected. Poorly habitable, but suitable for energy extraction.",
    "Regular tremors inside the crust. A large subterranean cavity is likely.",
    "Crystals with a rare lattice found in surface rock. Optical refraction is abnormally high.",
    "Very high liquid oxygen concentration. Low surface temperature drives unusual weather.",
    "A strong electromagnetic field envelops the surface. Standard comms suffer heavy interference.",
    "Organic compound traces in ancient sediment. An ecosystem may have existed millions of years ago.",
];

const POINTS_PER_SECTOR: usize = 3;
const CODE_MIN: u32 = 100;
const CODE_MAX: u32 = 999;

fn pick<'a>(table: &[&'a str], rng: &mut dyn DeterministicRng) -> &'a str {
    let last = u32::try_from(table.len().saturating_sub(1)).unwrap_or(u32::MAX);
    let index = rng.next_u32_range(0, last) as usize;
    table.get(index).copied().unwrap_or_default()
}

fn grayscale_image(code: &str, sector_index: usize) -> String {
    format!("https://picsum.photos/seed/{code}-sec-{sector_index}/1600/900?grayscale=1")
}

/// Builds one planet from the built-in tables.
pub fn local_planet(clock: &dyn Clock, rng: &mut dyn DeterministicRng) -> Planet {
    let prefix = pick(PREFIXES, rng);
    let suffix = pick(SUFFIXES, rng);
    let code = format!("{prefix}-{}", rng.next_u32_range(CODE_MIN, CODE_MAX));
    let name = format!("{prefix} {suffix}");

    let sectors = (0..SECTORS_PER_PLANET)
        .map(|i| {
            let id = prefixed_id("sector", rng);
            let discovery_points = (0..POINTS_PER_SECTOR)
                .map(|j| DiscoveryPoint {
                    id: format!("dp-{id}-{j}"),
                    label: pick(DISCOVERY_LABELS, rng).to_owned(),
                    data: pick(DISCOVERY_DATA, rng).to_owned(),
                    icon_type: pick_category(rng),
                    x: 20.0 + rng.next_f64() * 60.0,
                    y: 20.0 + rng.next_f64() * 60.0,
                })
                .collect();
            Sector {
                name: format!("{} - Zone {}", pick(SECTOR_NAMES, rng), i + 1),
                description: format!(
                    "The point where the strange environment of {name} shows most clearly."
                ),
                image_url: grayscale_image(&code, i),
                discovery_points,
                encounter: None,
                id,
            }
        })
        .collect();

    Planet {
        id: prefixed_id("planet", rng),
        name,
        code,
        description: "An uncharted alien environment picked up by a local scan.".to_owned(),
        sectors,
        is_visible: true,
        timestamp: clock.stardate(),
    }
}

fn pick_category(rng: &mut dyn DeterministicRng) -> DiscoveryCategory {
    let last = u32::try_from(DiscoveryCategory::ALL.len() - 1).unwrap_or(0);
    let index = rng.next_u32_range(0, last) as usize;
    DiscoveryCategory::ALL
        .get(index)
        .copied()
        .unwrap_or(DiscoveryCategory::Geology)
}

fn step(id: &str, message: &str, choices: Vec<Choice>) -> EncounterStep {
    EncounterStep {
        id: id.to_owned(),
        message: message.to_owned(),
        choices,
    }
}

fn choice(text: &str, next: Option<&str>, response: &str) -> Choice {
    Choice {
        text: text.to_owned(),
        outcome: next.map(str::to_owned).into(),
        response: response.to_owned(),
    }
}

fn glowing_spores() -> Encounter {
    Encounter {
        entity_name: "Unidentified Luminous Spores".to_owned(),
        kind: EntityKind::Flora,
        steps: vec![
            step(
                "start",
                "A colony of spores in a rock crevice pulses blue, trembling and flickering.",
                vec![
                    choice(
                        "Take a sample",
                        Some("take"),
                        "The spores flush red and the air around you warms sharply.",
                    ),
                    choice(
                        "Record the light pattern",
                        Some("record"),
                        "Mid-recording, the spores burst together into a glittering particle storm.",
                    ),
                ],
            ),
            step(
                "take",
                "The sample vial hums against your glove. The colony's glow dims to a slow red beat.",
                vec![
                    choice("Seal the vial", None, "The heat fades. The sample is stable for now."),
                    choice("Return the sample", None, "The colony brightens to blue again."),
                ],
            ),
            step(
                "record",
                "Drifting particles settle on your visor in a repeating spiral.",
                vec![choice(
                    "Step back and watch",
                    None,
                    "The spiral dissolves. Your recorder holds a pattern no one has seen before.",
                )],
            ),
        ],
        current_step_id: "start".to_owned(),
        history: Vec::new(),
        is_completed: false,
    }
}

fn petrified_structure() -> Encounter {
    Encounter {
        entity_name: "Petrified Structure".to_owned(),
        kind: EntityKind::Fauna,
        steps: vec![
            step(
                "start",
                "A huge stone tower that looks built stands here. A low hum rises as you approach.",
                vec![
                    choice(
                        "Touch the surface",
                        Some("touch"),
                        "It feels like cold metal. Unknown glyphs scroll across your dashboard.",
                    ),
                    choice(
                        "Search the surroundings",
                        Some("search"),
                        "At the tower's base you find what look like fragments of an ancient machine.",
                    ),
                ],
            ),
            step(
                "touch",
                "The hum deepens. Something inside the tower shifts its weight.",
                vec![
                    choice(
                        "Keep your hand there",
                        None,
                        "The tower settles against your palm, then goes still.",
                    ),
                    choice(
                        "Search the base instead",
                        Some("search"),
                        "You pull away. The glyphs freeze mid-scroll.",
                    ),
                ],
            ),
            step(
                "search",
                "Machine fragments lie half buried, still faintly warm.",
                vec![choice(
                    "Catalogue the fragments",
                    None,
                    "You log forty-one pieces. The hum stops as you finish.",
                )],
            ),
        ],
        current_step_id: "start".to_owned(),
        history: Vec::new(),
        is_completed: false,
    }
}

/// Builds one encounter from the built-in templates.
pub fn local_encounter(rng: &mut dyn DeterministicRng) -> Encounter {
    match rng.next_u32_range(0, 1) {
        0 => glowing_spores(),
        _ => petrified_structure(),
    }
}

/// `ContentProvider` that never fails.
#[derive(Clone)]
pub struct LocalGenerator {
    clock: Arc<dyn Clock>,
    rng: Arc<Mutex<dyn DeterministicRng + Send>>,
}

impl std::fmt::Debug for LocalGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalGenerator").finish_non_exhaustive()
    }
}

impl LocalGenerator {
    /// Creates a generator drawing from `rng`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, rng: Arc<Mutex<dyn DeterministicRng + Send>>) -> Self {
        Self { clock, rng }
    }
}

#[async_trait]
impl ContentProvider for LocalGenerator {
    async fn generate_planets(&self, count: usize) -> Vec<Planet> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (0..count)
            .map(|_| local_planet(self.clock.as_ref(), &mut *rng))
            .collect()
    }

    async fn generate_encounter(&self) -> Option<Encounter> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Some(local_encounter(&mut *rng))
    }
}
