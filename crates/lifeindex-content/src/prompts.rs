//! Prompts and response schemas sent to the generative model.
//!
//! The schemas use the model's structured-output dialect (upper-case type
//! names). They constrain shape only; counts are requested in the prompt text
//! and are not enforced on the way back.

use lifeindex_core::model::{DiscoveryCategory, SECTORS_PER_PLANET};
use serde_json::{Value, json};

/// Instruction for a batch of `count` planets.
#[must_use]
pub fn planet_prompt(count: usize) -> String {
    format!(
        "[TASK: INTERSTELLAR EXPLORATION]\n\
         Generate {count} highly detailed and strange alien planets.\n\
         RULES:\n\
         1. Each planet must have EXACTLY {SECTORS_PER_PLANET} sectors.\n\
         2. Each sector must have between 5 and 10 discovery points.\n\
         3. Use precise, specialised scientific terminology in the descriptions.\n\
         4. Scatter discovery points randomly (x and y between 10 and 90)."
    )
}

/// Instruction for one encounter.
pub const ENCOUNTER_PROMPT: &str = "Generate a mysterious encounter with an alien entity. \
     It must be non-verbal: describe only sounds, light and movement. \
     Every nextStepId must name a step in the steps list or be null.";

/// Schema for a planet batch.
#[must_use]
pub fn planet_schema() -> Value {
    let categories: Vec<&str> = DiscoveryCategory::ALL.iter().map(|c| c.as_str()).collect();
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING", "description": "Name of the planet" },
                "code": { "type": "STRING", "description": "Scientific code like 'EXO-882'" },
                "description": { "type": "STRING", "description": "A brief atmospheric and geological summary" },
                "sectors": {
                    "type": "ARRAY",
                    "minItems": SECTORS_PER_PLANET,
                    "maxItems": SECTORS_PER_PLANET,
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": { "type": "STRING", "description": "Name of the sector" },
                            "description": { "type": "STRING", "description": "Description of the landscape" },
                            "discoveryPoints": {
                                "type": "ARRAY",
                                "items": {
                                    "type": "OBJECT",
                                    "properties": {
                                        "id": { "type": "STRING" },
                                        "label": { "type": "STRING", "description": "Title of the discovery" },
                                        "data": { "type": "STRING", "description": "Detailed scientific observation data" },
                                        "iconType": { "type": "STRING", "enum": categories },
                                        "x": { "type": "NUMBER", "description": "X coordinate (0-100)" },
                                        "y": { "type": "NUMBER", "description": "Y coordinate (0-100)" }
                                    },
                                    "required": ["id", "label", "data", "iconType", "x", "y"]
                                }
                            }
                        },
                        "required": ["name", "description", "discoveryPoints"]
                    }
                }
            },
            "required": ["name", "code", "description", "sectors"]
        }
    })
}

/// Schema for one encounter.
#[must_use]
pub fn encounter_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "entityName": { "type": "STRING" },
            "type": { "type": "STRING", "enum": ["FLORA", "FAUNA"] },
            "steps": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "message": { "type": "STRING", "description": "Non-verbal description of the encounter" },
                        "choices": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "text": { "type": "STRING", "description": "The explorer's action" },
                                    "nextStepId": { "type": "STRING", "nullable": true },
                                    "finalResponse": { "type": "STRING", "description": "The result of the action" }
                                },
                                "required": ["text", "nextStepId", "finalResponse"]
                            }
                        }
                    },
                    "required": ["id", "message", "choices"]
                }
            }
        },
        "required": ["entityName", "type", "steps"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planet_prompt_mentions_count_and_sector_rule() {
        let prompt = planet_prompt(3);

        assert!(prompt.contains("Generate 3 "));
        assert!(prompt.contains("EXACTLY 5 sectors"));
    }

    #[test]
    fn test_planet_schema_lists_every_category() {
        let schema = planet_schema();

        let tags = &schema["items"]["properties"]["sectors"]["items"]["properties"]
            ["discoveryPoints"]["items"]["properties"]["iconType"]["enum"];
        assert_eq!(tags.as_array().map(Vec::len), Some(6));
        assert_eq!(schema["items"]["properties"]["sectors"]["maxItems"], 5);
    }

    #[test]
    fn test_encounter_schema_allows_null_target() {
        let schema = encounter_schema();

        let next = &schema["properties"]["steps"]["items"]["properties"]["choices"]["items"]
            ["properties"]["nextStepId"];
        assert_eq!(next["nullable"], true);
    }
}
