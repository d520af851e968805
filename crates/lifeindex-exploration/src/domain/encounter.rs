//! Encounter state machine.
//!
//! A sector moves through `NoEncounter -> InProgress -> Completed`. Every
//! transition is a pure function from one `Encounter` value to the next; the
//! caller writes the result back through the planet collection.

use lifeindex_core::error::DomainError;
use lifeindex_core::model::{Choice, ChoiceOutcome, Encounter, HistoryEntry, Sector};
use thiserror::Error;

/// Lifecycle state of a sector's encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterState {
    /// No encounter has been attached to the sector.
    NoEncounter,
    /// An encounter is attached and still accepts choices.
    InProgress,
    /// The encounter reached a terminal choice.
    Completed,
}

impl EncounterState {
    /// Derives the state of a sector.
    #[must_use]
    pub fn of(sector: &Sector) -> Self {
        match &sector.encounter {
            None => Self::NoEncounter,
            Some(encounter) if encounter.is_completed => Self::Completed,
            Some(_) => Self::InProgress,
        }
    }

    /// Lowercase name used in views.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoEncounter => "none",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

/// Reasons a choice can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncounterError {
    /// The encounter is terminal.
    #[error("encounter with {entity} is already completed")]
    Completed {
        /// Entity name of the completed encounter.
        entity: String,
    },

    /// The choice points at a step that is not part of the graph.
    #[error("choice '{choice}' targets unknown step '{target}'")]
    UnknownStep {
        /// Action text of the offending choice.
        choice: String,
        /// The dangling target id.
        target: String,
    },

    /// `current_step_id` does not resolve to a step.
    #[error("current step '{0}' does not exist")]
    MissingCurrentStep(String),

    /// The requested choice index is not offered at the current step.
    #[error("choice {index} is not offered at step '{step}' ({available} available)")]
    ChoiceOutOfRange {
        /// The requested index.
        index: usize,
        /// The current step id.
        step: String,
        /// Number of choices at the step.
        available: usize,
    },
}

impl From<EncounterError> for DomainError {
    fn from(err: EncounterError) -> Self {
        Self::InvalidTransition(err.to_string())
    }
}

/// Applies `choice` to `encounter`, returning the next encounter value.
///
/// A `Continue` outcome moves `current_step_id` to the target; an `End`
/// outcome sets `is_completed` and leaves `current_step_id` where it was.
/// Either way exactly one history entry is appended. The input is never
/// modified, so a rejected choice leaves the caller's value untouched.
///
/// # Errors
///
/// Returns `EncounterError::Completed` if the encounter is terminal and
/// `EncounterError::UnknownStep` if the choice targets a step id that does not
/// exist.
pub fn submit_choice(encounter: &Encounter, choice: &Choice) -> Result<Encounter, EncounterError> {
    if encounter.is_completed {
        return Err(EncounterError::Completed {
            entity: encounter.entity_name.clone(),
        });
    }

    let mut next = encounter.clone();
    match &choice.outcome {
        ChoiceOutcome::Continue(target) => {
            if encounter.step(target).is_none() {
                return Err(EncounterError::UnknownStep {
                    choice: choice.text.clone(),
                    target: target.clone(),
                });
            }
            next.current_step_id.clone_from(target);
        }
        ChoiceOutcome::End => {
            next.is_completed = true;
        }
    }
    next.history.push(HistoryEntry {
        choice: choice.text.clone(),
        response: choice.response.clone(),
    });

    Ok(next)
}

/// Selects the `index`-th choice of the current step and applies it.
///
/// # Errors
///
/// Returns `EncounterError::Completed` for a terminal encounter,
/// `EncounterError::MissingCurrentStep` if the current step cannot be
/// resolved, `EncounterError::ChoiceOutOfRange` for a bad index, and any error
/// from [`submit_choice`].
pub fn choose(encounter: &Encounter, index: usize) -> Result<Encounter, EncounterError> {
    if encounter.is_completed {
        return Err(EncounterError::Completed {
            entity: encounter.entity_name.clone(),
        });
    }

    let step = encounter
        .current_step()
        .ok_or_else(|| EncounterError::MissingCurrentStep(encounter.current_step_id.clone()))?;
    let choice = step
        .choices
        .get(index)
        .ok_or_else(|| EncounterError::ChoiceOutOfRange {
            index,
            step: step.id.clone(),
            available: step.choices.len(),
        })?;

    submit_choice(encounter, choice)
}
