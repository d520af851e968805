//! Cyclic sector navigation.

use lifeindex_core::error::DomainError;
use lifeindex_core::model::Planet;

fn sector_count(planet: &Planet) -> Result<usize, DomainError> {
    match planet.sectors.len() {
        0 => Err(DomainError::Validation(format!(
            "planet {} has no sectors",
            planet.id
        ))),
        n => Ok(n),
    }
}

/// Index of the sector after `current`, wrapping to the first.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the planet has no sectors.
pub fn next_sector_index(planet: &Planet, current: usize) -> Result<usize, DomainError> {
    let len = sector_count(planet)?;
    Ok((current % len + 1) % len)
}

/// Index of the sector before `current`, wrapping to the last.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the planet has no sectors.
pub fn previous_sector_index(planet: &Planet, current: usize) -> Result<usize, DomainError> {
    let len = sector_count(planet)?;
    Ok((current % len + len - 1) % len)
}
