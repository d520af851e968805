//! Volatile in-process stores, used when no database is configured.
//!
//! Contents live as long as the process. Writes never fail.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use lifeindex_core::error::DomainError;
use lifeindex_core::model::{ExplorationLog, Planet};
use lifeindex_core::repository::{LogRepository, PlanetRepository};

/// Planet store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryPlanetRepository {
    planets: RwLock<Vec<Planet>>,
}

#[async_trait]
impl PlanetRepository for MemoryPlanetRepository {
    async fn load_all(&self) -> Result<Vec<Planet>, DomainError> {
        Ok(self
            .planets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn replace_all(&self, planets: &[Planet]) -> Result<(), DomainError> {
        *self.planets.write().unwrap_or_else(PoisonError::into_inner) = planets.to_vec();
        Ok(())
    }
}

/// Log store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryLogRepository {
    logs: RwLock<Vec<ExplorationLog>>,
}

#[async_trait]
impl LogRepository for MemoryLogRepository {
    async fn load_logs(&self) -> Result<Vec<ExplorationLog>, DomainError> {
        Ok(self
            .logs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn save_logs(&self, logs: &[ExplorationLog]) -> Result<(), DomainError> {
        *self.logs.write().unwrap_or_else(PoisonError::into_inner) = logs.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lifeindex_test_support::sample_planet;

    use super::*;

    #[tokio::test]
    async fn test_replace_all_overwrites_previous_collection() {
        let repo = MemoryPlanetRepository::default();
        repo.replace_all(&[sample_planet("planet-a"), sample_planet("planet-b")])
            .await
            .unwrap();

        repo.replace_all(&[sample_planet("planet-c")]).await.unwrap();

        let ids: Vec<_> = repo.load_all().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["planet-c"]);
    }

    #[tokio::test]
    async fn test_logs_start_empty_and_keep_order() {
        let repo = MemoryLogRepository::default();
        assert!(repo.load_logs().await.unwrap().is_empty());

        let logs = vec![
            ExplorationLog {
                id: "log-2".to_owned(),
                planet_id: "planet-a".to_owned(),
                planet_name: "Kepler Void".to_owned(),
                author: "vega".to_owned(),
                content: "Second.".to_owned(),
                timestamp: 2,
                is_visible: true,
            },
            ExplorationLog {
                id: "log-1".to_owned(),
                planet_id: "planet-a".to_owned(),
                planet_name: "Kepler Void".to_owned(),
                author: "vega".to_owned(),
                content: "First.".to_owned(),
                timestamp: 1,
                is_visible: true,
            },
        ];
        repo.save_logs(&logs).await.unwrap();

        assert_eq!(repo.load_logs().await.unwrap(), logs);
    }
}
