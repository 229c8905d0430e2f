use sea_orm::{DatabaseConnection, EntityTrait, Set, sea_query::OnConflict};
use tracing::info;

use crate::{entities::film, error::ImportError, models::CatalogFilm, swapi::SwapiClient};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub fetched: usize,
    pub created: u64,
}

/// Populates the film table from SWAPI, keyed by the provider's episode id.
#[derive(Clone)]
pub struct CatalogImporter {
    db: DatabaseConnection,
    swapi: SwapiClient,
}

impl CatalogImporter {
    pub fn new(db: DatabaseConnection, swapi: SwapiClient) -> Self {
        Self { db, swapi }
    }

    /// Fetches the full catalog, then inserts each film whose external id is
    /// not already stored. Existing rows are never modified, so repeated or
    /// concurrent imports converge on one row per external id.
    pub async fn import_all(&self) -> Result<ImportSummary, ImportError> {
        let films = self.swapi.fetch_films().await?;

        let mut summary = ImportSummary { fetched: films.len(), created: 0 };
        for entry in &films {
            summary.created += self.insert_if_absent(entry).await?;
        }

        info!(fetched = summary.fetched, created = summary.created, "catalog import finished");
        Ok(summary)
    }

    async fn insert_if_absent(&self, entry: &CatalogFilm) -> Result<u64, ImportError> {
        let model = film::ActiveModel {
            id: Default::default(),
            title: Set(entry.title.clone()),
            release_date: Set(entry.release_date.to_string()),
            external_id: Set(entry.external_id),
        };

        let inserted = film::Entity::insert(model)
            .on_conflict(OnConflict::column(film::Column::ExternalId).do_nothing().to_owned())
            .exec_without_returning(&self.db)
            .await?;

        Ok(inserted)
    }
}
