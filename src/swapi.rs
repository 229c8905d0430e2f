use std::collections::HashSet;

use jiff::civil::Date;
use serde::Deserialize;
use tracing::debug;

use crate::{error::ImportError, models::CatalogFilm};

/// Client for the SWAPI film list.
#[derive(Clone)]
pub struct SwapiClient {
    client: reqwest::Client,
    base_url: String,
}

impl SwapiClient {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub fn films_url(&self) -> String {
        format!("{}/films/", self.base_url.trim_end_matches('/'))
    }

    /// Fetches every page of the film list. Any malformed entry fails the
    /// whole fetch, so callers never see a partial catalog.
    pub async fn fetch_films(&self) -> Result<Vec<CatalogFilm>, ImportError> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut url = self.films_url();

        loop {
            debug!(url = %url, "fetching film page");
            let page: FilmPage =
                self.client.get(&url).send().await?.error_for_status()?.json().await?;
            debug!(url = %url, films_found = page.results.len(), "parsed film page");

            for entry in page.results {
                out.push(CatalogFilm::try_from(entry)?);
            }

            seen.insert(url);
            match page.next {
                Some(next) if !seen.contains(&next) => url = next,
                _ => break,
            }
        }

        Ok(out)
    }
}

#[derive(Debug, Deserialize)]
struct FilmPage {
    results: Vec<FilmEntry>,
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FilmEntry {
    episode_id: i32,
    title: String,
    release_date: String,
}

impl TryFrom<FilmEntry> for CatalogFilm {
    type Error = ImportError;

    fn try_from(entry: FilmEntry) -> Result<Self, Self::Error> {
        let release_date = entry.release_date.trim().parse::<Date>().map_err(|source| {
            ImportError::InvalidReleaseDate {
                episode_id: entry.episode_id,
                value: entry.release_date.clone(),
                source,
            }
        })?;
        Ok(Self { external_id: entry.episode_id, title: entry.title, release_date })
    }
}
