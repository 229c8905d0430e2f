use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult, ModelTrait,
    PaginatorTrait, QueryOrder, QuerySelect, Set, sea_query::Expr,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    catalog::CatalogImporter,
    entities::{comment, film},
    error::{AppError, AppResult},
    models::{CommentView, FilmView, NewComment},
};

#[derive(Debug, FromQueryResult)]
struct FilmRow {
    id: i32,
    title: String,
    release_date: String,
    comment_count: i64,
}

#[derive(Clone)]
pub struct FilmService {
    db: DatabaseConnection,
    importer: CatalogImporter,
}

impl FilmService {
    pub fn new(db: DatabaseConnection, importer: CatalogImporter) -> Self {
        Self { db, importer }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Lists every film by release date with its live comment count.
    ///
    /// Side effect: when the film table is empty this first runs a full
    /// catalog import, and an import failure fails the call. Two callers that
    /// both see an empty table will both import; the unique external id makes
    /// the second one a no-op.
    pub async fn list_films(&self) -> AppResult<Vec<FilmView>> {
        if film::Entity::find().count(&self.db).await? == 0 {
            info!("film table empty, importing catalog");
            self.importer.import_all().await?;
        }

        let rows = film::Entity::find()
            .select_only()
            .column(film::Column::Id)
            .column(film::Column::Title)
            .column(film::Column::ReleaseDate)
            .column_as(Expr::col((comment::Entity, comment::Column::Id)).count(), "comment_count")
            .left_join(comment::Entity)
            .group_by(film::Column::Id)
            .group_by(film::Column::Title)
            .group_by(film::Column::ReleaseDate)
            .order_by_asc(film::Column::ReleaseDate)
            .order_by_asc(film::Column::Id)
            .into_model::<FilmRow>()
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|row| -> AppResult<FilmView> {
                Ok(FilmView {
                    id: row.id,
                    title: row.title,
                    release_date: row.release_date.parse()?,
                    comment_count: row.comment_count,
                })
            })
            .collect()
    }

    pub async fn list_comments(&self, film_id: i32) -> AppResult<Vec<CommentView>> {
        let film = self.find_film(film_id).await?;

        let comments = film
            .find_related(comment::Entity)
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await?;

        comments.into_iter().map(|c| CommentView::try_from(c).map_err(AppError::from)).collect()
    }

    /// Adds a comment from a JSON payload. The film is resolved before the
    /// payload is validated, so a missing film wins over a bad body.
    pub async fn add_comment(&self, film_id: i32, payload: &Value) -> AppResult<CommentView> {
        let film = self.find_film(film_id).await?;
        let new = NewComment::try_from(payload).map_err(AppError::Validation)?;

        let model = comment::ActiveModel {
            id: Default::default(),
            film_id: Set(film.id),
            text: Set(new.text),
            created_at: Set(jiff::Timestamp::now().as_microsecond()),
        };
        let saved = model.insert(&self.db).await?;
        debug!(film_id = film.id, comment_id = saved.id, "comment added");

        Ok(CommentView::try_from(saved)?)
    }

    pub async fn find_film(&self, film_id: i32) -> AppResult<film::Model> {
        film::Entity::find_by_id(film_id).one(&self.db).await?.ok_or(AppError::NotFound)
    }
}
