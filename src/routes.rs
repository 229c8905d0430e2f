use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{CommentView, FilmView},
};

pub async fn index(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "project": "StarFilms",
        "description": "A simple RESTful API for managing films and comments.",
        "status": "Running",
        "available_paths": {
            "health_check": "/healthz/",
            "films": "/films/",
            "film_comments": "/films/<film_id>/comments/",
            "add_comment": "/films/<film_id>/comments/add/"
        },
        "catalog_source": state.config.swapi_base_url,
        "message": "Films are loaded from SWAPI the first time /films/ is requested."
    }))
}

pub async fn healthz() -> Json<Value> {
    Json(json!({ "Status": "Ok" }))
}

pub async fn list_films(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<FilmView>>> {
    Ok(Json(state.films.list_films().await?))
}

pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    film_id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<Vec<CommentView>>> {
    let film_id = film_id_from(film_id)?;
    Ok(Json(state.films.list_comments(film_id).await?))
}

pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    film_id: Result<Path<i32>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CommentView>)> {
    let film_id = film_id_from(film_id)?;
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            // an unknown film is reported ahead of an unreadable body
            state.films.find_film(film_id).await?;
            return Err(match rejection {
                JsonRejection::MissingJsonContentType(_) => {
                    AppError::UnsupportedMediaType(rejection.body_text())
                }
                _ => AppError::BadRequest(format!("JSON parse error - {}", rejection.body_text())),
            });
        }
    };

    let comment = state.films.add_comment(film_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

// Ids that are not integers never name a film.
fn film_id_from(path: Result<Path<i32>, PathRejection>) -> AppResult<i32> {
    path.map(|Path(id)| id).map_err(|_| AppError::NotFound)
}
