pub mod catalog;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod films;
pub mod models;
pub mod routes;
pub mod swapi;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, films::FilmService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub films: FilmService,
}

/// Every route the service answers.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/healthz/", get(routes::healthz))
        .route("/films/", get(routes::list_films))
        .route("/films/{film_id}/comments/", get(routes::list_comments))
        .route("/films/{film_id}/comments/add/", post(routes::add_comment))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
