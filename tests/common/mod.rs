#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    routing,
};
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::{Value, json};
use starfilms::{
    AppState,
    catalog::CatalogImporter,
    config::Config,
    db,
    entities::{comment, film},
    films::FilmService,
    swapi::SwapiClient,
};
use tokio::net::TcpListener;

pub async fn test_db() -> DatabaseConnection {
    db::connect_and_migrate("sqlite::memory:").await.unwrap()
}

/// A stand-in SWAPI serving a fixed response from `/api/films/`.
pub struct FakeSwapi {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl FakeSwapi {
    pub async fn serve(status: StatusCode, body: Value) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/api/films/",
            routing::get(move || {
                let counter = counter.clone();
                let body = body.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (status, Json(body))
                }
            }),
        );
        let addr = spawn(router).await;
        Self { base_url: format!("http://{addr}/api"), hits }
    }

    pub async fn ok() -> Self {
        Self::serve(StatusCode::OK, films_page()).await
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

/// Three films, deliberately out of release order.
pub fn films_page() -> Value {
    json!({
        "count": 3,
        "next": null,
        "previous": null,
        "results": [
            {
                "title": "The Phantom Menace",
                "episode_id": 1,
                "director": "George Lucas",
                "release_date": "1999-05-19"
            },
            {
                "title": "A New Hope",
                "episode_id": 4,
                "director": "George Lucas",
                "release_date": "1977-05-25"
            },
            {
                "title": "The Empire Strikes Back",
                "episode_id": 5,
                "director": "Irvin Kershner",
                "release_date": "1980-05-17"
            }
        ]
    })
}

pub fn swapi_client(base_url: &str) -> SwapiClient {
    let http = reqwest::Client::builder().timeout(Duration::from_secs(5)).build().unwrap();
    SwapiClient::new(http, base_url.to_string())
}

pub fn importer(db: &DatabaseConnection, base_url: &str) -> CatalogImporter {
    CatalogImporter::new(db.clone(), swapi_client(base_url))
}

pub fn film_service(db: &DatabaseConnection, base_url: &str) -> FilmService {
    FilmService::new(db.clone(), importer(db, base_url))
}

pub fn app_state(db: &DatabaseConnection, base_url: &str) -> Arc<AppState> {
    let config = Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        database_url: "sqlite::memory:".to_string(),
        swapi_base_url: base_url.to_string(),
        swapi_timeout_secs: 5,
    };
    Arc::new(AppState { config: Arc::new(config), films: film_service(db, base_url) })
}

pub async fn insert_film(
    db: &DatabaseConnection,
    id: i32,
    title: &str,
    release_date: &str,
    external_id: i32,
) -> film::Model {
    film::ActiveModel {
        id: Set(id),
        title: Set(title.to_string()),
        release_date: Set(release_date.to_string()),
        external_id: Set(external_id),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn insert_comment(
    db: &DatabaseConnection,
    film_id: i32,
    text: &str,
    created_at: i64,
) -> comment::Model {
    comment::ActiveModel {
        id: Default::default(),
        film_id: Set(film_id),
        text: Set(text.to_string()),
        created_at: Set(created_at),
    }
    .insert(db)
    .await
    .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(resp: Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
