//! HttpCompanyApi against an in-process axum backend

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use coadmin_core::{ApiError, Company, CompanyApi, HttpCompanyApi, Integration};
use serde_json::Value;

#[derive(Default)]
struct Backend {
    companies: Vec<Company>,
    next_id: u64,
    last_post: Option<Value>,
}

type Store = Arc<Mutex<Backend>>;

async fn list(State(store): State<Store>) -> Json<Vec<Company>> {
    Json(store.lock().unwrap().companies.clone())
}

async fn create(
    State(store): State<Store>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Company>), StatusCode> {
    let company: Company = serde_json::from_value(body.clone()).map_err(|_| StatusCode::BAD_REQUEST)?;
    let mut backend = store.lock().unwrap();
    backend.next_id += 1;
    let stored = Company {
        id: Some(backend.next_id),
        ..company
    };
    backend.companies.push(stored.clone());
    backend.last_post = Some(body);
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn update(
    State(store): State<Store>,
    Path(id): Path<u64>,
    Json(company): Json<Company>,
) -> StatusCode {
    let mut backend = store.lock().unwrap();
    match backend.companies.iter_mut().find(|c| c.id == Some(id)) {
        Some(existing) => {
            *existing = company;
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn remove(State(store): State<Store>, Path(id): Path<u64>) -> StatusCode {
    let mut backend = store.lock().unwrap();
    let before = backend.companies.len();
    backend.companies.retain(|c| c.id != Some(id));
    if backend.companies.len() < before {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn spawn_backend() -> (SocketAddr, Store) {
    let store: Store = Arc::new(Mutex::new(Backend::default()));
    let app = Router::new()
        .route("/companies", get(list).post(create))
        .route("/companies/{id}", put(update).delete(remove))
        .with_state(store.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, store)
}

fn client(addr: SocketAddr) -> HttpCompanyApi {
    HttpCompanyApi::new(format!("http://{}/", addr), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_crud_round_trip() {
    let (addr, store) = spawn_backend().await;
    let api = client(addr);

    assert!(api.list().await.unwrap().is_empty());

    let mut draft = Company::named("Acme");
    draft.integrations.push(Integration::new("Jira", "jira.png"));
    let created = api.create(&draft).await.unwrap().unwrap();
    assert_eq!(created.id, Some(1));

    let mut edited = created.clone();
    edited.name = "Acme Corp".to_string();
    edited.integrations.clear();
    assert_eq!(api.update(&edited).await.unwrap(), None);

    let listed = api.list().await.unwrap();
    assert_eq!(listed, vec![edited]);

    api.delete(1).await.unwrap();
    assert!(api.list().await.unwrap().is_empty());
    assert!(store.lock().unwrap().companies.is_empty());
}

#[tokio::test]
async fn test_create_strips_id_and_uses_wire_names() {
    let (addr, store) = spawn_backend().await;
    let api = client(addr);

    let company = Company {
        id: Some(42),
        ..Company::named("Globex")
    };
    api.create(&company).await.unwrap();

    let body = store.lock().unwrap().last_post.clone().unwrap();
    assert!(body.get("id").is_none());
    assert_eq!(body["companyName"], "Globex");
    assert_eq!(body["integrations"], serde_json::json!([]));
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let (addr, _store) = spawn_backend().await;
    let api = client(addr);

    let err = api.delete(99).await.unwrap_err();
    match err {
        ApiError::Status { method, status, url, .. } => {
            assert_eq!(method, "DELETE");
            assert_eq!(status, 404);
            assert!(url.ends_with("/companies/99"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_request_error() {
    // Bind then drop to get a port with nothing listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr).list().await.unwrap_err();
    assert!(matches!(err, ApiError::Request { .. }));
}
