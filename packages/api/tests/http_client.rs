//! Runs `ApiClient` against a fake Medilabo gateway served by axum.

use std::sync::{Arc, Mutex};

use api::{ApiClient, BackendError, ClientConfig};
use axum::extract::{Form, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use store::{Backend, Credentials, Gender, NoteDraft, Patient};

const SESSION_COOKIE: &str = "SESSION=abc123";

#[derive(Default)]
struct Gateway {
    patients: Vec<Value>,
    notes: Vec<Value>,
    next_id: u32,
    requests: Vec<String>,
    /// Answer the patient list with a JSON object instead of an array.
    list_as_object: bool,
}

type Shared = Arc<Mutex<Gateway>>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.split(';').any(|c| c.trim() == SESSION_COOKIE))
}

fn record(state: &Shared, line: String) {
    state.lock().unwrap().requests.push(line);
}

async fn login(State(state): State<Shared>, Form(form): Form<std::collections::HashMap<String, String>>) -> Response {
    record(&state, "POST /login".to_string());
    let ok = form.get("username").map(String::as_str) == Some("doctor")
        && form.get("password").map(String::as_str) == Some("secret");
    if !ok {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    (
        StatusCode::OK,
        [(header::SET_COOKIE, format!("{SESSION_COOKIE}; Path=/"))],
    )
        .into_response()
}

async fn list_patients(State(state): State<Shared>, headers: HeaderMap) -> Response {
    record(&state, "GET /api/patient".to_string());
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let (patients, as_object) = {
        let gateway = state.lock().unwrap();
        (gateway.patients.clone(), gateway.list_as_object)
    };
    if as_object {
        return Json(json!({ "message": "none" })).into_response();
    }
    if patients.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(Value::Array(patients)).into_response()
}

async fn get_patient(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let found = state
        .lock()
        .unwrap()
        .patients
        .iter()
        .find(|p| p["id"] == id.as_str())
        .cloned();
    match found {
        Some(patient) => Json(patient).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn insert_patient(State(state): State<Shared>, headers: HeaderMap, Json(mut body): Json<Value>) -> Response {
    record(&state, "POST /api/patient/insert".to_string());
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut gateway = state.lock().unwrap();
    gateway.next_id += 1;
    body["id"] = json!(gateway.next_id.to_string());
    gateway.patients.push(body.clone());
    Json(body).into_response()
}

async fn update_patient(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    record(&state, format!("PUT /api/patient/update/{id}"));
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if body["birthDate"].as_str().unwrap_or_default().is_empty() {
        return (StatusCode::BAD_REQUEST, "birthDate is required").into_response();
    }
    Json(body).into_response()
}

async fn delete_patient(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    record(&state, format!("DELETE /api/patient/delete/{id}"));
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state
        .lock()
        .unwrap()
        .patients
        .retain(|p| p["id"] != id.as_str());
    StatusCode::NO_CONTENT.into_response()
}

async fn list_notes(State(state): State<Shared>, headers: HeaderMap, Path(patient_id): Path<String>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if patient_id == "blank" {
        return StatusCode::OK.into_response();
    }
    let notes: Vec<Value> = state
        .lock()
        .unwrap()
        .notes
        .iter()
        .filter(|n| n["patId"] == patient_id.as_str())
        .cloned()
        .collect();
    Json(notes).into_response()
}

async fn insert_note(State(state): State<Shared>, headers: HeaderMap, Json(mut body): Json<Value>) -> Response {
    record(&state, format!("POST /api/note/insert {body}"));
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut gateway = state.lock().unwrap();
    gateway.next_id += 1;
    body["id"] = json!(format!("n{}", gateway.next_id));
    gateway.notes.push(body.clone());
    Json(body).into_response()
}

async fn update_note(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    record(&state, format!("PUT /api/note/update/{id} {body}"));
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut gateway = state.lock().unwrap();
    match gateway.notes.iter_mut().find(|n| n["id"] == id.as_str()) {
        Some(note) => {
            note["note"] = body["note"].clone();
            Json(note.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_note(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    record(&state, format!("DELETE /api/note/delete/{id}"));
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.lock().unwrap().notes.retain(|n| n["id"] != id.as_str());
    StatusCode::OK.into_response()
}

async fn assess(headers: HeaderMap, Path(patient_id): Path<String>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if patient_id == "boom" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "note service unavailable").into_response();
    }
    Json(json!({
        "patientId": patient_id,
        "age": 45,
        "triggerCount": 3,
        "risk": "Borderline",
    }))
    .into_response()
}

async fn spawn_gateway() -> (ApiClient, Shared) {
    let state: Shared = Arc::new(Mutex::new(Gateway::default()));
    let app = Router::new()
        .route("/login", post(login))
        .route("/api/patient", get(list_patients))
        .route("/api/patient/{id}", get(get_patient))
        .route("/api/patient/insert", post(insert_patient))
        .route("/api/patient/update/{id}", put(update_patient))
        .route("/api/patient/delete/{id}", delete(delete_patient))
        .route("/api/note/{patient_id}", get(list_notes))
        .route("/api/note/insert", post(insert_note))
        .route("/api/note/update/{id}", put(update_note))
        .route("/api/note/delete/{id}", delete(delete_note))
        .route("/api/assess/{patient_id}", get(assess))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = ApiClient::new(&ClientConfig::new(format!("http://{addr}"))).unwrap();
    (client, state)
}

fn doctor() -> Credentials {
    Credentials {
        username: "doctor".to_string(),
        password: "secret".to_string(),
    }
}

fn jean() -> Patient {
    Patient {
        first_name: "Jean".to_string(),
        last_name: "Dupont".to_string(),
        birth_date: "1990-05-01".to_string(),
        gender: Gender::Male,
        ..Patient::default()
    }
}

#[tokio::test]
async fn test_session_check_without_cookie_is_unauthorized() {
    let (client, _) = spawn_gateway().await;
    assert_eq!(client.check_session().await, Err(BackendError::Unauthorized));
}

#[tokio::test]
async fn test_login_sets_cookie_for_later_calls() {
    let (client, state) = spawn_gateway().await;
    client.login(&doctor()).await.unwrap();

    // Empty list comes back as 204 and still counts as a valid session.
    client.check_session().await.unwrap();
    assert!(client.list_patients().await.unwrap().is_empty());
    assert_eq!(
        state.lock().unwrap().requests,
        vec!["POST /login", "GET /api/patient", "GET /api/patient"]
    );
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let (client, _) = spawn_gateway().await;
    let wrong = Credentials {
        password: "guess".to_string(),
        ..doctor()
    };
    assert_eq!(client.login(&wrong).await, Err(BackendError::Unauthorized));
    assert_eq!(client.check_session().await, Err(BackendError::Unauthorized));
}

#[tokio::test]
async fn test_insert_then_list_patients() {
    let (client, _) = spawn_gateway().await;
    client.login(&doctor()).await.unwrap();
    client.create_patient(&jean()).await.unwrap();

    let patients = client.list_patients().await.unwrap();
    assert_eq!(patients.len(), 1);
    let stored = &patients[0];
    assert_eq!(stored.id.as_deref(), Some("1"));
    assert_eq!(stored.first_name, "Jean");
    assert_eq!(stored.gender, Gender::Male);

    let fetched = client.get_patient("1").await.unwrap();
    assert_eq!(fetched.last_name, "Dupont");
    assert_eq!(client.get_patient("99").await, Err(BackendError::NotFound));
}

#[tokio::test]
async fn test_validation_failure_is_rejected() {
    let (client, _) = spawn_gateway().await;
    client.login(&doctor()).await.unwrap();
    let invalid = Patient {
        birth_date: String::new(),
        ..jean()
    };
    let err = client.update_patient("1", &invalid).await.unwrap_err();
    assert_eq!(
        err,
        BackendError::Rejected {
            status: 400,
            message: "birthDate is required".to_string()
        }
    );
}

#[tokio::test]
async fn test_delete_patient_accepts_no_content() {
    let (client, state) = spawn_gateway().await;
    client.login(&doctor()).await.unwrap();
    client.create_patient(&jean()).await.unwrap();
    client.delete_patient("1").await.unwrap();
    assert!(client.list_patients().await.unwrap().is_empty());
    assert!(state
        .lock()
        .unwrap()
        .requests
        .contains(&"DELETE /api/patient/delete/1".to_string()));
}

#[tokio::test]
async fn test_note_body_uses_camel_case() {
    let (client, state) = spawn_gateway().await;
    client.login(&doctor()).await.unwrap();
    let mut draft = NoteDraft::for_patient("1");
    draft.note = "Fumeur".to_string();
    client.create_note(&draft).await.unwrap();

    let notes = client.list_notes("1").await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].pat_id, "1");
    assert_eq!(notes[0].note, "Fumeur");
    assert!(client.list_notes("2").await.unwrap().is_empty());

    let requests = state.lock().unwrap().requests.clone();
    assert!(requests
        .iter()
        .any(|r| r.starts_with("POST /api/note/insert") && r.contains("\"patId\":\"1\"")));
}

#[tokio::test]
async fn test_non_array_list_body_reads_as_empty() {
    let (client, state) = spawn_gateway().await;
    client.login(&doctor()).await.unwrap();
    client.create_patient(&jean()).await.unwrap();
    state.lock().unwrap().list_as_object = true;

    assert!(client.list_patients().await.unwrap().is_empty());
    // Still a 2xx, so the session counts as valid.
    client.check_session().await.unwrap();
}

#[tokio::test]
async fn test_empty_list_body_reads_as_empty() {
    let (client, _) = spawn_gateway().await;
    client.login(&doctor()).await.unwrap();
    assert!(client.list_notes("blank").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_and_delete_note() {
    let (client, state) = spawn_gateway().await;
    client.login(&doctor()).await.unwrap();
    let mut draft = NoteDraft::for_patient("1");
    draft.note = "Fumeur".to_string();
    client.create_note(&draft).await.unwrap();
    let note = client.list_notes("1").await.unwrap().remove(0);

    let mut edit = NoteDraft::from(note.clone());
    edit.note = "Ancien fumeur".to_string();
    client.update_note(&note.id, &edit).await.unwrap();
    assert_eq!(client.list_notes("1").await.unwrap()[0].note, "Ancien fumeur");
    assert_eq!(
        client.update_note("n99", &edit).await,
        Err(BackendError::NotFound)
    );

    client.delete_note(&note.id).await.unwrap();
    assert!(client.list_notes("1").await.unwrap().is_empty());

    let requests = state.lock().unwrap().requests.clone();
    assert!(requests.iter().any(|r| {
        r.starts_with(&format!("PUT /api/note/update/{}", note.id)) && r.contains("\"note\":\"Ancien fumeur\"")
    }));
    assert!(requests.contains(&format!("DELETE /api/note/delete/{}", note.id)));
}

#[tokio::test]
async fn test_assessment_and_server_error() {
    let (client, _) = spawn_gateway().await;
    client.login(&doctor()).await.unwrap();

    let assessment = client.assess("42").await.unwrap();
    assert_eq!(assessment.age, 45);
    assert_eq!(assessment.trigger_count, 3);
    assert_eq!(assessment.risk, "Borderline");

    assert_eq!(
        client.assess("boom").await,
        Err(BackendError::Server {
            status: 500,
            message: "note service unavailable".to_string()
        })
    );
}

#[tokio::test]
async fn test_unreachable_gateway_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&ClientConfig::new(format!("http://{addr}"))).unwrap();
    assert!(matches!(
        client.check_session().await,
        Err(BackendError::Network(_))
    ));
}
